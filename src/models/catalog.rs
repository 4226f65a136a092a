//! 远程数据表行模型
//!
//! 字段名与远程表列名保持一致，直接用 serde 反序列化 REST 响应

use serde::Deserialize;

/// categories 表行
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
}

/// subcategories 表行
#[derive(Debug, Clone, Deserialize)]
pub struct Subcategory {
    pub subcategory_id: i64,
    pub subcategory_name: String,
}

/// category_subcategory 链接表行
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryLink {
    pub category_id: i64,
    pub subcategory_id: i64,
}

/// open_questions 表行
#[derive(Debug, Clone, Deserialize)]
pub struct OpenQuestionRow {
    pub open_question_id: i64,
    pub question_text: String,
}

/// closed_questions 表行
#[derive(Debug, Clone, Deserialize)]
pub struct ClosedQuestionRow {
    pub closed_question_id: i64,
    pub question_text: String,
}

/// closed_questions_answers 表行
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRow {
    pub answer_option: String,
}
