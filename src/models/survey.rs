//! 问卷元信息与草稿模型

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::question::Question;

/// 问卷元信息（标题 + 导语）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyMeta {
    pub title: String,
    pub intro: String,
}

/// 问卷草稿（TOML 持久化格式）
///
/// 交互会话之间的状态靠草稿文件保存，对应原型中
/// 依赖框架会话存储的部分
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyDraft {
    pub title: String,
    pub intro: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub replacements: BTreeMap<String, String>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl SurveyDraft {
    /// 从会话状态组装草稿
    pub fn from_parts(
        meta: &SurveyMeta,
        questions: &[Question],
        replacements: &BTreeMap<String, String>,
    ) -> Self {
        Self {
            title: meta.title.clone(),
            intro: meta.intro.clone(),
            questions: questions.to_vec(),
            replacements: replacements.clone(),
            file_path: None,
        }
    }

    /// 草稿的元信息部分
    pub fn meta(&self) -> SurveyMeta {
        SurveyMeta {
            title: self.title.clone(),
            intro: self.intro.clone(),
        }
    }

    /// 设置来源文件路径
    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}
