//! 文档导出服务 - 业务能力层
//!
//! 将最终题目列表渲染为结构化 Markdown 文档并写入磁盘。
//! 文档结构固定：标题（0级标题）→ 导语段落 → "Questions"（1级标题）
//! → 编号题目列表，封闭题后跟选项的无序列表

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::error::FileError;
use crate::models::{Question, QuestionKind, SurveyMeta};
use crate::workflow::placeholder;

/// 文档导出服务
pub struct DocumentExporter {
    export_path: String,
}

impl DocumentExporter {
    /// 创建新的导出服务
    pub fn new(config: &Config) -> Self {
        Self {
            export_path: config.export_path.clone(),
        }
    }

    /// 使用自定义导出路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            export_path: path.into(),
        }
    }

    /// 渲染文档内容
    ///
    /// 渲染时对题干和选项逐一做占位符替换；
    /// 开放题只输出编号行，不输出任何选项（休眠选项不进入文档）
    pub fn render(
        meta: &SurveyMeta,
        questions: &[Question],
        replacements: &BTreeMap<String, String>,
    ) -> String {
        let mut doc = String::new();

        doc.push_str(&format!("# {}\n\n", meta.title));
        doc.push_str(&meta.intro);
        doc.push_str("\n\n");
        doc.push_str("## Questions\n\n");

        for (i, question) in questions.iter().enumerate() {
            let text = placeholder::resolve(&question.text, replacements);
            doc.push_str(&format!("{}. ({}) {}\n", i + 1, question.kind, text));

            if question.kind == QuestionKind::Closed {
                for option in &question.options {
                    let option = placeholder::resolve(option, replacements);
                    doc.push_str(&format!("- {}\n", option));
                }
            }

            doc.push('\n');
        }

        doc
    }

    /// 渲染并写入导出文件
    ///
    /// # 返回
    /// 导出文件的路径
    pub fn export(
        &self,
        meta: &SurveyMeta,
        questions: &[Question],
        replacements: &BTreeMap<String, String>,
    ) -> Result<PathBuf, FileError> {
        let content = Self::render(meta, questions, replacements);

        fs::write(&self.export_path, content).map_err(|e| FileError::WriteFailed {
            path: self.export_path.clone(),
            source: e,
        })?;

        info!("📥 文档已导出: {}", self.export_path);

        Ok(PathBuf::from(&self.export_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> SurveyMeta {
        SurveyMeta {
            title: "社区调查".to_string(),
            intro: "感谢参与".to_string(),
        }
    }

    #[test]
    fn test_open_question_with_placeholder() {
        let questions = vec![Question::catalog(
            QuestionKind::Open,
            1,
            "What is your {insert Name}?",
            vec![],
        )];
        let mut replacements = BTreeMap::new();
        replacements.insert("Name".to_string(), "city".to_string());

        let doc = DocumentExporter::render(&meta(), &questions, &replacements);
        let lines: Vec<&str> = doc.lines().collect();

        assert!(lines.contains(&"1. (Open) What is your city?"));
        // 开放题不输出任何选项行
        assert!(!doc.lines().any(|line| line.starts_with("- ")));
    }

    #[test]
    fn test_closed_question_renders_option_bullets() {
        let questions = vec![Question::catalog(
            QuestionKind::Closed,
            1,
            "是否满意？",
            vec!["Yes".to_string(), "No".to_string()],
        )];

        let doc = DocumentExporter::render(&meta(), &questions, &BTreeMap::new());
        let lines: Vec<&str> = doc.lines().collect();

        let numbered = lines
            .iter()
            .position(|l| *l == "1. (Closed) 是否满意？")
            .expect("应有编号题目行");
        assert_eq!(lines[numbered + 1], "- Yes");
        assert_eq!(lines[numbered + 2], "- No");
    }

    #[test]
    fn test_document_structure() {
        let questions = vec![
            Question::catalog(QuestionKind::Open, 1, "第一题", vec![]),
            Question::catalog(QuestionKind::Open, 2, "第二题", vec![]),
        ];

        let doc = DocumentExporter::render(&meta(), &questions, &BTreeMap::new());

        assert!(doc.starts_with("# 社区调查\n\n感谢参与\n\n## Questions\n\n"));
        assert!(doc.contains("1. (Open) 第一题\n"));
        assert!(doc.contains("2. (Open) 第二题\n"));
    }

    #[test]
    fn test_dormant_options_not_rendered_for_open() {
        // 封闭切回开放后残留的休眠选项不进入文档
        let mut question = Question::custom(1);
        question.options = vec!["残留选项".to_string()];

        let doc = DocumentExporter::render(&meta(), &[question], &BTreeMap::new());
        assert!(!doc.contains("残留选项"));
    }
}
