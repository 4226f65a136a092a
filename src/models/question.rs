//! 题目模型
//!
//! 会话中的题目分两类：
//! - 题库题目：从远程目录勾选而来，ID 形如 `open_12` / `closed_7`，编码了来源
//! - 自定义题目：用户手动新建，ID 形如 `custom_1`

use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// 开放题（自由作答，无预设选项）
    Open,
    /// 封闭题（选择题，带有序选项列表）
    Closed,
}

impl QuestionKind {
    /// 获取类型代码（题目 ID 前缀，也是 RPC 的 q_type 参数）
    pub fn code(self) -> &'static str {
        match self {
            QuestionKind::Open => "open",
            QuestionKind::Closed => "closed",
        }
    }

    /// 从类型代码解析
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "open" => Some(QuestionKind::Open),
            "closed" => Some(QuestionKind::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionKind::Open => write!(f, "Open"),
            QuestionKind::Closed => write!(f, "Closed"),
        }
    }
}

/// 题库题目的复合 ID（类型 + 来源记录 ID）
///
/// 导出时需要拆回 `(kind, source_id)` 用于上报打印计数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionId {
    pub kind: QuestionKind,
    pub source_id: i64,
}

impl QuestionId {
    /// 从字符串 ID 解析复合 ID
    ///
    /// # 参数
    /// - `id`: 形如 `open_12` / `closed_7` 的字符串
    ///
    /// # 返回
    /// 拆分失败（前缀不是类型代码，或后半段不是数字）时返回错误
    pub fn parse(id: &str) -> Result<Self, ExportError> {
        let malformed = || ExportError::MalformedQuestionId { id: id.to_string() };

        let (prefix, raw_id) = id.split_once('_').ok_or_else(malformed)?;
        let kind = QuestionKind::from_code(prefix).ok_or_else(malformed)?;
        let source_id: i64 = raw_id.parse().map_err(|_| malformed())?;

        Ok(Self { kind, source_id })
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.kind.code(), self.source_id)
    }
}

/// 会话中的题目
///
/// `id` 在本次会话的活动列表内唯一，且在多次重新渲染之间保持稳定，
/// 勾选框 / 输入框的状态都靠它绑定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub kind: QuestionKind,
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub is_custom: bool,
}

impl Question {
    /// 从题库行构建题目
    pub fn catalog(
        kind: QuestionKind,
        source_id: i64,
        text: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            id: QuestionId { kind, source_id }.to_string(),
            kind,
            text: text.into(),
            options,
            is_custom: false,
        }
    }

    /// 新建自定义题目（默认开放题、空题干、无选项）
    pub fn custom(serial: usize) -> Self {
        Self {
            id: format!("custom_{}", serial),
            kind: QuestionKind::Open,
            text: String::new(),
            options: Vec::new(),
            is_custom: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_id_roundtrip() {
        let id = QuestionId {
            kind: QuestionKind::Open,
            source_id: 12,
        };
        assert_eq!(id.to_string(), "open_12");
        assert_eq!(QuestionId::parse("open_12").unwrap(), id);

        let id = QuestionId {
            kind: QuestionKind::Closed,
            source_id: 7,
        };
        assert_eq!(id.to_string(), "closed_7");
        assert_eq!(QuestionId::parse("closed_7").unwrap(), id);
    }

    #[test]
    fn test_question_id_malformed() {
        // 自定义题目的 ID 不是题库复合 ID，解析必须失败
        assert!(QuestionId::parse("custom_1").is_err());
        assert!(QuestionId::parse("open").is_err());
        assert!(QuestionId::parse("open_abc").is_err());
        assert!(QuestionId::parse("").is_err());
    }

    #[test]
    fn test_catalog_question_id_stable() {
        let q = Question::catalog(QuestionKind::Closed, 3, "题干", vec!["A".into()]);
        assert_eq!(q.id, "closed_3");
        assert!(!q.is_custom);
    }

    #[test]
    fn test_custom_question_defaults() {
        let q = Question::custom(1);
        assert_eq!(q.id, "custom_1");
        assert_eq!(q.kind, QuestionKind::Open);
        assert!(q.text.is_empty());
        assert!(q.options.is_empty());
        assert!(q.is_custom);
    }
}
