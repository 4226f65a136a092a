//! 占位符解析 - 流程层
//!
//! 题干和选项文本中可以嵌入 `{insert 字段名}` / `{Insert 字段名}` 标记，
//! 导出前由用户逐一填入替换值。字段名区分大小写：
//! `{insert Name}` 和 `{insert name}` 是两个不同的字段

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::models::Question;

/// 占位符匹配模式（只有 insert/Insert 两种写法有效，字段名原样捕获）
const PLACEHOLDER_PATTERN: &str = r"\{[iI]nsert (.*?)\}";

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("占位符模式是固定字面量"))
}

/// 提取全部题目（题干 + 所有选项）中出现的占位符字段名
///
/// # 返回
/// 去重后的字段名集合，按字典序排列（BTreeSet 即为展示顺序）
pub fn extract_placeholders(questions: &[Question]) -> BTreeSet<String> {
    let mut fields = BTreeSet::new();

    for question in questions {
        collect_fields(&question.text, &mut fields);
        for option in &question.options {
            collect_fields(option, &mut fields);
        }
    }

    fields
}

fn collect_fields(text: &str, fields: &mut BTreeSet<String>) {
    for capture in placeholder_regex().captures_iter(text) {
        if let Some(name) = capture.get(1) {
            fields.insert(name.as_str().to_string());
        }
    }
}

/// 将文本中的占位符替换为用户提供的值
///
/// 每个已知字段同时替换 `{Insert 字段}` 和 `{insert 字段}` 两种写法的
/// 字面出现；替换映射中没有的字段原样保留。各字段的替换目标互不重叠，
/// 处理顺序不影响结果
pub fn resolve(text: &str, replacements: &BTreeMap<String, String>) -> String {
    let mut resolved = text.to_string();

    for (field, value) in replacements {
        resolved = resolved
            .replace(&format!("{{Insert {}}}", field), value)
            .replace(&format!("{{insert {}}}", field), value);
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionKind;

    fn open_question(text: &str) -> Question {
        Question::catalog(QuestionKind::Open, 1, text, vec![])
    }

    #[test]
    fn test_extract_from_text_and_options() {
        let mut closed = Question::catalog(
            QuestionKind::Closed,
            2,
            "你对{insert topic}的看法？",
            vec!["支持{insert plan}".to_string(), "反对".to_string()],
        );
        closed.options.push("{Insert other}".to_string());

        let questions = vec![open_question("住在{insert city}的感受？"), closed];
        let fields = extract_placeholders(&questions);

        let expected: Vec<&str> = vec!["city", "other", "plan", "topic"];
        assert_eq!(fields.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_extract_is_case_sensitive_on_name() {
        // 字段名不做大小写归一，Name 与 name 是两个字段
        let questions = vec![open_question("{insert Name} vs {insert name}")];
        let fields = extract_placeholders(&questions);
        assert_eq!(fields.len(), 2);
        assert!(fields.contains("Name"));
        assert!(fields.contains("name"));
    }

    #[test]
    fn test_extract_multiple_in_one_line() {
        // 非贪婪匹配：同一行中多个占位符互不吞并
        let questions = vec![open_question("{insert a}和{Insert b}都要")];
        let fields = extract_placeholders(&questions);
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_resolve_both_literal_forms() {
        let mut replacements = BTreeMap::new();
        replacements.insert("city".to_string(), "上海".to_string());

        assert_eq!(
            resolve("住在{insert city}还是{Insert city}？", &replacements),
            "住在上海还是上海？"
        );
    }

    #[test]
    fn test_resolve_unknown_field_stays_literal() {
        let replacements = BTreeMap::new();
        assert_eq!(
            resolve("住在{insert city}？", &replacements),
            "住在{insert city}？"
        );
    }

    #[test]
    fn test_resolve_empty_value_removes_token() {
        // 输入框默认空字符串也是一次有效替换
        let mut replacements = BTreeMap::new();
        replacements.insert("city".to_string(), String::new());
        assert_eq!(resolve("住在{insert city}？", &replacements), "住在？");
    }

    #[test]
    fn test_resolve_is_idempotent_once_resolved() {
        let mut replacements = BTreeMap::new();
        replacements.insert("Name".to_string(), "city".to_string());

        let once = resolve("What is your {insert Name}?", &replacements);
        let twice = resolve(&once, &replacements);
        assert_eq!(once, "What is your city?");
        assert_eq!(once, twice);
    }
}
