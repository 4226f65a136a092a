//! 问卷会话状态 - 流程层
//!
//! 维护本次会话的活动题目列表（题库勾选 + 自定义）和占位符替换值。
//! 状态对象由当前渲染循环显式持有和传递，不依赖任何环境全局量；
//! 每次结构性修改之后，调用方从这里重新读取列表再渲染，
//! 保证按索引绑定的控件不会指向过期位置

use std::collections::BTreeMap;

use crate::error::SessionError;
use crate::models::{Question, QuestionKind, SurveyDraft, SurveyMeta};

/// 问卷会话状态
///
/// 列表顺序 = 插入顺序：题库题目按目录遍历顺序在前，自定义题目按新建顺序在后
#[derive(Debug, Default)]
pub struct SurveySession {
    questions: Vec<Question>,
    custom_serial: usize,
    replacements: BTreeMap<String, String>,
}

impl SurveySession {
    /// 创建空会话
    pub fn new() -> Self {
        Self::default()
    }

    /// 从草稿恢复会话
    pub fn from_draft(draft: &SurveyDraft) -> Self {
        // 自定义题目的序号要接在草稿中已有的最大序号之后，避免 ID 冲突
        let custom_serial = draft
            .questions
            .iter()
            .filter_map(|q| q.id.strip_prefix("custom_"))
            .filter_map(|serial| serial.parse::<usize>().ok())
            .max()
            .unwrap_or(0);

        Self {
            questions: draft.questions.clone(),
            custom_serial,
            replacements: draft.replacements.clone(),
        }
    }

    /// 当前活动题目列表
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// 按索引取题目
    pub fn question(&self, index: usize) -> Result<&Question, SessionError> {
        self.questions
            .get(index)
            .ok_or(SessionError::QuestionIndexOutOfRange {
                index,
                len: self.questions.len(),
            })
    }

    /// 根据当前勾选状态重建题库题目部分
    ///
    /// 活动列表是勾选状态的纯函数：候选集合内已有且仍勾选的保留
    /// （连同已编辑的题干/选项），勾掉的移除，新勾上的按候选顺序追加。
    /// 不在本次候选集合中的题库题目（其他子类别下勾选的）不受影响；
    /// 自定义题目也不受影响，始终排在题库题目之后
    ///
    /// # 参数
    /// - `candidates`: 当前子类别下的候选题目（目录遍历顺序）
    /// - `selected_ids`: 勾选中的题目 ID
    pub fn set_catalog_selection(&mut self, candidates: &[Question], selected_ids: &[String]) {
        let mut rebuilt: Vec<Question> = Vec::new();

        // 保留候选集合之外的、以及仍勾选的已有题目，顺序与编辑内容不变
        for question in self.questions.iter().filter(|q| !q.is_custom) {
            let is_candidate = candidates.iter().any(|c| c.id == question.id);
            if !is_candidate || selected_ids.contains(&question.id) {
                rebuilt.push(question.clone());
            }
        }

        // 追加新勾上的候选题目
        for candidate in candidates {
            if selected_ids.contains(&candidate.id) && !rebuilt.iter().any(|q| q.id == candidate.id)
            {
                rebuilt.push(candidate.clone());
            }
        }

        rebuilt.extend(self.questions.iter().filter(|q| q.is_custom).cloned());
        self.questions = rebuilt;
    }

    /// 追加一道自定义题目
    ///
    /// # 返回
    /// 新题目在活动列表中的索引
    pub fn add_custom_question(&mut self) -> usize {
        self.custom_serial += 1;
        self.questions.push(Question::custom(self.custom_serial));
        self.questions.len() - 1
    }

    /// 覆盖题干（不做校验，允许空文本）
    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<(), SessionError> {
        self.question_mut(index)?.text = text.into();
        Ok(())
    }

    /// 修改题目类型（仅自定义题目允许）
    ///
    /// 封闭切回开放时不清空已录入的选项，它们保持休眠，
    /// 再切回封闭时原样可用
    pub fn set_kind(&mut self, index: usize, kind: QuestionKind) -> Result<(), SessionError> {
        let question = self.question_mut(index)?;
        if !question.is_custom {
            return Err(SessionError::KindChangeOnCatalogQuestion {
                id: question.id.clone(),
            });
        }
        question.kind = kind;
        Ok(())
    }

    /// 追加一个空选项
    ///
    /// # 返回
    /// 新选项的索引
    pub fn add_option(&mut self, index: usize) -> Result<usize, SessionError> {
        let question = self.question_mut(index)?;
        question.options.push(String::new());
        Ok(question.options.len() - 1)
    }

    /// 覆盖指定选项的文本
    pub fn set_option(
        &mut self,
        index: usize,
        option_index: usize,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let option = self.option_mut(index, option_index)?;
        *option = value.into();
        Ok(())
    }

    /// 删除指定选项（后续选项索引前移，调用方必须随后重新渲染）
    pub fn remove_option(&mut self, index: usize, option_index: usize) -> Result<(), SessionError> {
        let question = self.question_mut(index)?;
        if option_index >= question.options.len() {
            return Err(SessionError::OptionIndexOutOfRange {
                index: option_index,
                len: question.options.len(),
            });
        }
        question.options.remove(option_index);
        Ok(())
    }

    /// 当前占位符替换映射
    pub fn replacements(&self) -> &BTreeMap<String, String> {
        &self.replacements
    }

    /// 记录一个占位符字段的替换值
    pub fn set_replacement(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.replacements.insert(field.into(), value.into());
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut Question, SessionError> {
        let len = self.questions.len();
        self.questions
            .get_mut(index)
            .ok_or(SessionError::QuestionIndexOutOfRange { index, len })
    }

    fn option_mut(
        &mut self,
        index: usize,
        option_index: usize,
    ) -> Result<&mut String, SessionError> {
        let question = self.question_mut(index)?;
        let len = question.options.len();
        question
            .options
            .get_mut(option_index)
            .ok_or(SessionError::OptionIndexOutOfRange {
                index: option_index,
                len,
            })
    }

    /// 组装当前状态对应的草稿
    pub fn to_draft(&self, meta: &SurveyMeta) -> SurveyDraft {
        SurveyDraft::from_parts(meta, &self.questions, &self.replacements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<Question> {
        vec![
            Question::catalog(QuestionKind::Open, 1, "开放题一", vec![]),
            Question::catalog(QuestionKind::Open, 2, "开放题二", vec![]),
            Question::catalog(
                QuestionKind::Closed,
                1,
                "封闭题一",
                vec!["是".to_string(), "否".to_string()],
            ),
        ]
    }

    fn ids(session: &SurveySession) -> Vec<&str> {
        session.questions().iter().map(|q| q.id.as_str()).collect()
    }

    #[test]
    fn test_selection_follows_checkbox_state() {
        let mut session = SurveySession::new();
        let candidates = candidates();

        session.set_catalog_selection(
            &candidates,
            &["open_1".to_string(), "closed_1".to_string()],
        );
        assert_eq!(ids(&session), vec!["open_1", "closed_1"]);

        // 勾掉一个：活动列表是勾选状态的纯函数，被勾掉的条目移除
        session.set_catalog_selection(&candidates, &["closed_1".to_string()]);
        assert_eq!(ids(&session), vec!["closed_1"]);
    }

    #[test]
    fn test_other_subcategory_selection_untouched() {
        let mut session = SurveySession::new();
        session.set_catalog_selection(&candidates(), &["open_1".to_string()]);

        // 换了一个子类别：open_1 不在新候选集合里，勾选状态对它无效
        let other = vec![Question::catalog(QuestionKind::Open, 9, "另一批", vec![])];
        session.set_catalog_selection(&other, &["open_9".to_string()]);
        assert_eq!(ids(&session), vec!["open_1", "open_9"]);
    }

    #[test]
    fn test_reselection_keeps_edits_and_order() {
        let mut session = SurveySession::new();
        let candidates = candidates();

        session.set_catalog_selection(&candidates, &["open_2".to_string()]);
        session.set_text(0, "改过的题干").unwrap();

        // 再勾上一个，已有条目的编辑内容和位置保持不变
        session.set_catalog_selection(
            &candidates,
            &["open_2".to_string(), "open_1".to_string()],
        );
        assert_eq!(ids(&session), vec!["open_2", "open_1"]);
        assert_eq!(session.question(0).unwrap().text, "改过的题干");
    }

    #[test]
    fn test_custom_questions_stay_after_catalog() {
        let mut session = SurveySession::new();
        let candidates = candidates();

        let idx = session.add_custom_question();
        assert_eq!(idx, 0);

        session.set_catalog_selection(&candidates, &["open_1".to_string()]);
        assert_eq!(ids(&session), vec!["open_1", "custom_1"]);
    }

    #[test]
    fn test_custom_option_editing() {
        let mut session = SurveySession::new();
        let idx = session.add_custom_question();

        session.set_kind(idx, QuestionKind::Closed).unwrap();
        session.add_option(idx).unwrap();
        session.set_option(idx, 0, "A").unwrap();
        session.add_option(idx).unwrap();
        session.set_option(idx, 1, "B").unwrap();

        // 删除第一个选项后，后续选项索引前移
        session.remove_option(idx, 0).unwrap();
        assert_eq!(session.question(idx).unwrap().options, vec!["B"]);
    }

    #[test]
    fn test_kind_change_rejected_for_catalog_question() {
        let mut session = SurveySession::new();
        session.set_catalog_selection(&candidates(), &["open_1".to_string()]);

        let err = session.set_kind(0, QuestionKind::Closed).unwrap_err();
        assert!(matches!(
            err,
            SessionError::KindChangeOnCatalogQuestion { .. }
        ));
    }

    #[test]
    fn test_dormant_options_survive_kind_switch() {
        let mut session = SurveySession::new();
        let idx = session.add_custom_question();

        session.set_kind(idx, QuestionKind::Closed).unwrap();
        session.add_option(idx).unwrap();
        session.set_option(idx, 0, "保留我").unwrap();

        // 切回开放题不清空选项，再切回封闭题时原样可用
        session.set_kind(idx, QuestionKind::Open).unwrap();
        assert_eq!(session.question(idx).unwrap().options, vec!["保留我"]);

        session.set_kind(idx, QuestionKind::Closed).unwrap();
        assert_eq!(session.question(idx).unwrap().options, vec!["保留我"]);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut session = SurveySession::new();
        assert!(matches!(
            session.set_text(0, "x").unwrap_err(),
            SessionError::QuestionIndexOutOfRange { index: 0, len: 0 }
        ));

        let idx = session.add_custom_question();
        assert!(matches!(
            session.remove_option(idx, 0).unwrap_err(),
            SessionError::OptionIndexOutOfRange { index: 0, len: 0 }
        ));
    }

    #[test]
    fn test_draft_roundtrip_preserves_serial() {
        let mut session = SurveySession::new();
        session.add_custom_question();
        session.add_custom_question();
        session.set_replacement("city", "上海");

        let meta = SurveyMeta {
            title: "标题".to_string(),
            intro: "导语".to_string(),
        };
        let draft = session.to_draft(&meta);

        let mut restored = SurveySession::from_draft(&draft);
        let idx = restored.add_custom_question();
        // 恢复后新建的自定义题目序号接在已有序号之后
        assert_eq!(restored.question(idx).unwrap().id, "custom_3");
        assert_eq!(restored.replacements().get("city").map(String::as_str), Some("上海"));
    }
}
