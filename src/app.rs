//! 应用主流程 - 编排层
//!
//! 终端向导：标题/导语 → 类别/子类别选择 → 勾选题库题目 →
//! 编辑题目 → 填写占位符 → 导出文档（并上报打印计数）。
//! 全程单线程、阻塞式交互，每次修改后都从会话状态重新读取再展示

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use tracing::{info, warn};

use crate::clients::SupabaseClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{QuestionKind, SurveyMeta};
use crate::services::{CatalogService, DocumentExporter, DraftStore, UsageReporter};
use crate::utils::logging;
use crate::workflow::{placeholder, SurveySession};

/// 应用主结构
pub struct App {
    config: Config,
    catalog: CatalogService,
    exporter: DocumentExporter,
    usage: UsageReporter,
    drafts: DraftStore,
    session: SurveySession,
    meta: SurveyMeta,
    theme: ColorfulTheme,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup();

        let client = SupabaseClient::new(&config);

        Ok(Self {
            catalog: CatalogService::new(client.clone()),
            usage: UsageReporter::new(client),
            exporter: DocumentExporter::new(&config),
            drafts: DraftStore::new(&config),
            session: SurveySession::new(),
            meta: SurveyMeta::default(),
            theme: ColorfulTheme::default(),
            config,
        })
    }

    /// 运行交互式主流程
    pub async fn run(&mut self) -> Result<()> {
        self.restore_draft().await?;
        self.prompt_meta()?;
        self.pick_catalog_questions().await?;
        self.edit_questions()?;
        self.fill_placeholders()?;

        if self.session.questions().is_empty() {
            warn!("⚠️ 会话中没有任何题目");
        }

        if Confirm::with_theme(&self.theme)
            .with_prompt("📤 导出文档？")
            .default(true)
            .interact()?
        {
            self.export_document().await?;
        }

        if Confirm::with_theme(&self.theme)
            .with_prompt("💾 保存草稿？")
            .default(false)
            .interact()?
        {
            self.drafts.save(&self.session.to_draft(&self.meta)).await?;
        }

        Ok(())
    }

    /// 可选：从已有草稿恢复会话
    async fn restore_draft(&mut self) -> Result<()> {
        let drafts = self.drafts.load_all().await?;
        if drafts.is_empty() {
            return Ok(());
        }

        let load = Confirm::with_theme(&self.theme)
            .with_prompt(format!("检测到 {} 份草稿，是否加载？", drafts.len()))
            .default(false)
            .interact()?;
        if !load {
            return Ok(());
        }

        let labels: Vec<String> = drafts
            .iter()
            .map(|d| {
                if d.title.trim().is_empty() {
                    "(无标题)".to_string()
                } else {
                    d.title.clone()
                }
            })
            .collect();

        let idx = Select::with_theme(&self.theme)
            .with_prompt("选择草稿")
            .items(&labels)
            .default(0)
            .interact()?;

        self.meta = drafts[idx].meta();
        self.session = SurveySession::from_draft(&drafts[idx]);
        info!("✓ 已加载草稿: {}", labels[idx]);

        Ok(())
    }

    /// 填写问卷标题和导语
    fn prompt_meta(&mut self) -> Result<()> {
        let title: String = Input::<String>::with_theme(&self.theme)
            .with_prompt("问卷标题")
            .allow_empty(true)
            .with_initial_text(self.meta.title.clone())
            .interact_text()?;
        self.meta.title = title;

        let intro: String = Input::<String>::with_theme(&self.theme)
            .with_prompt("问卷导语")
            .allow_empty(true)
            .with_initial_text(self.meta.intro.clone())
            .interact_text()?;
        self.meta.intro = intro;

        Ok(())
    }

    /// 类别 → 子类别 → 勾选候选题目
    async fn pick_catalog_questions(&mut self) -> Result<()> {
        let (category_id, subcategory_id) = {
            let data = self.catalog.load().await?;
            logging::log_catalog_loaded(data.categories.len(), data.subcategories.len());

            if data.categories.is_empty() {
                warn!("⚠️ 远程目录为空，跳过题库选择");
                return Ok(());
            }

            let names: Vec<&str> = data
                .categories
                .iter()
                .map(|c| c.category_name.as_str())
                .collect();
            let cat_idx = Select::with_theme(&self.theme)
                .with_prompt("选择类别")
                .items(&names)
                .default(0)
                .interact()?;
            let category = &data.categories[cat_idx];

            let subs = data.subcategories_for(category.category_id);
            if subs.is_empty() {
                // 无数据状态：提示后返回，不算失败
                warn!("⚠️ 类别「{}」下没有子类别", category.category_name);
                return Ok(());
            }

            let sub_names: Vec<&str> = subs.iter().map(|s| s.subcategory_name.as_str()).collect();
            let sub_idx = Select::with_theme(&self.theme)
                .with_prompt("选择子类别")
                .items(&sub_names)
                .default(0)
                .interact()?;

            (category.category_id, subs[sub_idx].subcategory_id)
        };

        let (open_questions, closed_questions) = self
            .catalog
            .load_questions(category_id, subcategory_id)
            .await?;

        // 候选顺序：开放题在前，封闭题在后（目录遍历顺序）
        let mut candidates = open_questions;
        candidates.extend(closed_questions);

        if candidates.is_empty() {
            info!("该子类别下没有预定义题目");
            return Ok(());
        }

        let labels: Vec<String> = candidates
            .iter()
            .map(|q| format!("[{}] {}", q.kind, logging::truncate_text(&q.text, 60)))
            .collect();
        let defaults: Vec<bool> = candidates
            .iter()
            .map(|c| self.session.questions().iter().any(|q| q.id == c.id))
            .collect();

        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt("勾选要加入问卷的题目")
            .items(&labels)
            .defaults(&defaults)
            .interact()?;

        let selected_ids: Vec<String> = picked.iter().map(|&i| candidates[i].id.clone()).collect();
        self.session.set_catalog_selection(&candidates, &selected_ids);

        info!("✓ 当前会话共 {} 道题目", self.session.questions().len());
        Ok(())
    }

    /// 编辑菜单主循环
    fn edit_questions(&mut self) -> Result<()> {
        loop {
            self.log_question_list();

            let items = ["➕ 添加自定义题目", "✏️ 编辑题目", "完成编辑"];
            let choice = Select::with_theme(&self.theme)
                .with_prompt("编辑问卷")
                .items(&items)
                .default(2)
                .interact()?;

            match choice {
                0 => {
                    let idx = self.session.add_custom_question();
                    info!("✓ 已添加自定义题目 (第 {} 题)", idx + 1);
                    self.edit_question(idx)?;
                }
                1 => {
                    if self.session.questions().is_empty() {
                        warn!("⚠️ 还没有题目可编辑");
                        continue;
                    }
                    let labels: Vec<String> = self
                        .session
                        .questions()
                        .iter()
                        .map(|q| format!("({}) {}", q.kind, logging::truncate_text(&q.text, 50)))
                        .collect();
                    let idx = Select::with_theme(&self.theme)
                        .with_prompt("选择题目")
                        .items(&labels)
                        .default(0)
                        .interact()?;
                    self.edit_question(idx)?;
                }
                _ => break,
            }
        }

        Ok(())
    }

    /// 编辑单道题目（每轮重新读取会话状态，保证菜单与状态一致）
    fn edit_question(&mut self, index: usize) -> Result<()> {
        loop {
            let (kind, is_custom, text) = {
                let question = self.session.question(index)?;
                (question.kind, question.is_custom, question.text.clone())
            };

            let mut items = vec!["修改题干"];
            if is_custom {
                items.push("修改类型");
            }
            if kind == QuestionKind::Closed {
                items.push("管理选项");
            }
            items.push("返回");

            let choice = Select::with_theme(&self.theme)
                .with_prompt(format!("第 {} 题 ({})", index + 1, kind))
                .items(&items)
                .default(items.len() - 1)
                .interact()?;

            match items[choice] {
                "修改题干" => {
                    let new_text: String = Input::<String>::with_theme(&self.theme)
                        .with_prompt("题干")
                        .allow_empty(true)
                        .with_initial_text(text)
                        .interact_text()?;
                    self.session.set_text(index, new_text)?;
                }
                "修改类型" => {
                    let kinds = [QuestionKind::Open, QuestionKind::Closed];
                    let kind_labels = ["Open", "Closed"];
                    let current = if kind == QuestionKind::Open { 0 } else { 1 };
                    let picked = Select::with_theme(&self.theme)
                        .with_prompt("题目类型")
                        .items(&kind_labels)
                        .default(current)
                        .interact()?;
                    self.session.set_kind(index, kinds[picked])?;
                }
                "管理选项" => {
                    self.edit_options(index)?;
                }
                _ => break,
            }
        }

        Ok(())
    }

    /// 选项管理循环（增 / 改 / 删，删除后索引前移由下一轮重建菜单消化）
    fn edit_options(&mut self, index: usize) -> Result<()> {
        loop {
            let options = self.session.question(index)?.options.clone();

            info!("当前选项 ({} 个):", options.len());
            for (i, option) in options.iter().enumerate() {
                info!("  - 选项 {}: {}", i + 1, logging::truncate_text(option, 40));
            }

            let mut items = vec!["➕ 添加选项"];
            if !options.is_empty() {
                items.push("✏️ 修改选项");
                items.push("❌ 删除选项");
            }
            items.push("返回");

            let choice = Select::with_theme(&self.theme)
                .with_prompt("选项管理")
                .items(&items)
                .default(items.len() - 1)
                .interact()?;

            match items[choice] {
                "➕ 添加选项" => {
                    let option_index = self.session.add_option(index)?;
                    let value: String = Input::<String>::with_theme(&self.theme)
                        .with_prompt(format!("选项 {}", option_index + 1))
                        .allow_empty(true)
                        .interact_text()?;
                    self.session.set_option(index, option_index, value)?;
                }
                "✏️ 修改选项" => {
                    let picked = Select::with_theme(&self.theme)
                        .with_prompt("选择选项")
                        .items(&options)
                        .default(0)
                        .interact()?;
                    let value: String = Input::<String>::with_theme(&self.theme)
                        .with_prompt(format!("选项 {}", picked + 1))
                        .allow_empty(true)
                        .with_initial_text(options[picked].clone())
                        .interact_text()?;
                    self.session.set_option(index, picked, value)?;
                }
                "❌ 删除选项" => {
                    let picked = Select::with_theme(&self.theme)
                        .with_prompt("删除哪个选项")
                        .items(&options)
                        .default(0)
                        .interact()?;
                    self.session.remove_option(index, picked)?;
                }
                _ => break,
            }
        }

        Ok(())
    }

    /// 逐一填写占位符字段的替换值
    fn fill_placeholders(&mut self) -> Result<()> {
        let fields = placeholder::extract_placeholders(self.session.questions());
        if fields.is_empty() {
            info!("没有检测到占位符字段");
            return Ok(());
        }

        info!("🔧 检测到 {} 个占位符字段", fields.len());

        for field in fields {
            let current = self
                .session
                .replacements()
                .get(&field)
                .cloned()
                .unwrap_or_default();

            let value: String = Input::<String>::with_theme(&self.theme)
                .with_prompt(format!("{}:", field))
                .allow_empty(true)
                .with_initial_text(current)
                .interact_text()?;

            self.session.set_replacement(field, value);
        }

        Ok(())
    }

    /// 导出文档：上报打印计数（每道题库题目一次），再渲染写盘
    async fn export_document(&self) -> AppResult<PathBuf> {
        let questions = self.session.questions();

        let reported = self.usage.report(questions).await?;
        let path = self
            .exporter
            .export(&self.meta, questions, self.session.replacements())?;

        logging::log_export_complete(questions.len(), reported, &path);

        Ok(path)
    }

    // ========== 日志辅助方法 ==========

    /// 显示当前题目列表
    fn log_question_list(&self) {
        let questions = self.session.questions();
        info!("📋 当前题目列表 ({} 道):", questions.len());

        for (i, question) in questions.iter().enumerate() {
            let origin = if question.is_custom { " [自定义]" } else { "" };
            info!(
                "  {}. ({}) {}{}",
                i + 1,
                question.kind,
                logging::truncate_text(&question.text, 60),
                origin
            );

            if self.config.verbose_logging && question.kind == QuestionKind::Closed {
                for option in &question.options {
                    info!("     - {}", logging::truncate_text(option, 40));
                }
            }
        }
    }
}
