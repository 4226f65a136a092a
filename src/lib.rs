//! # Survey Builder
//!
//! 一个面向表单的问卷构建工具（终端向导版）：从远程题目目录勾选
//! 预定义题目，手动新建自定义题目，填写 `{insert 字段}` 占位符，
//! 最终导出结构化 Markdown 文档
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 封装远程数据服务（Supabase REST 接口）
//! - `SupabaseClient` - 表读取 + increment_print_count RPC
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，各服务只负责一种能力
//! - `CatalogService` - 类别 / 子类别 / 候选题目读取（带会话缓存）
//! - `DocumentExporter` - Markdown 文档渲染与写盘
//! - `UsageReporter` - 打印计数上报（每道题库题目一次）
//! - `DraftStore` - TOML 草稿存取
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 会话内的纯状态逻辑，不持有任何 I/O 资源
//! - `SurveySession` - 活动题目列表 + 占位符替换值
//! - `placeholder` - 占位符提取与替换
//!
//! ### ④ 编排层（App）
//! - `app` - 交互式向导，串联选题 → 编辑 → 填充 → 导出
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::SupabaseClient;
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, ExportError, FileError, SessionError};
pub use models::{Question, QuestionId, QuestionKind, SurveyDraft, SurveyMeta};
pub use services::{CatalogService, DocumentExporter, DraftStore, UsageReporter};
pub use workflow::SurveySession;
