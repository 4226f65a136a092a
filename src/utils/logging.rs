//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志（RUST_LOG 可覆盖，默认 info）
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n问卷构建日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup() {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 问卷构建向导");
    info!("{}", "=".repeat(60));
}

/// 记录目录加载信息
///
/// # 参数
/// - `categories`: 类别数量
/// - `subcategories`: 子类别数量
pub fn log_catalog_loaded(categories: usize, subcategories: usize) {
    info!(
        "✓ 目录就绪: {} 个类别, {} 个子类别",
        categories, subcategories
    );
}

/// 打印导出完成统计
///
/// # 参数
/// - `total`: 导出的题目总数
/// - `reported`: 成功上报打印计数的题库题目数
/// - `path`: 导出文件路径
pub fn log_export_complete(total: usize, reported: usize, path: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📊 导出完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 导出题目: {} 道", total);
    info!("📤 上报计数: {} 道", reported);
    info!("📄 文档路径: {}", path.display());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
