//! 草稿存取服务 - 业务能力层
//!
//! 将问卷会话保存为 TOML 草稿 / 从草稿恢复，
//! 充当交互会话之间的外部状态存储

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::SurveyDraft;

/// 草稿存取服务
pub struct DraftStore {
    folder: String,
}

impl DraftStore {
    /// 创建新的草稿服务
    pub fn new(config: &Config) -> Self {
        Self {
            folder: config.draft_folder.clone(),
        }
    }

    /// 使用自定义文件夹创建
    pub fn with_folder(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    /// 保存草稿
    ///
    /// 文件名取自问卷标题（过滤路径分隔符），标题为空时用时间戳兜底
    ///
    /// # 返回
    /// 草稿文件路径
    pub async fn save(&self, draft: &SurveyDraft) -> Result<PathBuf> {
        fs::create_dir_all(&self.folder)
            .await
            .with_context(|| format!("无法创建草稿文件夹: {}", self.folder))?;

        let path = PathBuf::from(&self.folder).join(format!("{}.toml", file_stem(&draft.title)));

        let content = toml::to_string_pretty(draft).context("无法序列化草稿")?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("无法写入草稿文件: {}", path.display()))?;

        info!("💾 草稿已保存: {}", path.display());

        Ok(path)
    }

    /// 从单个 TOML 文件加载草稿
    pub async fn load(&self, draft_path: &Path) -> Result<SurveyDraft> {
        let content = fs::read_to_string(draft_path)
            .await
            .with_context(|| format!("无法读取草稿文件: {}", draft_path.display()))?;

        let draft: SurveyDraft = toml::from_str(&content)
            .with_context(|| format!("无法解析草稿文件: {}", draft_path.display()))?;

        Ok(draft.with_file_path(draft_path.to_string_lossy().to_string()))
    }

    /// 加载文件夹中的所有草稿（单个文件解析失败只告警，继续加载其余）
    pub async fn load_all(&self) -> Result<Vec<SurveyDraft>> {
        let folder = PathBuf::from(&self.folder);

        if !folder.exists() {
            return Ok(Vec::new());
        }

        let mut drafts = Vec::new();
        let mut entries = fs::read_dir(&folder)
            .await
            .with_context(|| format!("无法读取草稿文件夹: {}", self.folder))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                match self.load(&path).await {
                    Ok(draft) => drafts.push(draft),
                    Err(e) => {
                        warn!("加载草稿失败 {}: {}", path.display(), e);
                    }
                }
            }
        }

        Ok(drafts)
    }
}

/// 把标题转成安全的文件名主干
fn file_stem(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();

    if stem.trim().is_empty() {
        format!("草稿-{}", chrono::Local::now().format("%Y%m%d-%H%M%S"))
    } else {
        stem.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_sanitizes_separators() {
        assert_eq!(file_stem("社区/安全: 调查"), "社区_安全_ 调查");
    }

    #[test]
    fn test_file_stem_empty_title_gets_timestamp() {
        let stem = file_stem("   ");
        assert!(stem.starts_with("草稿-"));
    }
}
