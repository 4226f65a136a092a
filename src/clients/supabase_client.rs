//! Supabase REST 客户端
//!
//! 封装所有与托管数据库（PostgREST 接口）的交互：
//! 按外键过滤的表读取 + increment_print_count 远程过程调用

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::catalog::{
    AnswerRow, Category, CategoryLink, ClosedQuestionRow, OpenQuestionRow, Subcategory,
};

/// Supabase REST 客户端
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl SupabaseClient {
    /// 创建新的数据服务客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            api_key: config.supabase_key.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// 读取表数据
    ///
    /// # 参数
    /// - `table`: 表名
    /// - `filters`: 等值过滤条件（列名 → 值），按 PostgREST 的 `col=eq.值` 约定拼接
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let endpoint = format!("{}/rest/v1/{}", self.base_url, table);

        let mut request = self
            .http
            .get(&endpoint)
            .timeout(self.timeout)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[("select", "*")]);

        for (column, value) in filters {
            request = request.query(&[(*column, format!("eq.{}", value))]);
        }

        debug!("读取表 {} ({} 个过滤条件)", table, filters.len());

        let response = request.send().await.map_err(|e| ApiError::RequestFailed {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint,
                status: status.as_u16(),
            });
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| ApiError::JsonParseFailed {
                endpoint,
                source: e,
            })
    }

    /// 读取全部类别
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.select("categories", &[]).await
    }

    /// 读取全部子类别
    pub async fn fetch_subcategories(&self) -> Result<Vec<Subcategory>, ApiError> {
        self.select("subcategories", &[]).await
    }

    /// 读取类别-子类别链接表
    pub async fn fetch_category_links(&self) -> Result<Vec<CategoryLink>, ApiError> {
        self.select("category_subcategory", &[]).await
    }

    /// 读取指定类别+子类别下的开放题
    pub async fn fetch_open_questions(
        &self,
        category_id: i64,
        subcategory_id: i64,
    ) -> Result<Vec<OpenQuestionRow>, ApiError> {
        self.select(
            "open_questions",
            &[
                ("category_id", category_id.to_string()),
                ("subcategory_id", subcategory_id.to_string()),
            ],
        )
        .await
    }

    /// 读取指定类别+子类别下的封闭题
    pub async fn fetch_closed_questions(
        &self,
        category_id: i64,
        subcategory_id: i64,
    ) -> Result<Vec<ClosedQuestionRow>, ApiError> {
        self.select(
            "closed_questions",
            &[
                ("category_id", category_id.to_string()),
                ("subcategory_id", subcategory_id.to_string()),
            ],
        )
        .await
    }

    /// 读取某道封闭题的答案选项
    pub async fn fetch_answer_options(
        &self,
        closed_question_id: i64,
    ) -> Result<Vec<AnswerRow>, ApiError> {
        self.select(
            "closed_questions_answers",
            &[("closed_question_id", closed_question_id.to_string())],
        )
        .await
    }

    /// 调用 increment_print_count 远程过程，为一道题库题目累加打印计数
    ///
    /// # 参数
    /// - `q_id`: 题目来源记录 ID
    /// - `q_type`: 题目类型代码（"open" / "closed"）
    pub async fn increment_print_count(&self, q_id: i64, q_type: &str) -> Result<(), ApiError> {
        let endpoint = format!("{}/rest/v1/rpc/increment_print_count", self.base_url);

        debug!("上报打印计数: q_id={}, q_type={}", q_id, q_type);

        let response = self
            .http
            .post(&endpoint)
            .timeout(self.timeout)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&json!({ "q_id": q_id, "q_type": q_type }))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint,
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
