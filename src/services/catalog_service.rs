//! 题目目录服务 - 业务能力层
//!
//! 负责类别 / 子类别 / 预定义题目的读取。
//! 类别、子类别和链接表在会话内只加载一次，之后全部走缓存；
//! 题目按「类别 + 子类别」即查即用

use tracing::{debug, info};

use crate::clients::SupabaseClient;
use crate::error::ApiError;
use crate::models::catalog::{Category, CategoryLink, Subcategory};
use crate::models::{Question, QuestionKind};

/// 会话级目录缓存
#[derive(Debug, Clone, Default)]
pub struct CatalogData {
    pub categories: Vec<Category>,
    pub subcategories: Vec<Subcategory>,
    pub links: Vec<CategoryLink>,
}

impl CatalogData {
    /// 通过链接表求某类别下的子类别（保持 subcategories 的原有顺序）
    ///
    /// 结果为空不是错误：调用方应展示「无数据」状态
    pub fn subcategories_for(&self, category_id: i64) -> Vec<&Subcategory> {
        let linked_ids: Vec<i64> = self
            .links
            .iter()
            .filter(|link| link.category_id == category_id)
            .map(|link| link.subcategory_id)
            .collect();

        self.subcategories
            .iter()
            .filter(|sub| linked_ids.contains(&sub.subcategory_id))
            .collect()
    }
}

/// 题目目录服务
pub struct CatalogService {
    client: SupabaseClient,
    cache: Option<CatalogData>,
}

impl CatalogService {
    /// 创建新的目录服务
    pub fn new(client: SupabaseClient) -> Self {
        Self {
            client,
            cache: None,
        }
    }

    /// 加载类别 / 子类别 / 链接表（只加载一次，之后读缓存）
    pub async fn load(&mut self) -> Result<&CatalogData, ApiError> {
        if self.cache.is_none() {
            let categories = self.client.fetch_categories().await?;
            let subcategories = self.client.fetch_subcategories().await?;
            let links = self.client.fetch_category_links().await?;

            info!(
                "✓ 目录加载完成: {} 个类别 / {} 个子类别 / {} 条链接",
                categories.len(),
                subcategories.len(),
                links.len()
            );

            self.cache = Some(CatalogData {
                categories,
                subcategories,
                links,
            });
        }

        match &self.cache {
            Some(data) => Ok(data),
            None => unreachable!("缓存已在上方填充"),
        }
    }

    /// 加载指定类别 + 子类别下的候选题目
    ///
    /// 每道封闭题的答案选项通过二次查询（按封闭题 ID）补齐
    ///
    /// # 返回
    /// (开放题列表, 封闭题列表)，各自保持远程返回顺序
    pub async fn load_questions(
        &self,
        category_id: i64,
        subcategory_id: i64,
    ) -> Result<(Vec<Question>, Vec<Question>), ApiError> {
        let open_rows = self
            .client
            .fetch_open_questions(category_id, subcategory_id)
            .await?;
        let closed_rows = self
            .client
            .fetch_closed_questions(category_id, subcategory_id)
            .await?;

        let open_questions: Vec<Question> = open_rows
            .into_iter()
            .map(|row| {
                Question::catalog(
                    QuestionKind::Open,
                    row.open_question_id,
                    row.question_text,
                    vec![],
                )
            })
            .collect();

        let mut closed_questions = Vec::with_capacity(closed_rows.len());
        for row in closed_rows {
            let answers = self
                .client
                .fetch_answer_options(row.closed_question_id)
                .await?;
            let options: Vec<String> = answers.into_iter().map(|a| a.answer_option).collect();

            closed_questions.push(Question::catalog(
                QuestionKind::Closed,
                row.closed_question_id,
                row.question_text,
                options,
            ));
        }

        debug!(
            "候选题目: {} 道开放题, {} 道封闭题",
            open_questions.len(),
            closed_questions.len()
        );

        Ok((open_questions, closed_questions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_fixture() -> CatalogData {
        CatalogData {
            categories: vec![
                Category {
                    category_id: 1,
                    category_name: "社区".to_string(),
                },
                Category {
                    category_id: 2,
                    category_name: "交通".to_string(),
                },
            ],
            subcategories: vec![
                Subcategory {
                    subcategory_id: 10,
                    subcategory_name: "安全".to_string(),
                },
                Subcategory {
                    subcategory_id: 11,
                    subcategory_name: "绿化".to_string(),
                },
            ],
            links: vec![CategoryLink {
                category_id: 1,
                subcategory_id: 11,
            }],
        }
    }

    #[test]
    fn test_subcategories_join() {
        let data = catalog_fixture();
        let subs = data.subcategories_for(1);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].subcategory_name, "绿化");
    }

    #[test]
    fn test_category_without_links_yields_empty_not_error() {
        // 「无数据」状态：空列表，由调用方提示，而不是报错
        let data = catalog_fixture();
        assert!(data.subcategories_for(2).is_empty());
    }
}
