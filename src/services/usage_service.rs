//! 使用计数上报服务 - 业务能力层
//!
//! 导出文档时，为列表中每道题库题目上报一次打印计数。
//! 自定义题目不上报；上报失败只告警，不阻断导出

use tracing::{debug, warn};

use crate::clients::SupabaseClient;
use crate::error::ExportError;
use crate::models::{Question, QuestionId};

/// 使用计数上报服务
pub struct UsageReporter {
    client: SupabaseClient,
}

impl UsageReporter {
    /// 创建新的上报服务
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// 为所有题库题目逐一上报打印计数（每题恰好一次）
    ///
    /// # 参数
    /// - `questions`: 会话的活动题目列表（自定义题目会被跳过）
    ///
    /// # 返回
    /// 成功上报的数量；题目 ID 无法拆分成「类型_数字」时返回错误，
    /// 该错误会让整个导出步骤失败
    pub async fn report(&self, questions: &[Question]) -> Result<usize, ExportError> {
        let mut reported = 0;

        for question in questions.iter().filter(|q| !q.is_custom) {
            let id = QuestionId::parse(&question.id)?;

            match self
                .client
                .increment_print_count(id.source_id, id.kind.code())
                .await
            {
                Ok(()) => {
                    reported += 1;
                    debug!("✓ 已上报打印计数: {}", question.id);
                }
                Err(e) => {
                    // 上报是尽力而为，失败不影响文档生成
                    warn!("⚠️ 打印计数上报失败 ({}): {}", question.id, e);
                }
            }
        }

        Ok(reported)
    }
}
