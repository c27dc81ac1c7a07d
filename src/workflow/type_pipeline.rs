//! 单题型出题流程 - 流程层
//!
//! 核心职责：定义"一种题型"的完整处理流程
//!
//! 流程顺序：
//! 1. 构建提示词
//! 2. 调用生成服务（超时 + 取消）
//! 3. 解析响应
//!
//! 任何一步失败都只记录日志，该题型贡献 0 道题目，不影响其他题型

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{AppResult, LlmError};
use crate::infrastructure::GenerationClient;
use crate::models::{Difficulty, Question, QuestionType};
use crate::services::{PromptBuilder, ResponseParser};
use crate::utils::truncate_text;

/// 单题型出题流程
///
/// - 三种题型共用同一个流程，差异全部来自题型描述
/// - 不重试：每个题型只调用一次生成服务
pub struct TypePipeline {
    client: Arc<dyn GenerationClient>,
    timeout: Duration,
    cancel: CancellationToken,
}

impl TypePipeline {
    pub fn new(
        client: Arc<dyn GenerationClient>,
        timeout: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            timeout,
            cancel,
        }
    }

    /// 执行流程
    ///
    /// # 参数
    /// - `question_type`: 题型
    /// - `text`: 规范化后的文本
    /// - `difficulty`: 难度
    /// - `count`: 请求的题目数量
    ///
    /// # 返回
    /// 通过校验的题目；失败时返回空列表
    pub async fn run(
        &self,
        question_type: QuestionType,
        text: &str,
        difficulty: &Difficulty,
        count: usize,
    ) -> Vec<Question> {
        if count == 0 {
            return Vec::new();
        }

        info!("📝 开始生成 {} 道{}", count, question_type);
        let prompt = PromptBuilder::build(question_type, text, difficulty, count);

        let raw = match self.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) if e.is_cancelled() => {
                info!("⏹️ {} 生成已取消", question_type);
                return Vec::new();
            }
            Err(e) => {
                warn!("⚠️ {} 生成失败，该题型按 0 道处理: {}", question_type, e);
                return Vec::new();
            }
        };

        debug!("{} 原始响应: {}", question_type, truncate_text(&raw, 200));

        let questions = ResponseParser::parse(&raw, question_type, difficulty);
        if questions.len() < count {
            warn!(
                "⚠️ {} 数量不足: 请求 {} 道，得到 {} 道",
                question_type,
                count,
                questions.len()
            );
        } else {
            info!("✓ {} 生成完成: {} 道", question_type, questions.len());
        }

        questions
    }

    /// 单次调用生成服务，与取消信号和超时竞争
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        if self.cancel.is_cancelled() {
            return Err(LlmError::Cancelled.into());
        }

        tokio::select! {
            _ = self.cancel.cancelled() => Err(LlmError::Cancelled.into()),
            result = tokio::time::timeout(self.timeout, self.client.generate(prompt)) => {
                match result {
                    Ok(response) => response,
                    Err(_) => Err(LlmError::Timeout {
                        seconds: self.timeout.as_secs(),
                    }
                    .into()),
                }
            }
        }
    }
}
