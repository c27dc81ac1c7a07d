//! 测验生成器 - 编排层
//!
//! 规范化 → 分配数量 → 三个题型并发生成 → 拼装
//!
//! 各题型管线之间没有共享的可变状态，只共享只读的规范化文本；
//! 拼装前等待所有题型结束（成功或降级为空）

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::AppResult;
use crate::infrastructure::GenerationClient;
use crate::models::{Question, QuizOptions, QuizRequest};
use crate::orchestrator::quiz_assembler::{QuestionRanker, QuizAssembler};
use crate::services::{DistributionPlanner, TextNormalizer};
use crate::workflow::TypePipeline;

pub struct QuizGenerator {
    pipeline: TypePipeline,
    assembler: QuizAssembler,
}

impl QuizGenerator {
    /// 创建测验生成器
    ///
    /// # 参数
    /// - `client`: 生成服务
    /// - `timeout`: 单次生成调用的超时时间
    /// - `cancel`: 取消信号，触发后所有进行中的调用立即结束
    pub fn new(
        client: Arc<dyn GenerationClient>,
        timeout: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            pipeline: TypePipeline::new(client, timeout, cancel),
            assembler: QuizAssembler::new(),
        }
    }

    pub fn with_ranker(mut self, ranker: impl QuestionRanker + 'static) -> Self {
        self.assembler = QuizAssembler::with_ranker(ranker);
        self
    }

    /// 从原始文本生成测验
    ///
    /// 只有"题目总数非零但没有启用题型"会返回错误；
    /// 文本为空时不调用生成服务，直接返回空列表
    pub async fn generate(
        &self,
        raw_text: &str,
        options: &QuizOptions,
    ) -> AppResult<Vec<Question>> {
        let text = TextNormalizer::normalize_for_generation(raw_text);
        let request = QuizRequest::new(text, options);
        let distribution = DistributionPlanner::plan_checked(
            request.enabled_types.iter().copied(),
            request.total,
        )?;

        if request.text.is_empty() {
            info!("文本规范化后为空，跳过生成");
            return Ok(Vec::new());
        }

        info!(
            "📊 题目分配: {}",
            distribution
                .iter()
                .map(|(t, count)| format!("{} {}", t, count))
                .collect::<Vec<_>>()
                .join(" / ")
        );

        let tasks = distribution
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(question_type, count)| {
                let text = Arc::clone(&request.text);
                let difficulty = &request.difficulty;
                async move {
                    let questions = self
                        .pipeline
                        .run(question_type, &text, difficulty, count)
                        .await;
                    (question_type, questions)
                }
            });

        let per_type = join_all(tasks).await;
        Ok(self.assembler.assemble(per_type))
    }
}
