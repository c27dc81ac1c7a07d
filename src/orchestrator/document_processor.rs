//! 单个文档处理器 - 编排层
//!
//! 提取文本 → 生成测验 → 导出文件 → 保存为最近一次测验

use std::path::Path;
use tracing::{error, info, warn};

use crate::error::{AppResult, QuizError};
use crate::infrastructure::{PageSource, QuizStore};
use crate::models::{QuestionType, QuizOptions};
use crate::orchestrator::quiz_generator::QuizGenerator;
use crate::services::export_all;
use crate::workflow::QuizCtx;

/// 处理单个文档
///
/// # 参数
/// - `generator`: 测验生成器
/// - `store`: 最近一次测验的存储
/// - `source`: 文档文本来源
/// - `options`: 出题选项
/// - `output_dir`: 导出目录
/// - `ctx`: 文档上下文（用于日志和导出文件名）
///
/// # 返回
/// 生成的题目数量；一道题都没有生成时返回 `QuizError::NothingGenerated`
pub async fn process_document(
    generator: &QuizGenerator,
    store: &dyn QuizStore,
    source: &dyn PageSource,
    options: &QuizOptions,
    output_dir: &Path,
    ctx: &QuizCtx,
) -> AppResult<usize> {
    info!("{} 📄 开始出题", ctx);

    let raw_text = source.extract_page_text();
    if raw_text.trim().is_empty() {
        warn!("{} ⚠️ 文档内容为空", ctx);
    }

    let questions = generator.generate(&raw_text, options).await?;
    if questions.is_empty() {
        return Err(QuizError::NothingGenerated {
            document: ctx.document_name.clone(),
        }
        .into());
    }

    let written = export_all(&questions, output_dir, &ctx.document_name).await?;
    for path in &written {
        info!("{} 💾 已导出: {}", ctx, path.display());
    }

    // 导出已完成，存储失败不影响本次结果
    if let Err(e) = store.save_last_quiz(&questions).await {
        error!("{} 保存最近一次测验失败: {}", ctx, e);
    }

    log_document_complete(ctx, &questions);
    Ok(questions.len())
}

fn log_document_complete(ctx: &QuizCtx, questions: &[crate::models::Question]) {
    let count_of = |t: QuestionType| questions.iter().filter(|q| q.question_type == t).count();
    info!(
        "{} ✅ 出题完成: 共 {} 道（选择 {} / 判断 {} / 简答 {}）",
        ctx,
        questions.len(),
        count_of(QuestionType::MultipleChoice),
        count_of(QuestionType::TrueFalse),
        count_of(QuestionType::ShortAnswer)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::infrastructure::{MemoryStore, StaticPageSource, StubGenerationClient};
    use crate::services::ExportFormat;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    const TEXT: &str = "Transformers are widely used for automatic question generation today. \
Human reviewers can filter out poor quality questions before publishing.";

    fn generator() -> QuizGenerator {
        QuizGenerator::new(
            Arc::new(StubGenerationClient::new()),
            Duration::from_secs(5),
            CancellationToken::new(),
        )
    }

    #[tokio::test]
    async fn test_process_document_exports_and_stores() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();
        let ctx = QuizCtx::new("lecture", 1);

        let count = process_document(
            &generator(),
            &store,
            &StaticPageSource(TEXT.to_string()),
            &QuizOptions::default(),
            dir.path(),
            &ctx,
        )
        .await
        .unwrap();

        assert_eq!(count, 6);
        for format in ExportFormat::ALL {
            assert!(dir.path().join(format.file_name("lecture")).exists());
        }
        let saved = store.load_last_quiz().await.unwrap().unwrap();
        assert_eq!(saved.len(), 6);
    }

    #[tokio::test]
    async fn test_empty_document_reports_nothing_generated() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();
        let ctx = QuizCtx::new("blank", 2);

        let err = process_document(
            &generator(),
            &store,
            &StaticPageSource(String::new()),
            &QuizOptions::default(),
            dir.path(),
            &ctx,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Quiz(QuizError::NothingGenerated { .. })));
        assert!(store.load_last_quiz().await.unwrap().is_none());
        assert!(!dir.path().join("blank.json").exists());
    }
}
