//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文档的出题和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、校验配置、选择生成服务
//! 2. **批量加载**：扫描输入目录中的所有文档（`Vec<InputDocument>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将文档分批次处理，每批完成后再开始下一批
//! 5. **取消**：Ctrl-C 触发取消信号，进行中的生成调用立即结束
//! 6. **全局统计**：汇总所有文档的处理结果

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::infrastructure::{
    FilePageSource, GenerationClient, JsonFileStore, OpenAiGenerationClient, QuizStore,
    StubGenerationClient,
};
use crate::models::{list_documents, load_quiz_options_or, InputDocument, QuizOptions};
use crate::orchestrator::document_processor::process_document;
use crate::orchestrator::quiz_generator::QuizGenerator;
use crate::utils::logging::{
    init_log_file, log_batch_complete, log_batch_start, log_documents_loaded, log_startup,
    print_final_stats,
};
use crate::workflow::QuizCtx;

/// 应用主结构
pub struct App {
    config: Config,
    generator: Arc<QuizGenerator>,
    store: Arc<dyn QuizStore>,
    cancel: CancellationToken,
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
    pub questions: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    failed: usize,
    questions: usize,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法写入日志文件: {}", config.output_log_file))?;

        log_startup(config.max_concurrent_documents, config.use_mock_llm);

        config.validate().context("配置校验失败")?;

        let client: Arc<dyn GenerationClient> = if config.use_mock_llm {
            Arc::new(StubGenerationClient::new())
        } else {
            let client = OpenAiGenerationClient::new(&config);
            info!("🤖 使用模型: {}", client.model_name());
            Arc::new(client)
        };
        let store: Arc<dyn QuizStore> = Arc::new(JsonFileStore::new(&config.last_quiz_file));

        Ok(Self::new(config, client, store))
    }

    /// 使用指定的生成服务和存储创建应用
    pub fn new(
        config: Config,
        client: Arc<dyn GenerationClient>,
        store: Arc<dyn QuizStore>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let generator = QuizGenerator::new(
            client,
            Duration::from_secs(config.generation_timeout_secs),
            cancel.clone(),
        );

        Self {
            config,
            generator: Arc::new(generator),
            store,
            cancel,
        }
    }

    /// 取消信号，触发后进行中的生成调用立即结束，后续批次不再开始
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        let options = self.load_options().await?;

        // 加载所有待处理的文档
        info!("\n📁 正在扫描待出题的文档...");
        let all_documents = list_documents(&self.config.input_folder).await?;

        if all_documents.is_empty() {
            warn!("⚠️ 没有找到待处理的文档，程序结束");
            return Ok(ProcessingStats::default());
        }

        log_documents_loaded(all_documents.len(), self.config.max_concurrent_documents);

        let signal_task = self.spawn_signal_watcher();
        let stats = self.process_all_documents(all_documents, options).await;
        signal_task.abort();
        let stats = stats?;

        // 输出最终统计
        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            stats.questions,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 加载出题选项：选项文件优先，不存在时使用环境变量
    async fn load_options(&self) -> Result<QuizOptions> {
        let options = load_quiz_options_or(
            Path::new(&self.config.options_file),
            self.config.quiz_options.clone(),
        )
        .await?;
        options.validate().context("出题选项无效")?;
        Ok(options)
    }

    fn spawn_signal_watcher(&self) -> tokio::task::JoinHandle<()> {
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("⏹️ 收到中断信号，正在取消进行中的生成...");
                cancel.cancel();
            }
        })
    }

    /// 处理所有文档
    async fn process_all_documents(
        &self,
        all_documents: Vec<InputDocument>,
        options: QuizOptions,
    ) -> Result<ProcessingStats> {
        let max_concurrent = self.config.max_concurrent_documents.max(1);
        let semaphore = Arc::new(Semaphore::new(max_concurrent));
        let total_documents = all_documents.len();
        let total_batches = total_documents.div_ceil(max_concurrent);
        let mut stats = ProcessingStats {
            total: total_documents,
            ..Default::default()
        };

        // 分批处理
        for batch_start in (0..total_documents).step_by(max_concurrent) {
            if self.cancel.is_cancelled() {
                let remaining = total_documents - batch_start;
                warn!("⏹️ 已取消，剩余 {} 个文档未处理", remaining);
                stats.failed += remaining;
                break;
            }

            let batch_end = (batch_start + max_concurrent).min(total_documents);
            let batch_num = batch_start / max_concurrent + 1;

            log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_end,
                total_documents,
            );

            let batch_result = self
                .process_batch(
                    &all_documents[batch_start..batch_end],
                    batch_start,
                    &options,
                    semaphore.clone(),
                )
                .await?;

            stats.success += batch_result.success;
            stats.failed += batch_result.failed;
            stats.questions += batch_result.questions;

            log_batch_complete(
                batch_num,
                batch_result.success,
                batch_result.success + batch_result.failed,
            );
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_documents: &[InputDocument],
        batch_start: usize,
        options: &QuizOptions,
        semaphore: Arc<Semaphore>,
    ) -> Result<BatchResult> {
        let output_dir = PathBuf::from(&self.config.output_folder);
        let mut batch_handles = Vec::new();

        // 为本批创建并发任务
        for (idx, document) in batch_documents.iter().enumerate() {
            let ctx = QuizCtx::new(document.name.clone(), batch_start + idx + 1);
            let permit = semaphore.clone().acquire_owned().await?;

            let generator = Arc::clone(&self.generator);
            let store = Arc::clone(&self.store);
            let source = FilePageSource::new(&document.path);
            let options = options.clone();
            let output_dir = output_dir.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let result = process_document(
                    &generator,
                    store.as_ref(),
                    &source,
                    &options,
                    &output_dir,
                    &ctx,
                )
                .await;
                if let Err(e) = &result {
                    error!("{} ❌ 处理失败: {}", ctx, e);
                }
                result
            });
            batch_handles.push((document.name.clone(), handle));
        }

        // 等待本批所有任务完成
        let mut result = BatchResult::default();

        for (document_name, handle) in batch_handles {
            match handle.await {
                Ok(Ok(count)) => {
                    result.success += 1;
                    result.questions += count;
                }
                Ok(Err(_)) => {
                    result.failed += 1;
                }
                Err(e) => {
                    error!("[文档 {}] 任务执行失败: {}", document_name, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStore;

    const LECTURE: &str = "Transformers are widely used for automatic question generation today. \
Human reviewers can filter out poor quality questions before publishing.";

    fn test_config(root: &Path) -> Config {
        Config {
            max_concurrent_documents: 2,
            input_folder: root.join("input").display().to_string(),
            output_folder: root.join("output").display().to_string(),
            options_file: root.join("quiz.toml").display().to_string(),
            last_quiz_file: root.join("last_quiz.json").display().to_string(),
            output_log_file: root.join("output.txt").display().to_string(),
            use_mock_llm: true,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_run_processes_all_documents() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(&config.input_folder).unwrap();
        for name in ["a.txt", "b.md", "c.txt"] {
            std::fs::write(dir.path().join("input").join(name), LECTURE).unwrap();
        }
        std::fs::write(dir.path().join("input").join("empty.txt"), "").unwrap();

        let store = Arc::new(MemoryStore::new());
        let app = App::new(config, Arc::new(StubGenerationClient::new()), store.clone());
        let stats = app.run().await.unwrap();

        assert_eq!(
            stats,
            ProcessingStats {
                success: 3,
                failed: 1,
                total: 4,
                questions: 18,
            }
        );
        assert!(dir.path().join("output").join("b_moodle.xml").exists());
        let last_quiz = store.load_last_quiz().await.unwrap();
        assert_eq!(last_quiz.map(|q| q.len()), Some(6));
    }

    #[tokio::test]
    async fn test_options_file_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(&config.input_folder).unwrap();
        std::fs::write(dir.path().join("input").join("a.txt"), LECTURE).unwrap();
        std::fs::write(
            &config.options_file,
            "mcq = false\nshort_answer = false\nnum_questions = 2\n",
        )
        .unwrap();

        let app = App::new(
            config,
            Arc::new(StubGenerationClient::new()),
            Arc::new(MemoryStore::new()),
        );
        let stats = app.run().await.unwrap();
        assert_eq!(stats.questions, 2);
    }

    #[tokio::test]
    async fn test_cancelled_app_skips_remaining_batches() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(&config.input_folder).unwrap();
        std::fs::write(dir.path().join("input").join("a.txt"), LECTURE).unwrap();

        let app = App::new(
            config,
            Arc::new(StubGenerationClient::new()),
            Arc::new(MemoryStore::new()),
        );
        app.cancel_token().cancel();

        let stats = app.run().await.unwrap();
        assert_eq!(stats.success, 0);
        assert_eq!(stats.failed, 1);
    }

    #[tokio::test]
    async fn test_initialize_rejects_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            use_mock_llm: false,
            llm_api_key: String::new(),
            ..test_config(dir.path())
        };
        assert!(App::initialize(config).await.is_err());
    }
}
