//! # Quiz Forge
//!
//! 从一段文本批量生成测验（选择题 / 判断题 / 简答题），并导出为 JSON、纯文本和 Moodle XML
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部资源，只暴露能力
//! - `GenerationClient` - 唯一的生成服务入口（OpenAI 兼容 / 桩实现）
//! - `PageSource` / `QuizStore` - 文本来源和最近一次测验的存储
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 纯函数能力，不做 I/O（导出写文件除外）
//! - `TextNormalizer` - 文本清洗、分句、关键词
//! - `DistributionPlanner` - 题型数量分配
//! - `PromptBuilder` / `ResponseParser` - 提示词构建和响应解析
//! - `exporters` - 三种导出格式
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一种题型"的完整处理流程
//! - `TypePipeline` - 提示词 → 生成（超时 + 取消）→ 解析，失败降级为空
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/quiz_generator` - 三个题型并发生成并拼装
//! - `orchestrator/batch_processor` - 批量文档处理器，管理资源和并发
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{GenerationClient, OpenAiGenerationClient, StubGenerationClient};
pub use models::{Difficulty, Question, QuestionType, QuizOptions};
pub use orchestrator::{App, QuizAssembler, QuizGenerator};
pub use workflow::{QuizCtx, TypePipeline};
