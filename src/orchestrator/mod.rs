//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文档处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载文档（Vec<InputDocument>）
//! - 控制并发数量（Semaphore）
//! - 持有取消信号，Ctrl-C 时取消进行中的生成
//! - 输出全局统计信息
//!
//! ### `document_processor` - 单个文档处理器
//! - 提取文本、生成测验、导出文件、保存最近一次测验
//!
//! ### `quiz_generator` - 测验生成器
//! - 规范化 → 分配 → 三个题型并发生成 → 拼装
//!
//! ### `quiz_assembler` - 测验拼装
//! - 按规范题型顺序拼接，提供排序扩展点
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<InputDocument>)
//!     ↓
//! document_processor (处理单个文档)
//!     ↓
//! quiz_generator + quiz_assembler (处理一次出题请求)
//!     ↓
//! workflow::TypePipeline (处理单个题型)
//!     ↓
//! services (能力层：normalize / plan / prompt / parse / export)
//!     ↓
//! infrastructure (基础设施：GenerationClient / PageSource / QuizStore)
//! ```

pub mod batch_processor;
pub mod document_processor;
pub mod quiz_assembler;
pub mod quiz_generator;

// 重新导出主要类型
pub use batch_processor::{App, ProcessingStats};
pub use document_processor::process_document;
pub use quiz_assembler::{IdentityRanker, QuestionRanker, QuizAssembler};
pub use quiz_generator::QuizGenerator;
