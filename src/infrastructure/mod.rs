//! 基础设施层
//!
//! 持有外部资源（LLM 客户端、文件），只暴露能力

pub mod generation;
pub mod page_source;
pub mod quiz_store;
pub mod stub_generation;

pub use generation::{GenerationClient, OpenAiGenerationClient};
pub use page_source::{FilePageSource, PageSource, StaticPageSource};
pub use quiz_store::{JsonFileStore, MemoryStore, QuizStore};
pub use stub_generation::StubGenerationClient;
