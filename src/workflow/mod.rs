pub mod quiz_ctx;
pub mod type_pipeline;

pub use quiz_ctx::QuizCtx;
pub use type_pipeline::TypePipeline;
