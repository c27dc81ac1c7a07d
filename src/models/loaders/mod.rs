pub mod document_loader;
pub mod toml_loader;

pub use document_loader::{list_documents, InputDocument};
pub use toml_loader::{load_quiz_options, load_quiz_options_or};
