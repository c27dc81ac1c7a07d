pub mod distribution_planner;
pub mod exporters;
pub mod prompt_builder;
pub mod response_parser;
pub mod text_normalizer;

pub use distribution_planner::DistributionPlanner;
pub use exporters::{export_all, ExportFormat, JsonExporter, MoodleXmlExporter, TextExporter};
pub use prompt_builder::PromptBuilder;
pub use response_parser::ResponseParser;
pub use text_normalizer::{SentenceFilter, TextNormalizer};
