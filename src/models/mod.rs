pub mod descriptor;
pub mod loaders;
pub mod options;
pub mod question;

pub use descriptor::{RawQuestion, ShapeError, TypeDescriptor, ValidShape};
pub use loaders::{list_documents, load_quiz_options, load_quiz_options_or, InputDocument};
pub use options::{Distribution, QuizOptions, QuizRequest};
pub use question::{CustomDifficulty, Difficulty, Question, QuestionType};
