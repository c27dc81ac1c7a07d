use crate::error::{ExportError, ParseError};
use crate::models::Question;

/// JSON 导出
///
/// 两空格缩进的题目数组，可无损还原
pub struct JsonExporter;

impl JsonExporter {
    pub fn to_json(questions: &[Question]) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(questions)?)
    }

    pub fn from_json(json: &str) -> Result<Vec<Question>, ParseError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, QuestionType};

    #[test]
    fn test_pretty_layout_uses_two_spaces() {
        let question = Question {
            text: "Water is wet.".to_string(),
            options: Vec::new(),
            answer: "True".to_string(),
            question_type: QuestionType::TrueFalse,
            difficulty: Difficulty::Easy,
        };
        let json = JsonExporter::to_json(&[question]).unwrap();
        let expected = concat!(
            "[\n",
            "  {\n",
            "    \"text\": \"Water is wet.\",\n",
            "    \"answer\": \"True\",\n",
            "    \"type\": \"true_false\",\n",
            "    \"difficulty\": \"easy\"\n",
            "  }\n",
            "]",
        );
        assert_eq!(json, expected);
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let questions = vec![
            Question {
                text: "Pick <one> & \"quote\"".to_string(),
                options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
                answer: "B".to_string(),
                question_type: QuestionType::MultipleChoice,
                difficulty: Difficulty::from("expert"),
            },
            Question {
                text: "Name a model.".to_string(),
                options: Vec::new(),
                answer: "T5".to_string(),
                question_type: QuestionType::ShortAnswer,
                difficulty: Difficulty::Hard,
            },
        ];
        let json = JsonExporter::to_json(&questions).unwrap();
        assert_eq!(JsonExporter::from_json(&json).unwrap(), questions);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(JsonExporter::from_json("{not json").is_err());
        assert_eq!(JsonExporter::to_json(&[]).unwrap(), "[]");
    }
}
