use crate::models::{Question, QuestionType};

/// 纯文本导出
///
/// 有损格式，只用于阅读和复制，不能反向解析
pub struct TextExporter;

impl TextExporter {
    pub const HEADER: &'static str = "GENERATED QUIZ\n\n";

    pub fn to_plain_text(questions: &[Question]) -> String {
        let mut text = String::from(Self::HEADER);

        for (index, question) in questions.iter().enumerate() {
            text.push_str(&format!("Question {}: {}\n", index + 1, question.text));

            match question.question_type {
                QuestionType::MultipleChoice => {
                    for (i, option) in question.options.iter().enumerate() {
                        let correct = *option == question.answer;
                        let marker = if correct { "* " } else { "  " };
                        text.push_str(&format!("{}{}. {}\n", marker, option_label(i), option));
                    }
                }
                QuestionType::TrueFalse => {
                    text.push_str(&format!("Answer: {}\n", question.answer));
                }
                QuestionType::ShortAnswer => {
                    text.push_str(&format!("Sample Answer: {}\n", question.answer));
                }
            }

            text.push_str(&format!("Difficulty: {}\n\n", question.difficulty));
        }

        text
    }
}

/// 选项字母：a..z，之后为 aa, ab, ...
fn option_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        label.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn questions() -> Vec<Question> {
        vec![
            Question {
                text: "Which NLP technique breaks text into segments?".to_string(),
                options: vec![
                    "Text summarization".to_string(),
                    "Text segmentation".to_string(),
                ],
                answer: "Text segmentation".to_string(),
                question_type: QuestionType::MultipleChoice,
                difficulty: Difficulty::Medium,
            },
            Question {
                text: "Text processing is essential.".to_string(),
                options: Vec::new(),
                answer: "True".to_string(),
                question_type: QuestionType::TrueFalse,
                difficulty: Difficulty::Easy,
            },
            Question {
                text: "Name two transformer models.".to_string(),
                options: Vec::new(),
                answer: "T5 and GPT".to_string(),
                question_type: QuestionType::ShortAnswer,
                difficulty: Difficulty::Hard,
            },
        ]
    }

    #[test]
    fn test_plain_text_layout() {
        let expected = concat!(
            "GENERATED QUIZ\n\n",
            "Question 1: Which NLP technique breaks text into segments?\n",
            "  a. Text summarization\n",
            "* b. Text segmentation\n",
            "Difficulty: medium\n\n",
            "Question 2: Text processing is essential.\n",
            "Answer: True\n",
            "Difficulty: easy\n\n",
            "Question 3: Name two transformer models.\n",
            "Sample Answer: T5 and GPT\n",
            "Difficulty: hard\n\n",
        );
        assert_eq!(TextExporter::to_plain_text(&questions()), expected);
    }

    #[test]
    fn test_empty_quiz_has_only_header() {
        assert_eq!(TextExporter::to_plain_text(&[]), TextExporter::HEADER);
    }

    #[test]
    fn test_option_labels() {
        assert_eq!(option_label(0), "a");
        assert_eq!(option_label(3), "d");
        assert_eq!(option_label(25), "z");
        assert_eq!(option_label(26), "aa");
    }
}
