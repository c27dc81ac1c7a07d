use crate::models::{Question, QuestionType};

/// Moodle XML 导出
///
/// 每道题一个 `<question type="...">`，文本内容全部做 XML 转义
pub struct MoodleXmlExporter;

impl MoodleXmlExporter {
    pub const DECLARATION: &'static str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

    pub fn to_moodle_xml(questions: &[Question]) -> String {
        let mut xml = format!("{}\n<quiz>\n", Self::DECLARATION);

        for question in questions {
            let text = escape_xml(&question.text);
            xml.push_str(&format!(
                "  <question type=\"{}\">\n",
                question.question_type.descriptor().moodle_tag
            ));
            xml.push_str(&format!("    <name><text>{}</text></name>\n", text));
            xml.push_str(&format!("    <questiontext><text>{}</text></questiontext>\n", text));

            match question.question_type {
                QuestionType::MultipleChoice => {
                    xml.push_str("    <shuffleanswers>true</shuffleanswers>\n");
                    xml.push_str("    <single>true</single>\n");
                    for option in &question.options {
                        let correct = *option == question.answer;
                        let fraction = if correct { "100" } else { "0" };
                        xml.push_str(&answer_block(fraction, option));
                    }
                }
                QuestionType::TrueFalse => {
                    let (true_fraction, false_fraction) = if question.is_true_statement() {
                        ("100", "0")
                    } else {
                        ("0", "100")
                    };
                    xml.push_str(&format!(
                        "    <answer fraction=\"{}\"><text>true</text></answer>\n",
                        true_fraction
                    ));
                    xml.push_str(&format!(
                        "    <answer fraction=\"{}\"><text>false</text></answer>\n",
                        false_fraction
                    ));
                }
                QuestionType::ShortAnswer => {
                    xml.push_str(&answer_block("100", &question.answer));
                }
            }

            xml.push_str("  </question>\n");
        }

        xml.push_str("</quiz>");
        xml
    }
}

/// 多行 `<answer>` 元素（选择题选项、简答题参考答案）
fn answer_block(fraction: &str, text: &str) -> String {
    format!(
        "    <answer fraction=\"{}\">\n      <text>{}</text>\n    </answer>\n",
        fraction,
        escape_xml(text)
    )
}

/// 转义 XML 特殊字符
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn true_false(answer: &str) -> Question {
        Question {
            text: "Rust has a garbage collector.".to_string(),
            options: Vec::new(),
            answer: answer.to_string(),
            question_type: QuestionType::TrueFalse,
            difficulty: Difficulty::Easy,
        }
    }

    #[test]
    fn test_true_false_fractions_are_complementary() {
        let xml = MoodleXmlExporter::to_moodle_xml(&[true_false("False")]);
        assert!(xml.contains("<question type=\"truefalse\">"));
        let answers = concat!(
            "    <answer fraction=\"0\"><text>true</text></answer>\n",
            "    <answer fraction=\"100\"><text>false</text></answer>\n",
        );
        assert!(xml.contains(answers));

        let xml = MoodleXmlExporter::to_moodle_xml(&[true_false("true")]);
        let answers = concat!(
            "    <answer fraction=\"100\"><text>true</text></answer>\n",
            "    <answer fraction=\"0\"><text>false</text></answer>\n",
        );
        assert!(xml.contains(answers));
    }

    #[test]
    fn test_mcq_document_layout() {
        let question = Question {
            text: "Pick <one> & only \"one\"".to_string(),
            options: vec!["A & B".to_string(), "C".to_string()],
            answer: "C".to_string(),
            question_type: QuestionType::MultipleChoice,
            difficulty: Difficulty::Medium,
        };
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<quiz>\n",
            "  <question type=\"multichoice\">\n",
            "    <name><text>Pick &lt;one&gt; &amp; only &quot;one&quot;</text></name>\n",
            "    <questiontext>",
            "<text>Pick &lt;one&gt; &amp; only &quot;one&quot;</text>",
            "</questiontext>\n",
            "    <shuffleanswers>true</shuffleanswers>\n",
            "    <single>true</single>\n",
            "    <answer fraction=\"0\">\n",
            "      <text>A &amp; B</text>\n",
            "    </answer>\n",
            "    <answer fraction=\"100\">\n",
            "      <text>C</text>\n",
            "    </answer>\n",
            "  </question>\n",
            "</quiz>",
        );
        assert_eq!(MoodleXmlExporter::to_moodle_xml(&[question]), expected);
    }

    #[test]
    fn test_short_answer_single_full_credit_answer() {
        let question = Question {
            text: "Name a model.".to_string(),
            options: Vec::new(),
            answer: "T5 <base>".to_string(),
            question_type: QuestionType::ShortAnswer,
            difficulty: Difficulty::Hard,
        };
        let xml = MoodleXmlExporter::to_moodle_xml(&[question]);
        assert!(xml.contains("<question type=\"shortanswer\">"));
        assert_eq!(xml.matches("<answer ").count(), 1);
        let answer = "<answer fraction=\"100\">\n      <text>T5 &lt;base&gt;</text>";
        assert!(xml.contains(answer));
    }

    #[test]
    fn test_empty_quiz() {
        assert_eq!(
            MoodleXmlExporter::to_moodle_xml(&[]),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<quiz>\n</quiz>"
        );
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b>&'\"c"), "a&lt;b&gt;&amp;&apos;&quot;c");
        assert_eq!(escape_xml("plain"), "plain");
    }
}
