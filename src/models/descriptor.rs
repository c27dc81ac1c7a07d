//! 题型描述
//!
//! 三种题型共用一条生成管线，差异全部收敛到这里：
//! 提示词中的名词与输出格式、形状校验函数、Moodle 题型标签

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// 生成服务返回的单个题目（未校验）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// 判断题答案常以 JSON 布尔值返回，这里统一转成 "True" / "False"
    #[serde(default, deserialize_with = "deserialize_answer")]
    pub answer: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnswerValue {
    Text(String),
    Flag(bool),
}

fn deserialize_answer<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<AnswerValue>::deserialize(deserializer)?;
    Ok(value.map(|value| match value {
        AnswerValue::Text(text) => text,
        AnswerValue::Flag(true) => "True".to_string(),
        AnswerValue::Flag(false) => "False".to_string(),
    }))
}

/// 通过校验后的选项与答案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidShape {
    pub options: Vec<String>,
    pub answer: String,
}

/// 形状校验失败原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("题目结构无效: {0}")]
    Malformed(String),
    #[error("缺少题干")]
    MissingText,
    #[error("缺少答案")]
    MissingAnswer,
    #[error("选项数量不足: {0}")]
    TooFewOptions(usize),
    #[error("答案不在选项中: {0}")]
    AnswerNotInOptions(String),
    #[error("答案在选项中出现多次: {0}")]
    AmbiguousAnswer(String),
    #[error("判断题答案必须是 True 或 False: {0}")]
    InvalidBoolean(String),
}

/// 题型描述记录
pub struct TypeDescriptor {
    /// JSON 中的题型标识
    pub key: &'static str,
    /// 日志展示名
    pub label: &'static str,
    /// 提示词中的题型名词，模拟生成服务也按它区分题型
    pub prompt_noun: &'static str,
    /// 额外的出题要求
    pub guidance: Option<&'static str>,
    /// 输出格式示例
    pub schema_hint: &'static str,
    /// Moodle XML 题型
    pub moodle_tag: &'static str,
    /// 选项与答案的形状校验
    pub validate: fn(&RawQuestion) -> Result<ValidShape, ShapeError>,
}

pub static MULTIPLE_CHOICE: TypeDescriptor = TypeDescriptor {
    key: "mcq",
    label: "选择题",
    prompt_noun: "multiple-choice questions",
    guidance: Some("Each question should have 4 options with exactly one correct answer."),
    schema_hint: r#"[
  {
    "text": "Question text",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "answer": "Correct option text"
  }
]"#,
    moodle_tag: "multichoice",
    validate: validate_multiple_choice,
};

pub static TRUE_FALSE: TypeDescriptor = TypeDescriptor {
    key: "true_false",
    label: "判断题",
    prompt_noun: "true/false questions",
    guidance: None,
    schema_hint: r#"[
  {
    "text": "Statement that is either true or false",
    "answer": "True" or "False"
  }
]"#,
    moodle_tag: "truefalse",
    validate: validate_true_false,
};

pub static SHORT_ANSWER: TypeDescriptor = TypeDescriptor {
    key: "short_answer",
    label: "简答题",
    prompt_noun: "short answer questions",
    guidance: Some("Each question should be answerable with a brief phrase or sentence."),
    schema_hint: r#"[
  {
    "text": "Question text",
    "answer": "Sample answer"
  }
]"#,
    moodle_tag: "shortanswer",
    validate: validate_short_answer,
};

fn required_answer(raw: &RawQuestion) -> Result<String, ShapeError> {
    raw.answer
        .as_deref()
        .map(str::trim)
        .filter(|answer| !answer.is_empty())
        .map(str::to_string)
        .ok_or(ShapeError::MissingAnswer)
}

fn validate_multiple_choice(raw: &RawQuestion) -> Result<ValidShape, ShapeError> {
    let answer = required_answer(raw)?;
    let options: Vec<String> = raw
        .options
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|option| option.trim().to_string())
        .collect();

    if options.len() < 2 {
        return Err(ShapeError::TooFewOptions(options.len()));
    }

    match options.iter().filter(|option| **option == answer).count() {
        0 => Err(ShapeError::AnswerNotInOptions(answer)),
        1 => Ok(ValidShape { options, answer }),
        _ => Err(ShapeError::AmbiguousAnswer(answer)),
    }
}

/// 判断题答案大小写不敏感，统一为 "True" / "False"；多余的 options 被忽略
fn validate_true_false(raw: &RawQuestion) -> Result<ValidShape, ShapeError> {
    let answer = required_answer(raw)?;
    let canonical = if answer.eq_ignore_ascii_case("true") {
        "True"
    } else if answer.eq_ignore_ascii_case("false") {
        "False"
    } else {
        return Err(ShapeError::InvalidBoolean(answer));
    };

    Ok(ValidShape {
        options: Vec::new(),
        answer: canonical.to_string(),
    })
}

fn validate_short_answer(raw: &RawQuestion) -> Result<ValidShape, ShapeError> {
    Ok(ValidShape {
        options: Vec::new(),
        answer: required_answer(raw)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(options: Option<Vec<&str>>, answer: Option<&str>) -> RawQuestion {
        RawQuestion {
            text: Some("Question".to_string()),
            options: options.map(|o| o.into_iter().map(String::from).collect()),
            answer: answer.map(String::from),
        }
    }

    #[test]
    fn test_mcq_answer_must_be_member() {
        let ok = (MULTIPLE_CHOICE.validate)(&raw(Some(vec!["a", "b", "c"]), Some("b"))).unwrap();
        assert_eq!(ok.answer, "b");
        assert!(ok.options.contains(&ok.answer));

        assert_eq!(
            (MULTIPLE_CHOICE.validate)(&raw(Some(vec!["a", "b"]), Some("B"))),
            Err(ShapeError::AnswerNotInOptions("B".to_string()))
        );
    }

    #[test]
    fn test_mcq_rejects_single_option_and_duplicates() {
        assert_eq!(
            (MULTIPLE_CHOICE.validate)(&raw(Some(vec!["a"]), Some("a"))),
            Err(ShapeError::TooFewOptions(1))
        );
        assert_eq!(
            (MULTIPLE_CHOICE.validate)(&raw(None, Some("a"))),
            Err(ShapeError::TooFewOptions(0))
        );
        assert_eq!(
            (MULTIPLE_CHOICE.validate)(&raw(Some(vec!["a", "a", "b"]), Some("a"))),
            Err(ShapeError::AmbiguousAnswer("a".to_string()))
        );
    }

    #[test]
    fn test_true_false_canonicalizes_case() {
        let shape = (TRUE_FALSE.validate)(&raw(None, Some("tRuE"))).unwrap();
        assert_eq!(shape.answer, "True");
        let shape =
            (TRUE_FALSE.validate)(&raw(Some(vec!["True", "False"]), Some("false"))).unwrap();
        assert_eq!(shape.answer, "False");
        assert!(shape.options.is_empty());
        assert!((TRUE_FALSE.validate)(&raw(None, Some("yes"))).is_err());
    }

    #[test]
    fn test_boolean_answer_is_accepted() {
        let raw: RawQuestion =
            serde_json::from_str(r#"{"text": "Sky is blue.", "answer": true}"#).unwrap();
        assert_eq!(raw.answer.as_deref(), Some("True"));
        assert_eq!((TRUE_FALSE.validate)(&raw).unwrap().answer, "True");

        let raw: RawQuestion =
            serde_json::from_str(r#"{"text": "Fire is cold.", "answer": false}"#).unwrap();
        assert_eq!((TRUE_FALSE.validate)(&raw).unwrap().answer, "False");

        let raw: RawQuestion = serde_json::from_str(r#"{"text": "No answer."}"#).unwrap();
        assert!(raw.answer.is_none());
    }

    #[test]
    fn test_short_answer_requires_answer() {
        assert_eq!(
            (SHORT_ANSWER.validate)(&raw(None, Some("   "))),
            Err(ShapeError::MissingAnswer)
        );
        assert_eq!(
            (SHORT_ANSWER.validate)(&raw(None, Some(" T5 and GPT ")))
                .unwrap()
                .answer,
            "T5 and GPT"
        );
    }
}
