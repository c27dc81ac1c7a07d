use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::descriptor::{self, TypeDescriptor};

/// 题型
///
/// 声明顺序即规范顺序（选择 → 判断 → 简答），分配余数和拼装结果都依赖这个顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    /// 单选题
    #[serde(rename = "mcq")]
    MultipleChoice,
    /// 判断题
    #[serde(rename = "true_false")]
    TrueFalse,
    /// 简答题
    #[serde(rename = "short_answer")]
    ShortAnswer,
}

impl QuestionType {
    /// 规范顺序
    pub const ALL: [QuestionType; 3] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::ShortAnswer,
    ];

    /// 获取题型描述（提示词片段、校验规则、Moodle 标签）
    pub fn descriptor(self) -> &'static TypeDescriptor {
        match self {
            QuestionType::MultipleChoice => &descriptor::MULTIPLE_CHOICE,
            QuestionType::TrueFalse => &descriptor::TRUE_FALSE,
            QuestionType::ShortAnswer => &descriptor::SHORT_ANSWER,
        }
    }

    /// 序列化使用的标识
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().label)
    }
}

/// 难度
///
/// 只来自生成选项，从不推断。非 easy/medium/hard 的取值原样透传
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Custom(CustomDifficulty),
}

/// 自定义难度标签
///
/// 只能经 `Difficulty::from` 构造，因此不会是 easy / medium / hard 之一，JSON 往返不变
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomDifficulty(String);

impl CustomDifficulty {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Custom(label) => label.as_str(),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        match value.as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Custom(CustomDifficulty(value)),
        }
    }
}

impl From<&str> for Difficulty {
    fn from(value: &str) -> Self {
        Difficulty::from(value.to_string())
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        match value {
            Difficulty::Custom(label) => label.0,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 规范题目
///
/// 只能由 `ResponseParser` 经过形状校验后构造，导出器和展示层都只消费这个结构。
/// - 选择题：`options` 至少 2 项，`answer` 恰好是其中之一
/// - 判断题：`answer` 为 "True" 或 "False"，无选项
/// - 简答题：`answer` 为参考答案，无选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub answer: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
}

impl Question {
    /// 选择题中正确选项的下标
    pub fn correct_option_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.answer)
    }

    /// 判断题答案是否为真（大小写不敏感）
    pub fn is_true_statement(&self) -> bool {
        self.answer.eq_ignore_ascii_case("true")
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview = if self.text.chars().count() > 80 {
            self.text.chars().take(80).collect::<String>() + "..."
        } else {
            self.text.clone()
        };
        write!(
            f,
            "[{}|{}] {}",
            self.question_type, self.difficulty, preview
        )
    }
}
