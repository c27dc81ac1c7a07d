//! 桩生成服务
//!
//! 按提示词中的题型名词返回固定的题目数组，用于演示和离线运行

use async_trait::async_trait;
use std::collections::HashSet;
use tracing::debug;

use crate::error::{AppResult, LlmError};
use crate::infrastructure::generation::GenerationClient;
use crate::models::QuestionType;

const MCQ_RESPONSE: &str = r#"[
  {
    "text": "What is the main advantage of using transformers for question generation?",
    "options": [
      "They require less computational power",
      "They generate more contextually relevant questions",
      "They are easier to implement",
      "They don't require training data"
    ],
    "answer": "They generate more contextually relevant questions"
  },
  {
    "text": "Which technique is commonly used to generate distractors for MCQs?",
    "options": [
      "Word embeddings",
      "Decision trees",
      "Random selection",
      "Manual creation only"
    ],
    "answer": "Word embeddings"
  }
]"#;

const TRUE_FALSE_RESPONSE: &str = r#"[
  {
    "text": "Natural Language Processing is used to extract key facts from text for quiz generation.",
    "answer": "True"
  },
  {
    "text": "All quiz questions must be validated by human reviewers before use.",
    "answer": "False"
  }
]"#;

const SHORT_ANSWER_RESPONSE: &str = r#"[
  {
    "text": "What are two types of transformers mentioned that can be used for question generation?",
    "answer": "T5 and GPT"
  },
  {
    "text": "What is used to filter out poor quality questions in a quiz generation system?",
    "answer": "Human-in-the-loop feedback or LLM-based scoring"
  }
]"#;

/// 桩生成服务
#[derive(Debug, Default)]
pub struct StubGenerationClient {
    failing: HashSet<QuestionType>,
}

impl StubGenerationClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 让某个题型的调用失败，用于演示降级
    pub fn failing_for(mut self, question_type: QuestionType) -> Self {
        self.failing.insert(question_type);
        self
    }

    /// 只看首行 `Generate {n} {noun} ...`，原文摘录里出现的题型名词不参与判断
    fn detect_type(prompt: &str) -> Option<QuestionType> {
        let header = prompt.lines().next()?.strip_prefix("Generate ")?;
        let noun = header
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .trim_start();

        QuestionType::ALL
            .into_iter()
            .find(|t| noun.starts_with(t.descriptor().prompt_noun))
    }
}

#[async_trait]
impl GenerationClient for StubGenerationClient {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let Some(question_type) = Self::detect_type(prompt) else {
            debug!("模拟生成: 未识别的提示词，返回空数组");
            return Ok("[]".to_string());
        };

        if self.failing.contains(&question_type) {
            return Err(LlmError::Rejected(format!("模拟 {} 调用失败", question_type)).into());
        }

        debug!("模拟生成: {}", question_type);
        let response = match question_type {
            QuestionType::MultipleChoice => MCQ_RESPONSE,
            QuestionType::TrueFalse => TRUE_FALSE_RESPONSE,
            QuestionType::ShortAnswer => SHORT_ANSWER_RESPONSE,
        };
        Ok(response.to_string())
    }
}
