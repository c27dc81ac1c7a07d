//! 提示词构建
//!
//! 纯字符串拼接，不做任何 I/O。三种题型共用同一个模板，差异来自 `TypeDescriptor`

use crate::models::{Difficulty, QuestionType};

pub struct PromptBuilder;

impl PromptBuilder {
    /// 原文摘录的最大字符数，超出部分直接截断
    pub const MAX_EXCERPT_CHARS: usize = 3000;

    /// 构建某一题型的生成请求
    pub fn build(
        question_type: QuestionType,
        text: &str,
        difficulty: &Difficulty,
        count: usize,
    ) -> String {
        let descriptor = question_type.descriptor();

        let mut prompt = format!(
            "Generate {} {} based on the following text.\nDifficulty level: {}\n",
            count, descriptor.prompt_noun, difficulty
        );
        if let Some(guidance) = descriptor.guidance {
            prompt.push_str(guidance);
            prompt.push('\n');
        }
        prompt.push_str(
            "Format the response as a JSON array of objects with the following structure:\n",
        );
        prompt.push_str(descriptor.schema_hint);
        prompt.push_str(
            "\nReturn only the JSON array, wrapped in a ```json fenced code block.\n\n",
        );
        prompt.push_str("Text: ");
        prompt.push_str(&Self::excerpt(text));

        prompt
    }

    /// 按字符截断原文
    pub fn excerpt(text: &str) -> String {
        text.chars().take(Self::MAX_EXCERPT_CHARS).collect()
    }
}
