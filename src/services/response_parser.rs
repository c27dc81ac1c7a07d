//! 响应解析服务 - 业务能力层
//!
//! 从生成服务的原始文本中取出题目数组，逐条校验并打上题型和难度。
//! 单条题目不合格只丢弃该条；整段响应不可用时返回空列表，从不报错
//!
//! ## 提取规则（按顺序尝试，第一个能解码成 JSON 数组的候选胜出）
//! 1. ```` ```json ... ``` ```` 代码块
//! 2. 第一个后面紧跟 `{` 的 `[`，向后做括号配平（识别字符串和转义）
//! 3. 兼容旧格式：第一个 `[` 到最后一个 `]` 的贪婪匹配。
//!    字符串字段里出现方括号时这一步很容易出错，只作为兜底

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::models::{Difficulty, Question, QuestionType, RawQuestion, ShapeError};
use crate::utils::truncate_text;

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[A-Za-z]*[ \t]*\r?\n?(.*?)```").unwrap());

static GREEDY_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*\]").unwrap());

pub struct ResponseParser;

impl ResponseParser {
    /// 解析某一题型的响应
    pub fn parse(
        raw: &str,
        question_type: QuestionType,
        difficulty: &Difficulty,
    ) -> Vec<Question> {
        let elements = match Self::extract_array(raw) {
            Ok(elements) => elements,
            Err(e) => {
                warn!(
                    "[{}] 响应无法解析: {} (响应: {})",
                    question_type,
                    e,
                    truncate_text(raw, 80)
                );
                return Vec::new();
            }
        };

        let total = elements.len();
        let questions: Vec<Question> = elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| {
                let result = Self::to_question(element, question_type, difficulty);
                if let Err(reason) = &result {
                    warn!(
                        "[{}] 丢弃第 {} 条题目: {}",
                        question_type,
                        index + 1,
                        reason
                    );
                }
                result.ok()
            })
            .collect();

        debug!(
            "[{}] 解析完成: 有效 {}/{}",
            question_type,
            questions.len(),
            total
        );

        questions
    }

    /// 从原始响应中提取 JSON 数组
    pub fn extract_array(raw: &str) -> Result<Vec<JsonValue>, ParseError> {
        let mut candidates: Vec<&str> = FENCED_BLOCK
            .captures_iter(raw)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().trim())
            .filter(|body| body.starts_with('['))
            .collect();

        if let Some(span) = Self::balanced_array_span(raw) {
            candidates.push(span);
        }
        if let Some(m) = GREEDY_ARRAY.find(raw) {
            candidates.push(m.as_str());
        }

        let mut last_error = None;
        for candidate in candidates {
            match serde_json::from_str::<Vec<JsonValue>>(candidate) {
                Ok(elements) => return Ok(elements),
                Err(e) => last_error = Some(e),
            }
        }

        match last_error {
            Some(e) => Err(ParseError::DecodeFailed(e)),
            None => Err(ParseError::NoArrayFound),
        }
    }

    /// 找到第一个"对象数组"的配平区间
    fn balanced_array_span(raw: &str) -> Option<&str> {
        let bytes = raw.as_bytes();
        let start = (0..bytes.len()).find(|&i| {
            bytes[i] == b'['
                && bytes[i + 1..]
                    .iter()
                    .find(|b| !b.is_ascii_whitespace())
                    .is_some_and(|&b| b == b'{')
        })?;

        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;

        for (offset, &b) in bytes[start..].iter().enumerate() {
            if in_string {
                match b {
                    _ if escaped => escaped = false,
                    b'\\' => escaped = true,
                    b'"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match b {
                b'"' => in_string = true,
                b'[' | b'{' => depth += 1,
                b']' | b'}' => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(&raw[start..=start + offset]);
                    }
                }
                _ => {}
            }
        }

        None
    }

    /// 把单个元素转换为规范题目
    fn to_question(
        element: JsonValue,
        question_type: QuestionType,
        difficulty: &Difficulty,
    ) -> Result<Question, ShapeError> {
        if !element.is_object() {
            return Err(ShapeError::Malformed(truncate_text(&element.to_string(), 40)));
        }
        let raw: RawQuestion =
            serde_json::from_value(element).map_err(|e| ShapeError::Malformed(e.to_string()))?;

        let text = raw
            .text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(ShapeError::MissingText)?
            .to_string();

        let shape = (question_type.descriptor().validate)(&raw)?;

        Ok(Question {
            text,
            options: shape.options,
            answer: shape.answer,
            question_type,
            difficulty: difficulty.clone(),
        })
    }
}
