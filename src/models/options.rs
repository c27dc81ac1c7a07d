use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::error::ConfigError;
use crate::models::question::{Difficulty, QuestionType};

/// 出题选项
///
/// 字段与 TOML 选项文件一一对应，缺省字段使用默认值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizOptions {
    /// 启用选择题
    pub mcq: bool,
    /// 启用判断题
    pub true_false: bool,
    /// 启用简答题
    pub short_answer: bool,
    /// 难度
    pub difficulty: Difficulty,
    /// 题目总数
    pub num_questions: usize,
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            mcq: true,
            true_false: true,
            short_answer: true,
            difficulty: Difficulty::Medium,
            num_questions: 10,
        }
    }
}

impl QuizOptions {
    /// 已启用的题型（规范顺序）
    pub fn enabled_types(&self) -> BTreeSet<QuestionType> {
        QuestionType::ALL
            .into_iter()
            .filter(|t| match t {
                QuestionType::MultipleChoice => self.mcq,
                QuestionType::TrueFalse => self.true_false,
                QuestionType::ShortAnswer => self.short_answer,
            })
            .collect()
    }

    /// 至少启用一种题型（题目总数为 0 时不做要求）
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_questions > 0 && self.enabled_types().is_empty() {
            return Err(ConfigError::NoQuestionTypes {
                total: self.num_questions,
            });
        }
        Ok(())
    }
}

/// 单次出题请求
///
/// 每次生成时创建，拼装完成后丢弃。文本只读共享给各题型管线
#[derive(Debug, Clone)]
pub struct QuizRequest {
    pub text: Arc<str>,
    pub enabled_types: BTreeSet<QuestionType>,
    pub difficulty: Difficulty,
    pub total: usize,
}

impl QuizRequest {
    pub fn new(text: impl Into<Arc<str>>, options: &QuizOptions) -> Self {
        Self {
            text: text.into(),
            enabled_types: options.enabled_types(),
            difficulty: options.difficulty.clone(),
            total: options.num_questions,
        }
    }
}

/// 题型数量分配，各项之和等于请求总数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution(BTreeMap<QuestionType, usize>);

impl Distribution {
    pub fn new(counts: BTreeMap<QuestionType, usize>) -> Self {
        Self(counts)
    }

    /// 某题型的数量，未启用的题型为 0
    pub fn get(&self, question_type: QuestionType) -> usize {
        self.0.get(&question_type).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 按规范顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (QuestionType, usize)> + '_ {
        self.0.iter().map(|(t, count)| (*t, *count))
    }
}
