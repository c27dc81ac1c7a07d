//! 测验拼装
//!
//! 按规范顺序（选择 → 判断 → 简答）拼接各题型的结果。
//! 某题型数量不足时不从其他题型补齐

use crate::models::{Question, QuestionType};

/// 题目筛选/排序扩展点
///
/// 在每个题型块内部生效，不会改变题型块之间的顺序
pub trait QuestionRanker: Send + Sync {
    fn rank(&self, question_type: QuestionType, questions: Vec<Question>) -> Vec<Question>;
}

/// 默认实现：原样返回
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityRanker;

impl QuestionRanker for IdentityRanker {
    fn rank(&self, _question_type: QuestionType, questions: Vec<Question>) -> Vec<Question> {
        questions
    }
}

pub struct QuizAssembler {
    ranker: Box<dyn QuestionRanker>,
}

impl Default for QuizAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizAssembler {
    pub fn new() -> Self {
        Self::with_ranker(IdentityRanker)
    }

    pub fn with_ranker(ranker: impl QuestionRanker + 'static) -> Self {
        Self {
            ranker: Box::new(ranker),
        }
    }

    /// 拼装测验
    ///
    /// # 参数
    /// - `per_type`: 各题型的生成结果，顺序任意
    ///
    /// # 返回
    /// 按规范题型顺序拼接后的题目列表
    pub fn assemble(&self, mut per_type: Vec<(QuestionType, Vec<Question>)>) -> Vec<Question> {
        // 稳定排序：同一题型出现多次时保持传入顺序
        per_type.sort_by_key(|(question_type, _)| *question_type);

        per_type
            .into_iter()
            .flat_map(|(question_type, questions)| self.ranker.rank(question_type, questions))
            .collect()
    }
}
