//! 题型数量分配
//!
//! 每个启用的题型先分到 `total / k`，余数按规范顺序（选择 → 判断 → 简答）逐个补 1，
//! 与调用方传入题型的顺序无关

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ConfigError;
use crate::models::{Distribution, QuestionType};

pub struct DistributionPlanner;

impl DistributionPlanner {
    /// 计算分配
    ///
    /// 没有启用任何题型时返回空分配；调用方应事先保证至少启用一种题型
    pub fn plan<I>(enabled_types: I, total: usize) -> Distribution
    where
        I: IntoIterator<Item = QuestionType>,
    {
        // BTreeSet 去重并按规范顺序排列
        let types: BTreeSet<QuestionType> = enabled_types.into_iter().collect();
        let k = types.len();
        if k == 0 {
            return Distribution::default();
        }

        let base = total / k;
        let remainder = total % k;

        let counts: BTreeMap<QuestionType, usize> = types
            .into_iter()
            .enumerate()
            .map(|(index, question_type)| {
                let extra = usize::from(index < remainder);
                (question_type, base + extra)
            })
            .collect();

        Distribution::new(counts)
    }

    /// 带前置检查的分配：题目总数非零但没有题型时直接报错
    pub fn plan_checked<I>(enabled_types: I, total: usize) -> Result<Distribution, ConfigError>
    where
        I: IntoIterator<Item = QuestionType>,
    {
        let distribution = Self::plan(enabled_types, total);
        if distribution.is_empty() && total > 0 {
            return Err(ConfigError::NoQuestionTypes { total });
        }
        Ok(distribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use QuestionType::*;

    #[test]
    fn test_ten_over_three_types_gives_mcq_the_extra() {
        let plan = DistributionPlanner::plan([MultipleChoice, TrueFalse, ShortAnswer], 10);
        assert_eq!(plan.get(MultipleChoice), 4);
        assert_eq!(plan.get(TrueFalse), 3);
        assert_eq!(plan.get(ShortAnswer), 3);
    }

    #[test]
    fn test_tie_break_ignores_caller_order() {
        let plan = DistributionPlanner::plan([ShortAnswer, TrueFalse], 5);
        assert_eq!(plan.get(TrueFalse), 3);
        assert_eq!(plan.get(ShortAnswer), 2);
        assert_eq!(plan.get(MultipleChoice), 0);

        let order: Vec<_> = plan.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec![TrueFalse, ShortAnswer]);
    }

    #[test]
    fn test_sum_always_equals_total() {
        let subsets: Vec<Vec<QuestionType>> = vec![
            vec![MultipleChoice],
            vec![TrueFalse],
            vec![ShortAnswer],
            vec![MultipleChoice, TrueFalse],
            vec![MultipleChoice, ShortAnswer],
            vec![TrueFalse, ShortAnswer],
            vec![ShortAnswer, MultipleChoice, TrueFalse],
            vec![TrueFalse, TrueFalse, MultipleChoice],
        ];
        for subset in subsets {
            for total in 0..=50 {
                let plan = DistributionPlanner::plan(subset.clone(), total);
                assert_eq!(plan.total(), total, "题型: {:?}, 总数: {}", subset, total);
            }
        }
    }

    #[test]
    fn test_zero_total_gives_zero_counts() {
        let plan = DistributionPlanner::plan([MultipleChoice, TrueFalse], 0);
        assert_eq!(plan.get(MultipleChoice), 0);
        assert_eq!(plan.get(TrueFalse), 0);
    }

    #[test]
    fn test_no_types() {
        assert!(DistributionPlanner::plan(Vec::new(), 7).is_empty());
        assert!(matches!(
            DistributionPlanner::plan_checked(Vec::new(), 7),
            Err(ConfigError::NoQuestionTypes { total: 7 })
        ));
        assert!(DistributionPlanner::plan_checked(Vec::new(), 0).is_ok());
    }
}
