//! 出题上下文
//!
//! 封装"我正在处理第几个文档"这一信息

use std::fmt::Display;

/// 出题上下文（仅用于日志）
#[derive(Debug, Clone)]
pub struct QuizCtx {
    /// 文档名称
    pub document_name: String,

    /// 文档索引（从1开始）
    pub document_index: usize,
}

impl QuizCtx {
    pub fn new(document_name: impl Into<String>, document_index: usize) -> Self {
        Self {
            document_name: document_name.into(),
            document_index,
        }
    }
}

impl Display for QuizCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文档 #{} {}]", self.document_index, self.document_name)
    }
}
