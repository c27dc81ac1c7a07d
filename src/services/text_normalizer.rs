//! 文本规范化服务 - 业务能力层
//!
//! 清洗网页提取出的原始文本、切分句子/段落、提取高频关键词。
//! 任何输入都不会报错，空输入得到空结果

use once_cell::sync::Lazy;
use phf::phf_set;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// 句末标点 + 空白；后面是否紧跟大写字母由调用处判断（regex 不支持前瞻）
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s+").unwrap());

/// 保留句末标点的完整句子
static TERMINATED_SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").unwrap());

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").unwrap());

static STOPWORDS: phf::Set<&'static str> = phf_set! {
    "a", "an", "the", "and", "or", "but", "if", "because", "as", "what",
    "which", "this", "that", "these", "those", "then", "just", "so", "than",
    "such", "when", "while", "with", "for", "of", "at", "by", "from", "up",
    "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did",
    "doing", "can", "could", "should", "would", "may", "might", "must",
};

/// 清洗后保留的标点
const KEPT_PUNCTUATION: &str = ".,!?:;()'\"";

/// 句子长度过滤条件，由调用方显式给出
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceFilter {
    /// 字符数大于给定值
    MoreThanChars(usize),
    /// 单词数大于给定值
    MoreThanWords(usize),
}

impl SentenceFilter {
    fn accepts(self, sentence: &str) -> bool {
        match self {
            SentenceFilter::MoreThanChars(min) => sentence.chars().count() > min,
            SentenceFilter::MoreThanWords(min) => sentence.split_whitespace().count() > min,
        }
    }
}

/// 文本规范化
pub struct TextNormalizer;

impl TextNormalizer {
    /// 默认关键词数量
    pub const DEFAULT_KEYWORD_COUNT: usize = 20;

    /// 送去出题的句子至少要多于这么多个单词
    pub const GENERATION_MIN_WORDS: usize = 5;

    /// 清洗文本
    ///
    /// 去掉单词字符、常用标点、空白以外的字符，再把连续空白压缩为单个空格并去掉首尾空白。
    /// 先删字符再压缩空白，保证 `clean(clean(x)) == clean(x)`
    pub fn clean(raw: &str) -> String {
        raw.chars()
            .filter(|&c| {
                c.is_ascii_alphanumeric()
                    || c == '_'
                    || c.is_whitespace()
                    || KEPT_PUNCTUATION.contains(c)
            })
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 切分句子
    ///
    /// 在"句末标点 + 空白 + 大写字母"处断开，分隔标点不保留。
    /// 这是启发式规则：缩写（"Dr. Smith"）和小数不会被正确处理
    pub fn split_sentences(text: &str, filter: SentenceFilter) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut pieces = Vec::new();
        let mut start = 0;
        for boundary in SENTENCE_BOUNDARY.find_iter(text) {
            let followed_by_upper = text[boundary.end()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_uppercase());
            if followed_by_upper {
                pieces.push(&text[start..boundary.start()]);
                start = boundary.end();
            }
        }
        pieces.push(&text[start..]);

        pieces
            .into_iter()
            .map(str::trim)
            .filter(|sentence| filter.accepts(sentence))
            .map(str::to_string)
            .collect()
    }

    /// 按空行切分段落，丢弃空段落
    pub fn split_paragraphs(text: &str) -> Vec<String> {
        PARAGRAPH_BREAK
            .split(text)
            .map(str::trim)
            .filter(|paragraph| !paragraph.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 提取关键词
    ///
    /// 小写化后按单词切分，去掉停用词和长度不超过 2 的词，按词频降序返回前 `top_n` 个；
    /// 词频相同时按首次出现的先后排序
    pub fn extract_keywords(text: &str, top_n: usize) -> Vec<String> {
        let lowered = text.to_lowercase();

        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut frequencies: Vec<(&str, usize)> = Vec::new();

        for word in WORD.find_iter(&lowered).map(|m| m.as_str()) {
            if word.len() <= 2 || STOPWORDS.contains(word) {
                continue;
            }
            match positions.get(word) {
                Some(&index) => frequencies[index].1 += 1,
                None => {
                    positions.insert(word, frequencies.len());
                    frequencies.push((word, 1));
                }
            }
        }

        // sort_by 是稳定排序，同频词保持首次出现顺序
        frequencies.sort_by(|a, b| b.1.cmp(&a.1));

        frequencies
            .into_iter()
            .take(top_n)
            .map(|(word, _)| word.to_string())
            .collect()
    }

    /// 生成前的规范化
    ///
    /// 清洗后只保留以句末标点结尾、且多于 5 个单词的句子，用单个空格拼接。
    /// 末尾没有句末标点的残句会被丢弃
    pub fn normalize_for_generation(raw: &str) -> String {
        let cleaned = Self::clean(raw);

        let normalized = TERMINATED_SENTENCE
            .find_iter(&cleaned)
            .map(|m| m.as_str().trim())
            .filter(|sentence| {
                SentenceFilter::MoreThanWords(Self::GENERATION_MIN_WORDS).accepts(sentence)
            })
            .collect::<Vec<_>>()
            .join(" ");

        debug!(
            "文本规范化: 原始 {} 字符 -> 清洗 {} 字符 -> 保留 {} 字符",
            raw.chars().count(),
            cleaned.chars().count(),
            normalized.chars().count()
        );

        normalized
    }
}
