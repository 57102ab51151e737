//! Text statistics for extracted document text.
//!
//! Counts characters, words, sentences, paragraphs and lines, and ranks the
//! most frequent non-trivial words. Everything is recomputed from the raw
//! text on each call.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Number of top words reported when no limit is configured.
pub const DEFAULT_TOP_WORDS_LIMIT: usize = 5;

/// Tokens this short or shorter never count as words of interest.
const MIN_WORD_CHARS: usize = 3;

/// A word and how often it appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

/// Statistics for one document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub character_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub line_count: usize,
    pub top_words: Vec<WordFrequency>,
}

impl TextStatistics {
    /// Highest count among the top words, used for scaling bar charts.
    pub fn max_word_count(&self) -> usize {
        self.top_words.iter().map(|w| w.count).max().unwrap_or(0)
    }
}

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is",
        "it", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there",
        "these", "they", "this", "to", "was", "will", "with",
    ]
    .into_iter()
    .collect()
});

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph pattern should compile"));

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence pattern should compile"));

/// Whether `word` is excluded from word-frequency ranking.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Computes `TextStatistics` with a fixed top-words limit.
#[derive(Debug, Clone, Copy)]
pub struct TextStatisticsEngine {
    top_words_limit: usize,
}

impl TextStatisticsEngine {
    pub fn new() -> Self {
        Self {
            top_words_limit: DEFAULT_TOP_WORDS_LIMIT,
        }
    }

    pub fn with_top_words_limit(mut self, limit: usize) -> Self {
        self.top_words_limit = limit;
        self
    }

    pub fn top_words_limit(&self) -> usize {
        self.top_words_limit
    }

    pub fn compute(&self, text: &str) -> TextStatistics {
        TextStatistics {
            character_count: text.chars().count(),
            word_count: text.split_whitespace().count(),
            sentence_count: count_fragments(&SENTENCE_BREAK, text),
            paragraph_count: count_fragments(&PARAGRAPH_BREAK, text),
            line_count: text.split('\n').count(),
            top_words: top_words(text, self.top_words_limit),
        }
    }
}

impl Default for TextStatisticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function: statistics with an explicit top-words limit.
pub fn compute_statistics(text: &str, top_words_limit: usize) -> TextStatistics {
    TextStatisticsEngine::new()
        .with_top_words_limit(top_words_limit)
        .compute(text)
}

fn count_fragments(separator: &Regex, text: &str) -> usize {
    separator.split(text).filter(|s| !s.is_empty()).count()
}

/// Rank words by frequency. Ties keep first-occurrence order.
pub fn top_words(text: &str, limit: usize) -> Vec<WordFrequency> {
    if limit == 0 || text.trim().is_empty() {
        return Vec::new();
    }

    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let mut ranked: Vec<WordFrequency> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for word in cleaned.split_whitespace() {
        if word.chars().count() < MIN_WORD_CHARS || is_stop_word(word) {
            continue;
        }
        match index.get(word) {
            Some(&i) => ranked[i].count += 1,
            None => {
                index.insert(word, ranked.len());
                ranked.push(WordFrequency {
                    word: word.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps encounter order among equal counts.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}
