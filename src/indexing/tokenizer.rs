//! Text analysis for the feature index.
//!
//! Lowercases, extracts runs of two or more word characters, optionally
//! drops English stop words and then emits every n-gram in the configured
//! range. N-grams are built from the token stream after stop-word removal,
//! so "kind and gentle" yields the bigram "kind gentle".

use crate::config::SearchConfig;
use crate::indexing::stop_words::is_stop_word;
use regex::Regex;
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern literal"));

/// Tokenize and lowercase without stop-word handling
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Turns a document into the terms counted by the vectorizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analyzer {
    ngram_min: usize,
    ngram_max: usize,
    stop_words: bool,
}

impl Analyzer {
    pub fn new(ngram_min: usize, ngram_max: usize, stop_words: bool) -> Self {
        let ngram_min = ngram_min.max(1);
        Self {
            ngram_min,
            ngram_max: ngram_max.max(ngram_min),
            stop_words,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.ngram_min, config.ngram_max, config.stop_words)
    }

    /// Same n-gram range, stop words kept
    pub fn without_stop_words(self) -> Self {
        Self {
            stop_words: false,
            ..self
        }
    }

    pub fn uses_stop_words(&self) -> bool {
        self.stop_words
    }

    pub fn analyze(&self, text: &str) -> Vec<String> {
        let mut tokens = tokenize(text);
        if self.stop_words {
            tokens.retain(|token| !is_stop_word(token));
        }

        if self.ngram_min == 1 && self.ngram_max == 1 {
            return tokens;
        }

        let mut terms = Vec::new();
        for n in self.ngram_min..=self.ngram_max {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}
