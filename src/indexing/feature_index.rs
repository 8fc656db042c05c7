//! Vector space over record signatures.
//!
//! Row `i` of the matrix always belongs to snapshot position `i`. The index
//! is immutable; a refresh builds a new one next to a new snapshot.

use crate::config::SearchConfig;
use crate::indexing::sparse::SparseVector;
use crate::indexing::tokenizer::Analyzer;
use crate::indexing::vectorizer::{TfidfVectorizer, VectorizerError};
use crate::record::PersonRecord;
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct FeatureIndex {
    vectorizer: TfidfVectorizer,
    signatures: Vec<String>,
    rows: Vec<SparseVector>,
    used_stop_words: bool,
}

impl FeatureIndex {
    /// Build the index for `records` in snapshot order.
    ///
    /// Never fails. An empty snapshot fits on the placeholder signature and
    /// keeps zero rows. A vocabulary emptied by stop-word removal is refit
    /// with stop words kept; if that is still empty every row is zero.
    pub fn build(records: &[PersonRecord], config: &SearchConfig) -> Self {
        let signatures: Vec<String> = records.iter().map(PersonRecord::signature).collect();

        let placeholder;
        let fit_documents: &[String] = if signatures.is_empty() {
            placeholder = [config.placeholder_signature.to_lowercase()];
            &placeholder
        } else {
            &signatures
        };

        let analyzer = Analyzer::from_config(config);
        let (vectorizer, used_stop_words) = match TfidfVectorizer::fit(analyzer, fit_documents) {
            Ok(vectorizer) => (vectorizer, analyzer.uses_stop_words()),
            Err(VectorizerError::EmptyVocabulary { stop_words: true }) => {
                tracing::warn!(
                    "Signature vocabulary is empty after stop-word removal, refitting with stop words kept"
                );
                let fallback = analyzer.without_stop_words();
                match TfidfVectorizer::fit(fallback, fit_documents) {
                    Ok(vectorizer) => (vectorizer, false),
                    Err(e) => {
                        tracing::debug!("{e}; similarity fallback disabled for this snapshot");
                        (TfidfVectorizer::empty(fallback), false)
                    }
                }
            }
            Err(e) => {
                tracing::debug!("{e}; similarity fallback disabled for this snapshot");
                (TfidfVectorizer::empty(analyzer), false)
            }
        };

        let rows: Vec<SparseVector> = signatures
            .par_iter()
            .map(|signature| vectorizer.transform(signature))
            .collect();

        tracing::debug!(
            "Built feature index: {} rows, {} terms, stop words {}",
            rows.len(),
            vectorizer.vocabulary_len(),
            if used_stop_words { "removed" } else { "kept" }
        );

        Self {
            vectorizer,
            signatures,
            rows,
            used_stop_words,
        }
    }

    /// Number of rows, equal to the snapshot length
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vectorizer.vocabulary_len()
    }

    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }

    pub fn used_stop_words(&self) -> bool {
        self.used_stop_words
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn row(&self, position: usize) -> Option<&SparseVector> {
        self.rows.get(position)
    }

    /// Vectorize query text with the fitted model
    pub fn vectorize_query(&self, text: &str) -> SparseVector {
        self.vectorizer.transform(&text.to_lowercase())
    }

    /// Cosine similarity of `query` against every row, in row order
    pub fn similarities(&self, query: &SparseVector) -> Vec<f64> {
        if query.is_zero() {
            return vec![0.0; self.rows.len()];
        }
        self.rows.par_iter().map(|row| row.cosine(query)).collect()
    }
}
