//! TF-IDF term weighting over analyzed documents.

use crate::indexing::sparse::SparseVector;
use crate::indexing::tokenizer::Analyzer;
use std::collections::{BTreeMap, HashMap};

/// Error type for vectorizer fitting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VectorizerError {
    #[error("Empty vocabulary: documents produced no terms (stop words: {stop_words})")]
    EmptyVocabulary { stop_words: bool },
}

/// Fitted TF-IDF model.
///
/// Term ids are positions in the lexicographically sorted vocabulary.
/// Weights are raw counts times the smoothed idf `ln((1 + n) / (1 + df)) + 1`,
/// and every transformed vector is L2 normalised.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    analyzer: Analyzer,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn fit<S: AsRef<str>>(analyzer: Analyzer, documents: &[S]) -> Result<Self, VectorizerError> {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for document in documents {
            let mut terms = analyzer.analyze(document.as_ref());
            terms.sort_unstable();
            terms.dedup();
            for term in terms {
                *document_frequency.entry(term).or_default() += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(VectorizerError::EmptyVocabulary {
                stop_words: analyzer.uses_stop_words(),
            });
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(Self {
            analyzer,
            vocabulary,
            idf,
        })
    }

    /// A model that knows no terms. Every document maps to the zero vector.
    pub fn empty(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    /// Vectorize one document. Terms outside the vocabulary are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        if self.vocabulary.is_empty() {
            return SparseVector::default();
        }

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.analyzer.analyze(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_default() += 1.0;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();
        SparseVector::from_entries(entries).normalized()
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|index| self.idf[index])
    }
}
