//! Feature indexing over record signatures
//!
//! The analyzer turns text into terms, the TF-IDF vectorizer weights them
//! and [`FeatureIndex`] holds one normalised vector per snapshot record.

pub mod feature_index;
pub mod sparse;
pub mod stop_words;
pub mod tokenizer;
pub mod vectorizer;

pub use feature_index::FeatureIndex;
pub use sparse::SparseVector;
pub use tokenizer::{Analyzer, tokenize};
pub use vectorizer::{TfidfVectorizer, VectorizerError};
