//! TF-IDF cosine ranking used when exact matching finds nothing.

use crate::config::SearchConfig;
use crate::indexing::FeatureIndex;
use crate::record::PersonRecord;
use crate::search::query::SearchQuery;
use std::cmp::Ordering;

/// Rank records by similarity of their signature to the query's free-text
/// fields.
///
/// Returns `(position, score)` pairs with `score > threshold`, restricted to
/// the query's family group if one is named, sorted by descending score
/// with ties kept in snapshot order. A query without free-text fields
/// yields nothing.
pub fn similarity_matches(
    records: &[PersonRecord],
    index: &FeatureIndex,
    query: &SearchQuery,
    config: &SearchConfig,
) -> Vec<(usize, f64)> {
    let text = query.signature();
    if text.trim().is_empty() {
        return Vec::new();
    }

    let query_vector = index.vectorize_query(&text);
    if query_vector.is_zero() {
        tracing::debug!("Query text '{text}' shares no terms with the index");
        return Vec::new();
    }

    let family_id = query.family_id();
    let mut matches: Vec<(usize, f64)> = index
        .similarities(&query_vector)
        .into_iter()
        .enumerate()
        .filter(|(_, score)| *score > config.similarity_threshold)
        .filter(|(position, _)| {
            family_id.as_deref().is_none_or(|family| {
                records
                    .get(*position)
                    .is_some_and(|record| record.family_line_id == family)
            })
        })
        .collect();

    // Stable sort keeps snapshot order among equal scores
    matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    matches
}
