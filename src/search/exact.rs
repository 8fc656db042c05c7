//! Exact and partial field matching against raw records.

use crate::record::fields::{MatchKind, ResolvedField, resolve_field};
use crate::record::{AttributeValue, PersonRecord};
use crate::search::query::SearchQuery;
use crate::types::Scalar;

/// One query field, translated and normalised once per query
#[derive(Debug)]
struct FieldFilter<'q> {
    field: ResolvedField<'q>,
    integer: Option<i64>,
    lowered: String,
}

impl<'q> FieldFilter<'q> {
    fn new(name: &'q str, value: &'q Scalar) -> Self {
        Self {
            field: resolve_field(name),
            integer: value.to_integer(),
            lowered: value.to_text().to_lowercase(),
        }
    }

    fn matches(&self, record: &PersonRecord) -> bool {
        match record.attribute(self.field.internal) {
            Some(value) => self.matches_value(&value),
            None => false,
        }
    }

    fn matches_value(&self, value: &AttributeValue<'_>) -> bool {
        match self.field.kind {
            MatchKind::Numeric => match (self.integer, value.to_integer()) {
                (Some(wanted), Some(actual)) => wanted == actual,
                _ => false,
            },
            MatchKind::ExactInsensitive => value.to_text().to_lowercase() == self.lowered,
            MatchKind::SubstringInsensitive => {
                value.to_text().to_lowercase().contains(&self.lowered)
            }
        }
    }
}

/// Whether `record` satisfies every field of `query`
pub fn record_matches(record: &PersonRecord, query: &SearchQuery) -> bool {
    query
        .fields()
        .all(|(name, value)| FieldFilter::new(name, value).matches(record))
}

/// Positions of the records matching every query field, in snapshot order.
///
/// When the query names a family group only that group's records are
/// candidates. An empty query matches nothing here; the engine handles the
/// no-filter case before reaching this stage.
pub fn exact_matches(records: &[PersonRecord], query: &SearchQuery) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }

    let filters: Vec<FieldFilter<'_>> = query
        .fields()
        .map(|(name, value)| FieldFilter::new(name, value))
        .collect();
    let family_id = query.family_id();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            family_id
                .as_deref()
                .is_none_or(|family| record.family_line_id == family)
        })
        .filter(|(_, record)| filters.iter().all(|filter| filter.matches(record)))
        .map(|(position, _)| position)
        .collect()
}
