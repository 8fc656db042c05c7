use crate::record::fields::resolve_field;
use crate::types::Scalar;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Field/value filter supplied by a caller.
///
/// Fields keep the order they were given in. Null and blank values are
/// dropped on the way in, so a present field always carries a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    fields: Vec<(String, Scalar)>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`push`](Self::push)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.push(name, value);
        self
    }

    /// Append a field. Blank and whitespace-only text is ignored.
    ///
    /// `0` and `false` are kept as real filter values; emptiness is judged
    /// on text only, never on falsiness.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Scalar>) {
        let value = value.into();
        if !value.is_blank() {
            self.fields.push((name.into(), value));
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Value of the first field naming the family group
    pub fn family_id(&self) -> Option<String> {
        self.fields
            .iter()
            .find(|(name, _)| resolve_field(name).is_family())
            .map(|(_, value)| value.to_text().into_owned())
    }

    /// Space-joined values of the free-text fields, in query order.
    ///
    /// This is the text vectorized by the similarity fallback. It is empty
    /// when the query names no free-text field.
    pub fn signature(&self) -> String {
        self.fields
            .iter()
            .filter(|(name, _)| resolve_field(name).signature)
            .map(|(_, value)| value.to_text())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for SearchQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = SearchQuery::new();
        for (name, value) in iter {
            query.push(name, value);
        }
        query
    }
}

impl Serialize for SearchQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct SearchQueryVisitor;

impl<'de> Visitor<'de> for SearchQueryVisitor {
    type Value = SearchQuery;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping field names to scalar values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut query = SearchQuery::new();
        while let Some((name, value)) = access.next_entry::<String, Option<Scalar>>()? {
            if let Some(value) = value {
                query.push(name, value);
            }
        }
        Ok(query)
    }
}

impl<'de> Deserialize<'de> for SearchQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SearchQueryVisitor)
    }
}
