//! Person records as the search engine sees them.
//!
//! Records are read-only snapshots of rows owned by the record store.
//! Serialization uses the external camelCase names; snake_case column names
//! are accepted on input so database exports load unchanged.

pub mod fields;

pub use fields::{FIELD_SPECS, FieldSpec, MatchKind, ResolvedField, resolve_field};

use crate::types::Scalar;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// One person in a family tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    #[serde(alias = "person_id")]
    pub person_id: String,

    #[serde(rename = "familyId", alias = "familyLineId", alias = "family_line_id")]
    pub family_line_id: String,

    #[serde(default, alias = "first_name", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, alias = "last_name", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,

    #[serde(default, alias = "father_id", skip_serializing_if = "Option::is_none")]
    pub father_id: Option<String>,

    #[serde(default, alias = "mother_id", skip_serializing_if = "Option::is_none")]
    pub mother_id: Option<String>,

    #[serde(default, alias = "spouse_id", skip_serializing_if = "Option::is_none")]
    pub spouse_id: Option<String>,

    /// Generation ordinal; some exports store it as text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<Scalar>,

    #[serde(default, alias = "birth_year", skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<Scalar>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dod: Option<String>,

    #[serde(default, alias = "blood_group", skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,

    #[serde(default, alias = "eye_color", skip_serializing_if = "Option::is_none")]
    pub eye_color: Option<String>,

    #[serde(default, alias = "hair_color", skip_serializing_if = "Option::is_none")]
    pub hair_color: Option<String>,

    #[serde(default, alias = "skin_tone", skip_serializing_if = "Option::is_none")]
    pub skin_tone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthmark: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease: Option<String>,

    #[serde(default, alias = "cause_of_death", skip_serializing_if = "Option::is_none")]
    pub cause_of_death: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passion: Option<String>,

    #[serde(default, rename = "trait", skip_serializing_if = "Option::is_none")]
    pub personal_trait: Option<String>,

    #[serde(
        default,
        rename = "nature",
        alias = "natureOfPerson",
        alias = "nature_of_person",
        skip_serializing_if = "Option::is_none"
    )]
    pub nature_of_person: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,

    #[serde(default, alias = "native_location", skip_serializing_if = "Option::is_none")]
    pub native_location: Option<String>,

    #[serde(default, alias = "migration_path", skip_serializing_if = "Option::is_none")]
    pub migration_path: Option<String>,

    #[serde(default, alias = "family_traditions", skip_serializing_if = "Option::is_none")]
    pub family_traditions: Option<String>,

    #[serde(default, alias = "recipes_cuisine", skip_serializing_if = "Option::is_none")]
    pub recipes_cuisine: Option<String>,

    #[serde(
        default,
        alias = "socioeconomic_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub socioeconomic_status: Option<String>,

    #[serde(default, alias = "education_level", skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
}

/// A record attribute read by name
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue<'a> {
    Text(Cow<'a, str>),
    Scalar(&'a Scalar),
}

impl AttributeValue<'_> {
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            AttributeValue::Text(text) => Cow::Borrowed(text.as_ref()),
            AttributeValue::Scalar(scalar) => scalar.to_text(),
        }
    }

    pub fn to_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Text(text) => text.trim().parse::<i64>().ok(),
            AttributeValue::Scalar(scalar) => scalar.to_integer(),
        }
    }
}

fn text(value: &Option<String>) -> Option<AttributeValue<'_>> {
    value
        .as_deref()
        .map(|s| AttributeValue::Text(Cow::Borrowed(s)))
}

impl PersonRecord {
    /// Create a record with only its identifiers set
    pub fn new(person_id: impl Into<String>, family_line_id: impl Into<String>) -> Self {
        Self {
            person_id: person_id.into(),
            family_line_id: family_line_id.into(),
            ..Self::default()
        }
    }

    /// First and last name joined by a space, if either is known
    pub fn full_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
            (None, None) => None,
        }
    }

    /// Read an attribute by its internal name.
    ///
    /// Returns `None` both for attributes this record lacks and for names
    /// that are not attributes at all; callers treat the two the same.
    pub fn attribute(&self, name: &str) -> Option<AttributeValue<'_>> {
        match name {
            "person_id" => Some(AttributeValue::Text(Cow::Borrowed(&self.person_id))),
            "family_line_id" => Some(AttributeValue::Text(Cow::Borrowed(&self.family_line_id))),
            "full_name" => self.full_name().map(|n| AttributeValue::Text(Cow::Owned(n))),
            "first_name" => text(&self.first_name),
            "last_name" => text(&self.last_name),
            "gender" => text(&self.gender),
            "ethnicity" => text(&self.ethnicity),
            "father_id" => text(&self.father_id),
            "mother_id" => text(&self.mother_id),
            "spouse_id" => text(&self.spouse_id),
            "generation" => self.generation.as_ref().map(AttributeValue::Scalar),
            "birth_year" => self.birth_year.as_ref().map(AttributeValue::Scalar),
            "dob" => text(&self.dob),
            "dod" => text(&self.dod),
            "blood_group" => text(&self.blood_group),
            "eye_color" => text(&self.eye_color),
            "hair_color" => text(&self.hair_color),
            "skin_tone" => text(&self.skin_tone),
            "birthmark" => text(&self.birthmark),
            "disease" => text(&self.disease),
            "cause_of_death" => text(&self.cause_of_death),
            "passion" => text(&self.passion),
            "trait" => text(&self.personal_trait),
            "nature_of_person" => text(&self.nature_of_person),
            "about" => text(&self.about),
            "native_location" => text(&self.native_location),
            "migration_path" => text(&self.migration_path),
            "family_traditions" => text(&self.family_traditions),
            "recipes_cuisine" => text(&self.recipes_cuisine),
            "socioeconomic_status" => text(&self.socioeconomic_status),
            "education_level" => text(&self.education_level),
            _ => None,
        }
    }

    /// Lowercased concatenation of the free-text attributes.
    ///
    /// Missing attributes contribute an empty segment, so the segment count
    /// is the same for every record.
    pub fn signature(&self) -> String {
        fields::RECORD_SIGNATURE_ATTRIBUTES
            .iter()
            .map(|name| {
                self.attribute(name)
                    .map(|value| value.to_text().into_owned())
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "personId": "P1",
            "familyId": "F1",
            "firstName": "Rama",
            "generation": "3",
            "trait": "steady",
            "nature": "Kind"
        }"#;
        let record: PersonRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.person_id, "P1");
        assert_eq!(record.family_line_id, "F1");
        assert_eq!(record.first_name.as_deref(), Some("Rama"));
        assert_eq!(record.generation, Some(Scalar::Text("3".to_string())));
        assert_eq!(record.personal_trait.as_deref(), Some("steady"));
        assert_eq!(record.nature_of_person.as_deref(), Some("Kind"));
    }

    #[test]
    fn test_deserialize_snake_case_columns() {
        let json = r#"{
            "person_id": "P7",
            "family_line_id": "FL2",
            "first_name": "Meera",
            "nature_of_person": "Curious",
            "blood_group": "AB-",
            "generation": 4
        }"#;
        let record: PersonRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.family_line_id, "FL2");
        assert_eq!(record.blood_group.as_deref(), Some("AB-"));
        assert_eq!(record.generation, Some(Scalar::Int(4)));
        assert_eq!(record.nature_of_person.as_deref(), Some("Curious"));
    }

    #[test]
    fn test_serialize_skips_absent_values() {
        let record = PersonRecord {
            first_name: Some("Rama".to_string()),
            ..PersonRecord::new("P1", "F1")
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["personId"], "P1");
        assert_eq!(value["familyId"], "F1");
        assert_eq!(value["firstName"], "Rama");
        assert!(value.get("lastName").is_none());
    }

    #[test]
    fn test_attribute_lookup() {
        let record = PersonRecord {
            first_name: Some("Rama".to_string()),
            last_name: Some("Iyer".to_string()),
            generation: Some(Scalar::Text("3".to_string())),
            ..PersonRecord::new("P1", "F1")
        };
        assert_eq!(
            record.attribute("full_name").unwrap().to_text(),
            "Rama Iyer"
        );
        assert_eq!(record.attribute("generation").unwrap().to_integer(), Some(3));
        assert!(record.attribute("eye_color").is_none());
        assert!(record.attribute("no_such_attribute").is_none());
    }

    #[test]
    fn test_full_name_variants() {
        let mut record = PersonRecord::new("P1", "F1");
        assert_eq!(record.full_name(), None);
        record.last_name = Some("Iyer".to_string());
        assert_eq!(record.full_name().as_deref(), Some("Iyer"));
        record.first_name = Some("Rama".to_string());
        assert_eq!(record.full_name().as_deref(), Some("Rama Iyer"));
    }

    #[test]
    fn test_signature_keeps_empty_segments() {
        let record = PersonRecord {
            first_name: Some("Rama".to_string()),
            nature_of_person: Some("Kind HEART".to_string()),
            ..PersonRecord::new("P1", "F1")
        };
        let signature = record.signature();
        assert!(signature.starts_with("rama "));
        assert!(signature.contains("kind heart"));
        assert_eq!(
            signature.split(' ').count(),
            fields::RECORD_SIGNATURE_ATTRIBUTES.len() + 1
        );
    }
}
