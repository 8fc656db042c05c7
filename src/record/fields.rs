//! Static translation table from query field names to record attributes.
//!
//! Callers address fields with the external camelCase convention
//! (`bloodGroup`, `familyId`). Each entry maps such a name to the internal
//! attribute read through [`PersonRecord::attribute`](super::PersonRecord::attribute)
//! and to the comparison rule used during exact matching. The table is
//! consulted once per query field.

/// How a query value is compared against a record value during exact matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Both sides read as integers; a parse failure on either side is a mismatch.
    Numeric,
    /// Case-insensitive string equality.
    ExactInsensitive,
    /// Case-insensitive containment of the query value in the record value.
    SubstringInsensitive,
}

/// One row of the translation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub external: &'static str,
    pub internal: &'static str,
    pub kind: MatchKind,
    /// Free-text field that contributes to similarity signatures
    pub signature: bool,
}

const fn spec(
    external: &'static str,
    internal: &'static str,
    kind: MatchKind,
    signature: bool,
) -> FieldSpec {
    FieldSpec {
        external,
        internal,
        kind,
        signature,
    }
}

use MatchKind::{ExactInsensitive, Numeric, SubstringInsensitive};

pub static FIELD_SPECS: &[FieldSpec] = &[
    // Identifiers
    spec("personId", "person_id", ExactInsensitive, false),
    spec("familyId", "family_line_id", ExactInsensitive, false),
    spec("familyLineId", "family_line_id", ExactInsensitive, false),
    spec("fatherId", "father_id", ExactInsensitive, false),
    spec("motherId", "mother_id", ExactInsensitive, false),
    spec("spouseId", "spouse_id", ExactInsensitive, false),
    // Names
    spec("firstName", "first_name", ExactInsensitive, true),
    spec("lastName", "last_name", ExactInsensitive, true),
    spec("name", "full_name", SubstringInsensitive, true),
    // Ordinals
    spec("generation", "generation", Numeric, false),
    spec("birthYear", "birth_year", Numeric, false),
    // Categorical
    spec("gender", "gender", ExactInsensitive, false),
    spec("ethnicity", "ethnicity", ExactInsensitive, true),
    spec("bloodGroup", "blood_group", ExactInsensitive, false),
    spec("eyeColor", "eye_color", ExactInsensitive, false),
    spec("hairColor", "hair_color", ExactInsensitive, false),
    spec("skinTone", "skin_tone", ExactInsensitive, false),
    // Free text
    spec("dob", "dob", SubstringInsensitive, false),
    spec("dod", "dod", SubstringInsensitive, false),
    spec("birthmark", "birthmark", SubstringInsensitive, false),
    spec("disease", "disease", SubstringInsensitive, false),
    spec("causeOfDeath", "cause_of_death", SubstringInsensitive, false),
    spec("passion", "passion", SubstringInsensitive, true),
    spec("trait", "trait", SubstringInsensitive, true),
    spec("nature", "nature_of_person", SubstringInsensitive, true),
    spec("natureOfPerson", "nature_of_person", SubstringInsensitive, true),
    spec("about", "about", SubstringInsensitive, true),
    spec("nativeLocation", "native_location", SubstringInsensitive, true),
    spec("migrationPath", "migration_path", SubstringInsensitive, false),
    spec("familyTraditions", "family_traditions", SubstringInsensitive, true),
    spec("recipesCuisine", "recipes_cuisine", SubstringInsensitive, true),
    spec("socioeconomicStatus", "socioeconomic_status", SubstringInsensitive, false),
    spec("educationLevel", "education_level", SubstringInsensitive, false),
];

/// Attributes concatenated, in this order, into a record's similarity signature.
pub const RECORD_SIGNATURE_ATTRIBUTES: &[&str] = &[
    "first_name",
    "last_name",
    "passion",
    "trait",
    "nature_of_person",
    "about",
    "ethnicity",
    "native_location",
    "family_traditions",
    "recipes_cuisine",
];

/// Internal name of the family grouping attribute
pub const FAMILY_ATTRIBUTE: &str = "family_line_id";

/// A query field name after translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedField<'a> {
    pub internal: &'a str,
    pub kind: MatchKind,
    pub signature: bool,
}

impl ResolvedField<'_> {
    pub fn is_family(&self) -> bool {
        self.internal == FAMILY_ATTRIBUTE
    }
}

/// Look up a table row by external name first, then by internal name.
pub fn lookup(name: &str) -> Option<&'static FieldSpec> {
    FIELD_SPECS
        .iter()
        .find(|spec| spec.external == name)
        .or_else(|| FIELD_SPECS.iter().find(|spec| spec.internal == name))
}

/// Translate a query field name.
///
/// Names missing from the table pass through unchanged and compare as
/// substrings; if the record has no such attribute the field never matches.
pub fn resolve_field(name: &str) -> ResolvedField<'_> {
    match lookup(name) {
        Some(spec) => ResolvedField {
            internal: spec.internal,
            kind: spec.kind,
            signature: spec.signature,
        },
        None => ResolvedField {
            internal: name,
            kind: MatchKind::SubstringInsensitive,
            signature: false,
        },
    }
}
