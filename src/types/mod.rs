use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A loosely typed scalar as it arrives from the record store or a query.
///
/// Deserializes untagged, so `3` and `"3"` are both accepted. Comparison
/// rules decide later whether the value is read as an integer or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Text that is empty after trimming counts as no value at all.
    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Display form used by text comparisons and signatures
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Text(text) => Cow::Borrowed(text.as_str()),
            Scalar::Int(value) => Cow::Owned(value.to_string()),
            Scalar::Float(value) => Cow::Owned(value.to_string()),
            Scalar::Bool(value) => Cow::Owned(value.to_string()),
        }
    }

    /// Integer interpretation used by numeric comparisons.
    ///
    /// Floats truncate toward zero, booleans map to 0/1 and text must parse
    /// as a base-10 integer once trimmed. Anything else is `None`.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Scalar::Int(value) => Some(*value),
            Scalar::Float(value) => {
                if value.is_finite() && value.abs() < i64::MAX as f64 {
                    Some(value.trunc() as i64)
                } else {
                    None
                }
            }
            Scalar::Bool(value) => Some(i64::from(*value)),
            Scalar::Text(text) => text.trim().parse::<i64>().ok(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}
