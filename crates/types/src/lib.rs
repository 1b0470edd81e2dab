//! Validated primitive types shared across the caregiver workspace.
//!
//! Each type here enforces its invariant at construction, so downstream code
//! can hold one without re-checking it. Serde representations match what the
//! records store and the presentation layer exchange: plain strings for text
//! and sex codes, a bare integer for the patient identifier.

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when parsing a biological sex code.
#[derive(Debug, thiserror::Error)]
pub enum SexError {
    /// The input was not one of the recognised single-letter codes
    #[error("sex code must be \"F\" or \"M\", got {0:?}")]
    Unrecognised(String),
}

/// A string type that guarantees non-empty content.
///
/// Wraps a `String` that contains at least one non-whitespace character.
/// Input is trimmed of leading and trailing whitespace during construction,
/// so presence is the only invariant callers get, and the one they need for
/// fields like patient names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed before checking. Returns `TextError::Empty` when
    /// the trimmed result contains no characters.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Biological sex as recorded on a patient record.
///
/// The records store holds this as a single-letter code (`"F"` or `"M"`),
/// and several clinical scoring rules branch on it. Parsing is
/// case-sensitive: the store only ever writes the uppercase codes, and an
/// unexpected value should surface rather than be guessed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Returns the single-letter code used in storage and on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Sex::Female => "F",
            Sex::Male => "M",
        }
    }
}

impl FromStr for Sex {
    type Err = SexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "F" => Ok(Sex::Female),
            "M" => Ok(Sex::Male),
            other => Err(SexError::Unrecognised(other.to_owned())),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl serde::Serialize for Sex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> serde::Deserialize<'de> for Sex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Identifier assigned to a patient record by the records store.
///
/// This is the store's primary key, and it is the sole equality criterion
/// between records: two records carrying the same identifier describe the
/// same patient regardless of their other fields. Once constructed the value
/// is immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PatientId(i64);

impl PatientId {
    /// Wraps a raw store key.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw store key.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
