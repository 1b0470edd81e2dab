//! The patient record entity.
//!
//! A [`PatientRecord`] is a flat, in-memory holder for one patient's
//! demographics, location, and clinical lists. It is loaded and stored by an
//! external persistence collaborator and rendered by an external presentation
//! layer; this module owns only the data and the pure computations over it.
//!
//! Identity is the store's integer key. Two records with the same identifier
//! describe the same logical patient, whatever their other fields say, and
//! equality between records compares identifiers alone.

use caregiver_types::{NonEmptyText, PatientId, Sex};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::DATE_OF_BIRTH_FORMAT;
use crate::error::{PatientError, PatientResult};

/// A patient's contact and location details.
///
/// Free-form text with no invariants beyond what the caller provides. Set on
/// the record in one step via [`PatientRecord::set_location`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Street address.
    pub address: String,

    /// City or town.
    pub city: String,

    /// Province or region.
    pub province: String,

    /// Postal code.
    pub postal_code: String,

    /// Contact phone number.
    pub phone: String,
}

/// A single patient's record: demographics, location, history, and symptoms.
///
/// History and symptoms are ordered lists of free-form labels, appended by
/// the collaborator populating the record. Duplicates are permitted; the
/// scoring rules test membership, not count.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PatientRecord {
    id: PatientId,
    first_name: NonEmptyText,
    last_name: NonEmptyText,
    sex: Sex,
    #[serde(default)]
    date_of_birth: Option<String>,
    #[serde(default)]
    location: Option<Location>,
    #[serde(default)]
    history: Vec<String>,
    #[serde(default)]
    symptoms: Vec<String>,
}

impl PatientRecord {
    /// Creates a record with core demographics and empty clinical lists.
    ///
    /// The date of birth is stored as text in `YYYY-MM-DD` form and parsed
    /// on demand; an unparseable value is only reported once an
    /// age-dependent computation is invoked. Records hydrated from the
    /// store arrive through deserialisation instead and may lack a date of
    /// birth entirely.
    pub fn new(
        id: PatientId,
        first_name: NonEmptyText,
        last_name: NonEmptyText,
        sex: Sex,
        date_of_birth: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            sex,
            date_of_birth: Some(date_of_birth.into()),
            location: None,
            history: Vec::new(),
            symptoms: Vec::new(),
        }
    }

    /// The store identifier for this record.
    pub fn id(&self) -> PatientId {
        self.id
    }

    pub fn first_name(&self) -> &NonEmptyText {
        &self.first_name
    }

    pub fn last_name(&self) -> &NonEmptyText {
        &self.last_name
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    /// The stored date-of-birth text, if any.
    pub fn date_of_birth(&self) -> Option<&str> {
        self.date_of_birth.as_deref()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Recorded past conditions, in the order they were added.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Currently reported symptoms, in the order they were added.
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    /// Sets all contact and location fields in one step.
    pub fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    /// Appends one entry to the patient's history.
    pub fn add_history(&mut self, entry: impl Into<String>) {
        self.history.push(entry.into());
    }

    /// Appends one entry to the patient's reported symptoms.
    pub fn add_symptom(&mut self, entry: impl Into<String>) {
        self.symptoms.push(entry.into());
    }

    /// Whether the history contains `label`. Matching is exact and
    /// case-sensitive; use the labels in [`crate::constants`].
    pub fn has_history(&self, label: &str) -> bool {
        self.history.iter().any(|entry| entry == label)
    }

    /// Whether the reported symptoms contain `label`. Matching is exact and
    /// case-sensitive; use the labels in [`crate::constants`].
    pub fn has_symptom(&self, label: &str) -> bool {
        self.symptoms.iter().any(|entry| entry == label)
    }

    /// Parses the stored date of birth into a calendar date.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::MissingDateOfBirth` when no date of birth is
    /// recorded, or `PatientError::InvalidDateOfBirth` when the stored text
    /// is not a valid `YYYY-MM-DD` date.
    pub fn birth_date(&self) -> PatientResult<NaiveDate> {
        let value = self
            .date_of_birth
            .as_deref()
            .ok_or(PatientError::MissingDateOfBirth { id: self.id })?;
        NaiveDate::parse_from_str(value, DATE_OF_BIRTH_FORMAT).map_err(|source| {
            PatientError::InvalidDateOfBirth {
                value: value.to_owned(),
                source,
            }
        })
    }

    /// Computes the patient's age in whole years on `reference`.
    ///
    /// Whole years elapsed: the year difference, less one when the
    /// reference day-of-year precedes the birth day-of-year (the birthday
    /// has not yet occurred in the reference year).
    ///
    /// # Errors
    ///
    /// Fails when the stored date of birth is missing or unparseable; see
    /// [`PatientRecord::birth_date`].
    pub fn age_on(&self, reference: NaiveDate) -> PatientResult<i32> {
        let birth = self.birth_date()?;
        let mut age = reference.year() - birth.year();
        if reference.ordinal() < birth.ordinal() {
            age -= 1;
        }
        Ok(age)
    }

    /// Computes the patient's age in whole years as of today.
    ///
    /// # Errors
    ///
    /// See [`PatientRecord::age_on`].
    pub fn age(&self) -> PatientResult<i32> {
        self.age_on(Local::now().date_naive())
    }
}

impl PartialEq for PatientRecord {
    /// Identifier equality is the sole equality criterion between records.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PatientRecord {}

/// Whether two optional records describe the same patient.
///
/// Returns false when either operand is absent; otherwise compares
/// identifiers. Absence never makes two records "the same", so lookups and
/// selection checks in presentation code can pass through missing operands
/// without a separate null check.
pub fn same_patient(a: Option<&PatientRecord>, b: Option<&PatientRecord>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.id == b.id,
        _ => false,
    }
}

/// Whether two optional records describe different patients.
///
/// Returns false when either operand is absent; otherwise compares
/// identifiers. Note that this is not the negation of [`same_patient`] when
/// an operand is absent: with a missing record there is no patient to
/// compare, so both checks report false.
pub fn distinct_patients(a: Option<&PatientRecord>, b: Option<&PatientRecord>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.id != b.id,
        _ => false,
    }
}
