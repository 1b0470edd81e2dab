use caregiver_types::PatientId;

/// Errors surfaced by age-dependent computations on a patient record.
///
/// A record whose date of birth is missing or unparseable has no defined age,
/// and every risk score depends on age, so these errors propagate to the
/// caller instead of being defaulted. Treating an unknown age as zero would
/// silently change the scores built on top of it.
#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("patient {id} has no recorded date of birth")]
    MissingDateOfBirth { id: PatientId },
    #[error("invalid date of birth {value:?}: {source}")]
    InvalidDateOfBirth {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
