//! # Caregiver Core
//!
//! Core business logic for the caregiver patient-records feature.
//!
//! This crate contains pure, synchronous data operations over an in-memory
//! patient record:
//! - The [`PatientRecord`] entity: demographics, location, and the ordered
//!   history and symptom lists
//! - Age computation from the stored date of birth
//! - Four rule-based disease risk scores and the combined [`RiskProfile`]
//! - Identifier-based record comparison, including over optional operands
//!
//! **No API or storage concerns**: authentication, request handling,
//! navigation, and persistence belong to the hosting application's outer
//! layers. Those collaborators load records, populate them through the
//! mutators here, and render the computed scores.

pub mod constants;
pub mod error;
pub mod record;
pub mod risk;

pub use caregiver_types::{NonEmptyText, PatientId, Sex, SexError, TextError};
pub use error::{PatientError, PatientResult};
pub use record::{distinct_patients, same_patient, Location, PatientRecord};
pub use risk::{assess_patients, RiskProfile};
