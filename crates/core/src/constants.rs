//! Constants used throughout the caregiver core crate.
//!
//! Well-known strings and weights live here so the scoring rules and their
//! callers agree on exact spellings. History and symptom matching is
//! case-sensitive, so collaborators populating a record should use these
//! labels rather than retyping them.

/// Text format for a stored date of birth (ISO calendar date).
pub const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

/// Points contributed by each satisfied predicate in a risk score.
pub const RISK_POINTS: u32 = 10;

/// History label for a past heart disease diagnosis.
pub const HISTORY_HEART_DISEASE: &str = "Heart Disease";

/// History label for past or current smoking.
pub const HISTORY_SMOKING: &str = "Smoking";

/// History label for a diabetes diagnosis.
pub const HISTORY_DIABETES: &str = "Diabetes";

/// History label for a previous stroke.
pub const HISTORY_STROKE: &str = "Stroke";

/// Symptom label for chest pain.
pub const SYMPTOM_CHEST_PAIN: &str = "Chest Pain";

/// Symptom label for shortness of breath.
pub const SYMPTOM_SHORTNESS_OF_BREATH: &str = "Shortness of Breath";

/// Symptom label for dizziness.
pub const SYMPTOM_DIZZINESS: &str = "Dizziness";

/// Symptom label for high blood pressure.
pub const SYMPTOM_HIGH_BLOOD_PRESSURE: &str = "High Blood Pressure";

/// Symptom label for numbness.
pub const SYMPTOM_NUMBNESS: &str = "Numbness";

/// Symptom label for fever.
pub const SYMPTOM_FEVER: &str = "Fever";

/// Symptom label for vomiting.
pub const SYMPTOM_VOMITING: &str = "Vomiting";

/// Symptom label for constant urination.
pub const SYMPTOM_CONSTANT_URINATION: &str = "Constant Urination";
