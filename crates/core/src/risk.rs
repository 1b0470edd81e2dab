//! Rule-based disease risk scoring.
//!
//! Each score is a sum of independent 10-point contributions gated by
//! predicates over age, sex, history membership, and symptom membership. The
//! scores are screening heuristics for the presentation layer, not
//! calibrated probabilities: a score of 30 means three rules matched, nothing
//! more.
//!
//! Every predicate is evaluated on every call, membership matching is exact
//! and case-sensitive, and all scoring is pure: repeated invocation over an
//! unchanged record yields identical output.

use caregiver_types::{PatientId, Sex};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::{
    HISTORY_DIABETES, HISTORY_HEART_DISEASE, HISTORY_SMOKING, HISTORY_STROKE, RISK_POINTS,
    SYMPTOM_CHEST_PAIN, SYMPTOM_CONSTANT_URINATION, SYMPTOM_DIZZINESS, SYMPTOM_FEVER,
    SYMPTOM_HIGH_BLOOD_PRESSURE, SYMPTOM_NUMBNESS, SYMPTOM_SHORTNESS_OF_BREATH, SYMPTOM_VOMITING,
};
use crate::error::PatientResult;
use crate::record::PatientRecord;

impl PatientRecord {
    /// Scores the patient's coronary artery disease risk on `reference`.
    ///
    /// Contributions: age-and-sex gate (women 55 and over, men 45 and over),
    /// history of heart disease, smoking, or diabetes, and the symptoms
    /// chest pain, shortness of breath, dizziness, high blood pressure, and
    /// numbness. Range 0 to 90.
    ///
    /// # Errors
    ///
    /// Fails when the stored date of birth is missing or unparseable.
    pub fn coronary_artery_risk_on(&self, reference: NaiveDate) -> PatientResult<u32> {
        let age = self.age_on(reference)?;
        let mut score = 0;
        if (self.sex() == Sex::Female && age >= 55) || (self.sex() == Sex::Male && age >= 45) {
            score += RISK_POINTS;
        }
        if self.has_history(HISTORY_HEART_DISEASE) {
            score += RISK_POINTS;
        }
        if self.has_history(HISTORY_SMOKING) {
            score += RISK_POINTS;
        }
        if self.has_history(HISTORY_DIABETES) {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_CHEST_PAIN) {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_SHORTNESS_OF_BREATH) {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_DIZZINESS) {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_HIGH_BLOOD_PRESSURE) {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_NUMBNESS) {
            score += RISK_POINTS;
        }
        Ok(score)
    }

    /// Scores the patient's stroke risk on `reference`.
    ///
    /// Contributions: age-and-sex gate (women 55 and over, men strictly over
    /// 55; the boundary differs by sex), history of smoking or a previous
    /// stroke, and the symptoms dizziness, high blood pressure, and
    /// numbness. Range 0 to 60.
    ///
    /// # Errors
    ///
    /// Fails when the stored date of birth is missing or unparseable.
    pub fn stroke_risk_on(&self, reference: NaiveDate) -> PatientResult<u32> {
        let age = self.age_on(reference)?;
        let mut score = 0;
        if (self.sex() == Sex::Female && age >= 55) || (self.sex() == Sex::Male && age > 55) {
            score += RISK_POINTS;
        }
        if self.has_history(HISTORY_SMOKING) {
            score += RISK_POINTS;
        }
        if self.has_history(HISTORY_STROKE) {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_DIZZINESS) {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_HIGH_BLOOD_PRESSURE) {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_NUMBNESS) {
            score += RISK_POINTS;
        }
        Ok(score)
    }

    /// Scores the patient's flu risk on `reference`.
    ///
    /// Contributions: age gate (2 and under, or 65 and over) and the
    /// symptoms shortness of breath, dizziness, fever, and vomiting. Range
    /// 0 to 50.
    ///
    /// # Errors
    ///
    /// Fails when the stored date of birth is missing or unparseable.
    pub fn flu_risk_on(&self, reference: NaiveDate) -> PatientResult<u32> {
        let age = self.age_on(reference)?;
        let mut score = 0;
        if age <= 2 || age >= 65 {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_SHORTNESS_OF_BREATH) {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_DIZZINESS) {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_FEVER) {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_VOMITING) {
            score += RISK_POINTS;
        }
        Ok(score)
    }

    /// Scores the patient's kidney disease risk on `reference`.
    ///
    /// Contributions: age gate (60 and over) and the symptoms shortness of
    /// breath, vomiting, and constant urination. Range 0 to 40.
    ///
    /// # Errors
    ///
    /// Fails when the stored date of birth is missing or unparseable.
    pub fn kidney_disease_risk_on(&self, reference: NaiveDate) -> PatientResult<u32> {
        let age = self.age_on(reference)?;
        let mut score = 0;
        if age >= 60 {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_SHORTNESS_OF_BREATH) {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_VOMITING) {
            score += RISK_POINTS;
        }
        if self.has_symptom(SYMPTOM_CONSTANT_URINATION) {
            score += RISK_POINTS;
        }
        Ok(score)
    }

    /// Scores coronary artery disease risk as of today.
    ///
    /// # Errors
    ///
    /// See [`PatientRecord::coronary_artery_risk_on`].
    pub fn coronary_artery_risk(&self) -> PatientResult<u32> {
        self.coronary_artery_risk_on(Local::now().date_naive())
    }

    /// Scores stroke risk as of today.
    ///
    /// # Errors
    ///
    /// See [`PatientRecord::stroke_risk_on`].
    pub fn stroke_risk(&self) -> PatientResult<u32> {
        self.stroke_risk_on(Local::now().date_naive())
    }

    /// Scores flu risk as of today.
    ///
    /// # Errors
    ///
    /// See [`PatientRecord::flu_risk_on`].
    pub fn flu_risk(&self) -> PatientResult<u32> {
        self.flu_risk_on(Local::now().date_naive())
    }

    /// Scores kidney disease risk as of today.
    ///
    /// # Errors
    ///
    /// See [`PatientRecord::kidney_disease_risk_on`].
    pub fn kidney_disease_risk(&self) -> PatientResult<u32> {
        self.kidney_disease_risk_on(Local::now().date_naive())
    }

    /// Computes all four risk scores and the age in one carrier for the
    /// presentation layer.
    ///
    /// # Errors
    ///
    /// Fails when the stored date of birth is missing or unparseable.
    pub fn risk_profile_on(&self, reference: NaiveDate) -> PatientResult<RiskProfile> {
        Ok(RiskProfile {
            assessed_on: reference,
            age: self.age_on(reference)?,
            coronary_artery: self.coronary_artery_risk_on(reference)?,
            stroke: self.stroke_risk_on(reference)?,
            flu: self.flu_risk_on(reference)?,
            kidney_disease: self.kidney_disease_risk_on(reference)?,
        })
    }

    /// Computes the full risk profile as of today.
    ///
    /// # Errors
    ///
    /// See [`PatientRecord::risk_profile_on`].
    pub fn risk_profile(&self) -> PatientResult<RiskProfile> {
        self.risk_profile_on(Local::now().date_naive())
    }
}

/// All four risk scores for one patient, computed against one reference
/// date.
///
/// A carrier type for callers rendering or transmitting a patient's scores
/// together. Scores are in steps of 10; see the scoring methods on
/// [`PatientRecord`] for each range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// The reference date the scores were computed against.
    pub assessed_on: NaiveDate,

    /// The patient's age on the reference date.
    pub age: i32,

    /// Coronary artery disease score, 0 to 90.
    pub coronary_artery: u32,

    /// Stroke score, 0 to 60.
    pub stroke: u32,

    /// Flu score, 0 to 50.
    pub flu: u32,

    /// Kidney disease score, 0 to 40.
    pub kidney_disease: u32,
}

/// Profiles every record in `records` against `reference`.
///
/// A record whose date of birth is missing or unparseable cannot be scored;
/// it is logged as a warning and skipped rather than failing the whole
/// batch. Results keep the input order.
pub fn assess_patients(
    records: &[PatientRecord],
    reference: NaiveDate,
) -> Vec<(PatientId, RiskProfile)> {
    let mut profiles = Vec::with_capacity(records.len());
    for record in records {
        match record.risk_profile_on(reference) {
            Ok(profile) => profiles.push((record.id(), profile)),
            Err(err) => {
                tracing::warn!("skipping risk assessment for patient {}: {}", record.id(), err);
            }
        }
    }
    profiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PatientError;
    use caregiver_types::NonEmptyText;

    const REFERENCE: &str = "2020-06-15";

    fn reference() -> NaiveDate {
        NaiveDate::parse_from_str(REFERENCE, "%Y-%m-%d").unwrap()
    }

    /// A patient who turns `age` exactly on the reference date.
    fn patient(id: i64, sex: Sex, age: i32) -> PatientRecord {
        PatientRecord::new(
            PatientId::new(id),
            NonEmptyText::new("Alex").unwrap(),
            NonEmptyText::new("Morgan").unwrap(),
            sex,
            format!("{}-06-15", 2020 - age),
        )
    }

    #[test]
    fn coronary_scores_smoking_and_chest_pain_for_a_thirty_year_old_man() {
        let mut p = patient(1, Sex::Male, 30);
        p.add_history(HISTORY_SMOKING);
        p.add_symptom(SYMPTOM_CHEST_PAIN);

        // The age gate needs 45 for men, so only the two entries count.
        assert_eq!(p.coronary_artery_risk_on(reference()).unwrap(), 20);
    }

    #[test]
    fn coronary_age_gate_differs_by_sex() {
        assert_eq!(patient(1, Sex::Male, 45).coronary_artery_risk_on(reference()).unwrap(), 10);
        assert_eq!(patient(2, Sex::Male, 44).coronary_artery_risk_on(reference()).unwrap(), 0);
        assert_eq!(patient(3, Sex::Female, 55).coronary_artery_risk_on(reference()).unwrap(), 10);
        assert_eq!(patient(4, Sex::Female, 54).coronary_artery_risk_on(reference()).unwrap(), 0);
    }

    #[test]
    fn coronary_reaches_its_upper_bound_when_every_rule_matches() {
        let mut p = patient(1, Sex::Female, 60);
        for entry in [HISTORY_HEART_DISEASE, HISTORY_SMOKING, HISTORY_DIABETES] {
            p.add_history(entry);
        }
        for entry in [
            SYMPTOM_CHEST_PAIN,
            SYMPTOM_SHORTNESS_OF_BREATH,
            SYMPTOM_DIZZINESS,
            SYMPTOM_HIGH_BLOOD_PRESSURE,
            SYMPTOM_NUMBNESS,
        ] {
            p.add_symptom(entry);
        }

        assert_eq!(p.coronary_artery_risk_on(reference()).unwrap(), 90);
    }

    #[test]
    fn stroke_age_boundary_is_inclusive_for_women_and_exclusive_for_men() {
        assert_eq!(patient(1, Sex::Female, 55).stroke_risk_on(reference()).unwrap(), 10);
        assert_eq!(patient(2, Sex::Male, 55).stroke_risk_on(reference()).unwrap(), 0);
        assert_eq!(patient(3, Sex::Male, 56).stroke_risk_on(reference()).unwrap(), 10);
    }

    #[test]
    fn stroke_counts_history_and_symptoms() {
        let mut p = patient(1, Sex::Male, 40);
        p.add_history(HISTORY_SMOKING);
        p.add_history(HISTORY_STROKE);
        p.add_symptom(SYMPTOM_DIZZINESS);
        p.add_symptom(SYMPTOM_HIGH_BLOOD_PRESSURE);
        p.add_symptom(SYMPTOM_NUMBNESS);

        assert_eq!(p.stroke_risk_on(reference()).unwrap(), 50);
    }

    #[test]
    fn flu_scores_age_fever_and_vomiting_for_a_seventy_year_old_woman() {
        let mut p = patient(1, Sex::Female, 70);
        p.add_symptom(SYMPTOM_FEVER);
        p.add_symptom(SYMPTOM_VOMITING);

        assert_eq!(p.flu_risk_on(reference()).unwrap(), 30);
    }

    #[test]
    fn flu_age_gate_covers_infants_and_the_elderly() {
        assert_eq!(patient(1, Sex::Male, 1).flu_risk_on(reference()).unwrap(), 10);
        assert_eq!(patient(2, Sex::Male, 2).flu_risk_on(reference()).unwrap(), 10);
        assert_eq!(patient(3, Sex::Male, 3).flu_risk_on(reference()).unwrap(), 0);
        assert_eq!(patient(4, Sex::Male, 64).flu_risk_on(reference()).unwrap(), 0);
        assert_eq!(patient(5, Sex::Male, 65).flu_risk_on(reference()).unwrap(), 10);
    }

    #[test]
    fn kidney_scores_age_alone_at_sixty() {
        let p = patient(1, Sex::Female, 60);
        assert_eq!(p.kidney_disease_risk_on(reference()).unwrap(), 10);
    }

    #[test]
    fn kidney_reaches_its_upper_bound_when_every_rule_matches() {
        let mut p = patient(1, Sex::Male, 60);
        p.add_symptom(SYMPTOM_SHORTNESS_OF_BREATH);
        p.add_symptom(SYMPTOM_VOMITING);
        p.add_symptom(SYMPTOM_CONSTANT_URINATION);

        assert_eq!(p.kidney_disease_risk_on(reference()).unwrap(), 40);
    }

    #[test]
    fn scores_never_decrease_as_qualifying_entries_are_added() {
        let mut p = patient(1, Sex::Male, 30);
        let mut previous = p.coronary_artery_risk_on(reference()).unwrap();
        for entry in [
            SYMPTOM_CHEST_PAIN,
            SYMPTOM_SHORTNESS_OF_BREATH,
            SYMPTOM_DIZZINESS,
        ] {
            p.add_symptom(entry);
            let next = p.coronary_artery_risk_on(reference()).unwrap();
            assert!(next >= previous);
            previous = next;
        }
        assert_eq!(previous, 30);
    }

    #[test]
    fn unrecognised_entries_do_not_score() {
        let mut p = patient(1, Sex::Male, 30);
        p.add_history("Hay Fever");
        p.add_symptom("Hiccups");

        assert_eq!(p.coronary_artery_risk_on(reference()).unwrap(), 0);
        assert_eq!(p.stroke_risk_on(reference()).unwrap(), 0);
        assert_eq!(p.flu_risk_on(reference()).unwrap(), 0);
        assert_eq!(p.kidney_disease_risk_on(reference()).unwrap(), 0);
    }

    #[test]
    fn duplicate_entries_do_not_double_count() {
        let mut p = patient(1, Sex::Male, 30);
        p.add_history(HISTORY_SMOKING);
        p.add_history(HISTORY_SMOKING);
        p.add_symptom(SYMPTOM_DIZZINESS);
        p.add_symptom(SYMPTOM_DIZZINESS);

        // Membership drives scoring, not count.
        assert_eq!(p.stroke_risk_on(reference()).unwrap(), 20);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let mut p = patient(1, Sex::Male, 30);
        p.add_history("smoking");
        p.add_symptom("chest pain");

        assert_eq!(p.coronary_artery_risk_on(reference()).unwrap(), 0);
    }

    #[test]
    fn every_score_propagates_an_invalid_date_of_birth() {
        let p = PatientRecord::new(
            PatientId::new(1),
            NonEmptyText::new("Alex").unwrap(),
            NonEmptyText::new("Morgan").unwrap(),
            Sex::Male,
            "yesterday",
        );

        assert!(matches!(
            p.coronary_artery_risk_on(reference()),
            Err(PatientError::InvalidDateOfBirth { .. })
        ));
        assert!(matches!(
            p.stroke_risk_on(reference()),
            Err(PatientError::InvalidDateOfBirth { .. })
        ));
        assert!(matches!(
            p.flu_risk_on(reference()),
            Err(PatientError::InvalidDateOfBirth { .. })
        ));
        assert!(matches!(
            p.kidney_disease_risk_on(reference()),
            Err(PatientError::InvalidDateOfBirth { .. })
        ));
        assert!(matches!(
            p.risk_profile_on(reference()),
            Err(PatientError::InvalidDateOfBirth { .. })
        ));
    }

    #[test]
    fn risk_profile_matches_the_individual_scores() {
        let mut p = patient(1, Sex::Female, 70);
        p.add_history(HISTORY_SMOKING);
        p.add_symptom(SYMPTOM_DIZZINESS);
        p.add_symptom(SYMPTOM_VOMITING);

        let profile = p.risk_profile_on(reference()).unwrap();
        assert_eq!(profile.assessed_on, reference());
        assert_eq!(profile.age, 70);
        assert_eq!(profile.coronary_artery, p.coronary_artery_risk_on(reference()).unwrap());
        assert_eq!(profile.stroke, p.stroke_risk_on(reference()).unwrap());
        assert_eq!(profile.flu, p.flu_risk_on(reference()).unwrap());
        assert_eq!(profile.kidney_disease, p.kidney_disease_risk_on(reference()).unwrap());
    }

    #[test]
    fn risk_profile_serialises_to_the_expected_shape() {
        let p = patient(1, Sex::Female, 60);
        let profile = p.risk_profile_on(reference()).unwrap();

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "assessed_on": "2020-06-15",
                "age": 60,
                "coronary_artery": 10,
                "stroke": 10,
                "flu": 0,
                "kidney_disease": 10,
            })
        );
    }

    #[test]
    fn assess_patients_skips_records_it_cannot_score() {
        let scorable = patient(1, Sex::Female, 70);
        let unscorable = PatientRecord::new(
            PatientId::new(2),
            NonEmptyText::new("Sam").unwrap(),
            NonEmptyText::new("Reed").unwrap(),
            Sex::Male,
            "02/29/1960",
        );
        let also_scorable = patient(3, Sex::Male, 40);

        let profiles = assess_patients(
            &[scorable, unscorable, also_scorable],
            reference(),
        );

        let ids: Vec<_> = profiles.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, [PatientId::new(1), PatientId::new(3)]);
        assert_eq!(profiles[0].1.age, 70);
        assert_eq!(profiles[1].1.age, 40);
    }
}
