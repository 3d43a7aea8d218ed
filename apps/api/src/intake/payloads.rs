//! Request payloads for candidate and job intake, and their conversion into
//! validated `Candidate` / `JobDescription` values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::matching::consent::{assert_consent, ConsentError};
use crate::models::candidate::{Candidate, ConsentRecord, WorkEntry};
use crate::models::job::{JobDescription, SalaryRange};

#[derive(Debug, Error, PartialEq)]
pub enum IntakeError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Consent(#[from] ConsentError),
}

// ────────────────────────────────────────────────────────────────────────────
// Payloads
// ────────────────────────────────────────────────────────────────────────────

/// Relocation preference as submitted: a yes/no flag or a free-text note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelocationPreference {
    Flag(bool),
    Note(String),
}

impl RelocationPreference {
    /// `true` becomes "yes"; `false` and empty notes mean no preference.
    pub fn into_note(self) -> Option<String> {
        match self {
            RelocationPreference::Flag(true) => Some("yes".to_string()),
            RelocationPreference::Flag(false) => None,
            RelocationPreference::Note(note) if note.is_empty() => None,
            RelocationPreference::Note(note) => Some(note),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsentPayload {
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub policy_version: String,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidatePayload {
    pub candidate_id: Option<String>,
    pub full_name: String,
    pub nationality: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub highest_degree: Option<String>,
    pub field_of_study: Option<String>,
    pub graduation_year: Option<i32>,
    pub field_of_work: Option<String>,
    pub willing_to_relocate: Option<RelocationPreference>,
    pub social_link: Option<String>,
    pub min_salary: Option<i64>,
    pub experience_years: Option<f64>,
    pub skills: Vec<String>,
    pub work_history: Vec<WorkEntry>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub additional: Option<String>,
    pub consent: Option<ConsentPayload>,
    pub upload_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalaryPayload {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPayload {
    pub jd_id: String,
    pub title: String,
    pub location: String,
    pub required_education: Option<String>,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub min_experience_years: Option<f64>,
    pub salary_range: SalaryPayload,
    pub employment_type: Option<String>,
    pub relocation_support: bool,
    pub industry: Option<String>,
    pub raw_jd: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Conversion
// ────────────────────────────────────────────────────────────────────────────

/// Builds a candidate from submitted form data and asserts consent.
///
/// A missing `candidate_id` gets a fresh UUID. Missing consent and upload
/// timestamps default to `now`.
pub fn intake_candidate(payload: CandidatePayload, now: DateTime<Utc>) -> Result<Candidate, IntakeError> {
    if let Some(years) = payload.experience_years {
        if !years.is_finite() || years < 0.0 {
            return Err(IntakeError::Validation(
                "experience_years must be a non-negative number".to_string(),
            ));
        }
    }
    if payload.min_salary.is_some_and(|s| s < 0) {
        return Err(IntakeError::Validation(
            "min_salary cannot be negative".to_string(),
        ));
    }

    let candidate_id = match payload.candidate_id {
        Some(id) if id.trim().is_empty() => {
            return Err(IntakeError::Validation(
                "candidate_id cannot be blank".to_string(),
            ))
        }
        Some(id) => id,
        None => Uuid::new_v4().to_string(),
    };

    let consent = payload.consent.map(|c| ConsentRecord {
        accepted: c.accepted,
        policy_version: c.policy_version,
        timestamp: c.timestamp.unwrap_or(now),
    });

    let candidate = Candidate {
        candidate_id,
        full_name: payload.full_name,
        nationality: payload.nationality,
        city: payload.city,
        country: payload.country,
        highest_degree: payload.highest_degree,
        field_of_study: payload.field_of_study,
        graduation_year: payload.graduation_year,
        field_of_work: payload.field_of_work,
        willing_to_relocate: payload
            .willing_to_relocate
            .and_then(RelocationPreference::into_note),
        social_link: payload.social_link,
        min_salary: payload.min_salary,
        experience_years: payload.experience_years,
        skills: payload.skills,
        work_history: payload.work_history,
        certifications: payload.certifications,
        languages: payload.languages,
        additional: payload.additional,
        consent,
        upload_date: Some(payload.upload_date.unwrap_or(now)),
    };

    assert_consent(&candidate)?;
    Ok(candidate)
}

/// Accepts an already-structured job description. No text extraction happens here.
pub fn parse_job_description(payload: JobPayload) -> Result<JobDescription, IntakeError> {
    if payload.jd_id.trim().is_empty() {
        return Err(IntakeError::Validation("jd_id cannot be empty".to_string()));
    }
    if let Some(years) = payload.min_experience_years {
        if !years.is_finite() || years < 0.0 {
            return Err(IntakeError::Validation(
                "min_experience_years must be a non-negative number".to_string(),
            ));
        }
    }

    let salary_range = SalaryRange::new(payload.salary_range.min, payload.salary_range.max)
        .map_err(|e| IntakeError::Validation(e.to_string()))?;

    Ok(JobDescription {
        jd_id: payload.jd_id,
        title: payload.title,
        location: payload.location,
        required_education: payload.required_education,
        required_skills: payload.required_skills,
        preferred_skills: payload.preferred_skills,
        min_experience_years: payload.min_experience_years,
        salary_range,
        employment_type: payload.employment_type,
        relocation_support: payload.relocation_support,
        industry: payload.industry,
        raw_jd: payload.raw_jd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate_payload(value: serde_json::Value) -> CandidatePayload {
        serde_json::from_value(value).unwrap()
    }

    fn consented() -> serde_json::Value {
        json!({ "accepted": true, "policy_version": "2024-08" })
    }

    #[test]
    fn test_intake_assigns_id_and_timestamps() {
        let now = Utc::now();
        let payload = candidate_payload(json!({
            "full_name": "Sam Sample",
            "city": "Madrid",
            "skills": ["Python", "Spark"],
            "consent": consented(),
        }));

        let candidate = intake_candidate(payload, now).unwrap();
        assert!(Uuid::parse_str(&candidate.candidate_id).is_ok());
        assert_eq!(candidate.upload_date, Some(now));
        assert_eq!(candidate.consent.as_ref().map(|c| c.timestamp), Some(now));
        assert_eq!(candidate.skills.len(), 2);
    }

    #[test]
    fn test_intake_keeps_supplied_id() {
        let payload = candidate_payload(json!({
            "candidate_id": "cand-9",
            "consent": consented(),
        }));
        let candidate = intake_candidate(payload, Utc::now()).unwrap();
        assert_eq!(candidate.candidate_id, "cand-9");
    }

    #[test]
    fn test_intake_rejects_missing_consent() {
        let payload = candidate_payload(json!({ "full_name": "No Consent" }));
        let err = intake_candidate(payload, Utc::now()).unwrap_err();
        assert_eq!(err, IntakeError::Consent(ConsentError::Missing));
    }

    #[test]
    fn test_intake_rejects_declined_consent() {
        let payload = candidate_payload(json!({
            "consent": { "accepted": false, "policy_version": "2024-08" },
        }));
        let err = intake_candidate(payload, Utc::now()).unwrap_err();
        assert_eq!(err, IntakeError::Consent(ConsentError::NotAccepted));
    }

    #[test]
    fn test_intake_rejects_negative_experience() {
        let payload = candidate_payload(json!({
            "experience_years": -1.0,
            "consent": consented(),
        }));
        assert!(matches!(
            intake_candidate(payload, Utc::now()),
            Err(IntakeError::Validation(_))
        ));
    }

    #[test]
    fn test_relocation_accepts_flag_or_note() {
        let flag = candidate_payload(json!({ "willing_to_relocate": true, "consent": consented() }));
        let note = candidate_payload(json!({ "willing_to_relocate": "EU only", "consent": consented() }));
        let declined = candidate_payload(json!({ "willing_to_relocate": false, "consent": consented() }));
        let blank = candidate_payload(json!({ "willing_to_relocate": "  ", "consent": consented() }));
        let empty = candidate_payload(json!({ "willing_to_relocate": "", "consent": consented() }));

        let now = Utc::now();
        assert_eq!(intake_candidate(flag, now).unwrap().willing_to_relocate.as_deref(), Some("yes"));
        assert_eq!(intake_candidate(note, now).unwrap().willing_to_relocate.as_deref(), Some("EU only"));
        assert!(intake_candidate(declined, now).unwrap().willing_to_relocate.is_none());
        assert_eq!(intake_candidate(blank, now).unwrap().willing_to_relocate.as_deref(), Some("  "));
        assert!(intake_candidate(empty, now).unwrap().willing_to_relocate.is_none());
    }

    #[test]
    fn test_parse_job_description() {
        let payload: JobPayload = serde_json::from_value(json!({
            "jd_id": "jd-1",
            "title": "Data Engineer",
            "location": "Berlin",
            "required_skills": ["Python", "ETL"],
            "min_experience_years": 3,
            "salary_range": { "min": 55000, "max": 75000 },
        }))
        .unwrap();

        let jd = parse_job_description(payload).unwrap();
        assert_eq!(jd.salary_range.max, Some(75_000));
        assert_eq!(jd.min_experience_years, Some(3.0));
        assert!(!jd.relocation_support);
        assert!(jd.preferred_skills.is_empty());
    }

    #[test]
    fn test_parse_job_rejects_inverted_salary() {
        let payload: JobPayload = serde_json::from_value(json!({
            "jd_id": "jd-2",
            "salary_range": { "min": 90000, "max": 50000 },
        }))
        .unwrap();
        assert!(matches!(
            parse_job_description(payload),
            Err(IntakeError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_job_requires_id() {
        let payload: JobPayload = serde_json::from_value(json!({ "title": "Untitled" })).unwrap();
        assert!(parse_job_description(payload).is_err());
    }
}
