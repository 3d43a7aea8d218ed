use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Consent assertion captured at intake. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub accepted: bool,
    pub policy_version: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsentRecord {
    /// Valid only when accepted and tied to a policy version.
    pub fn is_valid(&self) -> bool {
        self.accepted && !self.policy_version.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub title: String,
    pub employer: String,
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// A job-seeker profile. `candidate_id` is assigned once at intake and never reused.
///
/// `full_name` and `social_link` are direct identifiers; everything surfaced
/// outside the matching engine goes through `matching::anonymise` first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub candidate_id: String,
    pub full_name: String,
    pub nationality: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub highest_degree: Option<String>,
    pub field_of_study: Option<String>,
    pub graduation_year: Option<i32>,
    pub field_of_work: Option<String>,
    /// Free-text note; any non-empty value counts as willing to relocate.
    pub willing_to_relocate: Option<String>,
    pub social_link: Option<String>,
    pub min_salary: Option<i64>,
    pub experience_years: Option<f64>,
    pub skills: Vec<String>,
    pub work_history: Vec<WorkEntry>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub additional: Option<String>,
    pub consent: Option<ConsentRecord>,
    pub upload_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn consent() -> ConsentRecord {
        ConsentRecord {
            accepted: true,
            policy_version: "2024-08".to_string(),
            timestamp: Utc::now(),
        }
    }

    /// A consented candidate with every scoring input populated.
    pub fn candidate(candidate_id: &str) -> Candidate {
        Candidate {
            candidate_id: candidate_id.to_string(),
            full_name: "Alex Example".to_string(),
            nationality: Some("DE".to_string()),
            city: Some("Berlin".to_string()),
            country: Some("Germany".to_string()),
            highest_degree: Some("BSc Computer Science".to_string()),
            field_of_study: Some("Computer Science".to_string()),
            graduation_year: Some(2018),
            field_of_work: Some("Data Engineering".to_string()),
            willing_to_relocate: Some("open to EU relocation".to_string()),
            social_link: Some("https://linkedin.example/alex".to_string()),
            min_salary: Some(60_000),
            experience_years: Some(5.0),
            skills: vec![
                "Python".to_string(),
                "ETL".to_string(),
                "Airflow".to_string(),
                "SQL".to_string(),
            ],
            work_history: vec![],
            certifications: vec![],
            languages: vec!["English".to_string()],
            additional: None,
            consent: Some(consent()),
            upload_date: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consent_valid_when_accepted_with_policy() {
        assert!(fixtures::consent().is_valid());
    }

    #[test]
    fn test_consent_invalid_when_not_accepted() {
        let consent = ConsentRecord {
            accepted: false,
            ..fixtures::consent()
        };
        assert!(!consent.is_valid());
    }

    #[test]
    fn test_consent_invalid_without_policy_version() {
        let consent = ConsentRecord {
            policy_version: String::new(),
            ..fixtures::consent()
        };
        assert!(!consent.is_valid());
    }
}
