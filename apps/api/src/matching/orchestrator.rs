//! Evaluates one candidate against one job.
//!
//! consent → dimension scores → aggregate → gaps → anonymise → result.
//! Scoring reads the raw candidate; only the surfaced result is anonymised.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::matching::aggregate::{aggregate, derive_gaps, round_score, Dimension, DimensionScores, Weights};
use crate::matching::anonymise::anonymise;
use crate::matching::consent::assert_consent;
use crate::matching::error::MatchError;
use crate::matching::scorers::{
    score_education, score_experience, score_location, score_salary, score_skills,
};
use crate::models::candidate::Candidate;
use crate::models::job::JobDescription;
use crate::models::match_result::{MatchExplanation, MatchResult};

/// Scores a single (candidate, job) pair.
///
/// A consent failure aborts the call; nothing is scored and no result exists.
pub fn match_candidate(
    candidate: &Candidate,
    jd: &JobDescription,
    weights: &Weights,
) -> Result<MatchResult, MatchError> {
    if let Err(err) = assert_consent(candidate) {
        warn!(candidate_id = %candidate.candidate_id, jd_id = %jd.jd_id, error = %err, "consent check failed");
        return Err(err.into());
    }

    let skills = score_skills(&candidate.skills, &jd.required_skills);
    let experience = score_experience(candidate.experience_years, jd.min_experience_years);
    let education = score_education(
        candidate.highest_degree.as_deref(),
        candidate.field_of_study.as_deref(),
        jd.required_education.as_deref(),
    );
    let location = score_location(
        candidate.city.as_deref(),
        candidate.willing_to_relocate.as_deref(),
        &jd.location,
    );
    let salary = score_salary(candidate.min_salary, &jd.salary_range);

    let scores = DimensionScores {
        skills: skills.score,
        experience: experience.score,
        education: education.score,
        location: location.score,
        salary: salary.score,
    };
    let score = round_score(aggregate(weights, &scores)?);
    let gaps = derive_gaps(&scores, jd.min_experience_years.is_some_and(|y| y > 0.0));

    let explanations = MatchExplanation {
        skills: skills.rationale,
        experience: experience.rationale,
        education: education.rationale,
        location: location.rationale,
        salary: salary.rationale,
        industry: format!("industry noted: {}", jd.industry.as_deref().unwrap_or("n/a")),
    };

    let view = anonymise(candidate);
    let highlights = build_highlights(&view);

    debug!(
        candidate_id = %view.candidate_id,
        jd_id = %jd.jd_id,
        score,
        gaps = gaps.len(),
        "candidate scored"
    );

    Ok(MatchResult {
        candidate_id: view.candidate_id,
        score,
        explanations,
        highlights,
        gaps,
        anonymised: true,
    })
}

/// Highlights are read from the anonymised view only.
fn build_highlights(view: &Candidate) -> BTreeMap<String, Vec<String>> {
    let experience = match view.experience_years {
        Some(years) => format!("{years} years"),
        None => "unknown years".to_string(),
    };

    let mut highlights = BTreeMap::new();
    highlights.insert(Dimension::Skills.to_string(), view.skills.clone());
    highlights.insert(Dimension::Experience.to_string(), vec![experience]);
    highlights.insert(
        Dimension::Location.to_string(),
        view.city.iter().cloned().collect(),
    );
    highlights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::aggregate::GAP_SALARY;
    use crate::matching::consent::ConsentError;
    use crate::models::candidate::fixtures as candidates;
    use crate::models::job::fixtures as jobs;

    #[test]
    fn test_strong_candidate_scores_high() {
        let result = match_candidate(
            &candidates::candidate("cand-1"),
            &jobs::data_engineer(),
            &Weights::default(),
        )
        .unwrap();

        // skills 1.0, experience 1.0, education 1.0, location 1.0, salary 0.9
        assert!((result.score - 0.99).abs() < 1e-9, "Score was {}", result.score);
        assert!(result.gaps.is_empty());
        assert!(result.anonymised);
        assert_eq!(result.candidate_id, "cand-1");
        assert_eq!(result.explanations.skills, "matched 3/3 required skills");
        assert_eq!(result.explanations.industry, "industry noted: Technology");
    }

    #[test]
    fn test_rejected_consent_produces_no_result() {
        let mut candidate = candidates::candidate("cand-1");
        if let Some(consent) = candidate.consent.as_mut() {
            consent.accepted = false;
        }
        let err = match_candidate(&candidate, &jobs::data_engineer(), &Weights::default())
            .unwrap_err();
        assert_eq!(err, MatchError::Consent(ConsentError::NotAccepted));
    }

    #[test]
    fn test_salary_above_max_is_gap() {
        let candidate = Candidate {
            min_salary: Some(90_000),
            ..candidates::candidate("cand-2")
        };
        let result =
            match_candidate(&candidate, &jobs::data_engineer(), &Weights::default()).unwrap();
        assert!(result.gaps.iter().any(|g| g == GAP_SALARY));
        assert!(result.explanations.salary.contains("exceeds max"));
    }

    #[test]
    fn test_result_never_contains_pii() {
        let candidate = candidates::candidate("cand-3");
        let result =
            match_candidate(&candidate, &jobs::data_engineer(), &Weights::default()).unwrap();

        let serialized = serde_json::to_string(&result.as_flat_map().unwrap()).unwrap();
        assert!(!serialized.contains(&candidate.full_name));
        if let Some(link) = &candidate.social_link {
            assert!(!serialized.contains(link.as_str()));
        }
        assert_eq!(result.candidate_id, candidate.candidate_id);
    }

    #[test]
    fn test_highlights_from_anonymised_view() {
        let result = match_candidate(
            &candidates::candidate("cand-4"),
            &jobs::data_engineer(),
            &Weights::default(),
        )
        .unwrap();

        assert_eq!(result.highlights["experience"], vec!["5 years".to_string()]);
        assert_eq!(result.highlights["location"], vec!["Berlin".to_string()]);
        assert_eq!(result.highlights["skills"].len(), 4);
    }

    #[test]
    fn test_missing_city_and_experience_highlights() {
        let candidate = Candidate {
            city: None,
            experience_years: None,
            ..candidates::candidate("cand-5")
        };
        let result =
            match_candidate(&candidate, &jobs::data_engineer(), &Weights::default()).unwrap();
        assert!(result.highlights["location"].is_empty());
        assert_eq!(result.highlights["experience"], vec!["unknown years".to_string()]);
        assert!(result.gaps.iter().any(|g| g == "experience below requirement"));
    }

    #[test]
    fn test_custom_weights_and_rounding() {
        let candidate = Candidate {
            experience_years: Some(1.0),
            ..candidates::candidate("cand-6")
        };
        let weights = Weights {
            skills: 1.0,
            experience: 1.0,
            ..Weights::ZERO
        };
        // (1.0 + 1/3) / 2 = 0.666666… → 0.6667
        let result = match_candidate(&candidate, &jobs::data_engineer(), &weights).unwrap();
        assert_eq!(result.score, 0.6667);
    }

    #[test]
    fn test_zero_year_minimum_is_not_an_experience_gap() {
        let candidate = Candidate {
            experience_years: None,
            ..candidates::candidate("cand-8")
        };
        let jd = JobDescription {
            min_experience_years: Some(0.0),
            ..jobs::data_engineer()
        };
        let result = match_candidate(&candidate, &jd, &Weights::default()).unwrap();
        assert_eq!(result.explanations.experience, "experience not provided");
        assert!(!result.gaps.iter().any(|g| g == "experience below requirement"));
    }

    #[test]
    fn test_huge_weights_are_rejected_not_nan() {
        let weights = Weights {
            skills: 1e308,
            experience: 1e308,
            ..Weights::ZERO
        };
        let err = match_candidate(&candidates::candidate("cand-9"), &jobs::data_engineer(), &weights)
            .unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_zero_weights_is_invalid_configuration() {
        let err = match_candidate(
            &candidates::candidate("cand-7"),
            &jobs::data_engineer(),
            &Weights::ZERO,
        )
        .unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfiguration(_)));
    }
}
