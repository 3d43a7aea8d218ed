//! Dimension scorers: one pure function per matching criterion.
//!
//! Every scorer maps (candidate attribute, requirement) to a score in [0, 1]
//! plus a rationale string. No shared state, no I/O.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::job::SalaryRange;

/// Score and rationale for a single dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub score: f64,
    pub rationale: String,
}

impl DimensionScore {
    fn new(score: f64, rationale: impl Into<String>) -> Self {
        Self {
            score,
            rationale: rationale.into(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalisation
// ────────────────────────────────────────────────────────────────────────────

fn normalise_term(term: &str) -> String {
    term.trim().to_lowercase()
}

fn normalise_set(values: &[String]) -> HashSet<String> {
    values
        .iter()
        .map(|v| normalise_term(v))
        .filter(|v| !v.is_empty())
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Scorers
// ────────────────────────────────────────────────────────────────────────────

/// |candidate ∩ required| / |required| over trimmed, lower-cased sets.
pub fn score_skills(candidate_skills: &[String], required_skills: &[String]) -> DimensionScore {
    let required = normalise_set(required_skills);
    if required.is_empty() {
        return DimensionScore::new(1.0, "no requirement for skills; full credit");
    }
    let candidate = normalise_set(candidate_skills);
    let matched = required.intersection(&candidate).count();
    DimensionScore::new(
        matched as f64 / required.len() as f64,
        format!("matched {matched}/{} required skills", required.len()),
    )
}

pub fn score_experience(candidate_years: Option<f64>, required_years: Option<f64>) -> DimensionScore {
    let Some(required) = required_years else {
        return DimensionScore::new(1.0, "no minimum experience requirement");
    };
    let Some(years) = candidate_years else {
        return DimensionScore::new(0.0, "experience not provided");
    };
    let ratio = if required == 0.0 { 1.0 } else { years / required };
    DimensionScore::new(
        ratio.clamp(0.0, 1.0),
        format!("{years} years vs required {required}"),
    )
}

/// Substring heuristic: full credit when either normalised degree contains the other.
pub fn score_education(
    candidate_degree: Option<&str>,
    candidate_field: Option<&str>,
    required: Option<&str>,
) -> DimensionScore {
    let Some(required) = non_blank(required) else {
        return DimensionScore::new(1.0, "no education requirement");
    };
    let Some(degree) = non_blank(candidate_degree) else {
        return DimensionScore::new(0.0, "candidate degree missing");
    };

    let cand = normalise_term(degree);
    let req = normalise_term(required);
    let score = if cand.contains(&req) || req.contains(&cand) {
        1.0
    } else {
        0.5
    };

    let mut rationale = format!("candidate degree '{degree}' compared to requirement '{required}'");
    if let Some(field) = non_blank(candidate_field) {
        rationale.push_str(&format!("; field: {field}"));
    }
    DimensionScore::new(score, rationale)
}

pub fn score_location(
    candidate_city: Option<&str>,
    willing_to_relocate: Option<&str>,
    job_location: &str,
) -> DimensionScore {
    let Some(city) = non_blank(candidate_city) else {
        return DimensionScore::new(0.5, "candidate city unknown; neutral score");
    };
    if normalise_term(city) == normalise_term(job_location) {
        return DimensionScore::new(1.0, "candidate already in job location");
    }
    // Any non-empty note counts, whitespace included
    if let Some(note) = willing_to_relocate.filter(|v| !v.is_empty()) {
        return DimensionScore::new(0.8, format!("relocation willingness noted: {note}"));
    }
    DimensionScore::new(0.2, "location mismatch and no relocation preference")
}

pub fn score_salary(candidate_min: Option<i64>, offered: &SalaryRange) -> DimensionScore {
    let Some(expected) = candidate_min else {
        return DimensionScore::new(0.7, "salary expectation not provided; partial credit");
    };
    if let Some(max) = offered.max.filter(|max| expected > *max) {
        return DimensionScore::new(0.0, format!("expectation {expected} exceeds max {max}"));
    }
    if let Some(min) = offered.min.filter(|min| expected < *min) {
        return DimensionScore::new(1.0, format!("expectation {expected} below offered min {min}"));
    }
    DimensionScore::new(0.9, format!("expectation {expected} within offered range"))
}
