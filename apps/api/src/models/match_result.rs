use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Human-readable rationale per dimension. Descriptive only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchExplanation {
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub location: String,
    pub salary: String,
    pub industry: String,
}

/// Outcome of one (candidate, job) evaluation. Built once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate_id: String,
    /// Weighted score in [0, 1], rounded to 4 decimals.
    pub score: f64,
    pub explanations: MatchExplanation,
    /// Non-PII highlights keyed by dimension name.
    pub highlights: BTreeMap<String, Vec<String>>,
    pub gaps: Vec<String>,
    pub anonymised: bool,
}

impl MatchResult {
    /// Field name → value mapping for transport and display.
    /// `explanations` stays a nested object keyed by dimension.
    pub fn as_flat_map(&self) -> Result<Map<String, Value>, serde_json::Error> {
        serde_json::to_value(self).and_then(serde_json::from_value)
    }
}
