#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("salary range min {min} exceeds max {max}")]
pub struct SalaryRangeError {
    pub min: i64,
    pub max: i64,
}

/// Offered salary band. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl SalaryRange {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Result<Self, SalaryRangeError> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(SalaryRangeError { min, max });
            }
        }
        Ok(Self { min, max })
    }

    /// Absent bounds are unbounded; an absent expectation always fits.
    pub fn contains(&self, expected: Option<i64>) -> bool {
        let Some(expected) = expected else {
            return true;
        };
        if self.min.is_some_and(|min| expected < min) {
            return false;
        }
        if self.max.is_some_and(|max| expected > max) {
            return false;
        }
        true
    }
}

/// Already-structured job description. Treated as an immutable snapshot per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub jd_id: String,
    pub title: String,
    pub location: String,
    pub required_education: Option<String>,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub min_experience_years: Option<f64>,
    pub salary_range: SalaryRange,
    pub employment_type: Option<String>,
    pub relocation_support: bool,
    pub industry: Option<String>,
    pub raw_jd: Option<String>,
}
