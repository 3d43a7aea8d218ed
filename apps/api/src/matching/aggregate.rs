//! Weighted aggregation and gap derivation over the five dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::matching::error::MatchError;

pub const GAP_SKILLS: &str = "skills missing";
pub const GAP_EXPERIENCE: &str = "experience below requirement";
pub const GAP_LOCATION: &str = "location misaligned";
pub const GAP_SALARY: &str = "salary expectation above range";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Skills,
    Experience,
    Education,
    Location,
    Salary,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Skills,
        Dimension::Experience,
        Dimension::Education,
        Dimension::Location,
        Dimension::Salary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Skills => "skills",
            Dimension::Experience => "experience",
            Dimension::Education => "education",
            Dimension::Location => "location",
            Dimension::Salary => "salary",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|d| d.as_str() == s.trim())
            .ok_or_else(|| MatchError::InvalidConfiguration(format!("unknown dimension '{s}'")))
    }
}

/// Per-dimension weights. Fields left out of a serialized table weigh 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Weights {
    #[serde(default)]
    pub skills: f64,
    #[serde(default)]
    pub experience: f64,
    #[serde(default)]
    pub education: f64,
    #[serde(default)]
    pub location: f64,
    #[serde(default)]
    pub salary: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            skills: 0.45,
            experience: 0.25,
            education: 0.10,
            location: 0.10,
            salary: 0.10,
        }
    }
}

impl Weights {
    pub const ZERO: Weights = Weights {
        skills: 0.0,
        experience: 0.0,
        education: 0.0,
        location: 0.0,
        salary: 0.0,
    };

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Skills => self.skills,
            Dimension::Experience => self.experience,
            Dimension::Education => self.education,
            Dimension::Location => self.location,
            Dimension::Salary => self.salary,
        }
    }

    fn slot(&mut self, dimension: Dimension) -> &mut f64 {
        match dimension {
            Dimension::Skills => &mut self.skills,
            Dimension::Experience => &mut self.experience,
            Dimension::Education => &mut self.education,
            Dimension::Location => &mut self.location,
            Dimension::Salary => &mut self.salary,
        }
    }

    pub fn sum(&self) -> f64 {
        Dimension::ALL.iter().map(|d| self.get(*d)).sum()
    }

    /// Every weight finite and non-negative, total positive.
    pub fn validate(&self) -> Result<(), MatchError> {
        for dimension in Dimension::ALL {
            let weight = self.get(dimension);
            if !weight.is_finite() || weight < 0.0 {
                return Err(MatchError::InvalidConfiguration(format!(
                    "weight for {dimension} must be a non-negative number, got {weight}"
                )));
            }
        }
        let total = self.sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(MatchError::InvalidConfiguration(
                "weights must sum to a finite positive number".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses `skills=0.5,experience=0.5`. Unlisted dimensions weigh 0.
    pub fn parse_table(table: &str) -> Result<Self, MatchError> {
        let mut weights = Weights::ZERO;
        for pair in table.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                MatchError::InvalidConfiguration(format!("expected dimension=weight, got '{pair}'"))
            })?;
            let dimension: Dimension = name.parse()?;
            let weight = value.trim().parse::<f64>().map_err(|_| {
                MatchError::InvalidConfiguration(format!("weight for {dimension} is not a number"))
            })?;
            *weights.slot(dimension) = weight;
        }
        weights.validate()?;
        Ok(weights)
    }
}

/// One score per dimension, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub location: f64,
    pub salary: f64,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Skills => self.skills,
            Dimension::Experience => self.experience,
            Dimension::Education => self.education,
            Dimension::Location => self.location,
            Dimension::Salary => self.salary,
        }
    }
}

/// Σ(weight × score) / Σ(weight). Not re-clamped.
pub fn aggregate(weights: &Weights, scores: &DimensionScores) -> Result<f64, MatchError> {
    let total_weight = weights.sum();
    if !total_weight.is_finite() || total_weight <= 0.0 {
        return Err(MatchError::InvalidConfiguration(
            "weights must sum to a finite positive number".to_string(),
        ));
    }
    let weighted: f64 = Dimension::ALL
        .iter()
        .map(|d| weights.get(*d) * scores.get(*d))
        .sum();
    Ok(weighted / total_weight)
}

/// Rounds to 4 decimal places, ties to even.
pub fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round_ties_even() / 10_000.0
}

/// Threshold rules, in display order.
pub fn derive_gaps(scores: &DimensionScores, has_experience_requirement: bool) -> Vec<String> {
    let mut gaps = Vec::new();
    if scores.skills < 1.0 {
        gaps.push(GAP_SKILLS.to_string());
    }
    if scores.experience < 1.0 && has_experience_requirement {
        gaps.push(GAP_EXPERIENCE.to_string());
    }
    if scores.location < 0.5 {
        gaps.push(GAP_LOCATION.to_string());
    }
    if scores.salary == 0.0 {
        gaps.push(GAP_SALARY.to_string());
    }
    gaps
}
