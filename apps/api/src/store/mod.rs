//! In-memory CV store with consent enforcement on every write and read, and a
//! retention window on reads.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::info;

use crate::matching::consent::{assert_consent, ConsentError};
use crate::models::candidate::Candidate;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error(transparent)]
    Consent(#[from] ConsentError),

    #[error("Candidate {candidate_id} exceeds the {retention_days}-day retention window")]
    RetentionExpired {
        candidate_id: String,
        retention_days: u32,
    },
}

/// Fails once the whole days elapsed since upload reach `retention_days`.
/// A candidate without an upload date is treated as uploaded `now`.
pub fn enforce_retention(
    candidate: &Candidate,
    retention_days: u32,
    now: DateTime<Utc>,
) -> Result<(), StoreError> {
    let uploaded = candidate.upload_date.unwrap_or(now);
    if (now - uploaded).num_days() >= i64::from(retention_days) {
        return Err(StoreError::RetentionExpired {
            candidate_id: candidate.candidate_id.clone(),
            retention_days,
        });
    }
    Ok(())
}

/// Candidates keyed by `candidate_id`. Values are immutable; `add` replaces.
#[derive(Debug, Clone)]
pub struct CvStore {
    retention_days: u32,
    candidates: BTreeMap<String, Candidate>,
}

impl CvStore {
    pub fn new(retention_days: u32) -> Self {
        Self {
            retention_days,
            candidates: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn add(&mut self, candidate: Candidate) -> Result<(), StoreError> {
        assert_consent(&candidate)?;
        info!(candidate_id = %candidate.candidate_id, "candidate stored");
        self.candidates
            .insert(candidate.candidate_id.clone(), candidate);
        Ok(())
    }

    pub fn delete(&mut self, candidate_id: &str) -> bool {
        let removed = self.candidates.remove(candidate_id).is_some();
        if removed {
            info!(candidate_id, "candidate deleted");
        }
        removed
    }

    /// Re-checks consent and retention before handing the record out.
    pub fn get(&self, candidate_id: &str, now: DateTime<Utc>) -> Result<Option<Candidate>, StoreError> {
        let Some(candidate) = self.candidates.get(candidate_id) else {
            return Ok(None);
        };
        assert_consent(candidate)?;
        enforce_retention(candidate, self.retention_days, now)?;
        Ok(Some(candidate.clone()))
    }

    /// Consent-checked candidates uploaded within the retention window, in id order.
    /// A window reaching past the representable date range has no cutoff.
    pub fn active_candidates(&self, now: DateTime<Utc>) -> Result<Vec<Candidate>, StoreError> {
        let cutoff = now.checked_sub_signed(Duration::days(i64::from(self.retention_days)));
        let mut active = Vec::new();
        for candidate in self.candidates.values() {
            assert_consent(candidate)?;
            let uploaded = candidate.upload_date.unwrap_or(now);
            if cutoff.map_or(true, |cutoff| uploaded >= cutoff) {
                active.push(candidate.clone());
            }
        }
        Ok(active)
    }
}
