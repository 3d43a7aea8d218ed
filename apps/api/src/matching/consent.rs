//! Consent gate: no candidate attribute is scored or stored without a valid
//! consent record.

use thiserror::Error;

use crate::models::candidate::Candidate;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ConsentError {
    #[error("Consent is required before processing candidate data")]
    Missing,

    #[error("Consent was not accepted")]
    NotAccepted,

    #[error("Consent record has no policy version")]
    MissingPolicyVersion,
}

/// Fails unless the candidate carries an accepted consent tied to a policy version.
pub fn assert_consent(candidate: &Candidate) -> Result<(), ConsentError> {
    let consent = candidate.consent.as_ref().ok_or(ConsentError::Missing)?;
    if !consent.accepted {
        return Err(ConsentError::NotAccepted);
    }
    if consent.policy_version.is_empty() {
        return Err(ConsentError::MissingPolicyVersion);
    }
    Ok(())
}

/// Dry check used to pre-filter batches.
pub fn has_valid_consent(candidate: &Candidate) -> bool {
    assert_consent(candidate).is_ok()
}
