use thiserror::Error;

use crate::matching::consent::ConsentError;

/// Failure of a single (candidate, job) evaluation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MatchError {
    #[error(transparent)]
    Consent(#[from] ConsentError),

    #[error("Invalid weight configuration: {0}")]
    InvalidConfiguration(String),
}
