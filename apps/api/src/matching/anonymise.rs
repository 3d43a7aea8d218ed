use crate::models::candidate::Candidate;

/// Replaces `full_name` in anonymised views.
pub const REDACTED_NAME: &str = "ANONYMIZED";

/// Returns a copy with direct identifiers removed.
///
/// `candidate_id` is kept for audit traceability. Every other field passes
/// through untouched. The input is never modified.
pub fn anonymise(candidate: &Candidate) -> Candidate {
    Candidate {
        full_name: REDACTED_NAME.to_string(),
        social_link: None,
        ..candidate.clone()
    }
}
