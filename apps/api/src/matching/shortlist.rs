//! Shortlisting: ranks a candidate collection against one job and truncates.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::matching::aggregate::Weights;
use crate::matching::consent::has_valid_consent;
use crate::matching::error::MatchError;
use crate::matching::orchestrator::match_candidate;
use crate::models::candidate::Candidate;
use crate::models::job::JobDescription;
use crate::models::match_result::MatchResult;

/// Ranked, truncated shortlist.
///
/// Candidates are scored in parallel; results come back in input order and
/// the stable sort runs afterwards, so equal scores keep their input order
/// regardless of completion order. Any consent failure aborts the run.
pub fn shortlist(
    candidates: &[Candidate],
    jd: &JobDescription,
    weights: &Weights,
    max_results: usize,
) -> Result<Vec<MatchResult>, MatchError> {
    let mut scored = candidates
        .par_iter()
        .map(|candidate| match_candidate(candidate, jd, weights))
        .collect::<Result<Vec<_>, _>>()?;

    // Highest score first; ties keep input order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(max_results);

    info!(
        jd_id = %jd.jd_id,
        evaluated = candidates.len(),
        returned = scored.len(),
        "shortlist built"
    );
    Ok(scored)
}

/// Drops candidates that fail a dry consent check, then shortlists the rest.
pub fn shortlist_consented(
    candidates: &[Candidate],
    jd: &JobDescription,
    weights: &Weights,
    max_results: usize,
) -> Result<Vec<MatchResult>, MatchError> {
    let (consented, rejected): (Vec<Candidate>, Vec<Candidate>) = candidates
        .iter()
        .cloned()
        .partition(has_valid_consent);

    for candidate in &rejected {
        warn!(candidate_id = %candidate.candidate_id, jd_id = %jd.jd_id, "skipping candidate without valid consent");
    }

    shortlist(&consented, jd, weights, max_results)
}

/// Human-readable summary for CLI/log output.
pub fn format_results(results: &[MatchResult]) -> String {
    let mut lines = Vec::new();
    for (rank, result) in results.iter().enumerate() {
        let explanations = &result.explanations;
        lines.push(format!(
            "#{} Candidate {}: score {:.2}",
            rank + 1,
            result.candidate_id,
            result.score
        ));
        lines.push(format!("  Skills: {}", explanations.skills));
        lines.push(format!("  Experience: {}", explanations.experience));
        lines.push(format!("  Education: {}", explanations.education));
        lines.push(format!("  Location: {}", explanations.location));
        lines.push(format!("  Salary: {}", explanations.salary));
        if !result.gaps.is_empty() {
            lines.push(format!("  Gaps: {}", result.gaps.join(", ")));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}
