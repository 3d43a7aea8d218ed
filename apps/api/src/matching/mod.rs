// Matching engine: consent gate, anonymiser, dimension scorers, aggregation,
// per-pair orchestration and shortlisting.
// Pure and synchronous; HTTP handlers live in `handlers`.

pub mod aggregate;
pub mod anonymise;
pub mod consent;
pub mod error;
pub mod handlers;
pub mod orchestrator;
pub mod scorers;
pub mod shortlist;
