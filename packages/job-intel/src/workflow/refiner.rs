//! Refiner stage: the self-correction loop's decision point.
//!
//! The retry bound is a hard cap: however little the provider
//! returns, the workflow proceeds once it is reached.

use crate::config::WorkflowLimits;
use crate::types::directive::SearchDirective;

/// Broadening terms appended per retry attempt.
const BROADENING_TERMS: [&str; 2] = [
    "remote OR hybrid \"hiring now\"",
    "\"work from home\" startup enterprise openings",
];

/// What the refiner decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefinerDecision {
    /// Result set is sufficient (or the retry budget is spent):
    /// advance to parsing, even with zero candidates.
    Proceed,

    /// Too few candidates and budget remains: search again with this
    /// augmented directive.
    Retry(SearchDirective),
}

/// Decide whether to retry the search with a broadened directive.
///
/// Retries iff the candidate count is below `min_candidates` AND the
/// retry count is below `max_search_retries`.
pub fn decide(
    candidate_count: usize,
    retries: u32,
    directive: &SearchDirective,
    limits: &WorkflowLimits,
) -> RefinerDecision {
    if candidate_count >= limits.min_candidates {
        return RefinerDecision::Proceed;
    }
    if retries >= limits.max_search_retries {
        return RefinerDecision::Proceed;
    }

    let terms = BROADENING_TERMS[retries as usize % BROADENING_TERMS.len()];
    RefinerDecision::Retry(directive.broadened(terms))
}
