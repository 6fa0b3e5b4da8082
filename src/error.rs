//! Core error taxonomy (spec §7). The HTTP layer (src/api.rs) maps these to
//! status codes; the core crate itself never talks HTTP.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("restPriority must be an integer between 1 and 5, got {0}")]
    BadRequest(String),

    #[error("no candidates provided for shifts: {0:?}")]
    NoCandidates(Vec<MissingCandidates>),

    #[error("malformed time string: {0}")]
    BadTime(String),

    #[error("could not create a MIP solver backend")]
    SolverUnavailable,

    #[error("solver failed with status {0}")]
    SolverFailed(String),
}

/// One entry of the `NoCandidates` error payload (spec §4.2 rule 9).
#[derive(Debug, Clone)]
pub struct MissingCandidates {
    pub day: usize,
    pub shift_id: String,
    pub role: String,
}
