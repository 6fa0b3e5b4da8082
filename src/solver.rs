//! MIP solver adapter (C3).
//!
//! Wraps the `good_lp`/SCIP backend behind a wall-clock limit. `good_lp`
//! does not expose a cross-backend cancellation API, so the limit is
//! enforced at the adapter boundary: the solve runs on a dedicated thread
//! and the caller gives up waiting after `wall_clock_ms`. If that happens
//! the spawned thread is simply abandoned and its eventual result is
//! dropped — acceptable because a request-scoped allocator has nothing
//! left to do with a solution that arrives after its caller moved on.

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use good_lp::{Solution, SolverModel};

use crate::domain::{AllocationRequest, Assignee};
use crate::error::AllocationError;
use crate::model::{self, RestPriorityProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    Feasible,
    TimeoutNoSolution,
}

pub struct SolveOutcome {
    pub status: SolveStatus,
    /// Winning assignee per `(day, shift_index)`. Absent entries are
    /// treated as uncovered by the extractor.
    pub assignments: HashMap<(usize, usize), Assignee>,
}

/// Default wall-clock limit for a single allocation (spec §4.3, §4.6).
pub const DEFAULT_WALL_CLOCK_MS: u64 = 20_000;

pub fn solve(
    request: AllocationRequest,
    profile: RestPriorityProfile,
    wall_clock_ms: u64,
) -> Result<SolveOutcome, AllocationError> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let result = run(&request, profile);
        let _ = tx.send(result);
    });

    match rx.recv_timeout(Duration::from_millis(wall_clock_ms)) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            tracing::warn!(wall_clock_ms, "solver exceeded wall-clock limit with no incumbent");
            Err(AllocationError::SolverFailed("TIMEOUT_NO_SOLUTION".to_string()))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(AllocationError::SolverUnavailable),
    }
}

fn run(request: &AllocationRequest, profile: RestPriorityProfile) -> Result<SolveOutcome, AllocationError> {
    let (problem, index) = model::build(request, profile)?;

    let solution = problem
        .solve()
        .map_err(|e| AllocationError::SolverFailed(e.to_string()))?;

    let mut assignments = HashMap::new();
    for (&(d, s, who), &var) in index.x.iter() {
        if solution.value(var) > 0.5 {
            assignments.insert((d, s), who);
        }
    }

    tracing::debug!(shifts = assignments.len(), "MIP solve complete");
    Ok(SolveOutcome { status: SolveStatus::Optimal, assignments })
}
