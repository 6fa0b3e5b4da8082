//! Allocator facade (C6).
//!
//! The single entry point the HTTP layer (and the bench binary) calls:
//! solve the MIP, extract its winning assignment, then run greedy repair
//! over whatever it left uncovered. Shape-level request validation is the
//! HTTP collaborator's job (spec §1), not the core's.

use crate::domain::{AllocationRequest, WeeklySchedule};
use crate::error::AllocationError;
use crate::extract;
use crate::model::RestPriorityProfile;
use crate::repair::{self, RepairPolicy};
use crate::solver::{self, DEFAULT_WALL_CLOCK_MS};

/// Runs the full two-stage allocation with default timing and repair
/// policy.
pub fn allocate(request: AllocationRequest) -> Result<WeeklySchedule, AllocationError> {
    allocate_with(request, DEFAULT_WALL_CLOCK_MS, RepairPolicy::default())
}

/// Same as [`allocate`] but lets callers (tests, the bench binary) override
/// the MIP's wall-clock budget and the repair stage's policy.
pub fn allocate_with(
    request: AllocationRequest,
    wall_clock_ms: u64,
    repair_policy: RepairPolicy,
) -> Result<WeeklySchedule, AllocationError> {
    let profile = RestPriorityProfile::for_priority(request.rest_priority);
    let outcome = solver::solve(request.clone(), profile, wall_clock_ms)?;
    let mip_schedule = extract::extract(&request, &outcome);
    let final_schedule = repair::repair(&request, &mip_schedule, repair_policy);

    Ok(final_schedule)
}
