//! Assignment extractor (C4).
//!
//! Turns the solver's winning `(day, shift_index) -> Assignee` map into a
//! day-ordered [`WeeklySchedule`], preserving the input order of shifts
//! within each day and marking anything the placeholder won as
//! `"unassigned"`.

use crate::domain::{AllocationRequest, Assignee, AssignedShift, WeeklySchedule};
use crate::solver::SolveOutcome;

pub fn extract(request: &AllocationRequest, outcome: &SolveOutcome) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::new(request.shifts.len());

    for (d, day_shifts) in request.shifts.iter().enumerate() {
        for (s, shift) in day_shifts.iter().enumerate() {
            let record = match outcome.assignments.get(&(d, s)) {
                Some(Assignee::Real(e)) => AssignedShift::assigned_to(shift, d, &request.employees[*e]),
                Some(Assignee::Placeholder) | None => AssignedShift::unassigned(shift, d),
            };
            schedule.days[d].push(record);
        }
    }

    schedule
}
