//! Greedy repair (C5).
//!
//! Reassigns shifts the MIP left `unassigned`, ignoring contract-hour caps
//! but still enforcing a 13-hour pairwise rest window, scoring candidates
//! by `current hours + this shift's length + lost off-day penalty`.

use std::collections::HashMap;

use crate::domain::{AllocationRequest, AssignedShift, Employee, WeeklySchedule};
use crate::model::RestPriorityProfile;
use crate::time;

/// Controls whether repair re-checks employee unavailability windows.
/// Spec §9 open question 2: the source enforces rest but not
/// unavailability during repair; we make that configurable and default to
/// honoring unavailability.
#[derive(Debug, Clone, Copy)]
pub struct RepairPolicy {
    pub honor_unavailability: bool,
}

impl Default for RepairPolicy {
    fn default() -> Self {
        Self { honor_unavailability: true }
    }
}

#[derive(Debug, Clone, Copy)]
struct AssignedInterval {
    day: usize,
    start_minutes: i64,
    end_minutes: i64,
}

/// Runs the greedy repair pass over a MIP-stage schedule.
///
/// Builds the final schedule fresh, keyed by shift id, rather than
/// appending repaired records on top of stale `unassigned` ones (spec §9
/// open question 1) — so every input shift id appears exactly once.
pub fn repair(
    request: &AllocationRequest,
    mip_schedule: &WeeklySchedule,
    policy: RepairPolicy,
) -> WeeklySchedule {
    let num_real = request.employees.len();
    let days = request.shifts.len();
    let repair_profile = RestPriorityProfile::default_profile();

    let mut current_hours = vec![0.0_f64; num_real];
    let mut assigned_intervals: Vec<Vec<AssignedInterval>> = vec![Vec::new(); num_real];
    let mut by_id: HashMap<String, AssignedShift> = HashMap::new();

    // Seed bookkeeping from the MIP's already-assigned shifts.
    for day_records in &mip_schedule.days {
        for rec in day_records {
            if !rec.is_unassigned() {
                if let Some(j) = employee_index(&request.employees, &rec.employee) {
                    if let (Ok(start), Ok(end)) =
                        (time::parse_to_minutes(&rec.start_time), time::parse_to_minutes(&rec.end_time))
                    {
                        current_hours[j] += time::effective_length_hours(start, end);
                        assigned_intervals[j].push(AssignedInterval { day: rec.day, start_minutes: start, end_minutes: end });
                    }
                }
            }
            by_id.insert(rec.id.clone(), rec.clone());
        }
    }

    // Greedily place every shift still marked unassigned, in day-major /
    // intra-day order, so later shifts observe earlier repairs.
    for (d, day_shifts) in request.shifts.iter().enumerate() {
        for shift in day_shifts {
            let needs_repair = by_id.get(&shift.id).map(|r| r.is_unassigned()).unwrap_or(true);
            if !needs_repair {
                continue;
            }

            let Ok(start) = time::parse_to_minutes(&shift.start_time) else { continue };
            let Ok(end) = time::parse_to_minutes(&shift.end_time) else { continue };
            let length = time::effective_length_hours(start, end);

            let mut best: Option<(usize, f64)> = None;
            for (j, emp) in request.employees.iter().enumerate() {
                if !shift.candidates.iter().any(|c| c == &emp.id) {
                    continue;
                }
                if !can_rest(&assigned_intervals[j], d, start) {
                    continue;
                }
                if policy.honor_unavailability && is_unavailable(emp, d, start, end) {
                    continue;
                }

                let penalty = lost_off_penalty(&assigned_intervals[j], days, d, repair_profile);
                let score = current_hours[j] + length
                    + penalty / (repair_profile.bonus_3d + repair_profile.bonus_2d);

                if best.map(|(_, best_score)| score < best_score).unwrap_or(true) {
                    best = Some((j, score));
                }
            }

            let record = match best {
                Some((j, _)) => {
                    current_hours[j] += length;
                    assigned_intervals[j].push(AssignedInterval { day: d, start_minutes: start, end_minutes: end });
                    AssignedShift::assigned_to(shift, d, &request.employees[j])
                }
                None => AssignedShift::unassigned(shift, d),
            };
            by_id.insert(shift.id.clone(), record);
        }
    }

    let mut schedule = WeeklySchedule::new(days);
    for (d, day_shifts) in request.shifts.iter().enumerate() {
        for shift in day_shifts {
            if let Some(rec) = by_id.remove(&shift.id) {
                schedule.days[d].push(rec);
            }
        }
    }
    schedule
}

fn employee_index(employees: &[Employee], id: &str) -> Option<usize> {
    employees.iter().position(|e| e.id == id)
}

/// 13-hour pairwise rest predicate (spec §4.5), checked against every shift
/// already assigned to the employee, not just the adjacent day.
fn can_rest(existing: &[AssignedInterval], day: usize, start_minutes: i64) -> bool {
    let cand_abs = day as i64 * 24 * 60 + start_minutes;
    let rest_minutes = 13 * 60;

    for iv in existing {
        let abs_end = iv.day as i64 * 24 * 60 + iv.end_minutes;
        if abs_end <= cand_abs && abs_end + rest_minutes > cand_abs {
            return false;
        }
        let abs_start = iv.day as i64 * 24 * 60 + iv.start_minutes;
        if abs_start >= cand_abs && cand_abs + rest_minutes > abs_start {
            return false;
        }
    }
    true
}

fn is_unavailable(emp: &Employee, day: usize, start_minutes: i64, end_minutes: i64) -> bool {
    emp.unavailable_dates.iter().any(|w| {
        if w.day != day {
            return false;
        }
        let (Ok(u_start), Ok(u_end)) =
            (time::parse_to_minutes(&w.time_frame.start), time::parse_to_minutes(&w.time_frame.end))
        else {
            return false;
        };
        end_minutes > u_start && start_minutes < u_end
    })
}

/// Sum of off-day bonuses that would be lost if `day` were forced from off
/// to on, always scored with profile 3 weights regardless of the caller's
/// `restPriority` (spec §4.5).
fn lost_off_penalty(
    existing: &[AssignedInterval],
    days: usize,
    day: usize,
    profile: RestPriorityProfile,
) -> f64 {
    let mut has_shift = vec![false; days];
    for iv in existing {
        has_shift[iv.day] = true;
    }
    let mut off_days: Vec<bool> = has_shift.iter().map(|w| !w).collect();

    if !off_days[day] {
        return 0.0;
    }

    let before_2 = count_blocks(&off_days, days, day, 2);
    let before_3 = count_blocks(&off_days, days, day, 3);
    off_days[day] = false;
    let after_2 = count_blocks(&off_days, days, day, 2);
    let after_3 = count_blocks(&off_days, days, day, 3);

    let lost_2 = (before_2 - after_2) as f64;
    let lost_3 = (before_3 - after_3) as f64;
    lost_2 * profile.bonus_2d + lost_3 * profile.bonus_3d
}

/// Counts `k`-day consecutive-off windows, among those that contain `day`,
/// that are fully off given the current `off_days` set.
fn count_blocks(off_days: &[bool], days: usize, day: usize, k: usize) -> usize {
    let lo = day.saturating_sub(k - 1);
    let hi = (days.saturating_sub(k)).min(day);
    if lo > hi {
        return 0;
    }
    (lo..=hi)
        .filter(|&start| (start..start + k).all(|d| off_days[d]))
        .count()
}
