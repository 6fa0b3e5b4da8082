//! Facade-level tests for the concrete scenarios in the allocator's
//! testable-properties section (S1-S6) plus the coverage/eligibility
//! invariants.

use shift_allocator::allocator::allocate_with;
use shift_allocator::domain::{
    AllocationRequest, Employee, Shift, TimeFrame, UnavailableWindow,
};
use shift_allocator::repair::RepairPolicy;

const FAST_WALL_CLOCK_MS: u64 = 20_000;

fn week_of(shifts_by_day: Vec<Vec<Shift>>) -> Vec<Vec<Shift>> {
    let mut days = shifts_by_day;
    days.resize_with(7, Vec::new);
    days
}

/// Builds a `Shift`; the caller places it at the right day by pushing it
/// into the matching index of the outer `shifts` vec — `Shift` itself
/// carries no `day` field (spec §6: day is the array position, not an
/// input field).
fn shift(id: &str, start: &str, end: &str, candidates: &[&str]) -> Shift {
    Shift {
        id: id.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        candidates: candidates.iter().map(|c| c.to_string()).collect(),
        employee_role: "generic".to_string(),
        color: None,
    }
}

fn employee(id: &str, contract_hours: Option<f64>) -> Employee {
    Employee { id: id.to_string(), contract_hours, unavailable_dates: Vec::new(), color: None }
}

#[test]
fn s1_trivial_single_shift_week() {
    let shifts = week_of(vec![vec![shift("s1", "09:00", "17:00", &["a"])]]);
    let request = AllocationRequest {
        shifts,
        employees: vec![employee("a", Some(8.0))],
        rest_priority: 3,
    };

    let schedule = allocate_with(request, FAST_WALL_CLOCK_MS, RepairPolicy::default()).unwrap();
    let assigned = &schedule.days[0][0];
    assert_eq!(assigned.employee, "a");
}

#[test]
fn s2_placeholder_fallback_then_repaired() {
    let shifts = week_of(vec![vec![shift("s1", "09:00", "17:00", &["a"])]]);
    let request = AllocationRequest {
        shifts,
        employees: vec![employee("a", Some(0.0))],
        rest_priority: 3,
    };

    let schedule = allocate_with(request, FAST_WALL_CLOCK_MS, RepairPolicy::default()).unwrap();
    assert_eq!(schedule.days[0][0].employee, "a");
}

#[test]
fn s3_rest_violation_splits_the_chain() {
    let shifts = week_of(vec![
        vec![shift("d0", "20:00", "24:00", &["a", "b"])],
        vec![shift("d1", "05:00", "10:00", &["a", "b"])],
    ]);
    let request = AllocationRequest {
        shifts,
        employees: vec![employee("a", Some(60.0)), employee("b", Some(60.0))],
        rest_priority: 3,
    };

    let schedule = allocate_with(request, FAST_WALL_CLOCK_MS, RepairPolicy::default()).unwrap();
    let first = &schedule.days[0][0].employee;
    let second = &schedule.days[1][0].employee;
    assert_ne!(first, second, "rest rule must force different employees");
    assert_ne!(first.as_str(), "unassigned");
    assert_ne!(second.as_str(), "unassigned");
}

#[test]
fn s4_unavailability_blocks_mip_but_repair_overrides() {
    let mut a = employee("a", Some(40.0));
    a.unavailable_dates.push(UnavailableWindow {
        day: 2,
        time_frame: TimeFrame { start: "12:00".to_string(), end: "13:00".to_string() },
    });

    let mut shifts = vec![Vec::new(); 7];
    shifts[2].push(shift("s1", "10:00", "14:00", &["a"]));

    let request = AllocationRequest { shifts, employees: vec![a], rest_priority: 3 };

    let schedule = allocate_with(
        request,
        FAST_WALL_CLOCK_MS,
        RepairPolicy { honor_unavailability: false },
    )
    .unwrap();
    assert_eq!(schedule.days[2][0].employee, "a");
}

#[test]
fn s4_default_policy_honors_unavailability_during_repair() {
    let mut a = employee("a", Some(40.0));
    a.unavailable_dates.push(UnavailableWindow {
        day: 2,
        time_frame: TimeFrame { start: "12:00".to_string(), end: "13:00".to_string() },
    });

    let mut shifts = vec![Vec::new(); 7];
    shifts[2].push(shift("s1", "10:00", "14:00", &["a"]));

    let request = AllocationRequest { shifts, employees: vec![a], rest_priority: 3 };

    let schedule = allocate_with(request, FAST_WALL_CLOCK_MS, RepairPolicy::default()).unwrap();
    assert!(schedule.days[2][0].is_unassigned());
}

#[test]
fn s5_preference_ordering_picks_first_candidate() {
    let shifts = week_of(vec![vec![shift("s1", "09:00", "17:00", &["a", "b", "c"])]]);
    let request = AllocationRequest {
        shifts,
        employees: vec![employee("a", Some(40.0)), employee("b", Some(40.0)), employee("c", Some(40.0))],
        rest_priority: 3,
    };

    let schedule = allocate_with(request, FAST_WALL_CLOCK_MS, RepairPolicy::default()).unwrap();
    assert_eq!(schedule.days[0][0].employee, "a");
}

#[test]
fn s6_three_day_off_reward_clusters_off_blocks_at_rest_priority_5() {
    // 7 days, one shift per day, identical candidate order and large
    // contracts for all three employees. With bonus_3d=3500 dominating the
    // ~4000-per-shift assignment reward's rank spread, the solver prefers
    // letting "a" (the top-ranked candidate on every day) cover the whole
    // week so "b" and "c" each get a fully off week — the most clustering
    // the 3-bonus can buy — rather than splitting the week for balance.
    let shifts = week_of(
        (0..7)
            .map(|_| vec![shift("s", "09:00", "17:00", &["a", "b", "c"])])
            .collect(),
    );
    let request = AllocationRequest {
        shifts,
        employees: vec![
            employee("a", Some(100.0)),
            employee("b", Some(100.0)),
            employee("c", Some(100.0)),
        ],
        rest_priority: 5,
    };

    let schedule = allocate_with(request, FAST_WALL_CLOCK_MS, RepairPolicy::default()).unwrap();
    for day in &schedule.days {
        assert_eq!(day[0].employee, "a", "top-ranked candidate should cover every day, freeing the other two for a full off-week");
    }
}

#[test]
fn coverage_invariant_one_record_per_input_shift() {
    let shifts = week_of(vec![
        vec![shift("a1", "09:00", "17:00", &["a"])],
        vec![shift("b1", "09:00", "17:00", &["a"])],
    ]);
    let request = AllocationRequest { shifts, employees: vec![employee("a", Some(40.0))], rest_priority: 3 };

    let schedule = allocate_with(request, FAST_WALL_CLOCK_MS, RepairPolicy::default()).unwrap();
    let ids: Vec<&str> = schedule.days.iter().flatten().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "b1"]);
}

#[test]
fn eligibility_invariant_never_assigns_non_candidate() {
    let shifts = week_of(vec![vec![shift("s1", "09:00", "17:00", &["a"])]]);
    let request = AllocationRequest {
        shifts,
        employees: vec![employee("a", Some(40.0)), employee("b", Some(40.0))],
        rest_priority: 3,
    };

    let schedule = allocate_with(request, FAST_WALL_CLOCK_MS, RepairPolicy::default()).unwrap();
    let assigned = &schedule.days[0][0].employee;
    assert!(assigned == "unassigned" || assigned == "a");
}

#[test]
fn no_candidates_is_rejected_before_solving() {
    let shifts = week_of(vec![vec![shift("s1", "09:00", "17:00", &[])]]);
    let request = AllocationRequest { shifts, employees: vec![employee("a", Some(40.0))], rest_priority: 3 };

    let err = allocate_with(request, FAST_WALL_CLOCK_MS, RepairPolicy::default()).unwrap_err();
    assert!(matches!(err, shift_allocator::error::AllocationError::NoCandidates(_)));
}
