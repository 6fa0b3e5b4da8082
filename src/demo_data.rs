//! Demo data generators for the weekly shift allocator.
//!
//! Produces a ready-to-submit [`AllocationRequest`] at a couple of sizes, for
//! `GET /demo-data`, the integration tests, and `bin/bench`.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::{AllocationRequest, Employee, Shift, TimeFrame, UnavailableWindow, DAYS_IN_WEEK};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoData {
    Small,
    Large,
}

impl std::str::FromStr for DemoData {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SMALL" => Ok(DemoData::Small),
            "LARGE" => Ok(DemoData::Large),
            _ => Err(()),
        }
    }
}

impl DemoData {
    fn parameters(&self) -> DemoDataParameters {
        match self {
            DemoData::Small => DemoDataParameters {
                roles: vec!["Nurse".to_string(), "Receptionist".to_string()],
                shifts_per_day: 3,
                employee_count: 6,
                shift_times: vec![("06:00", "14:00"), ("14:00", "22:00"), ("22:00", "06:00")],
            },
            DemoData::Large => DemoDataParameters {
                roles: vec![
                    "Nurse".to_string(),
                    "Receptionist".to_string(),
                    "Technician".to_string(),
                    "Security".to_string(),
                ],
                shifts_per_day: 8,
                employee_count: 25,
                shift_times: vec![
                    ("06:00", "14:00"),
                    ("09:00", "17:00"),
                    ("14:00", "22:00"),
                    ("22:00", "06:00"),
                ],
            },
        }
    }
}

struct DemoDataParameters {
    roles: Vec<String>,
    shifts_per_day: usize,
    employee_count: usize,
    shift_times: Vec<(&'static str, &'static str)>,
}

/// List of available demo data sets.
pub fn list_demo_data() -> Vec<&'static str> {
    vec!["SMALL", "LARGE"]
}

/// Generates a demo allocation request for the given size. Deterministic
/// (fixed RNG seed) so repeated calls and tests see the same shape.
pub fn generate(demo: DemoData) -> AllocationRequest {
    let params = demo.parameters();
    let mut rng = StdRng::seed_from_u64(42);

    let employees: Vec<Employee> = (0..params.employee_count)
        .map(|i| {
            let mut unavailable_dates = Vec::new();
            if rng.gen_bool(0.2) {
                let day = rng.gen_range(0..DAYS_IN_WEEK);
                unavailable_dates.push(UnavailableWindow {
                    day,
                    time_frame: TimeFrame { start: "12:00".to_string(), end: "13:00".to_string() },
                });
            }
            Employee {
                id: format!("employee-{i}"),
                contract_hours: Some(if rng.gen_bool(0.5) { 32.0 } else { 40.0 }),
                unavailable_dates,
                color: None,
            }
        })
        .collect();

    let mut shifts: Vec<Vec<Shift>> = vec![Vec::new(); DAYS_IN_WEEK];
    let mut shift_id = 0usize;

    for day in 0..DAYS_IN_WEEK {
        for i in 0..params.shifts_per_day {
            let (start, end) = params.shift_times[i % params.shift_times.len()];
            let role = params.roles[i % params.roles.len()].clone();

            let candidate_count = rng.gen_range(2..=params.employee_count.min(4).max(2));
            let mut candidates: Vec<String> = (0..params.employee_count)
                .collect::<Vec<_>>()
                .choose_multiple(&mut rng, candidate_count)
                .map(|i| format!("employee-{i}"))
                .collect();
            candidates.sort();

            shifts[day].push(Shift {
                id: format!("shift-{shift_id}"),
                start_time: start.to_string(),
                end_time: end.to_string(),
                candidates,
                employee_role: role,
                color: None,
            });
            shift_id += 1;
        }
    }

    AllocationRequest { shifts, employees, rest_priority: 3 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_demo_has_one_week_of_shifts() {
        let request = generate(DemoData::Small);
        assert_eq!(request.shifts.len(), DAYS_IN_WEEK);
        assert_eq!(request.employees.len(), 6);
        assert!(request.shifts.iter().all(|day| day.len() == 3));
    }

    #[test]
    fn large_demo_scales_up() {
        let request = generate(DemoData::Large);
        assert_eq!(request.employees.len(), 25);
        let total_shifts: usize = request.shifts.iter().map(|d| d.len()).sum();
        assert_eq!(total_shifts, DAYS_IN_WEEK * 8);
    }

    #[test]
    fn every_shift_has_at_least_one_candidate() {
        for demo in [DemoData::Small, DemoData::Large] {
            let request = generate(demo);
            for day in &request.shifts {
                for shift in day {
                    assert!(!shift.candidates.is_empty());
                }
            }
        }
    }

    #[test]
    fn demo_data_from_str_is_case_insensitive() {
        assert_eq!("SMALL".parse::<DemoData>(), Ok(DemoData::Small));
        assert_eq!("small".parse::<DemoData>(), Ok(DemoData::Small));
        assert_eq!("LARGE".parse::<DemoData>(), Ok(DemoData::Large));
        assert!("invalid".parse::<DemoData>().is_err());
    }
}
