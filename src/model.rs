//! MIP model builder (C2).
//!
//! Translates a validated [`AllocationRequest`] into `good_lp` decision
//! variables, hard constraints, and a weighted objective. The returned
//! problem is ready to hand straight to [`crate::solver::solve`].

use std::collections::HashMap;

use good_lp::{constraint, default_solver, variable, variables, Constraint, Expression, SolverModel, Variable};

use crate::domain::{AllocationRequest, Assignee, RestPriority};
use crate::error::{AllocationError, MissingCandidates};
use crate::time;

/// Practical stand-in for "+infinity" contract hours. Large enough that it
/// never binds in practice, small enough that the solver's continuous
/// bounds stay well-scaled.
pub const UNCAPPED_HOURS: f64 = 1.0e6;

/// Objective weights selected by `restPriority` (spec §4.2).
#[derive(Debug, Clone, Copy)]
pub struct RestPriorityProfile {
    pub assign_w: f64,
    pub placeholder_p: f64,
    pub bonus_3d: f64,
    pub bonus_2d: f64,
}

impl RestPriorityProfile {
    pub fn for_priority(priority: RestPriority) -> Self {
        match priority {
            1 => Self { assign_w: 4000.0, placeholder_p: 10_000.0, bonus_3d: 500.0, bonus_2d: 500.0 },
            2 => Self { assign_w: 4000.0, placeholder_p: 10_000.0, bonus_3d: 1000.0, bonus_2d: 500.0 },
            3 => Self::default_profile(),
            4 => Self { assign_w: 4000.0, placeholder_p: 10_000.0, bonus_3d: 2500.0, bonus_2d: 1250.0 },
            5 => Self { assign_w: 4000.0, placeholder_p: 10_000.0, bonus_3d: 3500.0, bonus_2d: 1250.0 },
            _ => Self::default_profile(),
        }
    }

    /// Profile 3, used both as the fallback for unknown priorities and as
    /// the fixed weighting for the greedy repair's lost-off-day penalty
    /// (spec §4.5), regardless of the caller's actual `restPriority`.
    pub fn default_profile() -> Self {
        Self { assign_w: 4000.0, placeholder_p: 10_000.0, bonus_3d: 1500.0, bonus_2d: 1000.0 }
    }
}

/// Maps `(day, shift_index, assignee)` to the `good_lp` variable that
/// indicates that assignee works that shift.
pub struct VariableIndex {
    pub x: HashMap<(usize, usize, Assignee), Variable>,
}

/// Builds the MIP and returns it together with the variable index needed
/// to read back the winning assignment after solving.
pub fn build(
    request: &AllocationRequest,
    profile: RestPriorityProfile,
) -> Result<(impl SolverModel, VariableIndex), AllocationError> {
    precheck_candidates(request)?;

    let days = request.shifts.len();
    let num_real = request.employees.len();

    let mut vars = variables!();
    let mut x: HashMap<(usize, usize, Assignee), Variable> = HashMap::new();

    for (d, day_shifts) in request.shifts.iter().enumerate() {
        for (s, shift) in day_shifts.iter().enumerate() {
            for (e, emp) in request.employees.iter().enumerate() {
                if shift.candidates.iter().any(|c| c == &emp.id) {
                    x.insert((d, s, Assignee::Real(e)), vars.add(variable().binary()));
                }
            }
            x.insert((d, s, Assignee::Placeholder), vars.add(variable().binary()));
        }
    }

    let mut off: HashMap<(usize, usize), Variable> = HashMap::new();
    let mut two: HashMap<(usize, usize), Variable> = HashMap::new();
    let mut three: HashMap<(usize, usize), Variable> = HashMap::new();
    let mut h: HashMap<usize, Variable> = HashMap::new();

    for e in 0..num_real {
        let cap = request.employees[e].contract_hours.unwrap_or(UNCAPPED_HOURS);
        h.insert(e, vars.add(variable().min(0.0).max(cap)));
        for d in 0..days {
            off.insert((d, e), vars.add(variable().min(0.0).max(1.0)));
        }
        for d in 0..days.saturating_sub(1) {
            two.insert((d, e), vars.add(variable().binary()));
        }
        for d in 0..days.saturating_sub(2) {
            three.insert((d, e), vars.add(variable().binary()));
        }
    }

    let mut constraints: Vec<Constraint> = Vec::new();

    // 1. Coverage: every shift covered by exactly one assignee.
    for (d, day_shifts) in request.shifts.iter().enumerate() {
        for s in 0..day_shifts.len() {
            let sum: Expression = x
                .iter()
                .filter(|((dd, ss, _), _)| *dd == d && *ss == s)
                .map(|(_, &v)| Expression::from(v))
                .sum();
            constraints.push(constraint!(sum == 1));
        }
    }

    // 2. One shift per day per real employee.
    for e in 0..num_real {
        for (d, day_shifts) in request.shifts.iter().enumerate() {
            let sum: Expression = (0..day_shifts.len())
                .filter_map(|s| x.get(&(d, s, Assignee::Real(e))).map(|&v| Expression::from(v)))
                .sum();
            constraints.push(constraint!(sum <= 1));
        }
    }

    // 3. 11-hour overnight rest between consecutive days.
    for e in 0..num_real {
        for d in 0..days.saturating_sub(1) {
            for (s, shift) in request.shifts[d].iter().enumerate() {
                let Some(&today_var) = x.get(&(d, s, Assignee::Real(e))) else { continue };
                let end = time::parse_hhmm(&shift.end_time)?;
                for (ns, next_shift) in request.shifts[d + 1].iter().enumerate() {
                    let Some(&tomorrow_var) = x.get(&(d + 1, ns, Assignee::Real(e))) else { continue };
                    let start = time::parse_hhmm(&next_shift.start_time)?;
                    if time::rest_between(end, start) < 11.0 {
                        constraints.push(constraint!(today_var + tomorrow_var <= 1));
                    }
                }
            }
        }
    }

    // 4. Unavailability.
    for (e, emp) in request.employees.iter().enumerate() {
        for window in &emp.unavailable_dates {
            let d = window.day;
            if d >= days {
                continue;
            }
            let u_start = time::parse_hhmm(&window.time_frame.start)?;
            let u_end = time::parse_hhmm(&window.time_frame.end)?;
            for (s, shift) in request.shifts[d].iter().enumerate() {
                if let Some(&var) = x.get(&(d, s, Assignee::Real(e))) {
                    let ss = time::parse_hhmm(&shift.start_time)?;
                    let se = time::parse_hhmm(&shift.end_time)?;
                    if se > u_start && ss < u_end {
                        constraints.push(constraint!(var == 0));
                    }
                }
            }
        }
    }

    // 5 & 9. Weekly hours bookkeeping (cap enforced by h's variable bounds).
    for e in 0..num_real {
        let mut terms: Vec<Expression> = Vec::new();
        for (d, day_shifts) in request.shifts.iter().enumerate() {
            for (s, shift) in day_shifts.iter().enumerate() {
                if let Some(&var) = x.get(&(d, s, Assignee::Real(e))) {
                    let length = time::effective_length(&shift.start_time, &shift.end_time)?;
                    terms.push(length * var);
                }
            }
        }
        let h_var = h[&e];
        let sum: Expression = terms.into_iter().sum();
        constraints.push(constraint!(h_var == sum));
    }

    // 6. Off-day linkage.
    for e in 0..num_real {
        for (d, day_shifts) in request.shifts.iter().enumerate() {
            let work: Expression = (0..day_shifts.len())
                .filter_map(|s| x.get(&(d, s, Assignee::Real(e))).map(|&v| Expression::from(v)))
                .sum();
            let off_var = off[&(d, e)];
            constraints.push(constraint!(off_var + work == 1));
        }
    }

    // 7 & 8. Linearized AND gates for two/three consecutive off days.
    for e in 0..num_real {
        for d in 0..days.saturating_sub(1) {
            let t2 = two[&(d, e)];
            let off_d = off[&(d, e)];
            let off_d1 = off[&(d + 1, e)];
            constraints.push(constraint!(t2 <= off_d));
            constraints.push(constraint!(t2 <= off_d1));
            constraints.push(constraint!(t2 >= off_d + off_d1 - 1));
        }
        for d in 0..days.saturating_sub(2) {
            let t3 = three[&(d, e)];
            let off_d = off[&(d, e)];
            let off_d1 = off[&(d + 1, e)];
            let off_d2 = off[&(d + 2, e)];
            constraints.push(constraint!(t3 <= off_d));
            constraints.push(constraint!(t3 <= off_d1));
            constraints.push(constraint!(t3 <= off_d2));
            constraints.push(constraint!(t3 >= off_d + off_d1 + off_d2 - 2));
        }
    }

    // Objective: assignment + ranking bonus - placeholder penalty + off-block bonuses.
    let mut objective_terms: Vec<Expression> = Vec::new();
    for (d, day_shifts) in request.shifts.iter().enumerate() {
        for (s, shift) in day_shifts.iter().enumerate() {
            let n_c = shift.candidates.len() as f64;
            for e in 0..num_real {
                if let Some(&var) = x.get(&(d, s, Assignee::Real(e))) {
                    let rank = shift
                        .candidates
                        .iter()
                        .position(|c| c == &request.employees[e].id)
                        .unwrap_or(shift.candidates.len()) as f64;
                    let bonus = (n_c - rank).max(0.0);
                    objective_terms.push((profile.assign_w + bonus) * var);
                }
            }
            let placeholder_var = x[&(d, s, Assignee::Placeholder)];
            objective_terms.push(-profile.placeholder_p * placeholder_var);
        }
    }
    for e in 0..num_real {
        for d in 0..days.saturating_sub(2) {
            objective_terms.push(profile.bonus_3d * three[&(d, e)]);
        }
        for d in 0..days.saturating_sub(1) {
            objective_terms.push(profile.bonus_2d * two[&(d, e)]);
        }
    }
    let objective: Expression = objective_terms.into_iter().sum();

    let mut problem = vars.maximise(objective).using(default_solver);
    for c in constraints {
        problem = problem.with(c);
    }

    Ok((problem, VariableIndex { x }))
}

fn precheck_candidates(request: &AllocationRequest) -> Result<(), AllocationError> {
    let mut missing = Vec::new();
    for (d, day_shifts) in request.shifts.iter().enumerate() {
        for shift in day_shifts {
            if shift.candidates.is_empty() {
                missing.push(MissingCandidates {
                    day: d,
                    shift_id: shift.id.clone(),
                    role: shift.employee_role.clone(),
                });
            }
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AllocationError::NoCandidates(missing))
    }
}
