//! Domain model for the weekly shift allocator.
//!
//! Every entity here is request-scoped: inputs are immutable, outputs are
//! freshly constructed, and nothing survives a single call to
//! [`crate::allocator::allocate`].

use serde::{Deserialize, Serialize};

/// Number of days in the planning week. The allocator is otherwise agnostic
/// about which weekday index 0 means; callers conventionally use Sunday=0.
pub const DAYS_IN_WEEK: usize = 7;

/// Color used for any shift that ends up unassigned, or for an employee
/// that did not supply one of their own.
pub const DEFAULT_COLOR: &str = "bg-gray-500";

pub type EmployeeId = String;
pub type ShiftId = String;

/// An atomic work slot. `day` is deliberately not a field here: per the
/// request shape (spec §6), a shift's day is its position in the outer
/// `shifts[day]` array, not something the client states redundantly — the
/// same way `examples/original_source/app/api/routes.py` derives `"day"`
/// from the enclosing loop index when building its response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: ShiftId,
    pub start_time: String,
    pub end_time: String,
    /// Ordered by preference; earlier entries are preferred candidates.
    pub candidates: Vec<EmployeeId>,
    pub employee_role: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// A half-open `[start, end)` interval on a given day during which an
/// employee cannot be assigned to any overlapping shift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnavailableWindow {
    pub day: usize,
    #[serde(rename = "timeFrame")]
    pub time_frame: TimeFrame,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeFrame {
    pub start: String,
    pub end: String,
}

/// A member of staff eligible for assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    /// Upper bound on weekly paid hours considered during the MIP stage.
    /// `None` denotes "no cap" (modeled internally as a large sentinel,
    /// see [`crate::model::UNCAPPED_HOURS`]).
    pub contract_hours: Option<f64>,
    #[serde(default, rename = "unavailableDates")]
    pub unavailable_dates: Vec<UnavailableWindow>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Employee {
    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }
}

/// Synthetic assignee used inside the MIP to represent "nobody assigned".
/// Kept as a tagged variant rather than a real entry in `employees` so rest
/// and contract-hour bookkeeping never has to special-case it by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assignee {
    Real(usize),
    Placeholder,
}

pub const UNASSIGNED: &str = "unassigned";

/// A [`Shift`] extended with the resolved assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedShift {
    pub id: ShiftId,
    pub day: usize,
    pub start_time: String,
    pub end_time: String,
    pub employee_role: String,
    pub candidates: Vec<EmployeeId>,
    pub employee: String,
    pub final_candidate: String,
    pub color: String,
}

impl AssignedShift {
    pub fn unassigned(shift: &Shift, day: usize) -> Self {
        Self {
            id: shift.id.clone(),
            day,
            start_time: shift.start_time.clone(),
            end_time: shift.end_time.clone(),
            employee_role: shift.employee_role.clone(),
            candidates: shift.candidates.clone(),
            employee: UNASSIGNED.to_string(),
            final_candidate: UNASSIGNED.to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }

    pub fn assigned_to(shift: &Shift, day: usize, employee: &Employee) -> Self {
        Self {
            id: shift.id.clone(),
            day,
            start_time: shift.start_time.clone(),
            end_time: shift.end_time.clone(),
            employee_role: shift.employee_role.clone(),
            candidates: shift.candidates.clone(),
            employee: employee.id.clone(),
            final_candidate: employee.id.clone(),
            color: employee.color_or_default().to_string(),
        }
    }

    pub fn is_unassigned(&self) -> bool {
        self.employee == UNASSIGNED
    }
}

/// Day-indexed mapping of shifts to their final assignment, with exactly
/// one record per input shift, in the input shift's original per-day order.
/// Serialized as `{"shifts": [[AssignedShift]]}` per spec §6 — the field is
/// named `days` in Rust because that's what it actually indexes, but the
/// wire shape is fixed by the spec's response contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(rename = "shifts")]
    pub days: Vec<Vec<AssignedShift>>,
}

impl WeeklySchedule {
    pub fn new(days: usize) -> Self {
        Self {
            days: vec![Vec::new(); days],
        }
    }
}

/// Rest-priority parameter selecting the objective weight profile (§4.2).
pub type RestPriority = u8;

/// The validated input to a single allocation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    /// `shifts[day]` is the ordered list of shifts owned by that day.
    pub shifts: Vec<Vec<Shift>>,
    pub employees: Vec<Employee>,
    #[serde(default = "default_rest_priority")]
    pub rest_priority: RestPriority,
}

fn default_rest_priority() -> RestPriority {
    3
}
