//! Benchmark for the full two-stage allocation pipeline.
//!
//! Run with: cargo run --release --bin bench

use std::time::Instant;

use shift_allocator::{allocator, demo_data};

fn main() {
    let request = demo_data::generate(demo_data::DemoData::Large);
    let n_shifts: usize = request.shifts.iter().map(|d| d.len()).sum();
    let n_employees = request.employees.len();

    println!("Benchmark: two-stage allocation (MIP + greedy repair)");
    println!("  Shifts: {}", n_shifts);
    println!("  Employees: {}", n_employees);
    println!();

    let start = Instant::now();
    let schedule = allocator::allocate(request).expect("allocation failed");
    let elapsed = start.elapsed();

    let assigned = schedule
        .days
        .iter()
        .flatten()
        .filter(|s| !s.is_unassigned())
        .count();

    println!("Results:");
    println!("  Time: {:.2?}", elapsed);
    println!("  Assigned: {}/{}", assigned, n_shifts);
}
