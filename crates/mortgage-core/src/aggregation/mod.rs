pub mod cumulative;
pub mod totals;
