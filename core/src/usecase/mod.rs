pub mod cumulative_electrical;
pub mod cumulative_production;
