//! Pure calculations: targets from a profile and totals from a food log.

pub mod aggregate;
pub mod targets;
