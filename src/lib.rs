//! Hardy-Rand-Rittler plate test screening: per-sitting classification,
//! an append-only record table and prevalence statistics over it.

pub mod error;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod store;
