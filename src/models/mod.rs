//! Core data models for the on-cost engine.
//!
//! All models are plain value objects: constructed fresh per calculation,
//! never mutated afterwards, and serialisable for downstream reporting.

mod cost;
mod explanation;
mod grade;
mod point;
mod salary_record;
mod scheme;

pub use cost::Cost;
pub use explanation::Explanation;
pub use grade::Grade;
pub use point::Point;
pub use salary_record::{ChangeReason, SalaryRecord};
pub use scheme::Scheme;
