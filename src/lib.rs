//! Employer on-cost and salary commitment projection engine
//!
//! This crate calculates the total cost of employing university staff:
//! pension contributions, salary exchange, employer National Insurance and
//! the apprenticeship levy on top of base salary. It models salary
//! progression across tax years (anniversary increments and annual scale
//! changes) and splits multi-year contract costs into expenditure already
//! incurred and commitments still to come.

#![warn(missing_docs)]

pub mod calculation;
pub mod error;
pub mod models;
pub mod tables;

pub use calculation::{
    calculate_cost, costs_by_tax_year, employment_expenditure_and_commitments, Employment,
    Projection,
};
pub use error::{EngineError, EngineResult};
pub use models::{ChangeReason, Cost, Explanation, Grade, Point, SalaryRecord, Scheme};
pub use tables::{RateTable, SalaryScaleTable, TableLoader, TaxYear};
