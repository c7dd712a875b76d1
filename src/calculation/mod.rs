//! Cost and projection calculations.

pub mod commitments;
pub mod oncost;
pub mod progression;
pub mod rounding;
pub mod tax;

pub use commitments::{
    costs_by_tax_year, employment_expenditure_and_commitments, Employment, Projection,
    TaxYearCosts,
};
pub use oncost::{calculate_cost, calculate_cost_with_table};
pub use progression::salary_progression;
