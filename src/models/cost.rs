//! On-cost calculation results.

use serde::{Deserialize, Serialize};

/// An individual on-cost calculation for a base salary.
///
/// All monetary values are rounded to the nearest pound, so `total` may
/// differ from the sum of the other fields by up to a pound.
///
/// # Example
///
/// ```
/// use oncost_engine::calculation::calculate_cost;
/// use oncost_engine::models::Scheme;
/// use oncost_engine::tables::TaxYear;
///
/// let cost = calculate_cost(25000, Scheme::Uss, TaxYear::Year(2018)).unwrap();
/// assert_eq!(cost.employer_pension, 4500);
/// assert_eq!(cost.total, 31912);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    /// Base salary for the employee, in pounds.
    pub salary: i64,
    /// Amount of base salary exchanged as part of a salary exchange pension.
    /// By convention this value is negative if non-zero, matching the
    /// published HR tables.
    pub exchange: i64,
    /// Employer pension contribution including any salary exchange amount.
    pub employer_pension: i64,
    /// Employer National Insurance contribution.
    pub employer_nic: i64,
    /// Share of the Apprenticeship Levy attributed to this employee.
    pub apprenticeship_levy: i64,
    /// Total on-cost of employing this employee.
    pub total: i64,
    /// The tax year whose rate table was actually used. This differs from the
    /// requested year when the lookup fell back to another year, which
    /// callers should surface as an approximation.
    pub tax_year: i32,
}
