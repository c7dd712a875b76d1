//! Per-tax-year explanations of the expenditure/commitment split.

use serde::{Deserialize, Serialize};

use super::{Cost, SalaryRecord};

/// An explanation of the expenditure/commitment calculation for one tax-year
/// segment.
///
/// The aggregator emits one of these per segment, in chronological order,
/// so a caller can reproduce the full calculation for audit purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    /// Calendar year in which this segment's tax year started (a tax year
    /// runs from 6 April of `tax_year` to 5 April of `tax_year + 1`).
    pub tax_year: i32,
    /// Total base salary earned in this segment, in pounds.
    pub salary: i64,
    /// The portion of `salary` dated on or after the reference date, i.e.
    /// salary which is still to come.
    pub salary_to_come: i64,
    /// The part of the segment's total cost already spent as of the
    /// reference date.
    pub expenditure: i64,
    /// The part of the segment's total cost still committed. Always
    /// `cost.total - expenditure`.
    pub commitment: i64,
    /// The salary records explaining what the employee was paid during the
    /// segment and why.
    pub salaries: Vec<SalaryRecord>,
    /// The on-cost breakdown for the segment. `cost.tax_year` differs from
    /// `tax_year` when the rate table had no entry for this segment's year
    /// and the calculation fell back to the latest available year.
    pub cost: Cost,
}
