//! Salary progression records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Grade, Point};

/// Why a salary progression record was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeReason {
    /// The employee's contract started.
    EmployeeStart,
    /// A UK tax year began (6 April).
    StartOfTaxYear,
    /// A UK tax year ended (6 April of the following calendar year).
    EndOfTaxYear,
    /// The employee's contract ended.
    EndOfEmployment,
    /// An annual anniversary increment moved the employee to the next point.
    AnniversaryIncrement {
        /// The point before the increment.
        from: Point,
        /// The point after the increment.
        to: Point,
    },
    /// A new salary scale version took effect at the same grade and point.
    NewSalaryTable {
        /// True when the scale version is an extrapolation rather than a
        /// published table.
        approximate: bool,
    },
}

impl fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeReason::EmployeeStart => f.write_str("employee start"),
            ChangeReason::StartOfTaxYear => f.write_str("start of tax year"),
            ChangeReason::EndOfTaxYear => f.write_str("end of tax year"),
            ChangeReason::EndOfEmployment => f.write_str("end of employment"),
            ChangeReason::AnniversaryIncrement { from, to } => {
                write!(f, "anniversary: point {from} to {to}")
            }
            ChangeReason::NewSalaryTable { approximate: false } => {
                f.write_str("new salary table")
            }
            ChangeReason::NewSalaryTable { approximate: true } => {
                f.write_str("new salary table (approximate)")
            }
        }
    }
}

/// One row in an employee's salary progression trail.
///
/// A progression is an ordered sequence of these records; each records the
/// salary in force from its `date` until the date of the next record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Date at which this salary takes effect.
    pub date: NaiveDate,
    /// Why this record was emitted.
    pub reason: ChangeReason,
    /// Grade of the employee, if they are on a graded scale.
    pub grade: Option<Grade>,
    /// The employee's spine point.
    pub point: Point,
    /// Annual full-time-equivalent base salary in pounds.
    pub base_salary: i64,
    /// Effective date of the scale version the salary was read from.
    pub mapping_date: NaiveDate,
}
