//! Rounding conventions used by the cost calculations.
//!
//! Published on-cost tables are produced in Excel, whose ROUND function
//! rounds exact halves up rather than to the nearest even value. Matching
//! those tables to the pound requires reproducing that rule. Aggregate
//! salaries, by contrast, are rounded half-to-even, matching the convention
//! of the finance reports they feed.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult};

/// Rounds to a whole number with exact halves rounding up (towards positive
/// infinity), as Excel's ROUND does for the values in on-cost tables.
///
/// Non-halves round to the nearest whole number.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use oncost_engine::calculation::rounding::excel_round;
///
/// assert_eq!(excel_round(Decimal::new(25, 1)), Decimal::from(3));
/// assert_eq!(excel_round(Decimal::new(-25, 1)), Decimal::from(-2));
/// ```
pub fn excel_round(value: Decimal) -> Decimal {
    let floor = value.floor();
    if value - floor == Decimal::new(5, 1) {
        floor + Decimal::ONE
    } else {
        value.round()
    }
}

/// Rounds with [`excel_round`] and converts to a whole number of pounds.
pub fn to_pounds(value: Decimal) -> EngineResult<i64> {
    excel_round(value)
        .to_i64()
        .ok_or_else(|| EngineError::Calculation {
            message: format!("amount {value} out of range for whole pounds"),
        })
}

/// Rounds half-to-even and converts to a whole number of pounds.
pub fn half_even_pounds(value: Decimal) -> EngineResult<i64> {
    value.round().to_i64().ok_or_else(|| EngineError::Calculation {
        message: format!("amount {value} out of range for whole pounds"),
    })
}
