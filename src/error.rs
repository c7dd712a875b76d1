//! Error types for the on-cost engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during projection and costing.

use thiserror::Error;

use crate::models::{Grade, Point, Scheme};

/// The main error type for the on-cost engine.
///
/// All operations in the engine return this error type. No operation returns
/// a partial result: a computation either fully succeeds or fails with one of
/// these variants.
///
/// # Example
///
/// ```
/// use oncost_engine::error::EngineError;
///
/// let error = EngineError::UnsupportedYear { year: 2010 };
/// assert_eq!(
///     error.to_string(),
///     "No on-cost rates for tax year 2010 or any earlier year"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The rate table has no entry for the requested tax year or any earlier
    /// year. Note that a *later* missing year is not an error: lookups fall
    /// back to the greatest year at or before the requested one.
    #[error("No on-cost rates for tax year {year} or any earlier year")]
    UnsupportedYear {
        /// The tax year that was requested.
        year: i32,
    },

    /// The salary scale table has no entry for the grade/point combination.
    #[error("No salary scale entry for grade {grade:?}, point {point:?}")]
    UnknownGradeOrPoint {
        /// The grade that was requested, if any.
        grade: Option<Grade>,
        /// The spine point that was requested, if the lookup got that far.
        point: Option<Point>,
    },

    /// The supplied employment or reference dates are inconsistent.
    #[error("Invalid date range: {message}")]
    InvalidDateRange {
        /// A description of the inconsistency.
        message: String,
    },

    /// A loaded rate table has no pension parameters for a scheme.
    #[error("Rate table for tax year {year} does not cover scheme {scheme:?}")]
    SchemeNotCovered {
        /// The pension scheme that was requested.
        scheme: Scheme,
        /// The resolved tax year whose table was consulted.
        year: i32,
    },

    /// A table data file was not found at the specified path.
    #[error("Table file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A table data file could not be parsed.
    #[error("Failed to parse table file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A numeric result could not be represented.
    #[error("Calculation error: {message}")]
    Calculation {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
