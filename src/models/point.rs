//! Salary spine points.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point on the salary spine, identified by an opaque label such as `"P3"`.
///
/// Points are ordered only by their position within a grade's scale; the
/// label itself carries no meaning to the engine.
///
/// # Example
///
/// ```
/// use oncost_engine::models::Point;
///
/// let point = Point::from("P3");
/// assert_eq!(point.as_str(), "P3");
/// assert_eq!(point.to_string(), "P3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point(String);

impl Point {
    /// Creates a point from a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the point's label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Point {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
