//! Salary scale tables.
//!
//! This module provides the [`SalaryScaleTable`]: a mapping from grade and
//! spine point to an annual full-time-equivalent salary, versioned by
//! effective date. A query with a date returns the value from the latest
//! version effective at or before that date.
//!
//! Published versions only exist for years where the nationally negotiated
//! pay settlement is known. For other years, future and past alike, the
//! table extrapolates from the latest published version by a fixed annual
//! change (2% by default), compounded per year. Extrapolated values are
//! flagged so downstream records can be marked approximate.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Grade, Point};

/// One row of a grade's salary scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleRow {
    /// The name of this point on the grade's own scale.
    pub name: String,
    /// The spine point, as used in the point-to-salary mappings.
    pub point: Point,
    /// True if this is a contribution point. Contribution points are not
    /// reached (or left) by annual anniversary increments.
    #[serde(rename = "contribution")]
    pub is_contribution: bool,
}

/// One effective-dated version of the point-to-salary mapping.
#[derive(Debug, Clone, Deserialize)]
pub struct ScaleVersion {
    /// The date from which this version applies.
    pub effective_date: NaiveDate,
    /// Spine point to annual full-time-equivalent salary, in pounds.
    pub mapping: HashMap<Point, i64>,
}

/// A resolved scale version for a particular date.
///
/// `approximate` is true when the version is extrapolated rather than
/// published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleSnapshot {
    /// The date from which the resolved version applies.
    pub effective_date: NaiveDate,
    /// True when the version is an extrapolation.
    pub approximate: bool,
}

/// An immutable, effective-dated salary scale table.
///
/// Loaded once at process start and shared read-only between callers.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use oncost_engine::models::Grade;
/// use oncost_engine::tables::TableLoader;
///
/// let table = TableLoader::scales_from_str(
///     include_str!("../../data/example_salary_scales.yaml"),
/// )
/// .unwrap();
/// let point = table.starting_point_for_grade(Grade::Grade2).unwrap();
/// let (salary, mapping_date) = table
///     .base_salary(Some(Grade::Grade2), &point, NaiveDate::from_ymd_opt(2017, 1, 1).unwrap())
///     .unwrap();
/// assert_eq!(salary, 14767);
/// assert_eq!(mapping_date, NaiveDate::from_ymd_opt(2016, 8, 1).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct SalaryScaleTable {
    grades: HashMap<Grade, Vec<ScaleRow>>,
    /// Published versions in ascending order of effective date.
    versions: Vec<ScaleVersion>,
    /// Annual multiplier used to extrapolate unpublished versions.
    annual_change: Decimal,
}

impl SalaryScaleTable {
    /// The default annual multiplier for extrapolated versions: 1.02.
    pub fn default_annual_change() -> Decimal {
        Decimal::new(102, 2)
    }

    /// Creates a scale table from grade scales and published versions.
    ///
    /// Fails if `versions` is empty: with no published version there is
    /// nothing to extrapolate from.
    pub fn new(
        grades: HashMap<Grade, Vec<ScaleRow>>,
        mut versions: Vec<ScaleVersion>,
        annual_change: Decimal,
    ) -> EngineResult<Self> {
        if versions.is_empty() {
            return Err(EngineError::Calculation {
                message: "salary scale table must contain at least one version".to_string(),
            });
        }
        versions.sort_by_key(|v| v.effective_date);
        Ok(Self {
            grades,
            versions,
            annual_change,
        })
    }

    /// Returns the salary scale for a grade, ordered by increment
    /// progression.
    pub fn scale_for_grade(&self, grade: Grade) -> EngineResult<&[ScaleRow]> {
        self.grades
            .get(&grade)
            .map(Vec::as_slice)
            .ok_or(EngineError::UnknownGradeOrPoint {
                grade: Some(grade),
                point: None,
            })
    }

    /// Returns the point a new starter on a grade begins at: the first point
    /// of the grade's scale.
    pub fn starting_point_for_grade(&self, grade: Grade) -> EngineResult<Point> {
        let scale = self.scale_for_grade(grade)?;
        scale
            .first()
            .map(|row| row.point.clone())
            .ok_or(EngineError::UnknownGradeOrPoint {
                grade: Some(grade),
                point: None,
            })
    }

    /// Returns the point reached from `point` by one annual anniversary
    /// increment, or `None` when no further increment applies.
    ///
    /// Increments stop at the top of the scale and never move onto (or off)
    /// a contribution point.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownGradeOrPoint`] when `point` is not part
    /// of the grade's scale.
    pub fn next_point(&self, grade: Grade, point: &Point) -> EngineResult<Option<Point>> {
        let scale = self.scale_for_grade(grade)?;
        let index = scale
            .iter()
            .position(|row| &row.point == point)
            .ok_or_else(|| EngineError::UnknownGradeOrPoint {
                grade: Some(grade),
                point: Some(point.clone()),
            })?;

        if index == scale.len() - 1 || scale[index].is_contribution {
            return Ok(None);
        }
        let next = &scale[index + 1];
        if next.is_contribution {
            return Ok(None);
        }
        Ok(Some(next.point.clone()))
    }

    /// Resolves the scale version in effect on a date.
    ///
    /// Versions take effect annually on the anchor day, the month and day
    /// of the latest published version. Years with a published version on
    /// that day resolve to it; any other year resolves to an extrapolation.
    pub fn snapshot_for(&self, as_of: NaiveDate) -> ScaleSnapshot {
        let (month, day) = self.anchor();
        let mut year = as_of.year();
        if anchor_date(year, month, day) > as_of {
            year -= 1;
        }
        let effective_date = anchor_date(year, month, day);
        let approximate = !self
            .versions
            .iter()
            .any(|v| v.effective_date == effective_date);
        ScaleSnapshot {
            effective_date,
            approximate,
        }
    }

    /// Returns the first date strictly after `after` at which the scale
    /// changes (a new version, published or extrapolated, taking effect).
    pub fn next_change_date(&self, after: NaiveDate) -> NaiveDate {
        let (month, day) = self.anchor();
        let this_year = anchor_date(after.year(), month, day);
        if this_year > after {
            this_year
        } else {
            anchor_date(after.year() + 1, month, day)
        }
    }

    /// Returns the salary for a point under a resolved scale version, or
    /// `None` if the version does not include the point.
    pub fn salary_in(&self, snapshot: &ScaleSnapshot, point: &Point) -> Option<i64> {
        if snapshot.approximate {
            let latest = self.latest_version();
            let value = *latest.mapping.get(point)?;
            let years = snapshot.effective_date.year() - latest.effective_date.year();
            self.extrapolate(value, years)
        } else {
            self.versions
                .iter()
                .find(|v| v.effective_date == snapshot.effective_date)
                .and_then(|v| v.mapping.get(point).copied())
        }
    }

    /// Returns the base salary for a grade and point as of a date, along
    /// with the effective date of the scale version used.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownGradeOrPoint`] when the grade is
    /// unknown, the point is not on the grade's scale, or the resolved scale
    /// version has no value for the point.
    pub fn base_salary(
        &self,
        grade: Option<Grade>,
        point: &Point,
        as_of: NaiveDate,
    ) -> EngineResult<(i64, NaiveDate)> {
        if let Some(grade) = grade {
            let scale = self.scale_for_grade(grade)?;
            if !scale.iter().any(|row| &row.point == point) {
                return Err(EngineError::UnknownGradeOrPoint {
                    grade: Some(grade),
                    point: Some(point.clone()),
                });
            }
        }
        let snapshot = self.snapshot_for(as_of);
        let salary = self.salary_in(&snapshot, point).ok_or_else(|| {
            EngineError::UnknownGradeOrPoint {
                grade,
                point: Some(point.clone()),
            }
        })?;
        Ok((salary, snapshot.effective_date))
    }

    /// Effective dates of the published versions, in ascending order.
    pub fn version_dates(&self) -> Vec<NaiveDate> {
        self.versions.iter().map(|v| v.effective_date).collect()
    }

    fn latest_version(&self) -> &ScaleVersion {
        // The constructor guarantees at least one version.
        &self.versions[self.versions.len() - 1]
    }

    /// The month and day on which scale versions take effect.
    fn anchor(&self) -> (u32, u32) {
        let date = self.latest_version().effective_date;
        (date.month(), date.day())
    }

    /// Compounds the latest published value by the annual change over
    /// `years` (which may be negative), rounding half-to-even to whole
    /// pounds.
    fn extrapolate(&self, value: i64, years: i32) -> Option<i64> {
        let mut v = Decimal::from(value);
        if years >= 0 {
            for _ in 0..years {
                v *= self.annual_change;
            }
        } else {
            for _ in 0..-years {
                v /= self.annual_change;
            }
        }
        v.round().to_i64()
    }
}

/// The anchor date for a year, rolling 29 February to 1 March when the year
/// is not a leap year.
fn anchor_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 3, 1).unwrap_or_default())
}
