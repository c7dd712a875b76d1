//! Salary progression over time.
//!
//! Models how an employee's salary changes between two dates as an ordered
//! list of [`SalaryRecord`]s. Three kinds of event move the state forward:
//! annual anniversary increments climb the grade's scale, new salary scale
//! versions re-price the current point, and UK tax-year boundaries (6
//! April) bracket the stream into tax-year segments for the cost
//! aggregation downstream.

use chrono::{Datelike, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{ChangeReason, Grade, Point, SalaryRecord};
use crate::tables::SalaryScaleTable;

/// First day of a UK tax year: 6 April of its identifying calendar year.
pub(crate) fn tax_year_start(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 4, 6).unwrap_or_default()
}

/// The tax year containing a date.
pub(crate) fn tax_year_of(date: NaiveDate) -> i32 {
    let year = date.year();
    if tax_year_start(year) > date {
        year - 1
    } else {
        year
    }
}

/// Event rules evaluated each step, in tie-break priority order: when
/// several events fall on the same date, increments apply before scale
/// changes, which apply before tax-year boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventRule {
    Anniversary,
    ScaleChange,
    TaxYearBoundary,
}

/// Models salary changes over `[start_date, until_date)`.
///
/// The stream opens with an `EmployeeStart` record at `start_date` and
/// closes with an `EndOfEmployment` record at `until_date`. In between:
///
/// - anniversary increments, annually from `next_anniversary_date`, advance
///   the employee one point up their grade's scale. Anniversaries that
///   produce no increment (top of scale, contribution points, no grade)
///   emit nothing but keep the annual schedule;
/// - salary scale changes, annually on the scale table's anchor date,
///   re-price the current point under the new version;
/// - each 6 April strictly inside the window emits an `EndOfTaxYear` record
///   followed by a `StartOfTaxYear` record on the same date.
///
/// The result is date-ordered (equal dates only where same-date events
/// chain) and a pure function of its inputs. A `next_anniversary_date`
/// before `start_date` is advanced in whole years first.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateRange`] unless
/// `start_date < until_date`, and [`EngineError::UnknownGradeOrPoint`] when
/// the grade or point is not covered by the scale table.
pub fn salary_progression(
    start_date: NaiveDate,
    until_date: NaiveDate,
    grade: Option<Grade>,
    point: &Point,
    next_anniversary_date: Option<NaiveDate>,
    scales: &SalaryScaleTable,
) -> EngineResult<Vec<SalaryRecord>> {
    if until_date <= start_date {
        return Err(EngineError::InvalidDateRange {
            message: format!("until date {until_date} is not after start date {start_date}"),
        });
    }

    let mut point = point.clone();
    let (mut base_salary, mut mapping_date) = scales.base_salary(grade, &point, start_date)?;

    let mut records = vec![SalaryRecord {
        date: start_date,
        reason: ChangeReason::EmployeeStart,
        grade,
        point: point.clone(),
        base_salary,
        mapping_date,
    }];

    let mut anniversary = next_anniversary_date.map(|mut date| {
        while date < start_date {
            date = add_year(date);
        }
        date
    });
    let mut next_table = scales.next_change_date(start_date);
    let mut next_boundary = tax_year_start(tax_year_of(start_date) + 1);

    loop {
        let candidates = [
            (anniversary, EventRule::Anniversary),
            (Some(next_table), EventRule::ScaleChange),
            (Some(next_boundary), EventRule::TaxYearBoundary),
        ];
        // min() honors the rule ordering on date ties.
        let (event_date, rule) = candidates
            .into_iter()
            .filter_map(|(date, rule)| date.map(|d| (d, rule)))
            .min()
            .unwrap_or((until_date, EventRule::TaxYearBoundary));
        if event_date >= until_date {
            break;
        }

        match rule {
            EventRule::Anniversary => {
                if let Some(grade_value) = grade {
                    if let Some(next) = scales.next_point(grade_value, &point)? {
                        let from = point.clone();
                        point = next;
                        (base_salary, mapping_date) =
                            scales.base_salary(grade, &point, event_date)?;
                        records.push(SalaryRecord {
                            date: event_date,
                            reason: ChangeReason::AnniversaryIncrement {
                                from,
                                to: point.clone(),
                            },
                            grade,
                            point: point.clone(),
                            base_salary,
                            mapping_date,
                        });
                    }
                }
                anniversary = Some(add_year(event_date));
            }
            EventRule::ScaleChange => {
                let snapshot = scales.snapshot_for(event_date);
                (base_salary, mapping_date) = scales.base_salary(grade, &point, event_date)?;
                records.push(SalaryRecord {
                    date: event_date,
                    reason: ChangeReason::NewSalaryTable {
                        approximate: snapshot.approximate,
                    },
                    grade,
                    point: point.clone(),
                    base_salary,
                    mapping_date,
                });
                next_table = scales.next_change_date(event_date);
            }
            EventRule::TaxYearBoundary => {
                for reason in [ChangeReason::EndOfTaxYear, ChangeReason::StartOfTaxYear] {
                    records.push(SalaryRecord {
                        date: event_date,
                        reason,
                        grade,
                        point: point.clone(),
                        base_salary,
                        mapping_date,
                    });
                }
                next_boundary = tax_year_start(tax_year_of(event_date) + 1);
            }
        }
    }

    records.push(SalaryRecord {
        date: until_date,
        reason: ChangeReason::EndOfEmployment,
        grade,
        point,
        base_salary,
        mapping_date,
    });

    Ok(records)
}

/// The same day one year later, rolling 29 February to 1 March.
fn add_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year() + 1, date.month(), date.day())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(date.year() + 1, 3, 1).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::TableLoader;

    fn example_table() -> SalaryScaleTable {
        TableLoader::scales_from_str(include_str!("../../data/example_salary_scales.yaml"))
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Records that change the salary, skipping the tax-year bracketing.
    fn changes(records: &[SalaryRecord]) -> Vec<(NaiveDate, String, i64)> {
        records
            .iter()
            .filter(|r| {
                !matches!(
                    r.reason,
                    ChangeReason::StartOfTaxYear
                        | ChangeReason::EndOfTaxYear
                        | ChangeReason::EndOfEmployment
                )
            })
            .map(|r| (r.date, r.point.as_str().to_string(), r.base_salary))
            .collect()
    }

    #[test]
    fn test_tax_year_of_respects_april_boundary() {
        assert_eq!(tax_year_of(date(2018, 4, 6)), 2018);
        assert_eq!(tax_year_of(date(2018, 4, 5)), 2017);
        assert_eq!(tax_year_of(date(2018, 12, 31)), 2018);
        assert_eq!(tax_year_of(date(2019, 1, 1)), 2018);
    }

    #[test]
    fn test_seven_year_progression_for_grade_2_starter() {
        let table = example_table();
        let records = salary_progression(
            date(2016, 1, 1),
            date(2023, 1, 1),
            Some(Grade::Grade2),
            &Point::from("P3"),
            Some(date(2016, 6, 1)),
            &table,
        )
        .unwrap();

        assert_eq!(
            changes(&records),
            vec![
                (date(2016, 1, 1), "P3".to_string(), 14539),
                (date(2016, 6, 1), "P4".to_string(), 14818),
                (date(2016, 8, 1), "P4".to_string(), 15052),
                (date(2017, 6, 1), "P5".to_string(), 15356),
                (date(2017, 8, 1), "P5".to_string(), 15721),
                (date(2018, 8, 1), "P5".to_string(), 16035),
                (date(2019, 8, 1), "P5".to_string(), 16356),
                (date(2020, 8, 1), "P5".to_string(), 16683),
                (date(2021, 8, 1), "P5".to_string(), 17017),
                (date(2022, 8, 1), "P5".to_string(), 17357),
            ]
        );

        assert_eq!(records[0].reason, ChangeReason::EmployeeStart);
        assert_eq!(
            records.last().map(|r| (r.date, r.reason.clone())),
            Some((date(2023, 1, 1), ChangeReason::EndOfEmployment))
        );
        assert_eq!(
            records
                .iter()
                .filter(|r| r.reason == ChangeReason::AnniversaryIncrement {
                    from: Point::from("P3"),
                    to: Point::from("P4"),
                })
                .count(),
            1
        );
        // 2018-08-01 onwards the scale version is extrapolated.
        assert_eq!(
            records
                .iter()
                .filter(|r| r.reason == ChangeReason::NewSalaryTable { approximate: true })
                .count(),
            5
        );
    }

    #[test]
    fn test_tax_year_boundaries_emit_end_start_pairs() {
        let table = example_table();
        let records = salary_progression(
            date(2016, 1, 1),
            date(2018, 1, 1),
            Some(Grade::Grade2),
            &Point::from("P3"),
            None,
            &table,
        )
        .unwrap();

        let boundaries: Vec<(NaiveDate, ChangeReason)> = records
            .iter()
            .filter(|r| {
                matches!(
                    r.reason,
                    ChangeReason::StartOfTaxYear | ChangeReason::EndOfTaxYear
                )
            })
            .map(|r| (r.date, r.reason.clone()))
            .collect();
        assert_eq!(
            boundaries,
            vec![
                (date(2016, 4, 6), ChangeReason::EndOfTaxYear),
                (date(2016, 4, 6), ChangeReason::StartOfTaxYear),
                (date(2017, 4, 6), ChangeReason::EndOfTaxYear),
                (date(2017, 4, 6), ChangeReason::StartOfTaxYear),
            ]
        );
        // The pair carries the salary in force across the boundary.
        assert_eq!(records[1].base_salary, records[2].base_salary);
    }

    #[test]
    fn test_records_are_date_ordered_and_end_at_until_date() {
        let table = example_table();
        let records = salary_progression(
            date(2015, 4, 1),
            date(2020, 10, 1),
            Some(Grade::Grade2),
            &Point::from("P3"),
            Some(date(2016, 6, 1)),
            &table,
        )
        .unwrap();
        assert!(records.windows(2).all(|pair| pair[0].date <= pair[1].date));
        assert_eq!(records.last().map(|r| r.date), Some(date(2020, 10, 1)));
    }

    #[test]
    fn test_no_increment_anniversaries_emit_nothing() {
        let table = example_table();
        // P5 is the top incrementable point on grade 2.
        let records = salary_progression(
            date(2018, 1, 1),
            date(2020, 1, 1),
            Some(Grade::Grade2),
            &Point::from("P5"),
            Some(date(2018, 6, 1)),
            &table,
        )
        .unwrap();
        assert!(records
            .iter()
            .all(|r| !matches!(r.reason, ChangeReason::AnniversaryIncrement { .. })));
    }

    #[test]
    fn test_ungraded_employee_never_increments() {
        let table = example_table();
        let records = salary_progression(
            date(2016, 1, 1),
            date(2018, 1, 1),
            None,
            &Point::from("P3"),
            Some(date(2016, 6, 1)),
            &table,
        )
        .unwrap();
        assert!(records.iter().all(|r| r.point == Point::from("P3")));
        assert!(records
            .iter()
            .all(|r| !matches!(r.reason, ChangeReason::AnniversaryIncrement { .. })));
    }

    #[test]
    fn test_anniversary_before_start_advances_into_window() {
        let table = example_table();
        let records = salary_progression(
            date(2017, 4, 6),
            date(2018, 4, 6),
            Some(Grade::Grade2),
            &Point::from("P4"),
            Some(date(2016, 6, 1)),
            &table,
        )
        .unwrap();
        let increment = records
            .iter()
            .find(|r| matches!(r.reason, ChangeReason::AnniversaryIncrement { .. }))
            .expect("the 2017 anniversary falls inside the window");
        assert_eq!(increment.date, date(2017, 6, 1));
        assert_eq!(increment.point, Point::from("P5"));
    }

    #[test]
    fn test_leap_day_anniversary_rolls_to_first_of_march() {
        let table = example_table();
        let records = salary_progression(
            date(2016, 1, 1),
            date(2018, 1, 1),
            Some(Grade::Grade2),
            &Point::from("P3"),
            Some(date(2016, 2, 29)),
            &table,
        )
        .unwrap();
        let increments: Vec<(NaiveDate, String, i64)> = records
            .iter()
            .filter(|r| matches!(r.reason, ChangeReason::AnniversaryIncrement { .. }))
            .map(|r| (r.date, r.point.as_str().to_string(), r.base_salary))
            .collect();
        // 2017 is not a leap year, so the second anniversary lands on 1 March.
        assert_eq!(
            increments,
            vec![
                (date(2016, 2, 29), "P4".to_string(), 14818),
                (date(2017, 3, 1), "P5".to_string(), 15356),
            ]
        );
    }

    #[test]
    fn test_empty_window_is_rejected() {
        let table = example_table();
        let err = salary_progression(
            date(2018, 1, 1),
            date(2018, 1, 1),
            Some(Grade::Grade2),
            &Point::from("P3"),
            None,
            &table,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_until_on_tax_year_boundary_ends_employment_not_year() {
        let table = example_table();
        let records = salary_progression(
            date(2016, 5, 1),
            date(2017, 4, 6),
            Some(Grade::Grade2),
            &Point::from("P3"),
            None,
            &table,
        )
        .unwrap();
        assert!(records
            .iter()
            .all(|r| !matches!(r.reason, ChangeReason::EndOfTaxYear)));
        assert_eq!(
            records.last().map(|r| r.reason.clone()),
            Some(ChangeReason::EndOfEmployment)
        );
    }
}
