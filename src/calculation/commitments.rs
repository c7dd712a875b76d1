//! Multi-year cost projection and the expenditure/commitment split.
//!
//! Consumes the salary progression stream, partitions it into tax-year
//! segments at the boundary records, prices each segment with the per-year
//! on-cost calculation, and splits each segment's total around a reference
//! date: spending attributed to days already worked is expenditure, the
//! rest is commitment.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::oncost::calculate_cost_with_table;
use crate::calculation::progression::{salary_progression, tax_year_of, tax_year_start};
use crate::calculation::rounding::half_even_pounds;
use crate::error::{EngineError, EngineResult};
use crate::models::{ChangeReason, Cost, Explanation, Grade, Point, SalaryRecord, Scheme};
use crate::tables::{RateTable, SalaryScaleTable, TaxYear};

/// The terms of an employment contract to project costs for.
#[derive(Debug, Clone)]
pub struct Employment {
    /// Grade, or `None` for an employee paid off-scale at a bare point.
    /// Ungraded employees receive no anniversary increments.
    pub grade: Option<Grade>,
    /// Spine point at the start of the projection.
    pub point: Point,
    /// Pension scheme.
    pub scheme: Scheme,
    /// First day of employment, or `None` when employment began before the
    /// projection window (projection then starts at the reference date).
    pub start_date: Option<NaiveDate>,
    /// First day on which the employee is no longer employed.
    pub until_date: NaiveDate,
    /// Next anniversary increment date, or `None` when increments do not
    /// apply.
    pub next_anniversary_date: Option<NaiveDate>,
    /// Proportion of full time worked. On-costs do not scale linearly with
    /// occupancy, so this must be applied before the cost calculation.
    pub occupancy: Decimal,
}

impl Employment {
    /// Creates a full-time employment with no start or anniversary date.
    pub fn new(grade: Option<Grade>, point: Point, scheme: Scheme, until_date: NaiveDate) -> Self {
        Self {
            grade,
            point,
            scheme,
            start_date: None,
            until_date,
            next_anniversary_date: None,
            occupancy: Decimal::ONE,
        }
    }
}

/// The cost of one tax year of an employment, with the salary records
/// explaining it.
#[derive(Debug, Clone)]
pub struct TaxYearCosts {
    /// The tax year, identified by the calendar year it starts in.
    pub year: i32,
    /// The on-cost breakdown for the year's total base salary.
    pub cost: Cost,
    /// The salary records covering the year, bracketed by start and end
    /// records.
    pub salaries: Vec<SalaryRecord>,
}

/// The result of an expenditure and commitment projection.
#[derive(Debug, Clone)]
pub struct Projection {
    /// Total spending attributed to days before the reference date.
    pub expenditure: i64,
    /// Total spending attributed to days on or after the reference date.
    pub commitment: i64,
    /// Per-tax-year breakdown.
    pub explanations: Vec<Explanation>,
}

/// Calculates the employment cost of each tax year from `start_date` until
/// the employment's `until_date`.
///
/// The salary progression is partitioned into tax-year segments at its
/// boundary records. Each segment's base salary is the day-weighted sum of
/// its records scaled by occupancy, rounded half-to-even; the segment is
/// then priced for its tax year.
///
/// Years outside the rate table fall back to its latest year; the
/// substitution is visible in [`Cost::tax_year`].
pub fn costs_by_tax_year(
    employment: &Employment,
    start_date: NaiveDate,
    scales: &SalaryScaleTable,
    rates: &RateTable,
) -> EngineResult<Vec<TaxYearCosts>> {
    let records = salary_progression(
        start_date,
        employment.until_date,
        employment.grade,
        &employment.point,
        employment.next_anniversary_date,
        scales,
    )?;

    let mut results = Vec::new();
    for salaries in segments(records) {
        let first = salaries.first().ok_or_else(|| EngineError::Calculation {
            message: "empty tax year segment".to_string(),
        })?;
        let year = tax_year_of(first.date);
        let tax_year_days = (tax_year_start(year + 1) - tax_year_start(year)).num_days();

        let total_salary = segment_salary(&salaries, tax_year_days, employment.occupancy, None)?;
        let cost = cost_with_fallback(total_salary, employment.scheme, year, rates)?;
        debug!(year, total_salary, total = cost.total, "calculated tax year cost");

        results.push(TaxYearCosts {
            year,
            cost,
            salaries,
        });
    }

    Ok(results)
}

/// Projects expenditure and remaining commitments for an employment
/// contract around a reference date.
///
/// Spending attributed to days before `from_date` counts as expenditure;
/// the rest is commitment. The split is made per tax-year segment by
/// weighting the segment's total cost by the share of its base salary still
/// to be earned on the reference date, so the segment straddling the
/// reference date splits by salary rather than by days.
///
/// Projection starts at the employment's start date, or at `from_date` when
/// no start date is given, and runs until its `until_date`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateRange`] when `until_date` is not after
/// the start, when `from_date` falls outside the employment, or when
/// `occupancy` is not positive.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use oncost_engine::calculation::commitments::{
///     employment_expenditure_and_commitments, Employment,
/// };
/// use oncost_engine::models::{Grade, Point, Scheme};
/// use oncost_engine::tables::{RateTable, TableLoader};
///
/// let scales = TableLoader::scales_from_str(
///     include_str!("../../data/example_salary_scales.yaml"),
/// )
/// .unwrap();
/// let mut employment = Employment::new(
///     Some(Grade::Grade2),
///     Point::from("P3"),
///     Scheme::UssExchange,
///     NaiveDate::from_ymd_opt(2018, 1, 22).unwrap(),
/// );
/// employment.next_anniversary_date = NaiveDate::from_ymd_opt(2016, 6, 1);
/// let projection = employment_expenditure_and_commitments(
///     &employment,
///     NaiveDate::from_ymd_opt(2015, 4, 28).unwrap(),
///     &scales,
///     RateTable::builtin(),
/// )
/// .unwrap();
/// assert_eq!(projection.expenditure, 0);
/// assert_eq!(projection.commitment, 50060);
/// ```
pub fn employment_expenditure_and_commitments(
    employment: &Employment,
    from_date: NaiveDate,
    scales: &SalaryScaleTable,
    rates: &RateTable,
) -> EngineResult<Projection> {
    if employment.occupancy <= Decimal::ZERO {
        return Err(EngineError::InvalidDateRange {
            message: format!("occupancy {} is not positive", employment.occupancy),
        });
    }
    let start_date = employment.start_date.unwrap_or(from_date);
    if from_date < start_date || from_date > employment.until_date {
        return Err(EngineError::InvalidDateRange {
            message: format!(
                "reference date {from_date} is outside the employment ({start_date} to {})",
                employment.until_date
            ),
        });
    }

    let all_costs = costs_by_tax_year(employment, start_date, scales, rates)?;

    let mut explanations = Vec::with_capacity(all_costs.len());
    let mut total_expenditure = 0;
    let mut total_commitment = 0;

    for TaxYearCosts {
        year,
        cost,
        salaries,
    } in all_costs
    {
        let tax_year_days = (tax_year_start(year + 1) - tax_year_start(year)).num_days();

        // Base salary still to be earned on or after the reference date.
        let salary_to_come = segment_salary(
            &salaries,
            tax_year_days,
            employment.occupancy,
            Some(from_date),
        )?;

        let commitment = if cost.salary == 0 {
            0
        } else {
            half_even_pounds(
                Decimal::from(salary_to_come) * Decimal::from(cost.total)
                    / Decimal::from(cost.salary),
            )?
        };
        let expenditure = cost.total - commitment;

        total_expenditure += expenditure;
        total_commitment += commitment;
        explanations.push(Explanation {
            tax_year: year,
            salary: cost.salary,
            salary_to_come,
            expenditure,
            commitment,
            salaries,
            cost,
        });
    }

    Ok(Projection {
        expenditure: total_expenditure,
        commitment: total_commitment,
        explanations,
    })
}

/// Splits a progression stream into tax-year segments.
///
/// A segment closes with the record that ends it (end of tax year or end of
/// employment) and the following start-of-tax-year record opens the next,
/// so every segment is bracketed on both sides.
fn segments(records: Vec<SalaryRecord>) -> Vec<Vec<SalaryRecord>> {
    let mut result = Vec::new();
    let mut current = Vec::new();
    for record in records {
        let closes = matches!(
            record.reason,
            ChangeReason::EndOfTaxYear | ChangeReason::EndOfEmployment
        );
        current.push(record);
        if closes {
            result.push(std::mem::take(&mut current));
        }
    }
    result
}

/// Day-weighted base salary over one segment's records, scaled by occupancy
/// and rounded half-to-even.
///
/// With `not_before` set, days before that date are excluded from the
/// weighting.
fn segment_salary(
    salaries: &[SalaryRecord],
    tax_year_days: i64,
    occupancy: Decimal,
    not_before: Option<NaiveDate>,
) -> EngineResult<i64> {
    let mut weighted: i64 = 0;
    for pair in salaries.windows(2) {
        let mut start = pair[0].date;
        let mut end = pair[1].date;
        if let Some(cutoff) = not_before {
            start = start.max(cutoff);
            end = end.max(start);
        }
        weighted += (end - start).num_days() * pair[0].base_salary;
    }
    half_even_pounds(Decimal::from(weighted) * occupancy / Decimal::from(tax_year_days))
}

/// Cost for a tax year, substituting the rate table's latest year when the
/// requested one predates the table.
fn cost_with_fallback(
    total_salary: i64,
    scheme: Scheme,
    year: i32,
    rates: &RateTable,
) -> EngineResult<Cost> {
    match calculate_cost_with_table(total_salary, scheme, TaxYear::Year(year), rates) {
        Err(EngineError::UnsupportedYear { .. }) => {
            calculate_cost_with_table(total_salary, scheme, TaxYear::Latest, rates)
        }
        other => other,
    }
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

    #[test]
    fn test_costs_by_tax_year_brackets_each_year() {
        let scales = example_table();
        let mut employment = Employment::new(
            Some(Grade::Grade2),
            Point::from("P3"),
            Scheme::UssExchange,
            date(2018, 5, 1),
        );
        employment.next_anniversary_date = Some(date(2016, 6, 1));

        let costs =
            costs_by_tax_year(&employment, date(2016, 4, 6), &scales, RateTable::builtin())
                .unwrap();
        assert_eq!(costs.len(), 3);

        let first = &costs[0];
        assert_eq!(first.year, 2016);
        assert_eq!(first.cost.salary, 14934);
        assert_eq!(first.cost.total, 18395);
        assert_eq!(first.salaries.len(), 4);
        assert_eq!(first.salaries[0].reason, ChangeReason::EmployeeStart);
        assert_eq!(first.salaries[0].base_salary, 14539);
        assert_eq!(
            first.salaries.last().map(|r| r.reason.clone()),
            Some(ChangeReason::EndOfTaxYear)
        );

        let second = &costs[1];
        assert_eq!(
            second.salaries.first().map(|r| (r.date, r.reason.clone())),
            Some((date(2017, 4, 6), ChangeReason::StartOfTaxYear))
        );

        let last = &costs[2];
        assert_eq!(
            last.salaries.last().map(|r| (r.date, r.reason.clone())),
            Some((date(2018, 5, 1), ChangeReason::EndOfEmployment))
        );
    }

    #[test]
    fn test_costs_fall_back_to_latest_rate_year() {
        let scales = example_table();
        let employment = Employment::new(
            Some(Grade::Grade2),
            Point::from("P3"),
            Scheme::UssExchange,
            date(2017, 4, 6),
        );
        let costs =
            costs_by_tax_year(&employment, date(2016, 4, 6), &scales, RateTable::builtin())
                .unwrap();
        assert_eq!(costs.len(), 1);
        assert_eq!(costs[0].year, 2016);
        // 2016 is not in the rate table; the latest year substitutes.
        assert_eq!(costs[0].cost.tax_year, 2019);
    }

    #[test]
    fn test_projection_before_any_work_is_all_commitment() {
        let scales = example_table();
        let from_date = date(2015, 4, 28);
        let mut employment = Employment::new(
            Some(Grade::Grade2),
            Point::from("P3"),
            Scheme::UssExchange,
            date(2018, 1, 22),
        );
        employment.next_anniversary_date = Some(date(2016, 6, 1));

        let projection = employment_expenditure_and_commitments(
            &employment,
            from_date,
            &scales,
            RateTable::builtin(),
        )
        .unwrap();
        assert_eq!(projection.expenditure, 0);
        assert_eq!(projection.commitment, 50060);
        assert_eq!(projection.explanations.len(), 3);
        assert_eq!(projection.explanations[0].tax_year, 2015);
        assert_eq!(
            projection.explanations[0].salaries[0].reason,
            ChangeReason::EmployeeStart
        );
    }

    #[test]
    fn test_half_occupancy_does_not_halve_commitments() {
        let scales = example_table();
        let mut employment = Employment::new(
            Some(Grade::Grade2),
            Point::from("P3"),
            Scheme::UssExchange,
            date(2018, 1, 22),
        );
        employment.next_anniversary_date = Some(date(2016, 6, 1));
        employment.occupancy = Decimal::new(5, 1);

        let projection = employment_expenditure_and_commitments(
            &employment,
            date(2015, 4, 28),
            &scales,
            RateTable::builtin(),
        )
        .unwrap();
        assert_eq!(projection.expenditure, 0);
        // NIC thresholds make employer costs non-linear in occupancy, so
        // this is not half of the full-time 50060.
        assert_eq!(projection.commitment, 24221);
    }

    #[test]
    fn test_reference_date_outside_employment_is_rejected() {
        let scales = example_table();
        let mut employment = Employment::new(
            Some(Grade::Grade2),
            Point::from("P3"),
            Scheme::UssExchange,
            date(2016, 3, 1),
        );
        employment.start_date = Some(date(2015, 4, 1));

        let err = employment_expenditure_and_commitments(
            &employment,
            date(2016, 6, 1),
            &scales,
            RateTable::builtin(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_non_positive_occupancy_is_rejected() {
        let scales = example_table();
        let mut employment = Employment::new(
            Some(Grade::Grade2),
            Point::from("P3"),
            Scheme::UssExchange,
            date(2018, 1, 22),
        );
        employment.occupancy = Decimal::ZERO;
        let err = employment_expenditure_and_commitments(
            &employment,
            date(2017, 1, 1),
            &scales,
            RateTable::builtin(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidDateRange { .. }));
    }
}
