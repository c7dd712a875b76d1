//! Single-year on-cost calculation.
//!
//! Turns a base salary, pension scheme and tax year into a [`Cost`]
//! breakdown: salary exchange, employer pension contribution, employer NIC
//! and apprenticeship levy share.

use rust_decimal::Decimal;

use crate::calculation::rounding::{excel_round, to_pounds};
use crate::calculation::tax;
use crate::error::{EngineError, EngineResult};
use crate::models::{Cost, Scheme};
use crate::tables::{RateTable, TaxYear};

/// Calculates the on-costs for a base salary using the built-in rate table.
///
/// `year` resolves through the rate table's fallback rule: if the exact year
/// is absent the greatest year at or before it is used, and the resolved
/// year is recorded in [`Cost::tax_year`].
///
/// # Example
///
/// ```
/// use oncost_engine::calculation::oncost::calculate_cost;
/// use oncost_engine::models::Scheme;
/// use oncost_engine::tables::TaxYear;
///
/// let cost = calculate_cost(25000, Scheme::Uss, TaxYear::Year(2018)).unwrap();
/// assert_eq!(cost.employer_pension, 4500);
/// assert_eq!(cost.employer_nic, 2287);
/// assert_eq!(cost.apprenticeship_levy, 125);
/// assert_eq!(cost.total, 31912);
/// ```
pub fn calculate_cost(base_salary: i64, scheme: Scheme, year: TaxYear) -> EngineResult<Cost> {
    calculate_cost_with_table(base_salary, scheme, year, RateTable::builtin())
}

/// Calculates the on-costs for a base salary using a caller-supplied rate
/// table.
///
/// All published figures are rounded to whole pounds with the Excel
/// halves-up rule, except the exchange column: HR tables show
/// `-round(-exchange)` while the total row is computed from
/// `round(exchange)`, and since halves round up the two differ when the raw
/// exchange lands on a half. The total is therefore not always the sum of
/// the other columns.
///
/// # Errors
///
/// Returns [`EngineError::UnsupportedYear`] when the rate table has no year
/// at or before the requested one, and [`EngineError::SchemeNotCovered`]
/// when the resolved year has no rates for the scheme.
pub fn calculate_cost_with_table(
    base_salary: i64,
    scheme: Scheme,
    year: TaxYear,
    table: &RateTable,
) -> EngineResult<Cost> {
    let (rates, resolved) = table.rates_for(year)?;
    let pension =
        rates
            .pension_for(scheme)
            .ok_or(EngineError::SchemeNotCovered {
                scheme,
                year: resolved,
            })?;

    let base = Decimal::from(base_salary);

    // Negative by convention, matching the exchange column in HR tables.
    let exchange = -(base * pension.exchange);

    // The employer contribution includes the amount the employee sacrificed.
    let employer_pension = base * pension.employer - exchange;

    // NIC and levy are charged on the salary net of the (rounded) sacrifice.
    let taxable_salary = base + excel_round(exchange);
    let employer_nic = tax::employer_nic(taxable_salary, &rates.nic_bands);
    let apprenticeship_levy = tax::apprenticeship_levy(taxable_salary, rates.levy_rate);

    let total = excel_round(base)
        + excel_round(exchange)
        + excel_round(employer_pension)
        + excel_round(employer_nic)
        + excel_round(apprenticeship_levy);

    Ok(Cost {
        salary: to_pounds(base)?,
        exchange: -to_pounds(-exchange)?,
        employer_pension: to_pounds(employer_pension)?,
        employer_nic: to_pounds(employer_nic)?,
        apprenticeship_levy: to_pounds(apprenticeship_levy)?,
        total: to_pounds(total)?,
        tax_year: resolved,
    })
}
