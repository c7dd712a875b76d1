//! Employer National Insurance and apprenticeship levy calculations.

use rust_decimal::Decimal;

use crate::tables::NicBand;

/// Calculates the employer National Insurance contribution on a taxable
/// salary using banded rates.
///
/// Each band's rate applies to the slice of salary between the previous
/// band's upper boundary and its own. The returned value is unrounded.
pub fn employer_nic(taxable_salary: Decimal, bands: &[NicBand]) -> Decimal {
    let mut bottom = Decimal::ZERO;
    let mut contribution = Decimal::ZERO;

    for band in bands {
        match band.upper.map(Decimal::from) {
            Some(top) if taxable_salary >= top => {
                contribution += (top - bottom) * band.rate;
                bottom = top;
            }
            Some(top) => {
                if taxable_salary > bottom && taxable_salary < top {
                    contribution += (taxable_salary - bottom) * band.rate;
                }
                bottom = top;
            }
            None => {
                if taxable_salary > bottom {
                    contribution += (taxable_salary - bottom) * band.rate;
                }
            }
        }
    }

    contribution
}

/// Calculates the apprenticeship levy share on a taxable salary.
///
/// HR tables round this figure down, so the result is floored to a whole
/// number of pounds.
pub fn apprenticeship_levy(taxable_salary: Decimal, levy_rate: Decimal) -> Decimal {
    (taxable_salary * levy_rate).floor()
}
