//! On-cost rate parameters keyed by UK tax year.
//!
//! This module provides the [`RateTable`] store: an immutable mapping from
//! tax year to the rate parameters (NIC bands, apprenticeship levy rate and
//! per-scheme pension rates) needed by the on-cost calculator. Lookups fall
//! back to the greatest year at or before the requested one, so tables remain
//! usable for future years until new rates are published.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::Scheme;

/// A tax year selector for rate lookups.
///
/// UK tax years are identified by the calendar year in which they start: tax
/// year 2018 runs from 6 April 2018 to 5 April 2019.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxYear {
    /// The greatest tax year present in the rate table.
    Latest,
    /// A specific tax year.
    Year(i32),
}

impl From<i32> for TaxYear {
    fn from(year: i32) -> Self {
        TaxYear::Year(year)
    }
}

/// One band of the banded employer NIC calculation.
///
/// Bands are listed in ascending order of `upper` boundary; `upper: None`
/// marks the unbounded top band.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NicBand {
    /// Upper boundary of the band in pounds, or `None` for the top band.
    #[serde(default)]
    pub upper: Option<i64>,
    /// Contribution rate applied to salary within the band.
    pub rate: Decimal,
}

/// Pension contribution rates for one scheme in one tax year.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PensionRates {
    /// Employer contribution as a fraction of base salary.
    #[serde(default)]
    pub employer: Decimal,
    /// Employee contribution exchanged for employer contribution under a
    /// salary exchange arrangement, as a fraction of base salary. Zero for
    /// schemes without salary exchange.
    #[serde(default)]
    pub exchange: Decimal,
}

/// The full rate parameter set for one tax year.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct YearRates {
    /// Table A employer NIC bands.
    pub nic_bands: Vec<NicBand>,
    /// Apprenticeship levy rate as a fraction of taxable salary.
    pub levy_rate: Decimal,
    /// Pension rates per scheme.
    pub pension: HashMap<Scheme, PensionRates>,
}

impl YearRates {
    /// Returns the pension rates for a scheme, if this year's table covers it.
    pub fn pension_for(&self, scheme: Scheme) -> Option<&PensionRates> {
        self.pension.get(&scheme)
    }
}

/// Immutable store of on-cost rate parameters keyed by tax year.
///
/// Loaded once at process start (or taken from [`RateTable::builtin`]) and
/// shared read-only between callers.
///
/// # Example
///
/// ```
/// use oncost_engine::tables::{RateTable, TaxYear};
///
/// let table = RateTable::builtin();
/// // 2025 is not in the table; the lookup resolves to the latest year at or
/// // before it.
/// let (_, resolved) = table.rates_for(TaxYear::Year(2025)).unwrap();
/// assert_eq!(resolved, 2019);
/// ```
#[derive(Debug, Clone)]
pub struct RateTable {
    years: BTreeMap<i32, YearRates>,
}

impl RateTable {
    /// Creates a rate table from per-year parameters.
    ///
    /// Fails if `years` is empty, since an empty table would make the
    /// `Latest` sentinel meaningless.
    pub fn new(years: BTreeMap<i32, YearRates>) -> EngineResult<Self> {
        if years.is_empty() {
            return Err(EngineError::Calculation {
                message: "rate table must contain at least one tax year".to_string(),
            });
        }
        Ok(Self { years })
    }

    /// Returns the built-in rate table.
    ///
    /// Covers tax years 2018/19 and 2019/20 with the published Table A
    /// employer NIC bands, the 0.5% apprenticeship levy and the pension
    /// contribution rates in force for each scheme. This is the default
    /// table for cost calculations.
    pub fn builtin() -> &'static RateTable {
        static BUILTIN: OnceLock<RateTable> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let mut years = BTreeMap::new();
            years.insert(
                2018,
                YearRates {
                    // https://www.gov.uk/guidance/rates-and-thresholds-for-employers-2018-to-2019
                    nic_bands: nic_bands(&[(Some(6032), 0), (Some(8424), 0)], 46350),
                    levy_rate: Decimal::new(5, 3),
                    pension: pension_rates(),
                },
            );
            years.insert(
                2019,
                YearRates {
                    nic_bands: nic_bands(&[(Some(6136), 0), (Some(8632), 0)], 50000),
                    levy_rate: Decimal::new(5, 3),
                    pension: pension_rates(),
                },
            );
            RateTable { years }
        })
    }

    /// Returns the greatest tax year present in the table.
    pub fn latest_year(&self) -> i32 {
        // The constructor guarantees at least one year.
        self.years.keys().next_back().copied().unwrap_or_default()
    }

    /// Looks up the rate parameters for a tax year.
    ///
    /// If the exact year is absent the greatest year at or before it is used
    /// instead; `TaxYear::Latest` resolves to the greatest year present. The
    /// resolved year is returned alongside the parameters so callers can
    /// flag extrapolation to the user.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedYear`] when no year at or before the
    /// requested one is present.
    pub fn rates_for(&self, year: TaxYear) -> EngineResult<(&YearRates, i32)> {
        let requested = match year {
            TaxYear::Latest => self.latest_year(),
            TaxYear::Year(y) => y,
        };
        self.years
            .range(..=requested)
            .next_back()
            .map(|(resolved, rates)| (rates, *resolved))
            .ok_or(EngineError::UnsupportedYear { year: requested })
    }
}

/// Builds a NIC band list: the given zero-rated lower bands, then 13.8% up to
/// `upper_earnings` and beyond.
fn nic_bands(lower: &[(Option<i64>, i64)], upper_earnings: i64) -> Vec<NicBand> {
    let standard = Decimal::new(138, 3);
    let mut bands: Vec<NicBand> = lower
        .iter()
        .map(|(upper, rate)| NicBand {
            upper: *upper,
            rate: Decimal::from(*rate),
        })
        .collect();
    bands.push(NicBand {
        upper: Some(upper_earnings),
        rate: standard,
    });
    bands.push(NicBand {
        upper: None,
        rate: standard,
    });
    bands
}

/// Pension contribution rates per scheme, identical for 2018 and 2019.
fn pension_rates() -> HashMap<Scheme, PensionRates> {
    let mut pension = HashMap::new();
    pension.insert(Scheme::None, PensionRates::default());
    pension.insert(
        Scheme::Uss,
        PensionRates {
            employer: Decimal::new(18, 2),
            exchange: Decimal::ZERO,
        },
    );
    pension.insert(
        Scheme::UssExchange,
        PensionRates {
            employer: Decimal::new(18, 2),
            exchange: Decimal::new(8, 2),
        },
    );
    pension.insert(
        Scheme::CpsHybrid,
        PensionRates {
            employer: Decimal::new(231, 3),
            exchange: Decimal::ZERO,
        },
    );
    pension.insert(
        Scheme::CpsHybridExchange,
        PensionRates {
            employer: Decimal::new(231, 3),
            exchange: Decimal::new(3, 2),
        },
    );
    pension.insert(
        Scheme::Nhs,
        PensionRates {
            employer: Decimal::new(1438, 4),
            exchange: Decimal::ZERO,
        },
    );
    pension.insert(
        Scheme::Mrc,
        PensionRates {
            employer: Decimal::new(155, 3),
            exchange: Decimal::ZERO,
        },
    );
    pension
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_resolves_to_greatest_year() {
        let table = RateTable::builtin();
        let (_, resolved) = table.rates_for(TaxYear::Latest).unwrap();
        assert_eq!(resolved, 2019);
        assert_eq!(table.latest_year(), 2019);
    }

    #[test]
    fn test_exact_year_resolves_to_itself() {
        let table = RateTable::builtin();
        let (_, resolved) = table.rates_for(TaxYear::Year(2018)).unwrap();
        assert_eq!(resolved, 2018);
    }

    #[test]
    fn test_future_year_falls_back_to_greatest_known() {
        let table = RateTable::builtin();
        let (_, resolved) = table.rates_for(TaxYear::Year(2030)).unwrap();
        assert_eq!(resolved, 2019);
    }

    #[test]
    fn test_year_before_table_is_unsupported() {
        let table = RateTable::builtin();
        let err = table.rates_for(TaxYear::Year(2017)).unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedYear { year: 2017 }));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(RateTable::new(BTreeMap::new()).is_err());
    }

    #[test]
    fn test_builtin_covers_every_scheme() {
        let table = RateTable::builtin();
        for year in [2018, 2019] {
            let (rates, _) = table.rates_for(TaxYear::Year(year)).unwrap();
            for scheme in [
                Scheme::None,
                Scheme::CpsHybrid,
                Scheme::CpsHybridExchange,
                Scheme::Uss,
                Scheme::UssExchange,
                Scheme::Nhs,
                Scheme::Mrc,
            ] {
                assert!(rates.pension_for(scheme).is_some(), "{scheme:?} in {year}");
            }
        }
    }

    #[test]
    fn test_exchange_schemes_sacrifice_salary() {
        let (rates, _) = RateTable::builtin().rates_for(TaxYear::Year(2018)).unwrap();
        let uss = rates.pension_for(Scheme::UssExchange).unwrap();
        assert_eq!(uss.employer, Decimal::new(18, 2));
        assert_eq!(uss.exchange, Decimal::new(8, 2));
        let plain = rates.pension_for(Scheme::Uss).unwrap();
        assert_eq!(plain.exchange, Decimal::ZERO);
    }
}
