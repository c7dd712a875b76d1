//! Pension schemes.

use serde::{Deserialize, Serialize};

/// Possible pension schemes an employee can be a member of.
///
/// The "exchange" variants are salary exchange (salary sacrifice)
/// arrangements: the employee's own contribution is exchanged for a direct
/// employer contribution, reducing gross pay for NIC and levy purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    /// No pension scheme.
    None,
    /// CPS hybrid.
    CpsHybrid,
    /// CPS hybrid with salary exchange.
    CpsHybridExchange,
    /// USS.
    Uss,
    /// USS with salary exchange.
    UssExchange,
    /// NHS.
    Nhs,
    /// MRC.
    Mrc,
}
