//! Rate and salary scale table stores.

pub mod loader;
pub mod rates;
pub mod scales;

pub use loader::TableLoader;
pub use rates::{NicBand, PensionRates, RateTable, TaxYear, YearRates};
pub use scales::{SalaryScaleTable, ScaleRow, ScaleSnapshot, ScaleVersion};
