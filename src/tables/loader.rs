//! Loading of rate and salary scale tables from YAML.
//!
//! Deployments load tables from configuration files at startup; tests and
//! documentation load the bundled example tables with the `*_from_str`
//! variants. See `data/` for the file formats.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::Grade;
use crate::tables::rates::{RateTable, YearRates};
use crate::tables::scales::{SalaryScaleTable, ScaleRow, ScaleVersion};

#[derive(Debug, Deserialize)]
struct ScalesFile {
    grades: Vec<GradeScale>,
    salaries: Vec<ScaleVersion>,
    annual_change: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct GradeScale {
    grade: Grade,
    scale: Vec<ScaleRow>,
}

#[derive(Debug, Deserialize)]
struct RatesFile {
    years: Vec<RatesYear>,
}

#[derive(Debug, Deserialize)]
struct RatesYear {
    tax_year: i32,
    #[serde(flatten)]
    rates: YearRates,
}

/// Loads [`RateTable`]s and [`SalaryScaleTable`]s from YAML documents.
pub struct TableLoader;

impl TableLoader {
    /// Loads a salary scale table from a YAML file.
    pub fn scales_from_path<P: AsRef<Path>>(path: P) -> EngineResult<SalaryScaleTable> {
        let path = path.as_ref();
        let text = read_file(path)?;
        let table = parse_scales(&text, &path.display().to_string())?;
        info!(
            path = %path.display(),
            versions = table.version_dates().len(),
            "loaded salary scale table"
        );
        Ok(table)
    }

    /// Loads a salary scale table from a YAML string.
    pub fn scales_from_str(text: &str) -> EngineResult<SalaryScaleTable> {
        parse_scales(text, "<string>")
    }

    /// Loads a rate table from a YAML file.
    pub fn rates_from_path<P: AsRef<Path>>(path: P) -> EngineResult<RateTable> {
        let path = path.as_ref();
        let text = read_file(path)?;
        let table = parse_rates(&text, &path.display().to_string())?;
        info!(path = %path.display(), "loaded on-cost rate table");
        Ok(table)
    }

    /// Loads a rate table from a YAML string.
    pub fn rates_from_str(text: &str) -> EngineResult<RateTable> {
        parse_rates(text, "<string>")
    }
}

fn read_file(path: &Path) -> EngineResult<String> {
    std::fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: path.display().to_string(),
    })
}

fn parse_scales(text: &str, path: &str) -> EngineResult<SalaryScaleTable> {
    let file: ScalesFile =
        serde_yaml::from_str(text).map_err(|err| EngineError::ConfigParseError {
            path: path.to_string(),
            message: err.to_string(),
        })?;
    let grades: HashMap<Grade, Vec<ScaleRow>> = file
        .grades
        .into_iter()
        .map(|entry| (entry.grade, entry.scale))
        .collect();
    let annual_change = file
        .annual_change
        .unwrap_or_else(SalaryScaleTable::default_annual_change);
    SalaryScaleTable::new(grades, file.salaries, annual_change)
}

fn parse_rates(text: &str, path: &str) -> EngineResult<RateTable> {
    let file: RatesFile =
        serde_yaml::from_str(text).map_err(|err| EngineError::ConfigParseError {
            path: path.to_string(),
            message: err.to_string(),
        })?;
    let years: BTreeMap<i32, YearRates> = file
        .years
        .into_iter()
        .map(|year| (year.tax_year, year.rates))
        .collect();
    RateTable::new(years)
}
