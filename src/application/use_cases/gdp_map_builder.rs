// ============================================================
// GDP MAP BUILDER USE CASE
// ============================================================
// Orchestrate GDP loading, code reconciliation, and year extraction

use std::time::Instant;

use tracing::{debug, info};

use crate::application::use_cases::reconciler::reconcile;
use crate::application::use_cases::year_extractor::extract_year;
use crate::domain::csv::{CodeTableConfig, CsvTable, GdpTableConfig};
use crate::domain::error::Result;
use crate::domain::gdp::{GdpMapReport, GdpRecords, PlotCountries};
use crate::infrastructure::config::Settings;
use crate::infrastructure::csv::CsvParser;

/// Read the GDP table named by `config`, one record per row keyed by the raw
/// country code.
pub fn load_gdp_records(config: &GdpTableConfig) -> Result<GdpRecords> {
    config.validate()?;
    let table = CsvParser::for_dialect(config.separator, config.quote)?.parse_file(&config.gdpfile)?;
    records_from_table(table, &config.country_code)
}

/// Key every row by its `country_code` cell. A later row with the same code
/// replaces the earlier one.
pub fn records_from_table(table: CsvTable, country_code: &str) -> Result<GdpRecords> {
    table.require_columns(&[country_code])?;

    let rows = table.len();
    let mut records = GdpRecords::new();
    for row in table.rows {
        let code = row.get(country_code).unwrap_or("").to_string();
        records.insert(code, row.into_record());
    }

    debug!(rows, codes = records.len(), "Loaded GDP records");
    Ok(records)
}

/// GDP map use case
pub struct GdpMapBuilder {
    gdp: GdpTableConfig,
    codes: CodeTableConfig,
}

impl GdpMapBuilder {
    /// Create a new builder
    pub fn new(gdp: GdpTableConfig, codes: CodeTableConfig) -> Self {
        Self { gdp, codes }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.gdp.clone(), settings.codes.clone())
    }

    /// Map every plot code to log10(GDP) for `year`, or to the bucket that
    /// explains why it has no value.
    pub fn build(&self, plot_countries: &PlotCountries, year: &str) -> Result<GdpMapReport> {
        let start = Instant::now();

        let gdp_records = load_gdp_records(&self.gdp)?;
        let resolution = reconcile(&self.codes, plot_countries, &gdp_records)?;
        let extracted = extract_year(&resolution, &gdp_records, &self.gdp.country_code, year);
        let report = GdpMapReport::new(year, resolution, extracted);

        info!(
            year,
            values = report.values.len(),
            unmatched = report.unmatched.len(),
            no_data_code = report.no_data_code.len(),
            no_year = report.no_year.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Built GDP map"
        );
        Ok(report)
    }
}
