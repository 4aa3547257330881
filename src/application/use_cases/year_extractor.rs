// ============================================================
// YEAR EXTRACTOR USE CASE
// ============================================================
// Turn resolved codes into log10(GDP) for one year

use tracing::{debug, warn};

use crate::domain::error::{AppError, Result};
use crate::domain::gdp::{CodeIndex, GdpRecords, ResolutionResult, YearResult};

/// Parse a GDP cell as a positive finite number.
pub fn parse_gdp_value(cell: &str) -> Result<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValueParseError("blank cell".to_string()));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| AppError::ValueParseError(format!("'{}' is not a number", trimmed)))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::ValueParseError(format!(
            "'{}' is not a positive finite number",
            trimmed
        )));
    }
    Ok(value)
}

/// Read `year` for every resolved plot code.
///
/// Unmatched plot codes are not looked at; callers merge
/// `resolution.unmatched` themselves if they want one problem set.
/// Each GDP code is looked up again here (case-folded) rather than trusting
/// the reconciler, so a code absent from `gdp_records` lands in
/// `no_data_code`. The code column itself never counts as a year column.
pub fn extract_year(
    resolution: &ResolutionResult,
    gdp_records: &GdpRecords,
    country_code_column: &str,
    year: &str,
) -> YearResult {
    let index = CodeIndex::new(gdp_records);
    let mut result = YearResult::default();

    if year == country_code_column {
        warn!(year, "Requested year names the country code column");
    }

    for (plot_code, gdp_code) in &resolution.resolved {
        let Some(record) = index.resolve(gdp_code).and_then(|code| gdp_records.get(code)) else {
            result.no_data_code.insert(plot_code.clone());
            continue;
        };

        let cell = if year == country_code_column {
            None
        } else {
            record.get(year)
        };

        match cell.map(|c| parse_gdp_value(c)) {
            Some(Ok(value)) => {
                result.values.insert(plot_code.clone(), value.log10());
            }
            Some(Err(err)) => {
                debug!(plot_code = %plot_code, gdp_code = %gdp_code, year, error = %err, "No usable GDP value");
                result.no_year.insert(plot_code.clone());
            }
            None => {
                result.no_year.insert(plot_code.clone());
            }
        }
    }

    debug!(
        year,
        values = result.values.len(),
        no_data_code = result.no_data_code.len(),
        no_year = result.no_year.len(),
        "Extracted GDP year"
    );
    result
}
