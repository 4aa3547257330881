use std::path::Path;

use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::gdp::PlotCountries;

/// Read the plot library's country table from a JSON object of code → name.
pub fn load_plot_countries(path: &Path) -> Result<PlotCountries> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let countries: PlotCountries = serde_json::from_str(&content).map_err(|e| {
        AppError::ParseError(format!(
            "{} is not a JSON object of code to name: {}",
            path.display(),
            e
        ))
    })?;

    debug!(path = %path.display(), countries = countries.len(), "Loaded plot countries");
    Ok(countries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_plot_countries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"us": "United States", "kr": "South Korea"}}"#).unwrap();

        let countries = load_plot_countries(file.path()).unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries.get("kr").map(String::as_str), Some("South Korea"));
    }

    #[test]
    fn test_rejects_non_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["us", "kr"]"#).unwrap();

        let err = load_plot_countries(file.path()).unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }
}
