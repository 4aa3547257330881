// ============================================================
// TABLE CONFIGURATION
// ============================================================
// Where each input table lives and which columns hold the codes

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::error::{AppError, Result};

fn default_separator() -> char {
    ','
}

fn default_quote() -> char {
    '"'
}

/// Descriptor for the code-alias table (plot code → data code)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeTableConfig {
    /// Path of the alias CSV file
    pub codefile: PathBuf,

    /// Column holding the plot-library code
    pub plot_codes: String,

    /// Column holding the GDP dataset code
    pub data_codes: String,

    #[serde(default = "default_separator")]
    pub separator: char,

    #[serde(default = "default_quote")]
    pub quote: char,
}

impl CodeTableConfig {
    pub fn new(
        codefile: impl Into<PathBuf>,
        plot_codes: impl Into<String>,
        data_codes: impl Into<String>,
    ) -> Self {
        Self {
            codefile: codefile.into(),
            plot_codes: plot_codes.into(),
            data_codes: data_codes.into(),
            separator: default_separator(),
            quote: default_quote(),
        }
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_name("plot_codes", &self.plot_codes)?;
        require_name("data_codes", &self.data_codes)?;
        validate_dialect(self.separator, self.quote)
    }
}

/// Descriptor for the GDP table (one row per country, one column per year)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GdpTableConfig {
    /// Path of the GDP CSV file
    pub gdpfile: PathBuf,

    /// Column holding the GDP dataset code
    pub country_code: String,

    #[serde(default = "default_separator")]
    pub separator: char,

    #[serde(default = "default_quote")]
    pub quote: char,
}

impl GdpTableConfig {
    pub fn new(gdpfile: impl Into<PathBuf>, country_code: impl Into<String>) -> Self {
        Self {
            gdpfile: gdpfile.into(),
            country_code: country_code.into(),
            separator: default_separator(),
            quote: default_quote(),
        }
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_name("country_code", &self.country_code)?;
        validate_dialect(self.separator, self.quote)
    }
}

fn require_name(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AppError::ConfigError(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// The CSV reader works on bytes, so both dialect characters must be ASCII.
pub(crate) fn dialect_byte(field: &str, c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(AppError::ConfigError(format!(
            "{} must be a single ASCII character, got {:?}",
            field, c
        )))
    }
}

fn validate_dialect(separator: char, quote: char) -> Result<()> {
    dialect_byte("separator", separator)?;
    dialect_byte("quote", quote)?;
    if separator == quote {
        return Err(AppError::ConfigError(format!(
            "separator and quote must differ, both are {:?}",
            separator
        )));
    }
    Ok(())
}
