use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::csv::{CodeTableConfig, GdpTableConfig};
use crate::domain::error::{AppError, Result};

/// Environment variable prefix; nested keys are split on `__`.
pub const ENV_PREFIX: &str = "GDPMAP_";

/// Everything one run of the map builder needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub gdp: GdpTableConfig,

    pub codes: CodeTableConfig,

    /// JSON object of plot-library code → country name
    pub plot_countries: PathBuf,

    #[serde(default, deserialize_with = "year_text_or_number")]
    pub year: Option<String>,
}

/// `year = 2015` and `GDPMAP_YEAR=2015` arrive as integers; accept both forms.
fn year_text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Year>::deserialize(deserializer)?.map(|year| match year {
        Year::Text(text) => text,
        Year::Number(number) => number.to_string(),
    }))
}

impl Settings {
    /// Load from a TOML file, then let `GDPMAP_*` variables override it.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AppError::IoError(format!(
                "settings file {} not found",
                path.display()
            )));
        }
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(path))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let settings: Settings = figment.extract()?;
        settings.gdp.validate()?;
        settings.codes.validate()?;
        Ok(settings)
    }

    /// The requested year, with `overridden` taking precedence over the file.
    pub fn resolve_year(&self, overridden: Option<&str>) -> Result<String> {
        overridden
            .map(str::to_string)
            .or_else(|| self.year.clone())
            .filter(|y| !y.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError(
                    "no year requested: set `year` in the config or pass --year".to_string(),
                )
            })
    }
}
