use std::fmt::Write as _;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::GdpMapBuilder;
use crate::domain::error::{AppError, Result};
use crate::domain::gdp::GdpMapReport;
use crate::infrastructure::config::Settings;
use crate::infrastructure::plot_countries::load_plot_countries;

#[derive(Parser, Debug)]
#[clap(
    name = "gdp-codemap",
    version = env!("CARGO_PKG_VERSION"),
    about = "Map plot-library country codes to log10 GDP for one year"
)]
pub struct Cli {
    /// TOML settings file (GDPMAP_* environment variables override it)
    #[clap(long, short = 'c', default_value = "gdpmap.toml")]
    pub config: PathBuf,
    /// Year column to read; overrides `year` from the settings
    #[clap(long, short = 'y')]
    pub year: Option<String>,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text")]
    pub format: String,
    /// Log at debug level.
    #[clap(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(AppError::ConfigError(format!(
                "unknown output format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run_with(&cli)
}

pub fn run_with(cli: &Cli) -> Result<()> {
    let format = OutputFormat::from_str(&cli.format)?;
    let settings = Settings::load(&cli.config)?;
    let year = settings.resolve_year(cli.year.as_deref())?;
    let plot_countries = load_plot_countries(&settings.plot_countries)?;

    let report = GdpMapBuilder::from_settings(&settings).build(&plot_countries, &year)?;

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Text => render_text(&report),
    };
    println!("{}", rendered);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// One `code value` line per mapped country, then the problem sets.
pub fn render_text(report: &GdpMapReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# log10 GDP, {}", report.year);
    for (code, value) in &report.values {
        let _ = writeln!(out, "{} {:.4}", code, value);
    }

    for (label, codes) in [
        ("unmatched", &report.unmatched),
        ("no data code", &report.no_data_code),
        ("no data for year", &report.no_year),
    ] {
        let joined = codes.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
        let _ = writeln!(out, "# {} ({}): {}", label, codes.len(), joined);
    }
    out
}
