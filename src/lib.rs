pub mod application;
pub mod domain;
pub mod infrastructure;

mod app;

pub use app::{render_text, run, run_with, Cli, OutputFormat};
pub use application::{extract_year, reconcile, reconcile_with_aliases, AliasTable, GdpMapBuilder};
pub use domain::error::{AppError, Result};
pub use domain::gdp::{
    AliasMap, GdpMapReport, GdpRecord, GdpRecords, PlotCountries, ResolutionResult, YearResult,
};
