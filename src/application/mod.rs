pub mod use_cases;

pub use use_cases::alias_table::AliasTable;
pub use use_cases::gdp_map_builder::GdpMapBuilder;
pub use use_cases::reconciler::{reconcile, reconcile_with_aliases, MatchType};
pub use use_cases::year_extractor::{extract_year, parse_gdp_value};
