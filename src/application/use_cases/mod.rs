pub mod alias_table;
pub mod gdp_map_builder;
pub mod reconciler;
pub mod year_extractor;
