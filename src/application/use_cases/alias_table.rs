// ============================================================
// ALIAS TABLE USE CASE
// ============================================================
// Load the plot code → data code translation table

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::csv::{CodeTableConfig, CsvTable};
use crate::domain::error::Result;
use crate::domain::gdp::AliasMap;
use crate::infrastructure::csv::CsvParser;

pub struct AliasTable;

impl AliasTable {
    /// Read the alias file named by `config` into a case-folded `AliasMap`.
    pub fn load(config: &CodeTableConfig) -> Result<AliasMap> {
        let table = Self::read(config)?;
        Self::from_table(&table, config)
    }

    /// Build the map from an already parsed table.
    ///
    /// Rows are applied in file order, so when two rows normalize to the same
    /// plot code the later row wins.
    pub fn from_table(table: &CsvTable, config: &CodeTableConfig) -> Result<AliasMap> {
        table.require_columns(&[config.plot_codes.as_str(), config.data_codes.as_str()])?;

        let mut aliases = AliasMap::new();
        for row in &table.rows {
            let plot_code = row.get(&config.plot_codes).unwrap_or("");
            let data_code = row.get(&config.data_codes).unwrap_or("");
            if let Some(previous) = aliases.insert(plot_code, data_code) {
                debug!(
                    row = row.index,
                    plot_code = plot_code.trim(),
                    previous = %previous,
                    replacement = data_code.trim(),
                    "Duplicate alias row overrides earlier entry"
                );
            }
        }

        debug!(aliases = aliases.len(), rows = table.len(), "Built alias map");
        Ok(aliases)
    }

    /// Plain converter table: both codes trimmed, case kept on both sides.
    /// Later rows win on repeated plot codes.
    pub fn converter(config: &CodeTableConfig) -> Result<BTreeMap<String, String>> {
        let table = Self::read(config)?;
        Self::converter_from_table(&table, config)
    }

    pub fn converter_from_table(
        table: &CsvTable,
        config: &CodeTableConfig,
    ) -> Result<BTreeMap<String, String>> {
        table.require_columns(&[config.plot_codes.as_str(), config.data_codes.as_str()])?;

        Ok(table
            .rows
            .iter()
            .map(|row| {
                (
                    row.get(&config.plot_codes).unwrap_or("").trim().to_string(),
                    row.get(&config.data_codes).unwrap_or("").trim().to_string(),
                )
            })
            .collect())
    }

    fn read(config: &CodeTableConfig) -> Result<CsvTable> {
        config.validate()?;
        CsvParser::for_dialect(config.separator, config.quote)?.parse_file(&config.codefile)
    }
}
