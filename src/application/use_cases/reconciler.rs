//! Plot code → GDP code reconciliation
//!
//! Each plot code is resolved on its own, in two stages:
//! 1. direct: the case-folded plot code is itself a GDP code
//! 2. alias: the alias table maps it to a data code, and that data code
//!    (case-folded) is a GDP code
//!
//! Both stages are hash lookups against a `CodeIndex` built once per call,
//! so the cost is linear in the sizes of the three inputs.

use tracing::{debug, info};

use crate::application::use_cases::alias_table::AliasTable;
use crate::domain::csv::CodeTableConfig;
use crate::domain::error::Result;
use crate::domain::gdp::{AliasMap, CodeIndex, GdpRecords, PlotCountries, ResolutionResult};

/// How a plot code reached its GDP code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Plot code equals a GDP code under case folding
    Direct,
    /// Plot code reached a GDP code through the alias table
    Alias,
}

/// Load the alias table named by `alias_config` and reconcile against it.
///
/// The alias file is read on every call; nothing is cached between calls.
pub fn reconcile(
    alias_config: &CodeTableConfig,
    plot_countries: &PlotCountries,
    gdp_records: &GdpRecords,
) -> Result<ResolutionResult> {
    let aliases = AliasTable::load(alias_config)?;
    Ok(reconcile_with_aliases(&aliases, plot_countries, gdp_records))
}

/// Reconcile with an alias map the caller already holds.
pub fn reconcile_with_aliases(
    aliases: &AliasMap,
    plot_countries: &PlotCountries,
    gdp_records: &GdpRecords,
) -> ResolutionResult {
    let index = CodeIndex::new(gdp_records);
    let mut result = ResolutionResult::default();
    let (mut direct, mut via_alias) = (0usize, 0usize);

    for plot_code in plot_countries.keys() {
        match resolve_code(plot_code, &index, aliases) {
            Some((gdp_code, match_type)) => {
                match match_type {
                    MatchType::Direct => direct += 1,
                    MatchType::Alias => via_alias += 1,
                }
                result.resolved.insert(plot_code.clone(), gdp_code.to_string());
            }
            None => {
                result.unmatched.insert(plot_code.clone());
            }
        }
    }

    info!(
        plot_countries = plot_countries.len(),
        gdp_codes = gdp_records.len(),
        direct,
        via_alias,
        unmatched = result.unmatched.len(),
        "Reconciled country codes"
    );
    result
}

/// Resolve a single plot code. The alias table is only consulted when the
/// direct lookup misses.
pub fn resolve_code<'a>(
    plot_code: &str,
    index: &CodeIndex<'a>,
    aliases: &AliasMap,
) -> Option<(&'a str, MatchType)> {
    if let Some(gdp_code) = index.resolve(plot_code) {
        return Some((gdp_code, MatchType::Direct));
    }

    let data_code = aliases.get(plot_code)?;
    match index.resolve(data_code) {
        Some(gdp_code) => Some((gdp_code, MatchType::Alias)),
        None => {
            debug!(plot_code, data_code, "Alias points at a code missing from the GDP table");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gdp::GdpRecord;
    use std::io::Write;

    fn plot(codes: &[(&str, &str)]) -> PlotCountries {
        codes
            .iter()
            .map(|(c, n)| (c.to_string(), n.to_string()))
            .collect()
    }

    fn gdp(codes: &[&str]) -> GdpRecords {
        codes
            .iter()
            .map(|c| (c.to_string(), GdpRecord::new()))
            .collect()
    }

    fn aliases(rows: &[(&str, &str)]) -> AliasMap {
        let mut map = AliasMap::new();
        for (p, d) in rows {
            map.insert(p, d);
        }
        map
    }

    #[test]
    fn test_direct_match_ignores_case() {
        // The alias would send "US" elsewhere; the direct match must win.
        let result = reconcile_with_aliases(
            &aliases(&[("us", "USA")]),
            &plot(&[("US", "United States")]),
            &gdp(&["us", "USA"]),
        );

        assert_eq!(result.resolved.get("US").map(String::as_str), Some("us"));
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn test_alias_fallback() {
        let result = reconcile_with_aliases(
            &aliases(&[("kor", "KR")]),
            &plot(&[("KOR", "South Korea")]),
            &gdp(&["KR"]),
        );

        assert_eq!(result.resolved.get("KOR").map(String::as_str), Some("KR"));
    }

    #[test]
    fn test_alias_target_matched_case_insensitively() {
        let result = reconcile_with_aliases(
            &aliases(&[("gb", "GBR")]),
            &plot(&[("gb", "United Kingdom")]),
            &gdp(&["gbr"]),
        );

        assert_eq!(result.resolved.get("gb").map(String::as_str), Some("gbr"));
    }

    #[test]
    fn test_unmatched_when_no_path_exists() {
        let result = reconcile_with_aliases(
            &aliases(&[("zz", "ZZZ")]),
            &plot(&[("XYZ", "Nowhere"), ("zz", "Dangling alias")]),
            &gdp(&["USA"]),
        );

        assert!(result.resolved.is_empty());
        assert!(result.unmatched.contains("XYZ"));
        assert!(result.unmatched.contains("zz"));
    }

    #[test]
    fn test_padded_plot_code_not_trimmed_for_alias() {
        let result = reconcile_with_aliases(
            &aliases(&[("kor", "KR")]),
            &plot(&[(" KOR ", "South Korea")]),
            &gdp(&["KR"]),
        );

        assert!(result.resolved.is_empty());
        assert!(result.unmatched.contains(" KOR "));
    }

    #[test]
    fn test_substrings_never_match() {
        let result = reconcile_with_aliases(
            &AliasMap::new(),
            &plot(&[("US", "United States")]),
            &gdp(&["USA", "AUS"]),
        );

        assert!(result.unmatched.contains("US"));
    }

    #[test]
    fn test_resolved_and_unmatched_are_disjoint_and_cover_input() {
        let countries = plot(&[
            ("us", "United States"),
            ("KOR", "South Korea"),
            ("xyz", "Nowhere"),
            ("De", "Germany"),
        ]);
        let result = reconcile_with_aliases(
            &aliases(&[("kor", "KR")]),
            &countries,
            &gdp(&["USA", "US", "KR", "DE"]),
        );

        for code in countries.keys() {
            let in_resolved = result.resolved.contains_key(code);
            let in_unmatched = result.unmatched.contains(code);
            assert!(in_resolved ^ in_unmatched, "{} must land in exactly one bucket", code);
        }
        assert_eq!(result.unmatched.len(), 1);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let a = aliases(&[("kor", "KR")]);
        let countries = plot(&[("KOR", "South Korea"), ("us", "United States"), ("q", "Q")]);
        let records = gdp(&["KR", "US"]);

        let first = reconcile_with_aliases(&a, &countries, &records);
        let second = reconcile_with_aliases(&a, &countries, &records);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_code_reports_match_type() {
        let records = gdp(&["KR", "US"]);
        let index = CodeIndex::new(&records);
        let a = aliases(&[("kor", "KR")]);

        assert_eq!(resolve_code("us", &index, &a), Some(("US", MatchType::Direct)));
        assert_eq!(resolve_code("KOR", &index, &a), Some(("KR", MatchType::Alias)));
        assert_eq!(resolve_code("XYZ", &index, &a), None);
    }

    #[test]
    fn test_reconcile_loads_alias_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Cmap,ISO3\nkor,KR\n").unwrap();
        let config = CodeTableConfig::new(file.path(), "Cmap", "ISO3");

        let result = reconcile(&config, &plot(&[("KOR", "South Korea")]), &gdp(&["KR"])).unwrap();
        assert_eq!(result.resolved.get("KOR").map(String::as_str), Some("KR"));
    }

    #[test]
    fn test_reconcile_fails_on_bad_alias_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "plot,data\nkor,KR\n").unwrap();
        let config = CodeTableConfig::new(file.path(), "Cmap", "ISO3");

        assert!(reconcile(&config, &plot(&[("KOR", "South Korea")]), &gdp(&["KR"])).is_err());
    }
}
