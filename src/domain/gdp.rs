//! Code spaces and result buckets for the GDP map
//!
//! Two vocabularies meet here:
//! - plot codes, used by the map-plotting layer (`PlotCountries`)
//! - data codes, used by the GDP dataset (`GdpRecords`)
//!
//! Matching between them is always by case-folded equality. Original casing
//! is kept in every output map and set.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Plot-library country code → display name
pub type PlotCountries = BTreeMap<String, String>;

/// Column name → raw cell value for one GDP data row
pub type GdpRecord = HashMap<String, String>;

/// Normalize a code for comparison only.
pub fn fold_code(code: &str) -> String {
    code.to_lowercase()
}

/// GDP rows keyed by the raw country code as it appears in the source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GdpRecords {
    records: BTreeMap<String, GdpRecord>,
}

impl GdpRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row. A later row with the same raw code replaces the earlier one.
    pub fn insert(&mut self, code: impl Into<String>, record: GdpRecord) {
        self.records.insert(code.into(), record);
    }

    /// Exact (case-sensitive) lookup
    pub fn get(&self, code: &str) -> Option<&GdpRecord> {
        self.records.get(code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }
}

impl FromIterator<(String, GdpRecord)> for GdpRecords {
    fn from_iter<I: IntoIterator<Item = (String, GdpRecord)>>(iter: I) -> Self {
        let mut records = GdpRecords::new();
        for (code, record) in iter {
            records.insert(code, record);
        }
        records
    }
}

/// Case-folded view over the GDP codes, built in one pass so each lookup
/// is a single hash lookup.
///
/// When two raw codes fold to the same key (`"US"` and `"us"`), the one that
/// sorts last wins. Codes are visited in sorted order, so this is stable.
#[derive(Debug)]
pub struct CodeIndex<'a> {
    folded: HashMap<String, &'a str>,
}

impl<'a> CodeIndex<'a> {
    pub fn new(records: &'a GdpRecords) -> Self {
        let mut folded = HashMap::with_capacity(records.len());
        for code in records.codes() {
            folded.insert(fold_code(code), code);
        }
        Self { folded }
    }

    /// Original-cased GDP code matching `code` under case folding
    pub fn resolve(&self, code: &str) -> Option<&'a str> {
        self.folded.get(&fold_code(code)).copied()
    }

    pub fn len(&self) -> usize {
        self.folded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }
}

/// Normalized plot code → raw data code, built from the alias table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AliasMap {
    entries: BTreeMap<String, String>,
}

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key normalization applied to alias rows: trimmed, then case-folded
    pub fn normalize_key(plot_code: &str) -> String {
        fold_code(plot_code.trim())
    }

    /// Returns the data code previously stored under the same normalized key.
    pub fn insert(&mut self, plot_code: &str, data_code: &str) -> Option<String> {
        self.entries
            .insert(Self::normalize_key(plot_code), data_code.trim().to_string())
    }

    /// Lookup case-folds the query but does not trim it.
    pub fn get(&self, plot_code: &str) -> Option<&str> {
        self.entries
            .get(&fold_code(plot_code))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Outcome of reconciling plot codes against GDP codes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// plot code → GDP code, both in their original casing
    pub resolved: BTreeMap<String, String>,

    /// plot codes with neither a direct nor an alias match
    pub unmatched: BTreeSet<String>,
}

/// Outcome of reading one year for every resolved plot code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearResult {
    /// plot code → log10(GDP)
    pub values: BTreeMap<String, f64>,

    /// resolved plot codes whose GDP code has no record
    pub no_data_code: BTreeSet<String>,

    /// resolved plot codes whose record has no usable value for the year
    pub no_year: BTreeSet<String>,
}

/// Every plot code sorted into exactly one bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GdpMapReport {
    pub year: String,
    pub values: BTreeMap<String, f64>,
    pub unmatched: BTreeSet<String>,
    pub no_data_code: BTreeSet<String>,
    pub no_year: BTreeSet<String>,
}

impl GdpMapReport {
    pub fn new(year: impl Into<String>, resolution: ResolutionResult, extracted: YearResult) -> Self {
        Self {
            year: year.into(),
            values: extracted.values,
            unmatched: resolution.unmatched,
            no_data_code: extracted.no_data_code,
            no_year: extracted.no_year,
        }
    }

    /// Plot codes with no GDP row at all: never matched, or matched a code
    /// that has no record.
    pub fn not_found(&self) -> BTreeSet<String> {
        self.unmatched.union(&self.no_data_code).cloned().collect()
    }

    /// Number of plot codes covered by the report
    pub fn total(&self) -> usize {
        self.values.len() + self.unmatched.len() + self.no_data_code.len() + self.no_year.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> GdpRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_code_index_folds_case() {
        let mut gdp = GdpRecords::new();
        gdp.insert("us", record(&[("2015", "1")]));
        gdp.insert("KR", record(&[("2015", "1")]));

        let index = CodeIndex::new(&gdp);
        assert_eq!(index.resolve("US"), Some("us"));
        assert_eq!(index.resolve("kr"), Some("KR"));
        assert_eq!(index.resolve("XYZ"), None);
    }

    #[test]
    fn test_code_index_collision_is_stable() {
        let mut gdp = GdpRecords::new();
        gdp.insert("us", GdpRecord::new());
        gdp.insert("US", GdpRecord::new());

        // "US" < "us" in byte order, so "us" is visited last
        assert_eq!(CodeIndex::new(&gdp).resolve("Us"), Some("us"));
        assert_eq!(CodeIndex::new(&gdp).len(), 1);
    }

    #[test]
    fn test_alias_map_normalizes_keys_and_values() {
        let mut aliases = AliasMap::new();
        assert_eq!(aliases.insert("  KOR ", " KR "), None);
        assert_eq!(aliases.get("kor"), Some("KR"));
        assert_eq!(aliases.get("Kor"), Some("KR"));
        assert_eq!(aliases.get(" kor "), None);
        assert_eq!(aliases.insert("kor", "KP"), Some("KR".to_string()));
        assert_eq!(aliases.get("KOR"), Some("KP"));
    }

    #[test]
    fn test_report_not_found_merges_sets() {
        let resolution = ResolutionResult {
            resolved: BTreeMap::from([("us".to_string(), "USA".to_string())]),
            unmatched: BTreeSet::from(["xyz".to_string()]),
        };
        let extracted = YearResult {
            no_data_code: BTreeSet::from(["us".to_string()]),
            ..Default::default()
        };

        let report = GdpMapReport::new("2015", resolution, extracted);
        let not_found: Vec<_> = report.not_found().into_iter().collect();
        assert_eq!(not_found, vec!["us".to_string(), "xyz".to_string()]);
        assert_eq!(report.total(), 2);
    }
}
