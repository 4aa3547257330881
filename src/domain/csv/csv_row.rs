// ============================================================
// CSV ROW TYPES
// ============================================================
// Data structures representing parsed CSV content

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::error::{AppError, Result};

/// A single field in a CSV row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvField {
    /// Header text, exactly as it appears in the header row
    pub name: String,

    /// Raw cell value
    pub value: String,
}

impl CsvField {
    /// Create a new CSV field
    pub fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// A single row in a CSV file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvRow {
    /// Row index (0-based, header excluded)
    pub index: usize,

    /// One field per header column, in header order
    pub fields: Vec<CsvField>,
}

impl CsvRow {
    /// Create a new CSV row
    pub fn new(index: usize, fields: Vec<CsvField>) -> Self {
        Self { index, fields }
    }

    /// Value of the named column. A repeated header resolves to its
    /// right-most column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|f| f.name == column)
            .map(|f| f.value.as_str())
    }

    /// Column name → value map for this row, right-most column winning on
    /// repeated headers
    pub fn into_record(self) -> HashMap<String, String> {
        let mut record = HashMap::with_capacity(self.fields.len());
        for field in self.fields {
            record.insert(field.name, field.value);
        }
        record
    }
}

/// A parsed table: header row plus data rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    pub fn new(headers: Vec<String>, rows: Vec<CsvRow>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Fail on the first column that the header row does not contain.
    /// Matching is exact: no trimming, no case folding.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(AppError::SourceFormatError(format!(
                "required column '{}' not found in header [{}]",
                missing,
                self.headers.join(", ")
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> CsvRow {
        let fields = pairs
            .iter()
            .map(|(n, v)| CsvField::new(n.to_string(), v.to_string()))
            .collect();
        CsvRow::new(0, fields)
    }

    #[test]
    fn test_repeated_header_right_most_wins() {
        let r = row(&[("code", "a"), ("code", "b")]);
        assert_eq!(r.get("code"), Some("b"));
        assert_eq!(r.into_record().get("code").map(String::as_str), Some("b"));
    }

    #[test]
    fn test_require_columns_reports_missing() {
        let table = CsvTable::new(vec!["ISO3".to_string(), "2015".to_string()], Vec::new());
        assert!(table.require_columns(&["ISO3"]).is_ok());

        let err = table.require_columns(&["ISO3", "iso3"]).unwrap_err();
        match err {
            AppError::SourceFormatError(msg) => assert!(msg.contains("'iso3'")),
            other => panic!("unexpected error: {}", other),
        }
    }
}
