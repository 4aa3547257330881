// ============================================================
// CSV PARSER
// ============================================================
// Parse delimited files into header-keyed rows with encoding fallback

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::WINDOWS_1252;
use tracing::{debug, warn};

use crate::domain::csv::{dialect_byte, CsvField, CsvRow, CsvTable};
use crate::domain::error::{AppError, Result};

/// CSV parser for one table dialect
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Quote character (default: double quote)
    quote: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser for a configured separator/quote pair
    pub fn for_dialect(separator: char, quote: char) -> Result<Self> {
        Ok(Self::new()
            .with_delimiter(dialect_byte("separator", separator)?)
            .with_quote(dialect_byte("quote", quote)?))
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set custom quote character
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Parse a CSV file into a table
    pub fn parse_file(&self, path: &Path) -> Result<CsvTable> {
        let content = self.read_with_encoding_detection(path)?;
        let table = self.parse_content(&content)?;
        debug!(
            path = %path.display(),
            rows = table.len(),
            columns = table.headers.len(),
            "Parsed CSV file"
        );
        Ok(table)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<CsvTable> {
        // Cells are kept verbatim; callers trim the fields they care about.
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .trim(Trim::None)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(Self::parse_row(index, &headers, &record));
        }

        Ok(CsvTable::new(
            headers.iter().map(str::to_string).collect(),
            rows,
        ))
    }

    /// Read file as UTF-8, falling back to Windows-1252 for legacy exports
    fn read_with_encoding_detection(&self, path: &Path) -> Result<String> {
        let buffer = std::fs::read(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        match String::from_utf8(buffer) {
            Ok(mut content) => {
                if content.starts_with('\u{feff}') {
                    content.remove(0);
                }
                Ok(content)
            }
            Err(err) => {
                warn!(path = %path.display(), "CSV file is not valid UTF-8, decoding as Windows-1252");
                let (decoded, _, _) = WINDOWS_1252.decode(err.as_bytes());
                Ok(decoded.into_owned())
            }
        }
    }

    /// Pair each header with its cell. Missing trailing cells become empty
    /// strings and surplus cells are dropped.
    fn parse_row(index: usize, headers: &StringRecord, record: &StringRecord) -> CsvRow {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = record.get(idx).unwrap_or("").to_string();
                CsvField::new(header.to_string(), value)
            })
            .collect();

        CsvRow::new(index, fields)
    }
}
