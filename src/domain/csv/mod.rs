// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Row and table types plus the table descriptors for the two inputs
// No I/O, no external dependencies beyond serde

mod csv_row;
mod table_config;

pub use csv_row::{CsvField, CsvRow, CsvTable};
pub use table_config::{CodeTableConfig, GdpTableConfig};
pub(crate) use table_config::dialect_byte;
