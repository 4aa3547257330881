pub mod error;
pub mod gdp;

// Table rows and table descriptors
pub mod csv;
