//! poster-tabular
//!
//! Spreadsheet and CSV parsing into a column-oriented [`table::Table`],
//! best-effort field extraction, and per-request mapping resolution.

pub mod error;
pub mod extract;
pub mod mapping;
pub mod table;

pub use error::TabularError;
pub use extract::extract_fields;
pub use mapping::resolve_mapping;
pub use table::{Cell, ReadOptions, Table, TableKind, read_table};
