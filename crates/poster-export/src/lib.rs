//! poster-export
//!
//! Poster data → single-row XLSX byte stream.

pub mod error;
pub mod excel;

pub use error::ExportError;
pub use excel::export;
