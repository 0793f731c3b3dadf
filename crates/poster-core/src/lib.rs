//! poster-core
//!
//! Pure domain types shared across the poster extraction pipeline: field
//! values, poster data, field mappings, and the value sanitizer.
//! No I/O dependencies — this is the shared vocabulary of the system.

pub mod error;
pub mod mapping;
pub mod value;

pub use mapping::{FieldMapping, PosterData};
pub use value::{FieldValue, sanitize};
