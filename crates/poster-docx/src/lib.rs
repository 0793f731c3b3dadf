//! poster-docx
//!
//! DOCX paragraph extraction and heading-based sectioning. The docx-rs
//! object model is confined to [`paragraph`]; everything downstream works
//! on plain [`paragraph::DocParagraph`] values, so the heading heuristic
//! and the segmenter stay independently testable.

pub mod error;
pub mod fields;
pub mod paragraph;
pub mod segment;

pub use error::DocxError;
pub use fields::resolve_section_fields;
pub use paragraph::{DocParagraph, read_paragraphs};
pub use segment::{Sections, is_heading, segment};
