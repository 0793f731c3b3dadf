//! poster-summarize
//!
//! Abstractive section summarization: the [`model::SummaryModel`] trait,
//! a candle-based encoder-decoder engine with beam-search decoding, the
//! content-addressed [`cache::SummaryCache`] layer, and the
//! [`sections::SectionSummarizer`] that ties threshold, cache, and the
//! bounded inference worker together.

pub mod cache;
pub mod engine;
pub mod error;
pub mod model;
pub mod sections;

pub use cache::{MemoryCache, NoopCache, RedisCache, SummaryCache};
pub use engine::SummaryEngine;
pub use error::SummarizeError;
pub use model::{SummaryModel, SummaryParams};
pub use sections::{SectionSummarizer, join_sections};
