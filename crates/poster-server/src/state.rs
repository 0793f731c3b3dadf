use std::sync::Arc;

use poster_summarize::SectionSummarizer;

/// Shared application state, injected into route handlers via Axum state.
///
/// The summarizer (and through it the model and the cache) is the only
/// state shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub summarizer: Arc<SectionSummarizer>,
}
