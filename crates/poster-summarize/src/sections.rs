use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::cache::{SummaryCache, cache_key};
use crate::error::SummarizeError;
use crate::model::{SummaryModel, SummaryParams};

const CACHE_TTL: Duration = Duration::from_secs(3600);

/// Heading → ordered body paragraphs, as produced by the segmenter.
pub type RawSections = IndexMap<String, Vec<String>>;

/// Join each section's paragraphs with single spaces, no condensation.
pub fn join_sections(sections: &RawSections) -> IndexMap<String, String> {
    sections
        .iter()
        .map(|(heading, paragraphs)| (heading.clone(), paragraphs.join(" ")))
        .collect()
}

/// Cache-backed, non-blocking section summarization.
///
/// The model call is the only blocking operation in the request path; it
/// is dispatched to a detached worker task gated by a semaphore, so the
/// request scheduler stays responsive and the number of concurrent
/// inferences is bounded by the pool size. A dispatched inference runs to
/// completion and populates the cache even if the awaiting request is
/// dropped.
pub struct SectionSummarizer {
    model: Arc<dyn SummaryModel>,
    cache: Arc<dyn SummaryCache>,
    params: SummaryParams,
    permits: Arc<Semaphore>,
}

impl SectionSummarizer {
    pub fn new(
        model: Arc<dyn SummaryModel>,
        cache: Arc<dyn SummaryCache>,
        pool_size: usize,
    ) -> Self {
        SectionSummarizer {
            model,
            cache,
            params: SummaryParams::default(),
            permits: Arc::new(Semaphore::new(pool_size.max(1))),
        }
    }

    pub fn with_params(mut self, params: SummaryParams) -> Self {
        self.params = params;
        self
    }

    /// Condense sections whose joined text exceeds `max_chars`; shorter
    /// sections pass through verbatim.
    pub async fn summarize_sections(
        &self,
        sections: &RawSections,
        max_chars: usize,
    ) -> Result<IndexMap<String, String>, SummarizeError> {
        let mut result = IndexMap::new();
        for (heading, joined) in join_sections(sections) {
            let value = if joined.chars().count() > max_chars {
                self.summarize(&joined).await?
            } else {
                joined
            };
            result.insert(heading, value);
        }
        Ok(result)
    }

    /// Summarize one text, serving repeats from the content-addressed
    /// cache.
    pub async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let key = cache_key(text);

        if let Some(hit) = self.cache.get(&key).await {
            debug!(key = %key, "summary cache hit");
            return Ok(hit);
        }

        let model = Arc::clone(&self.model);
        let cache = Arc::clone(&self.cache);
        let permits = Arc::clone(&self.permits);
        let params = self.params.clone();
        let owned = text.to_string();

        let handle = tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| SummarizeError::Worker(e.to_string()))?;

            let summary =
                tokio::task::spawn_blocking(move || model.summarize(&owned, &params))
                    .await
                    .map_err(|e| SummarizeError::Worker(e.to_string()))??;

            cache.set(&key, &summary, CACHE_TTL).await;
            Ok::<String, SummarizeError>(summary)
        });

        handle
            .await
            .map_err(|e| SummarizeError::Worker(e.to_string()))?
    }
}
