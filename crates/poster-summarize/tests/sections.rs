use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use indexmap::IndexMap;
use poster_summarize::sections::RawSections;
use poster_summarize::{
    MemoryCache, NoopCache, SectionSummarizer, SummarizeError, SummaryModel, SummaryParams,
    join_sections,
};

/// Counts invocations and returns a canned summary.
struct StubModel {
    calls: Arc<AtomicUsize>,
}

impl StubModel {
    fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            StubModel {
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl SummaryModel for StubModel {
    fn summarize(&self, text: &str, _params: &SummaryParams) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("summary-of-{}-chars", text.chars().count()))
    }
}

fn sections(pairs: &[(&str, &[&str])]) -> RawSections {
    pairs
        .iter()
        .map(|(h, paras)| {
            (
                h.to_string(),
                paras.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
            )
        })
        .collect()
}

#[tokio::test]
async fn identical_inputs_hit_the_cache_second_time() {
    let (model, calls) = StubModel::new();
    let summarizer =
        SectionSummarizer::new(Arc::new(model), Arc::new(MemoryCache::new()), 2);

    let first = summarizer.summarize("the same long section text").await.unwrap();
    let second = summarizer.summarize("the same long section text").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn noop_cache_always_recomputes() {
    let (model, calls) = StubModel::new();
    let summarizer = SectionSummarizer::new(Arc::new(model), Arc::new(NoopCache), 2);

    summarizer.summarize("text").await.unwrap();
    summarizer.summarize("text").await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn short_sections_pass_through_verbatim() {
    let (model, calls) = StubModel::new();
    let summarizer = SectionSummarizer::new(Arc::new(model), Arc::new(NoopCache), 1);

    let raw = sections(&[("Intro", &["short text", "fits easily"])]);
    let result = summarizer.summarize_sections(&raw, 1000).await.unwrap();

    assert_eq!(result["Intro"], "short text fits easily");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn long_sections_get_summarized() {
    let (model, calls) = StubModel::new();
    let summarizer = SectionSummarizer::new(Arc::new(model), Arc::new(NoopCache), 1);

    let long_a = "a".repeat(600);
    let long_b = "b".repeat(600);
    let raw = sections(&[("RESULTS", &[long_a.as_str(), long_b.as_str()])]);
    let result = summarizer.summarize_sections(&raw, 1000).await.unwrap();

    // 600 + space + 600 = 1201 chars, over the threshold.
    assert_eq!(result["RESULTS"], "summary-of-1201-chars");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn boundary_length_is_not_summarized() {
    let (model, calls) = StubModel::new();
    let summarizer = SectionSummarizer::new(Arc::new(model), Arc::new(NoopCache), 1);

    let exact = "x".repeat(1000);
    let raw = sections(&[("S", &[exact.as_str()])]);
    let result = summarizer.summarize_sections(&raw, 1000).await.unwrap();

    assert_eq!(result["S"], exact);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn join_sections_uses_single_spaces_and_keeps_order() {
    let raw = sections(&[("B", &["one", "two"]), ("A", &["three"])]);
    let joined = join_sections(&raw);
    assert_eq!(joined["B"], "one two");
    assert_eq!(joined["A"], "three");
    assert_eq!(joined.keys().collect::<Vec<_>>(), vec!["B", "A"]);
}

#[tokio::test]
async fn memory_cache_entries_expire() {
    let cache = MemoryCache::new();
    use poster_summarize::SummaryCache;

    cache.set("k", "v", Duration::from_millis(10)).await;
    assert_eq!(cache.get("k").await.as_deref(), Some("v"));

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(cache.get("k").await, None);
}

#[test]
fn cache_keys_are_content_addressed_sha256() {
    let key = poster_summarize::cache::cache_key("abc");
    assert!(key.starts_with("summ:"));
    assert_eq!(key.len(), "summ:".len() + 64);
    // Stable across calls.
    assert_eq!(key, poster_summarize::cache::cache_key("abc"));
    assert_ne!(key, poster_summarize::cache::cache_key("abd"));
}
