use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use poster_server::{AppState, build_router};
use poster_summarize::{NoopCache, RedisCache, SectionSummarizer, SummaryCache, SummaryEngine};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let model_dir = PathBuf::from(
        env::var("POSTER_MODEL_DIR").map_err(|_| eyre::eyre!("POSTER_MODEL_DIR is required"))?,
    );
    let redis_url =
        env::var("POSTER_REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/0".to_string());
    let port: u16 = env::var("POSTER_PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse()?;
    let pool_size: usize = env::var("POSTER_POOL_SIZE")
        .unwrap_or_else(|_| "2".to_string())
        .parse()?;

    // Model load is the slow part of startup; keep it off the runtime
    // worker threads.
    let engine =
        tokio::task::spawn_blocking(move || SummaryEngine::load(&model_dir)).await??;

    // An unreachable cache backend is tolerated: the service starts with a
    // no-op cache and summaries are recomputed every time.
    let cache: Arc<dyn SummaryCache> = match RedisCache::connect(&redis_url).await {
        Ok(cache) => Arc::new(cache),
        Err(e) => {
            tracing::warn!(url = %redis_url, error = %e, "redis unavailable, caching disabled");
            Arc::new(NoopCache)
        }
    };

    let state = AppState {
        summarizer: Arc::new(SectionSummarizer::new(Arc::new(engine), cache, pool_size)),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "poster service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
