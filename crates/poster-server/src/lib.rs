//! poster-server
//!
//! HTTP surface for the poster extraction service. Route handlers stay
//! thin: multipart parsing and error→status mapping here, everything else
//! in the pipeline crates.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod routes;
pub mod state;

pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::health::welcome))
        .route("/health", get(routes::health::health_check))
        .route("/process/excel", post(routes::excel::process_excel))
        .route("/process/docx", post(routes::docx::process_docx))
        .layer(cors)
        .with_state(state)
}
