use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Unified API error type for all route handlers.
///
/// Caller mistakes (unparseable input, missing inputs, unresolvable
/// mapping, no headings, unsupported extension) map to 400; everything
/// else to 500 with the error's string representation. The body carries a
/// message string only, no structured code.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<poster_tabular::TabularError> for ApiError {
    fn from(e: poster_tabular::TabularError) -> Self {
        // Parse, sheet, encoding, and mapping-resolution failures are all
        // request problems.
        ApiError::BadRequest(e.to_string())
    }
}

impl From<poster_docx::DocxError> for ApiError {
    fn from(e: poster_docx::DocxError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<poster_summarize::SummarizeError> for ApiError {
    fn from(e: poster_summarize::SummarizeError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<poster_export::ExportError> for ApiError {
    fn from(e: poster_export::ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
