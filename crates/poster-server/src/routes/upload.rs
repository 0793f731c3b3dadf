use std::path::Path;

use crate::error::ApiError;

/// A document to process, whether it arrived as a multipart upload or as
/// a server-side path.
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Resolve the mutually-required `file` / `path` inputs: exactly one must
/// be supplied.
pub async fn resolve_source(
    upload: Option<(String, Vec<u8>)>,
    path: Option<String>,
) -> Result<UploadedDocument, ApiError> {
    match (upload, path) {
        (Some(_), Some(_)) => Err(ApiError::BadRequest(
            "supply either an uploaded file or a server-side path, not both".to_string(),
        )),
        (Some((filename, bytes)), None) => Ok(UploadedDocument { filename, bytes }),
        (None, Some(path)) => {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| ApiError::BadRequest(format!("cannot read path {path}: {e}")))?;
            let filename = Path::new(&path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.clone());
            Ok(UploadedDocument { filename, bytes })
        }
        (None, None) => Err(ApiError::BadRequest(
            "either an uploaded file or a server-side path is required".to_string(),
        )),
    }
}

/// Lowercased extension after the final dot, empty when there is none.
pub fn extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}
