use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("XLSX generation failed: {0}")]
    Xlsx(String),
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Xlsx(e.to_string())
    }
}
