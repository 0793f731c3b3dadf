use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("failed to read DOCX file: {0}")]
    Parse(String),

    #[error("no headings found in document")]
    NoHeadings,
}
