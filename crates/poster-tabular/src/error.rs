use thiserror::Error;

#[derive(Debug, Error)]
pub enum TabularError {
    #[error("failed to parse table data: {0}")]
    Parse(String),

    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    #[error("workbook contains no sheets")]
    NoSheets,

    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error(
        "no field mapping could be resolved: supply a template file, an explicit mapping, or a supported language code"
    )]
    NoMapping,
}
