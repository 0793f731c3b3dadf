use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("model inference failed: {0}")]
    Model(String),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("failed to load model files: {0}")]
    Load(String),

    #[error("model config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("summarization worker failed: {0}")]
    Worker(String),
}

impl From<candle_core::Error> for SummarizeError {
    fn from(e: candle_core::Error) -> Self {
        SummarizeError::Model(e.to_string())
    }
}
