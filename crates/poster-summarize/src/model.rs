use crate::error::SummarizeError;

/// Generation parameters for one summarization call.
#[derive(Debug, Clone)]
pub struct SummaryParams {
    /// Maximum generated length in tokens.
    pub max_len: usize,
    /// Minimum generated length in tokens; EOS is masked below this.
    pub min_len: usize,
    /// Beam width.
    pub num_beams: usize,
    /// Exponent applied to hypothesis length when ranking finished beams.
    pub length_penalty: f32,
    /// Stop as soon as `num_beams` hypotheses have finished.
    pub early_stopping: bool,
    /// Input token budget; longer inputs are truncated.
    pub max_input_tokens: usize,
}

impl Default for SummaryParams {
    fn default() -> Self {
        SummaryParams {
            max_len: 130,
            min_len: 30,
            num_beams: 4,
            length_penalty: 2.0,
            early_stopping: true,
            max_input_tokens: 1024,
        }
    }
}

/// An abstractive summarization model.
///
/// `summarize` blocks for the duration of the inference; callers on an
/// async runtime must dispatch it to a worker thread (see
/// [`crate::sections::SectionSummarizer`]).
pub trait SummaryModel: Send + Sync {
    fn summarize(&self, text: &str, params: &SummaryParams) -> Result<String, SummarizeError>;
}
