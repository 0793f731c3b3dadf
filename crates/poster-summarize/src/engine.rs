use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::t5;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::error::SummarizeError;
use crate::model::{SummaryModel, SummaryParams};

/// Candle-backed encoder-decoder summarization engine.
///
/// Loads a T5-family checkpoint (`config.json`, `tokenizer.json`,
/// `model.safetensors`) from a local directory and decodes with beam
/// search. The model holds KV-cache state, so inference is serialized
/// behind a mutex; concurrency above that is bounded by the worker pool
/// in [`crate::sections::SectionSummarizer`].
pub struct SummaryEngine {
    inner: Mutex<EngineState>,
}

struct EngineState {
    model: t5::T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    device: Device,
    config: t5::Config,
}

impl SummaryEngine {
    /// Load the checkpoint from `model_dir`, preferring the GPU when one
    /// is available.
    pub fn load(model_dir: &Path) -> Result<Self, SummarizeError> {
        let device = Device::cuda_if_available(0)?;

        let config_file = File::open(model_dir.join("config.json"))?;
        let config: t5::Config = serde_json::from_reader(config_file)?;

        let tokenizer = Tokenizer::from_file(model_dir.join("tokenizer.json"))
            .map_err(|e| SummarizeError::Tokenizer(e.to_string()))?;

        let weights = model_dir.join("model.safetensors");
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, &device)? };
        let model = t5::T5ForConditionalGeneration::load(vb, &config)
            .map_err(|e| SummarizeError::Load(e.to_string()))?;

        info!(dir = %model_dir.display(), cuda = device.is_cuda(), "summarization model loaded");

        Ok(SummaryEngine {
            inner: Mutex::new(EngineState {
                model,
                tokenizer,
                device,
                config,
            }),
        })
    }
}

impl SummaryModel for SummaryEngine {
    fn summarize(&self, text: &str, params: &SummaryParams) -> Result<String, SummarizeError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| SummarizeError::Model("engine mutex poisoned".to_string()))?;
        state.generate(text, params)
    }
}

/// One beam hypothesis. `score` is the sum of token log-probabilities
/// over the generated suffix (the decoder start token excluded).
#[derive(Clone)]
struct Beam {
    tokens: Vec<u32>,
    score: f32,
    finished: bool,
}

impl Beam {
    fn generated_len(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    /// Length-penalized score used to rank hypotheses against each other.
    fn ranked_score(&self, length_penalty: f32) -> f32 {
        let len = self.generated_len().max(1) as f32;
        self.score / len.powf(length_penalty)
    }
}

impl EngineState {
    fn generate(&mut self, text: &str, params: &SummaryParams) -> Result<String, SummarizeError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| SummarizeError::Tokenizer(e.to_string()))?;
        let mut input_ids: Vec<u32> = encoding.get_ids().to_vec();
        input_ids.truncate(params.max_input_tokens);

        let input = Tensor::new(input_ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let encoder_output = self.model.encode(&input)?;

        let start_token = self
            .config
            .decoder_start_token_id
            .unwrap_or(self.config.pad_token_id) as u32;
        let eos_token = self.config.eos_token_id as u32;

        let mut beams = vec![Beam {
            tokens: vec![start_token],
            score: 0.0,
            finished: false,
        }];
        let mut finished: Vec<Beam> = Vec::new();

        for _step in 0..params.max_len {
            let mut candidates: Vec<Beam> = Vec::new();

            for beam in &beams {
                let logprobs = self.step_logprobs(beam, &encoder_output)?;
                let allow_eos = beam.generated_len() + 1 >= params.min_len;
                for (token, logprob) in top_tokens(&logprobs, params.num_beams, allow_eos, eos_token)
                {
                    let mut tokens = beam.tokens.clone();
                    tokens.push(token);
                    candidates.push(Beam {
                        tokens,
                        score: beam.score + logprob,
                        finished: token == eos_token,
                    });
                }
            }

            if candidates.is_empty() {
                break;
            }

            candidates.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            candidates.truncate(params.num_beams);

            beams = Vec::new();
            for candidate in candidates {
                if candidate.finished {
                    finished.push(candidate);
                } else {
                    beams.push(candidate);
                }
            }

            if params.early_stopping && finished.len() >= params.num_beams {
                break;
            }
            if beams.is_empty() {
                break;
            }
        }

        // Hypotheses that ran into the length limit still compete.
        finished.extend(beams);

        let best = finished
            .into_iter()
            .max_by(|a, b| {
                a.ranked_score(params.length_penalty)
                    .partial_cmp(&b.ranked_score(params.length_penalty))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or_else(|| SummarizeError::Model("beam search produced no output".to_string()))?;

        debug!(
            tokens = best.generated_len(),
            score = best.ranked_score(params.length_penalty),
            "beam search finished"
        );

        self.tokenizer
            .decode(&best.tokens[1..], true)
            .map(|s| s.trim().to_string())
            .map_err(|e| SummarizeError::Tokenizer(e.to_string()))
    }

    /// Log-probabilities over the vocabulary for the next token of `beam`.
    ///
    /// The KV cache is cleared and the full prefix re-decoded each step:
    /// beams share one model instance, so incremental caching across
    /// interleaved hypotheses would serve stale state.
    fn step_logprobs(
        &mut self,
        beam: &Beam,
        encoder_output: &Tensor,
    ) -> Result<Vec<f32>, SummarizeError> {
        self.model.clear_kv_cache();
        let decoder_input = Tensor::new(beam.tokens.as_slice(), &self.device)?.unsqueeze(0)?;
        let mut logits = self.model.decode(&decoder_input, encoder_output)?.squeeze(0)?;
        if logits.rank() > 1 {
            let last = logits.dim(0)? - 1;
            logits = logits.get(last)?;
        }
        let logprobs = candle_nn::ops::log_softmax(&logits, 0)?;
        Ok(logprobs.to_vec1::<f32>()?)
    }
}

/// The `k` highest-probability next tokens, optionally masking EOS while
/// the hypothesis is below the minimum length.
fn top_tokens(logprobs: &[f32], k: usize, allow_eos: bool, eos_token: u32) -> Vec<(u32, f32)> {
    let mut indexed: Vec<(u32, f32)> = logprobs
        .iter()
        .enumerate()
        .filter(|(idx, _)| allow_eos || *idx as u32 != eos_token)
        .map(|(idx, &lp)| (idx as u32, lp))
        .collect();
    indexed.sort_unstable_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    indexed.truncate(k);
    indexed
}
