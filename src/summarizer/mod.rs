pub mod client;
pub mod engine;

pub use client::InferenceClient;
pub use engine::{DecodingParams, SummaryEngine, SummaryOutcome, MAX_INPUT_LEN};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummarizerError {
    #[error("Summarization engine is not running. Please start the inference server first.")]
    NotRunning,

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Model is still loading, try again in a moment")]
    ModelLoading,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Nothing to summarize")]
    EmptyInput,
}
