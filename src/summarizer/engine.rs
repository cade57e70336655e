use std::sync::Arc;

use tokio::sync::OnceCell;

use super::{InferenceClient, SummarizerError};

/// Longest input forwarded to the model, in bytes.
///
/// bart-large-cnn reads 1024 tokens; anything much past this is beyond its
/// span anyway, so the cut happens here where it can be reported instead of
/// silently inside the model.
pub const MAX_INPUT_LEN: usize = 4096;

/// Decoding parameters sent with every request. Not user-adjustable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodingParams {
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
}

impl Default for DecodingParams {
    fn default() -> Self {
        Self {
            max_length: 130,
            min_length: 30,
            do_sample: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    pub summary: String,
    pub truncated: bool,
}

/// Wraps the inference client with fixed decoding parameters and a
/// one-time model warmup.
pub struct SummaryEngine {
    client: Arc<InferenceClient>,
    params: DecodingParams,
    warmup: OnceCell<()>,
}

impl SummaryEngine {
    pub fn new() -> Self {
        Self::with_client(Arc::new(InferenceClient::new()))
    }

    pub fn with_client(client: Arc<InferenceClient>) -> Self {
        Self {
            client,
            params: DecodingParams::default(),
            warmup: OnceCell::new(),
        }
    }

    pub fn client(&self) -> &InferenceClient {
        &self.client
    }

    pub fn params(&self) -> DecodingParams {
        self.params
    }

    pub fn is_warmed_up(&self) -> bool {
        self.warmup.initialized()
    }

    /// Load the model on the server, at most once per process.
    ///
    /// Every summarize call funnels through this; callers wanting an eager
    /// warmup can invoke it directly. Concurrent callers share the same
    /// in-flight initialization.
    pub async fn ensure_ready(&self) -> Result<(), SummarizerError> {
        self.warmup
            .get_or_try_init(|| async {
                if !self.client.is_running().await {
                    return Err(SummarizerError::NotRunning);
                }
                self.client.load_model().await?;
                log::info!("summarization model ready: {}", self.client.model());
                Ok(())
            })
            .await?;
        Ok(())
    }

    /// Summarize `text`, truncating over-long input on a char boundary.
    pub async fn summarize(&self, text: &str) -> Result<SummaryOutcome, SummarizerError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SummarizerError::EmptyInput);
        }

        self.ensure_ready().await?;

        let (input, truncated) = truncate_input(trimmed, MAX_INPUT_LEN);
        if truncated {
            log::warn!(
                "input of {} bytes exceeds the model span, truncated to {} bytes",
                trimmed.len(),
                input.len()
            );
        }

        let summary = self
            .client
            .summarize(
                input,
                self.params.max_length,
                self.params.min_length,
                self.params.do_sample,
            )
            .await?;

        if summary.trim().is_empty() {
            return Err(SummarizerError::InvalidResponse(
                "model returned an empty summary".to_string(),
            ));
        }

        Ok(SummaryOutcome { summary, truncated })
    }
}

impl Default for SummaryEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut `text` down to at most `max_bytes`, never splitting a char.
fn truncate_input(text: &str, max_bytes: usize) -> (&str, bool) {
    if text.len() <= max_bytes {
        return (text, false);
    }

    let mut cut = max_bytes;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    (&text[..cut], true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = DecodingParams::default();
        assert_eq!(params.max_length, 130);
        assert_eq!(params.min_length, 30);
        assert!(!params.do_sample);
    }

    #[test]
    fn test_short_input_not_truncated() {
        let (out, truncated) = truncate_input("short text", MAX_INPUT_LEN);
        assert_eq!(out, "short text");
        assert!(!truncated);
    }

    #[test]
    fn test_input_at_limit_not_truncated() {
        let text = "a".repeat(MAX_INPUT_LEN);
        let (out, truncated) = truncate_input(&text, MAX_INPUT_LEN);
        assert_eq!(out.len(), MAX_INPUT_LEN);
        assert!(!truncated);
    }

    #[test]
    fn test_long_input_truncated() {
        let text = "a".repeat(MAX_INPUT_LEN + 500);
        let (out, truncated) = truncate_input(&text, MAX_INPUT_LEN);
        assert_eq!(out.len(), MAX_INPUT_LEN);
        assert!(truncated);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 'é' is two bytes; an odd byte limit lands mid-char
        let text = "é".repeat(8);
        let (out, truncated) = truncate_input(&text, 7);
        assert_eq!(out.len(), 6);
        assert!(truncated);
        assert!(out.chars().all(|c| c == 'é'));
    }

    #[tokio::test]
    async fn test_empty_input_rejected_before_dispatch() {
        let engine = SummaryEngine::new();
        assert!(matches!(
            engine.summarize("").await,
            Err(SummarizerError::EmptyInput)
        ));
    }

    #[tokio::test]
    async fn test_whitespace_input_rejected_before_dispatch() {
        let engine = SummaryEngine::new();
        assert!(matches!(
            engine.summarize("   \n\t ").await,
            Err(SummarizerError::EmptyInput)
        ));
    }

    #[test]
    fn test_not_warmed_up_initially() {
        let engine = SummaryEngine::new();
        assert!(!engine.is_warmed_up());
    }
}
