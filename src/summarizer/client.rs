use serde::{Deserialize, Serialize};

use super::SummarizerError;

const DEFAULT_BASE_URL: &str = "http://localhost:8090";
const DEFAULT_MODEL: &str = "facebook/bart-large-cnn";

#[derive(Debug, Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: SummarizationParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct SummarizationParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
    use_cache: bool,
}

#[derive(Debug, Deserialize)]
struct SummarizationOutput {
    summary_text: String,
}

pub struct InferenceClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl InferenceClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), DEFAULT_MODEL.to_string())
    }

    pub fn with_base_url(base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Check if the inference server is running
    pub async fn is_running(&self) -> bool {
        match self.client.get(&self.base_url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// Force the model weights resident on the server.
    ///
    /// The server loads a model on first use; this sends a minimal request
    /// with `wait_for_model` set and blocks until loading completes.
    pub async fn load_model(&self) -> Result<(), SummarizerError> {
        self.request("Ready.", 2, 1, false, true).await.map(|_| ())
    }

    /// Summarize `text` with the given decoding parameters
    pub async fn summarize(
        &self,
        text: &str,
        max_length: u32,
        min_length: u32,
        do_sample: bool,
    ) -> Result<String, SummarizerError> {
        log::debug!("requesting summary for {} chars", text.len());
        self.request(text, max_length, min_length, do_sample, false)
            .await
    }

    async fn request(
        &self,
        text: &str,
        max_length: u32,
        min_length: u32,
        do_sample: bool,
        wait_for_model: bool,
    ) -> Result<String, SummarizerError> {
        let url = format!("{}/models/{}", self.base_url, self.model);

        let request = build_request(text, max_length, min_length, do_sample, wait_for_model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    SummarizerError::NotRunning
                } else {
                    SummarizerError::RequestFailed(e.to_string())
                }
            })?;

        match response.status().as_u16() {
            404 => return Err(SummarizerError::ModelNotFound(self.model.clone())),
            503 => return Err(SummarizerError::ModelLoading),
            _ => {}
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::RequestFailed(format!(
                "Status: {}, Body: {}",
                status, body
            )));
        }

        let outputs: Vec<SummarizationOutput> = response
            .json()
            .await
            .map_err(|e| SummarizerError::InvalidResponse(e.to_string()))?;

        first_summary(outputs)
    }
}

impl Default for InferenceClient {
    fn default() -> Self {
        Self::new()
    }
}

fn build_request(
    text: &str,
    max_length: u32,
    min_length: u32,
    do_sample: bool,
    wait_for_model: bool,
) -> SummarizationRequest<'_> {
    SummarizationRequest {
        inputs: text,
        parameters: SummarizationParameters {
            max_length,
            min_length,
            do_sample,
        },
        options: InferenceOptions {
            wait_for_model,
            use_cache: true,
        },
    }
}

fn first_summary(outputs: Vec<SummarizationOutput>) -> Result<String, SummarizerError> {
    outputs
        .into_iter()
        .next()
        .map(|o| o.summary_text)
        .ok_or_else(|| SummarizerError::InvalidResponse("empty result array".to_string()))
}
