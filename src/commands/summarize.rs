use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tauri::State;

use crate::summarizer::SummaryEngine;

pub struct SummarizerState {
    pub engine: Arc<SummaryEngine>,
    pub is_summarizing: AtomicBool,
}

impl Default for SummarizerState {
    fn default() -> Self {
        Self {
            engine: Arc::new(SummaryEngine::new()),
            is_summarizing: AtomicBool::new(false),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub truncated: bool,
}

/// Blank input never reaches the engine.
fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Summarize the text pasted into the shell
#[tauri::command]
pub async fn summarize_text(
    text: String,
    state: State<'_, SummarizerState>,
) -> Result<SummaryResponse, String> {
    if is_blank(&text) {
        return Err("Please enter some text to summarize.".to_string());
    }

    // Check if already summarizing
    if state.is_summarizing.swap(true, Ordering::SeqCst) {
        return Err("Already summarizing".to_string());
    }

    // Ensure we reset the flag when done
    let _guard = scopeguard::guard((), |_| {
        state.is_summarizing.store(false, Ordering::SeqCst);
    });

    let outcome = state
        .engine
        .summarize(&text)
        .await
        .map_err(|e| e.to_string())?;

    Ok(SummaryResponse {
        summary: outcome.summary,
        truncated: outcome.truncated,
    })
}

/// Check if a summary is currently being generated
#[tauri::command]
pub fn is_summarizing(state: State<'_, SummarizerState>) -> bool {
    state.is_summarizing.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_blank() {
        assert!(is_blank(""));
    }

    #[test]
    fn test_whitespace_input_is_blank() {
        assert!(is_blank("   "));
        assert!(is_blank(" \n\t "));
    }

    #[test]
    fn test_real_input_is_not_blank() {
        assert!(!is_blank("A 500-word news article."));
    }

    #[test]
    fn test_response_payload_shape() {
        let response = SummaryResponse {
            summary: "A short summary.".to_string(),
            truncated: true,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["summary"], "A short summary.");
        assert_eq!(value["truncated"], true);
    }
}
