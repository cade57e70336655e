use serde::{Deserialize, Serialize};
use tauri::State;

use crate::commands::summarize::SummarizerState;

#[derive(Debug, Serialize, Deserialize)]
pub struct EngineStatus {
    pub running: bool,
    pub model: String,
    pub warmed_up: bool,
}

/// Check if the inference server is reachable and the model is loaded
#[tauri::command]
pub async fn get_engine_status(state: State<'_, SummarizerState>) -> Result<EngineStatus, String> {
    let running = state.engine.client().is_running().await;

    Ok(EngineStatus {
        running,
        model: state.engine.client().model().to_string(),
        warmed_up: state.engine.is_warmed_up(),
    })
}

/// Load the model ahead of the first summarize request
#[tauri::command]
pub async fn warm_up_engine(state: State<'_, SummarizerState>) -> Result<(), String> {
    state.engine.ensure_ready().await.map_err(|e| e.to_string())
}
