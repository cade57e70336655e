mod commands;
mod summarizer;

use commands::SummarizerState;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::init();

    tauri::Builder::default()
        .setup(|app| {
            app.manage(SummarizerState::default());
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::summarize_text,
            commands::is_summarizing,
            commands::get_engine_status,
            commands::warm_up_engine,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
