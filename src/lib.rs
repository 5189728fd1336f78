pub mod api;
pub mod config;
pub mod input;
pub mod logging;
pub mod models;
pub mod session;
pub mod state;
pub mod view;

#[cfg(feature = "desktop")]
mod commands;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use config::ClientConfig;
    use session::Session;
    use tauri::Manager;

    let loaded = ClientConfig::load(None);
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::init_logging(&config.log_level);
    if let Err(e) = &loaded {
        tracing::warn!(error = %e, "using default configuration");
    }

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(move |app| {
            let speech = commands::WebviewSpeech::new(app.handle().clone());
            let session = Session::new(&config, Some(Box::new(speech)))?;
            app.manage(session);
            if let Some(interval) = config.status_poll_interval() {
                commands::spawn_status_poller(app.handle().clone(), interval);
            }
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::shell::init_session,
            commands::shell::resize_viewport,
            commands::shell::open_documents,
            commands::shell::close_documents,
            commands::shell::dismiss_notice,
            commands::shell::start_voice,
            commands::shell::voice_result,
            commands::shell::voice_error,
            commands::shell::voice_end,
            commands::documents::refresh_documents,
            commands::documents::select_document,
            commands::documents::pick_file,
            commands::documents::request_delete,
            commands::documents::cancel_delete,
            commands::documents::confirm_delete,
            commands::chat::set_question,
            commands::chat::question_key,
            commands::chat::ask_question,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
