use crate::session::Session;
use tauri::State;
use tracing::debug;

/// First call from the webview: report the viewport and whether it can do
/// speech recognition, then load documents.
#[tauri::command]
pub async fn init_session(
    session: State<'_, Session>,
    viewport_width: u32,
    speech_supported: bool,
) -> Result<String, String> {
    session.update(|state| state.resize(viewport_width));
    let voice = session.detect_voice(speech_supported);
    debug!(viewport_width, voice, "session initialised");
    session.refresh_documents().await;
    Ok(session.render_html())
}

/// Returns a new view only when the layout mode flipped.
#[tauri::command]
pub fn resize_viewport(session: State<'_, Session>, width: u32) -> Result<Option<String>, String> {
    if session.update(|state| state.resize(width)) {
        Ok(Some(session.render_html()))
    } else {
        Ok(None)
    }
}

#[tauri::command]
pub fn open_documents(session: State<'_, Session>) -> Result<String, String> {
    session.update(|state| state.open_documents_sheet());
    Ok(session.render_html())
}

#[tauri::command]
pub fn close_documents(session: State<'_, Session>) -> Result<String, String> {
    session.update(|state| state.close_documents_sheet());
    Ok(session.render_html())
}

#[tauri::command]
pub fn dismiss_notice(session: State<'_, Session>) -> Result<String, String> {
    session.update(|state| state.dismiss_notice());
    Ok(session.render_html())
}

#[tauri::command]
pub fn start_voice(session: State<'_, Session>) -> Result<String, String> {
    session.start_voice();
    Ok(session.render_html())
}

#[tauri::command]
pub fn voice_result(session: State<'_, Session>, transcript: String) -> Result<String, String> {
    session.voice_result(Ok(transcript));
    Ok(session.render_html())
}

#[tauri::command]
pub fn voice_error(session: State<'_, Session>, error: String) -> Result<String, String> {
    session.voice_result(Err(error));
    Ok(session.render_html())
}

#[tauri::command]
pub fn voice_end(session: State<'_, Session>) -> Result<String, String> {
    session.voice_ended();
    Ok(session.render_html())
}
