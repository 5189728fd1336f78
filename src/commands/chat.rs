use super::emit_render;
use crate::input::text::KeyAction;
use crate::session::Session;
use tauri::{AppHandle, State};

/// Typing only updates state; repainting on every keystroke would reset the caret.
#[tauri::command]
pub fn set_question(session: State<'_, Session>, text: String) -> Result<(), String> {
    session.update(|state| state.set_question(text));
    Ok(())
}

/// Returns a new view only when the key submitted the question.
#[tauri::command]
pub async fn question_key(
    app: AppHandle,
    session: State<'_, Session>,
    key: String,
    shift: bool,
) -> Result<Option<String>, String> {
    match session.handle_key(&key, shift).await {
        KeyAction::Submit => {
            emit_render(&app, &session);
            Ok(Some(session.render_html()))
        }
        KeyAction::InsertNewline | KeyAction::Edit => Ok(None),
    }
}

#[tauri::command]
pub async fn ask_question(app: AppHandle, session: State<'_, Session>) -> Result<String, String> {
    session.ask_question().await;
    emit_render(&app, &session);
    Ok(session.render_html())
}
