use super::emit_render;
use crate::input::file::ACCEPTED_EXTENSIONS;
use crate::models::DocumentId;
use crate::session::Session;
use futures::channel::oneshot;
use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;

#[tauri::command]
pub async fn refresh_documents(session: State<'_, Session>) -> Result<String, String> {
    session.refresh_documents().await;
    Ok(session.render_html())
}

#[tauri::command]
pub async fn select_document(
    app: AppHandle,
    session: State<'_, Session>,
    id: DocumentId,
) -> Result<String, String> {
    session.select_document(id).await;
    emit_render(&app, &session);
    Ok(session.render_html())
}

#[tauri::command]
pub async fn pick_file(app: AppHandle, session: State<'_, Session>) -> Result<String, String> {
    if session.update(|state| state.is_uploading()) {
        return Ok(session.render_html());
    }
    let (tx, rx) = oneshot::channel();
    app.dialog()
        .file()
        .add_filter("Documents", ACCEPTED_EXTENSIONS)
        .pick_file(move |picked| {
            let _ = tx.send(picked);
        });
    let Ok(Some(picked)) = rx.await else {
        return Ok(session.render_html());
    };
    let path = picked.into_path().map_err(|e| e.to_string())?;

    let shared: &Session = &session;
    shared
        .upload_file(path, |_| emit_render(&app, shared))
        .await;
    Ok(session.render_html())
}

#[tauri::command]
pub fn request_delete(session: State<'_, Session>, id: DocumentId) -> Result<String, String> {
    session.update(|state| state.request_delete(id));
    Ok(session.render_html())
}

#[tauri::command]
pub fn cancel_delete(session: State<'_, Session>) -> Result<String, String> {
    session.update(|state| state.cancel_delete());
    Ok(session.render_html())
}

#[tauri::command]
pub async fn confirm_delete(session: State<'_, Session>) -> Result<String, String> {
    session.confirm_delete().await;
    Ok(session.render_html())
}
