//! Tauri commands. Each returns the freshly rendered view so the webview
//! can repaint; long-running actions also push intermediate renders.

pub mod chat;
pub mod documents;
pub mod shell;

use crate::input::voice::{RecognitionOptions, SpeechCapture, VoiceError};
use crate::session::Session;
use std::time::Duration;
use tauri::{AppHandle, Emitter, Manager};
use tracing::warn;

pub const RENDER_EVENT: &str = "render";
pub const VOICE_START_EVENT: &str = "voice-start";

pub(crate) fn emit_render(app: &AppHandle, session: &Session) {
    if let Err(e) = app.emit(RENDER_EVENT, session.render_html()) {
        warn!(error = %e, "failed to push view to webview");
    }
}

/// Speech capture through the webview's own recognition API. The webview
/// answers through the `voice_*` commands.
pub struct WebviewSpeech {
    app: AppHandle,
}

impl WebviewSpeech {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl SpeechCapture for WebviewSpeech {
    fn begin(&self, options: &RecognitionOptions) -> Result<(), VoiceError> {
        self.app
            .emit(VOICE_START_EVENT, options)
            .map_err(|e| VoiceError::Capture(e.to_string()))
    }
}

pub fn spawn_status_poller(app: AppHandle, interval: Duration) {
    tauri::async_runtime::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            let session = app.state::<Session>();
            if session.poll_statuses().await {
                emit_render(&app, &session);
            }
        }
    });
}
