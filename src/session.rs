//! Drives the state store with backend calls.
//!
//! The store lock is only ever taken between awaits, so a `Session` can be
//! shared by the desktop shell's async commands.

use crate::api::{ApiClient, ApiError};
use crate::config::{ClientConfig, UploadConfig};
use crate::input::text::{interpret_key, KeyAction};
use crate::input::voice::{RecognitionOptions, SpeechCapture, VoiceError};
use crate::models::{Document, DocumentId};
use crate::state::selection::RequestTicket;
use crate::state::AppState;
use crate::view;
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

const UPLOAD_FAILED: &str = "Upload failed";
const ASK_FAILED: &str = "Failed to get answer";
const DELETE_FAILED: &str = "Failed to delete document";
const CONVERSATIONS_FAILED: &str = "Failed to load conversations";

pub struct Session {
    api: ApiClient,
    state: Mutex<AppState>,
    upload: UploadConfig,
    speech: Option<Box<dyn SpeechCapture>>,
}

fn report(err: &ApiError, what: &str) {
    if err.is_transport() {
        error!(error = %err, "{} failed: no response from backend", what);
    } else {
        warn!(error = %err, "{} failed", what);
    }
}

impl Session {
    pub fn new(
        config: &ClientConfig,
        speech: Option<Box<dyn SpeechCapture>>,
    ) -> Result<Self, ApiError> {
        Ok(Self::with_client(ApiClient::from_config(config)?, config, speech))
    }

    fn with_client(
        api: ApiClient,
        config: &ClientConfig,
        speech: Option<Box<dyn SpeechCapture>>,
    ) -> Self {
        Self {
            api,
            state: Mutex::new(AppState::new(config)),
            upload: config.upload.clone(),
            speech,
        }
    }

    fn state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> AppState {
        self.state().clone()
    }

    /// Run a synchronous state change (typing, resizing, dialogs).
    pub fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(&mut self.state())
    }

    pub fn render_html(&self) -> String {
        view::render_html(&self.state())
    }

    // ── Documents ──

    /// Fetch the document list. A failure is logged and the previous list kept.
    pub async fn refresh_documents(&self) -> bool {
        match self.api.list_documents().await {
            Ok(documents) => {
                self.state().replace_documents(documents);
                true
            }
            Err(e) => {
                report(&e, "document list");
                false
            }
        }
    }

    pub async fn select_document(&self, id: DocumentId) -> bool {
        let ticket = self.state().begin_select(id);
        match ticket {
            Some(ticket) => self.load_conversations(ticket).await,
            None => {
                debug!(document_id = id, "select ignored: unknown document");
                false
            }
        }
    }

    async fn load_conversations(&self, ticket: RequestTicket) -> bool {
        let result = self
            .api
            .list_conversations(ticket.document_id)
            .await
            .map_err(|e| {
                report(&e, "conversation fetch");
                e.user_message(CONVERSATIONS_FAILED)
            });
        self.state().finish_conversations(ticket, result)
    }

    /// Upload a picked file while reporting simulated progress, then refresh
    /// the list and select the new document.
    pub async fn upload_file(
        &self,
        path: impl Into<PathBuf>,
        on_progress: impl Fn(u8) + Send,
    ) -> Option<Document> {
        let picked = self.state().begin_upload(path);
        let Some(file) = picked else {
            debug!("upload ignored: another upload is running");
            return None;
        };
        info!(filename = %file.filename, "uploading document");
        on_progress(0);

        let request = self.api.upload_document(&file.path);
        tokio::pin!(request);
        let mut ticker = tokio::time::interval(self.upload.tick());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;
        let result = loop {
            tokio::select! {
                result = &mut request => break result,
                _ = ticker.tick() => {
                    let percent = self.state().tick_upload();
                    on_progress(percent);
                }
            }
        };

        let result = result.map_err(|e| {
            report(&e, "upload");
            e.user_message(UPLOAD_FAILED)
        });
        let uploaded = self.state().finish_upload(result);
        on_progress(100);

        if let Some(document) = &uploaded {
            info!(document_id = document.id, filename = %document.filename, "upload finished");
            self.refresh_documents().await;
            let ticket = {
                let mut state = self.state();
                let snapshot = state
                    .document(document.id)
                    .cloned()
                    .unwrap_or_else(|| document.clone());
                state.begin_select_document(snapshot)
            };
            self.load_conversations(ticket).await;
        }
        self.state().reset_upload();
        uploaded
    }

    /// Ask the current question about the selected document. Returns `true`
    /// when an answer was added to the thread.
    pub async fn ask_question(&self) -> bool {
        let request = self.state().begin_ask();
        let Some(request) = request else {
            return false;
        };
        let result = self
            .api
            .ask_question(&request.question, request.document_id)
            .await
            .map_err(|e| {
                report(&e, "question");
                e.user_message(ASK_FAILED)
            });
        self.state().finish_ask(request.ticket, result)
    }

    /// Key press in the question box; Enter submits.
    pub async fn handle_key(&self, key: &str, shift: bool) -> KeyAction {
        let action = interpret_key(key, shift);
        if action == KeyAction::Submit {
            self.ask_question().await;
        }
        action
    }

    /// Delete the document the user confirmed, then refresh the list.
    pub async fn confirm_delete(&self) -> bool {
        let id = self.state().confirm_delete();
        let Some(id) = id else {
            return false;
        };
        let result = self.api.delete_document(id).await.map_err(|e| {
            report(&e, "delete");
            e.user_message(DELETE_FAILED)
        });
        let deleted = self.state().finish_delete(id, result);
        if deleted {
            info!(document_id = id, "document deleted");
            self.refresh_documents().await;
        }
        deleted
    }

    /// Poll every document the backend is still working on. Returns `true`
    /// if any status changed.
    pub async fn poll_statuses(&self) -> bool {
        let ids = self.state().in_flight_documents();
        if ids.is_empty() {
            return false;
        }
        let results = join_all(ids.iter().map(|id| self.api.document_status(*id))).await;

        let mut state = self.state();
        let mut changed = false;
        for (id, result) in ids.into_iter().zip(results) {
            match result {
                Ok(status) => changed |= state.apply_status(id, status),
                Err(e) => debug!(document_id = id, error = %e, "status poll failed"),
            }
        }
        changed
    }

    // ── Voice ──

    /// Startup presence check: voice works only if the host reports support
    /// and a capture backend is installed.
    pub fn detect_voice(&self, host_supported: bool) -> bool {
        let available = host_supported && self.speech.is_some();
        self.state().set_voice_available(available);
        available
    }

    pub fn start_voice(&self) -> bool {
        if !self.state().begin_listening() {
            return false;
        }
        let Some(speech) = &self.speech else {
            self.state().voice_unsupported();
            return false;
        };
        match speech.begin(&RecognitionOptions::default()) {
            Ok(()) => true,
            Err(VoiceError::Unsupported) => {
                debug!("capture backend reports no speech support");
                self.state().voice_unsupported();
                false
            }
            Err(e) => {
                warn!(error = %e, "could not start voice capture");
                self.state().finish_listening(Err(e.to_string()));
                false
            }
        }
    }

    pub fn voice_result(&self, result: Result<String, String>) {
        self.state().finish_listening(result);
    }

    pub fn voice_ended(&self) {
        self.state().end_listening();
    }
}
