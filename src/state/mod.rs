//! The client's state store.
//!
//! Every mutation goes through a method here. Async work lives in
//! [`crate::session::Session`], which calls the `begin_*` methods before a
//! request and the matching `finish_*` methods with the outcome.

pub mod layout;
pub mod selection;
pub mod upload;

use crate::config::ClientConfig;
use crate::config::UploadConfig;
use crate::input::file::{FilePicker, PickedFile};
use crate::input::text::submittable;
use crate::input::voice::{FAILED_MESSAGE, UNSUPPORTED_MESSAGE};
use crate::models::{Conversation, Document, DocumentId, ProcessingStatus};
use layout::Viewport;
use selection::{RequestTicket, Selection};
use tracing::debug;
use upload::UploadProgress;

/// Width assumed until the host reports the real viewport.
const INITIAL_WIDTH: u32 = 1280;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Info,
}

/// A dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

/// A question ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct AskRequest {
    pub ticket: RequestTicket,
    pub document_id: DocumentId,
    pub question: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoiceState {
    pub available: bool,
    pub listening: bool,
}

#[derive(Debug, Clone)]
pub struct AppState {
    documents: Vec<Document>,
    selection: Selection,
    question: String,
    asking: bool,
    upload: Option<UploadProgress>,
    upload_config: UploadConfig,
    picker: FilePicker,
    viewport: Viewport,
    documents_sheet_open: bool,
    voice: VoiceState,
    notice: Option<Notice>,
    pending_delete: Option<DocumentId>,
    generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl AppState {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            documents: Vec::new(),
            selection: Selection::None,
            question: String::new(),
            asking: false,
            upload: None,
            upload_config: config.upload.clone(),
            picker: FilePicker::default(),
            viewport: Viewport::new(config.compact_breakpoint, INITIAL_WIDTH),
            documents_sheet_open: false,
            voice: VoiceState::default(),
            notice: None,
            pending_delete: None,
            generation: 0,
        }
    }

    // ── Read access ──

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_document(&self) -> Option<&Document> {
        self.selection.document()
    }

    pub fn conversations(&self) -> &[Conversation] {
        self.selection.conversations()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn is_asking(&self) -> bool {
        self.asking
    }

    pub fn upload_progress(&self) -> Option<u8> {
        self.upload.as_ref().map(UploadProgress::percent)
    }

    pub fn is_uploading(&self) -> bool {
        self.upload.is_some()
    }

    pub fn is_compact(&self) -> bool {
        self.viewport.is_compact()
    }

    pub fn documents_sheet_open(&self) -> bool {
        self.documents_sheet_open
    }

    pub fn voice(&self) -> VoiceState {
        self.voice
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&Document> {
        self.pending_delete.and_then(|id| self.document(id))
    }

    /// The question box accepts input: a completed document is selected
    /// and no question is in flight.
    pub fn can_type_question(&self) -> bool {
        !self.asking && self.selected_document().is_some_and(Document::is_ready)
    }

    pub fn can_ask(&self) -> bool {
        self.can_type_question()
            && matches!(self.selection, Selection::Ready { .. })
            && submittable(&self.question).is_some()
    }

    // ── Documents ──

    /// Replace the document list with a fresh fetch and refresh the
    /// selected document's snapshot from it.
    pub fn replace_documents(&mut self, documents: Vec<Document>) {
        if let Some(selected) = self.selection.document_mut() {
            if let Some(fresh) = documents.iter().find(|d| d.id == selected.id) {
                *selected = fresh.clone();
            }
        }
        if let Some(id) = self.pending_delete {
            if !documents.iter().any(|d| d.id == id) {
                self.pending_delete = None;
            }
        }
        self.documents = documents;
    }

    /// Documents whose status is still worth polling.
    pub fn in_flight_documents(&self) -> Vec<DocumentId> {
        self.documents
            .iter()
            .filter(|d| d.processing_status.is_in_flight())
            .map(|d| d.id)
            .collect()
    }

    /// Returns `true` if anything changed.
    pub fn apply_status(&mut self, id: DocumentId, status: ProcessingStatus) -> bool {
        let mut changed = false;
        for doc in self.documents.iter_mut().filter(|d| d.id == id) {
            if doc.processing_status != status {
                doc.processing_status = status;
                changed = true;
            }
        }
        if let Some(selected) = self.selection.document_mut() {
            if selected.id == id && selected.processing_status != status {
                selected.processing_status = status;
                changed = true;
            }
        }
        changed
    }

    // ── Selection ──

    /// Select a document from the current list.
    pub fn begin_select(&mut self, id: DocumentId) -> Option<RequestTicket> {
        let document = self.document(id)?.clone();
        Some(self.begin_select_document(document))
    }

    /// Select a document snapshot, dropping the previous conversation list.
    pub fn begin_select_document(&mut self, document: Document) -> RequestTicket {
        self.generation += 1;
        let ticket = RequestTicket::new(document.id, self.generation);
        self.selection = Selection::Loading { document, ticket };
        if self.viewport.is_compact() {
            self.documents_sheet_open = false;
        }
        ticket
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.selection.ticket() == Some(ticket)
    }

    /// Apply a conversation fetch. Returns `false` when the response belongs
    /// to a selection that has since changed.
    pub fn finish_conversations(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<Conversation>, String>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(document_id = ticket.document_id, "discarding stale conversation list");
            return false;
        }
        let Some(document) = self.selection.document().cloned() else {
            return false;
        };
        self.selection = match result {
            Ok(conversations) => Selection::Ready {
                document,
                ticket,
                conversations,
            },
            Err(message) => Selection::Error {
                document,
                ticket,
                message,
            },
        };
        true
    }

    // ── Questions ──

    pub fn set_question(&mut self, text: impl Into<String>) {
        self.question = text.into();
    }

    /// Validate and mark a question as in flight. `None` means no request
    /// should be made.
    pub fn begin_ask(&mut self) -> Option<AskRequest> {
        if !self.can_ask() {
            return None;
        }
        let ticket = self.selection.ticket()?;
        let question = submittable(&self.question)?.to_string();
        self.asking = true;
        Some(AskRequest {
            ticket,
            document_id: ticket.document_id,
            question,
        })
    }

    /// Returns `true` if the answer was added to the thread.
    pub fn finish_ask(&mut self, ticket: RequestTicket, result: Result<Conversation, String>) -> bool {
        self.asking = false;
        match result {
            Ok(entry) => {
                if !self.is_current(ticket) {
                    debug!(document_id = ticket.document_id, "discarding stale answer");
                    return false;
                }
                if let Selection::Ready { conversations, .. } = &mut self.selection {
                    conversations.insert(0, entry);
                    self.question.clear();
                    true
                } else {
                    false
                }
            }
            Err(message) => {
                self.notice = Some(Notice::error(message));
                false
            }
        }
    }

    // ── Upload ──

    /// Start an upload for a picked file. `None` while another upload runs.
    pub fn begin_upload(&mut self, path: impl Into<std::path::PathBuf>) -> Option<PickedFile> {
        if self.upload.is_some() {
            return None;
        }
        let file = self.picker.pick(path)?;
        self.upload = Some(UploadProgress::new(&self.upload_config));
        Some(file)
    }

    pub fn tick_upload(&mut self) -> u8 {
        self.upload.as_mut().map(UploadProgress::tick).unwrap_or(0)
    }

    /// Snap progress to 100 and surface a failure. Returns the uploaded
    /// document on success.
    pub fn finish_upload(&mut self, result: Result<Document, String>) -> Option<Document> {
        if let Some(progress) = self.upload.as_mut() {
            progress.complete();
        }
        match result {
            Ok(document) => {
                if self.viewport.is_compact() {
                    self.documents_sheet_open = false;
                }
                Some(document)
            }
            Err(message) => {
                self.notice = Some(Notice::error(message));
                None
            }
        }
    }

    /// Hide the indicator and free the picker for the next file.
    pub fn reset_upload(&mut self) {
        self.upload = None;
        self.picker.reset();
    }

    // ── Delete ──

    pub fn request_delete(&mut self, id: DocumentId) -> bool {
        if self.document(id).is_none() {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The document the user just confirmed for deletion.
    pub fn confirm_delete(&mut self) -> Option<DocumentId> {
        self.pending_delete.take()
    }

    pub fn finish_delete(&mut self, id: DocumentId, result: Result<(), String>) -> bool {
        match result {
            Ok(()) => {
                self.documents.retain(|d| d.id != id);
                if self.selection.is_selected(id) {
                    self.selection = Selection::None;
                }
                true
            }
            Err(message) => {
                self.notice = Some(Notice::error(message));
                false
            }
        }
    }

    // ── Layout ──

    /// Returns `true` when the layout mode flipped.
    pub fn resize(&mut self, width: u32) -> bool {
        let flipped = self.viewport.resize(width);
        if flipped && !self.viewport.is_compact() {
            self.documents_sheet_open = false;
        }
        flipped
    }

    pub fn open_documents_sheet(&mut self) {
        if self.viewport.is_compact() {
            self.documents_sheet_open = true;
        }
    }

    pub fn close_documents_sheet(&mut self) {
        self.documents_sheet_open = false;
    }

    // ── Voice ──

    pub fn set_voice_available(&mut self, available: bool) {
        self.voice.available = available;
        if !available {
            self.voice.listening = false;
        }
    }

    /// Returns `true` if capture should be started.
    pub fn begin_listening(&mut self) -> bool {
        if !self.voice.available {
            self.notice = Some(Notice::info(UNSUPPORTED_MESSAGE));
            return false;
        }
        if self.voice.listening {
            return false;
        }
        self.voice.listening = true;
        true
    }

    pub fn finish_listening(&mut self, result: Result<String, String>) {
        self.voice.listening = false;
        match result {
            Ok(transcript) => self.question = transcript,
            Err(reason) => {
                debug!(%reason, "voice capture failed");
                self.notice = Some(Notice::error(FAILED_MESSAGE));
            }
        }
    }

    /// Capture turned out to be missing: drop back to text-only input.
    pub fn voice_unsupported(&mut self) {
        self.set_voice_available(false);
        self.notice = Some(Notice::info(UNSUPPORTED_MESSAGE));
    }

    pub fn end_listening(&mut self) {
        self.voice.listening = false;
    }

    // ── Notices ──

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
