//! Presentation tree: a pure function of [`AppState`].
//!
//! Interactive elements carry a `data-action` attribute (and `data-id`
//! where a document is involved); the host forwards those to the session.

pub mod format;
pub mod html;

use crate::input::file::{ACCEPTED_EXTENSIONS, ADVISORY_MAX_BYTES};
use crate::models::{Conversation, Document, ProcessingStatus};
use crate::state::selection::Selection;
use crate::state::{AppState, NoticeKind};
use format::{confidence_label, document_count, file_icon, format_file_size, status_badge};
use html::{el, Element, Node};

pub const APP_TITLE: &str = "AI Document Processor";

pub fn render(state: &AppState) -> Node {
    let compact = state.is_compact();
    let mut main = el("main").class(if compact { "grid compact" } else { "grid wide" });
    if !compact {
        main = main.child(el("aside").class("documents-column").child(document_panel(state)));
    }
    main = main.child(chat_panel(state));

    let mut root = el("div")
        .attr("id", "app")
        .class(if compact { "app compact" } else { "app wide" })
        .child(header(state));
    if let Some(notice) = notice(state) {
        root = root.child(notice);
    }
    if compact && state.documents_sheet_open() {
        root = root.child(
            el("div")
                .attr("id", "documents-sheet")
                .class("sheet-overlay")
                .child(el("div").class("sheet").child(document_panel(state))),
        );
    }
    if let Some(dialog) = delete_dialog(state) {
        root = root.child(dialog);
    }
    root.child(main).into()
}

pub fn render_html(state: &AppState) -> String {
    render(state).to_html()
}

fn action(element: Element, name: &'static str) -> Element {
    element.attr("data-action", name)
}

fn header(state: &AppState) -> Element {
    let compact = state.is_compact();
    let title = el("div")
        .class("title")
        .child(el("h1").class(if compact { "text-xl" } else { "text-2xl" }).text(APP_TITLE))
        .child(el("p").class("subtitle").text(if compact {
            "Ask questions about files"
        } else {
            "Ask questions about your documents"
        }));

    let mut tools = el("div").class("header-tools");
    if compact {
        tools = tools.child(
            action(el("button"), "open_documents")
                .attr("id", "documents-trigger")
                .class("button outline")
                .text("Documents"),
        );
    }
    tools = tools.child(
        el("span")
            .class("badge outline")
            .text(document_count(state.documents().len())),
    );
    el("header").child(title).child(tools)
}

fn notice(state: &AppState) -> Option<Element> {
    let notice = state.notice()?;
    let class = match notice.kind {
        NoticeKind::Error => "notice notice-error",
        NoticeKind::Info => "notice notice-info",
    };
    Some(
        el("div")
            .attr("id", "notice")
            .attr("role", "alert")
            .class(class)
            .child(el("span").text(notice.message.clone()))
            .child(action(el("button"), "dismiss_notice").class("button ghost").text("Dismiss")),
    )
}

fn delete_dialog(state: &AppState) -> Option<Element> {
    let document = state.pending_delete()?;
    Some(
        el("div")
            .attr("id", "confirm-delete")
            .attr("role", "dialog")
            .class("dialog")
            .child(el("p").text("Are you sure you want to delete this document?"))
            .child(el("p").class("dialog-detail").text(document.filename.clone()))
            .child(
                el("div")
                    .class("dialog-buttons")
                    .child(action(el("button"), "cancel_delete").class("button outline").text("Cancel"))
                    .child(
                        action(el("button"), "confirm_delete")
                            .class("button destructive")
                            .text("Delete"),
                    ),
            ),
    )
}

fn document_panel(state: &AppState) -> Element {
    let compact = state.is_compact();
    let mut title = el("h2").class("card-title").text("Documents");
    if compact {
        title = title.child(
            action(el("button"), "close_documents")
                .class("button ghost")
                .attr("aria-label", "Close")
                .text("×"),
        );
    }

    let uploading = state.is_uploading();
    let accept: Vec<String> = ACCEPTED_EXTENSIONS.iter().map(|e| format!(".{}", e)).collect();
    let upload = action(el("button"), "pick_file")
        .attr("id", "upload")
        .attr("data-accept", accept.join(","))
        .class("upload-zone")
        .flag("disabled", uploading)
        .child(el("p").text(if uploading {
            "Uploading..."
        } else {
            "Click to upload a document"
        }))
        .child(el("p").class("hint").text(format!(
            "PDF, DOCX, XLSX up to {}",
            format_file_size(ADVISORY_MAX_BYTES)
        )));

    let mut panel = el("section")
        .attr("id", "documents")
        .class("card documents")
        .child(title)
        .child(
            el("p")
                .class("card-description")
                .text("Upload and manage your PDF, Word, and Excel files"),
        )
        .child(upload);

    if let Some(percent) = state.upload_progress() {
        panel = panel.child(
            el("div")
                .class("upload-progress")
                .child(
                    el("progress")
                        .attr("id", "upload-progress")
                        .attr("max", "100")
                        .attr("value", percent.to_string()),
                )
                .child(el("p").class("hint").text(format!("{}% uploaded", percent))),
        );
    }

    let mut list = el("ul").class(if compact {
        "document-list short"
    } else {
        "document-list tall"
    });
    if state.documents().is_empty() {
        list = list.child(el("li").class("empty").text("No documents uploaded yet"));
    }
    for document in state.documents() {
        let selected = state.selection().is_selected(document.id);
        list = list.child(document_row(document, selected));
    }
    panel.child(list)
}

fn document_row(document: &Document, selected: bool) -> Node {
    let (icon_label, icon_class) = file_icon(document);
    let badge = status_badge(document.processing_status);
    let id = document.id.to_string();
    action(el("li"), "select_document")
        .attr("data-id", id.clone())
        .class(if selected { "document selected" } else { "document" })
        .child(el("span").class(icon_class).text(icon_label))
        .child(
            el("div")
                .class("document-info")
                .child(el("p").class("filename").text(document.filename.clone()))
                .child(el("p").class("size").text(format_file_size(document.file_size)))
                .child(el("span").class(badge.class).text(badge.label)),
        )
        .child(
            action(el("button"), "request_delete")
                .attr("data-id", id)
                .class("button ghost delete")
                .attr("aria-label", "Delete document")
                .text("Delete"),
        )
        .into()
}

fn chat_panel(state: &AppState) -> Element {
    let compact = state.is_compact();
    let description = match state.selected_document() {
        Some(document) => format!("Ask questions about \"{}\"", document.filename),
        None if compact => "Select a document to start".to_string(),
        None => "Select a document to start asking questions".to_string(),
    };
    let panel = el("section")
        .attr("id", "chat")
        .class(if compact { "card chat short" } else { "card chat tall" })
        .child(el("h2").class("card-title").text("Ask Questions"))
        .child(el("p").class("card-description").text(description));

    match state.selected_document() {
        Some(document) => panel
            .child(thread(state, compact))
            .child(question_box(state, document, compact)),
        None => panel.child(
            el("div")
                .class("placeholder")
                .child(el("h3").text(if compact {
                    "Select Document"
                } else {
                    "Select a Document"
                }))
                .child(el("p").text(if compact {
                    "Tap the Documents button above to choose a file"
                } else {
                    "Choose a document from the left panel to start asking questions"
                })),
        ),
    }
}

fn thread(state: &AppState, compact: bool) -> Element {
    let thread = el("div").attr("id", "thread").class("thread");
    match state.selection() {
        Selection::None => thread,
        Selection::Loading { .. } => {
            thread.child(el("p").class("loading").text("Loading conversations..."))
        }
        Selection::Error {
            document, message, ..
        } => thread.child(
            el("div")
                .class("thread-error")
                .child(el("p").text(message.clone()))
                .child(
                    action(el("button"), "select_document")
                        .attr("data-id", document.id.to_string())
                        .class("button outline")
                        .text("Retry"),
                ),
        ),
        Selection::Ready { conversations, .. } if conversations.is_empty() => thread.child(
            el("div")
                .class("empty")
                .child(el("p").text("No questions asked yet"))
                .child(el("p").class("hint").text("Start by asking a question about your document")),
        ),
        Selection::Ready { conversations, .. } => {
            thread.children(conversations.iter().map(|c| exchange(c, compact)))
        }
    }
}

fn exchange(conversation: &Conversation, compact: bool) -> Node {
    let bubble = if compact { "bubble narrow" } else { "bubble" };
    let mut answer = el("div")
        .class(format!("{} answer", bubble))
        .child(el("p").text(conversation.answer.clone()));
    if let Some(label) = confidence_label(conversation.confidence_score) {
        answer = answer.child(el("span").class("badge outline confidence").text(label));
    }
    let mut entry = el("div").class("exchange");
    if let Some(id) = conversation.id {
        entry = entry.attr("data-id", id.to_string());
    }
    entry
        .child(
            el("div")
                .class(format!("{} question", bubble))
                .child(el("p").text(conversation.question.clone())),
        )
        .child(answer)
        .into()
}

fn question_box(state: &AppState, document: &Document, compact: bool) -> Element {
    let typing_allowed = state.can_type_question();
    let mut controls = el("div").class("question-controls");
    if compact {
        let voice = state.voice();
        let mut mic = action(el("button"), "start_voice")
            .attr("id", "voice")
            .class("button outline")
            .flag("disabled", !voice.available || voice.listening)
            .text(if voice.listening { "Listening..." } else { "Voice" });
        if !voice.available {
            mic = mic.attr("title", "Voice input is not available");
        }
        controls = controls.child(mic);
    }
    controls = controls.child(
        action(el("button"), "ask_question")
            .attr("id", "ask")
            .class("button primary")
            .flag("disabled", !state.can_ask())
            .text(if state.is_asking() { "Asking..." } else { "Send" }),
    );

    let mut input = el("div").class("question-box").child(
        el("div")
            .class("question-row")
            .child(
                el("textarea")
                    .attr("id", "question")
                    .attr("placeholder", "Ask a question about your document...")
                    .class(if compact { "question short" } else { "question tall" })
                    .flag("disabled", !typing_allowed)
                    .text(state.question().to_string()),
            )
            .child(controls),
    );

    let banner = match document.processing_status {
        ProcessingStatus::Completed => None,
        ProcessingStatus::Failed => {
            Some("Document processing failed. Questions are unavailable for this document.")
        }
        ProcessingStatus::Pending | ProcessingStatus::Processing => {
            Some("Document is still being processed. Please wait before asking questions.")
        }
    };
    if let Some(text) = banner {
        input = input.child(
            el("div")
                .attr("id", "processing-banner")
                .class("banner")
                .child(el("p").text(text)),
        );
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentId;

    fn doc(id: DocumentId, status: ProcessingStatus, size: u64) -> Document {
        Document {
            id,
            filename: format!("report-{}.pdf", id),
            file_type: ".pdf".into(),
            file_size: size,
            processing_status: status,
            user_id: None,
            upload_timestamp: None,
            processing_completed_at: None,
            document_hash: None,
        }
    }

    fn answer(id: i64, confidence: Option<f64>) -> Conversation {
        Conversation {
            id: Some(id),
            question: "What is the total revenue?".into(),
            answer: "According to the document: revenue was $4.2M".into(),
            confidence_score: confidence,
            document_id: Some(1),
            sources_cited: None,
            timestamp: None,
        }
    }

    fn selected_state(status: ProcessingStatus, conversations: Vec<Conversation>) -> AppState {
        let mut state = AppState::default();
        state.replace_documents(vec![doc(1, status, 2_345_678)]);
        let ticket = state.begin_select(1).unwrap();
        state.finish_conversations(ticket, Ok(conversations));
        state
    }

    #[test]
    fn test_empty_wide_layout() {
        let state = AppState::default();
        let view = render(&state);
        let html = view.to_html();
        assert!(html.contains("No documents uploaded yet"));
        assert!(html.contains("Choose a document from the left panel"));
        assert!(html.contains("0 docs"));
        assert!(view.find_by_id("documents").is_some());
        assert!(view.find_by_id("documents-trigger").is_none());
    }

    #[test]
    fn test_compact_layout_uses_sheet() {
        let mut state = AppState::default();
        state.resize(400);
        let view = render(&state);
        assert!(view.find_by_id("documents-trigger").is_some());
        assert!(view.find_by_id("documents").is_none(), "panel hidden until sheet opens");
        assert!(view.to_html().contains("Tap the Documents button above"));

        state.open_documents_sheet();
        let view = render(&state);
        assert!(view.find_by_id("documents-sheet").is_some());
        assert!(view.find_by_id("documents").is_some());
    }

    #[test]
    fn test_document_row_shows_size_and_status() {
        let state = selected_state(ProcessingStatus::Pending, vec![]);
        let html = render_html(&state);
        assert!(html.contains("2.24 MB"));
        assert!(html.contains(">Pending<"));
        assert!(html.contains("document selected"));
        assert!(html.contains(">PDF<"));
    }

    #[test]
    fn test_answer_shows_confidence() {
        let state = selected_state(
            ProcessingStatus::Completed,
            vec![answer(2, Some(0.87)), answer(1, None)],
        );
        let html = render_html(&state);
        assert!(html.contains("87% confidence"));
        assert_eq!(html.matches("% confidence").count(), 1);
        assert!(html.contains("Ask questions about &quot;report-1.pdf&quot;"));
    }

    #[test]
    fn test_fresh_answer_without_id_renders() {
        let mut fresh = answer(0, Some(0.87));
        fresh.id = None;
        let state = selected_state(ProcessingStatus::Completed, vec![fresh, answer(4, None)]);
        let html = render_html(&state);
        assert!(html.contains("87% confidence"));
        assert_eq!(html.matches("class=\"exchange\"").count(), 2);
        assert_eq!(html.matches("data-id=\"4\"").count(), 1);
    }

    #[test]
    fn test_ask_disabled_while_processing() {
        let mut state = selected_state(ProcessingStatus::Processing, vec![]);
        state.set_question("What is the total revenue?");
        let view = render(&state);
        assert!(view.find_by_id("ask").unwrap().has_attr("disabled"));
        assert!(view.find_by_id("question").unwrap().has_attr("disabled"));
        assert!(view.find_by_id("processing-banner").is_some());
    }

    #[test]
    fn test_ask_enabled_when_ready_with_text() {
        let mut state = selected_state(ProcessingStatus::Completed, vec![]);
        let view = render(&state);
        assert!(view.find_by_id("ask").unwrap().has_attr("disabled"), "blank question");
        assert!(view.to_html().contains("No questions asked yet"));

        state.set_question("What is the total revenue?");
        let view = render(&state);
        assert!(!view.find_by_id("ask").unwrap().has_attr("disabled"));
        assert!(view.find_by_id("processing-banner").is_none());
    }

    #[test]
    fn test_upload_progress_rendered() {
        let mut state = AppState::default();
        state.begin_upload("/tmp/report.pdf");
        state.tick_upload();
        state.tick_upload();
        let view = render(&state);
        let progress = view.find_by_id("upload-progress").unwrap();
        assert_eq!(progress.get_attr("value"), Some("20"));
        assert!(view.find_by_id("upload").unwrap().has_attr("disabled"));
        assert!(view.to_html().contains("20% uploaded"));
    }

    #[test]
    fn test_delete_confirmation_dialog() {
        let mut state = selected_state(ProcessingStatus::Completed, vec![]);
        assert!(render(&state).find_by_id("confirm-delete").is_none());
        state.request_delete(1);
        let view = render(&state);
        let dialog = view.find_by_id("confirm-delete").unwrap();
        let text = Node::Element(dialog.clone()).text_content();
        assert!(text.contains("Are you sure you want to delete this document?"));
        assert!(text.contains("report-1.pdf"));
    }

    #[test]
    fn test_voice_button_only_in_compact_layout() {
        let mut state = selected_state(ProcessingStatus::Completed, vec![]);
        assert!(render(&state).find_by_id("voice").is_none());
        state.resize(390);
        let view = render(&state);
        assert!(view.find_by_id("voice").unwrap().has_attr("disabled"));

        state.set_voice_available(true);
        assert!(!render(&state).find_by_id("voice").unwrap().has_attr("disabled"));
    }

    #[test]
    fn test_conversation_error_offers_retry() {
        let mut state = AppState::default();
        state.replace_documents(vec![doc(1, ProcessingStatus::Completed, 10)]);
        let ticket = state.begin_select(1).unwrap();
        state.finish_conversations(ticket, Err("Failed to load conversations".into()));
        let html = render_html(&state);
        assert!(html.contains("Failed to load conversations"));
        assert!(html.contains(">Retry<"));
    }
}
