use crate::models::{Conversation, Document, DocumentId};

/// Identifies the selection a request was issued for. A response is only
/// applied while its ticket is still the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub document_id: DocumentId,
    generation: u64,
}

impl RequestTicket {
    pub(crate) fn new(document_id: DocumentId, generation: u64) -> Self {
        Self {
            document_id,
            generation,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum Selection {
    #[default]
    None,
    Loading {
        document: Document,
        ticket: RequestTicket,
    },
    Ready {
        document: Document,
        ticket: RequestTicket,
        conversations: Vec<Conversation>,
    },
    Error {
        document: Document,
        ticket: RequestTicket,
        message: String,
    },
}

impl Selection {
    pub fn document(&self) -> Option<&Document> {
        match self {
            Selection::None => None,
            Selection::Loading { document, .. }
            | Selection::Ready { document, .. }
            | Selection::Error { document, .. } => Some(document),
        }
    }

    pub(crate) fn document_mut(&mut self) -> Option<&mut Document> {
        match self {
            Selection::None => None,
            Selection::Loading { document, .. }
            | Selection::Ready { document, .. }
            | Selection::Error { document, .. } => Some(document),
        }
    }

    pub fn ticket(&self) -> Option<RequestTicket> {
        match self {
            Selection::None => None,
            Selection::Loading { ticket, .. }
            | Selection::Ready { ticket, .. }
            | Selection::Error { ticket, .. } => Some(*ticket),
        }
    }

    /// Entries for the selected document; empty unless loaded.
    pub fn conversations(&self) -> &[Conversation] {
        match self {
            Selection::Ready { conversations, .. } => conversations,
            _ => &[],
        }
    }

    pub fn is_selected(&self, id: DocumentId) -> bool {
        self.document().is_some_and(|d| d.id == id)
    }
}
