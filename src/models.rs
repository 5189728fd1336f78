use serde::{Deserialize, Serialize};

pub type DocumentId = i64;

/// Backend-side processing state of an uploaded document.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ProcessingStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl From<String> for ProcessingStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "processing" => ProcessingStatus::Processing,
            "completed" => ProcessingStatus::Completed,
            "failed" => ProcessingStatus::Failed,
            _ => ProcessingStatus::Pending,
        }
    }
}

impl ProcessingStatus {
    /// Still moving on the backend; worth polling.
    pub fn is_in_flight(self) -> bool {
        matches!(self, ProcessingStatus::Pending | ProcessingStatus::Processing)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub processing_status: ProcessingStatus,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub upload_timestamp: Option<String>,
    #[serde(default)]
    pub processing_completed_at: Option<String>,
    #[serde(default)]
    pub document_hash: Option<String>,
}

impl Document {
    pub fn is_ready(&self) -> bool {
        self.processing_status == ProcessingStatus::Completed
    }

    /// File type without the leading dot the backend sometimes keeps.
    pub fn extension(&self) -> String {
        self.file_type.trim_start_matches('.').to_ascii_lowercase()
    }
}

/// One question/answer exchange about a document.
///
/// Stored entries carry a backend `id`; a fresh answer from `/qa/ask` does not.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Conversation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub document_id: Option<DocumentId>,
    #[serde(default)]
    pub sources_cited: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}
