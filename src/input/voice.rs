use serde::Serialize;

pub const UNSUPPORTED_MESSAGE: &str = "Voice recognition is not supported on this system.";
pub const FAILED_MESSAGE: &str = "Voice recognition failed. Please try again.";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionOptions {
    pub continuous: bool,
    pub interim_results: bool,
    pub lang: String,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            continuous: false,
            interim_results: false,
            lang: "en-US".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("Voice recognition is not supported on this system.")]
    Unsupported,
    #[error("Capture error: {0}")]
    Capture(String),
}

/// A host facility that can turn one spoken utterance into text.
///
/// `begin` only starts capture; the transcript (or failure) arrives later
/// through the session's voice callbacks.
pub trait SpeechCapture: Send + Sync {
    fn begin(&self, options: &RecognitionOptions) -> Result<(), VoiceError>;
}
