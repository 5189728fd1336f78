/// What a key press in the question box should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    InsertNewline,
    /// Default handling by the text box.
    Edit,
}

pub fn interpret_key(key: &str, shift: bool) -> KeyAction {
    match (key, shift) {
        ("Enter", false) => KeyAction::Submit,
        ("Enter", true) => KeyAction::InsertNewline,
        _ => KeyAction::Edit,
    }
}

/// The question worth sending, if any.
pub fn submittable(question: &str) -> Option<&str> {
    let trimmed = question.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
