//! Input adapters: file picker, question box and optional voice capture.

pub mod file;
pub mod text;
pub mod voice;
