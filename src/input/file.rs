use std::path::{Path, PathBuf};

/// Extensions offered by the file picker. The backend makes the final call.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "docx", "xlsx"];

/// Shown next to the picker; not checked locally.
pub const ADVISORY_MAX_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Xlsx,
}

impl FileKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "docx" => Some(FileKind::Docx),
            "xlsx" => Some(FileKind::Xlsx),
            _ => None,
        }
    }

    pub fn from_filename(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            FileKind::Pdf => "application/pdf",
            FileKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            FileKind::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Pdf => "PDF",
            FileKind::Docx => "DOCX",
            FileKind::Xlsx => "XLSX",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickedFile {
    pub path: PathBuf,
    pub filename: String,
}

impl PickedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        Self { path, filename }
    }
}

/// Single-file picker. Holds the current pick until the upload it started
/// finishes, then clears so the same file can be picked again.
#[derive(Debug, Clone, Default)]
pub struct FilePicker {
    current: Option<PickedFile>,
}

impl FilePicker {
    /// Accept a pick unless one is still being uploaded.
    pub fn pick(&mut self, path: impl Into<PathBuf>) -> Option<PickedFile> {
        if self.current.is_some() {
            return None;
        }
        let file = PickedFile::from_path(path);
        self.current = Some(file.clone());
        Some(file)
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(FileKind::from_filename("report.PDF"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_filename("budget.xlsx"), Some(FileKind::Xlsx));
        assert_eq!(FileKind::from_filename("notes.txt"), None);
        assert_eq!(FileKind::from_extension(".docx"), Some(FileKind::Docx));
    }

    #[test]
    fn test_unlisted_extension_is_still_picked() {
        let mut picker = FilePicker::default();
        let file = picker.pick("/tmp/notes.txt").unwrap();
        assert_eq!(file.filename, "notes.txt");
        assert_eq!(FileKind::from_filename(&file.filename), None);
    }

    #[test]
    fn test_same_file_can_be_picked_after_reset() {
        let mut picker = FilePicker::default();
        assert!(picker.pick("/tmp/report.pdf").is_some());
        assert!(picker.pick("/tmp/report.pdf").is_none());
        picker.reset();
        let again = picker.pick("/tmp/report.pdf").unwrap();
        assert_eq!(again.path, PathBuf::from("/tmp/report.pdf"));
    }
}
