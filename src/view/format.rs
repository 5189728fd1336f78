use crate::input::file::FileKind;
use crate::models::{Document, ProcessingStatus};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Binary-unit size with at most two decimals, trailing zeros dropped.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// `Some("87% confidence")`, or `None` when there is no meaningful score.
pub fn confidence_label(score: Option<f64>) -> Option<String> {
    let score = score.filter(|s| s.is_finite() && *s > 0.0)?;
    Some(format!("{}% confidence", (score * 100.0).round() as i64))
}

pub struct Badge {
    pub label: &'static str,
    pub class: &'static str,
}

pub fn status_badge(status: ProcessingStatus) -> Badge {
    match status {
        ProcessingStatus::Completed => Badge {
            label: "Ready",
            class: "badge badge-ready",
        },
        ProcessingStatus::Processing => Badge {
            label: "Processing",
            class: "badge badge-processing",
        },
        ProcessingStatus::Failed => Badge {
            label: "Failed",
            class: "badge badge-failed",
        },
        ProcessingStatus::Pending => Badge {
            label: "Pending",
            class: "badge badge-pending",
        },
    }
}

/// Icon label and class for a document's file type.
pub fn file_icon(document: &Document) -> (&'static str, &'static str) {
    match FileKind::from_extension(&document.extension()) {
        Some(FileKind::Pdf) => (FileKind::Pdf.label(), "file-icon file-pdf"),
        Some(FileKind::Docx) => (FileKind::Docx.label(), "file-icon file-docx"),
        Some(FileKind::Xlsx) => (FileKind::Xlsx.label(), "file-icon file-xlsx"),
        None => ("FILE", "file-icon file-other"),
    }
}

pub fn document_count(count: usize) -> String {
    if count == 1 {
        "1 doc".to_string()
    } else {
        format!("{} docs", count)
    }
}
