use super::{decode, ensure_success, ApiClient, ApiError};
use crate::input::file::FileKind;
use crate::models::{Document, DocumentId, ProcessingStatus};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Deserialize)]
struct UploadedDocument {
    document: Document,
}

#[derive(Deserialize)]
struct DocumentStatus {
    status: ProcessingStatus,
}

impl ApiClient {
    /// `GET /documents?user_id=<id>`
    pub async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        let resp = self
            .http
            .get(self.url("/documents"))
            .query(&[("user_id", self.user_id.to_string())])
            .send()
            .await?;
        let data: DocumentList = decode(ensure_success(resp).await?).await?;
        Ok(data.documents)
    }

    /// Read `path` and upload it under its file name.
    pub async fn upload_document(&self, path: &Path) -> Result<Document, ApiError> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        self.upload_bytes(&filename, bytes).await
    }

    /// `POST /documents/upload` as multipart `file` + `user_id`.
    pub async fn upload_bytes(&self, filename: &str, bytes: Vec<u8>) -> Result<Document, ApiError> {
        let mime = FileKind::from_filename(filename)
            .map(FileKind::mime_type)
            .unwrap_or("application/octet-stream");
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime)?;
        let form = Form::new()
            .part("file", part)
            .text("user_id", self.user_id.to_string());

        let resp = self
            .http
            .post(self.url("/documents/upload"))
            .multipart(form)
            .send()
            .await?;
        let data: UploadedDocument = decode(ensure_success(resp).await?).await?;
        Ok(data.document)
    }

    /// `DELETE /documents/{id}`
    pub async fn delete_document(&self, id: DocumentId) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/documents/{}", id)))
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }

    /// `GET /documents/{id}/status`
    pub async fn document_status(&self, id: DocumentId) -> Result<ProcessingStatus, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/documents/{}/status", id)))
            .send()
            .await?;
        let data: DocumentStatus = decode(ensure_success(resp).await?).await?;
        Ok(data.status)
    }
}
