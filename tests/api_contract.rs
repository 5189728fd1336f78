//! Backend API contract tests
//!
//! Verify the exact request shapes the gateway sends and how backend
//! responses and error bodies are mapped.

use doc_qa_lib::api::{ApiClient, ApiError};
use doc_qa_lib::models::ProcessingStatus;
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(format!("{}/api", server.uri()), 1)
}

fn document_json(id: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "filename": "report.pdf",
        "file_type": ".pdf",
        "file_size": 2345678,
        "processing_status": status,
        "user_id": 1,
        "upload_timestamp": "2025-01-01T10:00:00"
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Documents
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_documents_sends_user_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/documents"))
        .and(query_param("user_id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [document_json(1, "completed"), document_json(2, "pending")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let docs = client(&server).list_documents().await.unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].processing_status, ProcessingStatus::Completed);
    assert_eq!(docs[1].processing_status, ProcessingStatus::Pending);
    assert_eq!(docs[0].file_size, 2_345_678);
}

#[tokio::test]
async fn test_list_documents_tolerates_missing_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let docs = client(&server).list_documents().await.unwrap();
    assert!(docs.is_empty());
}

#[tokio::test]
async fn test_upload_sends_multipart_file_and_user_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/documents/upload"))
        .and(body_string_contains("name=\"file\"; filename=\"report.pdf\""))
        .and(body_string_contains("name=\"user_id\""))
        .and(body_string_contains("application/pdf"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "document": document_json(7, "pending")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("report.pdf");
    let mut file = std::fs::File::create(&file_path).unwrap();
    file.write_all(b"%PDF-1.4 test").unwrap();

    let doc = client(&server).upload_document(&file_path).await.unwrap();
    assert_eq!(doc.id, 7);
    assert_eq!(doc.filename, "report.pdf");
}

#[tokio::test]
async fn test_upload_error_message_is_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/documents/upload"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "File type not allowed"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .upload_bytes("notes.txt", b"hello".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Backend { status: 400, .. }));
    assert_eq!(err.user_message("Upload failed"), "File type not allowed");
}

#[tokio::test]
async fn test_upload_missing_file_is_io_error() {
    let server = MockServer::start().await;
    let err = client(&server)
        .upload_document(std::path::Path::new("/nonexistent/report.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Io(_)));
    assert_eq!(err.user_message("Upload failed"), "Upload failed");
}

#[tokio::test]
async fn test_delete_accepts_empty_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/documents/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_document(3).await.unwrap();
}

#[tokio::test]
async fn test_delete_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/documents/3"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Document not found"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).delete_document(3).await.unwrap_err();
    assert_eq!(err.user_message("Failed to delete document"), "Document not found");
}

#[tokio::test]
async fn test_document_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/documents/5/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "status": "processing",
            "filename": "report.pdf"
        })))
        .mount(&server)
        .await;

    let status = client(&server).document_status(5).await.unwrap();
    assert_eq!(status, ProcessingStatus::Processing);
}

// ────────────────────────────────────────────────────────────────────────────
// Questions
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_ask_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/qa/ask"))
        .and(body_json(json!({
            "question": "What is the total revenue?",
            "document_id": 1,
            "user_id": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "answer": "According to the document: revenue was $4.2M",
            "confidence_score": 0.87,
            "sources": [{"chunk_id": 12, "text_preview": "Revenue...", "similarity": 0.72}],
            "context_used": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entry = client(&server)
        .ask_question("What is the total revenue?", 1)
        .await
        .unwrap();
    assert_eq!(entry.id, None);
    assert_eq!(entry.question, "What is the total revenue?");
    assert_eq!(entry.answer, "According to the document: revenue was $4.2M");
    assert_eq!(entry.confidence_score, Some(0.87));
    assert_eq!(entry.document_id, Some(1));
    assert_eq!(entry.sources_cited.as_deref(), Some("[12]"));
}

#[tokio::test]
async fn test_ask_answer_without_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/qa/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "question": "What is the total revenue?",
            "answer": "Revenue was $4.2M",
            "confidence_score": 0.87
        })))
        .mount(&server)
        .await;

    let entry = client(&server)
        .ask_question("What is the total revenue?", 1)
        .await
        .unwrap();
    assert_eq!(entry.id, None);
    assert_eq!(entry.question, "What is the total revenue?");
    assert_eq!(entry.sources_cited, None);
}

#[tokio::test]
async fn test_ask_unanswerable_still_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/qa/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "answer": "I couldn't find any relevant information in the document to answer your question.",
            "confidence_score": 0.0,
            "sources": []
        })))
        .mount(&server)
        .await;

    let entry = client(&server).ask_question("Who is the CEO?", 1).await.unwrap();
    assert_eq!(entry.confidence_score, Some(0.0));
    assert_eq!(entry.question, "Who is the CEO?");
}

#[tokio::test]
async fn test_ask_error_falls_back_without_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/qa/ask"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client(&server).ask_question("Why?", 1).await.unwrap_err();
    assert!(matches!(err, ApiError::Backend { status: 500, message: None }));
    assert_eq!(err.user_message("Failed to get answer"), "Failed to get answer");
}

#[tokio::test]
async fn test_ask_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/qa/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server).ask_question("Why?", 1).await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_conversations_scoped_to_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/qa/conversations"))
        .and(query_param("user_id", "1"))
        .and(query_param("document_id", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversations": [
                {"id": 2, "question": "b?", "answer": "B", "confidence_score": 0.5},
                {"id": 1, "question": "a?", "answer": "A"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = client(&server).list_conversations(4).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, Some(2));
    assert_eq!(list[1].confidence_score, None);
}

// ────────────────────────────────────────────────────────────────────────────
// Transport
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unreachable_backend_uses_generic_message() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let api = ApiClient::new(format!("http://127.0.0.1:{}/api", port), 1);

    let err = api.list_documents().await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.user_message("Upload failed"), "Upload failed");
}
