use super::{decode, ensure_success, ApiClient, ApiError};
use crate::models::{Conversation, DocumentId};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
    document_id: DocumentId,
    user_id: i64,
}

/// Body of a `/qa/ask` answer. The backend returns the answer itself,
/// not a stored conversation row, so `id` and `question` may be absent.
#[derive(Deserialize)]
struct AnswerResponse {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    question: Option<String>,
    answer: String,
    #[serde(default)]
    confidence_score: Option<f64>,
    #[serde(default)]
    sources: Vec<AnswerSource>,
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Deserialize)]
struct AnswerSource {
    #[serde(default)]
    chunk_id: Option<serde_json::Value>,
}

impl AnswerResponse {
    fn into_conversation(self, asked: &str, document_id: DocumentId) -> Conversation {
        let chunk_ids: Vec<String> = self
            .sources
            .iter()
            .filter_map(|s| s.chunk_id.as_ref())
            .map(|id| match id {
                serde_json::Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect();
        Conversation {
            id: self.id,
            question: self
                .question
                .filter(|q| !q.trim().is_empty())
                .unwrap_or_else(|| asked.to_string()),
            answer: self.answer,
            confidence_score: self.confidence_score,
            document_id: Some(document_id),
            sources_cited: (!chunk_ids.is_empty()).then(|| format!("[{}]", chunk_ids.join(", "))),
            timestamp: self.timestamp,
        }
    }
}

#[derive(Deserialize)]
struct ConversationList {
    #[serde(default)]
    conversations: Vec<Conversation>,
}

impl ApiClient {
    /// `POST /qa/ask`. The backend answers with the stored exchange.
    pub async fn ask_question(
        &self,
        question: &str,
        document_id: DocumentId,
    ) -> Result<Conversation, ApiError> {
        let body = AskRequest {
            question,
            document_id,
            user_id: self.user_id,
        };
        let resp = self
            .http
            .post(self.url("/qa/ask"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;
        let data: AnswerResponse = decode(ensure_success(resp).await?).await?;
        Ok(data.into_conversation(question, document_id))
    }

    /// `GET /qa/conversations`, newest first as ordered by the backend.
    pub async fn list_conversations(
        &self,
        document_id: DocumentId,
    ) -> Result<Vec<Conversation>, ApiError> {
        let resp = self
            .http
            .get(self.url("/qa/conversations"))
            .query(&[
                ("user_id", self.user_id.to_string()),
                ("document_id", document_id.to_string()),
            ])
            .send()
            .await?;
        let data: ConversationList = decode(ensure_success(resp).await?).await?;
        Ok(data.conversations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_without_id_takes_asked_question() {
        let data: AnswerResponse = serde_json::from_str(
            r#"{"success": true, "answer": "Revenue was $4.2M", "confidence_score": 0.87,
                "sources": [{"chunk_id": 4, "similarity": 0.7}, {"chunk_id": 9}],
                "context_used": 2}"#,
        )
        .unwrap();
        let entry = data.into_conversation("What is the total revenue?", 3);
        assert_eq!(entry.id, None);
        assert_eq!(entry.question, "What is the total revenue?");
        assert_eq!(entry.document_id, Some(3));
        assert_eq!(entry.sources_cited.as_deref(), Some("[4, 9]"));
    }

    #[test]
    fn test_answer_keeps_backend_question() {
        let data: AnswerResponse = serde_json::from_str(
            r#"{"question": "Total revenue?", "answer": "$4.2M", "confidence_score": 0.87}"#,
        )
        .unwrap();
        let entry = data.into_conversation("total revenue?", 1);
        assert_eq!(entry.question, "Total revenue?");
        assert_eq!(entry.sources_cited, None);
    }
}
