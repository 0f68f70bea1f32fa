//! Thin client for the external conversational model. The handler treats
//! this as an opaque call: send text plus history, receive text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ChatConfig;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Error)]
pub enum ChatError {
    /// The model refused the content on safety grounds; callers substitute
    /// a fixed apology instead of surfacing this.
    #[error("message blocked by content safety policy")]
    Blocked,

    #[error("chat request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat service error: {0}")]
    Api(String),

    #[error("chat service returned no usable reply")]
    EmptyReply,
}

/// One prior turn of the conversation, role-tagged the way the external
/// API expects ("user" / "model").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub parts: Vec<String>,
}

#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Returns `None` when no API key is configured; the chat endpoints
    /// then report failure instead of panicking at startup.
    pub fn from_config(cfg: &ChatConfig) -> Option<Self> {
        let api_key = cfg.api_key.clone()?;

        Some(Self {
            http: reqwest::Client::new(),
            api_key,
            model: cfg.model.clone(),
        })
    }

    /// Forward `message` with its `history` and return the model's text
    /// reply verbatim.
    pub async fn send(&self, message: &str, history: &[HistoryEntry]) -> Result<String, ChatError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|entry| Content {
                role: entry.role.clone(),
                parts: entry.parts.iter().map(|t| Part { text: t.clone() }).collect(),
            })
            .collect();

        contents.push(Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: message.to_string(),
            }],
        });

        let url = format!(
            "{API_BASE}/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&GenerateRequest { contents })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if body.contains("SAFETY") || body.contains("blocked") {
                return Err(ChatError::Blocked);
            }
            return Err(ChatError::Api(format!("status {status}: {body}")));
        }

        let reply: GenerateResponse = response.json().await?;
        extract_reply(reply)
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keep the API key out of logs
        f.debug_struct("ChatClient")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

fn extract_reply(reply: GenerateResponse) -> Result<String, ChatError> {
    if let Some(feedback) = &reply.prompt_feedback {
        if feedback.block_reason.is_some() {
            return Err(ChatError::Blocked);
        }
    }

    let Some(candidate) = reply.candidates.into_iter().next() else {
        return Err(ChatError::EmptyReply);
    };

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(ChatError::Blocked);
    }

    candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or(ChatError::EmptyReply)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn extracts_first_candidate_text() {
        let reply = parse(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"hello"}]},"finishReason":"STOP"}]}"#,
        );
        assert_eq!(extract_reply(reply).unwrap(), "hello");
    }

    #[test]
    fn prompt_block_is_a_safety_error() {
        let reply = parse(r#"{"candidates":[],"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert!(matches!(extract_reply(reply), Err(ChatError::Blocked)));
    }

    #[test]
    fn safety_finish_reason_is_a_safety_error() {
        let reply =
            parse(r#"{"candidates":[{"content":null,"finishReason":"SAFETY"}]}"#);
        assert!(matches!(extract_reply(reply), Err(ChatError::Blocked)));
    }

    #[test]
    fn empty_candidates_is_an_empty_reply() {
        let reply = parse(r#"{"candidates":[]}"#);
        assert!(matches!(extract_reply(reply), Err(ChatError::EmptyReply)));
    }
}
