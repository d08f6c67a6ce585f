use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client → server: chat request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub question: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
}

/// Server → client: chat reply. The backend echoes the question alongside
/// the answer; sources may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatAnswer {
    #[serde(default)]
    pub question: Option<String>,
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// Server → client: acknowledgement of an evaluation start.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartAck {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalStatusKind {
    Idle,
    Running,
    Completed,
    Error,
    /// Any status value this client does not recognize.
    #[serde(other)]
    Unknown,
}

/// Server → client: evaluation status document. `result` is only meaningful
/// when `status` is `completed`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvalStatusDoc {
    pub status: EvalStatusKind,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

/// Error body shape used by the backend for non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be completed at all.
    #[error("request failed: {0}")]
    Transport(String),
    /// Non-2xx response; detail extracted from the `{detail}` body if present.
    #[error("{}", status_text(.code, .detail))]
    Status { code: u16, detail: Option<String> },
    /// A success response whose body did not match the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),
}

fn status_text(code: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("server error (http {code})"),
    }
}
