//! Askdesk API: HTTP access to the chat and evaluation endpoints.
mod client;
mod types;

pub use client::{ChatService, ClientSettings, ReqwestService, DEFAULT_BASE_URL};
pub use types::{
    ApiError, ChatAnswer, ChatRequest, ErrorBody, EvalStatusDoc, EvalStatusKind, Source, StartAck,
};
