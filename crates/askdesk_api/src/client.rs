use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::types::{ApiError, ChatAnswer, ChatRequest, ErrorBody, EvalStatusDoc, StartAck};

/// Default base path of the chat/evaluation API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Access to the chat and evaluation endpoints.
#[async_trait::async_trait]
pub trait ChatService: Send + Sync {
    async fn send_chat(&self, question: &str) -> Result<ChatAnswer, ApiError>;
    async fn start_evaluation(&self) -> Result<StartAck, ApiError>;
    async fn evaluation_status(&self) -> Result<EvalStatusDoc, ApiError>;
    /// Liveness probe against the service host root.
    async fn health(&self) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestService {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestService {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    fn host_root(&self) -> Result<String, ApiError> {
        let mut url = reqwest::Url::parse(&self.settings.base_url)
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        url.set_path("/");
        url.set_query(None);
        Ok(url.to_string())
    }

    async fn decode_success<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.detail);
            return Err(ApiError::Status {
                code: status.as_u16(),
                detail,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl ChatService for ReqwestService {
    async fn send_chat(&self, question: &str) -> Result<ChatAnswer, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/chat"))
            .json(&ChatRequest { question })
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::decode_success(response).await
    }

    async fn start_evaluation(&self) -> Result<StartAck, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/evaluate"))
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::decode_success(response).await
    }

    async fn evaluation_status(&self) -> Result<EvalStatusDoc, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/evaluate/status"))
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::decode_success(response).await
    }

    async fn health(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .get(self.host_root()?)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                code: status.as_u16(),
                detail: None,
            });
        }
        Ok(())
    }
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Transport(format!("timed out: {err}"));
    }
    ApiError::Transport(err.to_string())
}
