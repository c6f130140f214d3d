use crate::config::Settings;
use crate::model::{
    ConversationReply, ConversationRequest, LogDetailReply, LogListReply, LogSummary, StartReply,
};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid backend url '{0}'")]
    InvalidUrl(String),
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("request timed out: {url}")]
    Timeout { url: String },
    #[error("request failed: {url}: {message}")]
    Transport { url: String, message: String },
    #[error("server answered {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },
    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("{0}")]
    Rejected(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ApiError {
    /// Text suitable for a chat bubble: the server's own message when it
    /// sent one, otherwise the error description.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Rejected(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Seams
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ConsultationBackend: Send + Sync {
    /// `POST /api/start_consultation`
    async fn start_consultation(&self) -> Result<StartReply, ApiError>;

    /// `POST /api/conversation`
    async fn send_message(
        &self,
        consultation_id: &str,
        message: &str,
    ) -> Result<ConversationReply, ApiError>;
}

#[async_trait]
pub trait LogArchive: Send + Sync {
    /// `GET /api/interaction_logs`
    async fn list_logs(&self) -> Result<Vec<LogSummary>, ApiError>;

    /// `GET /api/interaction_logs/{id}`; the raw `logs` value, shape
    /// checked by the renderer.
    async fn fetch_log(&self, consultation_id: &str) -> Result<Value, ApiError>;
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let base = Url::parse(settings.base_url.trim_end_matches('/'))
            .map_err(|_| ApiError::InvalidUrl(settings.base_url.clone()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(settings.base_url.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .danger_accept_invalid_certs(settings.insecure_tls)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &Url) -> Result<Reply, ApiError> {
        debug!(%url, "backend request");
        let resp = request.send().await.map_err(|e| transport_error(e, url))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| transport_error(e, url))?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "backend response");
        Ok(Reply { status, body })
    }
}

struct Reply {
    status: StatusCode,
    body: String,
}

impl Reply {
    fn decode<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Non-2xx answer, carrying the server's `message` when the body has one.
    fn failure(&self) -> ApiError {
        let message = serde_json::from_str::<Value>(&self.body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));
        ApiError::Status {
            status: self.status.as_u16(),
            message,
        }
    }
}

fn transport_error(err: reqwest::Error, url: &Url) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout {
            url: url.to_string(),
        }
    } else {
        ApiError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl ConsultationBackend for HttpBackend {
    async fn start_consultation(&self) -> Result<StartReply, ApiError> {
        let url = self.endpoint(&["api", "start_consultation"]);
        let reply = self
            .send(self.client.post(url.clone()).json(&Value::Object(Default::default())), &url)
            .await?;

        if !reply.status.is_success() {
            return Err(reply.failure());
        }
        reply.decode(&url)
    }

    async fn send_message(
        &self,
        consultation_id: &str,
        message: &str,
    ) -> Result<ConversationReply, ApiError> {
        let url = self.endpoint(&["api", "conversation"]);
        let body = ConversationRequest {
            consultation_id,
            message,
        };
        let reply = self.send(self.client.post(url.clone()).json(&body), &url).await?;

        if reply.status.is_success() {
            return reply.decode(&url);
        }

        // The backend reports orchestration errors as a regular reply with
        // `status: "error"` and a 4xx/5xx code.
        match reply.decode::<ConversationReply>(&url) {
            Ok(decoded) if decoded.status.is_some() => {
                warn!(status = reply.status.as_u16(), "conversation reply with error code");
                Ok(decoded)
            }
            _ => Err(reply.failure()),
        }
    }
}

#[async_trait]
impl LogArchive for HttpBackend {
    async fn list_logs(&self) -> Result<Vec<LogSummary>, ApiError> {
        let url = self.endpoint(&["api", "interaction_logs"]);
        let reply = self.send(self.client.get(url.clone()), &url).await?;
        if !reply.status.is_success() {
            return Err(reply.failure());
        }

        let body: LogListReply = reply.decode(&url)?;
        ensure_success_status(body.status.as_deref(), body.message)?;
        Ok(body.logs)
    }

    async fn fetch_log(&self, consultation_id: &str) -> Result<Value, ApiError> {
        let url = self.endpoint(&["api", "interaction_logs", consultation_id]);
        let reply = self.send(self.client.get(url.clone()), &url).await?;
        if !reply.status.is_success() {
            return Err(reply.failure());
        }

        let body: LogDetailReply = reply.decode(&url)?;
        ensure_success_status(body.status.as_deref(), body.message)?;
        Ok(body.logs.unwrap_or(Value::Null))
    }
}

fn ensure_success_status(status: Option<&str>, message: Option<String>) -> Result<(), ApiError> {
    match status {
        Some("success") | None => Ok(()),
        Some(other) => Err(ApiError::Rejected(
            message.unwrap_or_else(|| format!("server reported status '{other}'")),
        )),
    }
}
