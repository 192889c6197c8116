use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{Client as HttpClient, Method, StatusCode};
use sha2::Sha256;
use thiserror::Error;

const API_VERSION: &str = "2019-12-12";
const MESSAGE_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("queue request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("queue service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("storage account key rejected by the signer")]
    InvalidKey,
}

/// Raw queue operations; `FeedbackQueue` decides when each one runs.
#[async_trait]
pub trait QueueBackend: Send + Sync + 'static {
    /// Succeeds when the queue exists afterwards, whether or not this call created it.
    async fn create_if_not_exists(&self, queue: &str) -> Result<(), QueueError>;

    async fn send_message(&self, queue: &str, text: &str) -> Result<(), QueueError>;
}

pub struct AzureQueueBackend {
    http: HttpClient,
    account: String,
    key: Vec<u8>,
    endpoint: String,
}

impl AzureQueueBackend {
    pub fn new(account: String, key: Vec<u8>, endpoint: String) -> Self {
        Self {
            http: HttpClient::new(),
            account,
            key,
            endpoint,
        }
    }

    async fn execute(
        &self,
        method: Method,
        url_path: &str,
        body: String,
        content_type: Option<&'static str>,
        accepted: &[StatusCode],
    ) -> Result<StatusCode, QueueError> {
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let resource = canonical_resource(&self.account, &self.endpoint, url_path);
        let to_sign = string_to_sign(
            method.as_str(),
            body.len(),
            content_type.unwrap_or(""),
            &date,
            &resource,
        );
        let signature = sign(&self.key, &to_sign)?;

        let mut request = self
            .http
            .request(method, format!("{}{}", self.endpoint, url_path))
            .header("x-ms-date", &date)
            .header("x-ms-version", API_VERSION)
            .header(
                "Authorization",
                format!("SharedKey {}:{}", self.account, signature),
            )
            .body(body);
        if let Some(content_type) = content_type {
            request = request.header("Content-Type", content_type);
        }

        let response = request.send().await?;
        let status = response.status();
        if accepted.contains(&status) {
            return Ok(status);
        }
        let body = response.text().await.unwrap_or_default();
        Err(QueueError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl QueueBackend for AzureQueueBackend {
    async fn create_if_not_exists(&self, queue: &str) -> Result<(), QueueError> {
        let status = self
            .execute(
                Method::PUT,
                &format!("/{queue}"),
                String::new(),
                None,
                &[StatusCode::CREATED, StatusCode::NO_CONTENT, StatusCode::CONFLICT],
            )
            .await?;
        match status {
            StatusCode::CREATED => tracing::info!("queue {} created", queue),
            // 204 and 409 both mean the queue is already there
            _ => tracing::info!("queue {} already exists", queue),
        }
        Ok(())
    }

    async fn send_message(&self, queue: &str, text: &str) -> Result<(), QueueError> {
        self.execute(
            Method::POST,
            &format!("/{queue}/messages"),
            message_envelope(text),
            Some(MESSAGE_CONTENT_TYPE),
            &[StatusCode::CREATED],
        )
        .await?;
        tracing::info!("message added to queue {}", queue);
        Ok(())
    }
}

/// Message text travels base64-encoded, the storage SDK default consumers decode.
pub(crate) fn message_envelope(text: &str) -> String {
    format!(
        "<QueueMessage><MessageText>{}</MessageText></QueueMessage>",
        STANDARD.encode(text.as_bytes())
    )
}

/// Path-style endpoints (emulators) already carry the account in their path.
pub(crate) fn canonical_resource(account: &str, endpoint: &str, url_path: &str) -> String {
    let endpoint_path = endpoint
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(endpoint)
        .split_once('/')
        .map(|(_, path)| format!("/{path}"))
        .unwrap_or_default();
    format!("/{account}{endpoint_path}{url_path}")
}

pub(crate) fn string_to_sign(
    method: &str,
    content_length: usize,
    content_type: &str,
    date: &str,
    resource: &str,
) -> String {
    let content_length = if content_length == 0 {
        String::new()
    } else {
        content_length.to_string()
    };
    format!(
        "{method}\n\n\n{content_length}\n\n{content_type}\n\n\n\n\n\n\nx-ms-date:{date}\nx-ms-version:{API_VERSION}\n{resource}"
    )
}

pub(crate) fn sign(key: &[u8], string_to_sign: &str) -> Result<String, QueueError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(|_| QueueError::InvalidKey)?;
    mac.update(string_to_sign.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
