//! Thin async HTTP wrapper: one request in, exactly one outcome out.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Method, StatusCode};
use shared::protocol::JSON_CONTENT_TYPE;
use thiserror::Error;
use tracing::debug;

/// A fully formed request, built at dispatch time from the current form inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: None,
        }
    }

    pub fn put_json(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::PUT,
            url: url.into(),
            body: Some(body.into()),
        }
    }

    /// Requests with a body are JSON; bodiless requests carry no content type.
    pub fn content_type(&self) -> Option<&'static str> {
        self.body.as_ref().map(|_| JSON_CONTENT_TYPE)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Resolves to the full response body on a 2xx, or to the failure otherwise.
    async fn send(&self, request: ApiRequest) -> Result<String, TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<String, TransportError> {
        let mut builder = self.http.request(request.method.clone(), request.url.as_str());
        if let Some(content_type) = request.content_type() {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let ApiRequest { method, url, body } = request;
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| TransportError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            // The error body is dropped unread.
            return Err(TransportError::Status { url, status });
        }

        let text = response
            .text()
            .await
            .map_err(|source| TransportError::Body {
                url: url.clone(),
                source,
            })?;
        debug!(%method, %url, %status, bytes = text.len(), "request completed");
        Ok(text)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
