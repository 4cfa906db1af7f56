//! HTTP transport
//!
//! The client never talks to `reqwest` directly. It hands a
//! [`PreparedRequest`] to a [`Transport`] and gets back the status and the raw
//! body text. [`ReqwestTransport`] is the default; tests and callers with
//! special needs can plug in their own implementation.
//!
//! The blocking twin lives in [`blocking`].

pub mod blocking;

use crate::request::Payload;
use crate::{ChapaError, Result};
use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// A fully resolved request: absolute URL, merged headers, optional body
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub payload: Option<Payload>,
}

/// What came back from the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Async HTTP transport
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the status and body text
    async fn send(&self, request: PreparedRequest) -> Result<TransportResponse>;
}

/// [`Transport`] backed by `reqwest`
///
/// Payloads are sent form-encoded.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with an optional request timeout
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| ChapaError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: PreparedRequest) -> Result<TransportResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(payload) = &request.payload {
            builder = builder.form(payload);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}
