//! Blocking HTTP transport

use super::{PreparedRequest, TransportResponse};
use crate::{ChapaError, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Blocking HTTP transport
pub trait BlockingTransport: Send + Sync {
    /// Send a request and return the status and body text
    fn send(&self, request: PreparedRequest) -> Result<TransportResponse>;
}

/// [`BlockingTransport`] backed by `reqwest::blocking`
///
/// Must not be created or used from inside an async runtime.
#[derive(Debug, Clone)]
pub struct ReqwestBlockingTransport {
    client: Client,
}

impl ReqwestBlockingTransport {
    /// Create a transport with an optional request timeout
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        // reqwest::blocking applies a 30s default; None here means no timeout
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChapaError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing blocking `reqwest` client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl BlockingTransport for ReqwestBlockingTransport {
    fn send(&self, request: PreparedRequest) -> Result<TransportResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(payload) = &request.payload {
            builder = builder.form(payload);
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;

        Ok(TransportResponse { status, body })
    }
}
