//! Chapa API client
//!
//! [`Chapa`] is the async client. Every call validates its parameters, merges
//! the caller's headers under the `Authorization` header, sends the request
//! through a [`Transport`], and shapes the body according to the configured
//! [`ResponseFormat`](crate::types::ResponseFormat).
//!
//! The blocking client in [`blocking`] shares all of that and only differs in
//! how it waits for the network.
//!
//! # Examples
//!
//! ## Initializing and Verifying a Payment
//!
//! ```no_run
//! use chapa::client::Chapa;
//! use chapa::types::{ChapaConfig, Customization, InitializePayment};
//!
//! # async fn example() -> chapa::Result<()> {
//! let client = Chapa::new(ChapaConfig::new("CHASECK_TEST-xxxxxxxx"))?;
//!
//! let payment = InitializePayment::new("abebe@example.com", 1311, "Abebe", "Bikila", "tx-42")
//!     .with_customization(Customization::new().with_title("Example.com"));
//!
//! let response = client.initialize(&payment).await?;
//! if response.is_success() {
//!     // redirect to data.checkout_url
//! }
//!
//! let verified = client.verify("tx-42").await?;
//! println!("{:?}", verified.message());
//! # Ok(())
//! # }
//! ```
//!
//! ## Sending Extra Headers
//!
//! ```no_run
//! use chapa::client::Chapa;
//! use chapa::request::ExtraHeaders;
//! use chapa::types::{ChapaConfig, ListBanks};
//!
//! # async fn example() -> chapa::Result<()> {
//! let client = Chapa::new(ChapaConfig::new("CHASECK_TEST-xxxxxxxx"))?;
//!
//! let mut headers = ExtraHeaders::new();
//! headers.insert("X-Request-Id".to_string(), "req-1".to_string());
//!
//! let banks = client.execute_with_headers(&ListBanks, &headers).await?;
//! # Ok(())
//! # }
//! ```

pub mod blocking;

#[cfg(test)]
mod tests;

use crate::request::{self, ApiRequest, ExtraHeaders, Operation};
use crate::response::ApiResponse;
use crate::transport::{PreparedRequest, ReqwestTransport, Transport, TransportResponse};
use crate::types::{
    ChapaConfig, CreateSubaccount, InitializePayment, InitializeSplitPayment, ListBanks,
    TransferToBank, VerifyPayment, VerifyTransfer,
};
use crate::webhook::WebhookVerifier;
use crate::Result;

/// Async client for the Chapa API
#[derive(Clone)]
pub struct Chapa<T = ReqwestTransport> {
    config: ChapaConfig,
    transport: T,
}

impl<T> std::fmt::Debug for Chapa<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chapa")
            .field("config", &self.config)
            .field("transport", &"<transport>")
            .finish()
    }
}

impl Chapa<ReqwestTransport> {
    /// Create a client backed by `reqwest`
    pub fn new(config: ChapaConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> Chapa<T> {
    /// Create a client with a custom transport
    pub fn with_transport(config: ChapaConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ChapaConfig {
        &self.config
    }

    /// Initialize a transaction and get a checkout link
    pub async fn initialize(&self, params: &InitializePayment) -> Result<ApiResponse> {
        self.execute(params).await
    }

    /// Verify a transaction by its merchant reference
    pub async fn verify(&self, tx_ref: &str) -> Result<ApiResponse> {
        self.execute(&VerifyPayment::new(tx_ref)).await
    }

    /// Create a subaccount for split payments
    pub async fn create_subaccount(&self, params: &CreateSubaccount) -> Result<ApiResponse> {
        self.execute(params).await
    }

    /// Initialize a transaction split with a subaccount
    pub async fn initialize_split_payment(
        &self,
        params: &InitializeSplitPayment,
    ) -> Result<ApiResponse> {
        self.execute(params).await
    }

    /// List the banks supported for transfers and subaccounts
    pub async fn get_banks(&self) -> Result<ApiResponse> {
        self.execute(&ListBanks).await
    }

    /// Initiate a transfer to a bank account
    pub async fn transfer_to_bank(&self, params: &TransferToBank) -> Result<ApiResponse> {
        self.execute(params).await
    }

    /// Verify a transfer by its merchant reference
    pub async fn verify_transfer(&self, reference: &str) -> Result<ApiResponse> {
        self.execute(&VerifyTransfer::new(reference)).await
    }

    /// Check a webhook signature against the configured secret key
    pub fn verify_webhook(&self, body: &serde_json::Value, signature: &str) -> bool {
        WebhookVerifier::from_config(&self.config).verify(body, signature)
    }

    /// Run any operation
    pub async fn execute<O: Operation + ?Sized>(&self, operation: &O) -> Result<ApiResponse> {
        let request = prepare(&self.config, operation.build()?, None)?;
        let response = self.transport.send(request).await?;
        Ok(finish(&self.config, response))
    }

    /// Run any operation with extra headers
    ///
    /// The `Authorization` header always wins over a caller header of the same name.
    pub async fn execute_with_headers<O: Operation + ?Sized>(
        &self,
        operation: &O,
        headers: &ExtraHeaders,
    ) -> Result<ApiResponse> {
        let request = prepare(&self.config, operation.build()?, Some(headers))?;
        let response = self.transport.send(request).await?;
        Ok(finish(&self.config, response))
    }
}

/// Resolve a built request against the config
pub(crate) fn prepare(
    config: &ChapaConfig,
    request: ApiRequest,
    extra_headers: Option<&ExtraHeaders>,
) -> Result<PreparedRequest> {
    let headers = request::merge_headers(&config.bearer(), extra_headers)?;
    let url = config.endpoint(&request.path)?;

    tracing::debug!(
        "Sending {} {} with fields: {:?}",
        request.method,
        url,
        request
            .payload
            .as_ref()
            .map(|payload| payload.keys().collect::<Vec<_>>())
            .unwrap_or_default()
    );

    Ok(PreparedRequest {
        method: request.method,
        url,
        headers,
        payload: request.payload,
    })
}

/// Decode and shape a transport response
pub(crate) fn finish(config: &ChapaConfig, response: TransportResponse) -> ApiResponse {
    if !response.status.is_success() {
        tracing::warn!("Chapa responded with status: {}", response.status);
    }
    ApiResponse::from_text(response.status, &response.body, config.response_format)
}
