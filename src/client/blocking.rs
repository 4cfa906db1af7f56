//! Blocking Chapa API client
//!
//! Same operations and behaviour as [`super::Chapa`], waiting on the network
//! instead of suspending. Do not use it from inside an async runtime.
//!
//! ```no_run
//! use chapa::client::blocking::Chapa;
//! use chapa::types::ChapaConfig;
//!
//! # fn example() -> chapa::Result<()> {
//! let client = Chapa::new(ChapaConfig::new("CHASECK_TEST-xxxxxxxx"))?;
//! let banks = client.get_banks()?;
//! println!("{:?}", banks.message());
//! # Ok(())
//! # }
//! ```

use super::{finish, prepare};
use crate::request::{ExtraHeaders, Operation};
use crate::response::ApiResponse;
use crate::transport::blocking::{BlockingTransport, ReqwestBlockingTransport};
use crate::types::{
    ChapaConfig, CreateSubaccount, InitializePayment, InitializeSplitPayment, ListBanks,
    TransferToBank, VerifyPayment, VerifyTransfer,
};
use crate::webhook::WebhookVerifier;
use crate::Result;

/// Blocking client for the Chapa API
#[derive(Clone)]
pub struct Chapa<T = ReqwestBlockingTransport> {
    config: ChapaConfig,
    transport: T,
}

impl<T> std::fmt::Debug for Chapa<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::Chapa")
            .field("config", &self.config)
            .field("transport", &"<transport>")
            .finish()
    }
}

impl Chapa<ReqwestBlockingTransport> {
    /// Create a client backed by `reqwest::blocking`
    pub fn new(config: ChapaConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestBlockingTransport::new(config.timeout)?;
        Ok(Self { config, transport })
    }
}

impl<T: BlockingTransport> Chapa<T> {
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
    pub fn initialize(&self, params: &InitializePayment) -> Result<ApiResponse> {
        self.execute(params)
    }

    /// Verify a transaction by its merchant reference
    pub fn verify(&self, tx_ref: &str) -> Result<ApiResponse> {
        self.execute(&VerifyPayment::new(tx_ref))
    }

    /// Create a subaccount for split payments
    pub fn create_subaccount(&self, params: &CreateSubaccount) -> Result<ApiResponse> {
        self.execute(params)
    }

    /// Initialize a transaction split with a subaccount
    pub fn initialize_split_payment(&self, params: &InitializeSplitPayment) -> Result<ApiResponse> {
        self.execute(params)
    }

    /// List the banks supported for transfers and subaccounts
    pub fn get_banks(&self) -> Result<ApiResponse> {
        self.execute(&ListBanks)
    }

    /// Initiate a transfer to a bank account
    pub fn transfer_to_bank(&self, params: &TransferToBank) -> Result<ApiResponse> {
        self.execute(params)
    }

    /// Verify a transfer by its merchant reference
    pub fn verify_transfer(&self, reference: &str) -> Result<ApiResponse> {
        self.execute(&VerifyTransfer::new(reference))
    }

    /// Check a webhook signature against the configured secret key
    pub fn verify_webhook(&self, body: &serde_json::Value, signature: &str) -> bool {
        WebhookVerifier::from_config(&self.config).verify(body, signature)
    }

    /// Run any operation
    pub fn execute<O: Operation + ?Sized>(&self, operation: &O) -> Result<ApiResponse> {
        let request = prepare(&self.config, operation.build()?, None)?;
        let response = self.transport.send(request)?;
        Ok(finish(&self.config, response))
    }

    /// Run any operation with extra headers
    pub fn execute_with_headers<O: Operation + ?Sized>(
        &self,
        operation: &O,
        headers: &ExtraHeaders,
    ) -> Result<ApiResponse> {
        let request = prepare(&self.config, operation.build()?, Some(headers))?;
        let response = self.transport.send(request)?;
        Ok(finish(&self.config, response))
    }
}
