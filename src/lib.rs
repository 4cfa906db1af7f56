//! # Chapa Rust Client
//!
//! A **type-safe** Rust client for the [Chapa](https://chapa.co) payment gateway.
//!
//! ## Features
//!
//! - 💳 **Payments**: Initialize and verify transactions, including split payments
//! - 🏦 **Transfers**: List banks, send transfers and verify them
//! - 🤝 **Subaccounts**: Create subaccounts for commission splits
//! - 🔐 **Webhooks**: Constant-time HMAC-SHA256 signature verification
//! - ⚡ **Async and blocking**: One set of operations, two clients
//! - 🧪 **Sandbox fixtures**: Test cards and mobile wallets for the test environment
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chapa::{Chapa, ChapaConfig, InitializePayment};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Chapa::new(ChapaConfig::from_env()?)?;
//!
//!     let payment = InitializePayment::new(
//!         "abebe@example.com",
//!         "100.00",
//!         "Abebe",
//!         "Bikila",
//!         chapa::generate_tx_ref(),
//!     )
//!     .with_callback_url("https://example.com/chapa/callback");
//!
//!     let response = client.initialize(&payment).await?;
//!     println!("{}: {:?}", response.status(), response.message());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`types`**: Configuration and typed operation parameters
//! - **`request`**: Validation and request shaping shared by both clients
//! - **`transport`**: Async and blocking HTTP transports (`reqwest` by default)
//! - **`client`**: The async [`Chapa`] client and its blocking twin
//! - **`response`**: Status plus a raw, object-shaped or text body
//! - **`webhook`**: Signature verification and the event catalogue
//! - **`sandbox`**: Test cards and mobile wallets
//! - **`error`**: Error handling
//!
//! ## Response Formats
//!
//! With [`ResponseFormat::Raw`] (the default) bodies come back as
//! `serde_json::Value`. With [`ResponseFormat::Object`] a JSON object body is
//! turned into a [`response::Record`] with field access by name. A body that is
//! not JSON is returned as text either way, and non-2xx statuses are returned,
//! not raised.

pub mod client;
pub mod error;
pub mod request;
pub mod response;
pub mod sandbox;
pub mod transport;
pub mod types;
pub mod webhook;

// Re-exports for convenience
pub use client::Chapa;
pub use error::{ChapaError, Result};
pub use response::{ApiResponse, ResponseBody};
pub use types::*;
pub use webhook::{verify_webhook, verify_webhook_bytes, WebhookEvent, WebhookVerifier};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
