//! Core types for the Chapa API
//!
//! This module defines the client configuration and one parameter struct per
//! API operation. Each parameter struct implements
//! [`Operation`](crate::request::Operation), so it can be validated and turned
//! into a request without a client.
//!
//! # Architecture
//!
//! The types module is organized as follows:
//! - [`config`] - Client configuration and response format
//! - [`payment`] - Payment initialization and verification
//! - [`subaccount`] - Subaccounts for split payments
//! - [`transfer`] - Banks and bank transfers
//! - [`constants`] - Endpoints, currencies, environment variable names
//!
//! # Examples
//!
//! ## Initializing a Payment
//!
//! ```
//! use chapa::request::Operation;
//! use chapa::types::{generate_tx_ref, Customization, InitializePayment};
//!
//! # fn example() -> chapa::Result<()> {
//! let payment = InitializePayment::new(
//!     "abebe@example.com",   // email
//!     "1311.00",             // amount
//!     "Abebe",               // first name
//!     "Bikila",              // last name
//!     generate_tx_ref(),     // merchant reference
//! )
//! .with_callback_url("https://example.com/callback")
//! .with_customization(
//!     Customization::new()
//!         .with_title("Example.com")
//!         .with_description("Payment for your services"),
//! );
//!
//! let request = payment.build()?;
//! assert_eq!(request.path, "/transaction/initialize");
//! # Ok(())
//! # }
//! ```
//!
//! ## Creating a Subaccount
//!
//! ```
//! use chapa::types::{CreateSubaccount, SplitType};
//!
//! // Collect 3% of every transaction
//! let subaccount = CreateSubaccount::new(
//!     "Abebe Souq",
//!     "Abebe Bikila",
//!     "96e41186-29ba-4e30-b013-2ca36d7e7025",
//!     "0123456789",
//!     "0.03",
//!     SplitType::Percentage,
//! );
//! assert_eq!(subaccount.split_type.as_str(), "percentage");
//! ```
//!
//! ## Client Configuration
//!
//! ```
//! use chapa::types::{ChapaConfig, ResponseFormat};
//! use std::time::Duration;
//!
//! # fn example() -> chapa::Result<()> {
//! let config = ChapaConfig::new("CHASECK_TEST-xxxxxxxx")
//!     .with_response_format("obj".parse()?)
//!     .with_timeout(Duration::from_secs(30));
//!
//! config.validate()?;
//! assert_eq!(config.response_format, ResponseFormat::Object);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod payment;
pub mod subaccount;
pub mod transfer;

// Re-export commonly used types
pub use config::{ChapaConfig, ResponseFormat};
pub use constants::{currencies, paths};
pub use payment::{
    generate_tx_ref, Amount, Customization, InitializePayment, InitializeSplitPayment,
    VerifyPayment,
};
pub use subaccount::{CreateSubaccount, SplitType};
pub use transfer::{ListBanks, TransferToBank, VerifyTransfer};
