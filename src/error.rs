//! Error types for the Chapa client
//!
//! Validation failures are raised before any request leaves the process.
//! Transport failures are passed through from `reqwest` untouched. A webhook
//! signature mismatch is not an error at all; see [`crate::webhook`].

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ChapaError>;

/// Errors produced by the Chapa client
#[derive(Debug, Error)]
pub enum ChapaError {
    /// Amount is negative, zero (for decimals) or not a number
    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: String },

    /// Email does not look like `local@domain.tld`
    #[error("Invalid email: {email}")]
    InvalidEmail { email: String },

    /// Response format is not one of the supported values
    #[error("Invalid response format '{format}': expected 'raw' or 'object'")]
    InvalidResponseFormat { format: String },

    /// A parameter had the wrong shape, e.g. a non-object where an object was required
    #[error("Invalid parameter type for '{name}': {reason}")]
    InvalidParameterType { name: String, reason: String },

    /// A required field was empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Client configuration is unusable
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChapaError {
    /// Create an invalid amount error
    pub fn invalid_amount(amount: impl Into<String>) -> Self {
        Self::InvalidAmount {
            amount: amount.into(),
        }
    }

    /// Create an invalid email error
    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail {
            email: email.into(),
        }
    }

    /// Create an invalid response format error
    pub fn invalid_response_format(format: impl Into<String>) -> Self {
        Self::InvalidResponseFormat {
            format: format.into(),
        }
    }

    /// Create an invalid parameter type error
    pub fn invalid_parameter_type(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameterType {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the error was raised by client-side validation, before any network call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount { .. }
                | Self::InvalidEmail { .. }
                | Self::InvalidResponseFormat { .. }
                | Self::InvalidParameterType { .. }
                | Self::MissingField { .. }
        )
    }
}
