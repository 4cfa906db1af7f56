//! Common constants for endpoints, currencies and environment variables

/// Default Chapa API host
pub const DEFAULT_BASE_URL: &str = "https://api.chapa.co";

/// Default Chapa API version segment
pub const DEFAULT_API_VERSION: &str = "v1";

/// API paths, relative to `{base_url}/{api_version}`
pub mod paths {
    /// Initialize a transaction (plain or split)
    pub const TRANSACTION_INITIALIZE: &str = "/transaction/initialize";
    /// Verify a transaction; the reference is appended as a path segment
    pub const TRANSACTION_VERIFY: &str = "/transaction/verify";
    /// Create a subaccount
    pub const SUBACCOUNT: &str = "/subaccount";
    /// List supported banks
    pub const BANKS: &str = "/banks";
    /// Initiate a bank transfer
    pub const TRANSFER: &str = "/transfer";
    /// Verify a transfer; the reference is appended as a path segment
    pub const TRANSFER_VERIFY: &str = "/transfer/verify";
}

/// Currencies accepted by the gateway
pub mod currencies {
    /// Ethiopian birr
    pub const ETB: &str = "ETB";
    /// US dollar
    pub const USD: &str = "USD";
}

/// Environment variables read by [`crate::types::ChapaConfig::from_env`]
pub mod env_vars {
    pub const SECRET_KEY: &str = "CHAPA_SECRET_KEY";
    pub const BASE_URL: &str = "CHAPA_BASE_URL";
    pub const API_VERSION: &str = "CHAPA_API_VERSION";
    pub const RESPONSE_FORMAT: &str = "CHAPA_RESPONSE_FORMAT";
    pub const TIMEOUT_SECS: &str = "CHAPA_TIMEOUT_SECS";
}
