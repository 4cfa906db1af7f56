//! Bank and transfer types

use super::constants::{currencies, paths};
use crate::request::{self, ApiRequest, Operation, Payload};
use crate::Result;

/// Parameters for `GET /banks`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListBanks;

impl Operation for ListBanks {
    fn build(&self) -> Result<ApiRequest> {
        Ok(ApiRequest::get(paths::BANKS))
    }
}

/// Parameters for `POST /transfer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferToBank {
    /// Recipient name as registered with the bank
    pub account_name: String,
    pub account_number: String,
    /// Amount to transfer, passed through as given
    pub amount: String,
    /// Merchant's unique reference, used later to verify the transfer
    pub reference: String,
    pub bank_code: String,
    pub currency: String,
    pub beneficiary_name: Option<String>,
}

impl TransferToBank {
    /// Create transfer parameters; currency defaults to ETB
    pub fn new(
        account_name: impl Into<String>,
        account_number: impl Into<String>,
        amount: impl Into<String>,
        reference: impl Into<String>,
        bank_code: impl Into<String>,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            account_number: account_number.into(),
            amount: amount.into(),
            reference: reference.into(),
            bank_code: bank_code.into(),
            currency: currencies::ETB.to_string(),
            beneficiary_name: None,
        }
    }

    /// Set the currency code
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the beneficiary name shown on the transfer
    pub fn with_beneficiary_name(mut self, beneficiary_name: impl Into<String>) -> Self {
        self.beneficiary_name = Some(beneficiary_name.into());
        self
    }
}

impl Operation for TransferToBank {
    fn build(&self) -> Result<ApiRequest> {
        let mut payload = Payload::new();
        payload.insert("account_name", self.account_name.as_str());
        payload.insert("account_number", self.account_number.as_str());
        payload.insert("amount", self.amount.as_str());
        payload.insert("reference", self.reference.as_str());
        payload.insert("bank_code", self.bank_code.as_str());
        payload.insert("currency", self.currency.as_str());
        payload.insert_opt("beneficiary_name", self.beneficiary_name.as_deref());

        Ok(ApiRequest::post(paths::TRANSFER, payload))
    }
}

/// Parameters for `GET /transfer/verify/{reference}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyTransfer {
    pub reference: String,
}

impl VerifyTransfer {
    /// Create verification parameters for a transfer reference
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

impl Operation for VerifyTransfer {
    fn build(&self) -> Result<ApiRequest> {
        let path =
            request::path_with_reference(paths::TRANSFER_VERIFY, "reference", &self.reference)?;
        Ok(ApiRequest::get(path))
    }
}
