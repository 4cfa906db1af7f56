//! Subaccount types for split payments

use super::constants::paths;
use crate::request::{self, ApiRequest, Operation, Payload};
use crate::{ChapaError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Commission scheme applied when funds are routed to a subaccount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    /// Fixed amount per transaction, e.g. `25`
    Flat,
    /// Fraction of each transaction, e.g. `0.03`
    Percentage,
}

impl SplitType {
    /// Wire name of the split type
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitType::Flat => "flat",
            SplitType::Percentage => "percentage",
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitType {
    type Err = ChapaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "flat" => Ok(SplitType::Flat),
            "percentage" => Ok(SplitType::Percentage),
            other => Err(ChapaError::invalid_parameter_type(
                "split_type",
                format!("expected 'flat' or 'percentage', got '{}'", other),
            )),
        }
    }
}

/// Parameters for `POST /subaccount`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSubaccount {
    pub business_name: String,
    pub account_name: String,
    /// Bank id as returned by the banks endpoint
    pub bank_code: String,
    pub account_number: String,
    pub split_value: String,
    pub split_type: SplitType,
    /// Fields merged verbatim after everything else
    pub extra: Map<String, Value>,
}

impl CreateSubaccount {
    /// Create subaccount parameters
    pub fn new(
        business_name: impl Into<String>,
        account_name: impl Into<String>,
        bank_code: impl Into<String>,
        account_number: impl Into<String>,
        split_value: impl Into<String>,
        split_type: SplitType,
    ) -> Self {
        Self {
            business_name: business_name.into(),
            account_name: account_name.into(),
            bank_code: bank_code.into(),
            account_number: account_number.into(),
            split_value: split_value.into(),
            split_type,
            extra: Map::new(),
        }
    }

    /// Add a single extra field
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Add extra fields from a JSON object
    pub fn with_extra_fields(mut self, fields: Value) -> Result<Self> {
        self.extra.extend(request::extra_fields(fields)?);
        Ok(self)
    }
}

impl Operation for CreateSubaccount {
    fn build(&self) -> Result<ApiRequest> {
        let mut payload = Payload::new();
        payload.insert("business_name", self.business_name.as_str());
        payload.insert("account_name", self.account_name.as_str());
        payload.insert("bank_code", self.bank_code.as_str());
        payload.insert("account_number", self.account_number.as_str());
        payload.insert("split_value", self.split_value.as_str());
        payload.insert("split_type", self.split_type.as_str());
        payload.merge_extra(&self.extra)?;

        Ok(ApiRequest::post(paths::SUBACCOUNT, payload))
    }
}
