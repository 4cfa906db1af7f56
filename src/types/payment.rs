//! Payment initialization and verification types

use super::constants::{currencies, paths};
use crate::request::{self, validate_amount, validate_email, ApiRequest, Operation, Payload};
use crate::{ChapaError, Result};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

/// Amount as supplied by the caller
///
/// Integers and decimal strings follow different validation rules; see
/// [`crate::request::validate_amount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amount {
    /// Whole amount
    Integer(i64),
    /// Decimal amount in string form, e.g. `"1311.00"`
    Decimal(String),
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Integer(value)
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount::Integer(value.into())
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount::Integer(value.into())
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Decimal(value.to_string())
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::Decimal(value.to_string())
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Decimal(value.to_string())
    }
}

impl From<String> for Amount {
    fn from(value: String) -> Self {
        Amount::Decimal(value)
    }
}

/// Look and feel of the hosted checkout page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customization {
    pub title: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
}

impl Customization {
    /// Create an empty customization
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the checkout page title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the checkout page description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the checkout page logo URL
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Read a customization from a JSON object
    ///
    /// Only `title`, `description` and `logo` are picked up; other keys are
    /// ignored. Null values count as absent.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            ChapaError::invalid_parameter_type(
                "customization",
                format!(
                    "expected an object, got {}",
                    request::json_type_name(value)
                ),
            )
        })?;

        Ok(Self {
            title: customization_entry(map, "title")?,
            description: customization_entry(map, "description")?,
            logo: customization_entry(map, "logo")?,
        })
    }

    /// Flatten into `customization[<key>]` payload fields
    pub(crate) fn apply(&self, payload: &mut Payload) {
        payload.insert_opt("customization[title]", self.title.as_deref());
        payload.insert_opt("customization[description]", self.description.as_deref());
        payload.insert_opt("customization[logo]", self.logo.as_deref());
    }
}

fn customization_entry(map: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(v.to_string())),
        Some(other) => Err(ChapaError::invalid_parameter_type(
            format!("customization.{}", key),
            format!("expected a string, got {}", request::json_type_name(other)),
        )),
    }
}

/// Generate a unique merchant transaction reference
pub fn generate_tx_ref() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Parameters for `POST /transaction/initialize`
#[derive(Debug, Clone, PartialEq)]
pub struct InitializePayment {
    pub email: String,
    pub amount: Amount,
    pub first_name: String,
    pub last_name: String,
    pub tx_ref: String,
    pub currency: String,
    pub phone_number: Option<String>,
    pub callback_url: Option<String>,
    pub return_url: Option<String>,
    pub customization: Option<Customization>,
    /// Fields merged verbatim after everything else
    pub extra: Map<String, Value>,
}

impl InitializePayment {
    /// Create payment parameters with the required fields; currency defaults to ETB
    pub fn new(
        email: impl Into<String>,
        amount: impl Into<Amount>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        tx_ref: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            amount: amount.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            tx_ref: tx_ref.into(),
            currency: currencies::ETB.to_string(),
            phone_number: None,
            callback_url: None,
            return_url: None,
            customization: None,
            extra: Map::new(),
        }
    }

    /// Set the currency code
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the customer's phone number
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// URL the gateway calls once the payment succeeds
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }

    /// URL the customer is redirected to after paying
    pub fn with_return_url(mut self, return_url: impl Into<String>) -> Self {
        self.return_url = Some(return_url.into());
        self
    }

    /// Set the checkout page customization
    pub fn with_customization(mut self, customization: Customization) -> Self {
        self.customization = Some(customization);
        self
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

impl Operation for InitializePayment {
    fn build(&self) -> Result<ApiRequest> {
        let amount = validate_amount(&self.amount)?;
        validate_email(&self.email)?;

        let mut payload = Payload::new();
        payload.insert("first_name", self.first_name.as_str());
        payload.insert("last_name", self.last_name.as_str());
        payload.insert("tx_ref", self.tx_ref.as_str());
        payload.insert("currency", self.currency.as_str());
        payload.insert("amount", amount);
        payload.insert("email", self.email.as_str());
        payload.insert_opt("phone_number", self.phone_number.as_deref());
        payload.insert_opt("callback_url", self.callback_url.as_deref());
        payload.insert_opt("return_url", self.return_url.as_deref());
        if let Some(customization) = &self.customization {
            customization.apply(&mut payload);
        }
        payload.merge_extra(&self.extra)?;

        Ok(ApiRequest::post(paths::TRANSACTION_INITIALIZE, payload))
    }
}

/// Parameters for a split payment through `POST /transaction/initialize`
#[derive(Debug, Clone, PartialEq)]
pub struct InitializeSplitPayment {
    pub email: String,
    pub amount: Amount,
    pub currency: String,
    pub first_name: String,
    pub last_name: String,
    pub tx_ref: String,
    pub callback_url: String,
    pub return_url: String,
    pub subaccount_id: String,
    /// Fields merged verbatim after everything else
    pub extra: Map<String, Value>,
}

impl InitializeSplitPayment {
    /// Create split payment parameters with the required fields
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        email: impl Into<String>,
        amount: impl Into<Amount>,
        currency: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        tx_ref: impl Into<String>,
        callback_url: impl Into<String>,
        return_url: impl Into<String>,
        subaccount_id: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            amount: amount.into(),
            currency: currency.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            tx_ref: tx_ref.into(),
            callback_url: callback_url.into(),
            return_url: return_url.into(),
            subaccount_id: subaccount_id.into(),
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

impl Operation for InitializeSplitPayment {
    fn build(&self) -> Result<ApiRequest> {
        let amount = validate_amount(&self.amount)?;
        validate_email(&self.email)?;

        let mut payload = Payload::new();
        payload.insert("first_name", self.first_name.as_str());
        payload.insert("last_name", self.last_name.as_str());
        payload.insert("tx_ref", self.tx_ref.as_str());
        payload.insert("currency", self.currency.as_str());
        payload.insert("callback_url", self.callback_url.as_str());
        payload.insert("return_url", self.return_url.as_str());
        payload.insert("subaccount_id", self.subaccount_id.as_str());
        payload.insert("amount", amount);
        payload.insert("email", self.email.as_str());
        payload.merge_extra(&self.extra)?;

        Ok(ApiRequest::post(paths::TRANSACTION_INITIALIZE, payload))
    }
}

/// Parameters for `GET /transaction/verify/{tx_ref}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPayment {
    pub tx_ref: String,
}

impl VerifyPayment {
    /// Create verification parameters for a transaction reference
    pub fn new(tx_ref: impl Into<String>) -> Self {
        Self {
            tx_ref: tx_ref.into(),
        }
    }
}

impl Operation for VerifyPayment {
    fn build(&self) -> Result<ApiRequest> {
        let path = request::path_with_reference(paths::TRANSACTION_VERIFY, "tx_ref", &self.tx_ref)?;
        Ok(ApiRequest::get(path))
    }
}
