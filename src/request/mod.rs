//! Request shaping
//!
//! Every API operation is a typed parameter struct (see [`crate::types`]) that
//! implements [`Operation`]. Building an operation validates its inputs and
//! yields an [`ApiRequest`]: the HTTP method, the path relative to the
//! versioned API root, and an optional flat [`Payload`]. Nothing here touches
//! the network, so both the async and the blocking client share it.
//!
//! # Payload rules
//!
//! - Optional fields are only inserted when the caller supplied them.
//! - Customization sub-keys are flattened to `customization[title]` and friends.
//! - Caller-supplied extra fields are merged last and win on key collision.
//!
//! ```
//! use chapa::request::Operation;
//! use chapa::types::{Customization, InitializePayment};
//!
//! # fn example() -> chapa::Result<()> {
//! let request = InitializePayment::new("abebe@example.com", "1311.00", "Abebe", "Bikila", "tx-42")
//!     .with_customization(Customization::new().with_title("Example.com"))
//!     .build()?;
//!
//! let payload = request.payload.unwrap();
//! assert_eq!(payload.get("amount").unwrap(), "1311");
//! assert_eq!(payload.get("customization[title]").unwrap(), "Example.com");
//! # Ok(())
//! # }
//! ```

pub mod validation;


use crate::{ChapaError, Result};
use http::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use http::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub use validation::{validate_amount, validate_email};

/// Caller-supplied headers, merged under the base `Authorization` header
///
/// Applied in key order, so when two names differ only in case the one that
/// sorts last (`x-a` after `X-A`) wins.
pub type ExtraHeaders = BTreeMap<String, String>;

/// Characters left untouched when a reference is placed in a path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// An API operation that can be turned into a request
pub trait Operation {
    /// Validate inputs and build the request
    fn build(&self) -> Result<ApiRequest>;
}

/// A validated request, ready to be handed to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to `{base_url}/{api_version}`, e.g. `/banks`
    pub path: String,
    /// Request body, absent for GET requests
    pub payload: Option<Payload>,
}

impl ApiRequest {
    /// Create a GET request without a body
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            payload: None,
        }
    }

    /// Create a POST request with a body
    pub fn post(path: impl Into<String>, payload: Payload) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            payload: Some(payload),
        }
    }
}

/// Ordered, flat request body
///
/// Values are scalars only. Inserting a key that already exists replaces the
/// value in its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Create an empty payload
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Insert a field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Insert a field only when a value was supplied
    pub fn insert_opt(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Merge caller-supplied fields, overriding anything already present
    pub fn merge_extra(&mut self, extra: &Map<String, Value>) -> Result<()> {
        for (key, value) in extra {
            if !is_scalar(value) {
                return Err(ChapaError::invalid_parameter_type(
                    key.as_str(),
                    "extra fields must be strings, numbers or booleans",
                ));
            }
            self.0.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    /// Look up a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether a field is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Accept a JSON value as a set of extra fields
///
/// Fails with [`ChapaError::InvalidParameterType`] unless `value` is an object.
pub fn extra_fields(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ChapaError::invalid_parameter_type(
            "extra",
            format!("expected an object, got {}", json_type_name(&other)),
        )),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Append a reference to a path as a single percent-encoded segment
pub fn path_with_reference(base: &str, field: &str, reference: &str) -> Result<String> {
    validation::require_non_empty(field, reference)?;
    Ok(format!(
        "{}/{}",
        base,
        utf8_percent_encode(reference, PATH_SEGMENT)
    ))
}

/// Merge caller headers with the base `Authorization` header
///
/// The base header wins on collision; names compare case-insensitively.
/// Caller headers are applied in [`ExtraHeaders`] key order.
pub fn merge_headers(bearer: &str, extra: Option<&ExtraHeaders>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(extra) = extra {
        for (name, value) in extra {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ChapaError::invalid_parameter_type("headers", format!("bad header name '{}': {}", name, e))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                ChapaError::invalid_parameter_type(
                    "headers",
                    format!("bad value for header '{}': {}", name, e),
                )
            })?;
            headers.insert(header_name, header_value);
        }
    }

    let mut authorization = HeaderValue::from_str(bearer)
        .map_err(|_| ChapaError::config("Secret key contains characters not allowed in a header"))?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);

    Ok(headers)
}
