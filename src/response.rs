//! Response decoding and shaping
//!
//! Bodies are decoded as JSON when possible and kept as text otherwise. With
//! [`ResponseFormat::Object`] a JSON object is converted into a [`Record`],
//! a read-only ordered structure with typed accessors; nested objects become
//! nested records, including those inside arrays. The conversion is lossless:
//! [`Record::to_value`] gives back the original JSON, key order included.

use crate::types::ResponseFormat;
use http::StatusCode;
use serde_json::{Map, Number, Value};

/// One value inside a [`Record`]
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Field>),
    Record(Record),
}

impl Field {
    /// Get the string value, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the boolean value, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Field::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as `i64`, if it is an integer that fits
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Field::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Get the value as `f64`, if it is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Field::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Get the items, if this is a list
    pub fn as_list(&self) -> Option<&[Field]> {
        match self {
            Field::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Get the nested record, if this is an object
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Field::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Whether this is `null`
    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    /// Convert back into JSON
    pub fn to_value(&self) -> Value {
        match self {
            Field::Null => Value::Null,
            Field::Bool(b) => Value::Bool(*b),
            Field::Number(n) => Value::Number(n.clone()),
            Field::String(s) => Value::String(s.clone()),
            Field::List(items) => Value::Array(items.iter().map(Field::to_value).collect()),
            Field::Record(record) => record.to_value(),
        }
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Field::Null,
            Value::Bool(b) => Field::Bool(b),
            Value::Number(n) => Field::Number(n),
            Value::String(s) => Field::String(s),
            Value::Array(items) => Field::List(items.into_iter().map(Field::from).collect()),
            Value::Object(map) => Field::Record(Record::from_map(map)),
        }
    }
}

impl From<Field> for Value {
    fn from(field: Field) -> Self {
        match field {
            Field::Null => Value::Null,
            Field::Bool(b) => Value::Bool(b),
            Field::Number(n) => Value::Number(n),
            Field::String(s) => Value::String(s),
            Field::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Field::Record(record) => record.into_value(),
        }
    }
}

/// Read-only view of a JSON object with named accessors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Field)>,
}

impl Record {
    /// Convert a JSON object, recursively
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self {
            fields: map
                .into_iter()
                .map(|(key, value)| (key, Field::from(value)))
                .collect(),
        }
    }

    /// Look up a field by name
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, field)| field)
    }

    /// Look up a string field
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Field::as_str)
    }

    /// Look up a nested record
    pub fn record(&self, key: &str) -> Option<&Record> {
        self.get(key).and_then(Field::as_record)
    }

    /// Whether a field is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Field names in their original order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Fields in their original order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert back into a JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(name, field)| (name.clone(), field.to_value()))
                .collect(),
        )
    }

    /// Convert back into a JSON object, consuming the record
    pub fn into_value(self) -> Value {
        Value::Object(
            self.fields
                .into_iter()
                .map(|(name, field)| (name, Value::from(field)))
                .collect(),
        )
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}

/// Body of an API response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Decoded JSON, unchanged
    Json(Value),
    /// JSON object shaped into a record
    Record(Record),
    /// Body that did not decode as JSON
    Text(String),
}

impl ResponseBody {
    /// Decode a raw body, falling back to text
    pub fn decode(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => ResponseBody::Json(value),
            Err(e) => {
                tracing::debug!("Response body is not JSON ({}), returning text", e);
                ResponseBody::Text(text.to_string())
            }
        }
    }

    /// Apply the configured response format
    ///
    /// Only JSON objects are shaped; everything else passes through.
    pub fn shape(self, format: ResponseFormat) -> Self {
        match (format, self) {
            (ResponseFormat::Object, ResponseBody::Json(Value::Object(map))) => {
                ResponseBody::Record(Record::from_map(map))
            }
            (_, body) => body,
        }
    }

    /// Get the decoded JSON, if the body was kept raw
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Get the record, if the body was shaped into one
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            ResponseBody::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Get the text, if the body was not JSON
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// JSON view of the body, for either structured variant
    pub fn into_value(self) -> Option<Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Record(record) => Some(record.into_value()),
            ResponseBody::Text(_) => None,
        }
    }
}

/// Response returned by every client operation
///
/// Non-success statuses are not errors; the gateway's error body is returned
/// as-is so callers can read its `message`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: StatusCode,
    body: ResponseBody,
}

impl ApiResponse {
    /// Create a response from a status and a body
    pub fn new(status: StatusCode, body: ResponseBody) -> Self {
        Self { status, body }
    }

    /// Decode and shape a raw transport response
    pub fn from_text(status: StatusCode, text: &str, format: ResponseFormat) -> Self {
        Self::new(status, ResponseBody::decode(text).shape(format))
    }

    /// HTTP status returned by the gateway
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Borrow the body
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// Take the body
    pub fn into_body(self) -> ResponseBody {
        self.body
    }

    /// The gateway's `message` field, when present
    pub fn message(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Json(value) => value.get("message").and_then(Value::as_str),
            ResponseBody::Record(record) => record.str("message"),
            ResponseBody::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn verify_body() -> Value {
        json!({
            "message": "Payment details",
            "status": "success",
            "data": {
                "first_name": "Abebe",
                "amount": "1,311.00",
                "charge": 45.89,
                "customization": {"title": "Example.com", "logo": null},
                "meta": null,
                "history": [{"step": 1}, "done"]
            }
        })
    }

    #[test]
    fn test_record_accessors() {
        let record = match Field::from(verify_body()) {
            Field::Record(record) => record,
            other => panic!("expected a record, got {:?}", other),
        };

        assert_eq!(record.str("status"), Some("success"));
        let data = record.record("data").unwrap();
        assert_eq!(data.str("first_name"), Some("Abebe"));
        assert_eq!(data.get("charge").unwrap().as_f64(), Some(45.89));
        assert!(data.get("meta").unwrap().is_null());
        assert_eq!(
            data.record("customization").unwrap().str("title"),
            Some("Example.com")
        );

        let history = data.get("history").unwrap().as_list().unwrap();
        assert_eq!(history[0].as_record().unwrap().get("step").unwrap().as_i64(), Some(1));
        assert_eq!(history[1].as_str(), Some("done"));
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn test_record_round_trip_preserves_map_and_order() {
        let original = verify_body();
        let record = Record::from_map(original.as_object().unwrap().clone());

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["message", "status", "data"]);
        assert_eq!(record.to_value(), original);
        assert_eq!(Value::from(record), original);
    }

    #[test]
    fn test_shape_object_format() {
        let body = ResponseBody::Json(verify_body()).shape(ResponseFormat::Object);
        let record = body.as_record().unwrap();
        assert_eq!(record.str("message"), Some("Payment details"));
    }

    #[test]
    fn test_shape_raw_format_is_identity() {
        let body = ResponseBody::Json(verify_body()).shape(ResponseFormat::Raw);
        assert_eq!(body, ResponseBody::Json(verify_body()));
    }

    #[test]
    fn test_shape_leaves_non_objects_alone() {
        let list = ResponseBody::Json(json!([1, 2])).shape(ResponseFormat::Object);
        assert_eq!(list, ResponseBody::Json(json!([1, 2])));

        let text = ResponseBody::Text("Bad Gateway".to_string()).shape(ResponseFormat::Object);
        assert_eq!(text.as_text(), Some("Bad Gateway"));
    }

    #[test]
    fn test_decode_falls_back_to_text() {
        assert_eq!(
            ResponseBody::decode("<html>oops</html>"),
            ResponseBody::Text("<html>oops</html>".to_string())
        );
        assert_eq!(
            ResponseBody::decode(r#"{"status":"failed"}"#),
            ResponseBody::Json(json!({"status": "failed"}))
        );
    }

    #[test]
    fn test_api_response_message() {
        let raw = ApiResponse::from_text(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Invalid currency","status":"failed"}"#,
            ResponseFormat::Raw,
        );
        assert!(!raw.is_success());
        assert_eq!(raw.message(), Some("Invalid currency"));

        let shaped = ApiResponse::from_text(
            StatusCode::OK,
            r#"{"message":"Banks retrieved","data":[]}"#,
            ResponseFormat::Object,
        );
        assert!(shaped.is_success());
        assert_eq!(shaped.message(), Some("Banks retrieved"));
        assert!(shaped.body().as_record().is_some());
    }
}
