//! Webhook signature verification
//!
//! Chapa signs each webhook with HMAC-SHA256 keyed by the merchant secret and
//! sends the lowercase hex digest in a request header. Verification recomputes
//! the digest and compares it in constant time. A mismatch is an ordinary
//! outcome and yields `false`; nothing here returns an error for it.
//!
//! # Canonical form
//!
//! When only a parsed body is available it has to be serialized exactly as the
//! sender did before hashing. Key order follows the body as parsed.
//! [`JsonLayout::Compact`] writes `{"event":"charge.success"}`;
//! [`JsonLayout::Spaced`] writes `{"event": "charge.success"}` with anything
//! outside printable ASCII escaped as `\uXXXX`. Prefer [`verify_webhook_bytes`]
//! on the raw request body whenever it is still at hand: it needs no canonical
//! form at all.
//!
//! # Examples
//!
//! ```
//! use chapa::webhook::{self, WebhookVerifier};
//! use serde_json::json;
//!
//! # fn example() -> chapa::Result<()> {
//! let body = json!({"event": "charge.success", "tx_ref": "tx-42"});
//! let signature = webhook::sign("webhook-secret", body.to_string().as_bytes())?;
//!
//! assert!(webhook::verify_webhook("webhook-secret", &body, &signature));
//! assert!(!webhook::verify_webhook("other-secret", &body, &signature));
//!
//! let verifier = WebhookVerifier::new("webhook-secret");
//! assert!(verifier.verify_bytes(body.to_string().as_bytes(), &signature));
//! # Ok(())
//! # }
//! ```

pub mod events;

#[cfg(test)]
mod tests;

use crate::types::ChapaConfig;
use crate::{ChapaError, Result};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;
use sha2::Sha256;
use std::io;
use subtle::ConstantTimeEq;

pub use events::{describe, WebhookEvent, WEBHOOK_EVENTS};

type HmacSha256 = Hmac<Sha256>;

/// JSON layout the sender hashed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonLayout {
    /// No whitespace: `{"a":1,"b":[1,2]}`
    #[default]
    Compact,
    /// `", "` and `": "` separators with ASCII-only output: `{"a": 1, "b": [1, 2]}`
    ///
    /// Characters outside printable ASCII (DEL included) are escaped as
    /// `\uXXXX`, and floats are written as `1.5e-07` or `1e+16`.
    Spaced,
}

/// Compute the lowercase hex HMAC-SHA256 of `message`
pub fn sign(secret: &str, message: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| ChapaError::config("Invalid webhook secret"))?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Serialize a body in the given layout
pub fn canonical_json(body: &Value, layout: JsonLayout) -> Result<String> {
    match layout {
        JsonLayout::Compact => Ok(serde_json::to_string(body)?),
        JsonLayout::Spaced => {
            let mut out = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
            body.serialize(&mut serializer)?;
            String::from_utf8(out)
                .map_err(|e| ChapaError::config(format!("Non UTF-8 canonical JSON: {}", e)))
        }
    }
}

/// Verify a signature over the compact serialization of `body`
pub fn verify_webhook(secret: &str, body: &Value, signature: &str) -> bool {
    verify_with_layout(secret, body, signature, JsonLayout::Compact)
}

/// Verify a signature over `body` serialized in `layout`
pub fn verify_with_layout(secret: &str, body: &Value, signature: &str, layout: JsonLayout) -> bool {
    match canonical_json(body, layout) {
        Ok(message) => verify_webhook_bytes(secret, message.as_bytes(), signature),
        Err(e) => {
            tracing::debug!("Could not serialize webhook body: {}", e);
            false
        }
    }
}

/// Verify a signature over the raw request body
pub fn verify_webhook_bytes(secret: &str, raw_body: &[u8], signature: &str) -> bool {
    let expected = match sign(secret, raw_body) {
        Ok(expected) => expected,
        Err(_) => return false,
    };

    let matches: bool = expected.as_bytes().ct_eq(signature.as_bytes()).into();
    if !matches {
        tracing::debug!("Webhook signature mismatch");
    }
    matches
}

/// Verifier bound to one secret and layout
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: SecretString,
    layout: JsonLayout,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"<redacted>")
            .field("layout", &self.layout)
            .finish()
    }
}

impl WebhookVerifier {
    /// Create a verifier for a webhook secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::from(secret.into()),
            layout: JsonLayout::Compact,
        }
    }

    /// Use the client's secret key
    pub fn from_config(config: &ChapaConfig) -> Self {
        Self {
            secret: config.secret_key.clone(),
            layout: JsonLayout::Compact,
        }
    }

    /// Set the JSON layout used for parsed bodies
    pub fn with_layout(mut self, layout: JsonLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Get the JSON layout
    pub fn layout(&self) -> JsonLayout {
        self.layout
    }

    /// Verify a parsed body
    pub fn verify(&self, body: &Value, signature: &str) -> bool {
        verify_with_layout(self.secret.expose_secret(), body, signature, self.layout)
    }

    /// Verify the raw request body
    pub fn verify_bytes(&self, raw_body: &[u8], signature: &str) -> bool {
        verify_webhook_bytes(self.secret.expose_secret(), raw_body, signature)
    }

    /// Sign a body the way the gateway would
    pub fn sign(&self, body: &Value) -> Result<String> {
        let message = canonical_json(body, self.layout)?;
        sign(self.secret.expose_secret(), message.as_bytes())
    }
}

/// Formatter matching Python's default `json.dumps` output: spaced
/// separators, `\uXXXX` escapes outside printable ASCII, and Python float text
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(float_repr(value).as_bytes())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if fragment.bytes().all(is_printable_ascii) {
            return writer.write_all(fragment.as_bytes());
        }

        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() && is_printable_ascii(ch as u8) {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

fn is_printable_ascii(byte: u8) -> bool {
    (b' '..=b'~').contains(&byte)
}

/// Shortest round-trip float text: fixed notation while the decimal point
/// sits within `(-4, 16]`, otherwise `d.ddde±XX` with a two-digit exponent
fn float_repr(value: f64) -> String {
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exponent) => exponent,
        Err(_) => return scientific,
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(mantissa) => ("-", mantissa),
        None => ("", mantissa),
    };

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let len = digits.len() as i32;
    let point = exponent + 1;

    let body = if -4 < point && point <= 16 {
        if point <= 0 {
            format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
        } else if point >= len {
            format!("{}{}.0", digits, "0".repeat((point - len) as usize))
        } else {
            let (whole, fraction) = digits.split_at(point as usize);
            format!("{}.{}", whole, fraction)
        }
    } else {
        let (first, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{}", rest)
        };
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}{}e{}{:02}",
            first,
            fraction,
            exponent_sign,
            exponent.unsigned_abs()
        )
    };

    format!("{}{}", sign, body)
}
