//! Client-side field validation

use crate::types::Amount;
use crate::{ChapaError, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// `local@domain.tld`, anchored at the start only
const EMAIL_PATTERN: &str = r"^[^@]+@[^@]+\.[^@]+";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<()> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err(ChapaError::invalid_email(email))
    }
}

/// Validate an amount and return its payload value
///
/// Integers pass when they are `>= 0`. Anything else must be digits with at
/// most one decimal point and strictly greater than zero. It is sent in
/// normalized decimal form, without leading or trailing zeros and with any
/// number of digits.
pub fn validate_amount(amount: &Amount) -> Result<Value> {
    match amount {
        Amount::Integer(value) => {
            if *value < 0 {
                return Err(ChapaError::invalid_amount(value.to_string()));
            }
            Ok(Value::from(*value))
        }
        Amount::Decimal(raw) => {
            let (whole, fraction) = raw.split_once('.').unwrap_or((raw.as_str(), ""));
            let well_formed = !(whole.is_empty() && fraction.is_empty())
                && whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit());
            if !well_formed {
                return Err(ChapaError::invalid_amount(raw.as_str()));
            }

            let whole = whole.trim_start_matches('0');
            let fraction = fraction.trim_end_matches('0');
            if whole.is_empty() && fraction.is_empty() {
                return Err(ChapaError::invalid_amount(raw.as_str()));
            }

            let whole = if whole.is_empty() { "0" } else { whole };
            let canonical = if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, fraction)
            };
            Ok(Value::String(canonical))
        }
    }
}

/// Reject empty required strings
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ChapaError::missing_field(field));
    }
    Ok(())
}
