//! Tests for webhook verification

use super::{
    canonical_json, describe, sign, verify_webhook, verify_webhook_bytes, verify_with_layout,
    JsonLayout, WebhookEvent, WebhookVerifier, WEBHOOK_EVENTS,
};
use crate::types::ChapaConfig;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

fn reference_digest(secret: &str, message: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[test]
fn test_sign_matches_rfc4231_vector() {
    let digest = sign("Jefe", b"what do ya want for nothing?").unwrap();
    assert_eq!(
        digest,
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );
}

#[test]
fn test_verify_compact_body() {
    let body = json!({"event": "charge.success"});
    // HMAC-SHA256 of {"event":"charge.success"} keyed with "s"
    let signature = "77b7dab0e44c839c4cb1b35b78f5cf4bcc343c0f6628023f947634a6c625a65c";

    assert!(verify_webhook("s", &body, signature));
    assert!(!verify_webhook("t", &body, signature));
}

#[test]
fn test_any_altered_character_fails() {
    let body = json!({"event": "charge.success", "tx_ref": "tx-42", "amount": "100"});
    let signature = sign("s", canonical_json(&body, JsonLayout::Compact).unwrap().as_bytes()).unwrap();
    assert!(verify_webhook("s", &body, &signature));

    for index in 0..signature.len() {
        let mut altered: Vec<char> = signature.chars().collect();
        altered[index] = if altered[index] == '0' { '1' } else { '0' };
        let altered: String = altered.into_iter().collect();
        assert!(!verify_webhook("s", &body, &altered), "index {}", index);
    }

    assert!(!verify_webhook("s", &body, &signature[..63]));
    assert!(!verify_webhook("s", &body, ""));
    if signature.chars().any(|c| c.is_ascii_alphabetic()) {
        assert!(!verify_webhook("s", &body, &signature.to_uppercase()));
    }
}

#[test]
fn test_body_changes_fail() {
    let body = json!({"event": "charge.success", "amount": "100"});
    let signature = sign("s", body.to_string().as_bytes()).unwrap();

    let tampered = json!({"event": "charge.success", "amount": "1000"});
    assert!(!verify_webhook("s", &tampered, &signature));

    let reordered = json!({"amount": "100", "event": "charge.success"});
    assert!(!verify_webhook("s", &reordered, &signature));
}

#[test]
fn test_spaced_layout() {
    let body = json!({"event": "charge.success", "name": "Abébé 😀", "items": [1, 2], "meta": {}});
    let spaced = canonical_json(&body, JsonLayout::Spaced).unwrap();
    assert_eq!(
        spaced,
        r#"{"event": "charge.success", "name": "Ab\u00e9b\u00e9 \ud83d\ude00", "items": [1, 2], "meta": {}}"#
    );

    let signature = reference_digest("s", &spaced);
    assert!(verify_with_layout("s", &body, &signature, JsonLayout::Spaced));
    assert!(!verify_webhook("s", &body, &signature));
}

#[test]
fn test_spaced_layout_escapes_del_and_formats_floats() {
    let body = json!({"a": "x\u{7f}y", "c": 1.5e-7});
    assert_eq!(
        canonical_json(&body, JsonLayout::Spaced).unwrap(),
        r#"{"a": "x\u007fy", "c": 1.5e-07}"#
    );

    let floats = json!([1e16, 0.00001, 0.0001, 100.0, 1311.5, -2.5, 0.0]);
    assert_eq!(
        canonical_json(&floats, JsonLayout::Spaced).unwrap(),
        "[1e+16, 1e-05, 0.0001, 100.0, 1311.5, -2.5, 0.0]"
    );

    let control = json!({"note": "tab\there\nnew"});
    assert_eq!(
        canonical_json(&control, JsonLayout::Spaced).unwrap(),
        r#"{"note": "tab\there\nnew"}"#
    );
}

#[test]
fn test_verify_raw_bytes() {
    let raw = br#"{ "event" : "charge.success" }"#;
    let signature = reference_digest("s", r#"{ "event" : "charge.success" }"#);

    assert!(verify_webhook_bytes("s", raw, &signature));
    assert!(!verify_webhook_bytes("s", b"{}", &signature));
}

#[test]
fn test_verifier_uses_config_secret() {
    let config = ChapaConfig::new("CHASECK_TEST-webhook");
    let verifier = WebhookVerifier::from_config(&config);
    let body = json!({"event": "transfer.success", "reference": "tr-1"});

    let signature = verifier.sign(&body).unwrap();
    assert_eq!(signature, reference_digest("CHASECK_TEST-webhook", &body.to_string()));
    assert!(verifier.verify(&body, &signature));
    assert!(!format!("{:?}", verifier).contains("CHASECK"));

    let spaced = verifier.clone().with_layout(JsonLayout::Spaced);
    assert_eq!(spaced.layout(), JsonLayout::Spaced);
    assert!(!spaced.verify(&body, &signature));
    assert!(spaced.verify(&body, &spaced.sign(&body).unwrap()));
}

#[test]
fn test_event_catalogue() {
    assert_eq!(WEBHOOK_EVENTS.len(), 19);
    for (index, event) in WebhookEvent::ALL.iter().enumerate() {
        assert_eq!(*event as usize, index);
        assert_eq!(event.as_str(), WEBHOOK_EVENTS[index].0);
        assert_eq!(event.as_str().parse::<WebhookEvent>().unwrap(), *event);
    }

    assert_eq!(WebhookEvent::ChargeSuccess.to_string(), "charge.success");
    assert_eq!(
        describe("transfer.reversed"),
        Some("A transfer has been reversed.")
    );
    assert_eq!(
        WebhookEvent::InvoiceCreate.description(),
        "An invoice has been created for a customer's subscription. Usually sent 3 days before the subscription is due."
    );
    assert_eq!(
        WebhookEvent::InvoiceUpdate.description(),
        "Customer's invoice has been updated. This invoice should be examined carefully, and take necessary action."
    );
    assert!(describe("charge.refund").is_none());
    assert!("charge.refund".parse::<WebhookEvent>().is_err());
}

#[test]
fn test_event_from_body() {
    assert_eq!(
        WebhookEvent::from_body(&json!({"event": "invoice.payment_failed"})),
        Some(WebhookEvent::InvoicePaymentFailed)
    );
    assert_eq!(WebhookEvent::from_body(&json!({"event": 3})), None);
    assert_eq!(WebhookEvent::from_body(&json!({})), None);
}
