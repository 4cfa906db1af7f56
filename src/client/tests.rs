//! Tests for the async Chapa client

use super::Chapa;
use crate::request::ExtraHeaders;
use crate::response::ResponseBody;
use crate::transport::{PreparedRequest, Transport, TransportResponse};
use crate::types::{
    ChapaConfig, Customization, InitializePayment, InitializeSplitPayment, ResponseFormat,
    TransferToBank,
};
use crate::{ChapaError, Result};
use async_trait::async_trait;
use http::StatusCode;
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SECRET: &str = "CHASECK_TEST-0123456789";

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn config_for(server: &Server) -> ChapaConfig {
    ChapaConfig::new(SECRET).with_base_url(server.url())
}

fn test_payment() -> InitializePayment {
    InitializePayment::new("abebe@example.com", "1311.00", "Abebe", "Bikila", "tx-1311")
}

#[tokio::test]
async fn test_client_creation() {
    let client = Chapa::new(ChapaConfig::new(SECRET)).unwrap();
    assert_eq!(client.config().base_url, "https://api.chapa.co");
    assert!(!format!("{:?}", client).contains(SECRET));
}

#[test]
fn test_client_creation_with_invalid_config() {
    assert!(matches!(
        Chapa::new(ChapaConfig::new("")),
        Err(ChapaError::Config { .. })
    ));
    assert!(matches!(
        Chapa::new(ChapaConfig::new(SECRET).with_base_url("api.chapa.co")),
        Err(ChapaError::Config { .. })
    ));
}

#[test]
fn test_client_creation_with_invalid_response_format() {
    let result = "xml"
        .parse::<ResponseFormat>()
        .map(|format| ChapaConfig::new(SECRET).with_response_format(format))
        .and_then(Chapa::new);

    assert!(matches!(
        result,
        Err(ChapaError::InvalidResponseFormat { ref format }) if format == "xml"
    ));
}

#[tokio::test]
async fn test_initialize_success() {
    init_tracing();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/transaction/initialize")
        .match_header("authorization", format!("Bearer {}", SECRET).as_str())
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("email".into(), "abebe@example.com".into()),
            Matcher::UrlEncoded("amount".into(), "1311".into()),
            Matcher::UrlEncoded("currency".into(), "ETB".into()),
            Matcher::UrlEncoded("tx_ref".into(), "tx-1311".into()),
            Matcher::UrlEncoded("customization[title]".into(), "Example.com".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "message": "Hosted Link",
                "status": "success",
                "data": {"checkout_url": "https://checkout.chapa.co/checkout/payment/abc"}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = Chapa::new(config_for(&server)).unwrap();
    let payment = test_payment().with_customization(Customization::new().with_title("Example.com"));

    let response = client.initialize(&payment).await.unwrap();
    mock.assert_async().await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.body().as_json().unwrap();
    assert_eq!(
        body["data"]["checkout_url"],
        "https://checkout.chapa.co/checkout/payment/abc"
    );
}

#[tokio::test]
async fn test_initialize_invalid_amount_never_hits_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/transaction/initialize")
        .expect(0)
        .create_async()
        .await;

    let client = Chapa::new(config_for(&server)).unwrap();
    let payment = InitializePayment::new("abebe@example.com", "-10", "Abebe", "Bikila", "tx-1");

    let err = client.initialize(&payment).await.unwrap_err();
    assert!(matches!(err, ChapaError::InvalidAmount { .. }));
    assert!(err.is_validation());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_verify_object_format() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/transaction/verify/tx-1311")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "message": "Payment details",
                "status": "success",
                "data": {
                    "first_name": "Abebe",
                    "currency": "ETB",
                    "amount": "1,311.00",
                    "customization": {"title": "Example.com", "logo": null}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = Chapa::new(config_for(&server).with_response_format(ResponseFormat::Object))
        .unwrap();

    let response = client.verify("tx-1311").await.unwrap();
    let record = response.body().as_record().unwrap();
    let data = record.record("data").unwrap();
    assert_eq!(data.str("first_name"), Some("Abebe"));
    assert_eq!(
        data.record("customization").unwrap().str("title"),
        Some("Example.com")
    );
}

#[tokio::test]
async fn test_verify_rejects_empty_reference() {
    let client = Chapa::new(ChapaConfig::new(SECRET)).unwrap();
    let err = client.verify("").await.unwrap_err();
    assert!(matches!(err, ChapaError::MissingField { ref field } if field == "tx_ref"));
}

#[tokio::test]
async fn test_verify_encodes_reference() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/transaction/verify/order%2F42")
        .with_status(200)
        .with_body(r#"{"status":"success"}"#)
        .create_async()
        .await;

    let client = Chapa::new(config_for(&server)).unwrap();
    client.verify("order/42").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_is_returned() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/transfer/verify/tr-1")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Transfer not found","status":"failed","data":null}"#)
        .create_async()
        .await;

    let client = Chapa::new(config_for(&server)).unwrap();
    let response = client.verify_transfer("tr-1").await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(!response.is_success());
    assert_eq!(response.message(), Some("Transfer not found"));
}

#[tokio::test]
async fn test_non_json_body_falls_back_to_text() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/banks")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let client = Chapa::new(config_for(&server).with_response_format(ResponseFormat::Object))
        .unwrap();
    let response = client.get_banks().await.unwrap();

    assert_eq!(
        response.into_body(),
        ResponseBody::Text("Bad Gateway".to_string())
    );
}

#[tokio::test]
async fn test_extra_headers_cannot_override_authorization() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/banks")
        .match_header("authorization", format!("Bearer {}", SECRET).as_str())
        .match_header("x-request-id", "req-7")
        .with_status(200)
        .with_body(r#"{"data":[]}"#)
        .create_async()
        .await;

    let client = Chapa::new(config_for(&server)).unwrap();
    let mut headers = ExtraHeaders::new();
    headers.insert("X-Request-Id".to_string(), "req-7".to_string());
    headers.insert("Authorization".to_string(), "Bearer forged".to_string());

    client
        .execute_with_headers(&crate::types::ListBanks, &headers)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_extra_header_is_rejected() {
    let client = Chapa::new(ChapaConfig::new(SECRET)).unwrap();
    let mut headers = ExtraHeaders::new();
    headers.insert("bad header".to_string(), "x".to_string());

    let err = client
        .execute_with_headers(&crate::types::ListBanks, &headers)
        .await
        .unwrap_err();
    assert!(matches!(err, ChapaError::InvalidParameterType { ref name, .. } if name == "headers"));
}

#[tokio::test]
async fn test_transfer_to_bank() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/transfer")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("account_number".into(), "0123456789".into()),
            Matcher::UrlEncoded("amount".into(), "250".into()),
            Matcher::UrlEncoded("reference".into(), "tr-1".into()),
            Matcher::UrlEncoded("beneficiary_name".into(), "Abebe Bikila".into()),
            Matcher::UrlEncoded("currency".into(), "ETB".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"message":"Transfer Queued Successfully","status":"success","data":"tr-1"}"#)
        .create_async()
        .await;

    let client = Chapa::new(config_for(&server)).unwrap();
    let transfer = TransferToBank::new("Abebe Bikila", "0123456789", "250", "tr-1", "96e41186")
        .with_beneficiary_name("Abebe Bikila");

    let response = client.transfer_to_bank(&transfer).await.unwrap();
    mock.assert_async().await;
    assert_eq!(response.message(), Some("Transfer Queued Successfully"));
}

#[tokio::test]
async fn test_split_payment_extra_fields_override() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/transaction/initialize")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("subaccount_id".into(), "sub-1".into()),
            Matcher::UrlEncoded("currency".into(), "USD".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"status":"success"}"#)
        .create_async()
        .await;

    let client = Chapa::new(config_for(&server)).unwrap();
    let split = InitializeSplitPayment::new(
        "abebe@example.com",
        100,
        "ETB",
        "Abebe",
        "Bikila",
        "tx-split",
        "https://example.com/callback",
        "https://example.com/return",
        "sub-1",
    )
    .with_extra("currency", "USD");

    client.initialize_split_payment(&split).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_timeout_surfaces_http_error() {
    let config = ChapaConfig::new(SECRET)
        .with_base_url("http://10.255.255.1:9999") // Non-routable IP
        .with_timeout(Duration::from_millis(1));
    let client = Chapa::new(config).unwrap();

    let err = client.get_banks().await.unwrap_err();
    assert!(matches!(err, ChapaError::Http(_)), "got: {}", err);
}

/// Records what the client hands to its transport
#[derive(Clone, Default)]
struct RecordingTransport {
    sent: Arc<Mutex<Vec<PreparedRequest>>>,
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: PreparedRequest) -> Result<TransportResponse> {
        self.sent.lock().unwrap().push(request);
        Ok(TransportResponse {
            status: StatusCode::OK,
            body: r#"{"status":"success"}"#.to_string(),
        })
    }
}

#[tokio::test]
async fn test_custom_transport_receives_prepared_request() {
    let transport = RecordingTransport::default();
    let client = Chapa::with_transport(
        ChapaConfig::new(SECRET).with_api_version("v2"),
        transport.clone(),
    )
    .unwrap();

    client.initialize(&test_payment()).await.unwrap();

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let request = &sent[0];
    assert_eq!(request.method, http::Method::POST);
    assert_eq!(
        request.url.as_str(),
        "https://api.chapa.co/v2/transaction/initialize"
    );
    assert_eq!(
        request.headers.get(http::header::AUTHORIZATION).unwrap(),
        format!("Bearer {}", SECRET).as_str()
    );
    let payload = request.payload.as_ref().unwrap();
    assert_eq!(
        payload.keys().collect::<Vec<_>>(),
        vec!["first_name", "last_name", "tx_ref", "currency", "amount", "email"]
    );
}

#[test]
fn test_client_verifies_webhooks_with_its_secret() {
    let client = Chapa::new(ChapaConfig::new(SECRET)).unwrap();
    let body = json!({"event": "charge.success", "tx_ref": "tx-42"});
    let signature = crate::webhook::sign(SECRET, body.to_string().as_bytes()).unwrap();

    assert!(client.verify_webhook(&body, &signature));
    assert!(!client.verify_webhook(&json!({"event": "charge.success"}), &signature));
}
