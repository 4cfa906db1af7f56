//! Catalogue of webhook events sent by Chapa

use crate::ChapaError;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Event names and their descriptions, in catalogue order
pub static WEBHOOK_EVENTS: [(&str, &str); 19] = [
    ("charge.dispute.create", "Dispute against company created."),
    (
        "charge.dispute.remind",
        "Reminder of an unresolved dispute against company.",
    ),
    ("charge.dispute.resolve", "Dispute has been resolved."),
    ("charge.success", "Charged successfully."),
    (
        "customeridentification.failed",
        "Customer identification failed.",
    ),
    (
        "customeridentification.success",
        "Customer identified successfully.",
    ),
    (
        "invoice.create",
        "An invoice has been created for a customer's subscription. Usually sent 3 days before the subscription is due.",
    ),
    ("invoice.payment_failed", "Payment for invoice has failed."),
    (
        "invoice.update",
        "Customer's invoice has been updated. This invoice should be examined carefully, and take necessary action.",
    ),
    (
        "paymentrequest.pending",
        "Payment request has been sent to customer and payment is pending.",
    ),
    ("paymentrequest.success", "Customer's payment is successful."),
    ("subscription.create", "Subscription has been created."),
    ("subscription.disable", "Account's subscription has been disabled."),
    ("subscription.enable", "Account's subscription has been enabled."),
    ("transfer.failed", "Transfer of money has failed."),
    ("transfer.success", "A transfer has been completed."),
    ("transfer.reversed", "A transfer has been reversed."),
    (
        "issuingauthentication.request",
        "An authorization has been requested.",
    ),
    (
        "issuingauthentication.created",
        "An authorization has been created.",
    ),
];

/// Webhook event kinds
///
/// Variants are declared in [`WEBHOOK_EVENTS`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookEvent {
    ChargeDisputeCreate,
    ChargeDisputeRemind,
    ChargeDisputeResolve,
    ChargeSuccess,
    CustomerIdentificationFailed,
    CustomerIdentificationSuccess,
    InvoiceCreate,
    InvoicePaymentFailed,
    InvoiceUpdate,
    PaymentRequestPending,
    PaymentRequestSuccess,
    SubscriptionCreate,
    SubscriptionDisable,
    SubscriptionEnable,
    TransferFailed,
    TransferSuccess,
    TransferReversed,
    IssuingAuthenticationRequest,
    IssuingAuthenticationCreated,
}

impl WebhookEvent {
    /// Every event, in catalogue order
    pub const ALL: [WebhookEvent; 19] = [
        WebhookEvent::ChargeDisputeCreate,
        WebhookEvent::ChargeDisputeRemind,
        WebhookEvent::ChargeDisputeResolve,
        WebhookEvent::ChargeSuccess,
        WebhookEvent::CustomerIdentificationFailed,
        WebhookEvent::CustomerIdentificationSuccess,
        WebhookEvent::InvoiceCreate,
        WebhookEvent::InvoicePaymentFailed,
        WebhookEvent::InvoiceUpdate,
        WebhookEvent::PaymentRequestPending,
        WebhookEvent::PaymentRequestSuccess,
        WebhookEvent::SubscriptionCreate,
        WebhookEvent::SubscriptionDisable,
        WebhookEvent::SubscriptionEnable,
        WebhookEvent::TransferFailed,
        WebhookEvent::TransferSuccess,
        WebhookEvent::TransferReversed,
        WebhookEvent::IssuingAuthenticationRequest,
        WebhookEvent::IssuingAuthenticationCreated,
    ];

    /// Wire name, e.g. `charge.success`
    pub fn as_str(&self) -> &'static str {
        WEBHOOK_EVENTS[*self as usize].0
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        WEBHOOK_EVENTS[*self as usize].1
    }

    /// Read the `event` field of a webhook body
    pub fn from_body(body: &Value) -> Option<Self> {
        body.get("event")
            .and_then(Value::as_str)
            .and_then(|name| name.parse().ok())
    }
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookEvent {
    type Err = ChapaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WebhookEvent::ALL
            .iter()
            .copied()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| {
                ChapaError::invalid_parameter_type("event", format!("unknown webhook event '{}'", s))
            })
    }
}

/// Look up the description of an event by wire name
pub fn describe(event: &str) -> Option<&'static str> {
    WEBHOOK_EVENTS
        .iter()
        .find(|(name, _)| *name == event)
        .map(|(_, description)| *description)
}
