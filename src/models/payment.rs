//! Payment request and response models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::{DecliningReason, PaymentId, PaymentStatus};

/// An amount of money in minor units together with its currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaryValue {
    /// Amount in minor units
    pub amount: i64,
    /// ISO 4217 currency code, e.g. `IQD`
    pub currency: String,
}

impl MonetaryValue {
    /// Create a monetary value.
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

/// Optional parameters for payment creation.
///
/// Each setter only touches its own field; anything not set is left to the
/// gateway's defaults.
///
/// # Example
///
/// ```
/// use fib_rs::models::PaymentOptions;
/// use chrono::Duration;
///
/// let options = PaymentOptions::new()
///     .with_description("Order #1042")
///     .with_expires_in(Duration::hours(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentOptions {
    /// Description shown to the payer
    pub description: Option<String>,
    /// How long the payment stays payable
    pub expires_in: Option<Duration>,
}

impl PaymentOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the description shown to the payer.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set how long the payment stays payable.
    pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = Some(expires_in);
        self
    }
}

/// A payment to be created, as sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    /// Amount to collect
    pub monetary_value: MonetaryValue,
    /// URL the gateway posts status changes to
    pub status_callback_url: String,
    /// Description shown to the payer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// How long the payment stays payable, sent as an ISO-8601 duration
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_iso8601"
    )]
    pub expires_in: Option<Duration>,
}

impl NewPayment {
    /// Create a payment with no optional fields set.
    pub fn new(monetary_value: MonetaryValue, status_callback_url: impl Into<String>) -> Self {
        Self {
            monetary_value,
            status_callback_url: status_callback_url.into(),
            description: None,
            expires_in: None,
        }
    }

    /// Apply optional parameters. Fields left unset in `options` keep their
    /// current value.
    pub fn with_options(mut self, options: PaymentOptions) -> Self {
        if let Some(description) = options.description {
            self.description = Some(description);
        }
        if let Some(expires_in) = options.expires_in {
            self.expires_in = Some(expires_in);
        }
        self
    }
}

fn serialize_iso8601<S: Serializer>(
    value: &Option<Duration>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(duration) => serializer.collect_str(duration),
        None => serializer.serialize_none(),
    }
}

/// Gateway response to a successful payment creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentResponse {
    /// Identifier used by every other payment call
    pub payment_id: PaymentId,
    /// Short code the payer can type into the FIB app
    pub readable_code: String,
    /// QR code image as a data URI
    pub qr_code: String,
    /// Time after which the payment can no longer be paid
    pub valid_until: DateTime<Utc>,
    /// Deep link into the personal app
    #[serde(default)]
    pub personal_app_link: Option<String>,
    /// Deep link into the business app
    #[serde(default)]
    pub business_app_link: Option<String>,
    /// Deep link into the corporate app
    #[serde(default)]
    pub corporate_app_link: Option<String>,
}

/// Payer details reported once a payment is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidBy {
    /// Payer name
    pub name: String,
    /// Payer IBAN
    pub iban: String,
}

/// Gateway view of a payment's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPaymentResponse {
    /// Payment identifier
    pub payment_id: PaymentId,
    /// Current status
    pub status: PaymentStatus,
    /// When the payment was paid
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    /// Amount of the payment
    #[serde(default)]
    pub amount: Option<MonetaryValue>,
    /// Why the payment was declined
    #[serde(default)]
    pub declining_reason: Option<DecliningReason>,
    /// When the payment was declined
    #[serde(default)]
    pub declined_at: Option<DateTime<Utc>>,
    /// Who paid
    #[serde(default)]
    pub paid_by: Option<PaidBy>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> NewPayment {
        NewPayment::new(MonetaryValue::new(1000, "IQD"), "http://localhost:1337/")
    }

    #[test]
    fn test_new_payment_defaults() {
        let json = serde_json::to_value(base()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "monetaryValue": {"amount": 1000, "currency": "IQD"},
                "statusCallbackUrl": "http://localhost:1337/"
            })
        );
    }

    #[test]
    fn test_with_description_only_sets_description() {
        let payment = base().with_options(PaymentOptions::new().with_description("desc"));
        assert_eq!(payment.description.as_deref(), Some("desc"));
        assert_eq!(payment.expires_in, None);
        assert_eq!(payment.monetary_value, MonetaryValue::new(1000, "IQD"));
        assert_eq!(payment.status_callback_url, "http://localhost:1337/");
    }

    #[test]
    fn test_with_expires_in_only_sets_expiry() {
        let payment =
            base().with_options(PaymentOptions::new().with_expires_in(Duration::hours(2)));
        assert_eq!(payment.expires_in, Some(Duration::hours(2)));
        assert_eq!(payment.description, None);

        let json = serde_json::to_value(&payment).unwrap();
        assert_eq!(json["expiresIn"], "PT7200S");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_sub_second_expiry_format() {
        let payment = base().with_options(
            PaymentOptions::new().with_expires_in(Duration::minutes(1) + Duration::milliseconds(250)),
        );
        let json = serde_json::to_value(&payment).unwrap();
        assert_eq!(json["expiresIn"], "PT60.25S");
    }

    #[test]
    fn test_empty_options_keep_existing_fields() {
        let payment = base()
            .with_options(PaymentOptions::new().with_description("first"))
            .with_options(PaymentOptions::new());
        assert_eq!(payment.description.as_deref(), Some("first"));
    }

    #[test]
    fn test_check_response_with_nulls() {
        let response: CheckPaymentResponse = serde_json::from_value(serde_json::json!({
            "paymentId": "5b3c7f0e-2a51-4d8e-9c36-7a1f0d6e4b21",
            "status": "UNPAID",
            "paidAt": null,
            "amount": {"amount": 1000, "currency": "IQD"},
            "decliningReason": null,
            "declinedAt": null,
            "paidBy": null
        }))
        .unwrap();
        assert_eq!(response.status, PaymentStatus::Unpaid);
        assert!(response.paid_at.is_none());
        assert!(response.declining_reason.is_none());
        assert!(response.declined_at.is_none());
        assert!(response.paid_by.is_none());
    }

    #[test]
    fn test_check_response_declined() {
        let response: CheckPaymentResponse = serde_json::from_value(serde_json::json!({
            "paymentId": "5b3c7f0e-2a51-4d8e-9c36-7a1f0d6e4b21",
            "status": "DECLINED",
            "decliningReason": "PAYMENT_CANCELLATION",
            "declinedAt": "2024-05-01T10:15:00Z"
        }))
        .unwrap();
        assert_eq!(response.status, PaymentStatus::Declined);
        assert_eq!(
            response.declining_reason,
            Some(DecliningReason::PaymentCancellation)
        );
        assert!(response.declined_at.is_some());
        assert!(response.amount.is_none());
    }
}
