//! Payments service for creating and managing FIB payments.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{
    CheckPaymentResponse, CreatePaymentResponse, MonetaryValue, NewPayment, PaymentId,
    PaymentOptions,
};
use crate::Result;

/// Base path of every payment endpoint.
pub const PAYMENTS_PATH: &str = "protected/v1/payments";

/// Service for payment operations.
///
/// # Example
///
/// ```no_run
/// use chrono::Duration;
/// use fib_rs::models::PaymentOptions;
///
/// # async fn example(client: fib_rs::FibClient) -> fib_rs::Result<()> {
/// let options = PaymentOptions::new()
///     .with_description("Order #1042")
///     .with_expires_in(Duration::hours(1));
///
/// let created = client
///     .payments()
///     .create(25_000, "IQD", "https://shop.example/fib/callback", options)
///     .await?;
/// println!("Pay with code {}", created.readable_code);
///
/// // Changed our mind
/// client.payments().cancel(&created.payment_id).await?;
/// # Ok(())
/// # }
/// ```
pub struct PaymentsService {
    inner: Arc<ClientInner>,
}

impl PaymentsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create a payment.
    ///
    /// # Arguments
    ///
    /// * `amount` - Amount in minor units
    /// * `currency` - Currency code, e.g. `IQD`
    /// * `callback_url` - URL the gateway posts status changes to
    /// * `options` - Optional description and expiry
    ///
    /// # Errors
    ///
    /// A rejected request (for example an invalid callback URL) returns
    /// [`Error::Api`](crate::Error::Api) with code `INVALID_REQUEST`.
    pub async fn create(
        &self,
        amount: i64,
        currency: impl Into<String>,
        callback_url: impl Into<String>,
        options: PaymentOptions,
    ) -> Result<CreatePaymentResponse> {
        let payment = NewPayment::new(MonetaryValue::new(amount, currency), callback_url)
            .with_options(options);
        self.create_payment(&payment).await
    }

    /// Create a payment from a fully built request.
    pub async fn create_payment(&self, payment: &NewPayment) -> Result<CreatePaymentResponse> {
        self.inner.post(PAYMENTS_PATH, payment).await
    }

    /// Get the current status of a payment.
    pub async fn check(&self, payment_id: &PaymentId) -> Result<CheckPaymentResponse> {
        self.inner
            .get(&format!("{}/{}/status", PAYMENTS_PATH, payment_id))
            .await
    }

    /// Cancel an unpaid payment.
    ///
    /// Returns `true` once the gateway accepted the cancellation.
    pub async fn cancel(&self, payment_id: &PaymentId) -> Result<bool> {
        self.inner
            .post_empty(&format!("{}/{}/cancel", PAYMENTS_PATH, payment_id))
            .await
    }

    /// Request a refund of a paid payment.
    ///
    /// Returns `true` once the gateway accepted the refund request.
    pub async fn refund(&self, payment_id: &PaymentId) -> Result<bool> {
        self.inner
            .post_empty(&format!("{}/{}/refund", PAYMENTS_PATH, payment_id))
            .await
    }
}
