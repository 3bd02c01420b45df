//! Enumeration types reported by the FIB API.
//!
//! The gateway is authoritative for both enums; the client only reports
//! what it received.

use serde::{Deserialize, Serialize};

/// Status of a payment as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// The payer completed the payment
    Paid,
    /// Awaiting the payer
    Unpaid,
    /// The payment will not complete, see [`DecliningReason`]
    Declined,
    /// A refund was requested and is in progress
    RefundRequested,
    /// The payment was refunded
    Refunded,
    /// Status not known to this client
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// Returns `true` if the payment can no longer change on the payer side.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Paid | PaymentStatus::Declined | PaymentStatus::Refunded
        )
    }
}

/// Why a payment was declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecliningReason {
    /// Gateway-side failure
    ServerFailure,
    /// The payment was not paid before its expiry
    PaymentExpiration,
    /// The payment was cancelled
    PaymentCancellation,
    /// Reason not known to this client
    #[serde(other)]
    Unknown,
}
