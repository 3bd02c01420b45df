//! # fib-rs
//!
//! An async Rust client for the FIB (First Iraqi Bank) online payments API.
//!
//! ## Features
//!
//! - **Authentication**: OAuth2 client-credentials grant with explicit or
//!   automatic token renewal
//! - **Payments**: create, check, cancel and refund
//! - **Typed errors**: gateway login errors and payment error bodies are
//!   decoded into structured types
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fib_rs::{Environment, FibClient};
//! use fib_rs::models::{PaymentOptions, PaymentStatus};
//!
//! #[tokio::main]
//! async fn main() -> fib_rs::Result<()> {
//!     let client = FibClient::new("client-id", "client-secret", Environment::Staging).await?;
//!
//!     let created = client
//!         .payments()
//!         .create(
//!             1000,
//!             "IQD",
//!             "https://shop.example/fib/callback",
//!             PaymentOptions::new().with_description("Order #1042"),
//!         )
//!         .await?;
//!     println!("QR code: {}", created.qr_code);
//!
//!     let status = client.payments().check(&created.payment_id).await?;
//!     if status.status == PaymentStatus::Paid {
//!         println!("paid at {:?}", status.paid_at);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Token lifetime
//!
//! Payment calls use whatever access token the client holds. Call
//! [`FibClient::refresh_token_if_needed`] before a call, or enable
//! [`ClientConfig::with_auto_refresh`] to have every call do it.
//!
//! ## Demos
//!
//! A runnable walkthrough lives in `demos/create_payment.rs` and is
//! registered as a cargo example. It reads `FIB_CLIENT_ID`,
//! `FIB_CLIENT_SECRET` and optionally `FIB_ENVIRONMENT`:
//!
//! ```text
//! cargo run --example create_payment
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use error::{Error, ErrorBody, ErrorDetail, LoginError, Result};
pub use models::{Environment, PaymentId};
pub use client::{ClientConfig, FibClient, MAX_REFRESH_BUFFER_SECS};
pub use auth::{Credentials, Session, TokenPair};

/// Prelude module for convenient imports.
///
/// ```rust
/// use fib_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, ErrorBody, LoginError, Result};
    pub use crate::models::{
        CheckPaymentResponse, CreatePaymentResponse, DecliningReason, Environment,
        MonetaryValue, NewPayment, PaidBy, PaymentId, PaymentOptions, PaymentStatus,
    };
    pub use crate::client::{ClientConfig, FibClient};
    pub use crate::auth::{Credentials, Session, TokenPair};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_urls() {
        assert_eq!(
            Environment::Production.api_base_url(),
            "https://fib.prod.fib.iq/"
        );
        assert_eq!(
            Environment::Staging.api_base_url(),
            "https://fib.stage.fib.iq/"
        );
    }

    #[test]
    fn test_grant_type() {
        assert_eq!(auth::GRANT_TYPE, "client_credentials");
    }
}
