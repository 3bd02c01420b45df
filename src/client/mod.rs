//! HTTP client and service layer for the FIB API.
//!
//! This module provides the main entry point [`FibClient`].
//!
//! # Example
//!
//! ```no_run
//! use fib_rs::{ClientConfig, Credentials, Environment, FibClient};
//!
//! # async fn example() -> fib_rs::Result<()> {
//! let client = FibClient::with_config(
//!     Credentials::from_env()?,
//!     Environment::Staging,
//!     ClientConfig::default().with_auto_refresh(true),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;

pub use config::{ClientConfig, MAX_REFRESH_BUFFER_SECS};
pub use http::FibClient;
pub(crate) use http::ClientInner;
