//! Authentication and session management for the FIB API.
//!
//! FIB uses the OAuth2 client-credentials grant: the integrating
//! application exchanges its client id and secret for a short-lived access
//! token, which is sent as a bearer token with every payment call.
//!
//! ```no_run
//! use fib_rs::{Environment, FibClient};
//!
//! # async fn example() -> fib_rs::Result<()> {
//! let client = FibClient::new("client-id", "client-secret", Environment::Staging).await?;
//!
//! // Callers decide when to renew an expired token.
//! if client.refresh_token_if_needed().await? {
//!     println!("token renewed");
//! }
//! # Ok(())
//! # }
//! ```

mod session;

pub use session::{Credentials, Session, TokenPair, AUTHENTICATION_PATH, GRANT_TYPE};
