//! Data models for the FIB API.
//!
//! - [`primitives`] - `PaymentId` and `Environment`
//! - [`enums`] - Payment status and declining reasons
//! - [`payment`] - Payment requests and responses

pub mod primitives;
pub mod enums;
pub mod payment;

pub use primitives::*;
pub use enums::*;
pub use payment::*;
