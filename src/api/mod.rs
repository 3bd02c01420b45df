//! API service modules for FIB endpoints.

mod payments;

pub use payments::{PaymentsService, PAYMENTS_PATH};
