//! Repository implementations for database operations.

pub mod wash_request;

pub use wash_request::{OverviewFilter, RequestView, WashRequestInput, WashRequestRepository};
