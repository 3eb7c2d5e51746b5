//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod wash_request;

pub use wash_request::WashRequestEntity;
