//! Application services.

pub mod broadcast;
pub mod email;

pub use broadcast::BroadcastPublisher;
pub use email::EmailService;
