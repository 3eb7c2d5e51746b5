//! Business logic services.

pub mod notification;
pub mod updates;

pub use notification::{MockNotificationGateway, NotificationGateway, NotificationResult};
pub use updates::{CapturingPublisher, UpdateEvent, UpdatePublisher};
