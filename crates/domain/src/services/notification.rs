//! Notification gateway for telling the wash partner about new orders.
//!
//! Delivery is best-effort: a failed notification never rolls back the
//! already-committed request, it only changes the `email_sent` marker and the
//! acknowledgment shown to the submitter.

/// Result of a notification send attempt.
#[derive(Debug, Clone)]
pub enum NotificationResult {
    /// The message was handed off to the delivery channel.
    Sent,
    /// The delivery channel rejected or never received the message.
    Failed(String),
    /// The gateway is disabled; nothing was sent.
    Skipped,
}

impl NotificationResult {
    /// Whether the message was actually handed off.
    pub fn delivered(&self) -> bool {
        matches!(self, NotificationResult::Sent)
    }
}

/// Gateway trait for sending a formatted message to the service provider.
#[async_trait::async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Send a plain-text message. Blocking from the caller's perspective,
    /// but implementations must bound their own I/O with a timeout.
    async fn send(&self, subject: &str, body: &str, recipient: &str) -> NotificationResult;
}

/// Mock gateway for development and testing.
///
/// Logs the message but does not send anything.
#[derive(Debug, Clone, Default)]
pub struct MockNotificationGateway {
    /// Whether to simulate delivery failures.
    pub simulate_failure: bool,
}

impl MockNotificationGateway {
    /// Create a mock gateway that reports success.
    pub fn new() -> Self {
        Self {
            simulate_failure: false,
        }
    }

    /// Create a mock gateway that simulates failures.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
        }
    }
}

#[async_trait::async_trait]
impl NotificationGateway for MockNotificationGateway {
    async fn send(&self, subject: &str, _body: &str, recipient: &str) -> NotificationResult {
        if self.simulate_failure {
            tracing::warn!(
                recipient = %recipient,
                subject = %subject,
                "Mock notification gateway simulating failure"
            );
            return NotificationResult::Failed("Simulated failure".to_string());
        }

        tracing::info!(
            recipient = %recipient,
            subject = %subject,
            "Mock: would send notification"
        );

        NotificationResult::Sent
    }
}
