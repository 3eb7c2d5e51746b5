//! Email service for notifying the wash partner about new orders.
//!
//! Supports two providers:
//! - `console`: Logs emails to console (development)
//! - `smtp`: Sends via an SMTP server using lettre

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::EmailConfig;
use domain::models::WashRequest;
use domain::services::{NotificationGateway, NotificationResult};

/// Subject line for a new order notification.
pub fn order_subject(license_plate: &str) -> String {
    format!("Ny bestilling for {}", license_plate)
}

/// Plain text body for a new order notification.
pub fn order_body(request: &WashRequest) -> String {
    format!(
        "Skilt Nummer: {}\n\
         Navn: {}\n\
         Telefon Nummer: {}\n\
         Email Adresse: {}\n\
         Utkjøring Dato og Tid: {}\n\
         Produkt: {}\n\
         Kommentarer: {}",
        request.license_plate,
        request.name,
        request.phone_number,
        request.email,
        request.exit_date,
        request.product,
        request.comments,
    )
}

/// Email-backed notification gateway.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    async fn send_console(&self, subject: &str, body: &str, recipient: &str) -> NotificationResult {
        info!(
            to = %recipient,
            subject = %subject,
            body = %body,
            "Console email provider, logging instead of sending"
        );
        NotificationResult::Sent
    }

    async fn send_smtp(&self, subject: &str, body: &str, recipient: &str) -> NotificationResult {
        let message = Message::builder()
            .from(match self.config.sender_email.parse() {
                Ok(mailbox) => mailbox,
                Err(e) => {
                    return NotificationResult::Failed(format!("Invalid sender address: {}", e))
                }
            })
            .to(match recipient.parse() {
                Ok(mailbox) => mailbox,
                Err(e) => {
                    return NotificationResult::Failed(format!("Invalid recipient address: {}", e))
                }
            })
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string());

        let message = match message {
            Ok(message) => message,
            Err(e) => return NotificationResult::Failed(format!("Failed to build email: {}", e)),
        };

        let transport = match AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host) {
            Ok(builder) => builder
                .port(self.config.smtp_port)
                .credentials(Credentials::new(
                    self.config.smtp_username.clone(),
                    self.config.smtp_password.clone(),
                ))
                .timeout(Some(Duration::from_secs(self.config.timeout_secs)))
                .build(),
            Err(e) => {
                return NotificationResult::Failed(format!("Invalid SMTP configuration: {}", e))
            }
        };

        match transport.send(message).await {
            Ok(_) => {
                info!(to = %recipient, subject = %subject, "Order notification sent");
                NotificationResult::Sent
            }
            Err(e) => {
                error!(to = %recipient, error = %e, "Failed to send order notification");
                NotificationResult::Failed(e.to_string())
            }
        }
    }
}

#[async_trait]
impl NotificationGateway for EmailService {
    async fn send(&self, subject: &str, body: &str, recipient: &str) -> NotificationResult {
        if !self.config.enabled {
            warn!(
                to = %recipient,
                subject = %subject,
                "Email sending disabled, skipping"
            );
            return NotificationResult::Skipped;
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(subject, body, recipient).await,
            "smtp" => self.send_smtp(subject, body, recipient).await,
            provider => {
                error!(provider = %provider, "Unknown email provider");
                NotificationResult::Failed(format!("Unknown email provider: {}", provider))
            }
        }
    }
}
