//! Outgoing mail port.

use async_trait::async_trait;

/// A plain-text message. The sender address belongs to the transport configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Mail transport - hands a message off for delivery.
///
/// Returning `Ok` means the transport accepted the message, not that it was delivered.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail transport unavailable: {0}")]
    Transport(String),

    #[error("Mail rejected with status {status}: {reason}")]
    Rejected { status: u16, reason: String },
}
