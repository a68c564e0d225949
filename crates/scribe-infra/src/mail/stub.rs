use std::sync::Mutex;

use async_trait::async_trait;

use scribe_core::ports::{MailError, MailMessage, Mailer};

use crate::masking::mask_email;

/// Development transport: logs the message and keeps it for inspection.
#[derive(Debug, Default)]
pub struct LogMailer {
    from_address: String,
    outbox: Mutex<Vec<MailMessage>>,
}

impl LogMailer {
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
            outbox: Mutex::new(Vec::new()),
        }
    }

    /// Messages accepted so far, oldest first.
    pub fn sent(&self) -> Vec<MailMessage> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let recipients: Vec<String> = message.to.iter().map(|to| mask_email(to)).collect();
        tracing::info!(
            from = %self.from_address,
            to = ?recipients,
            subject = %message.subject,
            "Mail send stub"
        );

        self.outbox
            .lock()
            .map_err(|_| MailError::Transport("outbox lock poisoned".to_string()))?
            .push(message.clone());
        Ok(())
    }
}
