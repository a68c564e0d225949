use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use scribe_core::ports::{MailError, MailMessage, Mailer};

/// JSON body posted to the mail API.
#[derive(Debug, Serialize)]
struct Payload<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
}

/// Sends mail through an HTTP mail API (Postmark/Mailgun style JSON endpoint).
pub struct WebhookMailer {
    url: String,
    token: Option<String>,
    from_address: String,
    client: reqwest::Client,
}

impl WebhookMailer {
    pub fn new(url: String, token: Option<String>, from_address: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            url,
            token,
            from_address,
            client,
        }
    }

    fn payload<'a>(&'a self, message: &'a MailMessage) -> Payload<'a> {
        Payload {
            from: &self.from_address,
            to: &message.to,
            subject: &message.subject,
            text: &message.body,
        }
    }
}

#[async_trait]
impl Mailer for WebhookMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let mut request = self.client.post(&self.url).json(&self.payload(message));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        tracing::debug!(status = status.as_u16(), "Mail accepted by webhook");
        Ok(())
    }
}
