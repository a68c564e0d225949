//! Mail transports.
//!
//! `LogMailer` is the development default and only records the message.
//! `WebhookMailer` posts the message to an HTTP mail API.

mod stub;
mod webhook;

use std::sync::Arc;
use std::time::Duration;

use scribe_core::ports::Mailer;

pub use stub::LogMailer;
pub use webhook::WebhookMailer;

/// Where outgoing mail goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailTransport {
    Log,
    Webhook { url: String, token: Option<String> },
}

/// Mail configuration.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub from_address: String,
    pub transport: MailTransport,
    pub timeout: Duration,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_address: "webmaster@localhost".to_string(),
            transport: MailTransport::Log,
            timeout: Duration::from_secs(10),
        }
    }
}

impl MailConfig {
    /// Load from `MAIL_FROM`, `MAIL_WEBHOOK_URL`, `MAIL_WEBHOOK_TOKEN` and `MAIL_TIMEOUT_SECONDS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let transport = match std::env::var("MAIL_WEBHOOK_URL") {
            Ok(url) if !url.trim().is_empty() => MailTransport::Webhook {
                url,
                token: std::env::var("MAIL_WEBHOOK_TOKEN").ok(),
            },
            _ => MailTransport::Log,
        };

        Self {
            from_address: std::env::var("MAIL_FROM").unwrap_or(defaults.from_address),
            transport,
            timeout: std::env::var("MAIL_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Build the configured transport.
pub fn build_mailer(config: &MailConfig) -> Arc<dyn Mailer> {
    match &config.transport {
        MailTransport::Log => {
            tracing::info!("Mail transport: log only");
            Arc::new(LogMailer::new(config.from_address.clone()))
        }
        MailTransport::Webhook { url, token } => {
            tracing::info!(url = %url, "Mail transport: webhook");
            Arc::new(WebhookMailer::new(
                url.clone(),
                token.clone(),
                config.from_address.clone(),
                config.timeout,
            ))
        }
    }
}
