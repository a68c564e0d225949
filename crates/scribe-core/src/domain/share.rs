//! Composition of the "share a blog by email" message.

use super::Blog;
use crate::ports::MailMessage;

/// Build the share email for `blog`, addressed to `recipient`.
///
/// The recipient is used verbatim; no address validation happens here.
pub fn compose_share(blog: &Blog, recipient: impl Into<String>) -> MailMessage {
    MailMessage {
        to: vec![recipient.into()],
        subject: format!("Blog Share: {}", blog.title),
        body: format!(
            "Check out this blog post titled '{}': {}",
            blog.title, blog.content
        ),
    }
}
