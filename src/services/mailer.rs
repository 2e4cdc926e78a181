/*
 * Responsibility
 * - Outbound-notification seam; SMTP/relay delivery itself lives outside
 *   this service and is reached only through this trait
 */
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("mail rejected: {0}")]
    Rejected(String),
    #[error("mail transport error: {0}")]
    Transport(String),
}

/// Narrow dispatch interface. Returns the provider message id on success.
/// Callers treat delivery as best-effort: a failed notification is logged,
/// never bubbled into the request outcome.
#[async_trait]
pub trait Mailer: Send + Sync {
    fn backend_name(&self) -> &'static str;
    async fn send(&self, mail: OutboundEmail) -> Result<String, MailerError>;
}

/// Development dispatcher: records the mail in the log and fabricates a
/// message id.
pub struct TracingMailer {
    sender: String,
}

impl TracingMailer {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}

#[async_trait]
impl Mailer for TracingMailer {
    fn backend_name(&self) -> &'static str {
        "tracing"
    }

    async fn send(&self, mail: OutboundEmail) -> Result<String, MailerError> {
        let message_id = Uuid::new_v4().to_string();
        tracing::info!(
            from = %self.sender,
            to = %mail.to,
            subject = %mail.subject,
            %message_id,
            "outbound mail (log-only dispatcher)"
        );
        Ok(message_id)
    }
}
