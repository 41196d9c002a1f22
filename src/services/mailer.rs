//! SMTP delivery for shared summaries
//!
//! Sends one HTML message per recipient through an authenticated relay.
//! The message embeds the meeting's stored instructions and the
//! caller-supplied summary text.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::info;

use crate::config::EmailConfig;

const SHARE_SUBJECT: &str = "Meeting Summary Shared";

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid address '{0}': {1}")]
    InvalidAddress(String, String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Transport(String),
}

/// Authenticated SMTP client
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        let from = config
            .user
            .parse::<Mailbox>()
            .map_err(|e| MailError::InvalidAddress(config.user.clone(), e.to_string()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.relay)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .credentials(Credentials::new(config.user.clone(), config.pass.clone()))
            .build();

        Ok(Self { transport, from })
    }

    /// Send one formatted summary email to a single recipient
    pub async fn send_summary(
        &self,
        recipient: &str,
        prompt: &str,
        summary: &str,
    ) -> Result<(), MailError> {
        let to = recipient
            .parse::<Mailbox>()
            .map_err(|e| MailError::InvalidAddress(recipient.to_string(), e.to_string()))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(SHARE_SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(render_summary_html(prompt, summary))
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        info!(recipient = %recipient, "Summary email sent");

        Ok(())
    }
}

/// HTML body embedding the meeting's instructions and the summary text
fn render_summary_html(prompt: &str, summary: &str) -> String {
    format!(
        "<h2>Meeting Summary</h2>\n\
         <p><strong>Original Prompt:</strong> {}</p>\n\
         <hr>\n\
         <div style=\"white-space: pre-wrap;\">{}</div>\n\
         <hr>\n\
         <p><em>This summary was generated using AI technology.</em></p>",
        prompt, summary
    )
}

/// Email capability, resolved once at startup
#[derive(Clone)]
pub enum Mailer {
    Configured(SmtpMailer),
    Unconfigured,
}

impl Mailer {
    /// Resolve the capability from configuration
    pub fn from_config(email: Option<&EmailConfig>) -> Result<Self, MailError> {
        match email {
            Some(config) => {
                let mailer = SmtpMailer::new(config)?;
                info!(relay = %config.relay, "Mailer configured");
                Ok(Mailer::Configured(mailer))
            }
            None => {
                tracing::warn!(
                    "Email credentials not configured. Summary sharing will not work. \
                     Set RECAP_EMAIL_USER and RECAP_EMAIL_PASS to enable it."
                );
                Ok(Mailer::Unconfigured)
            }
        }
    }
}
