use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{Notification, Notifier, NotifyError};
use crate::config::SendGridConfig;

const RELAY_HOST: &str = "smtp.sendgrid.net";
const RELAY_PORT: u16 = 587;
const RELAY_USER: &str = "apikey";

/// SendGrid SMTP relay, authenticated with the API key.
pub struct SendGridSmtp {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SendGridSmtp {
    pub fn new(config: &SendGridConfig) -> Result<Self, String> {
        let creds = Credentials::new(RELAY_USER.to_string(), config.api_key.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(RELAY_HOST)
            .map_err(|e| format!("SendGrid SMTP error: {e}"))?
            .port(RELAY_PORT)
            .credentials(creds)
            .build();

        Ok(Self { transport })
    }
}

fn build_message(from: &str, to: &str, subject: &str, text: &str) -> Result<Message, String> {
    Message::builder()
        .from(from.parse().map_err(|e| format!("Invalid from address: {e}"))?)
        .to(to.parse().map_err(|e| format!("Invalid to address: {e}"))?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(text.to_string())
        .map_err(|e| format!("Failed to build email: {e}"))
}

#[async_trait]
impl Notifier for SendGridSmtp {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        // Build every message first so a bad address sends nothing.
        let messages = notification
            .to
            .iter()
            .map(|to| {
                build_message(
                    &notification.from,
                    to,
                    &notification.subject,
                    &notification.text,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        for message in messages {
            self.transport
                .send(message)
                .await
                .map_err(|e| format!("Failed to send email: {e}"))?;
        }

        Ok(())
    }
}
