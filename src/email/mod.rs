pub mod sendgrid;
pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{MailTransport, SendGridConfig};

pub const SUBJECT: &str = "Internship Form Submission";

/// One outgoing message. Every address in `to` receives its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub to: Vec<String>,
    pub from: String,
    pub subject: String,
    pub text: String,
}

#[derive(Debug)]
pub struct NotifyError(pub String);

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NotifyError {
    fn from(s: String) -> Self {
        NotifyError(s)
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Build the configured SendGrid transport.
pub fn from_config(config: &SendGridConfig) -> Result<Arc<dyn Notifier>, String> {
    match config.transport {
        MailTransport::Api => Ok(Arc::new(sendgrid::SendGridApi::new(config))),
        MailTransport::Smtp => Ok(Arc::new(smtp::SendGridSmtp::new(config)?)),
    }
}
