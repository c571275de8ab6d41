use async_trait::async_trait;
use serde::Serialize;

use super::{Notification, Notifier, NotifyError};
use crate::config::SendGridConfig;

/// SendGrid v3 mail send over HTTPS.
pub struct SendGridApi {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

#[derive(Debug, Serialize, PartialEq)]
struct MailSend<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Debug, Serialize, PartialEq)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize, PartialEq)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize, PartialEq)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

impl SendGridApi {
    pub fn new(config: &SendGridConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }
}

/// One personalization per recipient so nobody sees the other addresses.
fn payload(notification: &Notification) -> MailSend<'_> {
    MailSend {
        personalizations: notification
            .to
            .iter()
            .map(|email| Personalization {
                to: vec![Address { email }],
            })
            .collect(),
        from: Address {
            email: &notification.from,
        },
        subject: &notification.subject,
        content: vec![Content {
            kind: "text/plain",
            value: &notification.text,
        }],
    }
}

#[async_trait]
impl Notifier for SendGridApi {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let resp = self
            .client
            .post(format!("{}/v3/mail/send", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&payload(notification))
            .send()
            .await
            .map_err(|e| format!("SendGrid request failed: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(1024)
                .collect::<String>();
            return Err(NotifyError(format!("SendGrid returned {status}: {body}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn payload_has_one_personalization_per_recipient() {
        let notification = Notification {
            to: vec!["a@x.com".to_string(), "admin@x.com".to_string()],
            from: "noreply@x.com".to_string(),
            subject: "Subject".to_string(),
            text: "Body".to_string(),
        };

        let value = serde_json::to_value(payload(&notification)).unwrap();
        assert_eq!(
            value,
            json!({
                "personalizations": [
                    { "to": [{ "email": "a@x.com" }] },
                    { "to": [{ "email": "admin@x.com" }] }
                ],
                "from": { "email": "noreply@x.com" },
                "subject": "Subject",
                "content": [{ "type": "text/plain", "value": "Body" }]
            })
        );
    }
}
