use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

use crate::domain::subscription::email::Email;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: Email,
    /// Recipients, delivered in this order.
    pub to: Vec<Email>,
    pub subject: String,
    pub text_body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("the email delivery service could not be reached")]
    Transport(#[from] reqwest::Error),
    #[error("the email delivery service rejected the message with status {0}")]
    Rejected(StatusCode),
}

/// Anything able to dispatch an [`EmailMessage`]. A single attempt is made per call.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), DeliveryError>;
}

/// Client for a Postmark-style HTTP email API.
#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    authorization_token: Secret<String>,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        authorization_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: Client::builder().timeout(timeout).build()?,
            base_url,
            authorization_token,
        })
    }
}

#[async_trait]
impl EmailSender for EmailClient {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        let url = format!("{}/email", self.base_url);
        let to = message
            .to
            .iter()
            .map(|recipient| recipient.as_ref())
            .collect::<Vec<&str>>()
            .join(", ");

        let request_body = SendEmailRequest {
            from: message.from.as_ref(),
            to: &to,
            subject: &message.subject,
            text_body: &message.text_body,
        };

        let response = self
            .http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DeliveryError::Rejected(response.status()));
        }

        Ok(())
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
}
