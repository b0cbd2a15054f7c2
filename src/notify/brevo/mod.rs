//! src/notify/brevo/mod.rs
use crate::notify::{Correspondent, Notification, NotificationError, Notifier};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::Secret;
use std::time::Duration;

mod email;
pub use email::{Email, EmailBuilder, EmailClient};

mod secret;
pub use secret::BrevoSecret;

/// Delivers notifications through the Brevo transactional email HTTP API.
#[derive(Debug)]
pub struct Brevo {
    sender: Correspondent,
    operator: Correspondent,
    email_client: EmailClient,
}

impl Brevo {
    pub fn new(
        sender: Correspondent,
        operator: Correspondent,
        api_url: String,
        api_key: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;

        let email_client = EmailClient {
            http_client,
            url: api_url,
            api_key,
        };

        Ok(Self {
            sender,
            operator,
            email_client,
        })
    }

    pub fn email_builder(&self) -> EmailBuilder<'_> {
        EmailBuilder::new(&self.sender)
    }
}

#[async_trait]
impl Notifier for Brevo {
    #[tracing::instrument(name = "Sending a notification through Brevo", skip(self, notification))]
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        let email = self
            .email_builder()
            .to(&self.operator)
            .reply_to(&notification.reply_to)
            .subject(&notification.subject)
            .text_content(&notification.body)
            .build();

        self.email_client
            .send_email(&email)
            .await
            .map_err(|e| NotificationError::Delivery(e.into()))?;

        Ok(())
    }
}
