//! src/notify/smtp.rs
use crate::notify::{Correspondent, Notification, NotificationError, Notifier};
use anyhow::Context;
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, Secret};

/// Delivers notifications to the operator's mailbox over SMTP.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    operator: Mailbox,
}

impl SmtpNotifier {
    /// With `starttls` unset the connection is plain text, which is only fit for a local relay.
    pub fn new(
        host: &str,
        port: u16,
        starttls: bool,
        credentials: Option<(String, Secret<String>)>,
        sender: &Correspondent,
        operator: &Correspondent,
    ) -> Result<Self, anyhow::Error> {
        let mut builder = if starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .with_context(|| format!("Failed to set up a STARTTLS relay to {}", host))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        };
        builder = builder.port(port);

        if let Some((username, password)) = credentials {
            builder = builder.credentials(Credentials::new(
                username,
                password.expose_secret().to_owned(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            sender: mailbox(sender).context("Invalid sender address")?,
            operator: mailbox(operator).context("Invalid operator address")?,
        })
    }

    fn message(&self, notification: &Notification) -> Result<Message, NotificationError> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .to(self.operator.clone())
            .subject(notification.subject.as_str())
            .header(ContentType::TEXT_PLAIN);

        // The visitor's address only passed the simple two-part check, which is looser than RFC 5322.
        match mailbox(&notification.reply_to) {
            Ok(reply_to) => builder = builder.reply_to(reply_to),
            Err(e) => tracing::warn!(
                error.cause_chain = ?e,
                "Sending notification without a reply-to address"
            ),
        }

        builder
            .body(notification.body.clone())
            .map_err(|e| NotificationError::Build(e.into()))
    }
}

fn mailbox(correspondent: &Correspondent) -> Result<Mailbox, lettre::address::AddressError> {
    Ok(Mailbox::new(
        Some(correspondent.name.clone()),
        correspondent.email.parse()?,
    ))
}

#[async_trait]
impl Notifier for SmtpNotifier {
    #[tracing::instrument(name = "Sending a notification over SMTP", skip(self, notification))]
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        let message = self.message(notification)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::Delivery(e.into()))?;

        Ok(())
    }
}
