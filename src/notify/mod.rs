//! src/notify/mod.rs
//!
//! Best-effort notification of the site operator once a submission is stored.
use crate::domain::ContactSubmission;
use crate::routes::error_chain_fmt;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod brevo;
pub use brevo::Brevo;

mod smtp;
pub use smtp::SmtpNotifier;

#[derive(thiserror::Error)]
pub enum NotificationError {
    #[error("Failed to build the notification")]
    Build(#[source] anyhow::Error),
    #[error("Failed to deliver the notification")]
    Delivery(#[source] anyhow::Error),
}

impl std::fmt::Debug for NotificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// A display name and address pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Correspondent {
    pub name: String,
    pub email: String,
}

/// What the operator receives for one accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
    /// The visitor, so that answering the notification reaches them.
    pub reply_to: Correspondent,
}

impl Notification {
    pub fn for_submission(submission: &ContactSubmission) -> Self {
        let body = format!(
            "You have received a new message from your portfolio contact form.\n\n\
             Name: {}\n\
             Email: {}\n\n\
             Subject: {}\n\n\
             Message:\n{}",
            submission.name(),
            submission.email(),
            submission.subject(),
            submission.message()
        );

        Self {
            subject: format!("New Contact Form Submission: {}", submission.subject()),
            body,
            reply_to: Correspondent {
                name: submission.name().to_owned(),
                email: submission.email().to_owned(),
            },
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// Used when no notification transport is configured.
#[derive(Debug, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        tracing::info!(
            subject = %notification.subject,
            "Notifications are disabled, skipping"
        );
        Ok(())
    }
}
