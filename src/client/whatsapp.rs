//! src/client/whatsapp.rs
use crate::client::{DispatchError, Dispatcher, Receipt};
use crate::domain::ContactSubmission;
use async_trait::async_trait;

const BASE_URL: &str = "https://wa.me";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("{0:?} is not a WhatsApp number, expected digits only")]
pub struct InvalidNumber(String);

/// Hands the submission to a WhatsApp chat through a pre-filled `wa.me` deep link.
///
/// Never contacts the intake endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppDispatcher {
    number: String,
}

impl WhatsAppDispatcher {
    /// Accepts an international number with or without the leading `+`.
    pub fn new(number: &str) -> Result<Self, InvalidNumber> {
        let digits = number.trim().trim_start_matches('+');
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidNumber(number.to_owned()));
        }

        Ok(Self {
            number: digits.to_owned(),
        })
    }

    pub fn link(&self, submission: &ContactSubmission) -> String {
        let text = format!(
            "*New Message From Portfolio*\n\n\
             *Name:* {}\n\
             *Email:* {}\n\
             *Subject:* {}\n\
             *Message:* {}",
            submission.name(),
            submission.email(),
            submission.subject(),
            submission.message()
        );

        format!("{}/{}?text={}", BASE_URL, self.number, urlencoding::encode(&text))
    }
}

#[async_trait]
impl Dispatcher for WhatsAppDispatcher {
    async fn submit(&self, submission: &ContactSubmission) -> Result<Receipt, DispatchError> {
        Ok(Receipt::Redirect(self.link(submission)))
    }
}
