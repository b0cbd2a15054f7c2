//! src/client/dispatcher.rs
use crate::configuration::ClientSettings;
use crate::domain::ContactSubmission;
use crate::routes::error_chain_fmt;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// How a dispatcher handed the submission off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receipt {
    /// The endpoint accepted it.
    Delivered,
    /// The visitor has to finish sending at this URL.
    Redirect(String),
}

#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error("The endpoint answered with {0}")]
    Rejected(StatusCode),
    #[error("Failed to reach the endpoint")]
    Transport(#[source] reqwest::Error),
}

impl std::fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Sends one validated submission. Never retries.
    async fn submit(&self, submission: &ContactSubmission) -> Result<Receipt, DispatchError>;
}

/// Posts the four fields form-encoded to the intake endpoint.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    http_client: Client,
    endpoint: String,
}

impl HttpDispatcher {
    /// Without a timeout a hung request only ends when the transport gives up.
    pub fn new(endpoint: String, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            endpoint,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, reqwest::Error> {
        Self::new(settings.endpoint.clone(), settings.timeout())
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    #[tracing::instrument(name = "Posting a contact submission", skip(self, submission))]
    async fn submit(&self, submission: &ContactSubmission) -> Result<Receipt, DispatchError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .form(submission)
            .send()
            .await
            .map_err(DispatchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Rejected(status));
        }

        Ok(Receipt::Delivered)
    }
}
