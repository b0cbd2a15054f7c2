//! src/notify/brevo/email.rs
use crate::notify::Correspondent;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Email<'a> {
    sender: &'a Correspondent,
    pub to: Vec<&'a Correspondent>,
    #[serde(rename = "replyTo", skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<&'a Correspondent>,
    pub subject: &'a str,
    #[serde(rename = "textContent")]
    pub text_content: &'a str,
}

pub struct EmailBuilder<'a> {
    sender: &'a Correspondent,
    to: Vec<&'a Correspondent>,
    reply_to: Option<&'a Correspondent>,
    subject: &'a str,
    text_content: &'a str,
}

impl<'a> EmailBuilder<'a> {
    pub fn new(sender: &'a Correspondent) -> Self {
        Self {
            sender,
            to: vec![],
            reply_to: None,
            subject: "",
            text_content: "",
        }
    }

    pub fn to(mut self, correspondent: &'a Correspondent) -> Self {
        self.to.push(correspondent);
        self
    }

    pub fn reply_to(mut self, correspondent: &'a Correspondent) -> Self {
        self.reply_to = Some(correspondent);
        self
    }

    pub fn subject(mut self, subject: &'a str) -> Self {
        self.subject = subject;
        self
    }

    pub fn text_content(mut self, text_content: &'a str) -> Self {
        self.text_content = text_content;
        self
    }

    pub fn build(self) -> Email<'a> {
        Email {
            sender: self.sender,
            to: self.to,
            reply_to: self.reply_to,
            subject: self.subject,
            text_content: self.text_content,
        }
    }
}

#[derive(Debug)]
pub struct EmailClient {
    pub http_client: Client,
    pub url: String,
    pub api_key: Secret<String>,
}

impl EmailClient {
    pub async fn send_email<T>(&self, email: &T) -> Result<reqwest::Response, reqwest::Error>
    where
        T: Serialize,
    {
        let res = self
            .http_client
            .post(&self.url)
            .header("api-key", self.api_key.expose_secret())
            .header("accept", "application/json")
            .json(&email)
            .send()
            .await?
            .error_for_status()?;

        Ok(res)
    }
}
