//! src/notify/brevo/secret.rs
use secrecy::Secret;
use serde::Deserialize;

/// Brevo credentials read from `BREVO_`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct BrevoSecret {
    pub api_key: Secret<String>,
}

impl BrevoSecret {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("BREVO_").from_env::<BrevoSecret>()
    }
}
