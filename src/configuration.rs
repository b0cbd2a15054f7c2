//! src/configuration.rs
use crate::notify::brevo::BrevoSecret;
use crate::notify::Correspondent;
use config::{Config, ConfigError, File};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::time::Duration;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub notification: NotificationSettings,
    pub client: ClientSettings,
}

impl Settings {
    /// Points the Brevo transport at another API, e.g. a mock server in tests.
    pub fn set_email_url(&mut self, email_url: String) {
        if let NotificationTransport::Brevo(brevo) = &mut self.notification.transport {
            brevo.api_url = email_url;
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: Secret<String>,
    pub port: u16,
    pub host: String,
    pub database_name: String,
    #[serde(default)]
    pub require_ssl: bool,
    #[serde(default)]
    pub migrate_on_startup: bool,
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            // Try an encrypted connection, fallback to unencrypted if it fails
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .ssl_mode(ssl_mode)
            .database(&self.database_name)
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

#[derive(Deserialize, Clone, Debug)]
pub struct NotificationSettings {
    /// Where notifications are delivered.
    pub operator: Correspondent,
    pub sender: Correspondent,
    pub transport: NotificationTransport,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NotificationTransport {
    Disabled,
    Brevo(BrevoSettings),
    Smtp(SmtpSettings),
}

#[derive(Deserialize, Clone, Debug)]
pub struct BrevoSettings {
    pub api_url: String,
    /// Falls back to `BREVO_API_KEY` when absent.
    pub api_key: Option<Secret<String>>,
    pub timeout_milliseconds: u64,
}

impl BrevoSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub starttls: bool,
    pub username: Option<String>,
    /// Falls back to `SMTP_PASSWORD` when absent.
    pub password: Option<Secret<String>>,
}

#[derive(Deserialize)]
struct SmtpSecret {
    password: Secret<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ClientSettings {
    /// Intake endpoint the contact form posts to.
    pub endpoint: String,
    /// Digits only, international format without `+`.
    pub whatsapp_number: String,
    pub timeout_milliseconds: Option<u64>,
}

impl ClientSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_milliseconds.map(Duration::from_millis)
    }
}

#[derive(PartialEq)]
pub enum Environment {
    Local,
    Production,
}
impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_ref() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            _ => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                s
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    // A missing .env file is fine, variables may come from the real environment.
    let _ = dotenvy::dotenv();

    // Detect the running environment.
    // Default to `local` if not specified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base")).required(true))
        .add_source(File::from(configuration_directory.join(environment.as_str())).required(true))
        // E.g. `APP_APPLICATION__PORT=5001` sets `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut settings: Settings = settings.try_deserialize()?;
    fill_notification_secrets(&mut settings.notification.transport)?;

    Ok(settings)
}

fn fill_notification_secrets(transport: &mut NotificationTransport) -> Result<(), ConfigError> {
    match transport {
        NotificationTransport::Brevo(brevo) if brevo.api_key.is_none() => {
            let secret = BrevoSecret::from_env().map_err(|e| {
                ConfigError::Message(format!("Failed to read Brevo settings from environment: {}", e))
            })?;
            brevo.api_key = Some(secret.api_key);
        }
        NotificationTransport::Smtp(smtp) if smtp.username.is_some() && smtp.password.is_none() => {
            let secret = envy::prefixed("SMTP_")
                .from_env::<SmtpSecret>()
                .map_err(|e| {
                    ConfigError::Message(format!("Failed to read SMTP settings from environment: {}", e))
                })?;
            smtp.password = Some(secret.password);
        }
        _ => {}
    }

    Ok(())
}
