//! src/startup.rs
use crate::configuration::{
    DatabaseSettings, NotificationSettings, NotificationTransport, Settings, StorageBackend,
};
use crate::notify::{Brevo, DisabledNotifier, Notifier, SmtpNotifier};
use crate::routes::{contact, form_config, health_check};
use crate::storage::{ContactStore, InMemoryContactStore, PostgresContactStore};
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run(self) -> std::io::Result<()> {
        self.server.await
    }
}

pub async fn build(config: Settings) -> Result<Application, anyhow::Error> {
    let store = build_store(&config.database, config.storage.backend).await?;
    let notifier = build_notifier(&config.notification)?;

    let address = format!("{}:{}", config.application.host, config.application.port);
    let tcp_listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
    let port = tcp_listener.local_addr()?.port();

    let server = run(tcp_listener, store, notifier)?;

    Ok(Application { port, server })
}

pub fn get_connection_pool(config: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy_with(config.connect_options())
}

async fn build_store(
    config: &DatabaseSettings,
    backend: StorageBackend,
) -> Result<Arc<dyn ContactStore>, anyhow::Error> {
    let store: Arc<dyn ContactStore> = match backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, submissions are lost on restart");
            Arc::new(InMemoryContactStore::new())
        }
        StorageBackend::Postgres => {
            let pool = get_connection_pool(config);
            if config.migrate_on_startup {
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("Failed to migrate the database")?;
            }
            Arc::new(PostgresContactStore::new(pool))
        }
    };

    Ok(store)
}

fn build_notifier(config: &NotificationSettings) -> Result<Arc<dyn Notifier>, anyhow::Error> {
    let notifier: Arc<dyn Notifier> = match &config.transport {
        NotificationTransport::Disabled => Arc::new(DisabledNotifier),
        NotificationTransport::Brevo(brevo) => {
            let api_key = brevo
                .api_key
                .clone()
                .context("Missing Brevo API key")?;
            Arc::new(
                Brevo::new(
                    config.sender.clone(),
                    config.operator.clone(),
                    brevo.api_url.clone(),
                    api_key,
                    brevo.timeout(),
                )
                .context("Failed to build the Brevo HTTP client")?,
            )
        }
        NotificationTransport::Smtp(smtp) => {
            let credentials = smtp.username.clone().zip(smtp.password.clone());
            Arc::new(SmtpNotifier::new(
                &smtp.host,
                smtp.port,
                smtp.starttls,
                credentials,
                &config.sender,
                &config.operator,
            )?)
        }
    };

    Ok(notifier)
}

pub fn run(
    listener: TcpListener,
    store: Arc<dyn ContactStore>,
    notifier: Arc<dyn Notifier>,
) -> Result<Server, std::io::Error> {
    let store: web::Data<dyn ContactStore> = web::Data::from(store);
    let notifier: web::Data<dyn Notifier> = web::Data::from(notifier);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/contact", web::post().to(contact))
            .app_data(form_config())
            .app_data(store.clone())
            .app_data(notifier.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
