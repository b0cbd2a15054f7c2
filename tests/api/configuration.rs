//! tests/api/configuration.rs

use folio::client::{HttpDispatcher, WhatsAppDispatcher};
use folio::configuration::{
    get_configuration, BrevoSettings, NotificationTransport, StorageBackend,
};
use folio::startup::build;
use secrecy::Secret;
use wiremock::{matchers::any, Mock, MockServer, ResponseTemplate};

#[test]
fn local_configuration_is_complete() {
    let config = get_configuration().expect("Failed to read configuration.");

    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert!(matches!(
        config.notification.transport,
        NotificationTransport::Smtp(_)
    ));
    assert!(HttpDispatcher::from_settings(&config.client).is_ok());
    assert!(WhatsAppDispatcher::new(&config.client.whatsapp_number).is_ok());
}

#[tokio::test]
async fn application_boots_from_configuration() {
    // Arrange
    let email_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&email_server)
        .await;

    let mut config = get_configuration().expect("Failed to read configuration.");
    config.application.port = 0;
    config.storage.backend = StorageBackend::Memory;
    config.notification.transport = NotificationTransport::Brevo(BrevoSettings {
        api_url: String::new(),
        api_key: Some(Secret::new("test-key".into())),
        timeout_milliseconds: 500,
    });
    config.set_email_url(email_server.uri());

    let app = build(config).await.expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", app.port());
    let _ = tokio::spawn(app.run());

    // Act
    let response = reqwest::Client::new()
        .post(&format!("{}/contact", address))
        .form(&[
            ("name", "le guin"),
            ("email", "ursula_le_guin@gmail.com"),
            ("subject", "Earthsea"),
            ("message", "Nice work"),
        ])
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(response.status().as_u16(), 200);
}
