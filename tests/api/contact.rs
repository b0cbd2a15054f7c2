//! tests/api/contact.rs

use crate::helpers::{setup, setup_with_store, FailingStore, VALID_BODY};
use folio::routes::FORM_LIMIT;
use std::sync::Arc;
use wiremock::{
    matchers::{any, method},
    Mock, ResponseTemplate,
};

#[tokio::test]
async fn contact_returns_success_for_valid_form_data() {
    // Arrange
    let test = setup().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .mount(&test.email_server)
        .await;

    // Act
    let response = test.post_contact(VALID_BODY.into()).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "success": true }));
}

#[tokio::test]
async fn contact_persists_the_decoded_submission() {
    // Arrange
    let test = setup().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .mount(&test.email_server)
        .await;

    // Act
    let body = "name=%20le%20guin%20&email=ursula_le_guin%40gmail.com\
                &subject=A%20%26%20B&message=Line%20one%0ALine%20two";
    let _ = test.post_contact(body.into()).await;

    // Assert
    let records = test.store.records().await;
    assert_eq!(records.len(), 1);
    let saved = &records[0].submission;
    assert_eq!(saved.name(), "le guin");
    assert_eq!(saved.email(), "ursula_le_guin@gmail.com");
    assert_eq!(saved.subject(), "A & B");
    assert_eq!(saved.message(), "Line one\nLine two");
}

#[tokio::test]
async fn contact_notifies_the_operator() {
    // Arrange
    let test = setup().await;
    Mock::given(any())
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&test.email_server)
        .await;

    // Act
    let _ = test.post_contact(VALID_BODY.into()).await;

    // Assert
    let email = test.received_email().await;
    assert_eq!(email["to"][0]["email"], "owner@portfolio.dev");
    assert_eq!(email["replyTo"]["email"], "ursula_le_guin@gmail.com");
    assert_eq!(email["subject"], "New Contact Form Submission: Earthsea");
    let text = email["textContent"].as_str().unwrap();
    assert!(text.contains("Name: le guin"));
    assert!(text.contains("Message:\nNice work"));
}

#[tokio::test]
async fn contact_returns_a_400_listing_every_field_when_all_are_empty() {
    // Arrange
    let test = setup().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&test.email_server)
        .await;

    for body in ["", "name=&email=&subject=&message="] {
        // Act
        let response = test.post_contact(body.into()).await;

        // Assert
        assert_eq!(400, response.status().as_u16());
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "success": false,
                "errors": {
                    "name": "Name is required",
                    "email": "Email is required",
                    "subject": "Subject is required",
                    "message": "Message is required",
                }
            })
        );
    }
    assert!(test.store.records().await.is_empty());
}

#[tokio::test]
async fn contact_names_exactly_the_missing_field() {
    // Arrange
    let test = setup().await;
    let test_cases = vec![
        (
            "email=ursula_le_guin%40gmail.com&subject=Earthsea&message=Hi",
            "name",
        ),
        ("name=le%20guin&subject=Earthsea&message=Hi", "email"),
        (
            "name=le%20guin&email=ursula_le_guin%40gmail.com&subject=%20%20&message=Hi",
            "subject",
        ),
        (
            "name=le%20guin&email=ursula_le_guin%40gmail.com&subject=Earthsea&message=",
            "message",
        ),
    ];

    for (body, field) in test_cases {
        // Act
        let response = test.post_contact(body.into()).await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            // Additional customised error message on test failure
            "The API did not fail with 400 Bad Request when {} was missing.",
            field
        );
        let body: serde_json::Value = response.json().await.unwrap();
        let errors = body["errors"].as_object().unwrap();
        assert_eq!(errors.len(), 1, "Unexpected errors: {:?}", errors);
        assert!(errors.contains_key(field));
    }
    assert!(test.store.records().await.is_empty());
}

#[tokio::test]
async fn contact_returns_a_400_when_email_is_invalid() {
    // Arrange
    let test = setup().await;
    let test_cases = vec!["a%40b", "a.com", "a%40b%40c.com", "a%20b%40c.com"];

    for email in test_cases {
        // Act
        let body = format!(
            "name=le%20guin&email={}&subject=Earthsea&message=Hi",
            email
        );
        let response = test.post_contact(body).await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the email was {}.",
            email
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["errors"]["email"], "Please enter a valid email");
    }
}

#[tokio::test]
async fn contact_fails_if_the_store_rejects_the_write() {
    // Arrange
    let (address, email_server) = setup_with_store(Arc::new(FailingStore)).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&email_server)
        .await;

    // Act
    let response = reqwest::Client::new()
        .post(&format!("{}/contact", address))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(VALID_BODY)
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "success": false,
            "message": "Error saving message to database",
        })
    );
}

#[tokio::test]
async fn contact_flags_a_failed_notification_but_keeps_the_submission() {
    // Arrange
    let test = setup().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&test.email_server)
        .await;

    // Act
    let response = test.post_contact(VALID_BODY.into()).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(
        body["warning"],
        "Message saved but the operator could not be notified"
    );
    assert_eq!(test.store.records().await.len(), 1);
}

#[tokio::test]
async fn contact_accepts_a_long_message() {
    // Arrange
    let test = setup().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .mount(&test.email_server)
        .await;
    let message = "a".repeat(20_000);
    let body = format!(
        "name=le%20guin&email=ursula_le_guin%40gmail.com&subject=Earthsea&message={}",
        message
    );

    // Act
    let response = test.post_contact(body).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let records = test.store.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].submission.message(), message);
}

#[tokio::test]
async fn contact_rejects_an_oversized_body_with_json() {
    // Arrange
    let test = setup().await;
    let body = format!(
        "name=le%20guin&email=ursula_le_guin%40gmail.com&subject=Earthsea&message={}",
        "a".repeat(FORM_LIMIT + 1)
    );

    // Act
    let response = test.post_contact(body).await;

    // Assert
    assert_eq!(response.status().as_u16(), 413);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "success": false,
            "message": "Message is too long",
        })
    );
    assert!(test.store.records().await.is_empty());
}

#[tokio::test]
async fn contact_treats_a_bare_post_as_an_empty_form() {
    // Arrange
    let test = setup().await;

    // Act
    let response = test.post_contact_as(None, String::new()).await;

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "success": false,
            "errors": {
                "name": "Name is required",
                "email": "Email is required",
                "subject": "Subject is required",
                "message": "Message is required",
            }
        })
    );
}

#[tokio::test]
async fn contact_rejects_other_content_types_with_json() {
    // Arrange
    let test = setup().await;

    for content_type in ["multipart/form-data; boundary=x", "application/json"] {
        // Act
        let response = test
            .post_contact_as(Some(content_type), "{}".into())
            .await;

        // Assert
        assert_eq!(
            response.status().as_u16(),
            415,
            "The API did not fail with 415 for {}.",
            content_type
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            "Unsupported content type, send the form urlencoded"
        );
    }
    assert!(test.store.records().await.is_empty());
}
