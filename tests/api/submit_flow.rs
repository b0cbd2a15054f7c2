//! tests/api/submit_flow.rs
//!
//! The client controller posting to the real intake endpoint.

use crate::helpers::setup;
use folio::client::{
    ContactFormController, HttpDispatcher, ModalKind, RecordingPage, SubmitOutcome,
};
use folio::domain::Field;
use wiremock::{matchers::any, Mock, ResponseTemplate};

fn filled_controller() -> ContactFormController<RecordingPage> {
    let mut controller = ContactFormController::new(RecordingPage::default());
    let form = controller.form_mut();
    form.set_value(Field::Name, "Ursula Le Guin");
    form.set_value(Field::Email, "ursula@gmail.com");
    form.set_value(Field::Subject, "Rates & availability");
    form.set_value(Field::Message, "Are you free in May?");
    controller
}

#[tokio::test]
async fn a_valid_form_reaches_the_store_once() {
    // Arrange
    let test = setup().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&test.email_server)
        .await;
    let dispatcher = HttpDispatcher::new(format!("{}/contact", test.address), None).unwrap();
    let mut controller = filled_controller();

    // Act
    let outcome = controller.submit(&dispatcher).await;

    // Assert
    assert_eq!(outcome, SubmitOutcome::Sent);
    assert_eq!(controller.presenter().visible(), Some(ModalKind::Success));
    assert_eq!(controller.form().value(Field::Subject), "");
    let records = test.store.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].submission.subject(), "Rates & availability");
}

#[tokio::test]
async fn a_server_side_rejection_shows_the_error_modal() {
    // Arrange
    let test = setup().await;
    let dispatcher = HttpDispatcher::new(format!("{}/missing", test.address), None).unwrap();
    let mut controller = filled_controller();

    // Act
    let outcome = controller.submit(&dispatcher).await;

    // Assert
    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(controller.presenter().visible(), Some(ModalKind::Error));
    assert_eq!(controller.form().value(Field::Name), "Ursula Le Guin");
    assert!(test.store.records().await.is_empty());
}
