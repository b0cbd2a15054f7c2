//! src/routes/contact.rs
use crate::domain::{ContactForm, ValidationErrors};
use crate::notify::{Notification, Notifier};
use crate::routes::error_chain_fmt;
use crate::storage::{ContactStore, StoreError};
use actix_web::error::UrlencodedError;
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use uuid::Uuid;

pub const PERSISTENCE_FAILURE: &str = "Error saving message to database";
pub const NOTIFICATION_FAILURE: &str = "Message saved but the operator could not be notified";

/// Largest urlencoded body `/contact` will read.
pub const FORM_LIMIT: usize = 64 * 1024;

/// Extractor settings for `/contact`: a body limit well above any real message,
/// with rejections answered in the same JSON shape as the handler's own failures.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(FORM_LIMIT)
        .error_handler(reject_form)
}

fn reject_form(error: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    // A bare POST carries nothing to read, treat it as an empty form.
    if matches!(error, UrlencodedError::ContentType)
        && !req.headers().contains_key(header::CONTENT_TYPE)
    {
        return ContactError::ValidationError(ContactForm::default().check()).into();
    }

    ContactError::UnreadableBody(error).into()
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("{0}")]
    ValidationError(ValidationErrors),
    #[error("Failed to read the submitted form")]
    UnreadableBody(#[source] UrlencodedError),
    #[error("Failed to store the contact submission")]
    PersistenceError(#[source] StoreError),
}

impl ContactError {
    fn message(&self) -> Option<&'static str> {
        match self {
            ContactError::ValidationError(_) => None,
            ContactError::UnreadableBody(UrlencodedError::Overflow { .. }) => {
                Some("Message is too long")
            }
            ContactError::UnreadableBody(UrlencodedError::ContentType) => {
                Some("Unsupported content type, send the form urlencoded")
            }
            ContactError::UnreadableBody(_) => Some("Malformed form data"),
            ContactError::PersistenceError(_) => Some(PERSISTENCE_FAILURE),
        }
    }
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Serialize)]
struct Rejected<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a ValidationErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::UnreadableBody(UrlencodedError::Overflow { .. }) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ContactError::UnreadableBody(UrlencodedError::ContentType) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ContactError::UnreadableBody(_) => StatusCode::BAD_REQUEST,
            ContactError::PersistenceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let errors = match self {
            ContactError::ValidationError(errors) => Some(errors),
            _ => None,
        };

        HttpResponse::build(self.status_code()).json(Rejected {
            success: false,
            errors,
            message: self.message(),
        })
    }
}

#[derive(Serialize)]
struct Accepted {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<&'static str>,
}

#[tracing::instrument(
    name = "Receiving a contact submission",
    skip(form, store, notifier),
    fields(
        request_id = %Uuid::new_v4(),
        contact_email = %form.email,
        contact_name = %form.name
    )
)]
pub async fn contact(
    form: web::Form<ContactForm>,
    store: web::Data<dyn ContactStore>,
    notifier: web::Data<dyn Notifier>,
) -> Result<HttpResponse, ContactError> {
    let submission = form
        .into_inner()
        .validate()
        .map_err(ContactError::ValidationError)?;

    let id = store
        .insert(&submission)
        .await
        .map_err(ContactError::PersistenceError)?;
    tracing::info!(contact_id = %id, "Contact submission stored");

    let notification = Notification::for_submission(&submission);
    let warning = match notifier.notify(&notification).await {
        Ok(()) => None,
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                contact_id = %id,
                "Failed to notify the operator about a stored submission"
            );
            Some(NOTIFICATION_FAILURE)
        }
    };

    Ok(HttpResponse::Ok().json(Accepted {
        success: true,
        warning,
    }))
}
