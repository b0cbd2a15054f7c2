//! src/client/mod.rs
//!
//! The visitor-facing side of the contact form: field state, modal feedback
//! and the two ways a validated submission leaves the page.
mod controller;
pub use controller::{ContactFormController, SubmitOutcome};

mod dispatcher;
pub use dispatcher::{DispatchError, Dispatcher, HttpDispatcher, Receipt};

mod form;
pub use form::{ContactFormState, FieldControl};

mod page;
pub use page::{Page, RecordingPage};

mod presenter;
pub use presenter::{ClickTarget, FeedbackPresenter, ModalKind, MODAL_MESSAGE_ID};

mod whatsapp;
pub use whatsapp::{InvalidNumber, WhatsAppDispatcher};

pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
pub const SUBMIT_FAILURE: &str =
    "There was an error submitting your message. Please try again later.";
pub const REDIRECT_ACKNOWLEDGEMENT: &str =
    "Thank you! You'll be redirected to WhatsApp to send your message.";
