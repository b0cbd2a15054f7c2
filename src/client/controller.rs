//! src/client/controller.rs
use crate::client::{
    ClickTarget, ContactFormState, Dispatcher, FeedbackPresenter, ModalKind, Page, Receipt,
    REDIRECT_ACKNOWLEDGEMENT, SUBMIT_FAILURE, SUCCESS_MESSAGE,
};
use crate::domain::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was sent.
    Invalid(ValidationErrors),
    Sent,
    Redirected(String),
    /// Sending failed, the field values were kept for another attempt.
    Failed,
}

/// Runs submit cycles for one contact form on one page.
///
/// Both submit paths borrow the controller mutably until the response is in,
/// so a second submit cannot start while a request is in flight.
#[derive(Debug)]
pub struct ContactFormController<P> {
    form: ContactFormState,
    presenter: FeedbackPresenter,
    page: P,
}

impl<P: Page> ContactFormController<P> {
    pub fn new(page: P) -> Self {
        Self {
            form: ContactFormState::new(),
            presenter: FeedbackPresenter::new(),
            page,
        }
    }

    pub fn form(&self) -> &ContactFormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactFormState {
        &mut self.form
    }

    pub fn presenter(&self) -> &FeedbackPresenter {
        &self.presenter
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn dismiss(&mut self, kind: ModalKind) {
        self.presenter.dismiss(&mut self.page, kind);
    }

    pub fn click_modal(&mut self, kind: ModalKind, target: ClickTarget) {
        self.presenter.click(&mut self.page, kind, target);
    }

    /// Modal path: an aggregated error modal on invalid input, then a success
    /// or failure modal once the dispatcher is done.
    #[tracing::instrument(name = "Submitting the contact form", skip(self, dispatcher))]
    pub async fn submit<D>(&mut self, dispatcher: &D) -> SubmitOutcome
    where
        D: Dispatcher + ?Sized,
    {
        let submission = match self.form.validate() {
            Ok(submission) => submission,
            Err(errors) => {
                self.presenter
                    .show_modal(&mut self.page, ModalKind::Error, errors.summary());
                if let Some(first) = errors.first() {
                    self.page.scroll_into_view(first.error_slot_id());
                }
                return SubmitOutcome::Invalid(errors);
            }
        };

        match dispatcher.submit(&submission).await {
            Ok(receipt) => {
                let outcome = self.hand_off(receipt);
                self.presenter
                    .show_modal(&mut self.page, ModalKind::Success, SUCCESS_MESSAGE);
                outcome
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    "Failed to submit the contact form"
                );
                self.presenter
                    .show_modal(&mut self.page, ModalKind::Error, SUBMIT_FAILURE);
                SubmitOutcome::Failed
            }
        }
    }

    /// Inline path: per-field errors only, no modal, and a one-shot
    /// acknowledgment once the submission is handed off.
    #[tracing::instrument(name = "Submitting the contact form inline", skip(self, dispatcher))]
    pub async fn submit_inline<D>(&mut self, dispatcher: &D) -> SubmitOutcome
    where
        D: Dispatcher + ?Sized,
    {
        let submission = match self.form.validate() {
            Ok(submission) => submission,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        match dispatcher.submit(&submission).await {
            Ok(receipt) => {
                let acknowledgement = match receipt {
                    Receipt::Delivered => SUCCESS_MESSAGE,
                    Receipt::Redirect(_) => REDIRECT_ACKNOWLEDGEMENT,
                };
                let outcome = self.hand_off(receipt);
                self.page.alert(acknowledgement);
                outcome
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    "Failed to submit the contact form"
                );
                self.page.alert(SUBMIT_FAILURE);
                SubmitOutcome::Failed
            }
        }
    }

    fn hand_off(&mut self, receipt: Receipt) -> SubmitOutcome {
        let outcome = match receipt {
            Receipt::Delivered => SubmitOutcome::Sent,
            Receipt::Redirect(url) => {
                self.page.open_in_new_context(&url);
                SubmitOutcome::Redirected(url)
            }
        };
        self.form.reset();
        outcome
    }
}
