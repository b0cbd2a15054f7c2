//! src/client/presenter.rs
use crate::client::Page;

/// Element identifier of the error modal's message area.
pub const MODAL_MESSAGE_ID: &str = "modal-message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Success,
    Error,
}

impl ModalKind {
    pub fn element_id(&self) -> &'static str {
        match self {
            ModalKind::Success => "successModal",
            ModalKind::Error => "errorModal",
        }
    }
}

/// Where a click on an open modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed overlay outside the dialog bounds.
    Backdrop,
    Content,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Modal {
    visible: bool,
    message: String,
}

/// The success and error overlays.
///
/// Showing one modal never hides the other; callers present at most one per submit cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackPresenter {
    success: Modal,
    error: Modal,
}

impl FeedbackPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn modal(&self, kind: ModalKind) -> &Modal {
        match kind {
            ModalKind::Success => &self.success,
            ModalKind::Error => &self.error,
        }
    }

    fn modal_mut(&mut self, kind: ModalKind) -> &mut Modal {
        match kind {
            ModalKind::Success => &mut self.success,
            ModalKind::Error => &mut self.error,
        }
    }

    pub fn show_modal(&mut self, page: &mut impl Page, kind: ModalKind, message: impl Into<String>) {
        let modal = self.modal_mut(kind);
        modal.message = message.into();
        modal.visible = true;

        // The success modal carries fixed markup text.
        if kind == ModalKind::Error {
            page.set_text(MODAL_MESSAGE_ID, &self.error.message);
        }
        page.set_visible(kind.element_id(), true);
        page.set_background_scroll(false);
    }

    /// Close control or action button.
    pub fn dismiss(&mut self, page: &mut impl Page, kind: ModalKind) {
        let modal = self.modal_mut(kind);
        if !modal.visible {
            return;
        }
        modal.visible = false;
        page.set_visible(kind.element_id(), false);

        if self.visible().is_none() {
            page.set_background_scroll(true);
        }
    }

    pub fn click(&mut self, page: &mut impl Page, kind: ModalKind, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.dismiss(page, kind);
        }
    }

    pub fn is_visible(&self, kind: ModalKind) -> bool {
        self.modal(kind).visible
    }

    pub fn message(&self, kind: ModalKind) -> &str {
        &self.modal(kind).message
    }

    /// The open modal, if any. Error wins if a caller managed to open both.
    pub fn visible(&self) -> Option<ModalKind> {
        [ModalKind::Error, ModalKind::Success]
            .into_iter()
            .find(|kind| self.is_visible(*kind))
    }
}
