//! src/client/page.rs
use std::collections::{BTreeMap, BTreeSet};

/// The parts of the hosting page the contact form drives besides its own fields.
pub trait Page {
    /// Locks (`false`) or restores (`true`) scrolling of the page behind a modal.
    fn set_background_scroll(&mut self, enabled: bool);

    /// Shows or hides the element.
    fn set_visible(&mut self, element_id: &str, visible: bool);

    /// Replaces the element's text content.
    fn set_text(&mut self, element_id: &str, text: &str);

    /// Smoothly brings the element into view, centered.
    fn scroll_into_view(&mut self, element_id: &str);

    /// Opens the URL in a new browsing context.
    fn open_in_new_context(&mut self, url: &str);

    /// One-shot blocking acknowledgment.
    fn alert(&mut self, message: &str);
}

/// A page without a browser behind it. Remembers every effect requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingPage {
    pub background_scroll: bool,
    pub shown: BTreeSet<String>,
    pub texts: BTreeMap<String, String>,
    pub scrolled_to: Vec<String>,
    pub opened: Vec<String>,
    pub alerts: Vec<String>,
}

impl Default for RecordingPage {
    fn default() -> Self {
        Self {
            background_scroll: true,
            shown: BTreeSet::new(),
            texts: BTreeMap::new(),
            scrolled_to: vec![],
            opened: vec![],
            alerts: vec![],
        }
    }
}

impl Page for RecordingPage {
    fn set_background_scroll(&mut self, enabled: bool) {
        self.background_scroll = enabled;
    }

    fn set_visible(&mut self, element_id: &str, visible: bool) {
        if visible {
            self.shown.insert(element_id.to_owned());
        } else {
            self.shown.remove(element_id);
        }
    }

    fn set_text(&mut self, element_id: &str, text: &str) {
        self.texts.insert(element_id.to_owned(), text.to_owned());
    }

    fn scroll_into_view(&mut self, element_id: &str) {
        self.scrolled_to.push(element_id.to_owned());
    }

    fn open_in_new_context(&mut self, url: &str) {
        self.opened.push(url.to_owned());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }
}
