//! src/client/form.rs
use crate::domain::{ContactForm, ContactSubmission, Field, ValidationErrors};

/// One input control and its error slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldControl {
    pub value: String,
    pub error: String,
    /// Border highlight on the input control.
    pub highlighted: bool,
}

/// Current state of the four form controls, indexed by `Field`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormState {
    controls: [FieldControl; 4],
}

impl ContactFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn control(&self, field: Field) -> &FieldControl {
        &self.controls[field.index()]
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.controls[field.index()].value = value.into();
    }

    pub fn value(&self, field: Field) -> &str {
        &self.control(field).value
    }

    pub fn error(&self, field: Field) -> &str {
        &self.control(field).error
    }

    pub fn is_highlighted(&self, field: Field) -> bool {
        self.control(field).highlighted
    }

    pub fn has_errors(&self) -> bool {
        self.controls
            .iter()
            .any(|control| !control.error.is_empty() || control.highlighted)
    }

    pub fn values(&self) -> ContactForm {
        ContactForm {
            name: self.value(Field::Name).to_owned(),
            email: self.value(Field::Email).to_owned(),
            subject: self.value(Field::Subject).to_owned(),
            message: self.value(Field::Message).to_owned(),
        }
    }

    pub fn clear_errors(&mut self) {
        for control in self.controls.iter_mut() {
            control.error.clear();
            control.highlighted = false;
        }
    }

    pub fn show_errors(&mut self, errors: &ValidationErrors) {
        for (field, error) in errors.iter() {
            let control = &mut self.controls[field.index()];
            control.error = error.to_string();
            control.highlighted = true;
        }
    }

    /// One validation pass. Errors from the previous pass never survive it.
    pub fn validate(&mut self) -> Result<ContactSubmission, ValidationErrors> {
        self.clear_errors();
        let result = self.values().validate();
        if let Err(errors) = &result {
            self.show_errors(errors);
        }
        result
    }

    /// Empties every value and error slot.
    pub fn reset(&mut self) {
        self.controls = Default::default();
    }
}
