//! src/domain/contact.rs
use crate::domain::Field;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Email pattern is a valid regex")
});

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(Field),
    #[error("Please enter a valid email")]
    InvalidEmail,
}

/// Raw field values as typed by the visitor or as posted to the endpoint.
///
/// Missing keys deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Runs every field rule, collecting all failures rather than stopping at the first.
    pub fn check(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        for field in Field::ALL {
            if let Err(e) = check_field(field, self.value(field).trim()) {
                errors.insert(field, e);
            }
        }

        errors
    }

    pub fn validate(&self) -> Result<ContactSubmission, ValidationErrors> {
        let errors = self.check();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ContactSubmission {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            subject: self.subject.trim().to_owned(),
            message: self.message.trim().to_owned(),
        })
    }
}

fn check_field(field: Field, value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required(field));
    }

    if field == Field::Email && !is_well_formed_email(value) {
        return Err(FieldError::InvalidEmail);
    }

    Ok(())
}

pub fn is_well_formed_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

/// A submission whose four fields passed validation. Only `ContactForm::validate` builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl ContactSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failing fields of one validation pass, kept in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    pub fn first(&self) -> Option<Field> {
        self.0.keys().next().copied()
    }

    /// "Please fill in the following fields: Name, Email"
    pub fn summary(&self) -> String {
        let labels: Vec<_> = self.fields().map(|field| field.label()).collect();
        format!("Please fill in the following fields: {}", labels.join(", "))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.iter()
                .map(|(field, error)| (field.as_str(), error.to_string())),
        )
    }
}
