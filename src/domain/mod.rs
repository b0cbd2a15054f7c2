//! src/domain/mod.rs
mod field;
pub use field::Field;

mod contact;
pub use contact::{
    is_well_formed_email, ContactForm, ContactSubmission, FieldError, ValidationErrors,
};
