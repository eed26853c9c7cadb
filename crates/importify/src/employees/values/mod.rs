//! Self-validating building blocks of an [`Employee`](super::Employee).
//!
//! Every type exposes a strict constructor that rejects malformed input with an
//! [`InvalidValue`] error, and a lenient `parse` used on untrusted CSV data that
//! simply yields `None`.

mod address;
mod email;
mod name;

pub use address::PostalAddress;
pub use email::EmailAddress;
pub use name::Name;

/// Reason a strict value-object constructor refused its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidValue {
    #[error("first name cannot be empty")]
    EmptyFirstName,
    #[error("last name cannot be empty")]
    EmptyLastName,
    #[error("'{0}' is not a valid email address")]
    Email(String),
    #[error("address line 1 is required")]
    MissingAddressLine,
    #[error("postcode is required")]
    MissingPostcode,
}

pub(crate) fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
