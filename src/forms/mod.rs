//! Modal form definitions and their conversion into domain values.

use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use validator::ValidationErrors;

pub mod appointments;
pub mod clients;
pub mod clinic_services;
pub mod pets;
pub mod products;
pub mod staff;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Name must not be empty")]
    InvalidName,

    #[error("Invalid phone number, use the international format (+15551234567)")]
    InvalidPhoneNumber,

    #[error("Price must be greater than zero")]
    InvalidPrice,

    #[error("Stock quantity cannot be negative")]
    InvalidStock,

    #[error("Duration must be greater than zero")]
    InvalidDuration,

    #[error("Weight must be greater than zero")]
    InvalidWeight,

    #[error("Invalid date, expected YYYY-MM-DD")]
    InvalidDate,

    #[error("Invalid appointment time, expected YYYY-MM-DDTHH:MM")]
    InvalidDateTime,

    #[error("Unknown appointment status")]
    InvalidStatus,

    #[error("Please select a {0}")]
    MissingSelection(&'static str),
}

/// Body of the activate/deactivate buttons on catalogue and staff pages.
#[derive(Debug, Deserialize)]
pub struct ToggleActiveForm {
    pub is_active: bool,
}

/// HTML checkboxes are only submitted when ticked.
pub(crate) fn checkbox(value: &Option<String>) -> bool {
    value.is_some()
}

/// Parses a number typed into the modal. Missing, blank and malformed input
/// all fail with `err`.
pub(crate) fn number<T: FromStr>(value: Option<&str>, err: FormError) -> Result<T, FormError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
        .ok_or(err)
}

/// Id picked from a dropdown. Disabled selects are not submitted at all and
/// the placeholder option submits an empty value.
pub(crate) fn selection<T: TryFrom<i32>>(
    value: Option<&str>,
    what: &'static str,
) -> Result<T, FormError> {
    let id = number::<i32>(value, FormError::MissingSelection(what))?;
    T::try_from(id).map_err(|_| FormError::MissingSelection(what))
}
