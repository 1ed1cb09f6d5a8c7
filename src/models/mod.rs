//! Wire representations exchanged with the clinic REST API.
//!
//! Incoming records are deserialized loosely and converted into validated
//! domain values; outgoing payloads borrow from domain values.

pub mod appointment;
pub mod client;
#[cfg(feature = "server")]
pub mod config;
pub mod pet;
pub mod product;
pub mod service;
pub mod user;

/// Trims the value and drops it when nothing remains.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
