//! Business workflows behind the console pages.
//!
//! Services check roles, turn forms into domain values, build API queries and
//! hand page data to the routes. They only see the repository traits.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::repository::SortOrder;

pub mod appointments;
pub mod booking;
pub mod clients;
pub mod clinic_services;
pub mod errors;
pub mod pets;
pub mod products;
pub mod staff;

pub use errors::{ServiceError, ServiceResult};

/// Parses an optional query-string value, ignoring blank and malformed input.
pub(crate) fn parse_filter<T: FromStr>(value: Option<&str>) -> Option<T> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}

/// Parses an identifier filter such as `client_id=12`.
pub(crate) fn parse_id<T: TryFrom<i32>>(value: Option<&str>) -> Option<T> {
    parse_filter::<i32>(value).and_then(|id| T::try_from(id).ok())
}

/// Sort column and direction from `sort_by`/`sort_order`; unknown columns
/// fall back to the page default.
pub(crate) fn parse_sort<S: FromStr>(
    sort_by: Option<&str>,
    sort_order: Option<&str>,
) -> Option<(S, SortOrder)> {
    let field = parse_filter::<S>(sort_by)?;
    Some((field, parse_filter(sort_order).unwrap_or_default()))
}

/// Parses a `YYYY-MM-DD` filter. Blank input means "no filter", anything else
/// that is not a date is reported back to the user.
pub(crate) fn parse_date_filter(value: Option<&str>) -> ServiceResult<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ServiceError::Filter(format!("Invalid date `{v}`, expected YYYY-MM-DD"))),
    }
}
