//! Booking modal and status change forms.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::appointment::{AppointmentStatus, NewAppointment};
use crate::domain::types::{DurationMinutes, Notes};
use crate::forms::{FormError, number, selection};
use crate::models::non_blank;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Deserialize, Validate)]
/// Form posted by the booking modal.
///
/// Ids and the duration stay text until conversion so an empty dropdown
/// reaches the user as a missing selection.
pub struct AppointmentForm {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub pet_id: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Value of a `datetime-local` input.
    #[validate(length(min = 1))]
    pub scheduled_at: String,
    #[serde(default)]
    pub duration_minutes: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Parses a `datetime-local` value. The clinic operates in UTC.
pub fn parse_scheduled_at(value: &str) -> Result<DateTime<Utc>, FormError> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or(FormError::InvalidDateTime)
}

impl TryFrom<AppointmentForm> for NewAppointment {
    type Error = FormError;

    fn try_from(form: AppointmentForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let status = match non_blank(form.status) {
            Some(status) => status.parse().map_err(|_| FormError::InvalidStatus)?,
            None => AppointmentStatus::default(),
        };

        let duration = number(form.duration_minutes.as_deref(), FormError::InvalidDuration)?;

        Ok(NewAppointment {
            client_id: selection(form.client_id.as_deref(), "client")?,
            pet_id: selection(form.pet_id.as_deref(), "pet")?,
            service_id: selection(form.service_id.as_deref(), "service")?,
            user_id: selection(form.user_id.as_deref(), "veterinarian")?,
            scheduled_at: parse_scheduled_at(&form.scheduled_at)?,
            duration_minutes: DurationMinutes::new(duration)
                .map_err(|_| FormError::InvalidDuration)?,
            status,
            notes: Notes::from_optional(form.notes),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AppointmentStatusForm {
    pub status: String,
}

impl TryFrom<AppointmentStatusForm> for AppointmentStatus {
    type Error = FormError;

    fn try_from(form: AppointmentStatusForm) -> Result<Self, Self::Error> {
        form.status.parse().map_err(|_| FormError::InvalidStatus)
    }
}
