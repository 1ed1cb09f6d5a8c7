use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::client::ClientSummary;
use crate::domain::pet::PetSummary;
use crate::domain::service::ServiceSummary;
use crate::domain::types::{
    AppointmentId, ClientId, DurationMinutes, Notes, PetId, ServiceId, TypeConstraintError, UserId,
};
use crate::domain::user::UserSummary;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown status `{s}`")))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_id: ClientId,
    pub pet_id: PetId,
    pub service_id: ServiceId,
    pub user_id: UserId,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: DurationMinutes,
    pub status: AppointmentStatus,
    pub notes: Option<Notes>,
    pub client: Option<ClientSummary>,
    pub pet: Option<PetSummary>,
    pub service: Option<ServiceSummary>,
    pub user: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewAppointment {
    pub client_id: ClientId,
    pub pet_id: PetId,
    pub service_id: ServiceId,
    pub user_id: UserId,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: DurationMinutes,
    pub status: AppointmentStatus,
    pub notes: Option<Notes>,
}

pub type UpdateAppointment = NewAppointment;
