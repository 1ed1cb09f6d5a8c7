use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::appointment::{
    Appointment as DomainAppointment, AppointmentStatus, NewAppointment as DomainNewAppointment,
};
use crate::domain::client::ClientSummary as DomainClientSummary;
use crate::domain::pet::PetSummary as DomainPetSummary;
use crate::domain::service::ServiceSummary as DomainServiceSummary;
use crate::domain::types::{
    AppointmentId, ClientId, DurationMinutes, Notes, PetId, ServiceId, TypeConstraintError, UserId,
};
use crate::domain::user::UserSummary as DomainUserSummary;
use crate::models::client::ClientSummary;
use crate::models::pet::PetSummary;
use crate::models::service::ServiceSummary;
use crate::models::user::UserSummary;

#[derive(Debug, Clone, Deserialize)]
/// Appointment record as returned by `GET /appointments`.
pub struct Appointment {
    pub id: i32,
    pub client_id: i32,
    pub pet_id: i32,
    pub service_id: i32,
    pub user_id: i32,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub client: Option<ClientSummary>,
    #[serde(default)]
    pub pet: Option<PetSummary>,
    #[serde(default)]
    pub service: Option<ServiceSummary>,
    #[serde(default)]
    pub user: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
/// Body of `POST /appointments` and `PUT /appointments/{id}`.
pub struct AppointmentPayload<'a> {
    pub client_id: i32,
    pub pet_id: i32,
    pub service_id: i32,
    pub user_id: i32,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: &'static str,
    pub notes: Option<&'a str>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
/// Body of the `PATCH` issued when only the status changes.
pub struct StatusPayload {
    pub status: &'static str,
}

impl TryFrom<Appointment> for DomainAppointment {
    type Error = TypeConstraintError;

    fn try_from(appointment: Appointment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AppointmentId::try_from(appointment.id)?,
            client_id: ClientId::try_from(appointment.client_id)?,
            pet_id: PetId::try_from(appointment.pet_id)?,
            service_id: ServiceId::try_from(appointment.service_id)?,
            user_id: UserId::try_from(appointment.user_id)?,
            scheduled_at: appointment.scheduled_at,
            duration_minutes: DurationMinutes::new(appointment.duration_minutes)?,
            status: appointment.status.parse::<AppointmentStatus>()?,
            notes: Notes::from_optional(appointment.notes),
            client: appointment
                .client
                .map(DomainClientSummary::try_from)
                .transpose()?,
            pet: appointment
                .pet
                .map(DomainPetSummary::try_from)
                .transpose()?,
            service: appointment
                .service
                .map(DomainServiceSummary::try_from)
                .transpose()?,
            user: appointment
                .user
                .map(DomainUserSummary::try_from)
                .transpose()?,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewAppointment> for AppointmentPayload<'a> {
    fn from(appointment: &'a DomainNewAppointment) -> Self {
        Self {
            client_id: appointment.client_id.get(),
            pet_id: appointment.pet_id.get(),
            service_id: appointment.service_id.get(),
            user_id: appointment.user_id.get(),
            scheduled_at: appointment.scheduled_at,
            duration_minutes: appointment.duration_minutes.get(),
            status: appointment.status.as_str(),
            notes: appointment.notes.as_ref().map(Notes::as_str),
        }
    }
}

impl From<AppointmentStatus> for StatusPayload {
    fn from(status: AppointmentStatus) -> Self {
        Self {
            status: status.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn wire_appointment_converts_embedded_relations() {
        let wire: Appointment = serde_json::from_value(json!({
            "id": 11,
            "client_id": 1,
            "pet_id": 2,
            "service_id": 3,
            "user_id": 4,
            "scheduled_at": "2024-06-01T08:30:00Z",
            "duration_minutes": 45,
            "status": "confirmed",
            "notes": "<b>Bring</b> vaccination card",
            "client": {"id": 1, "first_name": "Anna", "last_name": "Berg"},
            "pet": {"id": 2, "name": "Rex"},
            "service": {"id": 3, "name": "Checkup", "price": 40.0},
            "user": {"id": 4, "name": "Dr. Lee"},
            "created_at": "2024-05-01T00:00:00Z",
            "updated_at": "2024-05-01T00:00:00Z"
        }))
        .unwrap();

        let appointment: DomainAppointment = wire.try_into().unwrap();

        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
        assert_eq!(
            appointment.notes.as_ref().unwrap().as_str(),
            "<b>Bring</b> vaccination card"
        );
        assert_eq!(appointment.pet.as_ref().unwrap().species, None);
        assert_eq!(appointment.user.as_ref().unwrap().name.as_str(), "Dr. Lee");
        assert_eq!(
            appointment.scheduled_at.to_rfc3339(),
            "2024-06-01T08:30:00+00:00"
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let wire: Appointment = serde_json::from_value(json!({
            "id": 11,
            "client_id": 1,
            "pet_id": 2,
            "service_id": 3,
            "user_id": 4,
            "scheduled_at": "2024-06-01T08:30:00Z",
            "duration_minutes": 45,
            "status": "postponed",
            "created_at": "2024-05-01T00:00:00Z",
            "updated_at": "2024-05-01T00:00:00Z"
        }))
        .unwrap();

        let result: Result<DomainAppointment, _> = wire.try_into();

        assert!(result.is_err());
    }

    #[test]
    fn status_payload_uses_wire_name() {
        let payload = StatusPayload::from(AppointmentStatus::NoShow);
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            json!({"status": "no_show"})
        );
    }
}
