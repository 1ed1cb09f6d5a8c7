use chrono::NaiveDate;
use reqwest::Method;

use crate::domain::appointment::{
    Appointment, AppointmentStatus, NewAppointment, UpdateAppointment,
};
use crate::domain::types::{AppointmentId, ClientId, PetId, ServiceId, UserId};
use crate::models::appointment::{
    Appointment as WireAppointment, AppointmentPayload, StatusPayload,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AppointmentReader, AppointmentWriter, HttpRepository, ListParams, ListQuery, Page, QueryPairs,
    Relation, include_pair, list_query_builders, sort_field,
};

sort_field!(AppointmentSort {
    ScheduledAt => "scheduled_at",
    Status => "status",
    CreatedAt => "created_at",
});

#[derive(Debug, Clone, Default)]
pub struct AppointmentListQuery {
    pub params: ListParams<AppointmentSort>,
    pub status: Option<AppointmentStatus>,
    pub client_id: Option<ClientId>,
    pub pet_id: Option<PetId>,
    pub service_id: Option<ServiceId>,
    pub user_id: Option<UserId>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub include: Vec<Relation>,
}

impl AppointmentListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    list_query_builders!(AppointmentSort);

    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn pet(mut self, pet_id: PetId) -> Self {
        self.pet_id = Some(pet_id);
        self
    }

    pub fn service(mut self, service_id: ServiceId) -> Self {
        self.service_id = Some(service_id);
        self
    }

    pub fn user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Restricts results to appointments scheduled within the inclusive range.
    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn include(mut self, relations: &[Relation]) -> Self {
        self.include.extend_from_slice(relations);
        self
    }
}

impl ListQuery for AppointmentListQuery {
    fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        self.params.push_pairs(&mut pairs);
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(id) = self.client_id {
            pairs.push(("client_id", id.to_string()));
        }
        if let Some(id) = self.pet_id {
            pairs.push(("pet_id", id.to_string()));
        }
        if let Some(id) = self.service_id {
            pairs.push(("service_id", id.to_string()));
        }
        if let Some(id) = self.user_id {
            pairs.push(("user_id", id.to_string()));
        }
        if let Some(date) = self.date_from {
            pairs.push(("date_from", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.date_to {
            pairs.push(("date_to", date.format("%Y-%m-%d").to_string()));
        }
        pairs.extend(include_pair(&self.include));
        pairs
    }
}

impl AppointmentReader for HttpRepository {
    async fn get_appointment(
        &self,
        id: AppointmentId,
        include: &[Relation],
    ) -> RepositoryResult<Option<Appointment>> {
        let pairs = include_pair(include).into_iter().collect();
        self.fetch_one::<WireAppointment, _>(&format!("appointments/{id}"), pairs)
            .await
    }

    async fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> RepositoryResult<Page<Appointment>> {
        self.fetch_page::<WireAppointment, _>("appointments", query.query_pairs())
            .await
    }
}

impl AppointmentWriter for HttpRepository {
    async fn create_appointment(&self, new: &NewAppointment) -> RepositoryResult<Appointment> {
        self.send::<_, WireAppointment, _>(
            Method::POST,
            "appointments",
            &AppointmentPayload::from(new),
        )
        .await
    }

    async fn update_appointment(
        &self,
        id: AppointmentId,
        updates: &UpdateAppointment,
    ) -> RepositoryResult<Appointment> {
        self.send::<_, WireAppointment, _>(
            Method::PUT,
            &format!("appointments/{id}"),
            &AppointmentPayload::from(updates),
        )
        .await
    }

    async fn update_appointment_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> RepositoryResult<Appointment> {
        self.send::<_, WireAppointment, _>(
            Method::PATCH,
            &format!("appointments/{id}"),
            &StatusPayload::from(status),
        )
        .await
    }

    async fn delete_appointment(&self, id: AppointmentId) -> RepositoryResult<()> {
        self.remove(&format!("appointments/{id}")).await
    }
}
