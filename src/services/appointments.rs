//! Appointment list, booking and status workflows.

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::appointment::{Appointment, AppointmentStatus, NewAppointment};
use crate::domain::types::{AppointmentId, UserId};
use crate::dto::appointments::{
    AppointmentModalData, AppointmentsPageData, AppointmentsQuery, BookingQuery,
};
use crate::forms::appointments::{AppointmentForm, AppointmentStatusForm};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentSort, AppointmentWriter, ClientReader,
    PetReader, Relation, ServiceReader, SortOrder, UserReader,
};
use crate::services::booking::{active_veterinarians, load_booking_options};
use crate::services::{
    ServiceError, ServiceResult, parse_date_filter, parse_filter, parse_id, parse_sort,
};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

const EMBEDDED: [Relation; 4] = [
    Relation::Client,
    Relation::Pet,
    Relation::Service,
    Relation::User,
];

/// Loads the appointments index with its filter bar.
///
/// Newest visits come first unless another sort column is requested.
pub async fn load_appointments_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: AppointmentsQuery,
) -> ServiceResult<AppointmentsPageData>
where
    R: AppointmentReader + UserReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let date_from = parse_date_filter(query.date_from.as_deref())?;
    let date_to = parse_date_filter(query.date_to.as_deref())?;
    if let (Some(from), Some(to)) = (date_from, date_to)
        && from > to
    {
        return Err(ServiceError::Filter(
            "The start date must not be after the end date".to_string(),
        ));
    }

    let (sort_by, sort_order) = parse_sort(query.sort_by.as_deref(), query.sort_order.as_deref())
        .unwrap_or((AppointmentSort::ScheduledAt, SortOrder::Desc));

    let mut list_query = AppointmentListQuery::new()
        .paginate(query.page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE)
        .sort(sort_by, sort_order)
        .search(query.search.clone().unwrap_or_default())
        .between(date_from, date_to)
        .include(&EMBEDDED);

    if let Some(status) = parse_filter::<AppointmentStatus>(query.status.as_deref()) {
        list_query = list_query.status(status);
    }
    if let Some(user_id) = parse_id::<UserId>(query.user_id.as_deref()) {
        list_query = list_query.user(user_id);
    }

    let appointments = repo.list_appointments(list_query).await.map_err(|err| {
        log::error!("Failed to list appointments: {err}");
        err
    })?;

    let veterinarians = active_veterinarians(repo, None).await.map_err(|err| {
        log::error!("Failed to list veterinarians: {err}");
        err
    })?;

    Ok(AppointmentsPageData {
        appointments: appointments.into(),
        veterinarians,
        statuses: &AppointmentStatus::ALL,
        filters: query,
    })
}

/// Loads the booking modal, either empty or for an existing appointment.
pub async fn load_appointment_modal<R>(
    repo: &R,
    user: &AuthenticatedUser,
    appointment_id: Option<i32>,
    booking: BookingQuery,
) -> ServiceResult<AppointmentModalData>
where
    R: AppointmentReader + ClientReader + PetReader + ServiceReader + UserReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let appointment = match appointment_id {
        Some(id) => Some(
            repo.get_appointment(AppointmentId::new(id)?, &EMBEDDED)
                .await?
                .ok_or(ServiceError::NotFound)?,
        ),
        None => None,
    };

    let preselected = appointment.as_ref().map(|a| a.client_id);
    let options = load_booking_options(repo, &booking, preselected).await?;

    Ok(AppointmentModalData {
        appointment,
        options,
        statuses: &AppointmentStatus::ALL,
    })
}

pub async fn create_appointment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AppointmentForm,
) -> ServiceResult<Appointment>
where
    R: AppointmentWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let new_appointment = NewAppointment::try_from(form)?;

    let appointment = repo
        .create_appointment(&new_appointment)
        .await
        .map_err(|err| {
            log::error!("Failed to book the appointment: {err}");
            err
        })?;

    Ok(appointment)
}

pub async fn update_appointment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    appointment_id: i32,
    form: AppointmentForm,
) -> ServiceResult<Appointment>
where
    R: AppointmentWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let id = AppointmentId::new(appointment_id)?;
    let updates = NewAppointment::try_from(form)?;

    let appointment = repo
        .update_appointment(id, &updates)
        .await
        .map_err(|err| {
            log::error!("Failed to update appointment {id}: {err}");
            err
        })?;

    Ok(appointment)
}

/// Moves an appointment to another status through the PATCH endpoint.
pub async fn change_appointment_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    appointment_id: i32,
    form: AppointmentStatusForm,
) -> ServiceResult<Appointment>
where
    R: AppointmentWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let id = AppointmentId::new(appointment_id)?;
    let status = AppointmentStatus::try_from(form)?;

    let appointment = repo
        .update_appointment_status(id, status)
        .await
        .map_err(|err| {
            log::error!("Failed to set status of appointment {id}: {err}");
            err
        })?;

    Ok(appointment)
}

pub async fn delete_appointment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    appointment_id: i32,
) -> ServiceResult<()>
where
    R: AppointmentWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let id = AppointmentId::new(appointment_id)?;

    repo.delete_appointment(id).await.map_err(|err| {
        log::error!("Failed to delete appointment {id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;
    use crate::repository::errors::RepositoryError;
    use crate::repository::fake::{
        FakeRepository, admin_user, front_desk_user, outsider_user, sample_appointment,
        sample_client, sample_user,
    };

    fn booking_form() -> AppointmentForm {
        AppointmentForm {
            client_id: Some("1".to_string()),
            pet_id: Some("1".to_string()),
            service_id: Some("1".to_string()),
            user_id: Some("1".to_string()),
            scheduled_at: "2026-04-02T10:00".to_string(),
            duration_minutes: Some("30".to_string()),
            status: None,
            notes: None,
            return_to: None,
        }
    }

    #[actix_web::test]
    async fn index_sends_filters_and_default_sort() {
        let repo = FakeRepository::default();
        repo.appointments
            .replace(vec![sample_appointment(1, 1, 1, 3), sample_appointment(2, 1, 1, 4)]);
        repo.users
            .replace(vec![sample_user(3, "Dr. Hart", UserRole::Veterinarian)]);

        let query = AppointmentsQuery {
            status: Some("scheduled".to_string()),
            user_id: Some("3".to_string()),
            date_from: Some("2026-01-01".to_string()),
            ..AppointmentsQuery::default()
        };

        let data = load_appointments_page(&repo, &front_desk_user(), query)
            .await
            .unwrap();

        assert_eq!(data.appointments.items.len(), 1);
        assert_eq!(data.veterinarians.len(), 1);
        assert_eq!(
            repo.appointment_queries.borrow()[0],
            "page=1&per_page=20&sort_by=scheduled_at&sort_order=desc&status=scheduled\
             &user_id=3&date_from=2026-01-01&include=client%2Cpet%2Cservice%2Cuser"
        );
    }

    #[actix_web::test]
    async fn inverted_date_range_is_a_filter_error() {
        let repo = FakeRepository::default();
        let query = AppointmentsQuery {
            date_from: Some("2026-02-10".to_string()),
            date_to: Some("2026-02-01".to_string()),
            ..AppointmentsQuery::default()
        };

        let result = load_appointments_page(&repo, &front_desk_user(), query).await;
        assert!(matches!(result, Err(ServiceError::Filter(_))));
        assert!(repo.appointment_queries.borrow().is_empty());
    }

    #[actix_web::test]
    async fn booking_posts_the_appointment() {
        let repo = FakeRepository::default();

        let appointment = create_appointment(&repo, &front_desk_user(), booking_form())
            .await
            .unwrap();

        assert_eq!(appointment.id.get(), 1);
        assert_eq!(repo.writes.borrow().as_slice(), ["POST appointments pet=1"]);
    }

    #[actix_web::test]
    async fn invalid_booking_never_reaches_the_api() {
        let repo = FakeRepository::default();
        let mut form = booking_form();
        form.duration_minutes = Some("-5".to_string());

        let result = create_appointment(&repo, &front_desk_user(), form).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert!(repo.writes.borrow().is_empty());
    }

    #[actix_web::test]
    async fn backend_validation_message_is_surfaced() {
        let repo = FakeRepository::default();
        repo.reject_writes.replace(Some(RepositoryError::ValidationError(
            "The selected time slot is taken.".to_string(),
        )));

        let result = create_appointment(&repo, &front_desk_user(), booking_form()).await;

        assert_eq!(
            result.unwrap_err(),
            ServiceError::Form("The selected time slot is taken.".to_string())
        );
    }

    #[actix_web::test]
    async fn status_change_uses_patch() {
        let repo = FakeRepository::default();
        repo.appointments
            .replace(vec![sample_appointment(7, 1, 1, 1)]);

        let appointment = change_appointment_status(
            &repo,
            &front_desk_user(),
            7,
            AppointmentStatusForm {
                status: "no_show".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(appointment.status, AppointmentStatus::NoShow);
        assert_eq!(
            repo.writes.borrow().as_slice(),
            ["PATCH appointments/7 status=no_show"]
        );
    }

    #[actix_web::test]
    async fn deleting_requires_admin() {
        let repo = FakeRepository::default();
        repo.appointments
            .replace(vec![sample_appointment(7, 1, 1, 1)]);

        let denied = delete_appointment(&repo, &front_desk_user(), 7).await;
        assert_eq!(denied, Err(ServiceError::Unauthorized));

        delete_appointment(&repo, &admin_user(), 7).await.unwrap();
        assert!(repo.appointments.borrow().is_empty());
    }

    #[actix_web::test]
    async fn modal_for_missing_appointment_is_not_found() {
        let repo = FakeRepository::default();
        repo.clients.replace(vec![sample_client(1, "Maria", "Lind")]);

        let result =
            load_appointment_modal(&repo, &front_desk_user(), Some(99), BookingQuery::default())
                .await;
        assert!(matches!(result, Err(ServiceError::NotFound)));

        let result =
            load_appointment_modal(&repo, &outsider_user(), None, BookingQuery::default()).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
