//! Clinic service catalogue workflows.

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::service::{NewService, Service};
use crate::domain::types::ServiceId;
use crate::dto::clinic_services::{ServicesPageData, ServicesQuery};
use crate::forms::ToggleActiveForm;
use crate::forms::clinic_services::ServiceForm;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{ServiceListQuery, ServiceReader, ServiceSort, ServiceWriter, SortOrder};
use crate::services::{ServiceError, ServiceResult, parse_filter, parse_sort};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub async fn load_services_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ServicesQuery,
) -> ServiceResult<ServicesPageData>
where
    R: ServiceReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let (sort_by, sort_order) = parse_sort(query.sort_by.as_deref(), query.sort_order.as_deref())
        .unwrap_or((ServiceSort::Name, SortOrder::Asc));

    let mut list_query = ServiceListQuery::new()
        .paginate(query.page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE)
        .sort(sort_by, sort_order)
        .search(query.search.clone().unwrap_or_default());

    if let Some(is_active) = parse_filter::<bool>(query.active.as_deref()) {
        list_query = list_query.active(is_active);
    }

    let services = repo.list_services(list_query).await.map_err(|err| {
        log::error!("Failed to list services: {err}");
        err
    })?;

    Ok(ServicesPageData {
        services: services.into(),
        filters: query,
    })
}

pub async fn load_service_modal<R>(
    repo: &R,
    user: &AuthenticatedUser,
    service_id: i32,
) -> ServiceResult<Service>
where
    R: ServiceReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_service(ServiceId::new(service_id)?)
        .await?
        .ok_or(ServiceError::NotFound)
}

pub async fn create_service<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ServiceForm,
) -> ServiceResult<Service>
where
    R: ServiceWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_service = NewService::try_from(form)?;

    let service = repo.create_service(&new_service).await.map_err(|err| {
        log::error!("Failed to add a service: {err}");
        err
    })?;

    Ok(service)
}

pub async fn update_service<R>(
    repo: &R,
    user: &AuthenticatedUser,
    service_id: i32,
    form: ServiceForm,
) -> ServiceResult<Service>
where
    R: ServiceWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let id = ServiceId::new(service_id)?;
    let updates = NewService::try_from(form)?;

    let service = repo.update_service(id, &updates).await.map_err(|err| {
        log::error!("Failed to update service {id}: {err}");
        err
    })?;

    Ok(service)
}

pub async fn toggle_service<R>(
    repo: &R,
    user: &AuthenticatedUser,
    service_id: i32,
    form: ToggleActiveForm,
) -> ServiceResult<Service>
where
    R: ServiceWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let id = ServiceId::new(service_id)?;

    let service = repo
        .set_service_active(id, form.is_active)
        .await
        .map_err(|err| {
            log::error!("Failed to toggle service {id}: {err}");
            err
        })?;

    Ok(service)
}

pub async fn delete_service<R>(
    repo: &R,
    user: &AuthenticatedUser,
    service_id: i32,
) -> ServiceResult<()>
where
    R: ServiceWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let id = ServiceId::new(service_id)?;

    repo.delete_service(id).await.map_err(|err| {
        log::error!("Failed to delete service {id}: {err}");
        err
    })?;

    Ok(())
}
