//! Client list, client card and client modal workflows.

use futures::try_join;

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::client::{Client, NewClient};
use crate::domain::types::ClientId;
use crate::dto::clients::{ClientPageData, ClientsPageData, ClientsQuery};
use crate::forms::clients::ClientForm;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentSort, ClientListQuery, ClientReader,
    ClientSort, ClientWriter, MAX_PER_PAGE, PetListQuery, PetReader, PetSort, Relation,
    SortOrder,
};
use crate::services::{ServiceError, ServiceResult, parse_sort};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Visits listed on the client card.
pub const RECENT_APPOINTMENTS: usize = 10;

pub async fn load_clients_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ClientsQuery,
) -> ServiceResult<ClientsPageData>
where
    R: ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let (sort_by, sort_order) = parse_sort(query.sort_by.as_deref(), query.sort_order.as_deref())
        .unwrap_or((ClientSort::LastName, SortOrder::Asc));

    let list_query = ClientListQuery::new()
        .paginate(query.page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE)
        .sort(sort_by, sort_order)
        .search(query.search.clone().unwrap_or_default())
        .include(&[Relation::Pets]);

    let clients = repo.list_clients(list_query).await.map_err(|err| {
        log::error!("Failed to list clients: {err}");
        err
    })?;

    Ok(ClientsPageData {
        clients: clients.into(),
        filters: query,
    })
}

/// Loads the client card: the client, all of their pets and the latest visits.
pub async fn load_client_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
) -> ServiceResult<ClientPageData>
where
    R: ClientReader + PetReader + AppointmentReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let client_id = ClientId::new(client_id)?;

    let pets_query = PetListQuery::new()
        .client(client_id)
        .paginate(1, MAX_PER_PAGE)
        .sort(PetSort::Name, SortOrder::Asc);
    let appointments_query = AppointmentListQuery::new()
        .client(client_id)
        .paginate(1, RECENT_APPOINTMENTS)
        .sort(AppointmentSort::ScheduledAt, SortOrder::Desc)
        .include(&[Relation::Pet, Relation::Service, Relation::User]);

    let (client, pets, appointments) = try_join!(
        repo.get_client(client_id, &[]),
        repo.list_pets(pets_query),
        repo.list_appointments(appointments_query),
    )
    .map_err(|err| {
        log::error!("Failed to load client {client_id}: {err}");
        err
    })?;

    let client = client.ok_or(ServiceError::NotFound)?;

    Ok(ClientPageData {
        client,
        pets: pets.items,
        recent_appointments: appointments.items,
    })
}

/// Loads the client being edited in the modal.
pub async fn load_client_modal<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_client(ClientId::new(client_id)?, &[])
        .await?
        .ok_or(ServiceError::NotFound)
}

pub async fn create_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ClientForm,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let new_client = NewClient::try_from(form)?;

    let client = repo.create_client(&new_client).await.map_err(|err| {
        log::error!("Failed to add a client: {err}");
        err
    })?;

    Ok(client)
}

pub async fn update_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
    form: ClientForm,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let id = ClientId::new(client_id)?;
    let updates = NewClient::try_from(form)?;

    let client = repo.update_client(id, &updates).await.map_err(|err| {
        log::error!("Failed to update client {id}: {err}");
        err
    })?;

    Ok(client)
}

pub async fn delete_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let id = ClientId::new(client_id)?;

    repo.delete_client(id).await.map_err(|err| {
        log::error!("Failed to delete client {id}: {err}");
        err
    })?;

    Ok(())
}
