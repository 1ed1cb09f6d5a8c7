//! Data for the booking modal's dependent dropdowns and the JSON endpoints
//! that refresh them.
//!
//! The pet dropdown depends on the selected client: pets are only loaded once
//! a client has been picked, and always belong to that client.

use futures::try_join;

use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::client::Client;
use crate::domain::service::Service;
use crate::domain::types::ClientId;
use crate::domain::user::{User, UserRole};
use crate::dto::api::{OptionsQuery, OptionsResponse, SelectOption};
use crate::dto::appointments::{BookingOptions, BookingQuery};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientListQuery, ClientReader, ClientSort, MAX_PER_PAGE, Page, PetListQuery, PetReader,
    PetSort, ServiceListQuery, ServiceReader, ServiceSort, SortOrder, UserListQuery, UserReader,
    UserSort,
};
use crate::services::{ServiceResult, parse_id};

/// Clients shown per page of the client picker.
pub const BOOKING_CLIENTS_PER_PAGE: usize = 10;

fn search_term(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn options_page<T>(page: Page<T>, option: impl Fn(&T) -> SelectOption) -> OptionsResponse {
    OptionsResponse {
        items: page.items.iter().map(option).collect(),
        page: page.meta.current_page,
        last_page: page.meta.last_page,
        total: page.meta.total,
    }
}

fn client_option(client: &Client) -> SelectOption {
    SelectOption {
        id: client.id.get(),
        label: client.full_name(),
        hint: client
            .phone
            .as_ref()
            .map(|phone| phone.to_string())
            .or_else(|| client.email.as_ref().map(|email| email.to_string())),
    }
}

fn service_option(service: &Service) -> SelectOption {
    SelectOption {
        id: service.id.get(),
        label: service.name.to_string(),
        hint: Some(service.duration_minutes.to_string()),
    }
}

fn staff_option(user: &User) -> SelectOption {
    SelectOption {
        id: user.id.get(),
        label: user.name.to_string(),
        hint: None,
    }
}

fn clients_query(search: Option<&str>, page: usize) -> ClientListQuery {
    ClientListQuery::new()
        .paginate(page, BOOKING_CLIENTS_PER_PAGE)
        .sort(ClientSort::LastName, SortOrder::Asc)
        .search(search_term(search))
}

fn services_query(search: Option<&str>) -> ServiceListQuery {
    ServiceListQuery::new()
        .paginate(1, MAX_PER_PAGE)
        .sort(ServiceSort::Name, SortOrder::Asc)
        .search(search_term(search))
        .active(true)
}

fn veterinarians_query(search: Option<&str>, page: usize) -> UserListQuery {
    UserListQuery::new()
        .paginate(page, MAX_PER_PAGE)
        .sort(UserSort::Name, SortOrder::Asc)
        .search(search_term(search))
        .role(UserRole::Veterinarian)
        .active(true)
}

/// Active veterinarians, used by the booking modal and the appointment filters.
pub(crate) async fn active_veterinarians<R>(
    repo: &R,
    search: Option<&str>,
) -> RepositoryResult<Vec<User>>
where
    R: UserReader + ?Sized,
{
    Ok(repo
        .list_users(veterinarians_query(search, 1))
        .await?
        .items)
}

/// Loads every dropdown of the booking modal.
///
/// `preselected` is the client of the appointment being edited; an explicit
/// `client_id` in the query wins over it.
pub async fn load_booking_options<R>(
    repo: &R,
    query: &BookingQuery,
    preselected: Option<ClientId>,
) -> ServiceResult<BookingOptions>
where
    R: ClientReader + PetReader + ServiceReader + UserReader + ?Sized,
{
    let selected_id = parse_id::<ClientId>(query.client_id.as_deref()).or(preselected);

    let (clients, services, veterinarians) = try_join!(
        repo.list_clients(clients_query(
            query.client_search.as_deref(),
            query.client_page.unwrap_or(1),
        )),
        repo.list_services(services_query(query.service_search.as_deref())),
        active_veterinarians(repo, query.staff_search.as_deref()),
    )
    .map_err(|err| {
        log::error!("Failed to load booking options: {err}");
        err
    })?;

    let mut selected_client = None;
    let mut pets = Vec::new();

    if let Some(client_id) = selected_id {
        selected_client = match clients.items.iter().find(|c| c.id == client_id) {
            Some(client) => Some(client.clone()),
            None => repo.get_client(client_id, &[]).await?,
        };

        if selected_client.is_some() {
            let pets_query = PetListQuery::new()
                .client(client_id)
                .paginate(1, MAX_PER_PAGE)
                .sort(PetSort::Name, SortOrder::Asc);
            pets = repo.list_pets(pets_query).await?.items;
        }
    }

    Ok(BookingOptions {
        clients: clients.into(),
        selected_client,
        pets,
        services: services.items,
        veterinarians,
    })
}

/// Client picker search for `/api/v1/clients`.
pub async fn search_clients_api<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: OptionsQuery,
) -> ServiceResult<OptionsResponse>
where
    R: ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let page = repo
        .list_clients(clients_query(
            params.search.as_deref(),
            params.page.unwrap_or(1),
        ))
        .await
        .map_err(|err| {
            log::error!("Failed to search clients: {err}");
            err
        })?;

    Ok(options_page(page, client_option))
}

/// Pets of one client for `/api/v1/clients/{id}/pets`.
pub async fn list_client_pets_api<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
) -> ServiceResult<Vec<SelectOption>>
where
    R: PetReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let query = PetListQuery::new()
        .client(ClientId::new(client_id)?)
        .paginate(1, MAX_PER_PAGE)
        .sort(PetSort::Name, SortOrder::Asc);

    let pets = repo.list_pets(query).await.map_err(|err| {
        log::error!("Failed to list pets of client {client_id}: {err}");
        err
    })?;

    Ok(pets
        .items
        .iter()
        .map(|pet| SelectOption {
            id: pet.id.get(),
            label: pet.name.to_string(),
            hint: Some(pet.species.to_string()),
        })
        .collect())
}

/// Active services for `/api/v1/services`.
pub async fn search_services_api<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: OptionsQuery,
) -> ServiceResult<OptionsResponse>
where
    R: ServiceReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let page = repo
        .list_services(services_query(params.search.as_deref()))
        .await
        .map_err(|err| {
            log::error!("Failed to search services: {err}");
            err
        })?;

    Ok(options_page(page, service_option))
}

/// Active veterinarians for `/api/v1/staff`.
pub async fn search_staff_api<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: OptionsQuery,
) -> ServiceResult<OptionsResponse>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let page = repo
        .list_users(veterinarians_query(
            params.search.as_deref(),
            params.page.unwrap_or(1),
        ))
        .await
        .map_err(|err| {
            log::error!("Failed to search staff: {err}");
            err
        })?;

    Ok(options_page(page, staff_option))
}
