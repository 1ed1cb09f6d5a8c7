//! Typed client for the clinic REST API.
//!
//! Every resource gets a reader and a writer trait. [`HttpRepository`]
//! implements all of them against the backend; services only depend on the
//! traits so tests can substitute in-memory fakes.

use std::str::FromStr;

use crate::domain::appointment::{
    Appointment, AppointmentStatus, NewAppointment, UpdateAppointment,
};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::pet::{NewPet, Pet, UpdatePet};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::service::{NewService, Service, UpdateService};
use crate::domain::types::{AppointmentId, ClientId, PetId, ProductId, ServiceId, UserId};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::envelope::PageMeta;
use crate::repository::errors::RepositoryResult;

pub mod appointment;
pub mod client;
pub mod envelope;
pub mod errors;
#[cfg(test)]
pub mod fake;
pub mod http;
pub mod pet;
pub mod product;
pub mod service;
pub mod user;

pub use appointment::{AppointmentListQuery, AppointmentSort};
pub use client::{ClientListQuery, ClientSort};
pub use http::HttpRepository;
pub use pet::{PetListQuery, PetSort};
pub use product::{ProductListQuery, ProductSort};
pub use service::{ServiceListQuery, ServiceSort};
pub use user::{UserListQuery, UserSort};

/// Largest page size the console ever requests.
pub const MAX_PER_PAGE: usize = 100;

/// Query-string parameters in the order they are sent.
pub type QueryPairs = Vec<(&'static str, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Builds a pagination window, forcing `page >= 1` and
    /// `1 <= per_page <= MAX_PER_PAGE`.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}

/// Column a list endpoint may be sorted by.
pub trait SortField: Copy {
    fn as_str(self) -> &'static str;
}

macro_rules! sort_field {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $crate::repository::SortField for $name {
            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(()),
                }
            }
        }
    };
}
pub(crate) use sort_field;

/// Related resource embedded through the `include` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Client,
    Pet,
    Pets,
    Service,
    User,
}

impl Relation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Relation::Client => "client",
            Relation::Pet => "pet",
            Relation::Pets => "pets",
            Relation::Service => "service",
            Relation::User => "user",
        }
    }
}

/// Renders the `include` parameter, or nothing when no relation is requested.
pub fn include_pair(include: &[Relation]) -> Option<(&'static str, String)> {
    if include.is_empty() {
        return None;
    }
    let joined = include
        .iter()
        .map(|relation| relation.as_str())
        .collect::<Vec<_>>()
        .join(",");
    Some(("include", joined))
}

/// Pagination, sorting and free-text search shared by every list endpoint.
#[derive(Debug, Clone)]
pub struct ListParams<S> {
    pub pagination: Option<Pagination>,
    pub sort: Option<(S, SortOrder)>,
    pub search: Option<String>,
}

impl<S> Default for ListParams<S> {
    fn default() -> Self {
        Self {
            pagination: None,
            sort: None,
            search: None,
        }
    }
}

impl<S: SortField> ListParams<S> {
    /// Emits `page`, `per_page`, `sort_by`, `sort_order` and `search`.
    pub fn push_pairs(&self, pairs: &mut QueryPairs) {
        if let Some(pagination) = self.pagination {
            pairs.push(("page", pagination.page.to_string()));
            pairs.push(("per_page", pagination.per_page.to_string()));
        }
        if let Some((field, order)) = self.sort {
            pairs.push(("sort_by", field.as_str().to_string()));
            pairs.push(("sort_order", order.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
    }
}

/// Generates the builder methods shared by all list queries.
macro_rules! list_query_builders {
    ($sort:ty) => {
        pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
            self.params.pagination = Some($crate::repository::Pagination::new(page, per_page));
            self
        }

        pub fn sort(mut self, field: $sort, order: $crate::repository::SortOrder) -> Self {
            self.params.sort = Some((field, order));
            self
        }

        /// Sets the free-text search term; blank input clears it.
        pub fn search(mut self, term: impl Into<String>) -> Self {
            let term = term.into().trim().to_string();
            self.params.search = if term.is_empty() { None } else { Some(term) };
            self
        }
    };
}
pub(crate) use list_query_builders;

/// Filter object that can be rendered as list query parameters.
pub trait ListQuery {
    fn query_pairs(&self) -> QueryPairs;

    /// Query string in wire form, e.g. `page=2&per_page=20&search=rex`.
    fn query_string(&self) -> String {
        encode_query(&self.query_pairs())
    }
}

/// URL-encodes query pairs.
pub fn encode_query(pairs: &[(&'static str, String)]) -> String {
    serde_html_form::to_string(pairs).unwrap_or_default()
}

/// One page of a list endpoint together with its envelope metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Keeps only the items matching `predicate`, leaving the metadata as
    /// reported by the backend.
    pub fn retain(mut self, predicate: impl FnMut(&T) -> bool) -> Self {
        self.items.retain(predicate);
        self
    }
}

pub trait AppointmentReader {
    async fn get_appointment(
        &self,
        id: AppointmentId,
        include: &[Relation],
    ) -> RepositoryResult<Option<Appointment>>;
    async fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> RepositoryResult<Page<Appointment>>;
}

pub trait AppointmentWriter {
    async fn create_appointment(&self, new: &NewAppointment) -> RepositoryResult<Appointment>;
    async fn update_appointment(
        &self,
        id: AppointmentId,
        updates: &UpdateAppointment,
    ) -> RepositoryResult<Appointment>;
    async fn update_appointment_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> RepositoryResult<Appointment>;
    async fn delete_appointment(&self, id: AppointmentId) -> RepositoryResult<()>;
}

pub trait ClientReader {
    async fn get_client(&self, id: ClientId, include: &[Relation])
    -> RepositoryResult<Option<Client>>;
    async fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Page<Client>>;
}

pub trait ClientWriter {
    async fn create_client(&self, new: &NewClient) -> RepositoryResult<Client>;
    async fn update_client(&self, id: ClientId, updates: &UpdateClient)
    -> RepositoryResult<Client>;
    async fn delete_client(&self, id: ClientId) -> RepositoryResult<()>;
}

pub trait PetReader {
    async fn get_pet(&self, id: PetId, include: &[Relation]) -> RepositoryResult<Option<Pet>>;
    async fn list_pets(&self, query: PetListQuery) -> RepositoryResult<Page<Pet>>;
}

pub trait PetWriter {
    async fn create_pet(&self, new: &NewPet) -> RepositoryResult<Pet>;
    async fn update_pet(&self, id: PetId, updates: &UpdatePet) -> RepositoryResult<Pet>;
    async fn delete_pet(&self, id: PetId) -> RepositoryResult<()>;
}

pub trait ProductReader {
    async fn get_product(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    async fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Page<Product>>;
}

pub trait ProductWriter {
    async fn create_product(&self, new: &NewProduct) -> RepositoryResult<Product>;
    async fn update_product(
        &self,
        id: ProductId,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    async fn set_product_active(&self, id: ProductId, is_active: bool)
    -> RepositoryResult<Product>;
    async fn delete_product(&self, id: ProductId) -> RepositoryResult<()>;
}

pub trait ServiceReader {
    async fn get_service(&self, id: ServiceId) -> RepositoryResult<Option<Service>>;
    async fn list_services(&self, query: ServiceListQuery) -> RepositoryResult<Page<Service>>;
}

pub trait ServiceWriter {
    async fn create_service(&self, new: &NewService) -> RepositoryResult<Service>;
    async fn update_service(
        &self,
        id: ServiceId,
        updates: &UpdateService,
    ) -> RepositoryResult<Service>;
    async fn set_service_active(&self, id: ServiceId, is_active: bool)
    -> RepositoryResult<Service>;
    async fn delete_service(&self, id: ServiceId) -> RepositoryResult<()>;
}

pub trait UserReader {
    async fn get_user(&self, id: UserId) -> RepositoryResult<Option<User>>;
    async fn list_users(&self, query: UserListQuery) -> RepositoryResult<Page<User>>;
}

pub trait UserWriter {
    async fn create_user(&self, new: &NewUser) -> RepositoryResult<User>;
    async fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User>;
    async fn set_user_active(&self, id: UserId, is_active: bool) -> RepositoryResult<User>;
    async fn delete_user(&self, id: UserId) -> RepositoryResult<()>;
}
