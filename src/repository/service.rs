use reqwest::Method;

use crate::domain::service::{NewService, Service, UpdateService};
use crate::domain::types::ServiceId;
use crate::models::product::ActivePayload;
use crate::models::service::{Service as WireService, ServicePayload};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    HttpRepository, ListParams, ListQuery, Page, QueryPairs, ServiceReader, ServiceWriter,
    list_query_builders, sort_field,
};

sort_field!(ServiceSort {
    Name => "name",
    Price => "price",
    Duration => "duration_minutes",
});

#[derive(Debug, Clone, Default)]
pub struct ServiceListQuery {
    pub params: ListParams<ServiceSort>,
    pub is_active: Option<bool>,
}

impl ServiceListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    list_query_builders!(ServiceSort);

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

impl ListQuery for ServiceListQuery {
    fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        self.params.push_pairs(&mut pairs);
        if let Some(is_active) = self.is_active {
            pairs.push(("is_active", is_active.to_string()));
        }
        pairs
    }
}

impl ServiceReader for HttpRepository {
    async fn get_service(&self, id: ServiceId) -> RepositoryResult<Option<Service>> {
        self.fetch_one::<WireService, _>(&format!("services/{id}"), QueryPairs::new())
            .await
    }

    async fn list_services(&self, query: ServiceListQuery) -> RepositoryResult<Page<Service>> {
        self.fetch_page::<WireService, _>("services", query.query_pairs())
            .await
    }
}

impl ServiceWriter for HttpRepository {
    async fn create_service(&self, new: &NewService) -> RepositoryResult<Service> {
        self.send::<_, WireService, _>(Method::POST, "services", &ServicePayload::from(new))
            .await
    }

    async fn update_service(
        &self,
        id: ServiceId,
        updates: &UpdateService,
    ) -> RepositoryResult<Service> {
        self.send::<_, WireService, _>(
            Method::PUT,
            &format!("services/{id}"),
            &ServicePayload::from(updates),
        )
        .await
    }

    async fn set_service_active(
        &self,
        id: ServiceId,
        is_active: bool,
    ) -> RepositoryResult<Service> {
        self.send::<_, WireService, _>(
            Method::PATCH,
            &format!("services/{id}"),
            &ActivePayload { is_active },
        )
        .await
    }

    async fn delete_service(&self, id: ServiceId) -> RepositoryResult<()> {
        self.remove(&format!("services/{id}")).await
    }
}
