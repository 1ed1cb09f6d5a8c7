use reqwest::Method;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::models::client::{Client as WireClient, ClientPayload};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientReader, ClientWriter, HttpRepository, ListParams, ListQuery, Page, QueryPairs, Relation,
    include_pair, list_query_builders, sort_field,
};

sort_field!(ClientSort {
    LastName => "last_name",
    FirstName => "first_name",
    CreatedAt => "created_at",
});

#[derive(Debug, Clone, Default)]
pub struct ClientListQuery {
    pub params: ListParams<ClientSort>,
    pub include: Vec<Relation>,
}

impl ClientListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    list_query_builders!(ClientSort);

    pub fn include(mut self, relations: &[Relation]) -> Self {
        self.include.extend_from_slice(relations);
        self
    }
}

impl ListQuery for ClientListQuery {
    fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        self.params.push_pairs(&mut pairs);
        pairs.extend(include_pair(&self.include));
        pairs
    }
}

impl ClientReader for HttpRepository {
    async fn get_client(
        &self,
        id: ClientId,
        include: &[Relation],
    ) -> RepositoryResult<Option<Client>> {
        let pairs = include_pair(include).into_iter().collect();
        self.fetch_one::<WireClient, _>(&format!("clients/{id}"), pairs)
            .await
    }

    async fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Page<Client>> {
        self.fetch_page::<WireClient, _>("clients", query.query_pairs())
            .await
    }
}

impl ClientWriter for HttpRepository {
    async fn create_client(&self, new: &NewClient) -> RepositoryResult<Client> {
        self.send::<_, WireClient, _>(Method::POST, "clients", &ClientPayload::from(new))
            .await
    }

    async fn update_client(
        &self,
        id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        self.send::<_, WireClient, _>(
            Method::PUT,
            &format!("clients/{id}"),
            &ClientPayload::from(updates),
        )
        .await
    }

    async fn delete_client(&self, id: ClientId) -> RepositoryResult<()> {
        self.remove(&format!("clients/{id}")).await
    }
}
