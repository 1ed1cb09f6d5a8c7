use reqwest::Method;

use crate::domain::pet::{NewPet, Pet, UpdatePet};
use crate::domain::types::{ClientId, PetId};
use crate::models::pet::{Pet as WirePet, PetPayload};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    HttpRepository, ListParams, ListQuery, Page, PetReader, PetWriter, QueryPairs, Relation,
    include_pair, list_query_builders, sort_field,
};

sort_field!(PetSort {
    Name => "name",
    Species => "species",
    CreatedAt => "created_at",
});

#[derive(Debug, Clone, Default)]
pub struct PetListQuery {
    pub params: ListParams<PetSort>,
    pub client_id: Option<ClientId>,
    pub species: Option<String>,
    pub include: Vec<Relation>,
}

impl PetListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    list_query_builders!(PetSort);

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn species(mut self, species: impl Into<String>) -> Self {
        let species = species.into().trim().to_lowercase();
        self.species = (!species.is_empty()).then_some(species);
        self
    }

    pub fn include(mut self, relations: &[Relation]) -> Self {
        self.include.extend_from_slice(relations);
        self
    }
}

impl ListQuery for PetListQuery {
    fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        self.params.push_pairs(&mut pairs);
        if let Some(id) = self.client_id {
            pairs.push(("client_id", id.to_string()));
        }
        if let Some(species) = &self.species {
            pairs.push(("species", species.clone()));
        }
        pairs.extend(include_pair(&self.include));
        pairs
    }
}

impl PetReader for HttpRepository {
    async fn get_pet(&self, id: PetId, include: &[Relation]) -> RepositoryResult<Option<Pet>> {
        let pairs = include_pair(include).into_iter().collect();
        self.fetch_one::<WirePet, _>(&format!("pets/{id}"), pairs)
            .await
    }

    async fn list_pets(&self, query: PetListQuery) -> RepositoryResult<Page<Pet>> {
        self.fetch_page::<WirePet, _>("pets", query.query_pairs())
            .await
    }
}

impl PetWriter for HttpRepository {
    async fn create_pet(&self, new: &NewPet) -> RepositoryResult<Pet> {
        self.send::<_, WirePet, _>(Method::POST, "pets", &PetPayload::from(new))
            .await
    }

    async fn update_pet(&self, id: PetId, updates: &UpdatePet) -> RepositoryResult<Pet> {
        self.send::<_, WirePet, _>(Method::PUT, &format!("pets/{id}"), &PetPayload::from(updates))
            .await
    }

    async fn delete_pet(&self, id: PetId) -> RepositoryResult<()> {
        self.remove(&format!("pets/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pet_query_filters_by_owner_and_species() {
        let query = PetListQuery::new()
            .client(ClientId::new(12).unwrap())
            .species(" Cat ")
            .include(&[Relation::Client]);

        assert_eq!(
            query.query_pairs(),
            vec![
                ("client_id", "12".to_string()),
                ("species", "cat".to_string()),
                ("include", "client".to_string()),
            ]
        );
    }

    #[test]
    fn blank_species_is_ignored() {
        assert!(PetListQuery::new().species(" ").species.is_none());
    }
}
