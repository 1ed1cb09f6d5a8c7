//! Pet list and pet modal workflows.

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::pet::{NewPet, Pet};
use crate::domain::types::{ClientId, PetId};
use crate::dto::pets::{PetModalData, PetsPageData, PetsQuery};
use crate::forms::pets::PetForm;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{
    ClientReader, PetListQuery, PetReader, PetSort, PetWriter, Relation, SortOrder,
};
use crate::services::{ServiceError, ServiceResult, parse_id, parse_sort};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub async fn load_pets_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: PetsQuery,
) -> ServiceResult<PetsPageData>
where
    R: PetReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let (sort_by, sort_order) = parse_sort(query.sort_by.as_deref(), query.sort_order.as_deref())
        .unwrap_or((PetSort::Name, SortOrder::Asc));

    let mut list_query = PetListQuery::new()
        .paginate(query.page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE)
        .sort(sort_by, sort_order)
        .search(query.search.clone().unwrap_or_default())
        .species(query.species.clone().unwrap_or_default())
        .include(&[Relation::Client]);

    if let Some(client_id) = parse_id::<ClientId>(query.client_id.as_deref()) {
        list_query = list_query.client(client_id);
    }

    let pets = repo.list_pets(list_query).await.map_err(|err| {
        log::error!("Failed to list pets: {err}");
        err
    })?;

    Ok(PetsPageData {
        pets: pets.into(),
        filters: query,
    })
}

/// Loads the pet modal. New pets may come with a preselected owner when the
/// modal is opened from a client card.
pub async fn load_pet_modal<R>(
    repo: &R,
    user: &AuthenticatedUser,
    pet_id: Option<i32>,
    client_id: Option<i32>,
) -> ServiceResult<PetModalData>
where
    R: PetReader + ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let pet = match pet_id {
        Some(id) => Some(
            repo.get_pet(PetId::new(id)?, &[Relation::Client])
                .await?
                .ok_or(ServiceError::NotFound)?,
        ),
        None => None,
    };

    let owner_id = match &pet {
        Some(pet) => Some(pet.client_id),
        None => client_id.map(ClientId::new).transpose()?,
    };

    let owner = match owner_id {
        Some(id) => repo.get_client(id, &[]).await.map_err(|err| {
            log::error!("Failed to load owner {id}: {err}");
            err
        })?,
        None => None,
    };

    Ok(PetModalData { pet, owner })
}

pub async fn create_pet<R>(repo: &R, user: &AuthenticatedUser, form: PetForm) -> ServiceResult<Pet>
where
    R: PetWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let new_pet = NewPet::try_from(form)?;

    let pet = repo.create_pet(&new_pet).await.map_err(|err| {
        log::error!("Failed to add a pet: {err}");
        err
    })?;

    Ok(pet)
}

pub async fn update_pet<R>(
    repo: &R,
    user: &AuthenticatedUser,
    pet_id: i32,
    form: PetForm,
) -> ServiceResult<Pet>
where
    R: PetWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let id = PetId::new(pet_id)?;
    let updates = NewPet::try_from(form)?;

    let pet = repo.update_pet(id, &updates).await.map_err(|err| {
        log::error!("Failed to update pet {id}: {err}");
        err
    })?;

    Ok(pet)
}

pub async fn delete_pet<R>(repo: &R, user: &AuthenticatedUser, pet_id: i32) -> ServiceResult<()>
where
    R: PetWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let id = PetId::new(pet_id)?;

    repo.delete_pet(id).await.map_err(|err| {
        log::error!("Failed to delete pet {id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fake::{
        FakeRepository, admin_user, front_desk_user, sample_client, sample_pet,
    };

    fn pet_form(client_id: &str) -> PetForm {
        PetForm {
            client_id: Some(client_id.to_string()),
            name: "Biscuit".to_string(),
            species: "dog".to_string(),
            breed: None,
            sex: None,
            date_of_birth: None,
            weight_kg: None,
            notes: None,
            return_to: None,
        }
    }

    #[actix_web::test]
    async fn pets_page_filters_by_species_and_owner() {
        let repo = FakeRepository::default();
        repo.pets.replace(vec![
            sample_pet(1, 1, "Biscuit", "dog"),
            sample_pet(2, 1, "Misty", "cat"),
            sample_pet(3, 2, "Rex", "dog"),
        ]);

        let data = load_pets_page(
            &repo,
            &front_desk_user(),
            PetsQuery {
                species: Some("Dog".to_string()),
                client_id: Some("1".to_string()),
                ..PetsQuery::default()
            },
        )
        .await
        .unwrap();

        let names: Vec<_> = data.pets.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Biscuit"]);
    }

    #[actix_web::test]
    async fn new_pet_modal_preselects_owner() {
        let repo = FakeRepository::default();
        repo.clients.replace(vec![sample_client(4, "Oskar", "Berg")]);

        let data = load_pet_modal(&repo, &front_desk_user(), None, Some(4))
            .await
            .unwrap();

        assert!(data.pet.is_none());
        assert_eq!(data.owner.unwrap().last_name.as_str(), "Berg");
    }

    #[actix_web::test]
    async fn edit_modal_uses_the_pets_owner() {
        let repo = FakeRepository::default();
        repo.clients.replace(vec![
            sample_client(1, "Maria", "Lind"),
            sample_client(4, "Oskar", "Berg"),
        ]);
        repo.pets.replace(vec![sample_pet(9, 1, "Biscuit", "dog")]);

        let data = load_pet_modal(&repo, &front_desk_user(), Some(9), Some(4))
            .await
            .unwrap();

        assert_eq!(data.owner.unwrap().id.get(), 1);
    }

    #[actix_web::test]
    async fn create_update_delete_pet() {
        let repo = FakeRepository::default();

        let pet = create_pet(&repo, &front_desk_user(), pet_form("3"))
            .await
            .unwrap();
        update_pet(&repo, &front_desk_user(), pet.id.get(), pet_form("5"))
            .await
            .unwrap();
        delete_pet(&repo, &admin_user(), pet.id.get()).await.unwrap();

        assert_eq!(
            repo.writes.borrow().as_slice(),
            ["POST pets client=3", "PUT pets/1", "DELETE pets/1"]
        );
    }

    #[actix_web::test]
    async fn missing_owner_is_reported() {
        let repo = FakeRepository::default();

        let result = create_pet(&repo, &front_desk_user(), pet_form("")).await;

        assert_eq!(
            result.unwrap_err(),
            ServiceError::Form("Please select a client".to_string())
        );
    }
}
