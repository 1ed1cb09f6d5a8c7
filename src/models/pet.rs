use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::client::ClientSummary as DomainClientSummary;
use crate::domain::pet::{NewPet as DomainNewPet, Pet as DomainPet, PetSex, PetSummary as DomainPetSummary};
use crate::domain::types::{
    ClientId, Notes, PetId, PetName, Species, TypeConstraintError, WeightKg,
};
use crate::models::client::ClientSummary;
use crate::models::non_blank;

#[derive(Debug, Clone, Deserialize)]
/// Pet record as returned by `GET /pets`.
pub struct Pet {
    pub id: i32,
    pub client_id: i32,
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub client: Option<ClientSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PetSummary {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
}

#[derive(Debug, Serialize)]
/// Body of `POST /pets` and `PUT /pets/{id}`.
pub struct PetPayload<'a> {
    pub client_id: i32,
    pub name: &'a str,
    pub species: &'a str,
    pub breed: Option<&'a str>,
    pub sex: &'static str,
    pub date_of_birth: Option<NaiveDate>,
    pub weight_kg: Option<f64>,
    pub notes: Option<&'a str>,
}

impl TryFrom<Pet> for DomainPet {
    type Error = TypeConstraintError;

    fn try_from(pet: Pet) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PetId::try_from(pet.id)?,
            client_id: ClientId::try_from(pet.client_id)?,
            name: PetName::new(pet.name)?,
            species: Species::new(pet.species)?,
            breed: non_blank(pet.breed),
            sex: pet.sex.as_deref().map(PetSex::from).unwrap_or_default(),
            date_of_birth: pet.date_of_birth,
            weight_kg: pet.weight_kg.and_then(|w| WeightKg::new(w).ok()),
            notes: Notes::from_optional(pet.notes),
            client: pet
                .client
                .map(DomainClientSummary::try_from)
                .transpose()?,
            created_at: pet.created_at,
            updated_at: pet.updated_at,
        })
    }
}

impl TryFrom<PetSummary> for DomainPetSummary {
    type Error = TypeConstraintError;

    fn try_from(summary: PetSummary) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PetId::try_from(summary.id)?,
            name: PetName::new(summary.name)?,
            species: non_blank(summary.species)
                .map(Species::new)
                .transpose()?,
        })
    }
}

impl<'a> From<&'a DomainNewPet> for PetPayload<'a> {
    fn from(pet: &'a DomainNewPet) -> Self {
        Self {
            client_id: pet.client_id.get(),
            name: pet.name.as_str(),
            species: pet.species.as_str(),
            breed: pet.breed.as_deref(),
            sex: pet.sex.as_str(),
            date_of_birth: pet.date_of_birth,
            weight_kg: pet.weight_kg.map(WeightKg::get),
            notes: pet.notes.as_ref().map(Notes::as_str),
        }
    }
}
