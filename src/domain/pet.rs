use std::fmt::Display;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::client::ClientSummary;
use crate::domain::types::{ClientId, Notes, PetId, PetName, Species, WeightKg};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PetSex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl PetSex {
    pub const fn as_str(self) -> &'static str {
        match self {
            PetSex::Male => "male",
            PetSex::Female => "female",
            PetSex::Unknown => "unknown",
        }
    }
}

impl Display for PetSex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for PetSex {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => PetSex::Male,
            "female" | "f" => PetSex::Female,
            _ => PetSex::Unknown,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    pub id: PetId,
    pub client_id: ClientId,
    pub name: PetName,
    pub species: Species,
    pub breed: Option<String>,
    pub sex: PetSex,
    pub date_of_birth: Option<NaiveDate>,
    pub weight_kg: Option<WeightKg>,
    pub notes: Option<Notes>,
    /// Owner summary, embedded when requested with `include=client`.
    pub client: Option<ClientSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Age in whole years on the given day, when the birth date is known.
    #[must_use]
    pub fn age_years(&self, today: NaiveDate) -> Option<u32> {
        self.date_of_birth
            .and_then(|born| today.years_since(born))
    }
}

/// Short pet representation embedded in clients and appointments.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PetSummary {
    pub id: PetId,
    pub name: PetName,
    pub species: Option<Species>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewPet {
    pub client_id: ClientId,
    pub name: PetName,
    pub species: Species,
    pub breed: Option<String>,
    pub sex: PetSex,
    pub date_of_birth: Option<NaiveDate>,
    pub weight_kg: Option<WeightKg>,
    pub notes: Option<Notes>,
}

pub type UpdatePet = NewPet;
