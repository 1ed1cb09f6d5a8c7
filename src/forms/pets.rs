use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::pet::{NewPet, PetSex};
use crate::domain::types::{Notes, PetName, Species, WeightKg};
use crate::forms::{FormError, selection};
use crate::models::non_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct PetForm {
    /// Owner picked in the modal, fixed when it was opened from a client card.
    #[serde(default)]
    pub client_id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub species: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    /// `YYYY-MM-DD` from a date input, blank when unknown.
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// Kept as text so an empty input does not fail deserialization.
    #[serde(default)]
    pub weight_kg: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub return_to: Option<String>,
}

fn parse_birth_date(value: &str) -> Result<NaiveDate, FormError> {
    let date =
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| FormError::InvalidDate)?;
    if date > Utc::now().date_naive() {
        return Err(FormError::InvalidDate);
    }
    Ok(date)
}

fn parse_weight(value: &str) -> Result<WeightKg, FormError> {
    let kg = value
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| FormError::InvalidWeight)?;
    WeightKg::new(kg).map_err(|_| FormError::InvalidWeight)
}

impl TryFrom<PetForm> for NewPet {
    type Error = FormError;

    fn try_from(form: PetForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewPet {
            client_id: selection(form.client_id.as_deref(), "client")?,
            name: PetName::new(form.name).map_err(|_| FormError::InvalidName)?,
            species: Species::new(form.species.to_lowercase())
                .map_err(|_| FormError::InvalidName)?,
            breed: non_blank(form.breed),
            sex: form.sex.as_deref().map(PetSex::from).unwrap_or_default(),
            date_of_birth: non_blank(form.date_of_birth)
                .as_deref()
                .map(parse_birth_date)
                .transpose()?,
            weight_kg: non_blank(form.weight_kg)
                .as_deref()
                .map(parse_weight)
                .transpose()?,
            notes: Notes::from_optional(form.notes),
        })
    }
}
