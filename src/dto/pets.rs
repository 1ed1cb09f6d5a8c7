use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::pet::Pet;
use crate::pagination::Paginated;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct PetsQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub species: Option<String>,
    pub client_id: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug)]
pub struct PetsPageData {
    pub pets: Paginated<Pet>,
    pub filters: PetsQuery,
}

#[derive(Debug)]
pub struct PetModalData {
    pub pet: Option<Pet>,
    /// Current or preselected owner shown in the owner dropdown.
    pub owner: Option<Client>,
}
