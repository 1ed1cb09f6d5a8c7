use serde::{Deserialize, Serialize};

use crate::domain::appointment::Appointment;
use crate::domain::client::Client;
use crate::domain::pet::Pet;
use crate::pagination::Paginated;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ClientsQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug)]
pub struct ClientsPageData {
    pub clients: Paginated<Client>,
    pub filters: ClientsQuery,
}

/// Client card with the pets and the latest visits.
#[derive(Debug)]
pub struct ClientPageData {
    pub client: Client,
    pub pets: Vec<Pet>,
    pub recent_appointments: Vec<Appointment>,
}
