//! DTOs used by the appointment pages and the booking modal.

use serde::{Deserialize, Serialize};

use crate::domain::appointment::{Appointment, AppointmentStatus};
use crate::domain::client::Client;
use crate::domain::pet::Pet;
use crate::domain::service::Service;
use crate::domain::user::User;
use crate::pagination::Paginated;

/// Filters of the appointments index, echoed back into the filter bar.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct AppointmentsQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub status: Option<String>,
    pub user_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug)]
pub struct AppointmentsPageData {
    pub appointments: Paginated<Appointment>,
    pub veterinarians: Vec<User>,
    pub statuses: &'static [AppointmentStatus],
    pub filters: AppointmentsQuery,
}

/// State of the dependent dropdowns inside the booking modal.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct BookingQuery {
    pub client_id: Option<String>,
    pub client_search: Option<String>,
    pub client_page: Option<usize>,
    pub service_search: Option<String>,
    pub staff_search: Option<String>,
}

/// Options offered by the booking modal.
#[derive(Debug, Serialize)]
pub struct BookingOptions {
    pub clients: Paginated<Client>,
    /// Owner whose pets are listed; `None` until a client is picked.
    pub selected_client: Option<Client>,
    pub pets: Vec<Pet>,
    pub services: Vec<Service>,
    pub veterinarians: Vec<User>,
}

#[derive(Debug)]
pub struct AppointmentModalData {
    pub appointment: Option<Appointment>,
    pub options: BookingOptions,
    pub statuses: &'static [AppointmentStatus],
}
