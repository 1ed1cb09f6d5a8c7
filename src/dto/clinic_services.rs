use serde::{Deserialize, Serialize};

use crate::domain::service::Service;
use crate::pagination::Paginated;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ServicesQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub active: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug)]
pub struct ServicesPageData {
    pub services: Paginated<Service>,
    pub filters: ServicesQuery,
}
