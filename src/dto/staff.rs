use serde::{Deserialize, Serialize};

use crate::domain::user::User;
use crate::pagination::Paginated;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct StaffQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub role: Option<String>,
    pub active: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Staff list where every user carries `appointments_count` when it could be
/// loaded.
#[derive(Debug)]
pub struct StaffPageData {
    pub users: Paginated<User>,
    pub roles: [&'static str; 4],
    pub filters: StaffQuery,
}
