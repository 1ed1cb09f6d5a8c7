use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{DurationMinutes, Price, ServiceId, ServiceName};

/// Bookable clinic service such as a consultation or vaccination.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: ServiceId,
    pub name: ServiceName,
    pub description: Option<String>,
    pub price: Price,
    pub duration_minutes: DurationMinutes,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ServiceSummary {
    pub id: ServiceId,
    pub name: ServiceName,
    pub price: Option<Price>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewService {
    pub name: ServiceName,
    pub description: Option<String>,
    pub price: Price,
    pub duration_minutes: DurationMinutes,
    pub is_active: bool,
}

pub type UpdateService = NewService;
