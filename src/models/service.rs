use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::service::{
    NewService as DomainNewService, Service as DomainService,
    ServiceSummary as DomainServiceSummary,
};
use crate::domain::types::{DurationMinutes, Price, ServiceId, ServiceName, TypeConstraintError};
use crate::models::non_blank;
use crate::models::product::default_active;

#[derive(Debug, Clone, Deserialize)]
/// Service record as returned by `GET /services`.
pub struct Service {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub duration_minutes: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSummary {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Serialize)]
/// Body of `POST /services` and `PUT /services/{id}`.
pub struct ServicePayload<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: f64,
    pub duration_minutes: i32,
    pub is_active: bool,
}

impl TryFrom<Service> for DomainService {
    type Error = TypeConstraintError;

    fn try_from(service: Service) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ServiceId::try_from(service.id)?,
            name: ServiceName::new(service.name)?,
            description: non_blank(service.description),
            price: Price::new(service.price)?,
            duration_minutes: DurationMinutes::new(service.duration_minutes)?,
            is_active: service.is_active,
            created_at: service.created_at,
            updated_at: service.updated_at,
        })
    }
}

impl TryFrom<ServiceSummary> for DomainServiceSummary {
    type Error = TypeConstraintError;

    fn try_from(summary: ServiceSummary) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ServiceId::try_from(summary.id)?,
            name: ServiceName::new(summary.name)?,
            price: summary.price.and_then(|price| Price::new(price).ok()),
        })
    }
}

impl<'a> From<&'a DomainNewService> for ServicePayload<'a> {
    fn from(service: &'a DomainNewService) -> Self {
        Self {
            name: service.name.as_str(),
            description: service.description.as_deref(),
            price: service.price.get(),
            duration_minutes: service.duration_minutes.get(),
            is_active: service.is_active,
        }
    }
}
