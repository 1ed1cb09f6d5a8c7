use serde::Deserialize;
use validator::Validate;

use crate::domain::service::NewService;
use crate::domain::types::{DurationMinutes, Price, ServiceName};
use crate::forms::{FormError, checkbox, number};
use crate::models::non_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct ServiceForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<String>,
    #[serde(default)]
    pub is_active: Option<String>,
}

impl TryFrom<ServiceForm> for NewService {
    type Error = FormError;

    fn try_from(form: ServiceForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let price = number(form.price.as_deref(), FormError::InvalidPrice)?;
        let duration = number(form.duration_minutes.as_deref(), FormError::InvalidDuration)?;

        Ok(NewService {
            is_active: checkbox(&form.is_active),
            name: ServiceName::new(form.name).map_err(|_| FormError::InvalidName)?,
            description: non_blank(form.description),
            price: Price::new(price).map_err(|_| FormError::InvalidPrice)?,
            duration_minutes: DurationMinutes::new(duration)
                .map_err(|_| FormError::InvalidDuration)?,
        })
    }
}
