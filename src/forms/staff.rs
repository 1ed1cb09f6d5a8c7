use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{EmailAddress, PersonName, PhoneNumber};
use crate::domain::user::{NewUser, UserRole};
use crate::forms::{FormError, checkbox};
use crate::models::non_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct UserForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(min = 1))]
    pub role: String,
    #[serde(default)]
    pub is_active: Option<String>,
}

impl TryFrom<UserForm> for NewUser {
    type Error = FormError;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewUser {
            is_active: checkbox(&form.is_active),
            name: PersonName::new(form.name).map_err(|_| FormError::InvalidName)?,
            email: EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone: non_blank(form.phone)
                .map(PhoneNumber::new)
                .transpose()
                .map_err(|_| FormError::InvalidPhoneNumber)?,
            role: UserRole::from(form.role.trim().to_lowercase()),
        })
    }
}
