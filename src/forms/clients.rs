use serde::Deserialize;
use validator::Validate;

use crate::domain::client::NewClient;
use crate::domain::types::{EmailAddress, Notes, PersonName, PhoneNumber};
use crate::forms::FormError;
use crate::models::non_blank;

#[derive(Debug, Deserialize, Validate)]
/// Client modal form, used for both creating and editing.
pub struct ClientForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<ClientForm> for NewClient {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let first_name = PersonName::new(form.first_name).map_err(|_| FormError::InvalidName)?;
        let last_name = PersonName::new(form.last_name).map_err(|_| FormError::InvalidName)?;
        let email = non_blank(form.email)
            .map(EmailAddress::new)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;
        let phone = non_blank(form.phone)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;

        Ok(NewClient::new(
            first_name,
            last_name,
            email,
            phone,
            form.address,
            Notes::from_optional(form.notes),
        ))
    }
}
