use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{EmailAddress, PersonName, PhoneNumber, TypeConstraintError, UserId};
use crate::domain::user::{
    NewUser as DomainNewUser, User as DomainUser, UserRole, UserSummary as DomainUserSummary,
};
use crate::models::non_blank;
use crate::models::product::default_active;

#[derive(Debug, Clone, Deserialize)]
/// Staff record as returned by `GET /users`.
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize)]
/// Body of `POST /users` and `PUT /users/{id}`.
pub struct UserPayload<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub role: &'a str,
    pub is_active: bool,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::try_from(user.id)?,
            name: PersonName::new(user.name)?,
            email: EmailAddress::new(user.email)?,
            phone: non_blank(user.phone).and_then(|phone| PhoneNumber::new(phone).ok()),
            role: UserRole::from(user.role),
            is_active: user.is_active,
            appointments_count: None,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}

impl TryFrom<UserSummary> for DomainUserSummary {
    type Error = TypeConstraintError;

    fn try_from(summary: UserSummary) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::try_from(summary.id)?,
            name: PersonName::new(summary.name)?,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for UserPayload<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            name: user.name.as_str(),
            email: user.email.as_str(),
            phone: user.phone.as_ref().map(PhoneNumber::as_str),
            role: user.role.as_str(),
            is_active: user.is_active,
        }
    }
}
