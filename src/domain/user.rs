use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{EmailAddress, PersonName, PhoneNumber, UserId};

/// Staff role as reported by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    Admin,
    Veterinarian,
    Receptionist,
    Technician,
    Other(String),
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Veterinarian => "veterinarian",
            UserRole::Receptionist => "receptionist",
            UserRole::Technician => "technician",
            UserRole::Other(s) => s,
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            "admin" => UserRole::Admin,
            "veterinarian" | "vet" => UserRole::Veterinarian,
            "receptionist" => UserRole::Receptionist,
            "technician" => UserRole::Technician,
            _ => UserRole::Other(s.to_string()),
        }
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

/// Staff member with access to the clinic systems.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub role: UserRole,
    pub is_active: bool,
    /// Number of appointments assigned to the user, filled in by the staff
    /// page after the base list is loaded.
    pub appointments_count: Option<usize>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    pub id: UserId,
    pub name: PersonName,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub role: UserRole,
    pub is_active: bool,
}

pub type UpdateUser = NewUser;
