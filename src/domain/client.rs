use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::pet::PetSummary;
use crate::domain::types::{ClientId, EmailAddress, Notes, PersonName, PhoneNumber};

/// Pet owner registered at the clinic.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub notes: Option<Notes>,
    /// Embedded when the request asked for `include=pets`.
    pub pets: Option<Vec<PetSummary>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    #[must_use]
    pub fn summary(&self) -> ClientSummary {
        ClientSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

/// Short client representation embedded in pets and appointments.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClientSummary {
    pub id: ClientId,
    pub first_name: PersonName,
    pub last_name: PersonName,
}

impl ClientSummary {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewClient {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub notes: Option<Notes>,
}

impl NewClient {
    #[must_use]
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: Option<EmailAddress>,
        phone: Option<PhoneNumber>,
        address: Option<String>,
        notes: Option<Notes>,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            phone,
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            notes,
        }
    }
}

/// Full replacement of the editable client fields, sent with PUT.
pub type UpdateClient = NewClient;
