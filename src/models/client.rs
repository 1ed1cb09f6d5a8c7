use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::client::{
    Client as DomainClient, ClientSummary as DomainClientSummary, NewClient as DomainNewClient,
};
use crate::domain::types::{
    ClientId, EmailAddress, Notes, PersonName, PhoneNumber, TypeConstraintError,
};
use crate::models::non_blank;
use crate::models::pet::PetSummary;

#[derive(Debug, Clone, Deserialize)]
/// Client record as returned by `GET /clients`.
pub struct Client {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub pets: Option<Vec<PetSummary>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientSummary {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize)]
/// Body of `POST /clients` and `PUT /clients/{id}`.
pub struct ClientPayload<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub notes: Option<&'a str>,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        let pets = client
            .pets
            .map(|pets| {
                pets.into_iter()
                    .map(TryInto::try_into)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            id: ClientId::try_from(client.id)?,
            first_name: PersonName::new(client.first_name)?,
            last_name: PersonName::new(client.last_name)?,
            email: non_blank(client.email).and_then(|email| EmailAddress::new(email).ok()),
            phone: non_blank(client.phone).and_then(|phone| PhoneNumber::new(phone).ok()),
            address: non_blank(client.address),
            notes: Notes::from_optional(client.notes),
            pets,
            created_at: client.created_at,
            updated_at: client.updated_at,
        })
    }
}

impl TryFrom<ClientSummary> for DomainClientSummary {
    type Error = TypeConstraintError;

    fn try_from(summary: ClientSummary) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::try_from(summary.id)?,
            first_name: PersonName::new(summary.first_name)?,
            last_name: PersonName::new(summary.last_name)?,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for ClientPayload<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            first_name: client.first_name.as_str(),
            last_name: client.last_name.as_str(),
            email: client.email.as_ref().map(EmailAddress::as_str),
            phone: client.phone.as_ref().map(PhoneNumber::as_str),
            address: client.address.as_deref(),
            notes: client.notes.as_ref().map(Notes::as_str),
        }
    }
}
