use chrono::{DateTime, Utc};
use juniper::GraphQLObject;
use serde::{Deserialize, Serialize};

use crate::domains::client::models::{Client, ClientEmail, ClientPhone};

/// Client phone GraphQL data type
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "A phone number attached to a client")]
pub struct ClientPhoneData {
    pub id: String,
    /// 'mobile' or 'home'
    pub phone_type: String,
    pub phone_number: String,
    pub has_whatsapp: bool,
}

impl From<ClientPhone> for ClientPhoneData {
    fn from(phone: ClientPhone) -> Self {
        Self {
            id: phone.id.to_string(),
            phone_type: phone.phone_type,
            phone_number: phone.phone_number,
            has_whatsapp: phone.has_whatsapp,
        }
    }
}

/// Client email GraphQL data type
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "An email address attached to a client")]
pub struct ClientEmailData {
    pub id: String,
    pub email: String,
}

impl From<ClientEmail> for ClientEmailData {
    fn from(email: ClientEmail) -> Self {
        Self {
            id: email.id.to_string(),
            email: email.email,
        }
    }
}

/// Client GraphQL data type
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "A person the organization works with")]
pub struct ClientData {
    /// Unique identifier
    pub id: String,

    /// Organization the client belongs to
    pub organization_id: String,

    pub first_name: String,

    pub last_name: String,

    /// 'buyer', 'owner', or 'renter'
    pub client_type: String,

    /// Whether the client opted into email updates
    pub receives_email: bool,

    /// Contact phone numbers, keyed by type
    pub phones: Vec<ClientPhoneData>,

    /// Contact email addresses
    pub emails: Vec<ClientEmailData>,

    pub created_at: DateTime<Utc>,
}

impl ClientData {
    pub fn from_parts(client: Client, phones: Vec<ClientPhone>, emails: Vec<ClientEmail>) -> Self {
        Self {
            id: client.id.to_string(),
            organization_id: client.organization_id.to_string(),
            first_name: client.first_name,
            last_name: client.last_name,
            client_type: client.client_type,
            receives_email: client.receives_email,
            phones: phones.into_iter().map(Into::into).collect(),
            emails: emails.into_iter().map(Into::into).collect(),
            created_at: client.created_at,
        }
    }
}
