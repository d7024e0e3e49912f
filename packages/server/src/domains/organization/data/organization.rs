use chrono::{DateTime, Utc};
use juniper::GraphQLObject;
use serde::{Deserialize, Serialize};

use crate::domains::organization::models::Organization;

/// Organization GraphQL data type
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "A tenant organization")]
pub struct OrganizationData {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// When the organization was created
    pub created_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationData {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id.to_string(),
            name: org.name,
            created_at: org.created_at,
        }
    }
}
