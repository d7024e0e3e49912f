use chrono::{DateTime, Utc};
use juniper::GraphQLObject;
use serde::{Deserialize, Serialize};

use crate::domains::member::models::Member;

/// Member GraphQL data type
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "A CRM user (agent) within an organization")]
pub struct MemberData {
    /// Unique identifier
    pub id: String,

    /// Organization the member belongs to
    pub organization_id: String,

    /// Display name shown in the CRM
    pub display_name: String,

    /// Login / contact email
    pub email: String,

    /// Whether the member can administer the organization
    pub is_admin: bool,

    /// When the member was created
    pub created_at: DateTime<Utc>,
}

impl From<Member> for MemberData {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.to_string(),
            organization_id: member.organization_id.to_string(),
            display_name: member.display_name,
            email: member.email,
            is_admin: member.is_admin,
            created_at: member.created_at,
        }
    }
}
