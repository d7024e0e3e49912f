use juniper::{FieldError, FieldResult};

use crate::common::OrganizationId;
use crate::domains::member::data::MemberData;
use crate::domains::member::models::Member;
use crate::server::graphql::GraphQLContext;

/// List an organization's members
pub async fn members(
    ctx: &GraphQLContext,
    organization_id: String,
) -> FieldResult<Vec<MemberData>> {
    let organization_id = OrganizationId::parse(&organization_id)
        .map_err(|_| FieldError::new("Invalid organization ID", juniper::Value::null()))?;

    let members = Member::find_for_organization(organization_id, &ctx.db_pool)
        .await
        .map_err(|e| {
            FieldError::new(
                format!("Failed to load members: {}", e),
                juniper::Value::null(),
            )
        })?;

    Ok(members.into_iter().map(Into::into).collect())
}
