use juniper::{FieldError, FieldResult};
use tracing::info;

use crate::common::{MemberId, OrganizationId};
use crate::domains::member::data::MemberData;
use crate::domains::member::models::Member;
use crate::server::graphql::GraphQLContext;

/// Create a member (agent) within an organization
pub async fn create_member(
    ctx: &GraphQLContext,
    organization_id: String,
    display_name: String,
    email: String,
    is_admin: bool,
) -> FieldResult<MemberData> {
    info!(organization_id = %organization_id, email = %email, "Creating member");

    let organization_id = OrganizationId::parse(&organization_id)
        .map_err(|_| FieldError::new("Invalid organization ID", juniper::Value::null()))?;

    let member = Member::create(
        organization_id,
        display_name.trim(),
        email.trim(),
        is_admin,
        &ctx.db_pool,
    )
    .await
    .map_err(|e| {
        FieldError::new(
            format!("Failed to create member: {}", e),
            juniper::Value::null(),
        )
    })?;

    Ok(MemberData::from(member))
}

/// Delete a member, reassigning their properties to another agent
pub async fn delete_member(
    ctx: &GraphQLContext,
    member_id: String,
    reassign_to: String,
) -> FieldResult<i32> {
    info!(member_id = %member_id, reassign_to = %reassign_to, "Deleting member");

    let member_id = MemberId::parse(&member_id)
        .map_err(|_| FieldError::new("Invalid member ID", juniper::Value::null()))?;
    let reassign_to = MemberId::parse(&reassign_to)
        .map_err(|_| FieldError::new("Invalid member ID", juniper::Value::null()))?;

    let reassigned = Member::delete_and_reassign(member_id, reassign_to, &ctx.db_pool)
        .await
        .map_err(|e| {
            FieldError::new(
                format!("Failed to delete member: {}", e),
                juniper::Value::null(),
            )
        })?;

    Ok(reassigned as i32)
}
