use juniper::{FieldError, FieldResult};

use crate::common::OrganizationId;
use crate::domains::organization::data::OrganizationData;
use crate::domains::organization::models::Organization;
use crate::server::graphql::GraphQLContext;

/// Fetch a single organization
pub async fn organization(
    ctx: &GraphQLContext,
    organization_id: String,
) -> FieldResult<Option<OrganizationData>> {
    let organization_id = OrganizationId::parse(&organization_id)
        .map_err(|_| FieldError::new("Invalid organization ID", juniper::Value::null()))?;

    let organization = Organization::find_by_id(organization_id, &ctx.db_pool)
        .await
        .map_err(|e| {
            FieldError::new(
                format!("Failed to load organization: {}", e),
                juniper::Value::null(),
            )
        })?;

    Ok(organization.map(Into::into))
}
