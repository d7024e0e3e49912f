use juniper::{FieldError, FieldResult};
use tracing::info;

use crate::domains::organization::data::OrganizationData;
use crate::domains::organization::models::Organization;
use crate::server::graphql::GraphQLContext;

/// Create an organization
pub async fn create_organization(
    ctx: &GraphQLContext,
    name: String,
) -> FieldResult<OrganizationData> {
    info!(name = %name, "Creating organization");

    let name = name.trim();
    if name.is_empty() {
        return Err(FieldError::new(
            "Organization name is required",
            juniper::Value::null(),
        ));
    }

    let organization = Organization::create(name, &ctx.db_pool).await.map_err(|e| {
        FieldError::new(
            format!("Failed to create organization: {}", e),
            juniper::Value::null(),
        )
    })?;

    Ok(OrganizationData::from(organization))
}
