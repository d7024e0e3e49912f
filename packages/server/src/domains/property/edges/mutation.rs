use juniper::{FieldError, FieldResult};
use tracing::info;

use crate::common::{OrganizationId, PropertyId};
use crate::domains::property::activities;
use crate::domains::property::data::{PropertyInput, SavePropertyResult};
use crate::server::graphql::{field_error, GraphQLContext};

/// Create a property listing
pub async fn create_property(
    ctx: &GraphQLContext,
    organization_id: String,
    input: PropertyInput,
) -> FieldResult<SavePropertyResult> {
    info!(organization_id = %organization_id, title = %input.title, "Creating property");

    let organization_id = parse_organization_id(&organization_id)?;
    let draft = input.into_draft().map_err(field_error)?;

    let outcome = activities::create_property(organization_id, draft, &ctx.deps)
        .await
        .map_err(field_error)?;

    Ok(SavePropertyResult {
        property_id: outcome.property_id.to_string(),
        warnings: outcome.warnings,
    })
}

/// Update a property listing
pub async fn update_property(
    ctx: &GraphQLContext,
    organization_id: String,
    property_id: String,
    input: PropertyInput,
) -> FieldResult<SavePropertyResult> {
    info!(organization_id = %organization_id, property_id = %property_id, "Updating property");

    let organization_id = parse_organization_id(&organization_id)?;
    let property_id = parse_property_id(&property_id)?;
    let draft = input.into_draft().map_err(field_error)?;

    let outcome = activities::update_property(organization_id, property_id, draft, &ctx.deps)
        .await
        .map_err(field_error)?;

    Ok(SavePropertyResult {
        property_id: outcome.property_id.to_string(),
        warnings: outcome.warnings,
    })
}

/// Delete a property listing and everything it owns
pub async fn delete_property(
    ctx: &GraphQLContext,
    organization_id: String,
    property_id: String,
) -> FieldResult<bool> {
    info!(organization_id = %organization_id, property_id = %property_id, "Deleting property");

    let organization_id = parse_organization_id(&organization_id)?;
    let property_id = parse_property_id(&property_id)?;

    activities::delete_property(organization_id, property_id, &ctx.deps)
        .await
        .map_err(field_error)?;

    Ok(true)
}

fn parse_organization_id(raw: &str) -> FieldResult<OrganizationId> {
    OrganizationId::parse(raw)
        .map_err(|_| FieldError::new("Invalid organization ID", juniper::Value::null()))
}

fn parse_property_id(raw: &str) -> FieldResult<PropertyId> {
    PropertyId::parse(raw)
        .map_err(|_| FieldError::new("Invalid property ID", juniper::Value::null()))
}
