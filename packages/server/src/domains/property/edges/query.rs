use juniper::{FieldError, FieldResult};

use crate::common::{OrganizationId, PropertyId};
use crate::domains::property::data::PropertyData;
use crate::domains::property::models::{Property, PropertyPhoto, PropertyVideo};
use crate::server::graphql::GraphQLContext;

/// Fetch a single property with its photos and videos
pub async fn property(
    ctx: &GraphQLContext,
    organization_id: String,
    property_id: String,
) -> FieldResult<Option<PropertyData>> {
    let organization_id = OrganizationId::parse(&organization_id)
        .map_err(|_| FieldError::new("Invalid organization ID", juniper::Value::null()))?;
    let property_id = PropertyId::parse(&property_id)
        .map_err(|_| FieldError::new("Invalid property ID", juniper::Value::null()))?;

    let Some(property) = Property::find_by_id(property_id, organization_id, &ctx.db_pool)
        .await
        .map_err(internal)?
    else {
        return Ok(None);
    };

    Ok(Some(load_data(ctx, property).await?))
}

/// Fetch a property by its public slug
pub async fn property_by_slug(
    ctx: &GraphQLContext,
    slug: String,
) -> FieldResult<Option<PropertyData>> {
    let Some(property) = Property::find_by_slug(&slug, &ctx.db_pool)
        .await
        .map_err(internal)?
    else {
        return Ok(None);
    };

    Ok(Some(load_data(ctx, property).await?))
}

/// List an organization's properties, newest first
pub async fn properties(
    ctx: &GraphQLContext,
    organization_id: String,
) -> FieldResult<Vec<PropertyData>> {
    let organization_id = OrganizationId::parse(&organization_id)
        .map_err(|_| FieldError::new("Invalid organization ID", juniper::Value::null()))?;

    let rows = Property::find_for_organization(organization_id, &ctx.db_pool)
        .await
        .map_err(internal)?;

    let mut out = Vec::with_capacity(rows.len());
    for property in rows {
        out.push(load_data(ctx, property).await?);
    }
    Ok(out)
}

async fn load_data(ctx: &GraphQLContext, property: Property) -> FieldResult<PropertyData> {
    let photos = PropertyPhoto::find_for_property(property.id, &ctx.db_pool)
        .await
        .map_err(internal)?;
    let videos = PropertyVideo::find_for_property(property.id, &ctx.db_pool)
        .await
        .map_err(internal)?;
    Ok(PropertyData::from_parts(property, photos, videos))
}

fn internal(e: anyhow::Error) -> FieldError {
    FieldError::new(format!("Failed to load property: {}", e), juniper::Value::null())
}
