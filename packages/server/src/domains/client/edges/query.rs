use juniper::{FieldError, FieldResult};

use crate::common::{ClientId, OrganizationId};
use crate::domains::client::data::ClientData;
use crate::domains::client::models::{Client, ClientEmail, ClientPhone};
use crate::server::graphql::GraphQLContext;

/// Fetch a single client with contact rows
pub async fn client(
    ctx: &GraphQLContext,
    organization_id: String,
    client_id: String,
) -> FieldResult<Option<ClientData>> {
    let organization_id = OrganizationId::parse(&organization_id)
        .map_err(|_| FieldError::new("Invalid organization ID", juniper::Value::null()))?;
    let client_id = ClientId::parse(&client_id)
        .map_err(|_| FieldError::new("Invalid client ID", juniper::Value::null()))?;

    let Some(client) = Client::find_by_id(client_id, organization_id, &ctx.db_pool)
        .await
        .map_err(internal)?
    else {
        return Ok(None);
    };

    let phones = ClientPhone::find_for_client(client.id, &ctx.db_pool)
        .await
        .map_err(internal)?;
    let emails = ClientEmail::find_for_client(client.id, &ctx.db_pool)
        .await
        .map_err(internal)?;

    Ok(Some(ClientData::from_parts(client, phones, emails)))
}

/// List an organization's clients
pub async fn clients(
    ctx: &GraphQLContext,
    organization_id: String,
) -> FieldResult<Vec<ClientData>> {
    let organization_id = OrganizationId::parse(&organization_id)
        .map_err(|_| FieldError::new("Invalid organization ID", juniper::Value::null()))?;

    let rows = Client::find_for_organization(organization_id, &ctx.db_pool)
        .await
        .map_err(internal)?;

    let mut out = Vec::with_capacity(rows.len());
    for client in rows {
        let phones = ClientPhone::find_for_client(client.id, &ctx.db_pool)
            .await
            .map_err(internal)?;
        let emails = ClientEmail::find_for_client(client.id, &ctx.db_pool)
            .await
            .map_err(internal)?;
        out.push(ClientData::from_parts(client, phones, emails));
    }
    Ok(out)
}

fn internal(e: anyhow::Error) -> FieldError {
    FieldError::new(format!("Failed to load client: {}", e), juniper::Value::null())
}
