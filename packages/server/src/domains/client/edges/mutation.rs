use std::str::FromStr;

use juniper::{FieldError, FieldResult};
use tracing::info;

use crate::common::{ClientEmailId, ClientId, ClientPhoneId, DomainError, OrganizationId};
use crate::domains::client::data::{ClientData, ClientPhoneData};
use crate::domains::client::models::{Client, ClientEmail, ClientPhone, ClientType, PhoneType};
use crate::server::graphql::{field_error, GraphQLContext};

/// Update a client's core fields
pub async fn update_client(
    ctx: &GraphQLContext,
    organization_id: String,
    client_id: String,
    first_name: String,
    last_name: String,
    client_type: String,
    receives_email: bool,
) -> FieldResult<ClientData> {
    info!(client_id = %client_id, "Updating client");

    let organization_id = parse_organization_id(&organization_id)?;
    let client_id = parse_client_id(&client_id)?;
    let client_type = ClientType::from_str(&client_type)
        .map_err(|_| FieldError::new("Unknown client type", juniper::Value::null()))?;

    let existing = Client::find_by_id(client_id, organization_id, &ctx.db_pool)
        .await
        .map_err(|e| field_error(e.into()))?;
    if existing.is_none() {
        return Err(FieldError::new("Client not found", juniper::Value::null()));
    }

    let client = Client::update(
        client_id,
        first_name.trim(),
        last_name.trim(),
        client_type,
        receives_email,
        &ctx.db_pool,
    )
    .await
    .map_err(|e| field_error(e.into()))?;

    let phones = ClientPhone::find_for_client(client.id, &ctx.db_pool)
        .await
        .map_err(|e| field_error(e.into()))?;
    let emails = ClientEmail::find_for_client(client.id, &ctx.db_pool)
        .await
        .map_err(|e| field_error(e.into()))?;

    Ok(ClientData::from_parts(client, phones, emails))
}

/// Delete a client. Properties owned by the client are detached, not deleted.
pub async fn delete_client(
    ctx: &GraphQLContext,
    organization_id: String,
    client_id: String,
) -> FieldResult<bool> {
    info!(client_id = %client_id, "Deleting client");

    let organization_id = parse_organization_id(&organization_id)?;
    let client_id = parse_client_id(&client_id)?;

    let existing = Client::find_by_id(client_id, organization_id, &ctx.db_pool)
        .await
        .map_err(|e| field_error(e.into()))?;
    if existing.is_none() {
        return Err(FieldError::new("Client not found", juniper::Value::null()));
    }

    Client::delete(client_id, &ctx.db_pool)
        .await
        .map_err(|e| field_error(e.into()))?;

    Ok(true)
}

/// Attach a phone number to a client. The same duplicate-contact rules as
/// owner creation apply, and a client holds at most one number per type.
pub async fn add_client_phone(
    ctx: &GraphQLContext,
    organization_id: String,
    client_id: String,
    phone_number: String,
    phone_type: String,
    has_whatsapp: bool,
) -> FieldResult<ClientPhoneData> {
    info!(client_id = %client_id, "Adding client phone");

    let organization_id = parse_organization_id(&organization_id)?;
    let client_id = parse_client_id(&client_id)?;
    let phone_type = PhoneType::from_str(&phone_type)
        .map_err(|_| FieldError::new("Unknown phone type", juniper::Value::null()))?;

    let phone_number = phone_number.trim().to_string();
    if phone_number.is_empty() {
        return Err(FieldError::new(
            "Phone number is required",
            juniper::Value::null(),
        ));
    }

    if Client::find_by_id(client_id, organization_id, &ctx.db_pool)
        .await
        .map_err(|e| field_error(e.into()))?
        .is_none()
    {
        return Err(FieldError::new("Client not found", juniper::Value::null()));
    }
    if ClientPhone::find_by_type(client_id, phone_type, &ctx.db_pool)
        .await
        .map_err(|e| field_error(e.into()))?
        .is_some()
    {
        return Err(field_error(DomainError::Conflict(format!(
            "Client already has a {phone_type} number"
        ))));
    }

    let mut conn = ctx
        .db_pool
        .acquire()
        .await
        .map_err(|e| field_error(e.into()))?;
    let phone = ClientPhone::create(
        client_id,
        organization_id,
        &phone_number,
        phone_type,
        has_whatsapp,
        &mut conn,
    )
    .await
    .map_err(|e| {
        field_error(DomainError::conflict_on_unique_anyhow(
            e,
            "A client with this phone number or email already exists",
        ))
    })?;

    Ok(ClientPhoneData::from(phone))
}

/// Detach a phone number from a client
pub async fn remove_client_phone(ctx: &GraphQLContext, phone_id: String) -> FieldResult<bool> {
    let phone_id = ClientPhoneId::parse(&phone_id)
        .map_err(|_| FieldError::new("Invalid phone ID", juniper::Value::null()))?;

    ClientPhone::delete(phone_id, &ctx.db_pool)
        .await
        .map_err(|e| field_error(e.into()))?;

    Ok(true)
}

/// Detach an email address from a client
pub async fn remove_client_email(ctx: &GraphQLContext, email_id: String) -> FieldResult<bool> {
    let email_id = ClientEmailId::parse(&email_id)
        .map_err(|_| FieldError::new("Invalid email ID", juniper::Value::null()))?;

    ClientEmail::delete(email_id, &ctx.db_pool)
        .await
        .map_err(|e| field_error(e.into()))?;

    Ok(true)
}

fn parse_organization_id(raw: &str) -> FieldResult<OrganizationId> {
    OrganizationId::parse(raw)
        .map_err(|_| FieldError::new("Invalid organization ID", juniper::Value::null()))
}

fn parse_client_id(raw: &str) -> FieldResult<ClientId> {
    ClientId::parse(raw).map_err(|_| FieldError::new("Invalid client ID", juniper::Value::null()))
}
