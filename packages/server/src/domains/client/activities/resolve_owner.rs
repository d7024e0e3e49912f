//! Owner resolution for property saves.
//!
//! A submitted property either references an existing client by id or
//! carries inline owner fields. The two paths are mutually exclusive per
//! invocation: the existing-owner path performs no collision check and no
//! writes, and the new-owner path checks for duplicate contact info before
//! the first write.

use sqlx::PgConnection;
use tracing::info;

use crate::common::{ClientId, DomainError, OrganizationId};
use crate::domains::client::models::{Client, ClientEmail, ClientPhone, ClientType, PhoneType};

/// Inline owner fields submitted when no existing client is referenced.
#[derive(Debug, Clone, Default)]
pub struct NewOwnerFields {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub mobile_phone: Option<String>,
    pub home_phone: Option<String>,
    pub receives_email: bool,
}

/// How the submitted property designates its owner.
#[derive(Debug, Clone)]
pub enum OwnerSpec {
    Existing(ClientId),
    New(NewOwnerFields),
}

/// Resolve the owner reference for a property save.
///
/// Runs on the caller's open transaction so that a conflict detected here
/// aborts the whole save with no partial writes.
pub async fn resolve_owner(
    organization_id: OrganizationId,
    spec: OwnerSpec,
    conn: &mut PgConnection,
) -> Result<ClientId, DomainError> {
    match spec {
        OwnerSpec::Existing(client_id) => {
            if !Client::exists_in_organization(client_id, organization_id, conn).await? {
                return Err(DomainError::not_found(format!("client {client_id}")));
            }
            Ok(client_id)
        }
        OwnerSpec::New(fields) => create_owner(organization_id, fields, conn).await,
    }
}

async fn create_owner(
    organization_id: OrganizationId,
    fields: NewOwnerFields,
    conn: &mut PgConnection,
) -> Result<ClientId, DomainError> {
    let mobile = non_empty(fields.mobile_phone);
    let home = non_empty(fields.home_phone);
    let email = non_empty(fields.email);

    let submitted_phones: Vec<String> = [mobile.clone(), home.clone()]
        .into_iter()
        .flatten()
        .collect();

    // Duplicate-contact check runs strictly before any write.
    if !submitted_phones.is_empty() || email.is_some() {
        let collision = Client::find_contact_collision(
            organization_id,
            &submitted_phones,
            email.as_deref(),
            conn,
        )
        .await?;
        if collision.is_some() {
            return Err(DomainError::Conflict(
                "A client with this phone number or email already exists".to_string(),
            ));
        }
    }

    let conflict_message = "A client with this phone number or email already exists";

    let client = Client::create(
        organization_id,
        fields.first_name.trim(),
        fields.last_name.trim(),
        ClientType::Owner,
        fields.receives_email,
        conn,
    )
    .await
    .map_err(|e| DomainError::conflict_on_unique_anyhow(e, conflict_message))?;

    if let Some(number) = mobile {
        ClientPhone::create(
            client.id,
            organization_id,
            &number,
            PhoneType::Mobile,
            true,
            conn,
        )
        .await
        .map_err(|e| DomainError::conflict_on_unique_anyhow(e, conflict_message))?;
    }
    if let Some(number) = home {
        ClientPhone::create(
            client.id,
            organization_id,
            &number,
            PhoneType::Home,
            false,
            conn,
        )
        .await
        .map_err(|e| DomainError::conflict_on_unique_anyhow(e, conflict_message))?;
    }
    if let Some(address) = email {
        ClientEmail::create(client.id, organization_id, &address, conn)
            .await
            .map_err(|e| DomainError::conflict_on_unique_anyhow(e, conflict_message))?;
    }

    info!(client_id = %client.id, "Created owner client for property save");
    Ok(client.id)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_contact_values_are_dropped() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(
            non_empty(Some(" 612-555-0100 ".to_string())),
            Some("612-555-0100".to_string())
        );
        assert_eq!(non_empty(None), None);
    }
}
