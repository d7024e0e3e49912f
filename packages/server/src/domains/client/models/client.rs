use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ClientEmailId, ClientId, ClientPhoneId, OrganizationId};

/// Client type enum for type-safe querying
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    Buyer,
    Owner,
    Renter,
}

impl std::fmt::Display for ClientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientType::Buyer => write!(f, "buyer"),
            ClientType::Owner => write!(f, "owner"),
            ClientType::Renter => write!(f, "renter"),
        }
    }
}

impl std::str::FromStr for ClientType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "buyer" => Ok(ClientType::Buyer),
            "owner" => Ok(ClientType::Owner),
            "renter" => Ok(ClientType::Renter),
            _ => Err(anyhow::anyhow!("Invalid client type: {}", s)),
        }
    }
}

/// Phone type enum - a client holds at most one number per type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhoneType {
    Mobile,
    Home,
}

impl std::fmt::Display for PhoneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhoneType::Mobile => write!(f, "mobile"),
            PhoneType::Home => write!(f, "home"),
        }
    }
}

impl std::str::FromStr for PhoneType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mobile" => Ok(PhoneType::Mobile),
            "home" => Ok(PhoneType::Home),
            _ => Err(anyhow::anyhow!("Invalid phone type: {}", s)),
        }
    }
}

/// A person the organization works with: buyer, owner, or renter.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Client {
    pub id: ClientId,
    pub organization_id: OrganizationId,
    pub first_name: String,
    pub last_name: String,
    pub client_type: String, // 'buyer', 'owner', 'renter'
    pub receives_email: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A phone number row, keyed by (client, type) - never by list position.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClientPhone {
    pub id: ClientPhoneId,
    pub client_id: ClientId,
    pub organization_id: OrganizationId,
    pub phone_number: String,
    pub phone_type: String, // 'mobile', 'home'
    pub has_whatsapp: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClientEmail {
    pub id: ClientEmailId,
    pub client_id: ClientId,
    pub organization_id: OrganizationId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Client Queries
// =============================================================================

impl Client {
    /// Create a client row. Runs on a connection so callers can keep it
    /// inside the same transaction as the property write.
    pub async fn create(
        organization_id: OrganizationId,
        first_name: &str,
        last_name: &str,
        client_type: ClientType,
        receives_email: bool,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO clients (organization_id, first_name, last_name, client_type, receives_email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(first_name)
        .bind(last_name)
        .bind(client_type.to_string())
        .bind(receives_email)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    /// Find a client scoped to an organization.
    pub async fn find_by_id(
        id: ClientId,
        organization_id: OrganizationId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM clients WHERE id = $1 AND organization_id = $2",
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Same scoped lookup on an open connection (used inside transactions).
    pub async fn exists_in_organization(
        id: ClientId,
        organization_id: OrganizationId,
        conn: &mut PgConnection,
    ) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1 AND organization_id = $2)",
        )
        .bind(id)
        .bind(organization_id)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_for_organization(
        organization_id: OrganizationId,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM clients WHERE organization_id = $1 ORDER BY last_name, first_name",
        )
        .bind(organization_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Find a client in the organization holding any of the given phone
    /// numbers or the given email. This is the fast-path duplicate-contact
    /// check; the unique indexes on the contact tables are the backstop.
    pub async fn find_contact_collision(
        organization_id: OrganizationId,
        phone_numbers: &[String],
        email: Option<&str>,
        conn: &mut PgConnection,
    ) -> Result<Option<ClientId>> {
        sqlx::query_scalar::<_, ClientId>(
            r#"
            SELECT c.id
            FROM clients c
            LEFT JOIN client_phones p ON p.client_id = c.id
            LEFT JOIN client_emails e ON e.client_id = c.id
            WHERE c.organization_id = $1
              AND (p.phone_number = ANY($2) OR e.email = $3)
            LIMIT 1
            "#,
        )
        .bind(organization_id)
        .bind(phone_numbers)
        .bind(email)
        .fetch_optional(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn update(
        id: ClientId,
        first_name: &str,
        last_name: &str,
        client_type: ClientType,
        receives_email: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE clients
            SET first_name = $2, last_name = $3, client_type = $4, receives_email = $5,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(client_type.to_string())
        .bind(receives_email)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a client. Properties owned by the client keep their rows; the
    /// owner reference is set NULL by the foreign key.
    pub async fn delete(id: ClientId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn count_for_organization(
        organization_id: OrganizationId,
        pool: &PgPool,
    ) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM clients WHERE organization_id = $1",
        )
        .bind(organization_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

// =============================================================================
// Contact row queries
// =============================================================================

impl ClientPhone {
    pub async fn create(
        client_id: ClientId,
        organization_id: OrganizationId,
        phone_number: &str,
        phone_type: PhoneType,
        has_whatsapp: bool,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO client_phones (client_id, organization_id, phone_number, phone_type, has_whatsapp)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(organization_id)
        .bind(phone_number)
        .bind(phone_type.to_string())
        .bind(has_whatsapp)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_for_client(client_id: ClientId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM client_phones WHERE client_id = $1 ORDER BY phone_type",
        )
        .bind(client_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Look up a client's number by type - the (client, type) key is the
    /// identity, never the position in a submitted list.
    pub async fn find_by_type(
        client_id: ClientId,
        phone_type: PhoneType,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM client_phones WHERE client_id = $1 AND phone_type = $2",
        )
        .bind(client_id)
        .bind(phone_type.to_string())
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: ClientPhoneId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM client_phones WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

impl ClientEmail {
    pub async fn create(
        client_id: ClientId,
        organization_id: OrganizationId,
        email: &str,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO client_emails (client_id, organization_id, email)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(organization_id)
        .bind(email)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_for_client(client_id: ClientId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM client_emails WHERE client_id = $1 ORDER BY created_at",
        )
        .bind(client_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: ClientEmailId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM client_emails WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
