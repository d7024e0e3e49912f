use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MemberId, OrganizationId};

/// A CRM user (agent) belonging to one organization.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    pub id: MemberId,
    pub organization_id: OrganizationId,
    pub display_name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub async fn create(
        organization_id: OrganizationId,
        display_name: &str,
        email: &str,
        is_admin: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO members (organization_id, display_name, email, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(display_name)
        .bind(email)
        .bind(is_admin)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: MemberId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_for_organization(
        organization_id: OrganizationId,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM members WHERE organization_id = $1 ORDER BY display_name",
        )
        .bind(organization_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a member, reassigning their properties to another agent first.
    ///
    /// Properties reference their agent with ON DELETE RESTRICT; deleting an
    /// agent must never take listings down with it. Returns the number of
    /// reassigned properties.
    pub async fn delete_and_reassign(
        id: MemberId,
        reassign_to: MemberId,
        pool: &PgPool,
    ) -> Result<u64> {
        if id == reassign_to {
            bail!("cannot reassign properties to the member being deleted");
        }

        let mut tx = pool.begin().await?;

        let same_org = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM members a
                INNER JOIN members b ON a.organization_id = b.organization_id
                WHERE a.id = $1 AND b.id = $2
            )
            "#,
        )
        .bind(id)
        .bind(reassign_to)
        .fetch_one(&mut *tx)
        .await?;
        if !same_org {
            bail!("replacement agent must belong to the same organization");
        }

        let reassigned = sqlx::query("UPDATE properties SET agent_id = $2 WHERE agent_id = $1")
            .bind(id)
            .bind(reassign_to)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(reassigned)
    }
}
