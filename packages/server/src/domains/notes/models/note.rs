use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::common::{NoteId, NoteableId};

/// Entity kinds a note can attach to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoteableType {
    Client,
    Property,
}

impl std::fmt::Display for NoteableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteableType::Client => write!(f, "client"),
            NoteableType::Property => write!(f, "property"),
        }
    }
}

impl std::str::FromStr for NoteableType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "client" => Ok(NoteableType::Client),
            "property" => Ok(NoteableType::Property),
            _ => Err(anyhow::anyhow!("Invalid noteable type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Polymorphic link between a note and the entity it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Noteable {
    pub id: NoteableId,
    pub note_id: NoteId,
    pub noteable_type: String,
    pub noteable_id: Uuid,
    pub added_at: DateTime<Utc>,
}

// =============================================================================
// Note Queries
// =============================================================================

impl Note {
    /// Create a note and link it to its entity.
    pub async fn create_for_entity(
        noteable_type: NoteableType,
        noteable_id: Uuid,
        content: &str,
        created_by: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        let mut tx = pool.begin().await?;
        let note = sqlx::query_as::<_, Self>(
            "INSERT INTO notes (content, created_by) VALUES ($1, $2) RETURNING *",
        )
        .bind(content)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO noteables (note_id, noteable_type, noteable_id) VALUES ($1, $2, $3)")
            .bind(note.id)
            .bind(noteable_type.to_string())
            .bind(noteable_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(note)
    }

    pub async fn find_by_id(id: NoteId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find all notes linked to an entity, newest first.
    pub async fn find_for_entity(
        noteable_type: NoteableType,
        noteable_id: Uuid,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT n.*
            FROM notes n
            INNER JOIN noteables nb ON nb.note_id = n.id
            WHERE nb.noteable_type = $1 AND nb.noteable_id = $2
            ORDER BY n.created_at DESC
            "#,
        )
        .bind(noteable_type.to_string())
        .bind(noteable_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(id: NoteId, content: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE notes SET content = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(content)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: NoteId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete every note linked to an entity. Used when a property is
    /// deleted so its notes do not linger unlinked.
    pub async fn delete_for_entity(
        noteable_type: NoteableType,
        noteable_id: Uuid,
        conn: &mut PgConnection,
    ) -> Result<u64> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM notes
            WHERE id IN (
                SELECT note_id FROM noteables
                WHERE noteable_type = $1 AND noteable_id = $2
            )
            "#,
        )
        .bind(noteable_type.to_string())
        .bind(noteable_id)
        .execute(conn)
        .await?
        .rows_affected();
        Ok(deleted)
    }
}
