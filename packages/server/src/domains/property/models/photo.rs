use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{PhotoId, PropertyId};

/// A photo stored with the image-hosting provider and referenced by the
/// property. At most one photo per property carries the cover flag; that
/// rule is enforced at validation time, not here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PropertyPhoto {
    pub id: PhotoId,
    pub property_id: PropertyId,
    pub remote_id: String,
    pub filename: String,
    pub is_cover: bool,
    pub uploaded_at: DateTime<Utc>,
}

impl PropertyPhoto {
    /// Record a photo's metadata. Only called after the upload round trip
    /// has succeeded.
    pub async fn create(
        property_id: PropertyId,
        remote_id: &str,
        filename: &str,
        is_cover: bool,
        uploaded_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO property_photos (property_id, remote_id, filename, is_cover, uploaded_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(property_id)
        .bind(remote_id)
        .bind(filename)
        .bind(is_cover)
        .bind(uploaded_at)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_for_property(property_id: PropertyId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM property_photos WHERE property_id = $1 ORDER BY uploaded_at",
        )
        .bind(property_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update_cover(id: PhotoId, is_cover: bool, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE property_photos SET is_cover = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_cover)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: PhotoId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM property_photos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
