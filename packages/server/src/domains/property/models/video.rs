use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{PropertyId, VideoId};

/// Video platform enum - derived from the URL's host token
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VideoPlatform {
    Youtube,
    Vimeo,
}

impl VideoPlatform {
    /// Recognize a platform from a video URL. Returns None for unknown
    /// hosts, which validation reports as a field error.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.contains("youtube.com") || url.contains("youtu.be") {
            Some(VideoPlatform::Youtube)
        } else if url.contains("vimeo.com") {
            Some(VideoPlatform::Vimeo)
        } else {
            None
        }
    }
}

impl std::fmt::Display for VideoPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoPlatform::Youtube => write!(f, "youtube"),
            VideoPlatform::Vimeo => write!(f, "vimeo"),
        }
    }
}

impl std::str::FromStr for VideoPlatform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "youtube" => Ok(VideoPlatform::Youtube),
            "vimeo" => Ok(VideoPlatform::Vimeo),
            _ => Err(anyhow::anyhow!("Invalid video platform: {}", s)),
        }
    }
}

/// A hosted video linked to a property.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PropertyVideo {
    pub id: VideoId,
    pub property_id: PropertyId,
    pub url: String,
    pub platform: String, // 'youtube', 'vimeo'
    pub created_at: DateTime<Utc>,
}

impl PropertyVideo {
    pub async fn create(
        property_id: PropertyId,
        url: &str,
        platform: VideoPlatform,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO property_videos (property_id, url, platform)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(property_id)
        .bind(url)
        .bind(platform.to_string())
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_for_property(property_id: PropertyId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM property_videos WHERE property_id = $1 ORDER BY created_at",
        )
        .bind(property_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(
        id: VideoId,
        url: &str,
        platform: VideoPlatform,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE property_videos SET url = $2, platform = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(url)
        .bind(platform.to_string())
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: VideoId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM property_videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_from_url() {
        assert_eq!(
            VideoPlatform::from_url("https://www.youtube.com/watch?v=abc"),
            Some(VideoPlatform::Youtube)
        );
        assert_eq!(
            VideoPlatform::from_url("https://youtu.be/abc"),
            Some(VideoPlatform::Youtube)
        );
        assert_eq!(
            VideoPlatform::from_url("https://vimeo.com/12345"),
            Some(VideoPlatform::Vimeo)
        );
        assert_eq!(VideoPlatform::from_url("https://example.com/video"), None);
    }
}
