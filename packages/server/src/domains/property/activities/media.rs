//! Media and video reconciliation for property saves.
//!
//! Each save submits the full media list. Partitioning splits it into three
//! disjoint sets - deletions, additions, in-place updates - which are applied
//! in that order. Photos and videos reconcile independently. Media accepts
//! partial success: a photo whose upload fails three times is skipped with a
//! warning while the rest of the batch continues.

use anyhow::{anyhow, Result};
use tracing::{error, info, warn};

use crate::common::{PhotoId, PropertyId, VideoId};
use crate::domains::property::models::{
    MediaSubmission, PropertyPhoto, PropertyVideo, VideoPlatform, VideoSubmission,
};
use crate::kernel::{ServerDeps, UploadedObject};

const UPLOAD_ATTEMPTS: u32 = 3;

// =============================================================================
// Partitioning (pure)
// =============================================================================

#[derive(Debug, Clone)]
pub struct PhotoAdd {
    pub filename: String,
    pub content: Vec<u8>,
    pub is_cover: bool,
}

#[derive(Debug, Clone)]
pub struct PhotoUpdate {
    pub id: PhotoId,
    pub is_cover: bool,
}

#[derive(Debug, Default)]
pub struct PhotoDiff {
    pub to_delete: Vec<PhotoId>,
    pub to_add: Vec<PhotoAdd>,
    pub to_update: Vec<PhotoUpdate>,
}

/// Partition submitted media into disjoint delete/add/update sets.
///
/// Deletion wins over everything else; an entry without an id and without
/// the deletion flag is an addition; an entry with an id is an update.
pub fn partition_photos(submitted: Vec<MediaSubmission>) -> PhotoDiff {
    let mut diff = PhotoDiff::default();
    for item in submitted {
        match (item.id, item.is_deleted) {
            (Some(id), true) => diff.to_delete.push(id),
            (None, true) => {} // never persisted, nothing to do
            (None, false) => {
                if let (Some(filename), Some(content)) = (item.filename, item.content) {
                    diff.to_add.push(PhotoAdd {
                        filename,
                        content,
                        is_cover: item.is_cover,
                    });
                }
            }
            (Some(id), false) => diff.to_update.push(PhotoUpdate {
                id,
                is_cover: item.is_cover,
            }),
        }
    }
    diff
}

#[derive(Debug, Clone)]
pub struct VideoAdd {
    pub url: String,
    pub platform: VideoPlatform,
}

#[derive(Debug, Clone)]
pub struct VideoUpdate {
    pub id: VideoId,
    pub url: String,
    pub platform: VideoPlatform,
}

#[derive(Debug, Default)]
pub struct VideoDiff {
    pub to_delete: Vec<VideoId>,
    pub to_add: Vec<VideoAdd>,
    pub to_update: Vec<VideoUpdate>,
}

/// Partition submitted video links the same way as photos. Validation has
/// already derived the platform for every surviving entry.
pub fn partition_videos(submitted: Vec<VideoSubmission>) -> VideoDiff {
    let mut diff = VideoDiff::default();
    for item in submitted {
        match (item.id, item.is_deleted) {
            (Some(id), true) => diff.to_delete.push(id),
            (None, true) => {}
            (None, false) => {
                if let Some(platform) = item.platform {
                    diff.to_add.push(VideoAdd {
                        url: item.url,
                        platform,
                    });
                }
            }
            (Some(id), false) => {
                if let Some(platform) = item.platform {
                    diff.to_update.push(VideoUpdate {
                        id,
                        url: item.url,
                        platform,
                    });
                }
            }
        }
    }
    diff
}

// =============================================================================
// Application
// =============================================================================

/// Apply a submitted media list against the persisted photo set.
///
/// Returns warnings for skipped items; storage failures never abort the
/// surrounding save.
pub async fn reconcile_photos(
    property_id: PropertyId,
    submitted: Vec<MediaSubmission>,
    deps: &ServerDeps,
) -> Result<Vec<String>> {
    let pool = &deps.db_pool;
    let previous = PropertyPhoto::find_for_property(property_id, pool).await?;
    let diff = partition_photos(submitted);
    let mut warnings = Vec::new();

    // Deletions first: the removed ids can never collide with adds/updates.
    for id in diff.to_delete {
        match previous.iter().find(|p| p.id == id) {
            Some(photo) => {
                if let Err(e) = deps.storage.delete_remote_object(&photo.remote_id).await {
                    warn!(photo_id = %id, error = %e, "Failed to delete remote object");
                    warnings.push(format!("photo {} left orphaned at the storage provider", id));
                }
                PropertyPhoto::delete(id, pool).await?;
            }
            None => warnings.push(format!("photo {} no longer exists; delete skipped", id)),
        }
    }

    // Additions: uploads run one at a time to bound memory and avoid
    // hammering the provider.
    for add in diff.to_add {
        match upload_with_retry(deps, &add).await {
            Ok(uploaded) => {
                PropertyPhoto::create(
                    property_id,
                    &uploaded.remote_id,
                    &uploaded.filename,
                    add.is_cover,
                    uploaded.uploaded_at,
                    pool,
                )
                .await?;
                info!(property_id = %property_id, filename = %add.filename, "Photo uploaded");
            }
            Err(e) => {
                error!(
                    property_id = %property_id,
                    filename = %add.filename,
                    error = %e,
                    "Photo upload failed after {} attempts", UPLOAD_ATTEMPTS
                );
                warnings.push(format!(
                    "photo '{}' failed to upload after {} attempts",
                    add.filename, UPLOAD_ATTEMPTS
                ));
            }
        }
    }

    // Updates last. A stale id (concurrent edit) is skipped per item.
    for update in diff.to_update {
        if previous.iter().any(|p| p.id == update.id) {
            PropertyPhoto::update_cover(update.id, update.is_cover, pool).await?;
        } else {
            warnings.push(format!("photo {} no longer exists; update skipped", update.id));
        }
    }

    Ok(warnings)
}

/// Apply a submitted video-link list against the persisted set.
pub async fn reconcile_videos(
    property_id: PropertyId,
    submitted: Vec<VideoSubmission>,
    deps: &ServerDeps,
) -> Result<Vec<String>> {
    let pool = &deps.db_pool;
    let previous = PropertyVideo::find_for_property(property_id, pool).await?;
    let diff = partition_videos(submitted);
    let mut warnings = Vec::new();

    for id in diff.to_delete {
        if previous.iter().any(|v| v.id == id) {
            PropertyVideo::delete(id, pool).await?;
        } else {
            warnings.push(format!("video {} no longer exists; delete skipped", id));
        }
    }

    for add in diff.to_add {
        PropertyVideo::create(property_id, &add.url, add.platform, pool).await?;
    }

    for update in diff.to_update {
        if previous.iter().any(|v| v.id == update.id) {
            PropertyVideo::update(update.id, &update.url, update.platform, pool).await?;
        } else {
            warnings.push(format!("video {} no longer exists; update skipped", update.id));
        }
    }

    Ok(warnings)
}

/// One photo's upload round trip: credential then binary, up to
/// `UPLOAD_ATTEMPTS` tries with no backoff.
async fn upload_with_retry(deps: &ServerDeps, add: &PhotoAdd) -> Result<UploadedObject> {
    let mut last_error = None;
    for attempt in 1..=UPLOAD_ATTEMPTS {
        let result = async {
            let credentials = deps.storage.request_upload_credentials(1).await?;
            let credential = credentials
                .first()
                .ok_or_else(|| anyhow!("storage provider issued no upload credential"))?;
            deps.storage
                .upload_binary(credential, &add.filename, add.content.clone())
                .await
        }
        .await;

        match result {
            Ok(uploaded) => return Ok(uploaded),
            Err(e) => {
                warn!(filename = %add.filename, attempt, error = %e, "Photo upload attempt failed");
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| anyhow!("photo upload failed")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn existing(id: PhotoId, is_cover: bool, is_deleted: bool) -> MediaSubmission {
        MediaSubmission {
            id: Some(id),
            filename: None,
            content: None,
            is_cover,
            is_deleted,
        }
    }

    fn fresh(filename: &str) -> MediaSubmission {
        MediaSubmission {
            id: None,
            filename: Some(filename.to_string()),
            content: Some(vec![0u8; 4]),
            is_cover: false,
            is_deleted: false,
        }
    }

    #[test]
    fn partitions_are_disjoint() {
        let a = PhotoId::new();
        let b = PhotoId::new();
        let submitted = vec![existing(a, false, true), fresh("c.jpg"), existing(b, true, false)];

        let diff = partition_photos(submitted);
        assert_eq!(diff.to_delete, vec![a]);
        assert_eq!(diff.to_add.len(), 1);
        assert_eq!(diff.to_add[0].filename, "c.jpg");
        assert_eq!(diff.to_update.len(), 1);
        assert_eq!(diff.to_update[0].id, b);
        assert!(diff.to_update[0].is_cover);

        let mut ids: HashSet<PhotoId> = HashSet::new();
        ids.extend(diff.to_delete.iter().copied());
        ids.extend(diff.to_update.iter().map(|u| u.id));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn unsaved_deleted_entries_are_ignored() {
        let submitted = vec![MediaSubmission {
            is_deleted: true,
            ..Default::default()
        }];
        let diff = partition_photos(submitted);
        assert!(diff.to_delete.is_empty());
        assert!(diff.to_add.is_empty());
        assert!(diff.to_update.is_empty());
    }

    #[test]
    fn video_partition_mirrors_photo_partition() {
        let keep = VideoId::new();
        let drop = VideoId::new();
        let submitted = vec![
            VideoSubmission {
                id: Some(drop),
                url: "https://youtu.be/old".to_string(),
                platform: Some(VideoPlatform::Youtube),
                is_deleted: true,
            },
            VideoSubmission {
                id: None,
                url: "https://vimeo.com/1".to_string(),
                platform: Some(VideoPlatform::Vimeo),
                is_deleted: false,
            },
            VideoSubmission {
                id: Some(keep),
                url: "https://youtu.be/new".to_string(),
                platform: Some(VideoPlatform::Youtube),
                is_deleted: false,
            },
        ];
        let diff = partition_videos(submitted);
        assert_eq!(diff.to_delete, vec![drop]);
        assert_eq!(diff.to_add.len(), 1);
        assert_eq!(diff.to_update.len(), 1);
        assert_eq!(diff.to_update[0].id, keep);
    }
}
