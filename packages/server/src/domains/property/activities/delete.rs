//! Property deletion: cascades owned photos, videos, and attached notes.

use tracing::{info, warn};

use crate::common::{DomainError, OrganizationId, PropertyId};
use crate::domains::notes::models::{Note, NoteableType};
use crate::domains::property::models::{Property, PropertyPhoto};
use crate::kernel::ServerDeps;

/// Delete a property and everything it owns.
///
/// Remote photo objects are deleted best-effort before the row goes away;
/// a provider failure is logged and does not block the delete. Photo and
/// video rows cascade in the database; notes are removed explicitly.
pub async fn delete_property(
    organization_id: OrganizationId,
    property_id: PropertyId,
    deps: &ServerDeps,
) -> Result<(), DomainError> {
    let pool = &deps.db_pool;

    let property = Property::find_by_id(property_id, organization_id, pool)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("property {property_id}")))?;

    let photos = PropertyPhoto::find_for_property(property_id, pool).await?;
    for photo in &photos {
        if let Err(e) = deps.storage.delete_remote_object(&photo.remote_id).await {
            warn!(photo_id = %photo.id, error = %e, "Failed to delete remote object");
        }
    }

    let mut tx = pool.begin().await?;
    let notes_deleted =
        Note::delete_for_entity(NoteableType::Property, property_id.into_uuid(), &mut tx).await?;
    Property::delete(property_id, &mut tx).await?;
    tx.commit().await?;

    info!(
        property_id = %property.id,
        slug = %property.slug,
        photos = photos.len(),
        notes = notes_deleted,
        "Property deleted"
    );
    Ok(())
}
