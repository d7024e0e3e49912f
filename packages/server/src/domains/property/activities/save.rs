//! The property persistence orchestrator.
//!
//! Create and update share the same spine: validate, resolve the slug,
//! resolve the owner, persist the scalar row, reconcile media, and (on
//! create, opt-in) notify the marketplace operator. Owner resolution and the
//! scalar write share one transaction, so a duplicate-contact conflict can
//! never leave a half-saved property behind. Media reconciliation runs after
//! commit and accepts partial success.

use chrono::{Datelike, Utc};
use tracing::{error, info};

use crate::common::{money, slug, ClientId, DomainError, OrganizationId, PropertyId};
use crate::domains::client::resolve_owner;
use crate::domains::property::models::{Property, PropertyDraft, PropertyRecord};
use crate::kernel::ServerDeps;

use super::media::{reconcile_photos, reconcile_videos};
use super::validate::validate;

const SLUG_CONFLICT: &str = "A property with this title already exists";

/// Result of a successful save: the id plus any media warnings.
#[derive(Debug)]
pub struct SaveOutcome {
    pub property_id: PropertyId,
    pub warnings: Vec<String>,
}

pub async fn create_property(
    organization_id: OrganizationId,
    draft: PropertyDraft,
    deps: &ServerDeps,
) -> Result<SaveOutcome, DomainError> {
    let draft = validate(draft, Utc::now().year()).map_err(DomainError::Validation)?;
    let pool = &deps.db_pool;

    let slug = slug::generate_slug(&draft.title, |candidate| async move {
        Property::slug_exists(&candidate, pool).await
    })
    .await?;

    let mut tx = pool.begin().await?;

    let owner_client_id = match draft.owner.clone() {
        Some(spec) => Some(resolve_owner(organization_id, spec, &mut tx).await?),
        None => None,
    };

    let sequence_number = Property::next_sequence_number(organization_id, &mut tx).await?;
    let record = to_record(&draft, slug, owner_client_id)?;
    let property = Property::insert(organization_id, &record, sequence_number, &mut tx)
        .await
        .map_err(|e| DomainError::conflict_on_unique_anyhow(e, SLUG_CONFLICT))?;

    tx.commit().await?;

    let mut warnings = reconcile_photos(property.id, draft.media, deps).await?;
    warnings.extend(reconcile_videos(property.id, draft.video_links, deps).await?);

    if draft.share_with_marketplace {
        notify_marketplace(&property, deps).await;
    }

    info!(property_id = %property.id, slug = %property.slug, "Property created");
    Ok(SaveOutcome {
        property_id: property.id,
        warnings,
    })
}

pub async fn update_property(
    organization_id: OrganizationId,
    property_id: PropertyId,
    draft: PropertyDraft,
    deps: &ServerDeps,
) -> Result<SaveOutcome, DomainError> {
    let draft = validate(draft, Utc::now().year()).map_err(DomainError::Validation)?;
    let pool = &deps.db_pool;

    let existing = Property::find_by_id(property_id, organization_id, pool)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("property {property_id}")))?;

    // The slug survives edits unless the title itself changed.
    let slug = if existing.title == draft.title {
        existing.slug.clone()
    } else {
        slug::generate_slug(&draft.title, |candidate| async move {
            Property::slug_exists_excluding(&candidate, property_id, pool).await
        })
        .await?
    };

    let mut tx = pool.begin().await?;

    // An absent owner spec leaves the current owner reference untouched.
    let owner_client_id = match draft.owner.clone() {
        Some(spec) => Some(resolve_owner(organization_id, spec, &mut tx).await?),
        None => existing.owner_client_id,
    };

    let record = to_record(&draft, slug, owner_client_id)?;
    let property = Property::update_scalars(property_id, &record, &mut tx)
        .await
        .map_err(|e| DomainError::conflict_on_unique_anyhow(e, SLUG_CONFLICT))?;

    tx.commit().await?;

    let mut warnings = reconcile_photos(property.id, draft.media, deps).await?;
    warnings.extend(reconcile_videos(property.id, draft.video_links, deps).await?);

    info!(property_id = %property.id, slug = %property.slug, "Property updated");
    Ok(SaveOutcome {
        property_id: property.id,
        warnings,
    })
}

/// Convert the validated draft into column values: money to integer cents,
/// slug and owner already resolved.
fn to_record(
    draft: &PropertyDraft,
    slug: String,
    owner_client_id: Option<ClientId>,
) -> Result<PropertyRecord, DomainError> {
    Ok(PropertyRecord {
        agent_id: draft.agent_id,
        owner_client_id,
        title: draft.title.clone(),
        slug,
        listing_type: draft.listing_type,
        sale_price_cents: draft.sale_price_dollars.map(money::to_cents).transpose()?,
        rent_price_cents: draft.rent_price_dollars.map(money::to_cents).transpose()?,
        tax_cents: draft.tax_dollars.map(money::to_cents).transpose()?,
        fee_percent: draft.fee_percent,
        address: draft.address.clone(),
        bedrooms: draft.bedrooms,
        bathrooms: draft.bathrooms,
        parking_spaces: draft.parking_spaces,
        floor: draft.floor,
        area_m2: draft.area_m2,
        construction_year: draft.construction_year,
        description: draft.description.clone(),
    })
}

/// Best-effort cross-posting notification. A send failure is logged and
/// never surfaces to the caller.
async fn notify_marketplace(property: &Property, deps: &ServerDeps) {
    let subject = format!("New listing: {}", property.title);
    let html = format!(
        "<p>A new property was shared with the marketplace.</p>\
         <p><strong>{}</strong><br/>{}<br/>Reference: {}</p>",
        property.title, property.address, property.slug
    );
    if let Err(e) = deps
        .email
        .send(&deps.marketplace_email, &subject, &html)
        .await
    {
        error!(property_id = %property.id, error = %e, "Marketplace notification failed");
    }
}
