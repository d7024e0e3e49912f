//! Submission types for the property save workflow.
//!
//! A `PropertyDraft` is the typed, transport-agnostic shape of a create or
//! update form: money still in decimal dollars, owner not yet resolved,
//! media not yet reconciled. The GraphQL layer coerces raw input into this
//! shape; validation normalizes and checks it; the save activity persists it.

use rust_decimal::Decimal;

use crate::common::{MemberId, PhotoId, VideoId};
use crate::domains::client::OwnerSpec;

use super::{ListingType, VideoPlatform};

/// One entry of the submitted media list.
///
/// Existing photos carry an id; new photos carry filename and content bytes.
/// The deletion flag only makes sense on the update path.
#[derive(Debug, Clone, Default)]
pub struct MediaSubmission {
    pub id: Option<PhotoId>,
    pub filename: Option<String>,
    pub content: Option<Vec<u8>>,
    pub is_cover: bool,
    pub is_deleted: bool,
}

/// One entry of the submitted video-link list.
#[derive(Debug, Clone)]
pub struct VideoSubmission {
    pub id: Option<VideoId>,
    pub url: String,
    /// Filled during validation from the URL's host token.
    pub platform: Option<VideoPlatform>,
    pub is_deleted: bool,
}

/// A validated-shape (but not yet validated) property submission.
#[derive(Debug, Clone)]
pub struct PropertyDraft {
    pub title: String,
    pub address: String,
    pub description: String,
    pub listing_type: ListingType,
    pub sale_price_dollars: Option<Decimal>,
    pub rent_price_dollars: Option<Decimal>,
    pub tax_dollars: Option<Decimal>,
    pub fee_percent: Option<f64>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub parking_spaces: i32,
    pub floor: i32,
    pub area_m2: Option<i32>,
    pub construction_year: Option<i32>,
    pub agent_id: MemberId,
    pub owner: Option<OwnerSpec>,
    pub media: Vec<MediaSubmission>,
    pub video_links: Vec<VideoSubmission>,
    /// Create path only: cross-post the listing to the marketplace operator.
    pub share_with_marketplace: bool,
}
