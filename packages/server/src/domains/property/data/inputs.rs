//! GraphQL input objects for the property save operations, plus their
//! coercion into the typed draft the activities consume. Coercion failures
//! (bad ids, unknown enums, undecodable photo content) surface as field
//! violations, the same shape validation itself produces.

use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use juniper::GraphQLInputObject;
use rust_decimal::Decimal;

use crate::common::{ClientId, DomainError, FieldViolation, MemberId, PhotoId, VideoId};
use crate::domains::client::{NewOwnerFields, OwnerSpec};
use crate::domains::property::models::{
    ListingType, MediaSubmission, PropertyDraft, VideoSubmission,
};

#[derive(Debug, Clone, GraphQLInputObject)]
#[graphql(description = "One entry of the submitted media list")]
pub struct MediaInput {
    /// Persisted photo id; absent for new uploads
    pub id: Option<String>,
    /// Filename for new uploads
    pub filename: Option<String>,
    /// Base64-encoded file content for new uploads
    pub content_base64: Option<String>,
    pub is_cover_photo: Option<bool>,
    /// Update path only: remove this photo
    pub is_deleted: Option<bool>,
}

#[derive(Debug, Clone, GraphQLInputObject)]
#[graphql(description = "One entry of the submitted video-link list")]
pub struct VideoLinkInput {
    /// Persisted video id; absent for new links
    pub id: Option<String>,
    pub url: String,
    /// Update path only: remove this link
    pub is_deleted: Option<bool>,
}

#[derive(Debug, Clone, GraphQLInputObject)]
#[graphql(description = "A property create/update submission")]
pub struct PropertyInput {
    pub title: String,
    pub address: String,
    pub description: String,
    /// 'sale', 'rent', 'sale_rent', 'permutation_sale', 'permutation_rent'
    pub listing_type: String,
    pub sale_price_dollars: Option<f64>,
    pub rent_price_dollars: Option<f64>,
    pub tax_dollars: Option<f64>,
    pub fee_percent: Option<f64>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub parking_spaces: i32,
    pub floor: i32,
    pub area_m2: Option<i32>,
    pub construction_year: Option<i32>,
    /// Agent in charge of the listing
    pub agent_id: String,
    /// Existing client to link as owner; mutually exclusive with the inline
    /// owner fields below
    pub owner_id: Option<String>,
    pub owner_first_name: Option<String>,
    pub owner_last_name: Option<String>,
    pub owner_email: Option<String>,
    pub owner_mobile_phone: Option<String>,
    pub owner_home_phone: Option<String>,
    pub owner_receives_email: Option<bool>,
    pub media: Option<Vec<MediaInput>>,
    pub video_links: Option<Vec<VideoLinkInput>>,
    /// Create path only: cross-post to the marketplace operator
    pub share_with_marketplace: Option<bool>,
}

impl PropertyInput {
    /// Coerce the raw input into a typed draft.
    pub fn into_draft(self) -> Result<PropertyDraft, DomainError> {
        let mut violations = Vec::new();

        let listing_type = match ListingType::from_str(&self.listing_type) {
            Ok(lt) => lt,
            Err(_) => {
                violations.push(FieldViolation::new("listingType", "Unknown listing type"));
                ListingType::Sale // placeholder; violations abort below
            }
        };

        let agent_id = match MemberId::parse(&self.agent_id) {
            Ok(id) => id,
            Err(_) => {
                violations.push(FieldViolation::new("agentId", "Invalid agent id"));
                MemberId::new()
            }
        };

        let owner = self.coerce_owner(&mut violations);

        let media = self
            .media
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, item)| coerce_media(index, item, &mut violations))
            .collect();

        let video_links = self
            .video_links
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, item)| coerce_video(index, item, &mut violations))
            .collect();

        let sale_price_dollars = coerce_money(
            "salePriceDollars",
            self.sale_price_dollars,
            &mut violations,
        );
        let rent_price_dollars = coerce_money(
            "rentPriceDollars",
            self.rent_price_dollars,
            &mut violations,
        );
        let tax_dollars = coerce_money("taxDollars", self.tax_dollars, &mut violations);

        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }

        Ok(PropertyDraft {
            title: self.title,
            address: self.address,
            description: self.description,
            listing_type,
            sale_price_dollars,
            rent_price_dollars,
            tax_dollars,
            fee_percent: self.fee_percent,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            parking_spaces: self.parking_spaces,
            floor: self.floor,
            area_m2: self.area_m2,
            construction_year: self.construction_year,
            agent_id,
            owner,
            media,
            video_links,
            share_with_marketplace: self.share_with_marketplace.unwrap_or(false),
        })
    }

    fn coerce_owner(&self, violations: &mut Vec<FieldViolation>) -> Option<OwnerSpec> {
        if let Some(owner_id) = self.owner_id.as_deref() {
            return match ClientId::parse(owner_id) {
                Ok(id) => Some(OwnerSpec::Existing(id)),
                Err(_) => {
                    violations.push(FieldViolation::new("ownerId", "Invalid owner id"));
                    None
                }
            };
        }

        let first = self.owner_first_name.as_deref().unwrap_or("").trim();
        let last = self.owner_last_name.as_deref().unwrap_or("").trim();
        if first.is_empty() && last.is_empty() {
            return None;
        }
        if first.is_empty() {
            violations.push(FieldViolation::new(
                "ownerFirstName",
                "Owner first name is required",
            ));
        }
        if last.is_empty() {
            violations.push(FieldViolation::new(
                "ownerLastName",
                "Owner last name is required",
            ));
        }

        Some(OwnerSpec::New(NewOwnerFields {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: self.owner_email.clone(),
            mobile_phone: self.owner_mobile_phone.clone(),
            home_phone: self.owner_home_phone.clone(),
            receives_email: self.owner_receives_email.unwrap_or(false),
        }))
    }
}

fn coerce_media(
    index: usize,
    item: MediaInput,
    violations: &mut Vec<FieldViolation>,
) -> MediaSubmission {
    let id = item.id.as_deref().and_then(|raw| {
        PhotoId::parse(raw)
            .map_err(|_| {
                violations.push(FieldViolation::new(
                    format!("media[{index}].id"),
                    "Invalid photo id",
                ))
            })
            .ok()
    });

    let content = item.content_base64.as_deref().and_then(|raw| {
        BASE64
            .decode(raw)
            .map_err(|_| {
                violations.push(FieldViolation::new(
                    format!("media[{index}].content"),
                    "Photo content is not valid base64",
                ))
            })
            .ok()
    });

    MediaSubmission {
        id,
        filename: item.filename,
        content,
        is_cover: item.is_cover_photo.unwrap_or(false),
        is_deleted: item.is_deleted.unwrap_or(false),
    }
}

fn coerce_video(
    index: usize,
    item: VideoLinkInput,
    violations: &mut Vec<FieldViolation>,
) -> VideoSubmission {
    let id = item.id.as_deref().and_then(|raw| {
        VideoId::parse(raw)
            .map_err(|_| {
                violations.push(FieldViolation::new(
                    format!("videoLinks[{index}].id"),
                    "Invalid video id",
                ))
            })
            .ok()
    });

    VideoSubmission {
        id,
        url: item.url,
        platform: None, // derived during validation
        is_deleted: item.is_deleted.unwrap_or(false),
    }
}

fn coerce_money(
    field: &str,
    value: Option<f64>,
    violations: &mut Vec<FieldViolation>,
) -> Option<Decimal> {
    value.and_then(|raw| {
        Decimal::try_from(raw)
            .map_err(|_| violations.push(FieldViolation::new(field, "Invalid amount")))
            .ok()
    })
}
