use chrono::{DateTime, Utc};
use juniper::GraphQLObject;
use serde::{Deserialize, Serialize};

use crate::domains::property::models::{Property, PropertyPhoto, PropertyVideo};

/// Property photo GraphQL data type
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "A photo stored with the image-hosting provider")]
pub struct PropertyPhotoData {
    pub id: String,
    pub remote_id: String,
    pub filename: String,
    pub is_cover_photo: bool,
    pub uploaded_at: DateTime<Utc>,
}

impl From<PropertyPhoto> for PropertyPhotoData {
    fn from(photo: PropertyPhoto) -> Self {
        Self {
            id: photo.id.to_string(),
            remote_id: photo.remote_id,
            filename: photo.filename,
            is_cover_photo: photo.is_cover,
            uploaded_at: photo.uploaded_at,
        }
    }
}

/// Property video GraphQL data type
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "A hosted video linked to a property")]
pub struct PropertyVideoData {
    pub id: String,
    pub url: String,
    /// 'youtube' or 'vimeo'
    pub platform: String,
}

impl From<PropertyVideo> for PropertyVideoData {
    fn from(video: PropertyVideo) -> Self {
        Self {
            id: video.id.to_string(),
            url: video.url,
            platform: video.platform,
        }
    }
}

/// Property GraphQL data type
///
/// Money comes back in decimal dollars; the stored value is integer cents.
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "A property listing")]
pub struct PropertyData {
    /// Unique identifier
    pub id: String,

    /// Organization the listing belongs to
    pub organization_id: String,

    /// Agent in charge
    pub agent_id: String,

    /// Owner of record, when linked
    pub owner_client_id: Option<String>,

    pub title: String,

    /// URL-safe unique identifier derived from the title
    pub slug: String,

    /// 'sale', 'rent', 'sale_rent', 'permutation_sale', 'permutation_rent'
    pub listing_type: String,

    pub sale_price_dollars: Option<f64>,

    pub rent_price_dollars: Option<f64>,

    pub tax_dollars: Option<f64>,

    pub fee_percent: Option<f64>,

    pub address: String,

    pub bedrooms: i32,

    pub bathrooms: i32,

    pub parking_spaces: i32,

    pub floor: i32,

    pub area_m2: Option<i32>,

    pub construction_year: Option<i32>,

    pub description: String,

    /// CRM sequence code within the organization
    pub sequence_number: i32,

    pub photos: Vec<PropertyPhotoData>,

    pub video_links: Vec<PropertyVideoData>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl PropertyData {
    pub fn from_parts(
        property: Property,
        photos: Vec<PropertyPhoto>,
        videos: Vec<PropertyVideo>,
    ) -> Self {
        use crate::common::money::to_dollars;
        use rust_decimal::prelude::ToPrimitive;

        let dollars = |cents: Option<i64>| cents.and_then(|c| to_dollars(c).to_f64());

        Self {
            id: property.id.to_string(),
            organization_id: property.organization_id.to_string(),
            agent_id: property.agent_id.to_string(),
            owner_client_id: property.owner_client_id.map(|id| id.to_string()),
            title: property.title,
            slug: property.slug,
            listing_type: property.listing_type,
            sale_price_dollars: dollars(property.sale_price_cents),
            rent_price_dollars: dollars(property.rent_price_cents),
            tax_dollars: dollars(property.tax_cents),
            fee_percent: property.fee_percent,
            address: property.address,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            parking_spaces: property.parking_spaces,
            floor: property.floor,
            area_m2: property.area_m2,
            construction_year: property.construction_year,
            description: property.description,
            sequence_number: property.sequence_number,
            photos: photos.into_iter().map(Into::into).collect(),
            video_links: videos.into_iter().map(Into::into).collect(),
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}

/// Result of a create/update save: the id plus any media warnings.
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
pub struct SavePropertyResult {
    pub property_id: String,
    pub warnings: Vec<String>,
}
