//! Test fixtures: organizations, members, and draft builders.

use sqlx::PgPool;

use server_core::common::MemberId;
use server_core::domains::member::Member;
use server_core::domains::organization::Organization;
use server_core::domains::property::models::{ListingType, PropertyDraft};

/// Create a fresh organization for the test.
pub async fn create_test_org(pool: &PgPool) -> Organization {
    Organization::create("Test Realty", pool)
        .await
        .expect("failed to create test organization")
}

/// Create an agent within the organization.
pub async fn create_test_member(org: &Organization, email: &str, pool: &PgPool) -> Member {
    Member::create(org.id, "Test Agent", email, false, pool)
        .await
        .expect("failed to create test member")
}

/// A minimal valid RENT draft: no owner, no media, no videos.
pub fn rent_draft(agent_id: MemberId, title: &str) -> PropertyDraft {
    PropertyDraft {
        title: title.to_string(),
        address: "Calle Mayor 1, Madrid".to_string(),
        description: "A bright two-bedroom flat close to the city center.".to_string(),
        listing_type: ListingType::Rent,
        sale_price_dollars: None,
        rent_price_dollars: Some("600".parse().unwrap()),
        tax_dollars: None,
        fee_percent: None,
        bedrooms: 2,
        bathrooms: 1,
        parking_spaces: 0,
        floor: 3,
        area_m2: Some(78),
        construction_year: Some(1995),
        agent_id,
        owner: None,
        media: vec![],
        video_links: vec![],
        share_with_marketplace: false,
    }
}
