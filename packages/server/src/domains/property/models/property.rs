use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ClientId, MemberId, OrganizationId, PropertyId};

/// Listing type enum for type-safe querying
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    Sale,
    Rent,
    SaleRent,
    PermutationSale,
    PermutationRent,
}

impl ListingType {
    /// Listing modes that require a sale price.
    pub fn requires_sale_price(self) -> bool {
        matches!(
            self,
            ListingType::Sale | ListingType::SaleRent | ListingType::PermutationSale
        )
    }

    /// Listing modes that require a rent price.
    pub fn requires_rent_price(self) -> bool {
        matches!(
            self,
            ListingType::Rent | ListingType::SaleRent | ListingType::PermutationRent
        )
    }
}

impl std::fmt::Display for ListingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingType::Sale => write!(f, "sale"),
            ListingType::Rent => write!(f, "rent"),
            ListingType::SaleRent => write!(f, "sale_rent"),
            ListingType::PermutationSale => write!(f, "permutation_sale"),
            ListingType::PermutationRent => write!(f, "permutation_rent"),
        }
    }
}

impl std::str::FromStr for ListingType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sale" => Ok(ListingType::Sale),
            "rent" => Ok(ListingType::Rent),
            "sale_rent" => Ok(ListingType::SaleRent),
            "permutation_sale" => Ok(ListingType::PermutationSale),
            "permutation_rent" => Ok(ListingType::PermutationRent),
            _ => Err(anyhow::anyhow!("Invalid listing type: {}", s)),
        }
    }
}

/// A property listing. Money columns hold integer cents.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Property {
    pub id: PropertyId,
    pub organization_id: OrganizationId,
    pub agent_id: MemberId,
    pub owner_client_id: Option<ClientId>,
    pub title: String,
    pub slug: String,
    pub listing_type: String,
    pub sale_price_cents: Option<i64>,
    pub rent_price_cents: Option<i64>,
    pub tax_cents: Option<i64>,
    pub fee_percent: Option<f64>,
    pub address: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub parking_spaces: i32,
    pub floor: i32,
    pub area_m2: Option<i32>,
    pub construction_year: Option<i32>,
    pub description: String,
    pub sequence_number: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Scalar column values for an insert or update, already normalized:
/// money in cents, slug resolved, owner resolved.
#[derive(Debug, Clone)]
pub struct PropertyRecord {
    pub agent_id: MemberId,
    pub owner_client_id: Option<ClientId>,
    pub title: String,
    pub slug: String,
    pub listing_type: ListingType,
    pub sale_price_cents: Option<i64>,
    pub rent_price_cents: Option<i64>,
    pub tax_cents: Option<i64>,
    pub fee_percent: Option<f64>,
    pub address: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub parking_spaces: i32,
    pub floor: i32,
    pub area_m2: Option<i32>,
    pub construction_year: Option<i32>,
    pub description: String,
}

// =============================================================================
// Property Queries
// =============================================================================

impl Property {
    /// Slug uniqueness is global, not per organization.
    pub async fn slug_exists(slug: &str, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM properties WHERE slug = $1)")
            .bind(slug)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Slug check for the update path - ignores the property being updated.
    pub async fn slug_exists_excluding(
        slug: &str,
        property_id: PropertyId,
        pool: &PgPool,
    ) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM properties WHERE slug = $1 AND id <> $2)",
        )
        .bind(slug)
        .bind(property_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Next CRM sequence code for the organization. Runs inside the save
    /// transaction so concurrent saves cannot hand out the same number
    /// (the (organization, sequence) unique key backs this up).
    pub async fn next_sequence_number(
        organization_id: OrganizationId,
        conn: &mut PgConnection,
    ) -> Result<i32> {
        sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(sequence_number), 0) + 1 FROM properties WHERE organization_id = $1",
        )
        .bind(organization_id)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn insert(
        organization_id: OrganizationId,
        record: &PropertyRecord,
        sequence_number: i32,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO properties (
                organization_id, agent_id, owner_client_id, title, slug, listing_type,
                sale_price_cents, rent_price_cents, tax_cents, fee_percent,
                address, bedrooms, bathrooms, parking_spaces, floor, area_m2,
                construction_year, description, sequence_number
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(record.agent_id)
        .bind(record.owner_client_id)
        .bind(&record.title)
        .bind(&record.slug)
        .bind(record.listing_type.to_string())
        .bind(record.sale_price_cents)
        .bind(record.rent_price_cents)
        .bind(record.tax_cents)
        .bind(record.fee_percent)
        .bind(&record.address)
        .bind(record.bedrooms)
        .bind(record.bathrooms)
        .bind(record.parking_spaces)
        .bind(record.floor)
        .bind(record.area_m2)
        .bind(record.construction_year)
        .bind(&record.description)
        .bind(sequence_number)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    /// Overwrite the scalar columns (including slug and owner reference).
    pub async fn update_scalars(
        id: PropertyId,
        record: &PropertyRecord,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE properties
            SET agent_id = $2, owner_client_id = $3, title = $4, slug = $5,
                listing_type = $6, sale_price_cents = $7, rent_price_cents = $8,
                tax_cents = $9, fee_percent = $10, address = $11, bedrooms = $12,
                bathrooms = $13, parking_spaces = $14, floor = $15, area_m2 = $16,
                construction_year = $17, description = $18, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(record.agent_id)
        .bind(record.owner_client_id)
        .bind(&record.title)
        .bind(&record.slug)
        .bind(record.listing_type.to_string())
        .bind(record.sale_price_cents)
        .bind(record.rent_price_cents)
        .bind(record.tax_cents)
        .bind(record.fee_percent)
        .bind(&record.address)
        .bind(record.bedrooms)
        .bind(record.bathrooms)
        .bind(record.parking_spaces)
        .bind(record.floor)
        .bind(record.area_m2)
        .bind(record.construction_year)
        .bind(&record.description)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(
        id: PropertyId,
        organization_id: OrganizationId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM properties WHERE id = $1 AND organization_id = $2",
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM properties WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_for_organization(
        organization_id: OrganizationId,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM properties WHERE organization_id = $1 ORDER BY created_at DESC",
        )
        .bind(organization_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete the row. Photo and video rows cascade in the database; remote
    /// objects and attached notes are the delete activity's concern.
    pub async fn delete(id: PropertyId, conn: &mut PgConnection) -> Result<()> {
        sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn listing_type_roundtrip() {
        for lt in [
            ListingType::Sale,
            ListingType::Rent,
            ListingType::SaleRent,
            ListingType::PermutationSale,
            ListingType::PermutationRent,
        ] {
            assert_eq!(ListingType::from_str(&lt.to_string()).unwrap(), lt);
        }
    }

    #[test]
    fn price_requirements_per_listing_type() {
        assert!(ListingType::Sale.requires_sale_price());
        assert!(!ListingType::Sale.requires_rent_price());
        assert!(ListingType::Rent.requires_rent_price());
        assert!(!ListingType::Rent.requires_sale_price());
        assert!(ListingType::SaleRent.requires_sale_price());
        assert!(ListingType::SaleRent.requires_rent_price());
        assert!(ListingType::PermutationSale.requires_sale_price());
        assert!(ListingType::PermutationRent.requires_rent_price());
    }
}
