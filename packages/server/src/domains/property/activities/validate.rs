//! Pure validation of a property submission.
//!
//! Returns the normalized draft (trimmed strings, derived video platforms)
//! or the full list of field violations. No side effects.

use crate::common::FieldViolation;
use crate::domains::property::models::{PropertyDraft, VideoPlatform};

const MIN_DESCRIPTION_CHARS: usize = 20;
const MIN_CONSTRUCTION_YEAR: i32 = 1900;

const MAX_BATHROOMS: i32 = 10;
const MAX_BEDROOMS: i32 = 15;
const MAX_PARKING_SPACES: i32 = 20;
const MAX_FLOOR: i32 = 25;

/// Validate and normalize a draft. `current_year` is injected so the rule
/// stays a pure function of its inputs.
pub fn validate(
    mut draft: PropertyDraft,
    current_year: i32,
) -> Result<PropertyDraft, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    draft.title = draft.title.trim().to_string();
    draft.address = draft.address.trim().to_string();
    draft.description = draft.description.trim().to_string();

    if draft.title.is_empty() {
        violations.push(FieldViolation::new("title", "Title is required"));
    }
    if draft.address.is_empty() {
        violations.push(FieldViolation::new("address", "Address is required"));
    }
    if draft.description.is_empty() {
        violations.push(FieldViolation::new("description", "Description is required"));
    } else if draft.description.chars().count() < MIN_DESCRIPTION_CHARS {
        violations.push(FieldViolation::new(
            "description",
            format!("Description must be at least {MIN_DESCRIPTION_CHARS} characters"),
        ));
    }

    check_range(&mut violations, "bathrooms", draft.bathrooms, MAX_BATHROOMS);
    check_range(&mut violations, "bedrooms", draft.bedrooms, MAX_BEDROOMS);
    check_range(
        &mut violations,
        "parkingSpaces",
        draft.parking_spaces,
        MAX_PARKING_SPACES,
    );
    check_range(&mut violations, "floor", draft.floor, MAX_FLOOR);

    if let Some(area) = draft.area_m2 {
        if area <= 0 {
            violations.push(FieldViolation::new("areaM2", "Area must be positive"));
        }
    }

    if let Some(year) = draft.construction_year {
        if year < MIN_CONSTRUCTION_YEAR || year > current_year {
            violations.push(FieldViolation::new(
                "constructionYear",
                format!("Construction year must be between {MIN_CONSTRUCTION_YEAR} and {current_year}"),
            ));
        }
    }

    if draft.listing_type.requires_sale_price() && draft.sale_price_dollars.is_none() {
        violations.push(FieldViolation::new(
            "salePriceDollars",
            "Sale price is required for this listing type",
        ));
    }
    if draft.listing_type.requires_rent_price() && draft.rent_price_dollars.is_none() {
        violations.push(FieldViolation::new(
            "rentPriceDollars",
            "Rent price is required for this listing type",
        ));
    }
    for (field, amount) in [
        ("salePriceDollars", draft.sale_price_dollars),
        ("rentPriceDollars", draft.rent_price_dollars),
        ("taxDollars", draft.tax_dollars),
    ] {
        if let Some(amount) = amount {
            if amount.is_sign_negative() {
                violations.push(FieldViolation::new(field, "Amount cannot be negative"));
            }
        }
    }
    if let Some(fee) = draft.fee_percent {
        if !(0.0..=100.0).contains(&fee) {
            violations.push(FieldViolation::new(
                "feePercent",
                "Fee must be between 0 and 100 percent",
            ));
        }
    }

    // Media: at most one cover photo among the entries that will remain,
    // and new photos must actually carry a file.
    let cover_count = draft
        .media
        .iter()
        .filter(|m| !m.is_deleted && m.is_cover)
        .count();
    if cover_count > 1 {
        violations.push(FieldViolation::new(
            "media",
            "Only one photo can be the cover photo",
        ));
    }
    for (index, item) in draft.media.iter().enumerate() {
        if item.id.is_none() && !item.is_deleted {
            if item.filename.as_deref().is_none_or(|f| f.trim().is_empty()) {
                violations.push(FieldViolation::new(
                    format!("media[{index}].filename"),
                    "New photos need a filename",
                ));
            }
            if item.content.as_deref().is_none_or(<[u8]>::is_empty) {
                violations.push(FieldViolation::new(
                    format!("media[{index}].content"),
                    "New photos need file content",
                ));
            }
        }
    }

    // Videos: every surviving link must point at a known platform. The
    // platform tag is derived from the URL, never trusted from the client.
    for (index, video) in draft.video_links.iter_mut().enumerate() {
        if video.is_deleted {
            continue;
        }
        match VideoPlatform::from_url(&video.url) {
            Some(platform) => video.platform = Some(platform),
            None => violations.push(FieldViolation::new(
                format!("videoLinks[{index}].url"),
                "Video URL must point to a supported platform",
            )),
        }
    }

    if violations.is_empty() {
        Ok(draft)
    } else {
        Err(violations)
    }
}

fn check_range(violations: &mut Vec<FieldViolation>, field: &str, value: i32, max: i32) {
    if value < 0 || value > max {
        violations.push(FieldViolation::new(
            field,
            format!("Must be between 0 and {max}"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::MemberId;
    use crate::domains::property::models::{ListingType, MediaSubmission, VideoSubmission};

    const CURRENT_YEAR: i32 = 2026;

    fn base_draft(listing_type: ListingType) -> PropertyDraft {
        PropertyDraft {
            title: "Casa Bonita".to_string(),
            address: "Calle Mayor 1".to_string(),
            description: "A bright three-bedroom house near the river.".to_string(),
            listing_type,
            sale_price_dollars: None,
            rent_price_dollars: None,
            tax_dollars: None,
            fee_percent: None,
            bedrooms: 3,
            bathrooms: 2,
            parking_spaces: 1,
            floor: 0,
            area_m2: Some(120),
            construction_year: Some(1998),
            agent_id: MemberId::new(),
            owner: None,
            media: vec![],
            video_links: vec![],
            share_with_marketplace: false,
        }
    }

    fn violation_fields(result: Result<PropertyDraft, Vec<FieldViolation>>) -> Vec<String> {
        result
            .err()
            .unwrap_or_default()
            .into_iter()
            .map(|v| v.field)
            .collect()
    }

    #[test]
    fn sale_listing_requires_sale_price() {
        let draft = base_draft(ListingType::Sale);
        let fields = violation_fields(validate(draft, CURRENT_YEAR));
        assert_eq!(fields, vec!["salePriceDollars"]);

        let mut draft = base_draft(ListingType::Sale);
        draft.sale_price_dollars = Some("250000".parse().unwrap());
        assert!(validate(draft, CURRENT_YEAR).is_ok());
    }

    #[test]
    fn sale_rent_listing_requires_both_prices() {
        let mut draft = base_draft(ListingType::SaleRent);
        draft.sale_price_dollars = Some("250000".parse().unwrap());
        let fields = violation_fields(validate(draft, CURRENT_YEAR));
        assert_eq!(fields, vec!["rentPriceDollars"]);

        let mut draft = base_draft(ListingType::SaleRent);
        draft.rent_price_dollars = Some("900".parse().unwrap());
        let fields = violation_fields(validate(draft, CURRENT_YEAR));
        assert_eq!(fields, vec!["salePriceDollars"]);
    }

    #[test]
    fn short_description_is_rejected() {
        let mut draft = base_draft(ListingType::Rent);
        draft.rent_price_dollars = Some("600".parse().unwrap());
        draft.description = "Too short".to_string();
        let fields = violation_fields(validate(draft, CURRENT_YEAR));
        assert_eq!(fields, vec!["description"]);
    }

    #[test]
    fn numeric_fields_are_range_checked() {
        let mut draft = base_draft(ListingType::Rent);
        draft.rent_price_dollars = Some("600".parse().unwrap());
        draft.bathrooms = 11;
        draft.bedrooms = -1;
        draft.parking_spaces = 21;
        draft.floor = 26;
        let fields = violation_fields(validate(draft, CURRENT_YEAR));
        assert_eq!(fields, vec!["bathrooms", "bedrooms", "parkingSpaces", "floor"]);
    }

    #[test]
    fn construction_year_bounds() {
        let mut draft = base_draft(ListingType::Rent);
        draft.rent_price_dollars = Some("600".parse().unwrap());
        draft.construction_year = Some(1899);
        assert_eq!(
            violation_fields(validate(draft, CURRENT_YEAR)),
            vec!["constructionYear"]
        );

        let mut draft = base_draft(ListingType::Rent);
        draft.rent_price_dollars = Some("600".parse().unwrap());
        draft.construction_year = Some(CURRENT_YEAR + 1);
        assert_eq!(
            violation_fields(validate(draft, CURRENT_YEAR)),
            vec!["constructionYear"]
        );
    }

    #[test]
    fn two_cover_photos_fail_on_the_media_field() {
        let mut draft = base_draft(ListingType::Rent);
        draft.rent_price_dollars = Some("600".parse().unwrap());
        draft.media = vec![
            MediaSubmission {
                filename: Some("front.jpg".to_string()),
                content: Some(vec![1]),
                is_cover: true,
                ..Default::default()
            },
            MediaSubmission {
                filename: Some("back.jpg".to_string()),
                content: Some(vec![2]),
                is_cover: true,
                ..Default::default()
            },
        ];
        assert_eq!(violation_fields(validate(draft, CURRENT_YEAR)), vec!["media"]);
    }

    #[test]
    fn single_cover_photo_passes() {
        let mut draft = base_draft(ListingType::Rent);
        draft.rent_price_dollars = Some("600".parse().unwrap());
        draft.media = vec![MediaSubmission {
            filename: Some("front.jpg".to_string()),
            content: Some(vec![1]),
            is_cover: true,
            ..Default::default()
        }];
        assert!(validate(draft, CURRENT_YEAR).is_ok());
    }

    #[test]
    fn unknown_video_host_is_rejected_and_platform_derived_otherwise() {
        let mut draft = base_draft(ListingType::Rent);
        draft.rent_price_dollars = Some("600".parse().unwrap());
        draft.video_links = vec![
            VideoSubmission {
                id: None,
                url: "https://youtu.be/abc".to_string(),
                platform: None,
                is_deleted: false,
            },
            VideoSubmission {
                id: None,
                url: "https://example.com/clip".to_string(),
                platform: None,
                is_deleted: false,
            },
        ];
        let result = validate(draft, CURRENT_YEAR);
        assert_eq!(violation_fields(result), vec!["videoLinks[1].url"]);
    }

    #[test]
    fn strings_are_trimmed() {
        let mut draft = base_draft(ListingType::Rent);
        draft.rent_price_dollars = Some("600".parse().unwrap());
        draft.title = "  Casa Bonita  ".to_string();
        let validated = validate(draft, CURRENT_YEAR).unwrap();
        assert_eq!(validated.title, "Casa Bonita");
    }
}
