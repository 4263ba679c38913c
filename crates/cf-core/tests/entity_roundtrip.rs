//! Serde roundtrip and JsonSchema validation tests for the shared read models.

use cf_core::entities::{Listing, Profile, SellerSummary};
use cf_core::enums::*;
use cf_core::identity::{AuthUser, Session};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn fixed_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn seller() -> SellerSummary {
    SellerSummary {
        id: "seller1".into(),
        full_name: Some("Alex Thompson".into()),
        username: Some("alexdev".into()),
        avatar_url: None,
        is_verified: true,
        reputation_score: 4.9,
    }
}

fn listing() -> Listing {
    Listing {
        id: "1".into(),
        title: "React E-commerce Dashboard".into(),
        slug: "react-ecommerce-dashboard".into(),
        description: "A complete e-commerce admin dashboard.".into(),
        short_description: Some("Admin dashboard with analytics".into()),
        category: Some("Web Development".into()),
        price: 149.0,
        pricing_model: PricingModel::OneTime,
        programming_languages: vec!["TypeScript".into()],
        tags: vec!["dashboard".into(), "ecommerce".into()],
        difficulty_level: Difficulty::Intermediate,
        rating_average: 4.8,
        rating_count: 24,
        download_count: 156,
        view_count: 1205,
        like_count: 89,
        plagiarism_status: PlagiarismStatus::Clean,
        is_featured: true,
        is_open_source: false,
        demo_url: Some("https://demo.example.com".into()),
        repository_url: None,
        created_at: fixed_time(),
        seller: seller(),
    }
}

roundtrip_and_validate!(
    session_roundtrip,
    Session,
    Session {
        access_token: "header.payload.sig".into(),
        refresh_token: Some("refresh".into()),
        token_type: "bearer".into(),
        expires_at: fixed_time(),
        user: AuthUser {
            id: "user-1".into(),
            email: Some("dev@example.com".into()),
            phone: None,
            created_at: Some(fixed_time()),
        },
    }
);

roundtrip_and_validate!(
    profile_roundtrip,
    Profile,
    Profile {
        id: "user-1".into(),
        email: "dev@example.com".into(),
        full_name: Some("Sarah Chen".into()),
        username: Some("sarahc".into()),
        avatar_url: None,
        bio: Some("Backend developer".into()),
        location: None,
        website: None,
        github_username: None,
        twitter_username: None,
        role: UserRole::Seller,
        is_verified: true,
        reputation_score: 4.8,
        total_sales: 7,
        total_purchases: 0,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
);

roundtrip_and_validate!(listing_roundtrip, Listing, listing());

roundtrip_and_validate!(seller_roundtrip, SellerSummary, seller());

#[test]
fn price_label_reflects_pricing_model() {
    let mut item = listing();
    assert_eq!(item.price_label(), "$149");

    item.pricing_model = PricingModel::Subscription;
    item.price = 199.0;
    assert_eq!(item.price_label(), "$199/mo");

    item.price = 0.0;
    assert_eq!(item.price_label(), "Free");
}

#[test]
fn summary_prefers_short_description() {
    let mut item = listing();
    assert_eq!(item.summary(), "Admin dashboard with analytics");
    item.short_description = None;
    assert_eq!(item.summary(), "A complete e-commerce admin dashboard.");
}
