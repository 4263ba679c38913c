//! Enumerations mirrored from the hosted database and the auth provider.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! matching the column values stored by the backend. Each enum exposes `ALL`
//! and `as_str()` so string tokens coming from the UI can be parsed with `FromStr`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

fn parse_variant<T: Copy>(
    kind: &'static str,
    all: &[T],
    as_str: impl Fn(T) -> &'static str,
    value: &str,
) -> Result<T, CoreError> {
    let wanted = value.trim();
    all.iter()
        .copied()
        .find(|variant| as_str(*variant).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CoreError::UnknownVariant {
            kind,
            value: value.to_string(),
        })
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Role stored on a profile row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Buyer,
    Seller,
    Admin,
}

impl UserRole {
    pub const ALL: [Self; 3] = [Self::Buyer, Self::Seller, Self::Admin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Seller => "seller",
            Self::Admin => "admin",
        }
    }

    /// Sellers and admins may publish listings.
    #[must_use]
    pub const fn can_sell(self) -> bool {
        matches!(self, Self::Seller | Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("user role", &Self::ALL, Self::as_str, s)
    }
}

// ---------------------------------------------------------------------------
// PricingModel
// ---------------------------------------------------------------------------

/// How a listing is paid for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    #[default]
    OneTime,
    Subscription,
    Royalty,
}

impl PricingModel {
    pub const ALL: [Self; 3] = [Self::OneTime, Self::Subscription, Self::Royalty];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneTime => "one_time",
            Self::Subscription => "subscription",
            Self::Royalty => "royalty",
        }
    }

    /// Suffix shown after a price (`$199/mo`).
    #[must_use]
    pub const fn price_suffix(self) -> &'static str {
        match self {
            Self::OneTime => "",
            Self::Subscription => "/mo",
            Self::Royalty => " + royalty",
        }
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingModel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("pricing model", &Self::ALL, Self::as_str, s)
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Implementation difficulty of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("difficulty", &Self::ALL, Self::as_str, s)
    }
}

// ---------------------------------------------------------------------------
// PlagiarismStatus
// ---------------------------------------------------------------------------

/// Classification stored per listing by the plagiarism pipeline.
///
/// Computed elsewhere; this crate only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlagiarismStatus {
    #[default]
    Pending,
    Clean,
    Flagged,
    Blocked,
}

impl PlagiarismStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Clean, Self::Flagged, Self::Blocked];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Clean => "clean",
            Self::Flagged => "flagged",
            Self::Blocked => "blocked",
        }
    }
}

impl fmt::Display for PlagiarismStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlagiarismStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("plagiarism status", &Self::ALL, Self::as_str, s)
    }
}

// ---------------------------------------------------------------------------
// SortField / SortOrder
// ---------------------------------------------------------------------------

/// Listing column a search result set can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    Price,
    RatingAverage,
    DownloadCount,
    ViewCount,
    Title,
}

impl SortField {
    pub const ALL: [Self; 6] = [
        Self::CreatedAt,
        Self::Price,
        Self::RatingAverage,
        Self::DownloadCount,
        Self::ViewCount,
        Self::Title,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Price => "price",
            Self::RatingAverage => "rating_average",
            Self::DownloadCount => "download_count",
            Self::ViewCount => "view_count",
            Self::Title => "title",
        }
    }

    /// Human label used by sort pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreatedAt => "Latest",
            Self::Price => "Price",
            Self::RatingAverage => "Rating",
            Self::DownloadCount => "Downloads",
            Self::ViewCount => "Views",
            Self::Title => "Name",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("sort field", &Self::ALL, Self::as_str, s)
    }
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub const ALL: [Self; 2] = [Self::Asc, Self::Desc];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("sort order", &Self::ALL, Self::as_str, s)
    }
}

// ---------------------------------------------------------------------------
// AuthEvent
// ---------------------------------------------------------------------------

/// Session lifecycle events pushed by the auth provider.
///
/// ```text
/// initial_session → signed_in → token_refreshed* → signed_out
///                             → user_updated*
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

impl AuthEvent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InitialSession => "initial_session",
            Self::SignedIn => "signed_in",
            Self::SignedOut => "signed_out",
            Self::TokenRefreshed => "token_refreshed",
            Self::UserUpdated => "user_updated",
        }
    }
}

impl fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_snake_case_column_values() {
        assert_eq!(
            serde_json::to_string(&PricingModel::OneTime).unwrap(),
            r#""one_time""#
        );
        assert_eq!(
            serde_json::to_string(&SortField::RatingAverage).unwrap(),
            r#""rating_average""#
        );
        let status: PlagiarismStatus = serde_json::from_str(r#""flagged""#).unwrap();
        assert_eq!(status, PlagiarismStatus::Flagged);
    }

    #[test]
    fn as_str_matches_serde_for_every_variant() {
        for field in SortField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json.trim_matches('"'), field.as_str());
        }
        for difficulty in Difficulty::ALL {
            let json = serde_json::to_string(&difficulty).unwrap();
            assert_eq!(json.trim_matches('"'), difficulty.as_str());
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("Seller".parse::<UserRole>().unwrap(), UserRole::Seller);
        assert_eq!(" DESC ".parse::<SortOrder>().unwrap(), SortOrder::Desc);
    }

    #[test]
    fn from_str_rejects_unknown_value() {
        let err = "popularity".parse::<SortField>().unwrap_err();
        assert!(err.to_string().contains("sort field"));
        assert!(err.to_string().contains("popularity"));
    }

    #[test]
    fn defaults_match_database_defaults() {
        assert_eq!(UserRole::default(), UserRole::Buyer);
        assert_eq!(PricingModel::default(), PricingModel::OneTime);
        assert_eq!(PlagiarismStatus::default(), PlagiarismStatus::Pending);
        assert_eq!(SortField::default(), SortField::CreatedAt);
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }

    #[test]
    fn sort_order_reverses() {
        assert_eq!(SortOrder::Asc.reversed(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.reversed(), SortOrder::Asc);
    }

    #[test]
    fn only_sellers_and_admins_can_sell() {
        assert!(!UserRole::Buyer.can_sell());
        assert!(UserRole::Seller.can_sell());
        assert!(UserRole::Admin.can_sell());
    }
}
