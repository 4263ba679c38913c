use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Difficulty, PlagiarismStatus, PricingModel};

/// Seller columns joined onto a listing for card display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SellerSummary {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub reputation_score: f64,
}

/// A code listing as shown in marketplace browse and search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(default)]
    pub short_description: Option<String>,
    /// Display name of the listing's category.
    #[serde(default)]
    pub category: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub pricing_model: PricingModel,
    #[serde(default)]
    pub programming_languages: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub difficulty_level: Difficulty,
    #[serde(default)]
    pub rating_average: f64,
    #[serde(default)]
    pub rating_count: i64,
    #[serde(default)]
    pub download_count: i64,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub plagiarism_status: PlagiarismStatus,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_open_source: bool,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub repository_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub seller: SellerSummary,
}

impl Listing {
    /// Card price label, e.g. `$149`, `$199/mo`, `Free`.
    #[must_use]
    pub fn price_label(&self) -> String {
        if self.price <= 0.0 {
            return "Free".to_string();
        }
        format!("${}{}", self.price, self.pricing_model.price_suffix())
    }

    /// Summary line for cards: the short description when present.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.short_description
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.description)
    }
}
