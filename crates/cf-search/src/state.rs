use std::fmt;
use std::str::FromStr;

use cf_core::enums::{PlagiarismStatus, SortField, SortOrder};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Lowest selectable price.
pub const PRICE_FLOOR: u32 = 0;
/// Highest selectable price.
pub const PRICE_CEILING: u32 = 1000;
/// Highest selectable minimum rating.
pub const MAX_RATING: u8 = 5;

// ---------------------------------------------------------------------------
// PriceRange
// ---------------------------------------------------------------------------

/// Closed price interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl PriceRange {
    /// The whole selectable range, `[0, 1000]`.
    pub const FULL: Self = Self {
        min: PRICE_FLOOR,
        max: PRICE_CEILING,
    };

    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Clamp both bounds into the selectable range and order them.
    #[must_use]
    pub fn normalized(self) -> Self {
        let a = self.min.clamp(PRICE_FLOOR, PRICE_CEILING);
        let b = self.max.clamp(PRICE_FLOOR, PRICE_CEILING);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// True when the range excludes part of the selectable range.
    #[must_use]
    pub const fn is_narrowed(self) -> bool {
        self.min > PRICE_FLOOR || self.max < PRICE_CEILING
    }

    #[must_use]
    pub fn contains(self, price: f64) -> bool {
        price >= f64::from(self.min) && price <= f64::from(self.max)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${} - ${}", self.min, self.max)
    }
}

impl FromStr for PriceRange {
    type Err = SearchError;

    /// Parses `MIN-MAX` (e.g. `50-200`), ignoring `$` and whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SearchError::InvalidPriceRange(s.to_string());
        let cleaned: String = s.chars().filter(|c| *c != '$' && !c.is_whitespace()).collect();
        let (min, max) = cleaned.split_once('-').ok_or_else(invalid)?;
        let min = min.parse().map_err(|_| invalid())?;
        let max = max.parse().map_err(|_| invalid())?;
        Ok(Self { min, max })
    }
}

// ---------------------------------------------------------------------------
// Field selectors
// ---------------------------------------------------------------------------

/// Set-valued filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayField {
    Categories,
    Languages,
    PricingModel,
    Difficulty,
    Tags,
    PlagiarismStatus,
}

impl ArrayField {
    pub const ALL: [Self; 6] = [
        Self::Categories,
        Self::Languages,
        Self::PricingModel,
        Self::Difficulty,
        Self::Tags,
        Self::PlagiarismStatus,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Languages => "languages",
            Self::PricingModel => "pricing_model",
            Self::Difficulty => "difficulty",
            Self::Tags => "tags",
            Self::PlagiarismStatus => "plagiarism_status",
        }
    }
}

impl fmt::Display for ArrayField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArrayField {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| SearchError::UnknownField {
                kind: "array",
                value: s.to_string(),
            })
    }
}

/// Optional boolean filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagField {
    IsOpenSource,
    IsVerifiedSeller,
    HasDemoUrl,
}

impl FlagField {
    pub const ALL: [Self; 3] = [Self::IsOpenSource, Self::IsVerifiedSeller, Self::HasDemoUrl];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IsOpenSource => "is_open_source",
            Self::IsVerifiedSeller => "is_verified_seller",
            Self::HasDemoUrl => "has_demo_url",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::IsOpenSource => "Open Source",
            Self::IsVerifiedSeller => "Verified Sellers",
            Self::HasDemoUrl => "Has Demo",
        }
    }
}

impl fmt::Display for FlagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

/// The complete set of marketplace search and sort criteria.
///
/// Set-valued fields hold string tokens in selection order. Optional booleans
/// are `None` when the criterion is off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FilterState {
    pub query: String,
    pub categories: Vec<String>,
    pub languages: Vec<String>,
    pub price_range: PriceRange,
    pub pricing_model: Vec<String>,
    pub difficulty: Vec<String>,
    pub tags: Vec<String>,
    pub min_rating: u8,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub plagiarism_status: Vec<String>,
    pub is_open_source: Option<bool>,
    pub is_verified_seller: Option<bool>,
    pub has_demo_url: Option<bool>,
}

impl Default for FilterState {
    /// Empty query and selections, full price range, no minimum rating,
    /// newest first, clean listings only.
    fn default() -> Self {
        Self {
            query: String::new(),
            categories: Vec::new(),
            languages: Vec::new(),
            price_range: PriceRange::FULL,
            pricing_model: Vec::new(),
            difficulty: Vec::new(),
            tags: Vec::new(),
            min_rating: 0,
            sort_by: SortField::CreatedAt,
            sort_order: SortOrder::Desc,
            plagiarism_status: vec![PlagiarismStatus::Clean.as_str().to_string()],
            is_open_source: None,
            is_verified_seller: None,
            has_demo_url: None,
        }
    }
}

impl FilterState {
    #[must_use]
    pub fn array(&self, field: ArrayField) -> &[String] {
        match field {
            ArrayField::Categories => &self.categories,
            ArrayField::Languages => &self.languages,
            ArrayField::PricingModel => &self.pricing_model,
            ArrayField::Difficulty => &self.difficulty,
            ArrayField::Tags => &self.tags,
            ArrayField::PlagiarismStatus => &self.plagiarism_status,
        }
    }

    pub(crate) fn array_mut(&mut self, field: ArrayField) -> &mut Vec<String> {
        match field {
            ArrayField::Categories => &mut self.categories,
            ArrayField::Languages => &mut self.languages,
            ArrayField::PricingModel => &mut self.pricing_model,
            ArrayField::Difficulty => &mut self.difficulty,
            ArrayField::Tags => &mut self.tags,
            ArrayField::PlagiarismStatus => &mut self.plagiarism_status,
        }
    }

    #[must_use]
    pub const fn flag(&self, field: FlagField) -> Option<bool> {
        match field {
            FlagField::IsOpenSource => self.is_open_source,
            FlagField::IsVerifiedSeller => self.is_verified_seller,
            FlagField::HasDemoUrl => self.has_demo_url,
        }
    }

    pub(crate) const fn flag_mut(&mut self, field: FlagField) -> &mut Option<bool> {
        match field {
            FlagField::IsOpenSource => &mut self.is_open_source,
            FlagField::IsVerifiedSeller => &mut self.is_verified_seller,
            FlagField::HasDemoUrl => &mut self.has_demo_url,
        }
    }

    /// Number of active criteria, for the "N active" badge.
    ///
    /// Counts every selected category, language, difficulty, pricing model and
    /// tag, each set optional boolean, a non-zero minimum rating and a narrowed
    /// price range. The query and plagiarism statuses are not counted.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        let selections = self.categories.len()
            + self.languages.len()
            + self.difficulty.len()
            + self.pricing_model.len()
            + self.tags.len();
        let flags = FlagField::ALL
            .into_iter()
            .filter(|field| self.flag(*field).is_some())
            .count();
        selections
            + flags
            + usize::from(self.min_rating > 0)
            + usize::from(self.price_range.is_narrowed())
    }

    /// Enforce the range invariants: rating within 0–5, price bounds within
    /// `[0, 1000]` and ordered.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.min_rating = self.min_rating.min(MAX_RATING);
        self.price_range = self.price_range.normalized();
        self
    }
}
