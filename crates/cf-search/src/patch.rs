use cf_core::enums::{SortField, SortOrder};

use crate::state::{FilterState, PriceRange};

/// A partial update: every `Some` field overwrites the matching state field.
///
/// Optional-boolean fields are doubly optional: `None` leaves the field alone,
/// `Some(None)` turns the criterion off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub query: Option<String>,
    pub categories: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub price_range: Option<PriceRange>,
    pub pricing_model: Option<Vec<String>>,
    pub difficulty: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub min_rating: Option<u8>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    pub plagiarism_status: Option<Vec<String>>,
    pub is_open_source: Option<Option<bool>>,
    pub is_verified_seller: Option<Option<bool>>,
    pub has_demo_url: Option<Option<bool>>,
}

impl FilterPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn categories(mut self, values: Vec<String>) -> Self {
        self.categories = Some(values);
        self
    }

    #[must_use]
    pub fn languages(mut self, values: Vec<String>) -> Self {
        self.languages = Some(values);
        self
    }

    #[must_use]
    pub const fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    #[must_use]
    pub fn pricing_model(mut self, values: Vec<String>) -> Self {
        self.pricing_model = Some(values);
        self
    }

    #[must_use]
    pub fn difficulty(mut self, values: Vec<String>) -> Self {
        self.difficulty = Some(values);
        self
    }

    #[must_use]
    pub fn tags(mut self, values: Vec<String>) -> Self {
        self.tags = Some(values);
        self
    }

    #[must_use]
    pub const fn min_rating(mut self, rating: u8) -> Self {
        self.min_rating = Some(rating);
        self
    }

    #[must_use]
    pub const fn sort_by(mut self, field: SortField) -> Self {
        self.sort_by = Some(field);
        self
    }

    #[must_use]
    pub const fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    #[must_use]
    pub fn plagiarism_status(mut self, values: Vec<String>) -> Self {
        self.plagiarism_status = Some(values);
        self
    }

    #[must_use]
    pub const fn is_open_source(mut self, value: Option<bool>) -> Self {
        self.is_open_source = Some(value);
        self
    }

    #[must_use]
    pub const fn is_verified_seller(mut self, value: Option<bool>) -> Self {
        self.is_verified_seller = Some(value);
        self
    }

    #[must_use]
    pub const fn has_demo_url(mut self, value: Option<bool>) -> Self {
        self.has_demo_url = Some(value);
        self
    }

    /// True when the patch sets nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Produce a new state: `base` with every set field overwritten.
    #[must_use]
    pub fn apply_to(self, base: &FilterState) -> FilterState {
        let base = base.clone();
        FilterState {
            query: self.query.unwrap_or(base.query),
            categories: self.categories.unwrap_or(base.categories),
            languages: self.languages.unwrap_or(base.languages),
            price_range: self.price_range.unwrap_or(base.price_range),
            pricing_model: self.pricing_model.unwrap_or(base.pricing_model),
            difficulty: self.difficulty.unwrap_or(base.difficulty),
            tags: self.tags.unwrap_or(base.tags),
            min_rating: self.min_rating.unwrap_or(base.min_rating),
            sort_by: self.sort_by.unwrap_or(base.sort_by),
            sort_order: self.sort_order.unwrap_or(base.sort_order),
            plagiarism_status: self.plagiarism_status.unwrap_or(base.plagiarism_status),
            is_open_source: self.is_open_source.unwrap_or(base.is_open_source),
            is_verified_seller: self.is_verified_seller.unwrap_or(base.is_verified_seller),
            has_demo_url: self.has_demo_url.unwrap_or(base.has_demo_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_patch_is_identity() {
        let base = FilterState {
            query: "dashboard".into(),
            languages: vec!["Rust".into()],
            ..FilterState::default()
        };
        assert!(FilterPatch::new().is_empty());
        assert_eq!(FilterPatch::new().apply_to(&base), base);
    }

    #[test]
    fn only_set_fields_are_overwritten() {
        let base = FilterState {
            languages: vec!["Rust".into()],
            ..FilterState::default()
        };
        let next = FilterPatch::new()
            .min_rating(4)
            .sort_order(SortOrder::Asc)
            .apply_to(&base);
        assert_eq!(next.min_rating, 4);
        assert_eq!(next.sort_order, SortOrder::Asc);
        assert_eq!(next.languages, vec!["Rust"]);
        assert_eq!(base.min_rating, 0, "base is untouched");
    }

    #[test]
    fn flag_patch_distinguishes_unset_from_clear() {
        let base = FilterState {
            is_open_source: Some(true),
            has_demo_url: Some(true),
            ..FilterState::default()
        };
        let next = FilterPatch::new().is_open_source(None).apply_to(&base);
        assert_eq!(next.is_open_source, None);
        assert_eq!(next.has_demo_url, Some(true));
    }
}
