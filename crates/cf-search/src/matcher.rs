//! Apply a [`FilterState`] to an in-memory listing set.
//!
//! Set-valued criteria match when the listing has any selected value; an
//! empty selection matches everything. Token comparisons ignore ASCII case.

use std::cmp::Ordering;

use cf_core::entities::Listing;
use cf_core::enums::{SortField, SortOrder};

use crate::state::FilterState;

fn contains_token(selected: &[String], token: &str) -> bool {
    selected.iter().any(|s| s.eq_ignore_ascii_case(token))
}

fn any_selected(selected: &[String], values: &[String]) -> bool {
    selected.is_empty() || values.iter().any(|v| contains_token(selected, v))
}

fn one_selected(selected: &[String], value: &str) -> bool {
    selected.is_empty() || contains_token(selected, value)
}

fn matches_query(query: &str, listing: &Listing) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let hit = |text: &str| text.to_lowercase().contains(&needle);
    hit(&listing.title)
        || hit(&listing.description)
        || listing.short_description.as_deref().is_some_and(hit)
        || listing.tags.iter().any(|t| hit(t))
}

fn matches_flag(wanted: Option<bool>, actual: bool) -> bool {
    wanted.is_none_or(|w| w == actual)
}

/// Whether `listing` satisfies every criterion in `state`.
#[must_use]
pub fn matches(state: &FilterState, listing: &Listing) -> bool {
    let has_demo = listing.demo_url.as_deref().is_some_and(|u| !u.trim().is_empty());

    matches_query(&state.query, listing)
        && (state.categories.is_empty()
            || listing
                .category
                .as_deref()
                .is_some_and(|c| contains_token(&state.categories, c)))
        && any_selected(&state.languages, &listing.programming_languages)
        && any_selected(&state.tags, &listing.tags)
        && one_selected(&state.pricing_model, listing.pricing_model.as_str())
        && one_selected(&state.difficulty, listing.difficulty_level.as_str())
        && one_selected(&state.plagiarism_status, listing.plagiarism_status.as_str())
        && state.price_range.contains(listing.price)
        && listing.rating_average >= f64::from(state.min_rating)
        && matches_flag(state.is_open_source, listing.is_open_source)
        && matches_flag(state.is_verified_seller, listing.seller.is_verified)
        && matches_flag(state.has_demo_url, has_demo)
}

/// Ascending comparison of two listings on `field`.
#[must_use]
pub fn compare(field: SortField, a: &Listing, b: &Listing) -> Ordering {
    match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::RatingAverage => a.rating_average.total_cmp(&b.rating_average),
        SortField::DownloadCount => a.download_count.cmp(&b.download_count),
        SortField::ViewCount => a.view_count.cmp(&b.view_count),
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

/// Listings matching `state`, stably sorted by the selected field and order.
#[must_use]
pub fn apply<'a>(state: &FilterState, listings: &'a [Listing]) -> Vec<&'a Listing> {
    let mut hits: Vec<&Listing> = listings.iter().filter(|l| matches(state, l)).collect();
    hits.sort_by(|a, b| {
        let ordering = compare(state.sort_by, a, b);
        match state.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    tracing::debug!(
        total = listings.len(),
        matched = hits.len(),
        sort_by = %state.sort_by,
        sort_order = %state.sort_order,
        "applied filters"
    );
    hits
}
