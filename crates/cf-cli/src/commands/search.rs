use std::path::Path;

use anyhow::Context;
use cf_config::CodeflowConfig;
use cf_core::entities::Listing;
use cf_search::catalog::{canonical_category, canonical_language, display_token, sort_options};
use cf_search::{FilterManager, FilterPatch, FilterState, FlagField, matcher};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::output::output_rows;
use crate::sample;

#[derive(Debug, Serialize)]
struct SearchResponse {
    active_filters: usize,
    applied: Vec<String>,
    sort: String,
    total: usize,
    matched: usize,
    filters: FilterState,
    listings: Vec<ListingRow>,
}

/// Card-sized view of a listing.
#[derive(Debug, Clone, Serialize)]
struct ListingRow {
    id: String,
    title: String,
    price: String,
    rating: f64,
    downloads: i64,
    difficulty: String,
    languages: Vec<String>,
    seller: String,
    verified: bool,
}

impl From<&Listing> for ListingRow {
    fn from(listing: &Listing) -> Self {
        let seller = &listing.seller;
        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            price: listing.price_label(),
            rating: listing.rating_average,
            downloads: listing.download_count,
            difficulty: listing.difficulty_level.to_string(),
            languages: listing.programming_languages.clone(),
            seller: seller
                .full_name
                .clone()
                .or_else(|| seller.username.clone())
                .unwrap_or_else(|| seller.id.clone()),
            verified: seller.is_verified,
        }
    }
}

/// Handle `cflow search`.
pub fn handle(
    args: &SearchArgs,
    flags: &GlobalFlags,
    config: &CodeflowConfig,
) -> anyhow::Result<()> {
    let listings = match args.catalog.as_deref() {
        Some(path) => load_catalog(path)?,
        None => sample::listings(chrono::Utc::now()),
    };
    let filters = build_filters(args);
    let limit = flags.limit_or(config.general.default_limit);

    let hits = matcher::apply(&filters, &listings);
    let rows = hits
        .iter()
        .take(limit)
        .map(|listing| ListingRow::from(*listing))
        .collect::<Vec<_>>();

    let response = SearchResponse {
        active_filters: filters.active_filter_count(),
        applied: applied_labels(&filters),
        sort: sort_label(&filters),
        total: listings.len(),
        matched: hits.len(),
        filters,
        listings: rows.clone(),
    };
    output_rows(&response, &rows, flags.format)
}

fn load_catalog(path: &Path) -> anyhow::Result<Vec<Listing>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("catalog {} is not a JSON array of listings", path.display()))
}

/// Translate command-line filters into a filter state.
fn build_filters(args: &SearchArgs) -> FilterState {
    let mut patch = FilterPatch::new()
        .categories(distinct(args.categories.iter().map(|c| {
            canonical_category(c).map_or_else(|| c.trim().to_string(), str::to_string)
        })))
        .languages(distinct(args.languages.iter().map(|l| {
            canonical_language(l).map_or_else(|| l.trim().to_string(), str::to_string)
        })))
        .pricing_model(distinct(args.pricing_models.iter().map(|p| p.as_str().to_string())))
        .difficulty(distinct(args.difficulties.iter().map(|d| d.as_str().to_string())));

    if let Some(query) = &args.query {
        patch = patch.query(query.trim());
    }
    if let Some(range) = args.price {
        patch = patch.price_range(range);
    }
    if let Some(rating) = args.min_rating {
        patch = patch.min_rating(rating);
    }
    if let Some(field) = args.sort {
        patch = patch.sort_by(field);
    }
    if let Some(order) = args.order {
        patch = patch.sort_order(order);
    }
    if !args.plagiarism.is_empty() {
        patch = patch.plagiarism_status(distinct(
            args.plagiarism.iter().map(|s| s.as_str().to_string()),
        ));
    }

    if patch.is_empty() {
        tracing::debug!("no filter flags given; searching with defaults");
    }
    let mut manager = FilterManager::detached(patch);
    for tag in &args.tags {
        manager.add_custom_tag(tag);
    }
    for (field, checked) in [
        (FlagField::IsOpenSource, args.open_source),
        (FlagField::IsVerifiedSeller, args.verified_seller),
        (FlagField::HasDemoUrl, args.has_demo),
    ] {
        if checked {
            manager.set_flag(field, true);
        }
    }
    manager.into_state()
}

/// One chip label per active filter, in filter panel order.
fn applied_labels(filters: &FilterState) -> Vec<String> {
    let mut labels = Vec::new();
    labels.extend(filters.categories.iter().cloned());
    labels.extend(filters.languages.iter().cloned());
    labels.extend(filters.pricing_model.iter().map(|p| display_token(p)));
    labels.extend(filters.difficulty.iter().map(|d| display_token(d)));
    labels.extend(filters.tags.iter().map(|t| format!("#{t}")));
    labels.extend(
        FlagField::ALL
            .into_iter()
            .filter(|field| filters.flag(*field).is_some())
            .map(|field| field.label().to_string()),
    );
    if filters.min_rating > 0 {
        labels.push(format!("{}+ stars", filters.min_rating));
    }
    if filters.price_range.is_narrowed() {
        let range = filters.price_range;
        labels.push(format!("${}-${}", range.min, range.max));
    }
    labels
}

fn sort_label(filters: &FilterState) -> String {
    let label = sort_options()
        .into_iter()
        .find(|(field, _)| *field == filters.sort_by)
        .map_or_else(|| filters.sort_by.to_string(), |(_, label)| label.to_string());
    format!("{label} ({})", filters.sort_order)
}

fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut out = Vec::new();
    for value in values {
        if !value.is_empty() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
