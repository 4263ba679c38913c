use std::path::PathBuf;

use cf_core::enums::{Difficulty, PlagiarismStatus, PricingModel, SortField, SortOrder};
use cf_search::PriceRange;
use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{AuthCommands, ProfileCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out and inspect the session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Profile of the signed-in user.
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Filter and sort marketplace listings.
    Search(SearchArgs),
    /// Print the JSON schema of a data type.
    Schema(SchemaArgs),
    /// Check configuration and stored credentials.
    Setup,
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Free-text query over title, description and tags.
    pub query: Option<String>,
    /// Category to include (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,
    /// Programming language to include (repeatable).
    #[arg(long = "language")]
    pub languages: Vec<String>,
    /// Pricing model: one_time, subscription, royalty (repeatable).
    #[arg(long = "pricing")]
    pub pricing_models: Vec<PricingModel>,
    /// Difficulty: beginner, intermediate, advanced, expert (repeatable).
    #[arg(long = "difficulty")]
    pub difficulties: Vec<Difficulty>,
    /// Tag to include (repeatable).
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Price range as MIN-MAX, e.g. 20-300.
    #[arg(long)]
    pub price: Option<PriceRange>,
    /// Minimum rating, 0 to 5.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
    pub min_rating: Option<u8>,
    /// Sort field: created_at, price, rating_average, download_count, view_count, title.
    #[arg(long)]
    pub sort: Option<SortField>,
    /// Sort order: asc or desc.
    #[arg(long)]
    pub order: Option<SortOrder>,
    /// Plagiarism status to show (repeatable; replaces the default `clean`).
    #[arg(long = "plagiarism")]
    pub plagiarism: Vec<PlagiarismStatus>,
    /// Only open-source listings.
    #[arg(long)]
    pub open_source: bool,
    /// Only listings from verified sellers.
    #[arg(long)]
    pub verified_seller: bool,
    /// Only listings with a live demo.
    #[arg(long)]
    pub has_demo: bool,
    /// JSON file with an array of listings (defaults to the built-in sample).
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type to describe.
    pub type_name: SchemaType,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Profile,
    Listing,
    Session,
    User,
    FilterState,
}
