//! Read models for rows served by the hosted database.

mod listing;
mod profile;

pub use listing::{Listing, SellerSummary};
pub use profile::Profile;
