//! # cf-search
//!
//! Marketplace search criteria for CodeFlow.
//!
//! - [`FilterState`]: the complete set of search and sort criteria
//! - [`FilterPatch`]: partial updates merged onto a state
//! - [`FilterManager`]: owns the current state and notifies a listener after
//!   every interaction
//! - [`catalog`]: option lists the filter panel offers
//! - [`matcher`]: applies a state to an in-memory listing set

pub mod catalog;
pub mod error;
pub mod manager;
pub mod matcher;
pub mod patch;
pub mod state;

pub use error::SearchError;
pub use manager::FilterManager;
pub use patch::FilterPatch;
pub use state::{ArrayField, FilterState, FlagField, PriceRange};
