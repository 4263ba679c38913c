//! Filter-state manager.
//!
//! [`FilterManager`] owns one [`FilterState`] and replaces it wholesale on
//! every interaction, then hands the new state to the `on_change` listener.
//! It never diffs: an update that changes nothing still notifies. Querying a
//! dataset is left to the listener.

use cf_core::enums::SortField;

use crate::patch::FilterPatch;
use crate::state::{ArrayField, FilterState, FlagField, PriceRange};

/// Listener invoked with the complete state after every mutation.
pub type OnChange = Box<dyn FnMut(&FilterState) + Send>;

pub struct FilterManager {
    state: FilterState,
    on_change: Option<OnChange>,
}

impl FilterManager {
    /// Start from the default state.
    pub fn new(on_change: impl FnMut(&FilterState) + Send + 'static) -> Self {
        Self::with_initial(FilterPatch::default(), on_change)
    }

    /// Start from the default state overlaid with `initial`. Does not notify.
    pub fn with_initial(
        initial: FilterPatch,
        on_change: impl FnMut(&FilterState) + Send + 'static,
    ) -> Self {
        Self {
            state: initial.apply_to(&FilterState::default()).normalized(),
            on_change: Some(Box::new(on_change)),
        }
    }

    /// Manager without a listener; read the state with [`state`](Self::state).
    #[must_use]
    pub fn detached(initial: FilterPatch) -> Self {
        Self {
            state: initial.apply_to(&FilterState::default()).normalized(),
            on_change: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &FilterState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> FilterState {
        self.state
    }

    /// Recomputed from the current state on every call.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.state.active_filter_count()
    }

    /// Overwrite the fields set in `patch`.
    pub fn update_filters(&mut self, patch: FilterPatch) {
        let next = patch.apply_to(&self.state);
        self.replace(next);
    }

    /// Remove `value` from `field` if present, else append it.
    pub fn toggle_array_filter(&mut self, field: ArrayField, value: &str) {
        let mut next = self.state.clone();
        let values = next.array_mut(field);
        if let Some(index) = values.iter().position(|v| v == value) {
            values.remove(index);
        } else {
            values.push(value.to_string());
        }
        self.replace(next);
    }

    /// Append a tag typed by the user.
    ///
    /// Blank candidates and tags already selected are ignored without
    /// notifying. Returns whether the tag was added.
    pub fn add_custom_tag(&mut self, candidate: &str) -> bool {
        let tag = candidate.trim();
        if tag.is_empty() || self.state.tags.iter().any(|t| t == tag) {
            return false;
        }
        let mut next = self.state.clone();
        next.tags.push(tag.to_string());
        self.replace(next);
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        let mut next = self.state.clone();
        next.tags.retain(|t| t != tag);
        self.replace(next);
    }

    /// Reset every field to the default state.
    pub fn clear_all_filters(&mut self) {
        self.replace(FilterState::default());
    }

    /// Select a minimum rating. Selecting the current rating again clears it.
    pub fn select_min_rating(&mut self, rating: u8) {
        let next = if rating == self.state.min_rating { 0 } else { rating };
        self.update_filters(FilterPatch::new().min_rating(next));
    }

    pub fn toggle_sort_order(&mut self) {
        let order = self.state.sort_order.reversed();
        self.update_filters(FilterPatch::new().sort_order(order));
    }

    pub fn set_sort_by(&mut self, field: SortField) {
        self.update_filters(FilterPatch::new().sort_by(field));
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.update_filters(FilterPatch::new().query(query));
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.update_filters(FilterPatch::new().price_range(range));
    }

    /// Checkbox semantics: checked requires the property, unchecked turns the
    /// criterion off.
    pub fn set_flag(&mut self, field: FlagField, checked: bool) {
        let mut next = self.state.clone();
        *next.flag_mut(field) = checked.then_some(true);
        self.replace(next);
    }

    fn replace(&mut self, next: FilterState) {
        self.state = next.normalized();
        tracing::trace!(active = self.state.active_filter_count(), "filters changed");
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&self.state);
        }
    }
}

impl std::fmt::Debug for FilterManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterManager")
            .field("state", &self.state)
            .field("has_listener", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use cf_core::enums::SortOrder;
    use pretty_assertions::assert_eq;

    use super::*;

    fn recording() -> (FilterManager, Arc<Mutex<Vec<FilterState>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let manager = FilterManager::new(move |state| sink.lock().unwrap().push(state.clone()));
        (manager, seen)
    }

    #[test]
    fn with_initial_overlays_defaults_without_notifying() {
        let seen = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&seen);
        let manager = FilterManager::with_initial(
            FilterPatch::new().languages(vec!["Rust".into()]),
            move |_| *sink.lock().unwrap() += 1,
        );
        assert_eq!(manager.state().languages, vec!["Rust"]);
        assert_eq!(manager.state().plagiarism_status, vec!["clean"]);
        assert_eq!(*seen.lock().unwrap(), 0);
    }

    #[test]
    fn listener_sees_every_new_state() {
        let (mut manager, seen) = recording();
        manager.set_query("dashboard");
        manager.toggle_array_filter(ArrayField::Languages, "Go");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].query, "dashboard");
        assert!(seen[0].languages.is_empty());
        assert_eq!(seen[1].languages, vec!["Go"]);
        assert_eq!(&seen[1], manager.state());
    }

    #[test]
    fn toggle_removes_preserving_order() {
        let (mut manager, _) = recording();
        for lang in ["Rust", "Go", "Python"] {
            manager.toggle_array_filter(ArrayField::Languages, lang);
        }
        manager.toggle_array_filter(ArrayField::Languages, "Go");
        assert_eq!(manager.state().languages, vec!["Rust", "Python"]);
    }

    #[test]
    fn select_min_rating_toggles_off_on_repeat() {
        let (mut manager, seen) = recording();
        manager.select_min_rating(4);
        assert_eq!(manager.state().min_rating, 4);
        manager.select_min_rating(4);
        assert_eq!(manager.state().min_rating, 0);
        manager.select_min_rating(3);
        assert_eq!(manager.state().min_rating, 3);
        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[test]
    fn toggle_sort_order_flips() {
        let (mut manager, _) = recording();
        manager.toggle_sort_order();
        assert_eq!(manager.state().sort_order, SortOrder::Asc);
        manager.toggle_sort_order();
        assert_eq!(manager.state().sort_order, SortOrder::Desc);
    }

    #[test]
    fn set_flag_uses_checkbox_semantics() {
        let (mut manager, _) = recording();
        manager.set_flag(FlagField::HasDemoUrl, true);
        assert_eq!(manager.state().has_demo_url, Some(true));
        manager.set_flag(FlagField::HasDemoUrl, false);
        assert_eq!(manager.state().has_demo_url, None);
    }

    #[test]
    fn inverted_price_range_is_normalized() {
        let (mut manager, seen) = recording();
        manager.set_price_range(PriceRange::new(700, 100));
        assert_eq!(manager.state().price_range, PriceRange::new(100, 700));
        assert_eq!(seen.lock().unwrap()[0].price_range, PriceRange::new(100, 700));
    }

    #[test]
    fn add_custom_tag_trims_and_rejects_duplicates() {
        let (mut manager, seen) = recording();
        assert!(manager.add_custom_tag("  react "));
        assert!(!manager.add_custom_tag("react"));
        assert!(!manager.add_custom_tag("   "));
        assert_eq!(manager.state().tags, vec!["react"]);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn remove_tag_notifies() {
        let (mut manager, seen) = recording();
        manager.add_custom_tag("react");
        manager.add_custom_tag("hooks");
        manager.remove_tag("react");
        assert_eq!(manager.state().tags, vec!["hooks"]);
        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[test]
    fn detached_manager_tracks_state() {
        let mut manager = FilterManager::detached(FilterPatch::new());
        manager.set_sort_by(SortField::Price);
        assert_eq!(manager.into_state().sort_by, SortField::Price);
    }
}
