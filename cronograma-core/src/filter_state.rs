//! Selected day and active category filters, persisted across sessions.

use std::collections::BTreeSet;

use crate::category::{Category, Filter};
use crate::error::CronogramaError;
use crate::schedule::{Day, parse_day};
use crate::storage::Storage;

/// Storage key for the active filter set (JSON array of category strings).
pub const FILTERS_KEY: &str = "muestra_activeFilters_v1";
/// Storage key for the selected day (decimal string).
pub const DAY_KEY: &str = "muestra_selectedDay_v1";

pub const DEFAULT_DAY: Day = 13;

/// The view-relevant part of the filter state: which day, which filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub day: Day,
    pub active: BTreeSet<Filter>,
}

impl Selection {
    /// `day` with every filterable category active.
    pub fn all(day: Day) -> Self {
        Selection {
            day,
            active: Filter::ALL.into_iter().collect(),
        }
    }

    pub fn is_active(&self, filter: Filter) -> bool {
        self.active.contains(&filter)
    }

    pub fn all_active(&self) -> bool {
        Filter::ALL.iter().all(|f| self.active.contains(f))
    }
}

impl Default for Selection {
    fn default() -> Self {
        Selection::all(DEFAULT_DAY)
    }
}

/// Filter state owning its storage. Every mutation is written through;
/// write failures are ignored and the in-memory value stays authoritative.
pub struct FilterState<S: Storage> {
    selection: Selection,
    storage: S,
}

impl<S: Storage> FilterState<S> {
    pub fn new(storage: S, default_day: Day) -> Self {
        FilterState {
            selection: Selection::all(default_day),
            storage,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_day(&self) -> Day {
        self.selection.day
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Restore the persisted filter set.
    ///
    /// Returns whether a usable value was found. Unknown categories are
    /// dropped; a set that ends up empty becomes "all active".
    pub fn restore(&mut self) -> bool {
        let raw = match self.storage.get(FILTERS_KEY) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return false,
            Err(e) => {
                tracing::debug!(error = %e, "could not read stored filters");
                return false;
            }
        };

        let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring stored filters that are not a JSON array");
                return false;
            }
        };

        let mut active: BTreeSet<Filter> = values
            .iter()
            .filter_map(|v| v.as_str())
            .filter_map(|s| s.parse().ok())
            .collect();
        if active.is_empty() {
            active = Filter::ALL.into_iter().collect();
        }

        self.selection.active = active;
        true
    }

    /// Restore the persisted day. Returns whether a usable value was found.
    pub fn restore_day(&mut self) -> bool {
        let raw = match self.storage.get(DAY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                tracing::debug!(error = %e, "could not read stored day");
                return false;
            }
        };

        match parse_day(&raw) {
            Some(day) => {
                self.selection.day = day;
                true
            }
            None => {
                tracing::debug!(value = %raw, "ignoring stored day that is not a number");
                false
            }
        }
    }

    /// Flip a filterable category. Returns false (and does nothing) for any
    /// other category.
    pub fn toggle(&mut self, category: &Category) -> bool {
        let Some(filter) = category.filter() else {
            return false;
        };

        if !self.selection.active.remove(&filter) {
            self.selection.active.insert(filter);
        }
        self.save_filters();
        true
    }

    /// Set every filterable category on or off.
    pub fn set_all(&mut self, active: bool) {
        self.selection.active = if active {
            Filter::ALL.into_iter().collect()
        } else {
            BTreeSet::new()
        };
        self.save_filters();
    }

    /// The "all" button: clears the set when everything is active,
    /// activates everything otherwise.
    pub fn toggle_all(&mut self) {
        let all_active = self.selection.all_active();
        self.set_all(!all_active);
    }

    /// Switch day. Selecting the current day is a no-op and writes nothing.
    pub fn select_day(&mut self, day: Day) -> bool {
        if day == self.selection.day {
            return false;
        }
        self.selection.day = day;
        if let Err(e) = self.storage.set(DAY_KEY, &day.to_string()) {
            tracing::debug!(error = %e, "could not persist selected day");
        }
        true
    }

    fn save_filters(&mut self) {
        let values: Vec<&str> = self.selection.active.iter().map(Filter::as_str).collect();
        let result = serde_json::to_string(&values)
            .map_err(CronogramaError::from)
            .and_then(|json| self.storage.set(FILTERS_KEY, &json));
        if let Err(e) = result {
            tracing::debug!(error = %e, "could not persist filters");
        }
    }
}
