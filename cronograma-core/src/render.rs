//! Filtering and list rendering.
//!
//! A render pass takes the store and the current selection and builds a
//! fresh list of rows. Nothing is reused from the previous pass: dropping
//! the old [`RenderOutput`] releases its pending visibility subscriptions.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::category::{Category, Filter, StyleToken};
use crate::filter_state::Selection;
use crate::schedule::{ScheduleEntry, ScheduleStore};
use crate::visibility::{AnimationState, RowId, Trigger, VisibilityEntry, VisibilityTracker};

const STAGGER_STEP_MS: u64 = 40;
const STAGGER_BASE_MS: u64 = 20;
const STAGGER_CAP_MS: u64 = 500;

/// Column titles of the list header.
pub const HEADER: [&str; 2] = ["Hora", "Actividad"];

/// Animation start offset for the row at `position` in the filtered list.
pub fn stagger_delay(position: usize) -> Duration {
    let ms = (position as u64)
        .saturating_mul(STAGGER_STEP_MS)
        .saturating_add(STAGGER_BASE_MS)
        .min(STAGGER_CAP_MS);
    Duration::from_millis(ms)
}

/// Whether an entry shows under the given active filters.
///
/// Recess rows and non-filterable categories always show. Filterable ones
/// show when active, or when no filter is active at all.
pub fn passes_filter(entry: &ScheduleEntry, active: &BTreeSet<Filter>) -> bool {
    match entry.category.filter() {
        Some(filter) => active.is_empty() || active.contains(&filter),
        None => true,
    }
}

/// Entries of the selected day that pass the filter, in source order.
pub fn filter_entries<'a>(store: &'a ScheduleStore, selection: &Selection) -> Vec<&'a ScheduleEntry> {
    store
        .entries(selection.day)
        .iter()
        .filter(|entry| passes_filter(entry, &selection.active))
        .collect()
}

/// "1 actividad", "N actividades".
pub fn counter_label(count: usize) -> String {
    if count == 1 {
        format!("{} actividad", count)
    } else {
        format!("{} actividades", count)
    }
}

/// One displayed row.
#[derive(Debug)]
pub struct RenderedRow {
    pub id: RowId,
    pub time: String,
    pub activity: String,
    pub category: Category,
    pub style: StyleToken,
    pub badge: Option<&'static str>,
    pub delay: Duration,
    trigger: Trigger,
}

impl RenderedRow {
    pub fn state(&self) -> AnimationState {
        self.trigger.state()
    }

    pub fn is_visible(&self) -> bool {
        self.state() == AnimationState::Visible
    }

    /// Whether the row still holds a visibility subscription.
    pub fn is_observed(&self) -> bool {
        self.trigger.is_subscribed()
    }

    /// Delay with two decimals, e.g. "0.06s".
    pub fn delay_label(&self) -> String {
        format!("{:.2}s", self.delay.as_secs_f64())
    }

    /// Presentation classes: `type-<tag>`, plus `receso` for recess rows.
    pub fn class_names(&self) -> Vec<String> {
        let mut classes = vec![format!("type-{}", self.category)];
        if self.category.is_receso() {
            classes.push("receso".to_string());
        }
        classes
    }
}

/// Result of one render pass.
#[derive(Debug)]
pub struct RenderOutput {
    pub generation: u64,
    pub rows: Vec<RenderedRow>,
}

impl RenderOutput {
    pub fn visible_count(&self) -> usize {
        self.rows.len()
    }

    pub fn counter(&self) -> String {
        counter_label(self.visible_count())
    }

    pub fn row(&self, id: RowId) -> Option<&RenderedRow> {
        self.row_index(id).map(|i| &self.rows[i])
    }

    /// Apply visibility notifications, in whatever order they arrive.
    ///
    /// Entries for other render passes or rows that already fired are
    /// ignored. Returns the rows that became visible, in delivery order.
    pub fn notify(&mut self, entries: &[VisibilityEntry]) -> Vec<RowId> {
        let mut fired = Vec::new();
        for entry in entries.iter().filter(|e| e.intersecting) {
            let Some(i) = self.row_index(entry.row) else {
                continue;
            };
            if self.rows[i].trigger.fire() {
                fired.push(entry.row);
            }
        }
        fired
    }

    fn row_index(&self, id: RowId) -> Option<usize> {
        (id.generation == self.generation && id.index < self.rows.len()).then_some(id.index)
    }
}

/// Builds render outputs. Owns the visibility tracker, if the host has one.
#[derive(Debug, Default)]
pub struct Renderer {
    generation: u64,
    tracker: Option<VisibilityTracker>,
}

impl Renderer {
    /// A renderer whose rows wait for visibility notifications.
    pub fn with_tracker(tracker: VisibilityTracker) -> Self {
        Renderer {
            generation: 0,
            tracker: Some(tracker),
        }
    }

    /// A renderer for hosts without a visibility signal: rows are visible
    /// as soon as they exist.
    pub fn immediate() -> Self {
        Renderer::default()
    }

    pub fn tracker(&self) -> Option<&VisibilityTracker> {
        self.tracker.as_ref()
    }

    pub fn render(&mut self, store: &ScheduleStore, selection: &Selection) -> RenderOutput {
        self.generation += 1;
        let generation = self.generation;

        let rows = filter_entries(store, selection)
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let id = RowId { generation, index };
                RenderedRow {
                    id,
                    time: entry.time.clone(),
                    activity: entry.activity.clone(),
                    category: entry.category.clone(),
                    style: entry.category.style(),
                    badge: entry.category.badge(),
                    delay: stagger_delay(index),
                    trigger: Trigger::new(id, self.tracker.as_ref()),
                }
            })
            .collect();

        RenderOutput { generation, rows }
    }
}
