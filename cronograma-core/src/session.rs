//! A schedule session: store, filter state and the current view.
//!
//! Every user action mutates the filter state, persists it and renders the
//! whole list again. An optional hook runs after each render, for
//! presentation details that depend on the counter.

use crate::category::{Category, Filter};
use crate::filter_state::{FilterState, Selection};
use crate::loader::ScheduleSource;
use crate::render::{RenderOutput, Renderer};
use crate::schedule::{Day, ScheduleStore};
use crate::storage::Storage;
use crate::visibility::{RowId, VisibilityEntry};

type RenderHook = Box<dyn FnMut(&RenderOutput)>;

/// Entry of the day selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOption {
    pub day: Day,
    pub label: String,
    pub selected: bool,
}

/// Entry of the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub filter: Filter,
    pub pressed: bool,
}

pub struct Session<S: Storage> {
    store: ScheduleStore,
    filters: FilterState<S>,
    renderer: Renderer,
    view: RenderOutput,
    on_render: Option<RenderHook>,
}

impl<S: Storage> Session<S> {
    /// Restore saved choices, wait for the schedule, then render.
    pub async fn start(source: &ScheduleSource, mut filters: FilterState<S>, renderer: Renderer) -> Self {
        filters.restore();
        filters.restore_day();

        let store = source.load().await;
        Self::with_store(store, filters, renderer)
    }

    /// Build a session around an already loaded store and render it.
    pub fn with_store(store: ScheduleStore, filters: FilterState<S>, mut renderer: Renderer) -> Self {
        let view = renderer.render(&store, filters.selection());
        Session {
            store,
            filters,
            renderer,
            view,
            on_render: None,
        }
    }

    /// Run `hook` after every render from now on, and once right away.
    pub fn on_render(&mut self, mut hook: impl FnMut(&RenderOutput) + 'static) {
        hook(&self.view);
        self.on_render = Some(Box::new(hook));
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        self.filters.selection()
    }

    pub fn filter_state(&self) -> &FilterState<S> {
        &self.filters
    }

    pub fn view(&self) -> &RenderOutput {
        &self.view
    }

    /// Switch day. Selecting the current day does nothing at all.
    pub fn select_day(&mut self, day: Day) -> &RenderOutput {
        if self.filters.select_day(day) {
            self.rerender();
        }
        &self.view
    }

    /// Toggle a category. Non-filterable categories leave everything as is.
    pub fn toggle(&mut self, category: &Category) -> &RenderOutput {
        if self.filters.toggle(category) {
            self.rerender();
        }
        &self.view
    }

    pub fn set_all(&mut self, active: bool) -> &RenderOutput {
        self.filters.set_all(active);
        self.rerender();
        &self.view
    }

    pub fn toggle_all(&mut self) -> &RenderOutput {
        self.filters.toggle_all();
        self.rerender();
        &self.view
    }

    /// Forward visibility notifications to the current view.
    pub fn notify(&mut self, entries: &[VisibilityEntry]) -> Vec<RowId> {
        self.view.notify(entries)
    }

    pub fn day_options(&self, days: &[Day], label: impl Fn(Day) -> String) -> Vec<DayOption> {
        days.iter()
            .map(|&day| DayOption {
                day,
                label: label(day),
                selected: day == self.selection().day,
            })
            .collect()
    }

    pub fn filter_options(&self) -> Vec<FilterOption> {
        Filter::ALL
            .into_iter()
            .map(|filter| FilterOption {
                filter,
                pressed: self.selection().is_active(filter),
            })
            .collect()
    }

    fn rerender(&mut self) {
        self.view = self.renderer.render(&self.store, self.filters.selection());
        if let Some(hook) = self.on_render.as_mut() {
            hook(&self.view);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::filter_state::{DAY_KEY, FILTERS_KEY};
    use crate::schedule::ScheduleEntry;
    use crate::storage::MemoryStorage;
    use crate::visibility::VisibilityTracker;

    fn day13_store() -> ScheduleStore {
        [(
            13,
            vec![
                ScheduleEntry::new("10:00", "Redes", Category::Informatica),
                ScheduleEntry::new("11:00", "Café", Category::Receso),
            ],
        )]
        .into_iter()
        .collect()
    }

    fn session() -> Session<MemoryStorage> {
        Session::with_store(
            day13_store(),
            FilterState::new(MemoryStorage::new(), 13),
            Renderer::immediate(),
        )
    }

    #[test]
    fn day_switch_and_toggle_flow() {
        let mut session = session();
        assert_eq!(session.view().visible_count(), 2);
        assert_eq!(session.view().counter(), "2 actividades");

        let view = session.toggle(&Category::Informatica);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].category, Category::Receso);
        assert_eq!(view.counter(), "1 actividad");

        let view = session.select_day(14);
        assert!(view.rows.is_empty());
        assert_eq!(view.counter(), "0 actividades");
    }

    #[test]
    fn same_day_does_not_render_or_persist() {
        let mut session = session();
        let generation = session.view().generation;

        session.select_day(13);

        assert_eq!(session.view().generation, generation);
        assert_eq!(session.filter_state().storage().writes(), 0);
    }

    #[test]
    fn hook_runs_after_every_render() {
        let counters = Rc::new(RefCell::new(Vec::new()));
        let mut session = session();

        let seen = Rc::clone(&counters);
        session.on_render(move |view| seen.borrow_mut().push(view.counter()));
        session.toggle_all();
        session.toggle_all();
        session.toggle(&Category::Receso);

        assert_eq!(
            *counters.borrow(),
            vec!["2 actividades", "2 actividades", "2 actividades"]
        );
    }

    #[test]
    fn options_reflect_selection() {
        let mut session = session();
        session.toggle(&Category::Automotores);
        session.select_day(14);

        let days = session.day_options(&[13, 14], |d| format!("{} Nov", d));
        assert_eq!(days[0], DayOption { day: 13, label: "13 Nov".into(), selected: false });
        assert!(days[1].selected);

        let filters = session.filter_options();
        assert_eq!(
            filters,
            vec![
                FilterOption { filter: Filter::Informatica, pressed: true },
                FilterOption { filter: Filter::Automotores, pressed: false },
            ]
        );
    }

    #[test]
    fn visibility_is_forwarded_to_current_view() {
        let tracker = VisibilityTracker::new();
        let mut session = Session::with_store(
            day13_store(),
            FilterState::new(MemoryStorage::new(), 13),
            Renderer::with_tracker(tracker.clone()),
        );

        let first = session.view().rows[0].id;
        assert_eq!(session.notify(&[VisibilityEntry::visible(first)]), vec![first]);
        assert_eq!(tracker.observed_count(), 1);

        session.select_day(14);
        assert_eq!(tracker.observed_count(), 0);
    }

    #[tokio::test]
    async fn start_restores_then_loads() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(
            dir.path().join("data/schedule.json"),
            r#"{
                "13": [
                    {"time": "10:00", "activity": "Redes", "type": "informatica"},
                    {"time": "11:00", "activity": "Café", "type": "receso"}
                ],
                "14": [
                    {"time": "09:00", "activity": "Motores", "type": "automotores"},
                    {"time": "10:00", "activity": "Bases de datos", "type": "informatica"}
                ]
            }"#,
        )
        .unwrap();

        let storage = MemoryStorage::new()
            .with_value(FILTERS_KEY, r#"["automotores"]"#)
            .with_value(DAY_KEY, "14");
        let session = Session::start(
            &ScheduleSource::local(dir.path()),
            FilterState::new(storage, 13),
            Renderer::immediate(),
        )
        .await;

        assert_eq!(session.selection().day, 14);
        assert_eq!(session.view().rows.len(), 1);
        assert_eq!(session.view().rows[0].activity, "Motores");
    }

    #[tokio::test]
    async fn start_without_data_is_empty_but_interactive() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::start(
            &ScheduleSource::local(dir.path()),
            FilterState::new(MemoryStorage::new(), 13),
            Renderer::immediate(),
        )
        .await;

        assert!(session.store().is_empty());
        assert_eq!(session.view().counter(), "0 actividades");
        assert_eq!(session.toggle(&Category::Informatica).counter(), "0 actividades");
    }
}
