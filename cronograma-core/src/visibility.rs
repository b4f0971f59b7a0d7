//! One-shot visibility triggers for rendered rows.
//!
//! A [`VisibilityTracker`] keeps the set of rows currently waiting to be
//! seen. Each observed row gets a [`Subscription`]; dropping it stops the
//! observation. Rows drop their subscription the first time they become
//! visible, or when the render that produced them is discarded.
//!
//! Everything here is single-threaded, like the event loop it models.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Identity of a rendered row: which render pass produced it and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId {
    pub generation: u64,
    pub index: usize,
}

/// Animation state of a row. Only ever moves from `Pending` to `Visible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Pending,
    Visible,
}

/// A visibility notification delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityEntry {
    pub row: RowId,
    pub intersecting: bool,
}

impl VisibilityEntry {
    pub fn visible(row: RowId) -> Self {
        VisibilityEntry {
            row,
            intersecting: true,
        }
    }
}

/// Registry of observed rows.
#[derive(Debug, Clone, Default)]
pub struct VisibilityTracker {
    observed: Rc<RefCell<BTreeSet<RowId>>>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        VisibilityTracker::default()
    }

    pub fn observe(&self, row: RowId) -> Subscription {
        self.observed.borrow_mut().insert(row);
        Subscription {
            row,
            observed: Rc::clone(&self.observed),
        }
    }

    pub fn is_observed(&self, row: RowId) -> bool {
        self.observed.borrow().contains(&row)
    }

    /// Rows still waiting to be seen, in render order.
    pub fn observed(&self) -> Vec<RowId> {
        self.observed.borrow().iter().copied().collect()
    }

    pub fn observed_count(&self) -> usize {
        self.observed.borrow().len()
    }
}

/// Handle for one observed row. Unobserves on drop.
#[derive(Debug)]
pub struct Subscription {
    row: RowId,
    observed: Rc<RefCell<BTreeSet<RowId>>>,
}

impl Subscription {
    pub fn row(&self) -> RowId {
        self.row
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.observed.borrow_mut().remove(&self.row);
    }
}

/// Per-row trigger: pending until first seen, then visible forever.
#[derive(Debug)]
pub struct Trigger {
    state: AnimationState,
    subscription: Option<Subscription>,
}

impl Trigger {
    /// A trigger waiting on `tracker`, or already visible when there is
    /// no tracker to wait on.
    pub fn new(row: RowId, tracker: Option<&VisibilityTracker>) -> Self {
        match tracker {
            Some(tracker) => Trigger {
                state: AnimationState::Pending,
                subscription: Some(tracker.observe(row)),
            },
            None => Trigger {
                state: AnimationState::Visible,
                subscription: None,
            },
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Mark the row visible. Returns true only on the first call.
    pub fn fire(&mut self) -> bool {
        if self.state == AnimationState::Visible {
            return false;
        }
        self.state = AnimationState::Visible;
        self.subscription = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize) -> RowId {
        RowId { generation: 1, index }
    }

    #[test]
    fn trigger_fires_once_and_releases() {
        let tracker = VisibilityTracker::new();
        let mut trigger = Trigger::new(row(0), Some(&tracker));

        assert_eq!(trigger.state(), AnimationState::Pending);
        assert!(tracker.is_observed(row(0)));

        assert!(trigger.fire());
        assert_eq!(trigger.state(), AnimationState::Visible);
        assert!(!tracker.is_observed(row(0)));

        assert!(!trigger.fire());
        assert_eq!(trigger.state(), AnimationState::Visible);
    }

    #[test]
    fn dropping_a_pending_trigger_unobserves() {
        let tracker = VisibilityTracker::new();
        let a = Trigger::new(row(0), Some(&tracker));
        let _b = Trigger::new(row(1), Some(&tracker));
        assert_eq!(tracker.observed_count(), 2);

        drop(a);
        assert_eq!(tracker.observed(), vec![row(1)]);
    }

    #[test]
    fn no_tracker_means_visible_immediately() {
        let trigger = Trigger::new(row(0), None);
        assert_eq!(trigger.state(), AnimationState::Visible);
        assert!(!trigger.is_subscribed());
    }
}
