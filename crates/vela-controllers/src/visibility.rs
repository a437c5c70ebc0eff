#![forbid(unsafe_code)]

//! Timed panel visibility.
//!
//! [`PanelVisibility`] models a panel that mounts expanded and collapses on
//! its own after a fixed delay — a floating info window that gets out of the
//! way once the user has had a chance to read it. After that single automatic
//! collapse, visibility changes only on explicit user action.
//!
//! # Invariants
//!
//! - At most one pending auto-collapse deadline exists at a time.
//! - The auto-collapse fires at most once per controller, and only from the
//!   initial mount; [`expand`](PanelVisibility::expand) never re-arms it.
//! - Every explicit transition cancels the pending auto-collapse first, so a
//!   manual collapse can never be followed by a redundant timer firing.
//! - After [`dispose`](PanelVisibility::dispose), every method is a no-op.
//!
//! The auto-collapse is deliberately unconditional: it does not consider
//! hover or focus, matching the panel behavior this controller was built for.

use std::time::{Duration, Instant};

use vela_core::{ObserverId, Observers, OneShot};

/// Current visibility of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    /// The full panel is shown.
    Expanded,
    /// Only the collapsed affordance (e.g. a floating button) is shown.
    Collapsed,
}

/// Transition notification delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEvent {
    /// The panel was expanded by explicit action.
    Expanded,
    /// The panel was collapsed by explicit action.
    Collapsed,
    /// The panel was collapsed by the one-shot auto-collapse timer.
    AutoCollapsed,
}

/// Expanded/collapsed controller with a one-shot auto-collapse.
pub struct PanelVisibility {
    state: VisibilityState,
    auto_collapse: OneShot,
    observers: Observers<VisibilityEvent>,
    disposed: bool,
    auto_collapses: u32,
}

impl PanelVisibility {
    /// Create a controller in the `Expanded` state with an auto-collapse
    /// armed to fire `auto_collapse_delay` after `now`.
    #[must_use]
    pub fn new(now: Instant, auto_collapse_delay: Duration) -> Self {
        Self {
            state: VisibilityState::Expanded,
            auto_collapse: OneShot::armed(now, auto_collapse_delay),
            observers: Observers::new(),
            disposed: false,
            auto_collapses: 0,
        }
    }

    /// Register an observer for visibility transitions.
    pub fn observe(&mut self, observer: impl FnMut(&VisibilityEvent) + 'static) -> ObserverId {
        self.observers.subscribe(observer)
    }

    /// Remove a previously registered observer.
    pub fn unobserve(&mut self, id: ObserverId) {
        self.observers.unsubscribe(id);
    }

    /// Explicitly expand the panel.
    ///
    /// Cancels any pending auto-collapse without rescheduling it; the
    /// auto-collapse only ever fires from the initial mount. Idempotent:
    /// expanding an expanded panel changes nothing and notifies nobody.
    pub fn expand(&mut self) {
        if self.disposed {
            return;
        }
        self.auto_collapse.cancel();
        if self.state != VisibilityState::Expanded {
            self.state = VisibilityState::Expanded;
            tracing::debug!("panel expanded");
            self.observers.notify(&VisibilityEvent::Expanded);
        }
    }

    /// Explicitly collapse the panel.
    ///
    /// Cancels any pending auto-collapse so the timer cannot fire a redundant
    /// transition later. Idempotent.
    pub fn collapse(&mut self) {
        if self.disposed {
            return;
        }
        self.auto_collapse.cancel();
        if self.state != VisibilityState::Collapsed {
            self.state = VisibilityState::Collapsed;
            tracing::debug!("panel collapsed");
            self.observers.notify(&VisibilityEvent::Collapsed);
        }
    }

    /// Apply the auto-collapse if its deadline has passed.
    ///
    /// Call once per event-loop turn with the current instant.
    pub fn tick(&mut self, now: Instant) {
        if self.disposed {
            return;
        }
        if self.auto_collapse.poll(now) && self.state == VisibilityState::Expanded {
            self.state = VisibilityState::Collapsed;
            self.auto_collapses += 1;
            tracing::debug!("panel auto-collapsed");
            self.observers.notify(&VisibilityEvent::AutoCollapsed);
        }
    }

    /// Cancel the pending timer and retire the controller.
    ///
    /// All subsequent calls, including `tick`, are no-ops.
    pub fn dispose(&mut self) {
        self.auto_collapse.cancel();
        self.disposed = true;
    }

    /// Current visibility.
    #[must_use]
    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Whether the controller has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of automatic collapses applied (0 or 1).
    #[must_use]
    pub fn auto_collapse_count(&self) -> u32 {
        self.auto_collapses
    }
}

impl std::fmt::Debug for PanelVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelVisibility")
            .field("state", &self.state)
            .field("armed", &self.auto_collapse.is_armed())
            .field("disposed", &self.disposed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DELAY: Duration = Duration::from_millis(5_000);

    fn now() -> Instant {
        Instant::now()
    }

    fn at(t: Instant, ms: u64) -> Instant {
        t + Duration::from_millis(ms)
    }

    // --- Auto-collapse tests ---

    #[test]
    fn starts_expanded() {
        let panel = PanelVisibility::new(now(), DELAY);
        assert_eq!(panel.state(), VisibilityState::Expanded);
        assert!(!panel.is_disposed());
    }

    #[test]
    fn auto_collapses_exactly_at_delay() {
        let t = now();
        let mut panel = PanelVisibility::new(t, DELAY);

        panel.tick(at(t, 4_999));
        assert_eq!(panel.state(), VisibilityState::Expanded);

        panel.tick(at(t, 5_000));
        assert_eq!(panel.state(), VisibilityState::Collapsed);
        assert_eq!(panel.auto_collapse_count(), 1);
    }

    #[test]
    fn auto_collapse_fires_only_once() {
        let t = now();
        let mut panel = PanelVisibility::new(t, DELAY);

        panel.tick(at(t, 5_000));
        panel.tick(at(t, 10_000));
        panel.tick(at(t, 60_000));

        assert_eq!(panel.auto_collapse_count(), 1);
    }

    #[test]
    fn manual_collapse_before_delay_cancels_timer() {
        // delay=5000ms, manual collapse at 1000ms: Collapsed at t=1000ms
        // and still exactly one transition by t=6000ms.
        let t = now();
        let mut panel = PanelVisibility::new(t, DELAY);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        panel.observe(move |event| sink.borrow_mut().push(*event));

        panel.collapse();
        assert_eq!(panel.state(), VisibilityState::Collapsed);

        panel.tick(at(t, 6_000));
        assert_eq!(panel.state(), VisibilityState::Collapsed);
        assert_eq!(panel.auto_collapse_count(), 0);
        assert_eq!(*events.borrow(), vec![VisibilityEvent::Collapsed]);
    }

    #[test]
    fn expand_does_not_rearm_auto_collapse() {
        let t = now();
        let mut panel = PanelVisibility::new(t, DELAY);

        panel.tick(at(t, 5_000));
        panel.expand();
        assert_eq!(panel.state(), VisibilityState::Expanded);

        // No second auto-collapse, ever.
        panel.tick(at(t, 20_000));
        assert_eq!(panel.state(), VisibilityState::Expanded);
        assert_eq!(panel.auto_collapse_count(), 1);
    }

    #[test]
    fn expand_before_delay_cancels_auto_collapse() {
        let t = now();
        let mut panel = PanelVisibility::new(t, DELAY);

        panel.expand(); // Already expanded, but cancels the timer.
        panel.tick(at(t, 6_000));
        assert_eq!(panel.state(), VisibilityState::Expanded);
        assert_eq!(panel.auto_collapse_count(), 0);
    }

    // --- Idempotence tests ---

    #[test]
    fn repeated_transitions_notify_once() {
        let t = now();
        let mut panel = PanelVisibility::new(t, DELAY);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        panel.observe(move |event| sink.borrow_mut().push(*event));

        panel.collapse();
        panel.collapse();
        panel.expand();
        panel.expand();

        assert_eq!(
            *events.borrow(),
            vec![VisibilityEvent::Collapsed, VisibilityEvent::Expanded]
        );
    }

    // --- Dispose tests ---

    #[test]
    fn dispose_prevents_auto_collapse() {
        let t = now();
        let mut panel = PanelVisibility::new(t, DELAY);

        panel.dispose();
        panel.tick(at(t, 10_000));

        assert_eq!(panel.state(), VisibilityState::Expanded);
        assert_eq!(panel.auto_collapse_count(), 0);
        assert!(panel.is_disposed());
    }

    #[test]
    fn methods_after_dispose_are_noops() {
        let t = now();
        let mut panel = PanelVisibility::new(t, DELAY);
        panel.dispose();

        panel.collapse();
        panel.expand();
        panel.tick(at(t, 10_000));

        assert_eq!(panel.state(), VisibilityState::Expanded);
    }

    // --- Observer tests ---

    #[test]
    fn auto_collapse_notifies_with_timer_cause() {
        let t = now();
        let mut panel = PanelVisibility::new(t, DELAY);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        panel.observe(move |event| sink.borrow_mut().push(*event));

        panel.tick(at(t, 5_000));
        assert_eq!(*events.borrow(), vec![VisibilityEvent::AutoCollapsed]);
    }

    #[test]
    fn unobserve_stops_notifications() {
        let t = now();
        let mut panel = PanelVisibility::new(t, DELAY);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let id = panel.observe(move |event| sink.borrow_mut().push(*event));

        panel.unobserve(id);
        panel.collapse();
        assert!(events.borrow().is_empty());
    }
}
