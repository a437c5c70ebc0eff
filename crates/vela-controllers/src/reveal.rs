#![forbid(unsafe_code)]

//! Staged mount reveal.
//!
//! [`StagedReveal`] models a mount animation where content blocks appear one
//! after another — heading, subtitle, call-to-action, stats — each after its
//! own delay from mount. Stages are indexed by their position in the delay
//! slice given at construction.
//!
//! When the user prefers reduced motion, the stagger is dropped entirely and
//! every stage is visible from the start.

use std::time::{Duration, Instant};

use vela_core::{ObserverId, Observers, TimerHandle, TimerQueue};

/// Controller revealing N stages after per-stage delays.
pub struct StagedReveal {
    revealed: Vec<bool>,
    timers: TimerQueue<usize>,
    handles: Vec<TimerHandle>,
    observers: Observers<usize>,
    disposed: bool,
}

impl StagedReveal {
    /// Create a controller with one stage per entry of `stage_delays`, each
    /// revealed `stage_delays[i]` after `now`.
    #[must_use]
    pub fn new(now: Instant, stage_delays: &[Duration]) -> Self {
        let mut timers = TimerQueue::new();
        let handles = stage_delays
            .iter()
            .enumerate()
            .map(|(stage, delay)| timers.schedule(now, *delay, stage))
            .collect();
        Self {
            revealed: vec![false; stage_delays.len()],
            timers,
            handles,
            observers: Observers::new(),
            disposed: false,
        }
    }

    /// Drop the stagger: mark every stage revealed immediately.
    ///
    /// Builder-style, intended for hosts honoring a reduced-motion
    /// preference. Pending stage timers are cancelled.
    #[must_use]
    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        if enabled {
            self.timers.clear();
            self.revealed.fill(true);
            tracing::debug!(stages = self.revealed.len(), "reveal stagger dropped");
        }
        self
    }

    /// Register an observer notified with each stage index as it reveals.
    pub fn observe(&mut self, observer: impl FnMut(&usize) + 'static) -> ObserverId {
        self.observers.subscribe(observer)
    }

    /// Remove a previously registered observer.
    pub fn unobserve(&mut self, id: ObserverId) {
        self.observers.unsubscribe(id);
    }

    /// Reveal stages whose delay has elapsed.
    ///
    /// Returns the stages newly revealed this turn, in stage order, and
    /// notifies observers once per stage.
    pub fn tick(&mut self, now: Instant) -> Vec<usize> {
        if self.disposed {
            return Vec::new();
        }
        let mut due = self.timers.poll_expired(now);
        due.sort_unstable();
        for &stage in &due {
            self.revealed[stage] = true;
            tracing::trace!(stage, "stage revealed");
            self.observers.notify(&stage);
        }
        due
    }

    /// Reveal a stage ahead of its timer (e.g. user interaction).
    ///
    /// Cancels the stage's pending timer. Out-of-range or already revealed
    /// stages are no-ops.
    pub fn reveal_now(&mut self, stage: usize) {
        if self.disposed || stage >= self.revealed.len() || self.revealed[stage] {
            return;
        }
        self.timers.cancel(self.handles[stage]);
        self.revealed[stage] = true;
        self.observers.notify(&stage);
    }

    /// Cancel all outstanding stage timers and retire the controller.
    pub fn dispose(&mut self) {
        self.timers.clear();
        self.disposed = true;
    }

    /// Whether `stage` has been revealed. Out-of-range stages are `false`.
    #[must_use]
    pub fn is_revealed(&self, stage: usize) -> bool {
        self.revealed.get(stage).copied().unwrap_or(false)
    }

    /// Whether every stage has been revealed.
    #[must_use]
    pub fn all_revealed(&self) -> bool {
        self.revealed.iter().all(|revealed| *revealed)
    }

    /// Number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.revealed.len()
    }

    /// Whether the controller has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl std::fmt::Debug for StagedReveal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedReveal")
            .field("revealed", &self.revealed)
            .field("pending", &self.timers.pending())
            .field("disposed", &self.disposed)
            .finish()
    }
}
