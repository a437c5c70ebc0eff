#![forbid(unsafe_code)]

//! Cancellable single-shot timers.
//!
//! Two primitives cover every deferred effect in Vela:
//!
//! - [`OneShot`] — one owned deadline. Arm it, optionally cancel it, and poll
//!   it with the current instant; it reports expiry exactly once.
//! - [`TimerQueue`] — many outstanding deadlines behind opaque
//!   [`TimerHandle`]s, each carrying a caller-supplied token that is handed
//!   back when the deadline expires.
//!
//! Neither primitive owns a thread. Expiry is detected by comparing the
//! caller's `now` against stored deadlines, so the same code runs unchanged
//! against a wall clock or a simulated one.
//!
//! # Invariants
//!
//! - At most one pending deadline per [`OneShot`]; re-arming replaces it.
//! - A deadline fires at most once, on the first poll at or past it.
//! - Cancellation is idempotent: cancelling an unarmed, spent, or
//!   already-cancelled timer is a safe no-op.
//! - [`TimerHandle`]s are never reused within a queue instance.

use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// OneShot
// ---------------------------------------------------------------------------

/// An owned, cancellable, single-shot deadline.
///
/// # Example
///
/// ```
/// use vela_core::timer::OneShot;
/// use std::time::{Duration, Instant};
///
/// let t = Instant::now();
/// let mut timer = OneShot::new();
/// timer.arm(t, Duration::from_millis(100));
///
/// assert!(!timer.poll(t + Duration::from_millis(99)));
/// assert!(timer.poll(t + Duration::from_millis(100)));
/// // Spent: never fires again.
/// assert!(!timer.poll(t + Duration::from_millis(200)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OneShot {
    deadline: Option<Instant>,
}

impl OneShot {
    /// Create an unarmed timer.
    #[must_use]
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Create a timer already armed to fire `delay` after `now`.
    #[must_use]
    pub fn armed(now: Instant, delay: Duration) -> Self {
        let mut timer = Self::new();
        timer.arm(now, delay);
        timer
    }

    /// Arm the timer to fire `delay` after `now`.
    ///
    /// Replaces any pending deadline.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
        tracing::trace!(delay_ms = delay.as_millis() as u64, "oneshot armed");
    }

    /// Cancel any pending deadline.
    ///
    /// Idempotent: safe to call on an unarmed or spent timer.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            tracing::trace!("oneshot cancelled");
        }
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Poll the timer against `now`.
    ///
    /// Returns `true` exactly once, the first time `now` is at or past the
    /// armed deadline. The timer is spent afterwards until re-armed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                tracing::trace!("oneshot fired");
                true
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// TimerQueue
// ---------------------------------------------------------------------------

/// Opaque handle identifying a scheduled [`TimerQueue`] entry.
///
/// Handles are unique for the lifetime of their queue and remain safe to pass
/// to [`TimerQueue::cancel`] after the entry has fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Entry<T> {
    handle: TimerHandle,
    deadline: Instant,
    token: T,
}

/// A queue of outstanding single-shot deadlines, each carrying a token.
///
/// The token stands in for a callback: when an entry expires the token is
/// returned to the caller, which maps it back onto whatever action it
/// scheduled. This keeps ownership one-directional — the queue never holds a
/// reference into the state it will eventually mutate.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_handle: u64,
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 0,
        }
    }

    /// Schedule `token` to expire `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, token: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            deadline: now + delay,
            token,
        });
        tracing::trace!(
            handle = handle.0,
            delay_ms = delay.as_millis() as u64,
            "timer scheduled"
        );
        handle
    }

    /// Cancel a scheduled entry.
    ///
    /// Idempotent: unknown, already-fired, or already-cancelled handles are
    /// safe no-ops.
    pub fn cancel(&mut self, handle: TimerHandle) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        if self.entries.len() != before {
            tracing::trace!(handle = handle.0, "timer cancelled");
        }
    }

    /// Remove and return the tokens of all entries due at `now`.
    ///
    /// Tokens are returned in deadline order (schedule order for ties). Each
    /// entry fires at most once.
    pub fn poll_expired(&mut self, now: Instant) -> Vec<T> {
        if self.entries.is_empty() {
            return Vec::new();
        }

        let entries = std::mem::take(&mut self.entries);
        let (mut due, pending): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|entry| entry.deadline <= now);
        self.entries = pending;

        due.sort_by(|a, b| {
            a.deadline
                .cmp(&b.deadline)
                .then_with(|| a.handle.0.cmp(&b.handle.0))
        });

        if !due.is_empty() {
            tracing::trace!(fired = due.len(), pending = self.entries.len(), "timers fired");
        }
        due.into_iter().map(|entry| entry.token).collect()
    }

    /// Number of entries still pending.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// The earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    /// Drop all pending entries without firing them.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
