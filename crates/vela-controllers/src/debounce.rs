#![forbid(unsafe_code)]

//! Debounced execution.
//!
//! A debounce gate wraps an operation so that only the last of a rapid-fire
//! sequence of invocations executes, once a quiescence window has elapsed
//! with no further calls. The classic use is a search input: keystrokes
//! arrive faster than the query is worth running, so only the final text of
//! each burst is submitted.
//!
//! Two layers:
//!
//! - [`Debouncer`] — the mechanism: records the latest arguments, restarts
//!   the quiescence deadline on each call, and yields the arguments exactly
//!   once when polled past the deadline.
//! - [`Debounced`] — owns the operation and runs it on
//!   [`tick`](Debounced::tick), for hosts that want the wrapped-callable
//!   shape.
//!
//! # Guarantees
//!
//! - A burst of N calls each spaced closer than the quiescence window
//!   executes the operation exactly once, with the N-th call's arguments.
//! - Calls spaced wider than the window execute once each. This holds even
//!   when the host never polls between the calls: a call arriving past the
//!   previous payload's deadline hands that payload back (`Debouncer`) or
//!   runs it on the spot (`Debounced`) before starting the new window.
//! - If the operation itself panics, the panic surfaces at the `tick` or
//!   `call` that ran it, never at the call that recorded the arguments.

use std::fmt;
use std::time::{Duration, Instant};

use vela_core::OneShot;

/// Latest-wins pending invocation with a quiescence deadline.
///
/// # Example
///
/// ```
/// use vela_controllers::debounce::Debouncer;
/// use std::time::{Duration, Instant};
///
/// let t = Instant::now();
/// let mut search = Debouncer::new(Duration::from_millis(300));
///
/// assert_eq!(search.invoke("a", t), None);
/// assert_eq!(search.invoke("ab", t + Duration::from_millis(100)), None);
///
/// // Quiescence is measured from the last call.
/// assert_eq!(search.poll(t + Duration::from_millis(300)), None);
/// assert_eq!(search.poll(t + Duration::from_millis(400)), Some("ab"));
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiescence: Duration,
    timer: OneShot,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiescence window.
    #[must_use]
    pub fn new(quiescence: Duration) -> Self {
        Self {
            quiescence,
            timer: OneShot::new(),
            pending: None,
        }
    }

    /// Record `args` as the pending payload and restart the quiescence
    /// deadline, cancelling any previously scheduled execution.
    ///
    /// If a prior payload's deadline has already passed — the host did not
    /// poll between two widely spaced calls — that payload is returned so
    /// its execution is not lost; it is due and must still run.
    #[must_use = "a returned payload is a due execution the caller must run"]
    pub fn invoke(&mut self, args: T, now: Instant) -> Option<T> {
        let due = self.poll(now);
        self.pending = Some(args);
        self.timer.arm(now, self.quiescence);
        due
    }

    /// Yield the pending arguments if the window has lapsed with no further
    /// [`invoke`](Self::invoke).
    ///
    /// Returns the arguments at most once per burst.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.timer.poll(now) {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drop any pending invocation without executing it.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.pending = None;
    }

    /// Whether an invocation is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// The instant the pending invocation becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// The configured quiescence window.
    #[must_use]
    pub fn quiescence(&self) -> Duration {
        self.quiescence
    }
}

/// A [`Debouncer`] that owns its operation and runs it when quiescent.
pub struct Debounced<T, F: FnMut(T)> {
    inner: Debouncer<T>,
    operation: F,
}

impl<T, F: FnMut(T)> Debounced<T, F> {
    /// Wrap `operation` behind a quiescence window.
    #[must_use]
    pub fn new(operation: F, quiescence: Duration) -> Self {
        Self {
            inner: Debouncer::new(quiescence),
            operation,
        }
    }

    /// Record a call. The operation runs later, from `tick`, with the
    /// arguments of the last call in the burst.
    ///
    /// A previous call whose quiescence window already lapsed is executed
    /// here first, so spaced calls run once each even when the host never
    /// ticked in between.
    pub fn call(&mut self, args: T, now: Instant) {
        if let Some(due) = self.inner.invoke(args, now) {
            (self.operation)(due);
        }
    }

    /// Run the operation if its quiescence window has lapsed.
    ///
    /// Returns whether the operation executed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(args) = self.inner.poll(now) {
            (self.operation)(args);
            true
        } else {
            false
        }
    }

    /// Drop any pending call without executing it.
    pub fn cancel(&mut self) {
        self.inner.cancel();
    }

    /// Whether a call is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.is_pending()
    }
}

impl<T: fmt::Debug, F: FnMut(T)> fmt::Debug for Debounced<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("inner", &self.inner)
            .finish()
    }
}
