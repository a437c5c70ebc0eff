#![forbid(unsafe_code)]

//! Time and notification primitives for Vela controllers.
//!
//! Vela controllers are single-threaded, poll-driven state machines: the host
//! event loop feeds them a `now: Instant` and they apply any transitions that
//! have become due. This crate provides the three building blocks they share:
//!
//! - [`clock`] — a [`Clock`] trait with a monotonic wall implementation and a
//!   [`ManualClock`] for deterministic tests and simulators.
//! - [`timer`] — [`OneShot`], an owned cancellable single-shot deadline, and
//!   [`TimerQueue`], a handle-based queue for multiple outstanding deadlines.
//! - [`observer`] — [`Observers`], a callback-list registry controllers use to
//!   signal "state changed, re-render" to the hosting UI layer.
//!
//! Nothing here spawns threads or blocks. Deferred execution is an owned
//! deadline compared against a caller-supplied `Instant`, which keeps every
//! controller deterministic under a simulated clock.

pub mod clock;
pub mod observer;
pub mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use observer::{ObserverId, Observers};
pub use timer::{OneShot, TimerHandle, TimerQueue};
