#![forbid(unsafe_code)]

//! Observer registry for state-change notification.
//!
//! Controllers hold their state privately and publish transitions through an
//! [`Observers`] list; the hosting UI layer subscribes whatever "re-render
//! this element" hook it has. This is the whole reactivity story: a plain
//! callback list, invoked synchronously in subscription order on the one
//! logical thread that processes events.
//!
//! The registry is mutably borrowed for the duration of [`Observers::notify`],
//! so observers cannot re-entrantly subscribe or unsubscribe — the borrow
//! checker enforces the single-event-at-a-time execution model.

use std::fmt;

/// Handle identifying a subscription, for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// A list of callbacks notified on each published event.
pub struct Observers<E> {
    entries: Vec<(ObserverId, Box<dyn FnMut(&E)>)>,
    next_id: u64,
}

impl<E> Observers<E> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Register an observer. Observers are invoked in subscription order.
    pub fn subscribe(&mut self, observer: impl FnMut(&E) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(observer)));
        tracing::trace!(observer = id.0, total = self.entries.len(), "observer subscribed");
        id
    }

    /// Remove an observer.
    ///
    /// Idempotent: unknown or already-removed ids are safe no-ops.
    pub fn unsubscribe(&mut self, id: ObserverId) {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        if self.entries.len() != before {
            tracing::trace!(observer = id.0, "observer unsubscribed");
        }
    }

    /// Invoke every observer with `event`, in subscription order.
    pub fn notify(&mut self, event: &E) {
        for (_, observer) in &mut self.entries {
            observer(event);
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
