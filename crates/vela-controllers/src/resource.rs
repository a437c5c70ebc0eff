#![forbid(unsafe_code)]

//! Async resource-load lifecycle.
//!
//! [`ResourceLoad`] tracks the loading → loaded | errored lifecycle of one
//! externally fetched asset (typically an image). The controller performs no
//! IO itself; the external loader reports the outcome and the controller
//! records it for the rendering layer, which swaps between a loading
//! placeholder, the asset, and an error fallback.
//!
//! # Supersession
//!
//! Changing the source restarts the cycle. [`ResourceLoad::start`] returns a
//! [`LoadGeneration`] token that the loader must echo back with its
//! completion; a completion carrying a superseded generation is dropped, so a
//! slow fetch for an old source can never clobber the state of the current
//! one.
//!
//! # Invariants
//!
//! - State is monotonic per generation: the first reported outcome (success
//!   or failure) is final; later reports for the same generation are no-ops.
//! - The controller never fails itself. [`LoadFailure`] only records an
//!   externally reported outcome for display.

use std::fmt;

use vela_core::{ObserverId, Observers};

use crate::text;

/// Lifecycle state of the tracked resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceLoadState {
    /// The external loader is fetching the resource.
    Loading,
    /// The resource loaded; render it.
    Loaded,
    /// The load failed; render the fallback visual with the accessible label.
    Errored,
}

impl ResourceLoadState {
    /// Whether no further transition can occur for this generation.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Loaded | Self::Errored)
    }
}

/// Token tying a completion report to the `start` call that initiated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadGeneration(u64);

/// Terminal failure outcome of a load, carrying an opaque display reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    reason: String,
}

impl LoadFailure {
    /// The opaque reason reported by the loader.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resource load failed: {}", self.reason)
    }
}

impl std::error::Error for LoadFailure {}

/// Transition notification delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadEvent {
    /// A new source entered the `Loading` state.
    Started,
    /// The current generation completed successfully.
    Loaded,
    /// The current generation failed.
    Errored,
}

/// Controller for one externally loaded resource.
pub struct ResourceLoad {
    state: ResourceLoadState,
    source: String,
    alt: String,
    generation: u64,
    failure: Option<LoadFailure>,
    observers: Observers<LoadEvent>,
}

impl ResourceLoad {
    /// Create a controller in the `Loading` state for `source`.
    ///
    /// `alt` is the accessible label used for fallback rendering when the
    /// load fails.
    #[must_use]
    pub fn new(source: impl Into<String>, alt: impl Into<String>) -> Self {
        let controller = Self {
            state: ResourceLoadState::Loading,
            source: source.into(),
            alt: alt.into(),
            generation: 0,
            failure: None,
            observers: Observers::new(),
        };
        tracing::debug!(source = %controller.source, "resource load started");
        controller
    }

    /// Register an observer for load transitions.
    pub fn observe(&mut self, observer: impl FnMut(&LoadEvent) + 'static) -> ObserverId {
        self.observers.subscribe(observer)
    }

    /// Remove a previously registered observer.
    pub fn unobserve(&mut self, id: ObserverId) {
        self.observers.unsubscribe(id);
    }

    /// Begin loading a new source, superseding any in-flight generation.
    ///
    /// Returns the generation token the external loader must pass back to
    /// [`report_success`](Self::report_success) or
    /// [`report_failure`](Self::report_failure). Only the most recent
    /// generation's eventual completion is honored.
    pub fn start(&mut self, source: impl Into<String>) -> LoadGeneration {
        self.source = source.into();
        self.generation += 1;
        self.state = ResourceLoadState::Loading;
        self.failure = None;
        tracing::debug!(
            source = %self.source,
            generation = self.generation,
            "resource load restarted"
        );
        self.observers.notify(&LoadEvent::Started);
        LoadGeneration(self.generation)
    }

    /// The generation token for the current source.
    #[must_use]
    pub fn generation(&self) -> LoadGeneration {
        LoadGeneration(self.generation)
    }

    /// Record a successful completion for `generation`.
    ///
    /// Transitions `Loading → Loaded` exactly once per generation. Stale
    /// generations and reports after a terminal state are dropped. Returns
    /// whether the transition was applied.
    pub fn report_success(&mut self, generation: LoadGeneration) -> bool {
        if !self.accepts(generation, "success") {
            return false;
        }
        self.state = ResourceLoadState::Loaded;
        tracing::debug!(source = %self.source, "resource loaded");
        self.observers.notify(&LoadEvent::Loaded);
        true
    }

    /// Record a failed completion for `generation`, capturing `reason`.
    ///
    /// Transitions `Loading → Errored` exactly once per generation. Stale
    /// generations and reports after a terminal state are dropped. Returns
    /// whether the transition was applied.
    pub fn report_failure(&mut self, generation: LoadGeneration, reason: impl Into<String>) -> bool {
        if !self.accepts(generation, "failure") {
            return false;
        }
        let failure = LoadFailure {
            reason: reason.into(),
        };
        tracing::debug!(source = %self.source, reason = %failure.reason, "resource load failed");
        self.failure = Some(failure);
        self.state = ResourceLoadState::Errored;
        self.observers.notify(&LoadEvent::Errored);
        true
    }

    fn accepts(&self, generation: LoadGeneration, outcome: &str) -> bool {
        if generation.0 != self.generation {
            tracing::trace!(
                reported = generation.0,
                current = self.generation,
                outcome,
                "stale load completion dropped"
            );
            return false;
        }
        if self.state.is_terminal() {
            tracing::trace!(outcome, "duplicate load completion dropped");
            return false;
        }
        true
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ResourceLoadState {
        self.state
    }

    /// The current source identifier.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The accessible label supplied at construction.
    #[must_use]
    pub fn alt(&self) -> &str {
        &self.alt
    }

    /// The recorded failure, when `Errored`.
    #[must_use]
    pub fn failure(&self) -> Option<&LoadFailure> {
        self.failure.as_ref()
    }

    /// Accessible description for the substitute visual shown on failure.
    #[must_use]
    pub fn fallback_label(&self) -> String {
        text::fallback_label(&self.alt)
    }
}

impl fmt::Debug for ResourceLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceLoad")
            .field("state", &self.state)
            .field("source", &self.source)
            .field("generation", &self.generation)
            .field("failure", &self.failure)
            .finish()
    }
}
