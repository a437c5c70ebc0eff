#![forbid(unsafe_code)]

//! Deterministic UI-state controllers.
//!
//! Each controller is an independent, single-threaded state machine for one
//! recurring presentation pattern:
//!
//! - [`visibility`] — an expanded/collapsed panel with a one-shot
//!   auto-collapse delay.
//! - [`resource`] — the loading → loaded | errored lifecycle of an externally
//!   fetched asset, with stale-completion protection and a fallback label.
//! - [`debounce`] — run only the last of a rapid-fire burst of invocations,
//!   after a quiescence window.
//! - [`reveal`] — staggered reveal of content stages after mount, with a
//!   reduced-motion fast path.
//! - [`text`] — small display-text helpers shared by fallback rendering.
//!
//! Controllers never block and never spawn; the host pumps them with
//! `tick(now)` each event-loop turn and reads state back for rendering.
//! State-change notification goes through [`vela_core::Observers`].

pub mod debounce;
pub mod resource;
pub mod reveal;
pub mod text;
pub mod visibility;

pub use debounce::{Debounced, Debouncer};
pub use resource::{LoadEvent, LoadFailure, LoadGeneration, ResourceLoad, ResourceLoadState};
pub use reveal::StagedReveal;
pub use visibility::{PanelVisibility, VisibilityEvent, VisibilityState};
