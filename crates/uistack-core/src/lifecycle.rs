#![forbid(unsafe_code)]

//! Lifecycle vocabulary: hide policies, observable phases, and one-shot
//! listener queues.
//!
//! The state machine itself lives on [`UiComponent`](crate::UiComponent);
//! this module holds the pieces it is built from.
//!
//! # State Machine
//!
//! ```text
//!   Hidden/Unbuilt ──show──▶ Shown/Built ──hide──▶ Hidden/Built
//!                                 ▲                    │
//!                                 └────────show────────┘
//! ```
//!
//! Any transition may pass through `Animating` while an engine is bound;
//! the `Destroy` policy ends in the terminal `Destroyed` phase.

use std::rc::Rc;

use crate::component::UiComponent;

/// What a component does once its hide transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HidePolicy {
    /// Stay active and built.
    None,
    /// Release built state, stay active.
    Clear,
    /// Deactivate, keep built state for a cheap re-show.
    #[default]
    Disable,
    /// Deactivate and release built state.
    DisableAndClear,
    /// Tear the component down; its container reclaims it.
    Destroy,
}

impl HidePolicy {
    /// Whether completing a hide deactivates the component.
    #[inline]
    pub const fn deactivates(self) -> bool {
        matches!(self, Self::Disable | Self::DisableAndClear | Self::Destroy)
    }

    /// Whether completing a hide releases built state.
    #[inline]
    pub const fn clears(self) -> bool {
        matches!(self, Self::Clear | Self::DisableAndClear | Self::Destroy)
    }
}

/// Observable lifecycle phase of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not shown, nothing allocated.
    HiddenUnbuilt,
    /// Not shown, built state retained.
    HiddenBuilt,
    /// Shown and built.
    ShownBuilt,
    /// Shown (active) but the show completion has not run yet.
    ShownUnbuilt,
    /// An engine-driven transition is in flight.
    Animating,
    /// Torn down; waiting to be reaped by its container.
    Destroyed,
}

/// Callback fired once when a transition completes.
pub type Listener = Box<dyn FnOnce(&UiComponent)>;

/// Callback fired on every completion of a transition, until the
/// component is dropped.
pub type Hook = Rc<dyn Fn(&UiComponent)>;

/// FIFO queue of one-shot listeners.
///
/// Draining hands back every queued listener and leaves the queue empty,
/// so each listener runs at most once no matter how often the owning
/// transition repeats.
#[derive(Default)]
pub struct ListenerQueue {
    pending: Vec<Listener>,
}

impl ListenerQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a listener for the next completion.
    pub fn push(&mut self, listener: Listener) {
        self.pending.push(listener);
    }

    /// Take every queued listener in registration order.
    pub fn drain(&mut self) -> Vec<Listener> {
        std::mem::take(&mut self.pending)
    }

    /// Number of listeners waiting.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no listener is waiting.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl std::fmt::Debug for ListenerQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerQueue")
            .field("pending", &self.pending.len())
            .finish()
    }
}
