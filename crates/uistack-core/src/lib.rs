#![forbid(unsafe_code)]

//! Core of uistack: the component lifecycle state machine.
//!
//! This crate provides:
//! - [`UiComponent`] with the show/hide/build/clear state machine and
//!   [`HidePolicy`]
//! - [`AnimationBridge`] binding components to an external
//!   [`AnimationEngine`]
//! - [`UiContext`], the explicit single-instance registry
//! - [`PrototypePool`] and [`Container`], where managers materialize and
//!   keep their components

pub mod animation;
pub mod clock;
pub mod component;
pub mod container;
pub mod error;
pub mod lifecycle;
#[cfg(feature = "tracing-json")]
pub mod logging;
pub mod pool;
pub mod registry;
pub mod request;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use animation::{
    AnimationBridge, AnimationEngine, AnimationParam, Completion, ContractViolation,
    PLAY_TRIGGER, ParamKind, SHOWN_PARAM, StateEntered, TimedAnimator,
};
pub use clock::FrameClock;
pub use component::{AsAny, Behavior, ComponentId, Parameterized, UiComponent};
pub use container::Container;
pub use error::{Result, UiError};
pub use lifecycle::{HidePolicy, Hook, Listener, ListenerQueue, Phase};
pub use pool::{Prototype, PrototypePool, ResourcePool};
pub use registry::UiContext;
pub use request::{NavRequest, Requests};
