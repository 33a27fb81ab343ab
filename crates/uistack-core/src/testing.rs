#![forbid(unsafe_code)]

//! Test doubles for lifecycle-driven code.
//!
//! Compiled for this crate's own tests and, behind the `test-helpers`
//! feature, for downstream crates.
//!
//! - [`RecordingBehavior`] counts `build`/`clear` calls and records the last
//!   parameters it was handed. The marker type `K` lets one test create
//!   several distinct behavior types (`RecordingBehavior<Home>`,
//!   `RecordingBehavior<Settings>`, ...).
//! - [`ManualAnimator`] is an engine whose state entry happens only when the
//!   test calls [`AnimatorHandle::release`].

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;
use std::time::Duration;

use crate::animation::{
    AnimationEngine, AnimationParam, PLAY_TRIGGER, ParamKind, SHOWN_PARAM, StateEntered,
};
use crate::component::{Behavior, Parameterized};

// --- Recording Behavior ---

/// Shared view of a recording behavior's call counters.
#[derive(Debug, Clone, Default)]
pub struct CallCounters {
    builds: Rc<Cell<u32>>,
    clears: Rc<Cell<u32>>,
    params: Rc<RefCell<Option<String>>>,
}

impl CallCounters {
    pub fn builds(&self) -> u32 {
        self.builds.get()
    }

    pub fn clears(&self) -> u32 {
        self.clears.get()
    }

    /// Last parameters handed to the behavior.
    pub fn params(&self) -> Option<String> {
        self.params.borrow().clone()
    }
}

/// Behavior that records its lifecycle calls.
pub struct RecordingBehavior<K = ()> {
    counters: CallCounters,
    _kind: PhantomData<fn() -> K>,
}

impl<K: 'static> RecordingBehavior<K> {
    pub fn new() -> Self {
        Self::with_counters(CallCounters::default())
    }

    /// Behavior reporting into existing counters.
    pub fn with_counters(counters: CallCounters) -> Self {
        Self {
            counters,
            _kind: PhantomData,
        }
    }

    pub fn counters(&self) -> CallCounters {
        self.counters.clone()
    }
}

impl<K: 'static> Default for RecordingBehavior<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: 'static> Behavior for RecordingBehavior<K> {
    fn build(&mut self) {
        self.counters.builds.set(self.counters.builds.get() + 1);
    }

    fn clear(&mut self) {
        self.counters.clears.set(self.counters.clears.get() + 1);
    }
}

impl<K: 'static> Parameterized for RecordingBehavior<K> {
    type Params = String;

    fn set_params(&mut self, params: String) {
        *self.counters.params.borrow_mut() = Some(params);
    }
}

// --- Manual Animator ---

#[derive(Debug, Default)]
struct AnimatorState {
    shown: bool,
    plays: u32,
    playing: bool,
    released: bool,
}

/// Test-side control of a [`ManualAnimator`].
#[derive(Debug, Clone, Default)]
pub struct AnimatorHandle {
    state: Rc<RefCell<AnimatorState>>,
}

impl AnimatorHandle {
    /// Let the running transition enter its state on the next `advance`.
    pub fn release(&self) {
        self.state.borrow_mut().released = true;
    }

    /// Number of `play` triggers received.
    pub fn plays(&self) -> u32 {
        self.state.borrow().plays
    }

    /// Current value of the `is_shown` parameter.
    pub fn shown(&self) -> bool {
        self.state.borrow().shown
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }
}

/// Engine whose transitions complete only when released by the test.
#[derive(Debug, Clone)]
pub struct ManualAnimator {
    handle: AnimatorHandle,
    params: Vec<AnimationParam>,
}

impl ManualAnimator {
    /// Engine honoring the show/hide contract.
    pub fn new() -> (Self, AnimatorHandle) {
        Self::with_params(vec![
            AnimationParam::new(SHOWN_PARAM, ParamKind::Bool),
            AnimationParam::new(PLAY_TRIGGER, ParamKind::Trigger),
        ])
    }

    /// Engine declaring arbitrary parameters, for contract violation tests.
    pub fn with_params(params: Vec<AnimationParam>) -> (Self, AnimatorHandle) {
        let handle = AnimatorHandle::default();
        (
            Self {
                handle: handle.clone(),
                params,
            },
            handle,
        )
    }
}

impl AnimationEngine for ManualAnimator {
    fn parameters(&self) -> Vec<AnimationParam> {
        self.params.clone()
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        if name == SHOWN_PARAM {
            self.handle.state.borrow_mut().shown = value;
        }
    }

    fn get_bool(&self, name: &str) -> Option<bool> {
        (name == SHOWN_PARAM).then(|| self.handle.shown())
    }

    fn set_trigger(&mut self, name: &str) {
        if name == PLAY_TRIGGER {
            let mut state = self.handle.state.borrow_mut();
            state.plays += 1;
            state.playing = true;
            state.released = false;
        }
    }

    fn advance(&mut self, _dt: Duration) -> Option<StateEntered> {
        let mut state = self.handle.state.borrow_mut();
        if !(state.playing && state.released) {
            return None;
        }
        state.playing = false;
        state.released = false;
        Some(StateEntered::new(if state.shown { "shown" } else { "hidden" }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::UiComponent;
    use crate::lifecycle::Phase;

    struct Marker;

    #[test]
    fn counts_lifecycle() {
        let recorder = RecordingBehavior::<Marker>::new();
        let counters = recorder.counters();
        let mut component = UiComponent::new("recorder", recorder);
        component.show(false);
        component.reload();
        assert_eq!((counters.builds(), counters.clears()), (2, 1));
        assert!(component.set_params::<RecordingBehavior<Marker>>("x".into()));
        assert_eq!(counters.params().as_deref(), Some("x"));
    }

    #[test]
    fn manual_animator_waits_for_release() {
        let (engine, handle) = ManualAnimator::new();
        let mut component = UiComponent::new("recorder", RecordingBehavior::<Marker>::new())
            .with_animation(engine);

        component.show(false);
        assert_eq!(handle.plays(), 1);
        for _ in 0..10 {
            component.update(Duration::from_secs(1));
        }
        assert_eq!(component.phase(), Phase::Animating);

        handle.release();
        component.update(Duration::ZERO);
        assert_eq!(component.phase(), Phase::ShownBuilt);
        assert!(!handle.is_playing());
    }

    #[test]
    fn release_before_play_is_discarded() {
        let (mut engine, handle) = ManualAnimator::new();
        handle.release();
        engine.set_trigger(PLAY_TRIGGER);
        assert!(engine.advance(Duration::ZERO).is_none());
    }
}
