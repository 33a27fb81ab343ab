//! Property tests for the component state machine: arbitrary sequences of
//! transitions never break the built/active bookkeeping.

use std::time::Duration;

use proptest::prelude::*;
use uistack_core::testing::{ManualAnimator, RecordingBehavior};
use uistack_core::{HidePolicy, Phase, UiComponent};

#[derive(Debug, Clone, Copy)]
enum Step {
    Show(bool),
    Hide(bool),
    Reload,
    Clear,
    Release,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        any::<bool>().prop_map(Step::Show),
        any::<bool>().prop_map(Step::Hide),
        Just(Step::Reload),
        Just(Step::Clear),
        Just(Step::Release),
    ]
}

fn policy() -> impl Strategy<Value = HidePolicy> {
    prop_oneof![
        Just(HidePolicy::None),
        Just(HidePolicy::Clear),
        Just(HidePolicy::Disable),
        Just(HidePolicy::DisableAndClear),
        Just(HidePolicy::Destroy),
    ]
}

// =============================================================================
// Fixed scenarios
// =============================================================================

#[test]
fn hidden_then_shown_is_built() {
    let mut component = UiComponent::new("recorder", RecordingBehavior::<()>::new());
    component.hide(true);
    component.show(true);
    assert_eq!(component.phase(), Phase::ShownBuilt);
    component.clear();
    assert!(!component.is_built());
}

#[test]
fn reload_from_cleared_is_idempotent() {
    let recorder = RecordingBehavior::<()>::new();
    let counters = recorder.counters();
    let mut component = UiComponent::new("recorder", recorder);
    component.reload();
    component.clear();
    component.reload();
    assert!(component.is_built());
    assert_eq!((counters.builds(), counters.clears()), (2, 1));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn builds_minus_clears_tracks_built_flag(
        policy in policy(),
        animated in any::<bool>(),
        steps in prop::collection::vec(step(), 0..40),
    ) {
        let recorder = RecordingBehavior::<()>::new();
        let counters = recorder.counters();
        let mut component = UiComponent::new("recorder", recorder).with_hide_policy(policy);
        let handle = if animated {
            let (engine, handle) = ManualAnimator::new();
            component = component.with_animation(engine);
            Some(handle)
        } else {
            None
        };

        for step in steps {
            match step {
                Step::Show(skip) => component.show(skip),
                Step::Hide(skip) => component.hide(skip),
                Step::Reload => component.reload(),
                Step::Clear => component.clear(),
                Step::Release => {
                    if let Some(handle) = &handle {
                        handle.release();
                    }
                    component.update(Duration::from_millis(16));
                }
            }

            let outstanding = counters.builds() - counters.clears();
            prop_assert_eq!(outstanding, u32::from(component.is_built()));
            if component.is_destroyed() {
                prop_assert!(!component.is_active());
                prop_assert_eq!(component.phase(), Phase::Destroyed);
            }
        }
    }

    #[test]
    fn synchronous_show_always_ends_shown_built(
        policy in policy(),
        hides in 0usize..5,
    ) {
        let mut component =
            UiComponent::new("recorder", RecordingBehavior::<()>::new()).with_hide_policy(policy);
        for _ in 0..hides {
            component.show(false);
            component.hide(false);
        }
        component.show(false);
        if policy == HidePolicy::Destroy && hides > 0 {
            prop_assert_eq!(component.phase(), Phase::Destroyed);
        } else {
            prop_assert_eq!(component.phase(), Phase::ShownBuilt);
        }
    }
}
