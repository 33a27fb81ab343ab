#![forbid(unsafe_code)]

//! The component lifecycle state machine.
//!
//! A [`UiComponent`] pairs uniform lifecycle state (active, built,
//! animating, hide policy, pending listeners) with a type-specific
//! [`Behavior`] that knows how to allocate (`build`) and release (`clear`)
//! its own display state. Menus, modals, popups, and panels are all plain
//! `UiComponent`s; what distinguishes them is which manager owns them.
//!
//! # Invariants
//!
//! 1. `is_built()` is true only between a completed [`UiComponent::build`]
//!    and the next [`UiComponent::clear`]; both are no-ops when already in
//!    the target state.
//! 2. A show completion builds at most once, then drains the show
//!    listeners; a hide completion applies the [`HidePolicy`], then drains
//!    the hide listeners. Every listener fires exactly once.
//! 3. Without a bound engine (or with `skip_animation`), completions run
//!    before `show`/`hide` return. With an engine they run from
//!    [`UiComponent::update`] only.
//! 4. A destroyed component ignores further transitions.
//!
//! # Example
//!
//! ```
//! use uistack_core::{Behavior, UiComponent};
//!
//! #[derive(Default)]
//! struct Banner {
//!     lines: Vec<String>,
//! }
//!
//! impl Behavior for Banner {
//!     fn build(&mut self) {
//!         self.lines.push("Welcome".into());
//!     }
//!     fn clear(&mut self) {
//!         self.lines.clear();
//!     }
//! }
//!
//! let mut banner = UiComponent::new("banner", Banner::default());
//! banner.show(false);
//! assert!(banner.is_active() && banner.is_built());
//! banner.hide(false);
//! assert!(!banner.is_active() && banner.is_built());
//! ```

use std::any::{Any, TypeId};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::animation::{AnimationBridge, AnimationEngine, Completion};
use crate::lifecycle::{HidePolicy, Hook, ListenerQueue, Phase};

static COMPONENT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    fn next() -> Self {
        Self(COMPONENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Upcast helper so behaviors can be downcast to their concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Type-specific part of a component.
pub trait Behavior: AsAny {
    /// Allocate display state. Called at most once per built period.
    fn build(&mut self);

    /// Release display state.
    fn clear(&mut self);
}

/// Opt-in typed parameter set, applied before a component is opened.
pub trait Parameterized: Behavior {
    type Params;

    fn set_params(&mut self, params: Self::Params);
}

/// A component instance: lifecycle state plus its behavior.
pub struct UiComponent {
    id: ComponentId,
    name: String,
    type_id: TypeId,
    type_name: &'static str,
    active: bool,
    built: bool,
    destroyed: bool,
    awoken: bool,
    hide_policy: HidePolicy,
    show_on_create: bool,
    on_show: ListenerQueue,
    on_hide: ListenerQueue,
    hidden_hooks: Vec<Hook>,
    animation: Option<AnimationBridge>,
    behavior: Box<dyn Behavior>,
}

impl UiComponent {
    /// Create an inactive, unbuilt component.
    pub fn new<B: Behavior>(name: impl Into<String>, behavior: B) -> Self {
        Self {
            id: ComponentId::next(),
            name: name.into(),
            type_id: TypeId::of::<B>(),
            type_name: std::any::type_name::<B>(),
            active: false,
            built: false,
            destroyed: false,
            awoken: false,
            hide_policy: HidePolicy::default(),
            show_on_create: false,
            on_show: ListenerQueue::new(),
            on_hide: ListenerQueue::new(),
            hidden_hooks: Vec::new(),
            animation: None,
            behavior: Box::new(behavior),
        }
    }

    /// Set what happens when a hide completes.
    #[must_use]
    pub fn with_hide_policy(mut self, policy: HidePolicy) -> Self {
        self.hide_policy = policy;
        self
    }

    /// Show the component as soon as it is attached to a container.
    #[must_use]
    pub fn with_show_on_create(mut self, show: bool) -> Self {
        self.show_on_create = show;
        self
    }

    /// Bind an animation engine.
    ///
    /// An engine that does not declare the `is_shown` bool and the `play`
    /// trigger is rejected with a warning and the component keeps
    /// transitioning synchronously.
    #[must_use]
    pub fn with_animation(mut self, engine: impl AnimationEngine + 'static) -> Self {
        match AnimationBridge::bind(Box::new(engine)) {
            Ok(bridge) => self.animation = Some(bridge),
            Err((_, violations)) => {
                for violation in &violations {
                    tracing::warn!(
                        component = %self.name,
                        %violation,
                        "animation contract violated; running without animation"
                    );
                }
            }
        }
        self
    }

    /// First-attach hook: shows the component if `show_on_create` is set.
    ///
    /// Containers call this once when the component is attached; calling
    /// it again is a no-op.
    pub fn awake(&mut self) {
        if self.awoken {
            return;
        }
        self.awoken = true;
        if self.show_on_create {
            self.show(false);
        }
    }

    // --- State Queries ---

    #[inline]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the component is attached and visible in its container.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn is_built(&self) -> bool {
        self.built
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[inline]
    pub fn has_animation(&self) -> bool {
        self.animation.is_some()
    }

    /// Target visibility: the engine's `is_shown` when animated, else `is_active`.
    pub fn is_shown(&self) -> bool {
        match &self.animation {
            Some(bridge) => bridge.target_shown(),
            None => self.active,
        }
    }

    /// Whether an engine-driven transition has not completed yet.
    pub fn is_animating(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(AnimationBridge::is_pending)
    }

    #[inline]
    pub fn hide_policy(&self) -> HidePolicy {
        self.hide_policy
    }

    pub fn set_hide_policy(&mut self, policy: HidePolicy) {
        self.hide_policy = policy;
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.destroyed {
            Phase::Destroyed
        } else if self.is_animating() {
            Phase::Animating
        } else {
            match (self.active, self.built) {
                (true, true) => Phase::ShownBuilt,
                (true, false) => Phase::ShownUnbuilt,
                (false, true) => Phase::HiddenBuilt,
                (false, false) => Phase::HiddenUnbuilt,
            }
        }
    }

    /// Number of listeners waiting for the next show and hide completion.
    pub fn pending_listeners(&self) -> (usize, usize) {
        (self.on_show.len(), self.on_hide.len())
    }

    // --- Transitions ---

    /// Activate and show the component.
    ///
    /// With an engine bound and `skip_animation == false`, completion is
    /// deferred until the engine reports the shown state from
    /// [`update`](Self::update).
    pub fn show(&mut self, skip_animation: bool) {
        if self.destroyed {
            tracing::debug!(component = %self.name, id = %self.id, "show ignored on destroyed component");
            return;
        }
        self.active = true;
        match self.animation.as_mut() {
            Some(bridge) if !skip_animation => {
                bridge.request(true);
                tracing::trace!(component = %self.name, id = %self.id, "show animation requested");
                return;
            }
            Some(bridge) => bridge.settle(true),
            None => {}
        }
        self.on_show_completed();
    }

    /// Register a one-shot listener for the next show completion, then show.
    pub fn show_then(&mut self, listener: impl FnOnce(&UiComponent) + 'static) {
        self.on_show.push(Box::new(listener));
        self.show(false);
    }

    /// Hide the component; what remains afterwards depends on the hide policy.
    pub fn hide(&mut self, skip_animation: bool) {
        if self.destroyed {
            tracing::debug!(component = %self.name, id = %self.id, "hide ignored on destroyed component");
            return;
        }
        match self.animation.as_mut() {
            Some(bridge) if !skip_animation => {
                bridge.request(false);
                tracing::trace!(component = %self.name, id = %self.id, "hide animation requested");
                return;
            }
            Some(bridge) => bridge.settle(false),
            None => {}
        }
        self.on_hide_completed();
    }

    /// Register a hook run on every hide completion.
    ///
    /// Unlike [`hide_then`](Self::hide_then) the hook stays registered;
    /// it sees the component after the hide policy was applied.
    pub fn on_hidden(&mut self, hook: impl Fn(&UiComponent) + 'static) {
        self.hidden_hooks.push(Rc::new(hook));
    }

    /// Register a one-shot listener for the next hide completion, then hide.
    pub fn hide_then(&mut self, listener: impl FnOnce(&UiComponent) + 'static) {
        self.on_hide.push(Box::new(listener));
        self.hide(false);
    }

    /// Force-refresh: clear then build, whatever the current visibility.
    pub fn reload(&mut self) {
        self.clear();
        self.build();
    }

    /// Allocate display state if not built yet.
    pub fn build(&mut self) {
        if !self.built {
            self.behavior.build();
            self.built = true;
        }
    }

    /// Release display state if built.
    pub fn clear(&mut self) {
        if self.built {
            self.behavior.clear();
            self.built = false;
        }
    }

    /// Show completion: build once, then fire and drop the show listeners.
    pub fn on_show_completed(&mut self) {
        self.build();
        tracing::debug!(component = %self.name, id = %self.id, "shown");
        for listener in self.on_show.drain() {
            listener(&*self);
        }
    }

    /// Hide completion: apply the hide policy, fire and drop the hide
    /// listeners, then run every persistent hidden hook.
    pub fn on_hide_completed(&mut self) {
        let policy = self.hide_policy;
        if policy == HidePolicy::Destroy {
            self.destroy();
        } else {
            if policy.deactivates() {
                self.active = false;
            }
            if policy.clears() {
                self.clear();
            }
        }
        tracing::debug!(
            component = %self.name,
            id = %self.id,
            ?policy,
            "hidden"
        );
        for listener in self.on_hide.drain() {
            listener(&*self);
        }
        for hook in self.hidden_hooks.clone() {
            hook(&*self);
        }
    }

    /// Tear the component down immediately.
    ///
    /// Built state is released and the component is marked for reaping by
    /// its container.
    pub fn destroy(&mut self) {
        self.clear();
        self.active = false;
        self.destroyed = true;
    }

    /// Deactivate without running a hide transition.
    ///
    /// Managers use this on freshly instantiated components so that they
    /// start hidden before being opened.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Advance the bound engine and deliver any completion it reports.
    pub fn update(&mut self, dt: Duration) {
        if self.destroyed {
            return;
        }
        let Some(bridge) = self.animation.as_mut() else {
            return;
        };
        match bridge.poll(dt) {
            Some(Completion::Shown) => self.on_show_completed(),
            Some(Completion::Hidden) => self.on_hide_completed(),
            None => {}
        }
    }

    // --- Typed Access ---

    /// `TypeId` of the behavior.
    #[inline]
    pub fn behavior_type(&self) -> TypeId {
        self.type_id
    }

    /// Type name of the behavior.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the behavior is a `T`.
    #[inline]
    pub fn is<T: Behavior>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn behavior<T: Behavior>(&self) -> Option<&T> {
        (*self.behavior).as_any().downcast_ref::<T>()
    }

    pub fn behavior_mut<T: Behavior>(&mut self) -> Option<&mut T> {
        (*self.behavior).as_any_mut().downcast_mut::<T>()
    }

    /// Hand `params` to a `T` behavior. Returns `false` if the behavior is
    /// not a `T`.
    pub fn set_params<T: Parameterized>(&mut self, params: T::Params) -> bool {
        match self.behavior_mut::<T>() {
            Some(behavior) => {
                behavior.set_params(params);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for UiComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiComponent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("type", &self.type_name)
            .field("phase", &self.phase())
            .field("hide_policy", &self.hide_policy)
            .field("hidden_hooks", &self.hidden_hooks.len())
            .field("animation", &self.animation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TimedAnimator;
    use crate::testing::ManualAnimator;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use tracing_test::traced_test;

    #[derive(Default)]
    struct Counting {
        builds: Rc<Cell<u32>>,
        clears: Rc<Cell<u32>>,
    }

    impl Behavior for Counting {
        fn build(&mut self) {
            self.builds.set(self.builds.get() + 1);
        }
        fn clear(&mut self) {
            self.clears.set(self.clears.get() + 1);
        }
    }

    struct Labelled {
        label: String,
    }

    impl Behavior for Labelled {
        fn build(&mut self) {}
        fn clear(&mut self) {}
    }

    impl Parameterized for Labelled {
        type Params = String;
        fn set_params(&mut self, params: String) {
            self.label = params;
        }
    }

    fn counting() -> (UiComponent, Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let behavior = Counting::default();
        let builds = Rc::clone(&behavior.builds);
        let clears = Rc::clone(&behavior.clears);
        (UiComponent::new("recorder", behavior), builds, clears)
    }

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn new_component_is_hidden_unbuilt() {
        let (c, _, _) = counting();
        assert_eq!(c.phase(), Phase::HiddenUnbuilt);
        assert!(!c.is_active());
        assert!(!c.is_built());
        assert_eq!(c.hide_policy(), HidePolicy::Disable);
    }

    #[test]
    fn hide_then_show_ends_shown_built() {
        let (mut c, _, _) = counting();
        c.hide(true);
        c.show(true);
        assert_eq!(c.phase(), Phase::ShownBuilt);
        assert!(c.is_built());
        c.clear();
        assert!(!c.is_built());
    }

    #[test]
    fn build_runs_once_across_shows() {
        let (mut c, builds, _) = counting();
        c.show(false);
        c.hide(false);
        c.show(false);
        c.show(false);
        assert_eq!(builds.get(), 1);
    }

    #[test]
    fn reload_is_clear_then_build() {
        let (mut c, builds, clears) = counting();
        c.reload();
        assert!(c.is_built());
        assert_eq!((builds.get(), clears.get()), (1, 0));

        c.reload();
        assert!(c.is_built());
        assert_eq!((builds.get(), clears.get()), (2, 1));

        c.clear();
        c.reload();
        assert_eq!((builds.get(), clears.get()), (3, 2));
    }

    #[test]
    fn hide_policies() {
        let cases = [
            (HidePolicy::None, true, true, false),
            (HidePolicy::Clear, true, false, false),
            (HidePolicy::Disable, false, true, false),
            (HidePolicy::DisableAndClear, false, false, false),
            (HidePolicy::Destroy, false, false, true),
        ];
        for (policy, active, built, destroyed) in cases {
            let (c, _, _) = counting();
            let mut c = c.with_hide_policy(policy);
            c.show(false);
            c.hide(false);
            assert_eq!(c.is_active(), active, "{policy:?} active");
            assert_eq!(c.is_built(), built, "{policy:?} built");
            assert_eq!(c.is_destroyed(), destroyed, "{policy:?} destroyed");
        }
    }

    #[test]
    fn listeners_fire_once() {
        let (mut c, _, _) = counting();
        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        c.show_then(move |_| f.set(f.get() + 1));
        c.show(false);
        c.show(false);
        assert_eq!(fired.get(), 1);
        assert_eq!(c.pending_listeners(), (0, 0));
    }

    #[test]
    fn hide_listener_sees_policy_applied() {
        let (mut c, _, _) = counting();
        c.show(false);
        let seen = Rc::new(Cell::new(None));
        let s = Rc::clone(&seen);
        c.hide_then(move |component| s.set(Some(component.is_active())));
        assert_eq!(seen.get(), Some(false));
    }

    #[test]
    fn hidden_hook_fires_on_every_hide() {
        let (mut c, _, _) = counting();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        c.on_hidden(move |component| s.borrow_mut().push(component.is_active()));
        c.show(false);
        c.hide(false);
        c.show(false);
        c.hide(true);
        assert_eq!(*seen.borrow(), vec![false, false]);
        assert_eq!(c.pending_listeners(), (0, 0));
    }

    #[test]
    fn animated_show_completes_on_update() {
        let (c, builds, _) = counting();
        let mut c = c.with_animation(TimedAnimator::new(Duration::from_millis(40)));
        assert!(c.has_animation());

        let order = Rc::new(RefCell::new(Vec::new()));
        let o = Rc::clone(&order);
        c.show_then(move |_| o.borrow_mut().push("shown"));
        order.borrow_mut().push("returned");

        assert!(c.is_active());
        assert!(c.is_shown());
        assert_eq!(c.phase(), Phase::Animating);
        assert_eq!(builds.get(), 0);

        c.update(FRAME);
        c.update(FRAME);
        assert_eq!(builds.get(), 0);
        c.update(FRAME);
        assert_eq!(builds.get(), 1);
        assert_eq!(c.phase(), Phase::ShownBuilt);
        assert_eq!(*order.borrow(), vec!["returned", "shown"]);
    }

    #[test]
    fn animated_hide_keeps_active_until_completion() {
        let (c, _, _) = counting();
        let mut c = c.with_animation(TimedAnimator::new(Duration::from_millis(16)));
        c.show(true);
        c.hide(false);
        assert!(c.is_active());
        assert!(!c.is_shown());
        c.update(FRAME);
        assert!(!c.is_active());
        assert_eq!(c.phase(), Phase::HiddenBuilt);
    }

    #[test]
    fn skip_animation_is_synchronous() {
        let (c, builds, _) = counting();
        let mut c = c.with_animation(TimedAnimator::new(Duration::from_secs(10)));
        c.show(true);
        assert_eq!(builds.get(), 1);
        assert_eq!(c.phase(), Phase::ShownBuilt);
    }

    #[traced_test]
    #[test]
    fn invalid_engine_warns_and_runs_synchronously() {
        let (engine, handle) = ManualAnimator::with_params(vec![]);
        let (c, builds, _) = counting();
        let mut c = c.with_animation(engine);
        assert!(!c.has_animation());
        assert!(logs_contain("animation contract violated"));

        c.show(false);
        assert_eq!(builds.get(), 1);
        assert_eq!(handle.plays(), 0);
    }

    #[test]
    fn skipped_hide_drops_pending_show() {
        let (c, builds, _) = counting();
        let mut c = c.with_animation(TimedAnimator::new(Duration::from_millis(16)));
        c.show(false);
        c.hide(true);
        assert!(!c.is_shown());
        c.update(FRAME);
        assert_eq!(builds.get(), 0);
        assert_eq!(c.phase(), Phase::HiddenUnbuilt);
    }

    #[test]
    fn show_on_create_shows_on_awake() {
        let (c, _, _) = counting();
        let mut c = c.with_show_on_create(true);
        assert!(!c.is_active());
        c.awake();
        assert!(c.is_active() && c.is_built());
        c.hide(false);
        c.awake();
        assert!(!c.is_active());
    }

    #[test]
    fn destroyed_component_ignores_transitions() {
        let (c, _, _) = counting();
        let mut c = c.with_hide_policy(HidePolicy::Destroy);
        c.show(false);
        c.hide(false);
        assert_eq!(c.phase(), Phase::Destroyed);
        c.show(false);
        assert!(!c.is_active());
    }

    #[test]
    fn typed_access_and_params() {
        let mut c = UiComponent::new(
            "label",
            Labelled {
                label: String::new(),
            },
        );
        assert!(c.is::<Labelled>());
        assert!(!c.is::<Counting>());
        assert!(c.behavior::<Counting>().is_none());
        assert!(c.set_params::<Labelled>("hello".into()));
        assert_eq!(c.behavior::<Labelled>().map(|l| l.label.as_str()), Some("hello"));
    }

    #[test]
    fn ids_are_unique() {
        let (a, _, _) = counting();
        let (b, _, _) = counting();
        assert_ne!(a.id(), b.id());
    }
}
