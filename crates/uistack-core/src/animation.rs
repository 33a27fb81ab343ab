#![forbid(unsafe_code)]

//! Bridge between the lifecycle core and an external animation engine.
//!
//! The engine is driven through a two-parameter contract:
//!
//! - a bool parameter named [`SHOWN_PARAM`] holding the target visibility,
//! - a trigger parameter named [`PLAY_TRIGGER`] starting the transition.
//!
//! `show`/`hide` write both and return immediately. When the engine later
//! reports that it entered a state (from [`AnimationEngine::advance`]), the
//! bridge reads the bool back and yields a [`Completion`], which the owning
//! component turns into its show or hide completion.
//!
//! # Invariants
//!
//! 1. Completions are produced only by [`AnimationBridge::poll`], which the
//!    owner calls from its per-frame `update`. A completion therefore never
//!    runs inside the `show`/`hide` call that requested it.
//! 2. Each request yields at most one completion. A request superseded by
//!    [`AnimationBridge::settle`] yields none.
//! 3. An engine whose parameters do not satisfy the contract is never bound
//!    (see [`validate`]); the component falls back to synchronous
//!    transitions.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing parameter | Engine lacks `is_shown` or `play` | Warned, engine not bound |
//! | Wrong parameter kind | `is_shown` is not a bool, `play` not a trigger | Warned, engine not bound |
//! | Silent engine | Never reports a state entry | Component stays `Animating` |

use std::time::Duration;

/// Name of the bool parameter carrying the target visibility.
pub const SHOWN_PARAM: &str = "is_shown";

/// Name of the trigger parameter starting a transition.
pub const PLAY_TRIGGER: &str = "play";

/// Kind of an engine parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Bool,
    Trigger,
    Float,
    Int,
}

/// A parameter declared by an animation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationParam {
    pub name: String,
    pub kind: ParamKind,
}

impl AnimationParam {
    /// Declare a parameter.
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Reported by an engine when it enters a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntered {
    /// Engine-side name of the entered state.
    pub state: String,
}

impl StateEntered {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
        }
    }
}

/// External animation engine.
///
/// Implementations own their own playback; uistack only writes the
/// contract parameters and polls for state entries once per frame.
pub trait AnimationEngine {
    /// Parameters this engine declares.
    fn parameters(&self) -> Vec<AnimationParam>;

    /// Write a bool parameter.
    fn set_bool(&mut self, name: &str, value: bool);

    /// Read a bool parameter.
    fn get_bool(&self, name: &str) -> Option<bool>;

    /// Fire a one-shot trigger.
    fn set_trigger(&mut self, name: &str);

    /// Advance playback by `dt`, returning a state entry if one happened.
    fn advance(&mut self, dt: Duration) -> Option<StateEntered>;
}

/// A problem with an engine's declared parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    /// A required parameter is not declared.
    Missing { name: &'static str, kind: ParamKind },
    /// A required parameter is declared with the wrong kind.
    WrongKind {
        name: &'static str,
        expected: ParamKind,
        found: ParamKind,
    },
}

impl std::fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { name, kind } => {
                write!(f, "missing {kind:?} parameter \"{name}\"")
            }
            Self::WrongKind {
                name,
                expected,
                found,
            } => write!(
                f,
                "parameter \"{name}\" should be {expected:?}, found {found:?}"
            ),
        }
    }
}

/// Check an engine's parameters against the show/hide contract.
pub fn validate(engine: &dyn AnimationEngine) -> Vec<ContractViolation> {
    let params = engine.parameters();
    let mut violations = Vec::new();
    for (name, expected) in [
        (SHOWN_PARAM, ParamKind::Bool),
        (PLAY_TRIGGER, ParamKind::Trigger),
    ] {
        match params.iter().find(|p| p.name == name) {
            None => violations.push(ContractViolation::Missing {
                name,
                kind: expected,
            }),
            Some(p) if p.kind != expected => violations.push(ContractViolation::WrongKind {
                name,
                expected,
                found: p.kind,
            }),
            Some(_) => {}
        }
    }
    violations
}

/// Which completion a state entry maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Shown,
    Hidden,
}

/// A validated engine bound to one component.
pub struct AnimationBridge {
    engine: Box<dyn AnimationEngine>,
    awaiting: bool,
}

impl AnimationBridge {
    /// Bind an engine, or hand it back with the violations found.
    pub fn bind(
        engine: Box<dyn AnimationEngine>,
    ) -> Result<Self, (Box<dyn AnimationEngine>, Vec<ContractViolation>)> {
        let violations = validate(engine.as_ref());
        if violations.is_empty() {
            Ok(Self {
                engine,
                awaiting: false,
            })
        } else {
            Err((engine, violations))
        }
    }

    /// Write the target visibility and fire the play trigger.
    pub fn request(&mut self, shown: bool) {
        self.engine.set_bool(SHOWN_PARAM, shown);
        self.engine.set_trigger(PLAY_TRIGGER);
        self.awaiting = true;
    }

    /// Align the engine with a transition that completed without playing.
    ///
    /// A state entry the engine still reports for an earlier request is
    /// dropped afterwards.
    pub fn settle(&mut self, shown: bool) {
        self.engine.set_bool(SHOWN_PARAM, shown);
        self.awaiting = false;
    }

    /// Advance the engine and translate a state entry into a completion.
    pub fn poll(&mut self, dt: Duration) -> Option<Completion> {
        let entered = self.engine.advance(dt)?;
        if !self.awaiting {
            tracing::trace!(state = %entered.state, "stale animation state entry dropped");
            return None;
        }
        self.awaiting = false;
        let completion = if self.target_shown() {
            Completion::Shown
        } else {
            Completion::Hidden
        };
        tracing::trace!(state = %entered.state, ?completion, "animation state entered");
        Some(completion)
    }

    /// Visibility the engine is currently heading for.
    pub fn target_shown(&self) -> bool {
        self.engine.get_bool(SHOWN_PARAM).unwrap_or(false)
    }

    /// Whether the latest request has not reported back yet.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.awaiting
    }
}

impl std::fmt::Debug for AnimationBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationBridge")
            .field("awaiting", &self.awaiting)
            .field("target_shown", &self.target_shown())
            .finish()
    }
}

/// Reference engine: enters the target state a fixed time after `play`.
///
/// Re-triggering while a transition is running restarts the timer, so a
/// burst of toggles settles into a single state entry.
#[derive(Debug, Clone)]
pub struct TimedAnimator {
    duration: Duration,
    shown: bool,
    running: Option<Duration>,
}

impl TimedAnimator {
    /// Engine whose transitions last `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            shown: false,
            running: None,
        }
    }

    /// Whether a transition is playing.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

impl AnimationEngine for TimedAnimator {
    fn parameters(&self) -> Vec<AnimationParam> {
        vec![
            AnimationParam::new(SHOWN_PARAM, ParamKind::Bool),
            AnimationParam::new(PLAY_TRIGGER, ParamKind::Trigger),
        ]
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        if name == SHOWN_PARAM {
            self.shown = value;
        }
    }

    fn get_bool(&self, name: &str) -> Option<bool> {
        (name == SHOWN_PARAM).then_some(self.shown)
    }

    fn set_trigger(&mut self, name: &str) {
        if name == PLAY_TRIGGER {
            self.running = Some(Duration::ZERO);
        }
    }

    fn advance(&mut self, dt: Duration) -> Option<StateEntered> {
        let elapsed = self.running? + dt;
        if elapsed < self.duration {
            self.running = Some(elapsed);
            return None;
        }
        self.running = None;
        Some(StateEntered::new(if self.shown { "shown" } else { "hidden" }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BareEngine(Vec<AnimationParam>);

    impl AnimationEngine for BareEngine {
        fn parameters(&self) -> Vec<AnimationParam> {
            self.0.clone()
        }
        fn set_bool(&mut self, _name: &str, _value: bool) {}
        fn get_bool(&self, _name: &str) -> Option<bool> {
            None
        }
        fn set_trigger(&mut self, _name: &str) {}
        fn advance(&mut self, _dt: Duration) -> Option<StateEntered> {
            None
        }
    }

    #[test]
    fn timed_animator_satisfies_contract() {
        let engine = TimedAnimator::new(Duration::from_millis(100));
        assert!(validate(&engine).is_empty());
    }

    #[test]
    fn missing_parameters_reported() {
        let engine = BareEngine(vec![]);
        let violations = validate(&engine);
        assert_eq!(violations.len(), 2);
        assert!(matches!(
            violations[0],
            ContractViolation::Missing {
                name: SHOWN_PARAM,
                ..
            }
        ));
    }

    #[test]
    fn wrong_kind_reported() {
        let engine = BareEngine(vec![
            AnimationParam::new(SHOWN_PARAM, ParamKind::Trigger),
            AnimationParam::new(PLAY_TRIGGER, ParamKind::Trigger),
        ]);
        assert_eq!(
            validate(&engine),
            vec![ContractViolation::WrongKind {
                name: SHOWN_PARAM,
                expected: ParamKind::Bool,
                found: ParamKind::Trigger,
            }]
        );
    }

    #[test]
    fn bind_rejects_invalid_engine() {
        let result = AnimationBridge::bind(Box::new(BareEngine(vec![])));
        assert!(result.is_err());
    }

    #[test]
    fn bridge_completes_after_duration() {
        let engine = TimedAnimator::new(Duration::from_millis(100));
        let Ok(mut bridge) = AnimationBridge::bind(Box::new(engine)) else {
            panic!("valid engine rejected");
        };

        bridge.request(true);
        assert!(bridge.is_pending());
        assert_eq!(bridge.poll(Duration::from_millis(60)), None);
        assert_eq!(
            bridge.poll(Duration::from_millis(60)),
            Some(Completion::Shown)
        );
        assert!(!bridge.is_pending());
        assert_eq!(bridge.poll(Duration::from_millis(60)), None);

        bridge.request(false);
        assert_eq!(
            bridge.poll(Duration::from_millis(100)),
            Some(Completion::Hidden)
        );
    }

    #[test]
    fn settled_request_drops_state_entry() {
        let engine = TimedAnimator::new(Duration::from_millis(50));
        let Ok(mut bridge) = AnimationBridge::bind(Box::new(engine)) else {
            panic!("valid engine rejected");
        };
        bridge.request(true);
        bridge.settle(false);
        assert!(!bridge.target_shown());
        assert_eq!(bridge.poll(Duration::from_millis(50)), None);
    }

    #[test]
    fn retrigger_restarts_timer() {
        let mut engine = TimedAnimator::new(Duration::from_millis(100));
        engine.set_bool(SHOWN_PARAM, true);
        engine.set_trigger(PLAY_TRIGGER);
        assert!(engine.advance(Duration::from_millis(80)).is_none());
        engine.set_trigger(PLAY_TRIGGER);
        assert!(engine.advance(Duration::from_millis(80)).is_none());
        assert!(engine.advance(Duration::from_millis(20)).is_some());
        assert!(!engine.is_running());
    }
}
