#![forbid(unsafe_code)]

//! Dimming layer behind the modal stack.
//!
//! The backdrop ramps its alpha linearly between `0` and a target value.
//! Each [`Backdrop::tick`] moves it by `target * dt / transition`.
//!
//! # Invariants
//!
//! - `0 <= alpha <= target` at all times.
//! - During a fade-in alpha never decreases; during a fade-out it never
//!   increases.
//! - A fade-in enables the layer immediately; a fade-out disables it once
//!   alpha reaches `0`.
//! - Starting a fade replaces the one in flight.

use std::time::Duration;

use crate::config::{MIN_TRANSITION_SECS, ModalConfig};

/// Direction of an in-flight fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fade {
    In,
    Out,
}

/// Backdrop alpha ramp.
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    alpha: f32,
    target: f32,
    transition: Duration,
    fade: Option<Fade>,
    enabled: bool,
}

impl Backdrop {
    /// Transparent, disabled backdrop fading to `target` over `transition`.
    pub fn new(target: f32, transition: Duration) -> Self {
        Self {
            alpha: 0.0,
            target: target.clamp(0.0, 1.0),
            transition: transition.max(Duration::from_secs_f32(MIN_TRANSITION_SECS)),
            fade: None,
            enabled: false,
        }
    }

    pub fn from_config(config: &ModalConfig) -> Self {
        Self::new(config.backdrop_alpha, config.transition())
    }

    /// Start ramping up to the target alpha.
    pub fn fade_in(&mut self) {
        self.enabled = true;
        self.fade = Some(Fade::In);
        tracing::trace!(alpha = self.alpha, target = self.target, "backdrop fade in");
    }

    /// Start ramping down to transparent.
    pub fn fade_out(&mut self) {
        self.fade = Some(Fade::Out);
        tracing::trace!(alpha = self.alpha, "backdrop fade out");
    }

    /// Advance the running fade by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let Some(fade) = self.fade else {
            return;
        };
        let step = self.target * (dt.as_secs_f32() / self.transition.as_secs_f32());
        match fade {
            Fade::In => {
                self.alpha = (self.alpha + step).min(self.target);
                if self.alpha >= self.target {
                    self.fade = None;
                }
            }
            Fade::Out => {
                self.alpha = (self.alpha - step).max(0.0);
                if self.alpha <= 0.0 {
                    self.fade = None;
                    self.enabled = false;
                }
            }
        }
    }

    // --- Queries ---

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn transition(&self) -> Duration {
        self.transition
    }

    /// Fade in flight, if any.
    #[inline]
    pub fn fade(&self) -> Option<Fade> {
        self.fade
    }

    /// Whether the layer is drawn (and blocks input) at all.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the backdrop sits at its full target alpha and is not
    /// fading out.
    pub fn is_masking(&self) -> bool {
        self.enabled && self.fade != Some(Fade::Out) && self.alpha >= self.target
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::from_config(&ModalConfig::default())
    }
}
