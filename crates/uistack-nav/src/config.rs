#![forbid(unsafe_code)]

//! Manager configuration.
//!
//! # Serialization
//!
//! With the `policy-config` feature enabled (the default), the config types
//! derive `Deserialize` and [`NavConfig::from_toml_str`] loads them from
//! TOML. Missing keys fall back to the defaults below.
//!
//! | Key | Default |
//! |-----|---------|
//! | `menus.pool` | `"menus"` |
//! | `menus.default_menu` | none |
//! | `modals.pool` | `"modals"` |
//! | `modals.backdrop_alpha` | `0.6` |
//! | `modals.transition_secs` | `0.25` |
//! | `modals.bring_to_front` | `true` |
//!
//! # Validation
//!
//! [`NavConfig::validated`] rejects empty pool names and non-finite numbers,
//! clamps `backdrop_alpha` into `[0, 1]`, and clamps `transition_secs`
//! into [`MIN_TRANSITION_SECS`]`..=`[`MAX_TRANSITION_SECS`].

use std::time::Duration;

/// Shortest allowed backdrop fade.
pub const MIN_TRANSITION_SECS: f32 = 0.01;

/// Longest allowed backdrop fade.
pub const MAX_TRANSITION_SECS: f32 = 1.0;

/// Configuration error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The source text could not be parsed.
    Parse(String),
    /// A field holds a value that cannot be repaired by clamping.
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid navigation config: {message}"),
            Self::InvalidValue { field, reason } => write!(f, "invalid value for {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Menu manager settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(serde::Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct MenuConfig {
    /// Pool menus are materialized from.
    pub pool: String,
    /// Prototype opened by `MenuManager::start`.
    pub default_menu: Option<String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            pool: "menus".into(),
            default_menu: None,
        }
    }
}

impl MenuConfig {
    #[must_use]
    pub fn pool(mut self, pool: impl Into<String>) -> Self {
        self.pool = pool.into();
        self
    }

    #[must_use]
    pub fn default_menu(mut self, name: impl Into<String>) -> Self {
        self.default_menu = Some(name.into());
        self
    }
}

/// Modal manager settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(serde::Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct ModalConfig {
    /// Pool modals are materialized from.
    pub pool: String,
    /// Backdrop alpha while masking, in `[0, 1]`.
    pub backdrop_alpha: f32,
    /// Duration of a full backdrop fade, in seconds.
    pub transition_secs: f32,
    /// Whether the overlay layer should be raised above its siblings.
    pub bring_to_front: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            pool: "modals".into(),
            backdrop_alpha: 0.6,
            transition_secs: 0.25,
            bring_to_front: true,
        }
    }
}

impl ModalConfig {
    #[must_use]
    pub fn pool(mut self, pool: impl Into<String>) -> Self {
        self.pool = pool.into();
        self
    }

    #[must_use]
    pub fn backdrop_alpha(mut self, alpha: f32) -> Self {
        self.backdrop_alpha = alpha;
        self
    }

    #[must_use]
    pub fn transition_secs(mut self, secs: f32) -> Self {
        self.transition_secs = secs;
        self
    }

    #[must_use]
    pub fn bring_to_front(mut self, raise: bool) -> Self {
        self.bring_to_front = raise;
        self
    }

    /// Fade duration, clamped into the allowed range. A NaN duration falls
    /// back to [`MAX_TRANSITION_SECS`].
    pub fn transition(&self) -> Duration {
        let secs = self
            .transition_secs
            .clamp(MIN_TRANSITION_SECS, MAX_TRANSITION_SECS);
        Duration::try_from_secs_f32(secs)
            .unwrap_or_else(|_| Duration::from_secs_f32(MAX_TRANSITION_SECS))
    }
}

/// Settings for both navigation managers.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "policy-config", derive(serde::Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct NavConfig {
    pub menus: MenuConfig,
    pub modals: ModalConfig,
}

impl NavConfig {
    /// Parse and validate a TOML document.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(source).map_err(|err| ConfigError::Parse(err.message().to_owned()))?;
        config.validated()
    }

    /// Check and repair values.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.menus.pool.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "menus.pool",
                reason: "pool name is empty",
            });
        }
        if self.modals.pool.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "modals.pool",
                reason: "pool name is empty",
            });
        }
        if self.menus.default_menu.as_deref() == Some("") {
            self.menus.default_menu = None;
        }

        let modals = &mut self.modals;
        if !modals.backdrop_alpha.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "modals.backdrop_alpha",
                reason: "not a finite number",
            });
        }
        if !modals.transition_secs.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "modals.transition_secs",
                reason: "not a finite number",
            });
        }
        let alpha = modals.backdrop_alpha.clamp(0.0, 1.0);
        if alpha != modals.backdrop_alpha {
            tracing::warn!(
                configured = modals.backdrop_alpha,
                clamped = alpha,
                "backdrop alpha out of range"
            );
            modals.backdrop_alpha = alpha;
        }
        let transition = modals
            .transition_secs
            .clamp(MIN_TRANSITION_SECS, MAX_TRANSITION_SECS);
        if transition != modals.transition_secs {
            tracing::warn!(
                configured = modals.transition_secs,
                clamped = transition,
                "backdrop transition out of range"
            );
            modals.transition_secs = transition;
        }
        Ok(self)
    }
}
