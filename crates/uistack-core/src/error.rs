#![forbid(unsafe_code)]

//! Error taxonomy shared by the lifecycle core and the navigation managers.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `NotFound` | Pool has no prototype of the type, or the name filter missed | Call aborted, state untouched |
//! | `PreconditionMissing` | Required context slot was never installed | Call aborted |
//! | `AlreadyActive` | Second `install` of the same slot type | Existing instance kept |
//! | `UnknownComponent` | Id not present in the manager's container | Call aborted |
//!
//! Structural problems (an animation engine missing its contract
//! parameters, for example) are not errors: they are logged with
//! `tracing::warn!` and the component keeps running in a degraded mode.

use crate::component::ComponentId;

/// Errors raised by lifecycle, registry, and navigation operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The requested prototype is absent from the pool.
    NotFound {
        /// Type name of the requested behavior.
        kind: &'static str,
        /// Logical pool that was searched.
        pool: String,
        /// Name filter, if one was supplied.
        name: Option<String>,
    },
    /// An operation needs a context slot that is not installed.
    PreconditionMissing {
        /// Type name of the missing slot.
        requires: &'static str,
    },
    /// A slot of this type is already installed in the context.
    AlreadyActive {
        /// Type name of the slot.
        type_name: &'static str,
    },
    /// The component id does not belong to this container.
    UnknownComponent(ComponentId),
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound {
                kind,
                pool,
                name: Some(name),
            } => write!(f, "no {kind} named '{name}' found in pool '{pool}'"),
            Self::NotFound {
                kind,
                pool,
                name: None,
            } => write!(f, "no {kind} found in pool '{pool}'"),
            Self::PreconditionMissing { requires } => {
                write!(f, "operation requires an active {requires}")
            }
            Self::AlreadyActive { type_name } => {
                write!(f, "an instance of {type_name} is already active")
            }
            Self::UnknownComponent(id) => write!(f, "unknown component {id}"),
        }
    }
}

impl std::error::Error for UiError {}

/// Result alias used throughout uistack.
pub type Result<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_name_and_pool() {
        let err = UiError::NotFound {
            kind: "Settings",
            pool: "menus".into(),
            name: Some("Audio".into()),
        };
        assert_eq!(
            err.to_string(),
            "no Settings named 'Audio' found in pool 'menus'"
        );
    }

    #[test]
    fn not_found_without_name() {
        let err = UiError::NotFound {
            kind: "Popup",
            pool: "modals".into(),
            name: None,
        };
        assert_eq!(err.to_string(), "no Popup found in pool 'modals'");
    }

    #[test]
    fn precondition_message() {
        let err = UiError::PreconditionMissing {
            requires: "ModalManager",
        };
        assert_eq!(err.to_string(), "operation requires an active ModalManager");
    }
}
