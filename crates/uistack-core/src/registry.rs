#![forbid(unsafe_code)]

//! Explicit single-instance registry.
//!
//! [`UiContext`] holds at most one live instance per concrete type. The
//! navigation managers are installed here at startup and handed to
//! consumers by reference, instead of living in process-wide statics.
//!
//! # Invariants
//!
//! 1. A slot is filled by [`UiContext::install`] exactly once until
//!    [`UiContext::teardown`] empties it again.
//! 2. Reading a slot that was never installed fails fast with
//!    [`UiError::PreconditionMissing`].
//!
//! # Example
//!
//! ```
//! use uistack_core::UiContext;
//!
//! struct Clock(u32);
//!
//! let mut ctx = UiContext::new();
//! assert!(ctx.active::<Clock>().is_err());
//!
//! ctx.install(Clock(7)).unwrap();
//! assert_eq!(ctx.active::<Clock>().unwrap().0, 7);
//! assert!(ctx.install(Clock(8)).is_err());
//!
//! let clock = ctx.teardown::<Clock>();
//! assert_eq!(clock.map(|c| c.0), Some(7));
//! ```

use std::any::{Any, TypeId, type_name};

use ahash::AHashMap;

use crate::error::{Result, UiError};

struct Slot {
    type_name: &'static str,
    value: Box<dyn Any>,
}

/// Context object owning the process segment's single-instance services.
#[derive(Default)]
pub struct UiContext {
    slots: AHashMap<TypeId, Slot>,
}

impl UiContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the single live instance of `T`.
    ///
    /// Fails with [`UiError::AlreadyActive`] if one is already installed;
    /// the existing instance is kept.
    pub fn install<T: 'static>(&mut self, value: T) -> Result<&mut T> {
        let key = TypeId::of::<T>();
        if self.slots.contains_key(&key) {
            return Err(UiError::AlreadyActive {
                type_name: type_name::<T>(),
            });
        }
        tracing::debug!(slot = type_name::<T>(), "context slot installed");
        let slot = self.slots.entry(key).or_insert(Slot {
            type_name: type_name::<T>(),
            value: Box::new(value),
        });
        slot.value
            .downcast_mut::<T>()
            .ok_or(UiError::PreconditionMissing {
                requires: type_name::<T>(),
            })
    }

    /// Remove and return the instance of `T`, if installed.
    pub fn teardown<T: 'static>(&mut self) -> Option<T> {
        let slot = self.slots.remove(&TypeId::of::<T>())?;
        tracing::debug!(slot = slot.type_name, "context slot torn down");
        slot.value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    /// The live instance of `T`.
    pub fn active<T: 'static>(&self) -> Result<&T> {
        self.slots
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.downcast_ref::<T>())
            .ok_or(UiError::PreconditionMissing {
                requires: type_name::<T>(),
            })
    }

    /// The live instance of `T`, mutably.
    pub fn active_mut<T: 'static>(&mut self) -> Result<&mut T> {
        self.slots
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| slot.value.downcast_mut::<T>())
            .ok_or(UiError::PreconditionMissing {
                requires: type_name::<T>(),
            })
    }

    /// Whether an instance of `T` is installed.
    pub fn is_active<T: 'static>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<T>())
    }

    /// Number of installed slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.slots.values().map(|slot| slot.type_name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Counter(u32);

    struct Other;

    #[test]
    fn empty_context_fails_fast() {
        let ctx = UiContext::new();
        assert!(ctx.is_empty());
        assert!(!ctx.is_active::<Counter>());
        assert!(matches!(
            ctx.active::<Counter>(),
            Err(UiError::PreconditionMissing { .. })
        ));
    }

    #[test]
    fn install_then_mutate() {
        let mut ctx = UiContext::new();
        ctx.install(Counter(1)).unwrap().0 += 1;
        ctx.active_mut::<Counter>().unwrap().0 += 1;
        assert_eq!(ctx.active::<Counter>().unwrap(), &Counter(3));
    }

    #[test]
    fn second_install_rejected_and_first_kept() {
        let mut ctx = UiContext::new();
        ctx.install(Counter(1)).unwrap();
        let err = ctx.install(Counter(2)).unwrap_err();
        assert!(matches!(err, UiError::AlreadyActive { .. }));
        assert_eq!(ctx.active::<Counter>().unwrap(), &Counter(1));
    }

    #[test]
    fn slots_are_per_type() {
        let mut ctx = UiContext::new();
        ctx.install(Counter(1)).unwrap();
        ctx.install(Other).unwrap();
        assert_eq!(ctx.len(), 2);
        assert!(ctx.teardown::<Other>().is_some());
        assert!(ctx.is_active::<Counter>());
        assert!(!ctx.is_active::<Other>());
    }

    #[test]
    fn teardown_allows_reinstall() {
        let mut ctx = UiContext::new();
        ctx.install(Counter(1)).unwrap();
        assert_eq!(ctx.teardown::<Counter>(), Some(Counter(1)));
        assert!(ctx.teardown::<Counter>().is_none());
        ctx.install(Counter(5)).unwrap();
        assert_eq!(ctx.active::<Counter>().unwrap(), &Counter(5));
    }
}
