#![forbid(unsafe_code)]

//! Prototype pools: where managers materialize components from.
//!
//! A [`Prototype`] is a named factory for one behavior type. Prototypes are
//! grouped under logical pool names ("menus", "modals", ...) and kept in
//! registration order. Managers look them up through the [`ResourcePool`]
//! trait so hosts can back pools with whatever asset system they use.
//!
//! # Resolution
//!
//! [`resolve`] picks a prototype for behavior type `T`:
//!
//! | Name filter | Result |
//! |-------------|--------|
//! | `None` or `""` | First registered prototype of type `T` |
//! | `Some(name)` | Prototype of type `T` whose name equals `name` |
//! | No match | [`UiError::NotFound`] |
//!
//! # Example
//!
//! ```
//! use uistack_core::{Behavior, PrototypePool, Prototype, pool};
//!
//! #[derive(Default)]
//! struct Settings;
//!
//! impl Behavior for Settings {
//!     fn build(&mut self) {}
//!     fn clear(&mut self) {}
//! }
//!
//! let mut prototypes = PrototypePool::new();
//! prototypes.register("menus", Prototype::new("Audio", Settings::default));
//! prototypes.register("menus", Prototype::new("Video", Settings::default));
//!
//! let first = pool::resolve::<Settings>(&prototypes, "menus", None).unwrap();
//! assert_eq!(first.name(), "Audio");
//! assert!(pool::resolve::<Settings>(&prototypes, "menus", Some("Input")).is_err());
//! ```

use std::any::{TypeId, type_name};
use std::rc::Rc;

use ahash::AHashMap;

use crate::component::{Behavior, UiComponent};
use crate::error::{Result, UiError};

type Factory = Rc<dyn Fn() -> UiComponent>;
type Configure = Rc<dyn Fn(UiComponent) -> UiComponent>;

/// A named factory for components of one behavior type.
#[derive(Clone)]
pub struct Prototype {
    name: String,
    type_id: TypeId,
    type_name: &'static str,
    factory: Factory,
    configure: Option<Configure>,
}

impl Prototype {
    /// Prototype producing `UiComponent`s named `name` around `factory()`.
    pub fn new<B, F>(name: impl Into<String>, factory: F) -> Self
    where
        B: Behavior,
        F: Fn() -> B + 'static,
    {
        let name = name.into();
        let component_name = name.clone();
        Self {
            name,
            type_id: TypeId::of::<B>(),
            type_name: type_name::<B>(),
            factory: Rc::new(move || UiComponent::new(component_name.clone(), factory())),
            configure: None,
        }
    }

    /// Post-process every instance (hide policy, animation, show-on-create).
    #[must_use]
    pub fn configure(mut self, f: impl Fn(UiComponent) -> UiComponent + 'static) -> Self {
        self.configure = Some(Rc::new(f));
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `TypeId` of the behavior this prototype produces.
    #[inline]
    pub fn behavior_type(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether instances carry a `T` behavior.
    #[inline]
    pub fn is<T: Behavior>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Create a fresh, inactive, unbuilt instance.
    pub fn instantiate(&self) -> UiComponent {
        let component = (self.factory)();
        match &self.configure {
            Some(configure) => configure(component),
            None => component,
        }
    }
}

impl std::fmt::Debug for Prototype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prototype")
            .field("name", &self.name)
            .field("type", &self.type_name)
            .field("configured", &self.configure.is_some())
            .finish()
    }
}

/// Source of prototypes, queried by pool name.
pub trait ResourcePool {
    /// Every prototype registered under `pool`, in registration order.
    fn load_all(&self, pool: &str) -> Vec<&Prototype>;
}

/// In-memory [`ResourcePool`] populated in code.
#[derive(Debug, Default, Clone)]
pub struct PrototypePool {
    pools: AHashMap<String, Vec<Prototype>>,
}

impl PrototypePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `prototype` to `pool`.
    pub fn register(&mut self, pool: impl Into<String>, prototype: Prototype) -> &mut Self {
        let pool = pool.into();
        tracing::trace!(pool = %pool, prototype = %prototype.name, "prototype registered");
        self.pools.entry(pool).or_default().push(prototype);
        self
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, pool: impl Into<String>, prototype: Prototype) -> Self {
        self.register(pool, prototype);
        self
    }

    /// Number of prototypes under `pool`.
    pub fn len(&self, pool: &str) -> usize {
        self.pools.get(pool).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.pools.values().all(Vec::is_empty)
    }
}

impl ResourcePool for PrototypePool {
    fn load_all(&self, pool: &str) -> Vec<&Prototype> {
        self.pools
            .get(pool)
            .map(|prototypes| prototypes.iter().collect())
            .unwrap_or_default()
    }
}

fn name_filter(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.is_empty())
}

/// Pick the prototype of behavior `T` under `pool_name`.
///
/// An omitted or empty `name` selects the first prototype of the type; a
/// given name must match exactly.
pub fn resolve<'a, T: Behavior>(
    pool: &'a dyn ResourcePool,
    pool_name: &str,
    name: Option<&str>,
) -> Result<&'a Prototype> {
    let name = name_filter(name);
    pool.load_all(pool_name)
        .into_iter()
        .filter(|prototype| prototype.is::<T>())
        .find(|prototype| name.is_none_or(|n| prototype.name == n))
        .ok_or_else(|| UiError::NotFound {
            kind: type_name::<T>(),
            pool: pool_name.to_owned(),
            name: name.map(str::to_owned),
        })
}

/// Pick a prototype by name alone, whatever its behavior type.
pub fn resolve_any<'a>(
    pool: &'a dyn ResourcePool,
    pool_name: &str,
    name: &str,
) -> Result<&'a Prototype> {
    pool.load_all(pool_name)
        .into_iter()
        .find(|prototype| prototype.name == name)
        .ok_or_else(|| UiError::NotFound {
            kind: "component",
            pool: pool_name.to_owned(),
            name: Some(name.to_owned()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::HidePolicy;

    #[derive(Default)]
    struct Home;

    impl Behavior for Home {
        fn build(&mut self) {}
        fn clear(&mut self) {}
    }

    #[derive(Default)]
    struct Settings;

    impl Behavior for Settings {
        fn build(&mut self) {}
        fn clear(&mut self) {}
    }

    fn menus() -> PrototypePool {
        PrototypePool::new()
            .with("menus", Prototype::new("Home", Home::default))
            .with("menus", Prototype::new("Audio", Settings::default))
            .with("menus", Prototype::new("Video", Settings::default))
    }

    #[test]
    fn first_of_type_without_name() {
        let pool = menus();
        assert_eq!(resolve::<Settings>(&pool, "menus", None).unwrap().name(), "Audio");
        assert_eq!(resolve::<Settings>(&pool, "menus", Some("")).unwrap().name(), "Audio");
    }

    #[test]
    fn exact_name_match() {
        let pool = menus();
        assert_eq!(
            resolve::<Settings>(&pool, "menus", Some("Video")).unwrap().name(),
            "Video"
        );
    }

    #[test]
    fn name_of_other_type_is_not_found() {
        let pool = menus();
        let err = resolve::<Settings>(&pool, "menus", Some("Home")).unwrap_err();
        assert!(matches!(err, UiError::NotFound { name: Some(ref n), .. } if n == "Home"));
    }

    #[test]
    fn unknown_pool_is_not_found() {
        let pool = menus();
        assert!(pool.load_all("modals").is_empty());
        assert!(matches!(
            resolve::<Home>(&pool, "modals", None),
            Err(UiError::NotFound { name: None, .. })
        ));
    }

    #[test]
    fn resolve_any_ignores_type() {
        let pool = menus();
        assert!(resolve_any(&pool, "menus", "Video").unwrap().is::<Settings>());
        assert!(resolve_any(&pool, "menus", "Input").is_err());
    }

    #[test]
    fn instances_are_fresh_and_configured() {
        let prototype = Prototype::new("Home", Home::default)
            .configure(|c| c.with_hide_policy(HidePolicy::Destroy));
        let a = prototype.instantiate();
        let b = prototype.instantiate();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.name(), "Home");
        assert!(a.is::<Home>());
        assert_eq!(b.hide_policy(), HidePolicy::Destroy);
        assert!(!a.is_active() && !a.is_built());
    }

    #[test]
    fn registration_order_is_kept() {
        let pool = menus();
        let names: Vec<_> = pool.load_all("menus").iter().map(|p| p.name()).collect();
        assert_eq!(names, ["Home", "Audio", "Video"]);
        assert_eq!(pool.len("menus"), 3);
        assert!(!pool.is_empty());
    }
}
