#![forbid(unsafe_code)]

//! Menu stack manager.
//!
//! The [`MenuManager`] owns every materialized menu in a [`Container`] and
//! tracks which one is active. Opening a menu hides the active one first;
//! previous/next walk the container in materialization order.
//!
//! # Invariants
//!
//! - At most one menu is the active menu.
//! - Resolution (cache lookup or pool instantiation) happens before any
//!   hide, so a failed open leaves the active menu untouched.
//! - Previous/next never leave `[0, len - 1]` and step over menus that
//!   are destroyed but not yet reaped.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `NotFound` | No prototype of the type, or name miss | Call aborted, active menu kept |
//! | `UnknownComponent` | Id not owned by this manager, or destroyed | Call aborted |
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use uistack_core::{Behavior, Prototype, PrototypePool};
//! use uistack_nav::{MenuConfig, MenuManager};
//!
//! #[derive(Default)]
//! struct Home;
//! impl Behavior for Home {
//!     fn build(&mut self) {}
//!     fn clear(&mut self) {}
//! }
//!
//! let pool = PrototypePool::new().with("menus", Prototype::new("Home", Home::default));
//! let mut menus = MenuManager::new(Rc::new(pool), MenuConfig::default());
//!
//! let home = menus.open_menu::<Home>(None).unwrap();
//! assert_eq!(menus.active_menu(), Some(home));
//! ```

use std::rc::Rc;
use std::time::Duration;

use uistack_core::pool::{self, ResourcePool};
use uistack_core::{
    Behavior, ComponentId, Container, NavRequest, Parameterized, Requests, Result, UiComponent,
    UiError,
};

use crate::config::MenuConfig;

/// Owner of the menu stack.
pub struct MenuManager {
    pool: Rc<dyn ResourcePool>,
    config: MenuConfig,
    menus: Container,
    active: Option<ComponentId>,
}

impl MenuManager {
    pub fn new(pool: Rc<dyn ResourcePool>, config: MenuConfig) -> Self {
        Self {
            pool,
            config,
            menus: Container::new(),
            active: None,
        }
    }

    /// Open the configured default menu, if any.
    pub fn start(&mut self) -> Result<Option<ComponentId>> {
        let Some(name) = self.config.default_menu.clone() else {
            return Ok(None);
        };
        let cached = self
            .menus
            .iter()
            .find(|menu| !menu.is_destroyed() && menu.name() == name)
            .map(UiComponent::id);
        let id = match cached {
            Some(id) => id,
            None => {
                let prototype = pool::resolve_any(&*self.pool, &self.config.pool, &name)?;
                let component = prototype.instantiate();
                self.adopt(component)
            }
        };
        tracing::debug!(menu = %name, %id, "default menu");
        self.open(id).map(Some)
    }

    // --- Opening ---

    /// Hide the active menu (if it is another one), then show `id`.
    pub fn open(&mut self, id: ComponentId) -> Result<ComponentId> {
        if !self.menus.get(id).is_some_and(|menu| !menu.is_destroyed()) {
            return Err(UiError::UnknownComponent(id));
        }
        if let Some(current) = self.active.filter(|&current| current != id) {
            self.close_menu(current);
        }
        self.active = Some(id);
        if let Some(menu) = self.menus.get_mut(id) {
            tracing::debug!(menu = %menu.name(), %id, "menu opened");
            menu.show(false);
        }
        Ok(id)
    }

    /// Attach a caller-built menu, then open it.
    pub fn open_instance(&mut self, component: UiComponent) -> Result<ComponentId> {
        let id = self.adopt(component);
        self.open(id)
    }

    /// Open the menu of behavior `T`, reusing a cached instance when one
    /// exists.
    pub fn open_menu<T: Behavior>(&mut self, name: Option<&str>) -> Result<ComponentId> {
        let id = self.load_menu::<T>(name)?;
        self.open(id)
    }

    /// [`open_menu`](Self::open_menu), handing `params` to the menu first.
    pub fn open_menu_with<T: Parameterized>(
        &mut self,
        params: T::Params,
        name: Option<&str>,
    ) -> Result<ComponentId> {
        let id = self.load_menu_with::<T>(params, name)?;
        self.open(id)
    }

    /// Materialize the menu of behavior `T` without showing it.
    ///
    /// A cached instance is reloaded; otherwise a fresh instance is created
    /// from the pool and attached hidden.
    pub fn load_menu<T: Behavior>(&mut self, name: Option<&str>) -> Result<ComponentId> {
        self.materialize::<T>(name, |_| {})
    }

    /// [`load_menu`](Self::load_menu), handing `params` to the menu before
    /// it is (re)built.
    pub fn load_menu_with<T: Parameterized>(
        &mut self,
        params: T::Params,
        name: Option<&str>,
    ) -> Result<ComponentId> {
        self.materialize::<T>(name, move |menu| {
            menu.set_params::<T>(params);
        })
    }

    // --- Navigation ---

    /// Open the menu before the active one. No-op at the first menu or with
    /// no active menu.
    pub fn previous_menu(&mut self) -> Option<ComponentId> {
        let index = self.active_index()?;
        let id = self
            .menus
            .iter()
            .take(index)
            .rev()
            .find(|menu| !menu.is_destroyed())
            .map(UiComponent::id)?;
        self.open(id).ok()
    }

    /// Open the menu after the active one. No-op at the last menu or with no
    /// active menu.
    pub fn next_menu(&mut self) -> Option<ComponentId> {
        let index = self.active_index()?;
        let id = self
            .menus
            .iter()
            .skip(index + 1)
            .find(|menu| !menu.is_destroyed())
            .map(UiComponent::id)?;
        self.open(id).ok()
    }

    /// Hide `id` according to its hide policy.
    pub fn close_menu(&mut self, id: ComponentId) {
        let Some(menu) = self.menus.get_mut(id) else {
            return;
        };
        tracing::debug!(menu = %menu.name(), %id, policy = ?menu.hide_policy(), "menu closed");
        menu.hide(false);
        if self.active == Some(id) {
            self.active = None;
        }
    }

    /// Hide every menu according to its hide policy.
    pub fn close_all_menus(&mut self) {
        for id in self.menus.ids() {
            self.close_menu(id);
        }
    }

    // --- Access ---

    #[inline]
    pub fn active_menu(&self) -> Option<ComponentId> {
        self.active
    }

    pub fn menu(&self, id: ComponentId) -> Option<&UiComponent> {
        self.menus.get(id)
    }

    pub fn menu_mut(&mut self, id: ComponentId) -> Option<&mut UiComponent> {
        self.menus.get_mut(id)
    }

    /// Menus in materialization order.
    pub fn menus(&self) -> &Container {
        &self.menus
    }

    #[inline]
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Run `f` on the `T` behavior of menu `id`, then apply the navigation
    /// requests it queued.
    pub fn interact<T: Behavior, R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut T, &mut Requests) -> R,
    ) -> Result<R> {
        let behavior = self
            .menus
            .get_mut(id)
            .and_then(UiComponent::behavior_mut::<T>)
            .ok_or(UiError::UnknownComponent(id))?;
        let mut requests = Requests::new(id);
        let result = f(behavior, &mut requests);
        self.apply(requests);
        Ok(result)
    }

    /// Apply navigation requests raised by a menu.
    pub fn apply(&mut self, mut requests: Requests) {
        let source = requests.source();
        for request in requests.drain() {
            tracing::trace!(%source, ?request, "menu request");
            match request {
                NavRequest::Close => self.close_menu(source),
                NavRequest::Previous => {
                    self.previous_menu();
                }
                NavRequest::Next => {
                    self.next_menu();
                }
            }
        }
    }

    /// Tick every menu and reap destroyed ones.
    pub fn update(&mut self, dt: Duration) {
        self.menus.update(dt);
        for id in self.menus.reap() {
            if self.active == Some(id) {
                self.active = None;
            }
        }
    }

    // --- Internals ---

    fn materialize<T: Behavior>(
        &mut self,
        name: Option<&str>,
        prepare: impl FnOnce(&mut UiComponent),
    ) -> Result<ComponentId> {
        if let Some(id) = self.menus.find::<T>(name) {
            if let Some(menu) = self.menus.get_mut(id) {
                prepare(menu);
                menu.reload();
            }
            tracing::trace!(%id, "cached menu reused");
            return Ok(id);
        }
        let prototype = pool::resolve::<T>(&*self.pool, &self.config.pool, name)?;
        let mut component = prototype.instantiate();
        prepare(&mut component);
        Ok(self.adopt(component))
    }

    /// Attach `component` and leave it hidden.
    fn adopt(&mut self, component: UiComponent) -> ComponentId {
        let id = self.menus.attach(component);
        if let Some(menu) = self.menus.get_mut(id) {
            menu.deactivate();
        }
        id
    }

    fn active_index(&self) -> Option<usize> {
        self.menus.index_of(self.active?)
    }
}

impl std::fmt::Debug for MenuManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuManager")
            .field("config", &self.config)
            .field("menus", &self.menus.len())
            .field("active", &self.active)
            .finish()
    }
}
