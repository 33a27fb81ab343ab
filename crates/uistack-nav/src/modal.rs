#![forbid(unsafe_code)]

//! Modal overlay manager.
//!
//! The [`ModalManager`] keeps modals in a [`Container`] whose order is the
//! z-order (last is on top) and drives the [`Backdrop`] dimming the content
//! underneath.
//!
//! # Invariants
//!
//! - The active modal is the topmost active entry of the stack.
//! - Opening a modal fades the backdrop in unless it is already masking.
//! - Closing the last modal through [`ModalManager::previous_modal`] or
//!   [`ModalManager::close_all_modals`] fades the backdrop out.
//! - Modals are always freshly instantiated; nothing is cached by type.
//! - Closed listeners fire on every hide completion of every modal, after
//!   the modal's hide policy was applied.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `NotFound` | No prototype of the type, or name miss | Call aborted, stack and backdrop untouched |
//! | `UnknownComponent` | Id not owned by this manager | Call aborted |

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use uistack_core::pool::{self, ResourcePool};
use uistack_core::{
    Behavior, ComponentId, Container, HidePolicy, Hook, NavRequest, Parameterized, Requests,
    Result, UiComponent, UiError,
};

use crate::backdrop::Backdrop;
use crate::config::ModalConfig;

/// Owner of the overlay stack and its backdrop.
pub struct ModalManager {
    pool: Rc<dyn ResourcePool>,
    config: ModalConfig,
    modals: Container,
    backdrop: Backdrop,
    closed: Rc<RefCell<Vec<Hook>>>,
}

impl ModalManager {
    pub fn new(pool: Rc<dyn ResourcePool>, config: ModalConfig) -> Self {
        let backdrop = Backdrop::from_config(&config);
        Self {
            pool,
            config,
            modals: Container::new(),
            backdrop,
            closed: Rc::default(),
        }
    }

    // --- Opening ---

    /// Put `id` on top of the stack and show it.
    ///
    /// The modal that was active is closed first: destroyed when
    /// `close_current` is set, hidden and kept on the stack otherwise.
    pub fn open(&mut self, id: ComponentId, close_current: bool) -> Result<ComponentId> {
        if !self.modals.contains(id) {
            return Err(UiError::UnknownComponent(id));
        }
        if !self.backdrop.is_masking() {
            self.backdrop.fade_in();
        }
        if let Some(current) = self.active_modal().filter(|&current| current != id) {
            self.close_modal(current, close_current);
        }
        self.modals.bring_to_front(id);
        let depth = self.modals.len();
        if let Some(modal) = self.modals.get_mut(id) {
            tracing::debug!(modal = %modal.name(), %id, depth, "modal opened");
            modal.show(false);
        }
        Ok(id)
    }

    /// Attach a caller-built modal, then open it.
    pub fn open_instance(
        &mut self,
        component: UiComponent,
        close_current: bool,
    ) -> Result<ComponentId> {
        let id = self.adopt(component);
        self.open(id, close_current)
    }

    /// Instantiate the modal of behavior `T` from the pool and open it.
    pub fn open_modal<T: Behavior>(
        &mut self,
        name: Option<&str>,
        close_current: bool,
    ) -> Result<ComponentId> {
        let id = self.load_modal::<T>(name)?;
        self.open(id, close_current)
    }

    /// [`open_modal`](Self::open_modal), handing `params` to the modal first.
    pub fn open_modal_with<T: Parameterized>(
        &mut self,
        params: T::Params,
        name: Option<&str>,
        close_current: bool,
    ) -> Result<ComponentId> {
        let prototype = pool::resolve::<T>(&*self.pool, &self.config.pool, name)?;
        let mut component = prototype.instantiate();
        component.set_params::<T>(params);
        let id = self.adopt(component);
        self.open(id, close_current)
    }

    /// Instantiate the modal of behavior `T` from the pool, hidden.
    pub fn load_modal<T: Behavior>(&mut self, name: Option<&str>) -> Result<ComponentId> {
        let prototype = pool::resolve::<T>(&*self.pool, &self.config.pool, name)?;
        let component = prototype.instantiate();
        Ok(self.adopt(component))
    }

    // --- Closing ---

    /// Destroy the active modal and reactivate the one below it, or fade the
    /// backdrop out when none is left.
    pub fn previous_modal(&mut self) -> Option<ComponentId> {
        let Some(current) = self.active_modal() else {
            self.backdrop.fade_out();
            return None;
        };
        let index = self.modals.index_of(current)?;
        self.close_modal(current, true);

        let below = self
            .modals
            .iter()
            .take(index)
            .rev()
            .find(|modal| !modal.is_destroyed())
            .map(UiComponent::id);
        match below {
            Some(id) => {
                self.modals.bring_to_front(id);
                if let Some(modal) = self.modals.get_mut(id) {
                    tracing::debug!(modal = %modal.name(), %id, "modal restored");
                    modal.show(false);
                }
                Some(id)
            }
            None => {
                self.backdrop.fade_out();
                None
            }
        }
    }

    /// Destroy every modal and fade the backdrop out.
    pub fn close_all_modals(&mut self) {
        for id in self.modals.ids() {
            self.close_modal(id, true);
        }
        self.backdrop.fade_out();
    }

    /// Close `id`.
    ///
    /// An active modal is hidden with its policy set to `Destroy` (or
    /// `Disable` when `destroy` is false); an inactive one is torn down at
    /// once.
    pub fn close_modal(&mut self, id: ComponentId, destroy: bool) {
        let Some(modal) = self.modals.get_mut(id) else {
            return;
        };
        if modal.is_active() {
            modal.set_hide_policy(if destroy {
                HidePolicy::Destroy
            } else {
                HidePolicy::Disable
            });
            tracing::debug!(modal = %modal.name(), %id, destroy, "modal closed");
            modal.hide(false);
        } else {
            tracing::debug!(modal = %modal.name(), %id, "inactive modal destroyed");
            modal.destroy();
        }
    }

    /// Register a listener fired each time any modal finishes hiding,
    /// whichever call closed it.
    pub fn on_modal_closed(&mut self, listener: impl Fn(&UiComponent) + 'static) {
        self.closed.borrow_mut().push(Rc::new(listener));
    }

    // --- Access ---

    /// Topmost active modal.
    pub fn active_modal(&self) -> Option<ComponentId> {
        self.modals
            .iter()
            .rev()
            .find(|modal| modal.is_active() && !modal.is_destroyed())
            .map(UiComponent::id)
    }

    pub fn modal(&self, id: ComponentId) -> Option<&UiComponent> {
        self.modals.get(id)
    }

    pub fn modal_mut(&mut self, id: ComponentId) -> Option<&mut UiComponent> {
        self.modals.get_mut(id)
    }

    /// The overlay stack, bottom first.
    pub fn modals(&self) -> &Container {
        &self.modals
    }

    #[inline]
    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    /// Whether the backdrop is at its full alpha.
    #[inline]
    pub fn is_masking(&self) -> bool {
        self.backdrop.is_masking()
    }

    /// Whether the host should raise the overlay layer above its siblings.
    #[inline]
    pub fn bring_to_front(&self) -> bool {
        self.config.bring_to_front
    }

    #[inline]
    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    /// Run `f` on the `T` behavior of modal `id`, then apply the navigation
    /// requests it queued.
    pub fn interact<T: Behavior, R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut T, &mut Requests) -> R,
    ) -> Result<R> {
        let behavior = self
            .modals
            .get_mut(id)
            .and_then(UiComponent::behavior_mut::<T>)
            .ok_or(UiError::UnknownComponent(id))?;
        let mut requests = Requests::new(id);
        let result = f(behavior, &mut requests);
        self.apply(requests);
        Ok(result)
    }

    /// Apply navigation requests raised by a modal.
    ///
    /// `Close` from the active modal steps back to the previous one; from
    /// any other modal it destroys that modal only.
    pub fn apply(&mut self, mut requests: Requests) {
        let source = requests.source();
        for request in requests.drain() {
            tracing::trace!(%source, ?request, "modal request");
            match request {
                NavRequest::Close if self.active_modal() == Some(source) => {
                    self.previous_modal();
                }
                NavRequest::Close => self.close_modal(source, true),
                NavRequest::Previous => {
                    self.previous_modal();
                }
                NavRequest::Next => {
                    tracing::trace!(%source, "modals have no next step");
                }
            }
        }
    }

    /// Advance the backdrop fade, tick every modal, reap destroyed ones.
    pub fn update(&mut self, dt: Duration) {
        self.backdrop.tick(dt);
        self.modals.update(dt);
        self.modals.reap();
    }

    fn adopt(&mut self, component: UiComponent) -> ComponentId {
        let id = self.modals.attach(component);
        if let Some(modal) = self.modals.get_mut(id) {
            modal.deactivate();
            let closed = Rc::clone(&self.closed);
            modal.on_hidden(move |modal| {
                let listeners = closed.borrow().clone();
                for listener in listeners {
                    listener(modal);
                }
            });
        }
        id
    }
}

impl std::fmt::Debug for ModalManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalManager")
            .field("config", &self.config)
            .field("modals", &self.modals.len())
            .field("backdrop", &self.backdrop)
            .field("closed_listeners", &self.closed.borrow().len())
            .finish()
    }
}
