#![forbid(unsafe_code)]

//! Navigation managers for uistack.
//!
//! This crate provides:
//! - [`MenuManager`] for a stack of full-screen menus with previous/next
//! - [`ModalManager`] for an overlay stack over a fading [`Backdrop`]
//! - [`Popup`], the built-in title/message/buttons modal
//!
//! Managers are installed in a [`UiContext`] with [`install_navigation`]
//! and reached through it by the rest of the application.

pub mod backdrop;
pub mod config;
pub mod menu;
pub mod modal;
pub mod popup;

pub use backdrop::{Backdrop, Fade};
pub use config::{
    ConfigError, MAX_TRANSITION_SECS, MIN_TRANSITION_SECS, MenuConfig, ModalConfig, NavConfig,
};
pub use menu::MenuManager;
pub use modal::ModalManager;
pub use popup::{
    ActionButton, Label, POPUP_PROTOTYPE, Popup, PopupAction, PopupActions, PopupCallback,
    PopupSettings,
};

use std::rc::Rc;

use uistack_core::{ResourcePool, Result, UiContext, UiError};

/// Install a [`MenuManager`] and a [`ModalManager`] sharing `pool`.
///
/// Fails with `AlreadyActive` if either manager is already installed; in
/// that case nothing is installed.
pub fn install_navigation(
    ctx: &mut UiContext,
    pool: Rc<dyn ResourcePool>,
    config: &NavConfig,
) -> Result<()> {
    if ctx.is_active::<MenuManager>() {
        return Err(UiError::AlreadyActive {
            type_name: std::any::type_name::<MenuManager>(),
        });
    }
    if ctx.is_active::<ModalManager>() {
        return Err(UiError::AlreadyActive {
            type_name: std::any::type_name::<ModalManager>(),
        });
    }
    ctx.install(MenuManager::new(Rc::clone(&pool), config.menus.clone()))?;
    ctx.install(ModalManager::new(pool, config.modals.clone()))?;
    tracing::debug!(
        menus = %config.menus.pool,
        modals = %config.modals.pool,
        "navigation installed"
    );
    Ok(())
}
