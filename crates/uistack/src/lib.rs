#![forbid(unsafe_code)]

//! uistack: show/hide lifecycle, menu and modal navigation, and widgets.
//!
//! This facade re-exports the workspace crates:
//! - [`uistack_core`]: components, animation bridge, context, pools
//! - [`uistack_nav`]: menu and modal managers, popup
//! - [`uistack_widgets`] (feature `widgets`): tiles, palette, panel switcher
//!
//! Most applications only need the [`prelude`].
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use std::time::Duration;
//! use uistack::prelude::*;
//!
//! #[derive(Default)]
//! struct Title;
//!
//! impl Behavior for Title {
//!     fn build(&mut self) {}
//!     fn clear(&mut self) {}
//! }
//!
//! let pool = PrototypePool::new()
//!     .with("menus", Prototype::new("Title", Title::default))
//!     .with("modals", Popup::prototype());
//! let mut ctx = UiContext::new();
//! install_navigation(&mut ctx, Rc::new(pool), &NavConfig::default()).unwrap();
//!
//! let menus = ctx.active_mut::<MenuManager>().unwrap();
//! let title = menus.open_menu::<Title>(None).unwrap();
//! menus.update(Duration::from_millis(16));
//! assert_eq!(menus.active_menu(), Some(title));
//! ```

pub use uistack_core;
pub use uistack_nav;
#[cfg(feature = "widgets")]
pub use uistack_widgets;

pub use uistack_core::{
    AnimationEngine, Behavior, ComponentId, Container, FrameClock, HidePolicy, NavRequest,
    Parameterized, Phase, Prototype, PrototypePool, Requests, ResourcePool, Result, UiComponent,
    UiContext, UiError,
};
pub use uistack_nav::{
    Backdrop, ConfigError, MenuConfig, MenuManager, ModalConfig, ModalManager, NavConfig, Popup,
    PopupAction, PopupActions, PopupSettings, install_navigation,
};

pub mod prelude {
    //! Glob-importable set of the commonly used types.

    pub use uistack_core::{
        Behavior, ComponentId, FrameClock, HidePolicy, Parameterized, Prototype, PrototypePool,
        Requests, UiComponent, UiContext, UiError,
    };
    pub use uistack_nav::{
        MenuManager, ModalManager, NavConfig, Popup, PopupAction, PopupActions, PopupSettings,
        install_navigation,
    };
    #[cfg(feature = "widgets")]
    pub use uistack_widgets::{Palette, PanelSwitcher, SelectionMode, Tilable, TileView};
}
