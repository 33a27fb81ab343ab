#![forbid(unsafe_code)]

//! Reusable collaborators built on the uistack lifecycle.
//!
//! - [`Tilable`] / [`TileView`]: display contract for tile-shaped items
//! - [`Palette`]: single or multiple selection over tiles
//! - [`PanelSwitcher`]: shows exactly one of several panel components
//!
//! Each of them is a [`Behavior`](uistack_core::Behavior), so it can be
//! wrapped in a [`UiComponent`](uistack_core::UiComponent) and managed
//! like any menu or modal.

pub mod palette;
pub mod switcher;
pub mod tile;

pub use palette::{
    Palette, PaletteTile, SelectListener, SelectOutcome, SelectionMode, TileId,
};
pub use switcher::PanelSwitcher;
pub use tile::{Rgba, Tilable, TileItem, TileView};
