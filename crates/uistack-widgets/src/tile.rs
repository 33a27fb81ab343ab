#![forbid(unsafe_code)]

//! Tile display contract and the view that renders one tilable item.

use std::rc::Rc;

use uistack_core::{Behavior, Parameterized};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Anything that can be displayed as a tile.
///
/// Only the title is mandatory; the other accessors default to "nothing".
pub trait Tilable {
    fn tile_title(&self) -> &str;

    fn tile_color(&self) -> Rgba {
        Rgba::WHITE
    }

    /// Icon resource key, if any.
    fn tile_icon(&self) -> Option<&str> {
        None
    }

    fn tile_text(&self) -> Option<&str> {
        None
    }

    /// Invoked when a wired tile is clicked.
    fn on_tile_click(&self) {}
}

/// Shared handle on a tilable item. Identity is pointer identity.
pub type TileItem = Rc<dyn Tilable>;

/// Display state of a single tile.
///
/// [`TileView::set_item`] copies the item's presentation into the view;
/// without an item every field is reset (white color, hidden icon).
#[derive(Default)]
pub struct TileView {
    item: Option<TileItem>,
    icon: Option<String>,
    title: String,
    text: String,
    color: Rgba,
    click_wired: bool,
}

impl TileView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `item`, refresh the display, and optionally wire its click.
    pub fn set_item(&mut self, item: Option<TileItem>, wire_click: bool) {
        self.item = item;
        self.refresh(wire_click);
    }

    /// Re-read the bound item's presentation.
    pub fn refresh(&mut self, wire_click: bool) {
        match &self.item {
            Some(item) => {
                self.icon = item.tile_icon().map(str::to_owned);
                self.title = item.tile_title().to_owned();
                self.text = item.tile_text().unwrap_or_default().to_owned();
                self.color = item.tile_color();
                self.click_wired |= wire_click;
            }
            None => {
                self.icon = None;
                self.title.clear();
                self.text.clear();
                self.color = Rgba::WHITE;
                self.click_wired = false;
            }
        }
    }

    pub fn item(&self) -> Option<&TileItem> {
        self.item.as_ref()
    }

    /// Whether the view shows `item` (pointer identity).
    pub fn shows(&self, item: &TileItem) -> bool {
        self.item.as_ref().is_some_and(|own| Rc::ptr_eq(own, item))
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// The icon is displayed only when the item provides one.
    pub fn icon_visible(&self) -> bool {
        self.icon.is_some()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn is_click_wired(&self) -> bool {
        self.click_wired
    }

    /// Forward a click to the item when wired. Returns whether it was.
    pub fn click(&self) -> bool {
        match (&self.item, self.click_wired) {
            (Some(item), true) => {
                item.on_tile_click();
                true
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for TileView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileView")
            .field("has_item", &self.item.is_some())
            .field("icon", &self.icon)
            .field("title", &self.title)
            .field("text", &self.text)
            .field("color", &self.color)
            .field("click_wired", &self.click_wired)
            .finish()
    }
}

impl Behavior for TileView {
    fn build(&mut self) {
        self.refresh(false);
    }

    fn clear(&mut self) {
        self.set_item(None, false);
    }
}

impl Parameterized for TileView {
    type Params = Option<TileItem>;

    fn set_params(&mut self, params: Option<TileItem>) {
        self.item = params;
    }
}
