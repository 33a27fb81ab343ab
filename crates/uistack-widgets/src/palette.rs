#![forbid(unsafe_code)]

//! Palette: a set of selectable tiles.
//!
//! # Selection modes
//!
//! | Mode | Click on unselected tile | Click on selected tile |
//! |------|--------------------------|------------------------|
//! | `Single { allow_deselect }` | becomes the only selection, listener fires | deselected if `allow_deselect`, else nothing |
//! | `Multiple` | added to the selection, listener fires | removed from the selection |
//!
//! The listener receives the palette after the change so it can read
//! [`Palette::selected`]. Removing a tile also drops it from the selection.

use std::rc::Rc;

use uistack_core::Behavior;

use crate::tile::{TileItem, TileView};

/// Identifier of a tile within one palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u64);

/// How clicks change the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Single { allow_deselect: bool },
    Multiple,
}

impl Default for SelectionMode {
    fn default() -> Self {
        Self::Single {
            allow_deselect: true,
        }
    }
}

/// Result of [`Palette::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    Deselected,
    Unchanged,
}

/// Called after a tile becomes selected.
pub type SelectListener = Rc<dyn Fn(&Palette)>;

/// A tile of a palette with its selection flag.
#[derive(Debug)]
pub struct PaletteTile {
    id: TileId,
    view: TileView,
    selected: bool,
}

impl PaletteTile {
    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn view(&self) -> &TileView {
        &self.view
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

/// Palette behavior. `build` instantiates one tile per default item;
/// `clear` drops every tile and the selection.
#[derive(Default)]
pub struct Palette {
    mode: SelectionMode,
    defaults: Vec<TileItem>,
    tiles: Vec<PaletteTile>,
    selection: Vec<TileId>,
    next_id: u64,
    forward_clicks: bool,
    listener: Option<SelectListener>,
}

impl Palette {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Items instantiated by every build.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = TileItem>) -> Self {
        self.defaults.extend(items);
        self
    }

    /// Also call [`Tilable::on_tile_click`](crate::Tilable::on_tile_click)
    /// when a tile is selected.
    #[must_use]
    pub fn with_click_forwarding(mut self, forward: bool) -> Self {
        self.forward_clicks = forward;
        self
    }

    #[must_use]
    pub fn on_select(mut self, listener: impl Fn(&Palette) + 'static) -> Self {
        self.listener = Some(Rc::new(listener));
        self
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn add_item(&mut self, item: TileItem) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        let mut view = TileView::new();
        view.set_item(Some(item), self.forward_clicks);
        self.tiles.push(PaletteTile {
            id,
            view,
            selected: false,
        });
        id
    }

    pub fn add_items(&mut self, items: impl IntoIterator<Item = TileItem>) -> Vec<TileId> {
        items.into_iter().map(|item| self.add_item(item)).collect()
    }

    /// Remove the first tile showing `item`. Returns whether one was found.
    pub fn remove_item(&mut self, item: &TileItem) -> bool {
        let Some(index) = self.tiles.iter().position(|t| t.view.shows(item)) else {
            return false;
        };
        let tile = self.tiles.remove(index);
        self.selection.retain(|&id| id != tile.id);
        true
    }

    /// Remove every tile showing one of `items`.
    pub fn remove_items(&mut self, items: &[TileItem]) -> usize {
        let before = self.tiles.len();
        let mut removed = Vec::new();
        self.tiles.retain(|tile| {
            let keep = !items.iter().any(|item| tile.view.shows(item));
            if !keep {
                removed.push(tile.id);
            }
            keep
        });
        self.selection.retain(|id| !removed.contains(id));
        before - self.tiles.len()
    }

    /// Items currently displayed, in tile order.
    pub fn items(&self) -> Vec<TileItem> {
        self.tiles
            .iter()
            .filter_map(|tile| tile.view.item().cloned())
            .collect()
    }

    pub fn tiles(&self) -> &[PaletteTile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&PaletteTile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    /// Selected tiles, in selection order.
    pub fn selected(&self) -> &[TileId] {
        &self.selection
    }

    pub fn selected_items(&self) -> Vec<TileItem> {
        self.selection
            .iter()
            .filter_map(|&id| self.tile(id))
            .filter_map(|tile| tile.view.item().cloned())
            .collect()
    }

    /// Click on tile `id`.
    pub fn select(&mut self, id: TileId) -> SelectOutcome {
        let Some(index) = self.tiles.iter().position(|tile| tile.id == id) else {
            tracing::trace!(?id, "select on unknown tile ignored");
            return SelectOutcome::Unchanged;
        };
        if self.forward_clicks {
            self.tiles[index].view.click();
        }

        let outcome = match (self.mode, self.tiles[index].selected) {
            (SelectionMode::Single { .. }, false) => {
                for tile in &mut self.tiles {
                    tile.selected = tile.id == id;
                }
                self.selection = vec![id];
                SelectOutcome::Selected
            }
            (SelectionMode::Single { allow_deselect }, true) => {
                if allow_deselect {
                    self.tiles[index].selected = false;
                    self.selection.clear();
                    SelectOutcome::Deselected
                } else {
                    SelectOutcome::Unchanged
                }
            }
            (SelectionMode::Multiple, false) => {
                self.tiles[index].selected = true;
                self.selection.push(id);
                SelectOutcome::Selected
            }
            (SelectionMode::Multiple, true) => {
                self.tiles[index].selected = false;
                self.selection.retain(|&other| other != id);
                SelectOutcome::Deselected
            }
        };

        if outcome == SelectOutcome::Selected {
            if let Some(listener) = self.listener.clone() {
                listener(self);
            }
        }
        outcome
    }
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Palette")
            .field("mode", &self.mode)
            .field("defaults", &self.defaults.len())
            .field("tiles", &self.tiles)
            .field("selection", &self.selection)
            .field("forward_clicks", &self.forward_clicks)
            .finish()
    }
}

impl Behavior for Palette {
    fn build(&mut self) {
        let defaults = self.defaults.clone();
        self.add_items(defaults);
    }

    fn clear(&mut self) {
        self.selection.clear();
        self.tiles.clear();
    }
}
