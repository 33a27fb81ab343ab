#![forbid(unsafe_code)]

//! Panel switcher: a tab-like owner of panels, exactly one visible.
//!
//! # Invariants
//!
//! 1. After [`PanelSwitcher::switch_to`] returns, the target panel is the
//!    only panel whose last requested transition is a show.
//! 2. The header title always names [`PanelSwitcher::current`], or is
//!    empty when no panel is current.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Unknown panel id | `UnknownComponent`, nothing changes |
//! | Default index out of range | Clamped to the last panel, warned |
//! | No panels at build | Build does nothing |

use std::time::Duration;

use uistack_core::{Behavior, ComponentId, Container, Result, UiComponent, UiError};

#[derive(Debug, Clone)]
struct PanelEntry {
    id: ComponentId,
    title: String,
}

/// Switcher behavior. `build` opens the default panel; `clear` hides the
/// current one and empties the header.
#[derive(Debug)]
pub struct PanelSwitcher {
    panels: Container,
    entries: Vec<PanelEntry>,
    current: Option<ComponentId>,
    title: String,
    open_default: bool,
    default_index: usize,
}

impl Default for PanelSwitcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelSwitcher {
    pub fn new() -> Self {
        Self {
            panels: Container::new(),
            entries: Vec::new(),
            current: None,
            title: String::new(),
            open_default: true,
            default_index: 0,
        }
    }

    /// Whether `build` opens the default panel.
    #[must_use]
    pub fn with_open_default(mut self, open: bool) -> Self {
        self.open_default = open;
        self
    }

    #[must_use]
    pub fn with_default_index(mut self, index: usize) -> Self {
        self.default_index = index;
        self
    }

    /// Add `panel` under `title`. The panel starts hidden.
    pub fn add_panel(&mut self, title: impl Into<String>, panel: UiComponent) -> ComponentId {
        let id = self.panels.attach(panel);
        if let Some(panel) = self.panels.get_mut(id) {
            panel.deactivate();
        }
        self.entries.push(PanelEntry {
            id,
            title: title.into(),
        });
        id
    }

    /// Builder form of [`PanelSwitcher::add_panel`].
    #[must_use]
    pub fn with_panel(mut self, title: impl Into<String>, panel: UiComponent) -> Self {
        self.add_panel(title, panel);
        self
    }

    /// Show `id` and hide every other panel.
    pub fn switch_to(&mut self, id: ComponentId) -> Result<()> {
        let Some(entry) = self.entries.iter().find(|entry| entry.id == id) else {
            return Err(UiError::UnknownComponent(id));
        };
        self.title.clone_from(&entry.title);

        for panel in self.panels.iter_mut() {
            if panel.id() != id && panel.is_shown() {
                panel.hide(false);
            }
        }
        if let Some(panel) = self.panels.get_mut(id) {
            panel.show(false);
        }
        self.current = Some(id);
        tracing::debug!(panel = %id, title = %self.title, "panel switched");
        Ok(())
    }

    /// Show the panel at `index` in insertion order.
    pub fn switch_to_index(&mut self, index: usize) -> Result<ComponentId> {
        let id = self
            .entries
            .get(index)
            .map(|entry| entry.id)
            .ok_or_else(|| UiError::NotFound {
                kind: "panel",
                pool: "switcher".into(),
                name: Some(index.to_string()),
            })?;
        self.switch_to(id)?;
        Ok(id)
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.current
    }

    /// Header text: the current panel's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Panel ids in insertion order.
    pub fn panel_ids(&self) -> Vec<ComponentId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    pub fn panel_title(&self, id: ComponentId) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.title.as_str())
    }

    pub fn panel(&self, id: ComponentId) -> Option<&UiComponent> {
        self.panels.get(id)
    }

    pub fn panel_mut(&mut self, id: ComponentId) -> Option<&mut UiComponent> {
        self.panels.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance panel transitions.
    pub fn update(&mut self, dt: Duration) {
        self.panels.update(dt);
    }

    fn open_default_panel(&mut self) {
        let last = self.entries.len() - 1;
        if self.default_index > last {
            tracing::warn!(
                index = self.default_index,
                panels = self.entries.len(),
                "default panel index out of range, clamped"
            );
        }
        let id = self.entries[self.default_index.min(last)].id;
        if let Err(err) = self.switch_to(id) {
            tracing::warn!(%err, "default panel could not be opened");
        }
    }
}

impl Behavior for PanelSwitcher {
    fn build(&mut self) {
        if self.open_default && !self.entries.is_empty() {
            self.open_default_panel();
        }
    }

    fn clear(&mut self) {
        for panel in self.panels.iter_mut() {
            if panel.is_shown() {
                panel.hide(true);
            }
        }
        self.current = None;
        self.title.clear();
    }
}
