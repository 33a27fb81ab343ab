#![forbid(unsafe_code)]

//! Built-in popup modal: a title, a message, and up to three action buttons.
//!
//! A popup is an ordinary modal whose behavior is [`Popup`]; it is opened
//! with [`PopupSettings`] through [`Popup::open`] or any of the
//! `ModalManager::open_modal_with` entry points, and its prototype must be
//! registered in the modal pool (see [`Popup::prototype`]).
//!
//! # Build rules
//!
//! - Title and message labels are visible iff their text is non-empty.
//! - With a callback, each action button is visible and wired iff its flag
//!   is set in [`PopupSettings::actions`]; a label override replaces the
//!   default caption.
//! - Without a callback every button stays hidden.
//!
//! Clicking a wired button invokes `callback(popup, action)` and then asks
//! the modal manager to close the popup.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use uistack_core::{PrototypePool, UiContext};
//! use uistack_nav::{ModalConfig, ModalManager, Popup, PopupActions, PopupSettings};
//!
//! let pool = PrototypePool::new().with("modals", Popup::prototype());
//! let mut ctx = UiContext::new();
//! ctx.install(ModalManager::new(Rc::new(pool), ModalConfig::default())).unwrap();
//!
//! let settings = PopupSettings::new()
//!     .title("Quit?")
//!     .actions(PopupActions::VALIDATE | PopupActions::CANCEL)
//!     .on_action(|_, action| println!("picked {action:?}"));
//! let id = Popup::open(&mut ctx, settings).unwrap();
//!
//! let modals = ctx.active::<ModalManager>().unwrap();
//! let popup = modals.modal(id).and_then(|m| m.behavior::<Popup>()).unwrap();
//! assert!(popup.title().visible);
//! assert!(!popup.button(uistack_nav::PopupAction::Deny).visible);
//! ```

use std::rc::Rc;

use bitflags::bitflags;
use uistack_core::{
    Behavior, ComponentId, HidePolicy, Parameterized, Prototype, Requests, Result, UiContext,
};

use crate::modal::ModalManager;

/// Prototype name under which [`Popup::prototype`] registers.
pub const POPUP_PROTOTYPE: &str = "Popup";

bitflags! {
    /// Set of actions a popup offers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PopupActions: u8 {
        const VALIDATE = 1 << 0;
        const DENY = 1 << 1;
        const CANCEL = 1 << 2;
    }
}

impl Default for PopupActions {
    fn default() -> Self {
        Self::all()
    }
}

/// One popup action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupAction {
    Validate,
    Deny,
    Cancel,
}

impl PopupAction {
    pub const ALL: [Self; 3] = [Self::Validate, Self::Deny, Self::Cancel];

    /// Flag enabling this action.
    pub const fn flag(self) -> PopupActions {
        match self {
            Self::Validate => PopupActions::VALIDATE,
            Self::Deny => PopupActions::DENY,
            Self::Cancel => PopupActions::CANCEL,
        }
    }

    /// Caption used when no override is given.
    pub const fn default_label(self) -> &'static str {
        match self {
            Self::Validate => "Validate",
            Self::Deny => "Deny",
            Self::Cancel => "Cancel",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Validate => 0,
            Self::Deny => 1,
            Self::Cancel => 2,
        }
    }
}

/// Completion callback of a popup.
pub type PopupCallback = Rc<dyn Fn(&Popup, PopupAction)>;

/// Parameters of a [`Popup`].
#[derive(Clone, Default)]
pub struct PopupSettings {
    pub title: Option<String>,
    pub message: Option<String>,
    pub validate_text: Option<String>,
    pub deny_text: Option<String>,
    pub cancel_text: Option<String>,
    pub actions: PopupActions,
    pub callback: Option<PopupCallback>,
}

impl PopupSettings {
    /// Settings offering every action, without texts or callback.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Override the caption of one action button.
    #[must_use]
    pub fn label(mut self, action: PopupAction, text: impl Into<String>) -> Self {
        let text = Some(text.into());
        match action {
            PopupAction::Validate => self.validate_text = text,
            PopupAction::Deny => self.deny_text = text,
            PopupAction::Cancel => self.cancel_text = text,
        }
        self
    }

    #[must_use]
    pub fn actions(mut self, actions: PopupActions) -> Self {
        self.actions = actions;
        self
    }

    #[must_use]
    pub fn on_action(mut self, callback: impl Fn(&Popup, PopupAction) + 'static) -> Self {
        self.callback = Some(Rc::new(callback));
        self
    }

    fn label_override(&self, action: PopupAction) -> Option<&str> {
        match action {
            PopupAction::Validate => self.validate_text.as_deref(),
            PopupAction::Deny => self.deny_text.as_deref(),
            PopupAction::Cancel => self.cancel_text.as_deref(),
        }
        .filter(|text| !text.is_empty())
    }
}

impl std::fmt::Debug for PopupSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopupSettings")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("validate_text", &self.validate_text)
            .field("deny_text", &self.deny_text)
            .field("cancel_text", &self.cancel_text)
            .field("actions", &self.actions)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// A text element of the popup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub visible: bool,
}

/// An action button of the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub label: String,
    pub visible: bool,
    /// Whether clicking reaches the callback.
    pub wired: bool,
}

impl ActionButton {
    fn new(action: PopupAction) -> Self {
        Self {
            label: action.default_label().to_owned(),
            visible: false,
            wired: false,
        }
    }
}

/// Popup behavior.
#[derive(Debug)]
pub struct Popup {
    settings: PopupSettings,
    title: Label,
    message: Label,
    buttons: [ActionButton; 3],
}

impl Default for Popup {
    fn default() -> Self {
        Self {
            settings: PopupSettings::default(),
            title: Label::default(),
            message: Label::default(),
            buttons: PopupAction::ALL.map(ActionButton::new),
        }
    }
}

impl Popup {
    /// Pool prototype for popups, destroyed once hidden.
    pub fn prototype() -> Prototype {
        Prototype::new(POPUP_PROTOTYPE, Popup::default)
            .configure(|component| component.with_hide_policy(HidePolicy::Destroy))
    }

    /// Open a popup through the context's modal manager.
    ///
    /// Fails with `PreconditionMissing` when no `ModalManager` is installed.
    pub fn open(ctx: &mut UiContext, settings: PopupSettings) -> Result<ComponentId> {
        let modals = ctx.active_mut::<ModalManager>()?;
        modals.open_modal_with::<Popup>(settings, None, true)
    }

    /// Press the button of `action`.
    ///
    /// Returns `false` (and does nothing) when the button is not wired.
    pub fn click(&mut self, action: PopupAction, requests: &mut Requests) -> bool {
        if !self.buttons[action.index()].wired {
            tracing::trace!(?action, "click on unwired popup button ignored");
            return false;
        }
        if let Some(callback) = self.settings.callback.clone() {
            callback(self, action);
        }
        requests.close();
        true
    }

    pub fn settings(&self) -> &PopupSettings {
        &self.settings
    }

    pub fn title(&self) -> &Label {
        &self.title
    }

    pub fn message(&self) -> &Label {
        &self.message
    }

    pub fn button(&self, action: PopupAction) -> &ActionButton {
        &self.buttons[action.index()]
    }
}

fn fill(label: &mut Label, text: Option<&str>) {
    match text.filter(|text| !text.is_empty()) {
        Some(text) => {
            label.text = text.to_owned();
            label.visible = true;
        }
        None => label.visible = false,
    }
}

impl Behavior for Popup {
    fn build(&mut self) {
        fill(&mut self.title, self.settings.title.as_deref());
        fill(&mut self.message, self.settings.message.as_deref());

        let wired = self.settings.callback.is_some();
        for action in PopupAction::ALL {
            let enabled = wired && self.settings.actions.contains(action.flag());
            let label = self
                .settings
                .label_override(action)
                .unwrap_or(action.default_label())
                .to_owned();
            let button = &mut self.buttons[action.index()];
            button.visible = enabled;
            button.wired = enabled;
            button.label = label;
        }
    }

    fn clear(&mut self) {
        for button in &mut self.buttons {
            button.wired = false;
        }
    }
}

impl Parameterized for Popup {
    type Params = PopupSettings;

    fn set_params(&mut self, params: PopupSettings) {
        self.settings = params;
    }
}
