//! Application-level flows through the facade.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use uistack::prelude::*;

const FRAME: Duration = Duration::from_millis(16);

#[derive(Default)]
struct Credits;

impl Behavior for Credits {
    fn build(&mut self) {}
    fn clear(&mut self) {}
}

#[derive(Default)]
struct Blank;

impl Behavior for Blank {
    fn build(&mut self) {}
    fn clear(&mut self) {}
}

#[cfg(feature = "widgets")]
fn options_menu() -> PanelSwitcher {
    PanelSwitcher::new()
        .with_panel("Audio", UiComponent::new("Audio", Blank))
        .with_panel("Video", UiComponent::new("Video", Blank))
}

fn pool() -> PrototypePool {
    let pool = PrototypePool::new()
        .with("menus", Prototype::new("Credits", Credits::default))
        .with("modals", Popup::prototype());
    #[cfg(feature = "widgets")]
    let pool = pool.with("menus", Prototype::new("Options", options_menu));
    pool
}

#[test]
fn popup_over_menu_round_trip() {
    let mut ctx = UiContext::new();
    install_navigation(&mut ctx, Rc::new(pool()), &NavConfig::default()).unwrap();

    let credits = ctx
        .active_mut::<MenuManager>()
        .unwrap()
        .open_menu::<Credits>(None)
        .unwrap();
    let popup = Popup::open(
        &mut ctx,
        PopupSettings::new()
            .message("Leave the credits?")
            .actions(PopupActions::VALIDATE | PopupActions::DENY)
            .on_action(|_, _| {}),
    )
    .unwrap();

    let modals = ctx.active_mut::<ModalManager>().unwrap();
    let closed = Rc::new(Cell::new(0));
    let seen = Rc::clone(&closed);
    modals.on_modal_closed(move |modal| {
        assert!(modal.is::<Popup>());
        seen.set(seen.get() + 1);
    });
    modals
        .interact::<Popup, _>(popup, |popup, requests| {
            popup.click(PopupAction::Deny, requests)
        })
        .unwrap();
    assert_eq!(closed.get(), 1);
    for _ in 0..40 {
        modals.update(FRAME);
    }
    assert_eq!(closed.get(), 1);
    assert!(modals.modals().is_empty());
    assert!(!modals.backdrop().is_enabled());

    let menus = ctx.active::<MenuManager>().unwrap();
    assert_eq!(menus.active_menu(), Some(credits));
}

#[test]
fn blank_component_is_usable_outside_managers() {
    let mut blank = UiComponent::new("blank", Blank).with_hide_policy(HidePolicy::Destroy);
    blank.show(false);
    blank.hide(false);
    assert!(blank.is_destroyed());
}

#[cfg(feature = "widgets")]
#[test]
fn options_menu_keeps_selected_panel_across_navigation() {
    let mut ctx = UiContext::new();
    install_navigation(&mut ctx, Rc::new(pool()), &NavConfig::default()).unwrap();
    let menus = ctx.active_mut::<MenuManager>().unwrap();

    let options = menus.open_menu::<PanelSwitcher>(None).unwrap();
    let video = menus
        .interact::<PanelSwitcher, _>(options, |switcher, _| {
            assert_eq!(switcher.title(), "Audio");
            switcher.switch_to_index(1)
        })
        .unwrap()
        .unwrap();

    menus.open_menu::<Credits>(None).unwrap();
    assert_eq!(menus.previous_menu(), Some(options));

    let switcher = menus
        .menu(options)
        .and_then(|menu| menu.behavior::<PanelSwitcher>())
        .unwrap();
    assert_eq!(switcher.current(), Some(video));
    assert_eq!(switcher.title(), "Video");
}

#[cfg(all(feature = "widgets", feature = "policy-config"))]
#[test]
fn toml_config_drives_start_menu_and_backdrop() {
    let config = NavConfig::from_toml_str(
        r#"
        [menus]
        default_menu = "Options"

        [modals]
        backdrop_alpha = 1.5
        transition_secs = 0.5
        "#,
    )
    .unwrap();
    assert_eq!(config.modals.backdrop_alpha, 1.0);

    let mut ctx = UiContext::new();
    install_navigation(&mut ctx, Rc::new(pool()), &config).unwrap();

    let menus = ctx.active_mut::<MenuManager>().unwrap();
    let started = menus.start().unwrap().unwrap();
    assert!(menus.menu(started).unwrap().is::<PanelSwitcher>());

    let modals = ctx.active::<ModalManager>().unwrap();
    assert_eq!(modals.backdrop().target(), 1.0);
    assert_eq!(modals.backdrop().transition(), Duration::from_millis(500));
}
