use std::fs;
use std::path::PathBuf;

use image::RgbaImage;

use jmenu::assets::AssetCache;
use jmenu::config::{ConfigStore, Resolution};
use jmenu::error::ValidationError;
use jmenu::input::{InputEvent, KeyCode};
use jmenu::menu::{BackgroundAnimation, Effect, Layout, MenuController, Screen};
use jmenu::paths::Paths;
use jmenu::saves::SaveBook;
use jmenu::ui::{Action, ButtonId, ToggleSetting};
use jmenu::window::WindowConfig;

fn temp_root(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("jmenu_menu_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// A controller over an empty asset tree, so every layout uses fallback sizes.
fn controller(name: &str) -> (MenuController, Paths) {
    let paths = Paths::new(temp_root(name));
    paths.ensure_dirs().unwrap();
    let c = MenuController::new(
        ConfigStore::open(paths.config_file()),
        SaveBook::open(paths.saves_file()),
        AssetCache::new(&paths),
    );
    (c, paths)
}

/// Like `controller`, with three one-pixel background frames on disk.
fn animated_controller(name: &str) -> MenuController {
    let paths = Paths::new(temp_root(name));
    paths.ensure_dirs().unwrap();
    let frames = paths.assets_dir().join("backgrounds/menu");
    fs::create_dir_all(&frames).unwrap();
    for i in 1..=3 {
        RgbaImage::new(1, 1).save(frames.join(format!("frame_0{i}.png"))).unwrap();
    }
    MenuController::new(
        ConfigStore::open(paths.config_file()),
        SaveBook::open(paths.saves_file()),
        AssetCache::new(&paths),
    )
}

/// Press and release at one point; returns whichever half produced an action.
fn click(c: &mut MenuController, x: f32, y: f32) -> Option<Action> {
    let down = c.dispatch(&InputEvent::pointer_down(x, y));
    let up = c.dispatch(&InputEvent::pointer_up(x, y));
    down.or(up)
}

// Fallback geometry at 1080x768.
const MAIN_PLAY: (f32, f32) = (540.0, 320.0);
const MAIN_OPTIONS: (f32, f32) = (540.0, 405.0);
const MAIN_EXIT: (f32, f32) = (540.0, 575.0);
const VOLUME_BAR_LEFT: f32 = 540.0;
const VOLUME_BAR_Y: f32 = 244.0;
const FULLSCREEN_TOGGLE: (f32, f32) = (570.0, 324.0);
const ANIMATION_TOGGLE: (f32, f32) = (570.0, 404.0);
const DROPDOWN_HEADER: (f32, f32) = (650.0, 484.0);
const OPTIONS_BACK: (f32, f32) = (540.0, 590.0);
const SLOT0_PLAY: (f32, f32) = (780.0, 130.0);
const SLOT0_DELETE: (f32, f32) = (780.0, 195.0);
const PLAY_BACK: (f32, f32) = (540.0, 674.0);

// ── Screen transitions ───────────────────────────────────────────────────────

#[test]
fn starts_on_main_menu() {
    let (c, _) = controller("start");
    assert_eq!(c.screen(), Screen::Main);
    assert!(matches!(c.layout(), Layout::Main(_)));
    assert!(!c.is_finished());
}

#[test]
fn set_screen_rebuilds_the_layout() {
    let (mut c, _) = controller("set_screen");
    assert_eq!(c.set_screen(Screen::Options), Ok(()));
    assert_eq!(c.screen(), Screen::Options);
    assert!(matches!(c.layout(), Layout::Options(_)));
}

#[test]
fn unknown_raw_screen_is_rejected_without_change() {
    let (mut c, _) = controller("raw");
    assert_eq!(c.set_screen_raw(99), Err(ValidationError::UnknownScreen(99)));
    assert_eq!(c.screen(), Screen::Main);
    assert_eq!(c.set_screen_raw(3), Ok(()));
    assert_eq!(c.screen(), Screen::Options);
}

#[test]
fn none_screen_cannot_be_entered() {
    let (mut c, _) = controller("none");
    assert_eq!(c.set_screen(Screen::None), Err(ValidationError::UnenterableScreen));
    assert_eq!(c.set_screen_raw(0), Err(ValidationError::UnenterableScreen));
    assert_eq!(c.screen(), Screen::Main);
}

#[test]
fn entering_exit_queues_quit() {
    let (mut c, _) = controller("exit");
    c.set_screen(Screen::Exit).unwrap();
    assert!(c.is_finished());
    assert_eq!(c.take_effects(), vec![Effect::Quit]);
    assert!(c.take_effects().is_empty());
}

#[test]
fn quit_event_enters_exit_once() {
    let (mut c, _) = controller("quit_event");
    assert_eq!(c.dispatch(&InputEvent::Quit), None);
    assert_eq!(c.dispatch(&InputEvent::Quit), None);
    assert_eq!(c.screen(), Screen::Exit);
    assert_eq!(c.take_effects(), vec![Effect::Quit]);
}

#[test]
fn main_buttons_navigate() {
    let (mut c, _) = controller("navigate");
    assert_eq!(click(&mut c, MAIN_OPTIONS.0, MAIN_OPTIONS.1), Some(Action::Clicked(ButtonId::Options)));
    assert_eq!(c.screen(), Screen::Options);

    assert_eq!(click(&mut c, OPTIONS_BACK.0, OPTIONS_BACK.1), Some(Action::Clicked(ButtonId::Back)));
    assert_eq!(c.screen(), Screen::Main);

    click(&mut c, MAIN_EXIT.0, MAIN_EXIT.1);
    assert!(c.is_finished());
}

#[test]
fn release_outside_the_pressed_button_does_nothing() {
    let (mut c, _) = controller("drag_off");
    assert_eq!(c.dispatch(&InputEvent::pointer_down(MAIN_PLAY.0, MAIN_PLAY.1)), None);
    assert_eq!(c.dispatch(&InputEvent::pointer_up(MAIN_OPTIONS.0, MAIN_OPTIONS.1)), None);
    assert_eq!(c.screen(), Screen::Main);
}

// ── Options ──────────────────────────────────────────────────────────────────

#[test]
fn volume_bar_sets_and_persists_volume() {
    let (mut c, paths) = controller("volume");
    c.set_screen(Screen::Options).unwrap();

    let action = c.dispatch(&InputEvent::pointer_down(VOLUME_BAR_LEFT + 55.0, VOLUME_BAR_Y));
    assert_eq!(action, Some(Action::SetVolume(25)));
    assert_eq!(c.config().volume(), 25);
    assert_eq!(c.take_effects(), vec![Effect::VolumeChanged(25)]);
    assert_eq!(ConfigStore::load(&paths.config_file()).unwrap().volume(), Some(25));
}

#[test]
fn fullscreen_toggle_flips_and_recreates_surface() {
    let (mut c, paths) = controller("fullscreen");
    c.set_screen(Screen::Options).unwrap();

    let action = click(&mut c, FULLSCREEN_TOGGLE.0, FULLSCREEN_TOGGLE.1);
    assert_eq!(action, Some(Action::Toggle(ToggleSetting::Fullscreen)));
    assert!(c.config().fullscreen());
    assert_eq!(c.take_effects(), vec![Effect::RecreateSurface(WindowConfig::new(c.resolution(), true))]);
    assert_eq!(ConfigStore::load(&paths.config_file()).unwrap().fullscreen(), Some(true));
}

#[test]
fn animation_toggle_stops_the_background() {
    let (mut c, _) = controller("animation");
    c.set_screen(Screen::Options).unwrap();
    click(&mut c, ANIMATION_TOGGLE.0, ANIMATION_TOGGLE.1);
    assert!(!c.config().animated_background());
    assert!(c.take_effects().is_empty());
}

#[test]
fn dropdown_selection_sets_resolution_once() {
    let (mut c, paths) = controller("dropdown");
    c.set_screen(Screen::Options).unwrap();

    assert_eq!(c.dispatch(&InputEvent::pointer_down(DROPDOWN_HEADER.0, DROPDOWN_HEADER.1)), Some(Action::DropdownOpened));
    let Layout::Options(options) = c.layout() else { panic!("not on options") };
    let (choice, rect) = options.resolution.options()[1];
    assert_eq!(choice, Resolution::new(1280, 720).unwrap());

    let center = rect.center();
    assert_eq!(c.dispatch(&InputEvent::pointer_down(center.x, center.y)), Some(Action::SelectResolution(choice)));
    assert_eq!(c.dispatch(&InputEvent::pointer_up(center.x, center.y)), None);

    assert_eq!(c.resolution(), choice);
    assert_eq!(c.take_effects(), vec![Effect::RecreateSurface(WindowConfig::new(choice, false))]);
    assert_eq!(ConfigStore::load(&paths.config_file()).unwrap().resolution(), Some(choice));
    assert_eq!(c.screen(), Screen::Options);
}

#[test]
fn open_dropdown_swallows_clicks_elsewhere() {
    let (mut c, _) = controller("dropdown_close");
    c.set_screen(Screen::Options).unwrap();
    c.dispatch(&InputEvent::pointer_down(DROPDOWN_HEADER.0, DROPDOWN_HEADER.1));

    // The volume bar sits under the click, but the open list takes it.
    let action = c.dispatch(&InputEvent::pointer_down(VOLUME_BAR_LEFT + 10.0, VOLUME_BAR_Y));
    assert_eq!(action, Some(Action::DropdownClosed));
    assert_eq!(c.config().volume(), 100);
    assert!(c.take_effects().is_empty());
}

#[test]
fn reentering_options_closes_the_dropdown() {
    let (mut c, _) = controller("dropdown_reenter");
    c.set_screen(Screen::Options).unwrap();
    c.dispatch(&InputEvent::pointer_down(DROPDOWN_HEADER.0, DROPDOWN_HEADER.1));
    let Layout::Options(options) = c.layout() else { panic!("not on options") };
    assert!(options.resolution.is_open());

    c.set_screen(Screen::Main).unwrap();
    c.set_screen(Screen::Options).unwrap();
    let Layout::Options(options) = c.layout() else { panic!("not on options") };
    assert!(!options.resolution.is_open());
    assert!(options.resolution.options().is_empty());

    // The volume bar answers again instead of the list.
    let action = c.dispatch(&InputEvent::pointer_down(VOLUME_BAR_LEFT + 55.0, VOLUME_BAR_Y));
    assert_eq!(action, Some(Action::SetVolume(25)));
}

// ── Background ───────────────────────────────────────────────────────────────

#[test]
fn background_advances_after_interval() {
    let mut bg = BackgroundAnimation::new(vec!["a".into(), "b".into(), "c".into()]);
    bg.tick(150);
    assert_eq!(bg.index(), 0);
    bg.tick(1);
    assert_eq!(bg.index(), 1);
    bg.tick(151);
    bg.tick(151);
    assert_eq!(bg.current(), Some("a"));
}

#[test]
fn empty_background_never_moves() {
    let mut bg = BackgroundAnimation::default();
    bg.tick(1000);
    assert_eq!(bg.current(), None);
}

#[test]
fn tick_is_frozen_while_animation_is_off() {
    let mut c = animated_controller("frozen");
    assert_eq!(c.background().frames().len(), 3);
    c.tick(151);
    assert_eq!(c.background().index(), 1);

    c.set_screen(Screen::Options).unwrap();
    click(&mut c, ANIMATION_TOGGLE.0, ANIMATION_TOGGLE.1);
    assert!(!c.config().animated_background());
    c.tick(500);
    c.tick(500);
    assert_eq!(c.background().index(), 1);
    assert!(c.render().image_keys().any(|k| k == "backgrounds/menu/frame_02"));

    click(&mut c, ANIMATION_TOGGLE.0, ANIMATION_TOGGLE.1);
    c.tick(151);
    assert_eq!(c.background().index(), 2);
}

#[test]
fn render_without_background_frames_fills_the_screen() {
    let (c, _) = controller("render");
    let list = c.render();
    assert!(!list.is_empty());
    assert!(list.image_keys().any(|k| k == "buttons/play_default"));
    assert!(list.texts().any(|t| t == "MAIN MENU"));
}

// ── Save slots ───────────────────────────────────────────────────────────────

#[test]
fn empty_slot_asks_for_a_name_and_saves_it() {
    let (mut c, paths) = controller("slot_name");
    click(&mut c, MAIN_PLAY.0, MAIN_PLAY.1);
    assert_eq!(c.screen(), Screen::Play);

    click(&mut c, SLOT0_PLAY.0, SLOT0_PLAY.1);
    let Layout::Play(panel) = c.layout() else { panic!("not on play") };
    assert!(panel.is_dialog_active());
    assert_eq!(panel.pending_slot(), Some(0));

    for ch in "Ada".chars() {
        c.dispatch(&InputEvent::typed(ch));
    }
    let action = c.dispatch(&InputEvent::key(KeyCode::Enter));
    assert_eq!(action, Some(Action::NameAccepted { slot: 0, name: "Ada".into() }));

    assert_eq!(c.saves().slot(0).and_then(|s| s.name.as_deref()), Some("Ada"));
    let Layout::Play(panel) = c.layout() else { panic!("not on play") };
    assert!(!panel.is_dialog_active());
    assert_eq!(panel.slot(0).and_then(|s| s.name.as_deref()), Some("Ada"));
    assert_eq!(SaveBook::load(&paths.saves_file()).unwrap()[0].name.as_deref(), Some("Ada"));
}

#[test]
fn occupied_slot_starts_the_game_and_delete_clears_it() {
    let (mut c, _) = controller("slot_start");
    c.set_screen(Screen::Play).unwrap();
    click(&mut c, SLOT0_PLAY.0, SLOT0_PLAY.1);
    for ch in "Bo".chars() {
        c.dispatch(&InputEvent::typed(ch));
    }
    c.dispatch(&InputEvent::key(KeyCode::Enter));
    c.take_effects();

    click(&mut c, SLOT0_PLAY.0, SLOT0_PLAY.1);
    assert_eq!(c.take_effects(), vec![Effect::StartGame(0)]);

    click(&mut c, SLOT0_DELETE.0, SLOT0_DELETE.1);
    assert!(c.saves().slot(0).is_some_and(|s| s.is_empty()));
}

#[test]
fn escape_cancels_the_name_dialog() {
    let (mut c, _) = controller("slot_cancel");
    c.set_screen(Screen::Play).unwrap();
    click(&mut c, SLOT0_PLAY.0, SLOT0_PLAY.1);
    c.dispatch(&InputEvent::typed('x'));
    assert_eq!(c.dispatch(&InputEvent::key(KeyCode::Escape)), Some(Action::NameCancelled));
    assert!(c.saves().slot(0).is_some_and(|s| s.is_empty()));
}

#[test]
fn reentering_play_discards_the_name_dialog() {
    let (mut c, _) = controller("dialog_reenter");
    c.set_screen(Screen::Play).unwrap();
    click(&mut c, SLOT0_PLAY.0, SLOT0_PLAY.1);
    c.dispatch(&InputEvent::typed('z'));
    let Layout::Play(panel) = c.layout() else { panic!("not on play") };
    assert!(panel.is_dialog_active());

    c.set_screen(Screen::Play).unwrap();
    let Layout::Play(panel) = c.layout() else { panic!("not on play") };
    assert!(!panel.is_dialog_active());
    assert_eq!(panel.pending_slot(), None);

    // Enter now has no dialog to accept.
    assert_eq!(c.dispatch(&InputEvent::key(KeyCode::Enter)), None);
    assert!(c.saves().slot(0).is_some_and(|s| s.is_empty()));
}

#[test]
fn active_dialog_blocks_back_button() {
    let (mut c, _) = controller("dialog_modal");
    c.set_screen(Screen::Play).unwrap();
    click(&mut c, SLOT0_PLAY.0, SLOT0_PLAY.1);

    assert_eq!(click(&mut c, PLAY_BACK.0, PLAY_BACK.1), None);
    assert_eq!(c.screen(), Screen::Play);
    let Layout::Play(panel) = c.layout() else { panic!("not on play") };
    assert!(panel.is_dialog_active());
    assert_eq!(panel.pending_slot(), Some(0));

    c.dispatch(&InputEvent::key(KeyCode::Escape));
    assert_eq!(click(&mut c, PLAY_BACK.0, PLAY_BACK.1), Some(Action::Clicked(ButtonId::Back)));
    assert_eq!(c.screen(), Screen::Main);
}
