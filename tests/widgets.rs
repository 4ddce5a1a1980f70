use glam::Vec2;

use jmenu::config::Resolution;
use jmenu::geometry::Rect;
use jmenu::input::{InputEvent, KeyCode};
use jmenu::ui::widgets::{
    Button, ButtonSet, Dropdown, MAX_NAME_LEN, TextInputDialog, Toggle, VolumeSlider, resolution_choices,
};
use jmenu::ui::{
    Action, ButtonId, DrawContext, DrawList, SettingsSnapshot, ToggleSetting, VisualState, Widget,
};

fn two_buttons() -> ButtonSet {
    ButtonSet::new()
        .with(Button::new(ButtonId::Play, "buttons/play", Rect::new(0.0, 0.0, 100.0, 40.0)))
        .with(Button::new(ButtonId::Exit, "buttons/exit", Rect::new(0.0, 60.0, 100.0, 40.0)))
}

fn dialog() -> TextInputDialog {
    let mut d = TextInputDialog::new(
        "Name",
        Vec2::new(400.0, 300.0),
        Vec2::new(400.0, 240.0),
        Vec2::new(300.0, 50.0),
        Vec2::new(120.0, 40.0),
    );
    d.open();
    d
}

fn ctx(pointer: Option<Vec2>) -> DrawContext {
    DrawContext {
        pointer,
        settings: SettingsSnapshot {
            resolution: Resolution::new(1080, 768).unwrap(),
            volume: 40,
            fullscreen: false,
            animated_background: true,
        },
    }
}

// ── ButtonSet ────────────────────────────────────────────────────────────────

#[test]
fn click_fires_on_release_inside_same_button() {
    let mut set = two_buttons();
    assert_eq!(set.handle_event(&InputEvent::pointer_down(50.0, 20.0)), None);
    assert_eq!(set.armed(), Some(ButtonId::Play));
    assert_eq!(set.handle_event(&InputEvent::pointer_up(60.0, 30.0)), Some(Action::Clicked(ButtonId::Play)));
    assert_eq!(set.armed(), None);
}

#[test]
fn press_on_one_release_on_another_fires_nothing() {
    let mut set = two_buttons();
    set.handle_event(&InputEvent::pointer_down(50.0, 20.0));
    assert_eq!(set.handle_event(&InputEvent::pointer_up(50.0, 80.0)), None);
    // The release disarmed; a second release does not fire either.
    assert_eq!(set.handle_event(&InputEvent::pointer_up(50.0, 20.0)), None);
}

#[test]
fn right_button_does_not_arm() {
    let mut set = two_buttons();
    let pos = Vec2::new(50.0, 20.0);
    set.handle_event(&InputEvent::PointerDown { pos, button: jmenu::input::MouseButton::Right });
    assert_eq!(set.armed(), None);
    assert_eq!(set.handle_event(&InputEvent::PointerUp { pos, button: jmenu::input::MouseButton::Right }), None);
}

#[test]
fn visual_state_tracks_hover_and_press() {
    let mut set = two_buttons();
    let over = Some(Vec2::new(10.0, 10.0));
    assert_eq!(set.visual_state(None), VisualState::Default);
    assert_eq!(set.visual_state(over), VisualState::Hover);
    set.handle_event(&InputEvent::pointer_down(10.0, 10.0));
    assert_eq!(set.visual_state(over), VisualState::Pressed);

    let mut list = DrawList::new();
    set.draw(&ctx(over), &mut list);
    let keys: Vec<_> = list.image_keys().collect();
    assert_eq!(keys, vec!["buttons/play_click", "buttons/exit_default"]);
}

// ── Toggle / VolumeSlider ────────────────────────────────────────────────────

#[test]
fn toggle_reacts_on_press_and_draws_current_value() {
    let mut toggle = Toggle::new(ToggleSetting::Fullscreen, "ui/toggle", Rect::new(0.0, 0.0, 64.0, 32.0));
    assert_eq!(
        toggle.handle_event(&InputEvent::pointer_down(5.0, 5.0)),
        Some(Action::Toggle(ToggleSetting::Fullscreen))
    );
    assert_eq!(toggle.handle_event(&InputEvent::pointer_down(100.0, 5.0)), None);

    let mut list = DrawList::new();
    toggle.draw(&ctx(None), &mut list);
    assert_eq!(list.image_keys().collect::<Vec<_>>(), vec!["ui/toggle_off"]);
}

#[test]
fn slider_maps_x_to_a_clamped_percentage() {
    let slider = VolumeSlider::new(Rect::new(100.0, 0.0, 200.0, 20.0));
    assert_eq!(slider.value_at(100.0), 0);
    assert_eq!(slider.value_at(200.0), 50);
    assert_eq!(slider.value_at(299.0), 100);
    assert_eq!(slider.value_at(50.0), 0);
    assert_eq!(slider.value_at(400.0), 100);
    assert_eq!(slider.fill_px(40), 80.0);
}

#[test]
fn slider_ignores_presses_off_the_bar() {
    let mut slider = VolumeSlider::new(Rect::new(100.0, 0.0, 200.0, 20.0));
    assert_eq!(slider.handle_event(&InputEvent::pointer_down(150.0, 10.0)), Some(Action::SetVolume(25)));
    assert_eq!(slider.handle_event(&InputEvent::pointer_down(150.0, 30.0)), None);
    assert_eq!(slider.handle_event(&InputEvent::pointer_up(150.0, 10.0)), None);
}

// ── Dropdown ─────────────────────────────────────────────────────────────────

#[test]
fn dropdown_opens_below_the_header() {
    let mut dd = Dropdown::new(Rect::new(0.0, 0.0, 200.0, 40.0), resolution_choices());
    assert_eq!(dd.handle_event(&InputEvent::pointer_down(10.0, 10.0)), Some(Action::DropdownOpened));
    assert!(dd.is_open());
    let tops: Vec<f32> = dd.options().iter().map(|(_, r)| r.top()).collect();
    assert_eq!(tops, vec![40.0, 80.0, 120.0]);
}

#[test]
fn dropdown_picks_an_option_and_closes() {
    let mut dd = Dropdown::new(Rect::new(0.0, 0.0, 200.0, 40.0), resolution_choices());
    dd.handle_event(&InputEvent::pointer_down(10.0, 10.0));
    let action = dd.handle_event(&InputEvent::pointer_down(10.0, 90.0));
    assert_eq!(action, Some(Action::SelectResolution(Resolution::new(1280, 720).unwrap())));
    assert!(!dd.is_open());
    assert!(dd.options().is_empty());
}

#[test]
fn dropdown_closes_on_outside_click() {
    let mut dd = Dropdown::new(Rect::new(0.0, 0.0, 200.0, 40.0), resolution_choices());
    dd.handle_event(&InputEvent::pointer_down(10.0, 10.0));
    assert_eq!(dd.handle_event(&InputEvent::pointer_down(500.0, 500.0)), Some(Action::DropdownClosed));
    assert!(!dd.is_open());
    // Closed and clicked elsewhere: nothing.
    assert_eq!(dd.handle_event(&InputEvent::pointer_down(500.0, 500.0)), None);
}

// ── TextInputDialog ──────────────────────────────────────────────────────────

#[test]
fn inactive_dialog_ignores_input() {
    let mut d = dialog();
    d.close();
    assert_eq!(d.handle_event(&InputEvent::typed('a')), None);
    assert_eq!(d.buffer(), "");
}

#[test]
fn typing_past_the_limit_reports_too_long() {
    let mut d = dialog();
    let mut too_long = 0;
    for ch in "abcdefghijklm".chars() {
        if d.handle_event(&InputEvent::typed(ch)) == Some(Action::NameTooLong) {
            too_long += 1;
        }
    }
    assert_eq!(d.buffer().chars().count(), MAX_NAME_LEN);
    assert_eq!(d.buffer(), "abcdefghijkl");
    assert_eq!(too_long, 1);
    assert!(d.is_too_long());

    d.handle_event(&InputEvent::key(KeyCode::Backspace));
    assert_eq!(d.buffer(), "abcdefghijk");
    assert!(!d.is_too_long());
}

#[test]
fn enter_accepts_trimmed_name() {
    let mut d = dialog();
    for ch in " Zed ".chars() {
        d.handle_event(&InputEvent::typed(ch));
    }
    assert_eq!(d.handle_event(&InputEvent::key(KeyCode::Enter)), Some(Action::DialogAccepted("Zed".into())));
    assert!(!d.is_active());
}

#[test]
fn blank_name_keeps_the_dialog_open() {
    let mut d = dialog();
    d.handle_event(&InputEvent::typed(' '));
    assert_eq!(d.handle_event(&InputEvent::key(KeyCode::Enter)), None);
    assert!(d.is_active());
}

#[test]
fn cancel_button_closes_the_dialog() {
    let mut d = dialog();
    d.handle_event(&InputEvent::typed('q'));
    let cancel = d.buttons().get(ButtonId::Cancel).unwrap().rect.center();
    assert_eq!(d.handle_event(&InputEvent::pointer_down(cancel.x, cancel.y)), None);
    assert_eq!(d.handle_event(&InputEvent::pointer_up(cancel.x, cancel.y)), Some(Action::DialogCancelled));
    assert!(!d.is_active());
    assert_eq!(d.buffer(), "");
}

#[test]
fn open_dialog_draws_buffer_and_warning() {
    let mut d = dialog();
    for ch in "abcdefghijklm".chars() {
        d.handle_event(&InputEvent::typed(ch));
    }
    let mut list = DrawList::new();
    d.draw(&ctx(None), &mut list);
    assert!(list.image_keys().any(|k| k == "ui/input_name_dialog"));
    assert!(list.texts().any(|t| t == "abcdefghijkl"));
    assert!(list.texts().any(|t| t.contains("12")));
}
