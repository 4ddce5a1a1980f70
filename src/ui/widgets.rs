//! Interactive widgets: ButtonSet, Toggle, VolumeSlider, Dropdown,
//! TextInputDialog.
//!
//! Widgets hold only layout and transient interaction state (armed button,
//! open list, text buffer).  Persisted values are read from the
//! `SettingsSnapshot` at draw time, and changes leave a widget only as an
//! `Action` for the controller to apply.
//!
//! # Click confirmation
//!
//! Buttons arm on a left pointer-down and fire on the matching pointer-up only
//! if the release lands inside the same button.  Dragging off before release
//! cancels silently.  Toggles, the slider and the dropdown react immediately
//! on pointer-down.

use glam::Vec2;

use super::{Action, Anchor, ButtonId, Color, DrawContext, DrawList, FontSpec, ToggleSetting, VisualState, Widget};
use crate::config::Resolution;
use crate::geometry::Rect;
use crate::input::{InputEvent, KeyCode};

/// Longest name the text dialog accepts, in characters.
pub const MAX_NAME_LEN: usize = 12;

/// Resolutions offered by the options dropdown.
pub const RESOLUTION_OPTIONS: [(u32, u32); 3] = [(1080, 768), (1280, 720), (1920, 1080)];

pub fn resolution_choices() -> Vec<Resolution> {
    RESOLUTION_OPTIONS.iter().filter_map(|&(w, h)| Resolution::new(w, h).ok()).collect()
}

const LABEL_FONT: FontSpec = FontSpec::menu(28);
const INPUT_FONT: FontSpec = FontSpec::menu(44);

// ── Button / ButtonSet ────────────────────────────────────────────────────────

/// Three-image control.  `image` is the base name; the drawn key is
/// `<image>_default`, `<image>_over` or `<image>_click`.
#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub id: ButtonId,
    pub image: String,
    pub rect: Rect,
}

impl Button {
    pub fn new(id: ButtonId, image: impl Into<String>, rect: Rect) -> Self {
        Self { id, image: image.into(), rect }
    }

    pub fn image_key(&self, state: VisualState) -> String {
        format!("{}_{}", self.image, state.suffix())
    }
}

/// A group of buttons sharing one armed slot.
#[derive(Clone, Debug, Default)]
pub struct ButtonSet {
    buttons: Vec<Button>,
    armed: Option<ButtonId>,
}

impl ButtonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn push(&mut self, button: Button) {
        self.buttons.push(button);
    }

    pub fn buttons(&self) -> &[Button] { &self.buttons }
    pub fn armed(&self) -> Option<ButtonId> { self.armed }

    pub fn get(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.iter().find(|b| b.id == id)
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    pub fn button_state(&self, button: &Button, pointer: Option<Vec2>) -> VisualState {
        VisualState::resolve(button.rect, pointer, self.armed == Some(button.id))
    }

    fn hit(&self, pos: Vec2) -> Option<&Button> {
        self.buttons.iter().find(|b| b.rect.contains(pos))
    }
}

impl Widget for ButtonSet {
    fn rect(&self) -> Rect {
        let mut iter = self.buttons.iter().map(|b| b.rect);
        let first = iter.next().unwrap_or_default();
        iter.fold(first, |acc, r| acc.union(&r))
    }

    fn visual_state(&self, pointer: Option<Vec2>) -> VisualState {
        match pointer.and_then(|p| self.hit(p)) {
            Some(button) => self.button_state(button, pointer),
            None => VisualState::Default,
        }
    }

    fn handle_event(&mut self, event: &InputEvent) -> Option<Action> {
        if let Some(pos) = event.left_down() {
            self.armed = self.hit(pos).map(|b| b.id);
            return None;
        }
        if let Some(pos) = event.left_up() {
            let armed = self.armed.take()?;
            let button = self.get(armed)?;
            return button.rect.contains(pos).then_some(Action::Clicked(armed));
        }
        None
    }

    fn draw(&self, ctx: &DrawContext, list: &mut DrawList) {
        for button in &self.buttons {
            list.image(button.image_key(self.button_state(button, ctx.pointer)), button.rect);
        }
    }
}

// ── Toggle ────────────────────────────────────────────────────────────────────

/// Two-image on/off switch over one boolean setting.
#[derive(Clone, Debug, PartialEq)]
pub struct Toggle {
    pub setting: ToggleSetting,
    pub image: String,
    pub rect: Rect,
}

impl Toggle {
    pub fn new(setting: ToggleSetting, image: impl Into<String>, rect: Rect) -> Self {
        Self { setting, image: image.into(), rect }
    }

    pub fn image_key(&self, on: bool) -> String {
        format!("{}_{}", self.image, if on { "on" } else { "off" })
    }
}

impl Widget for Toggle {
    fn rect(&self) -> Rect { self.rect }

    fn handle_event(&mut self, event: &InputEvent) -> Option<Action> {
        let pos = event.left_down()?;
        self.rect.contains(pos).then_some(Action::Toggle(self.setting))
    }

    fn draw(&self, ctx: &DrawContext, list: &mut DrawList) {
        list.image(self.image_key(ctx.settings.toggle(self.setting)), self.rect);
    }
}

// ── VolumeSlider ──────────────────────────────────────────────────────────────

/// Horizontal bar; every pointer-down recomputes the value from x.
#[derive(Clone, Debug, PartialEq)]
pub struct VolumeSlider {
    pub bar: Rect,
}

impl VolumeSlider {
    pub fn new(bar: Rect) -> Self {
        Self { bar }
    }

    /// `clamp(0, 100, round(100 * (x - left) / width))`.
    pub fn value_at(&self, x: f32) -> u8 {
        if self.bar.w <= 0.0 {
            return 0;
        }
        (100.0 * (x - self.bar.left()) / self.bar.w).round().clamp(0.0, 100.0) as u8
    }

    /// Filled width in pixels for `value`.
    pub fn fill_px(&self, value: u8) -> f32 {
        (self.bar.w * value.min(100) as f32 / 100.0).round()
    }
}

impl Widget for VolumeSlider {
    fn rect(&self) -> Rect { self.bar }

    fn handle_event(&mut self, event: &InputEvent) -> Option<Action> {
        let pos = event.left_down()?;
        self.bar.contains(pos).then(|| Action::SetVolume(self.value_at(pos.x)))
    }

    fn draw(&self, ctx: &DrawContext, list: &mut DrawList) {
        let volume = ctx.settings.volume;
        list.image("ui/volume_bar", self.bar);
        list.fill(self.bar.with_width(self.fill_px(volume)), Color::ACCENT);
        let label_pos = Vec2::new(self.bar.right() + 40.0, self.bar.center().y);
        list.text(format!("{volume}%"), LABEL_FONT, Color::LIGHT, label_pos, Anchor::Center);
    }
}

// ── Dropdown ──────────────────────────────────────────────────────────────────

/// Resolution picker.
///
/// The option rectangles are generated below the header each time the list
/// opens and dropped when it closes.  While open, every left pointer-down is
/// consumed: on an option it selects, anywhere else it closes.
#[derive(Clone, Debug)]
pub struct Dropdown {
    pub header: Rect,
    choices: Vec<Resolution>,
    options: Vec<(Resolution, Rect)>,
    open: bool,
}

impl Dropdown {
    pub fn new(header: Rect, choices: Vec<Resolution>) -> Self {
        Self { header, choices, options: Vec::new(), open: false }
    }

    pub fn is_open(&self) -> bool { self.open }
    pub fn options(&self) -> &[(Resolution, Rect)] { &self.options }

    pub fn open(&mut self) {
        self.options = self
            .choices
            .iter()
            .enumerate()
            .map(|(i, &res)| (res, self.header.translate(Vec2::new(0.0, self.header.h * (i + 1) as f32))))
            .collect();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.options.clear();
        self.open = false;
    }
}

impl Widget for Dropdown {
    fn rect(&self) -> Rect {
        self.options.iter().fold(self.header, |acc, (_, r)| acc.union(r))
    }

    fn handle_event(&mut self, event: &InputEvent) -> Option<Action> {
        let pos = event.left_down()?;

        if self.open {
            let picked = self.options.iter().find(|(_, r)| r.contains(pos)).map(|(res, _)| *res);
            self.close();
            return Some(match picked {
                Some(res) => Action::SelectResolution(res),
                None => Action::DropdownClosed,
            });
        }

        if self.header.contains(pos) {
            self.open();
            return Some(Action::DropdownOpened);
        }
        None
    }

    fn draw(&self, ctx: &DrawContext, list: &mut DrawList) {
        list.image("ui/dropdown", self.header);
        list.text(ctx.settings.resolution.to_string(), LABEL_FONT, Color::LIGHT, self.header.center(), Anchor::Center);
        let arrow = if self.open { "^" } else { "v" };
        let arrow_pos = Vec2::new(self.header.right() - 20.0, self.header.center().y);
        list.text(arrow, LABEL_FONT, Color::LIGHT, arrow_pos, Anchor::Center);

        for (res, rect) in &self.options {
            let hovered = ctx.pointer.is_some_and(|p| rect.contains(p));
            list.fill(*rect, if hovered { Color::ACCENT } else { Color::MENU_BG });
            list.text(res.to_string(), LABEL_FONT, Color::LIGHT, rect.center(), Anchor::Center);
        }
    }
}

// ── TextInputDialog ───────────────────────────────────────────────────────────

/// Modal name prompt with accept and cancel buttons.
///
/// Inactive, it ignores everything.  Active, the owner must route every event
/// here first and let nothing else see it.
#[derive(Clone, Debug)]
pub struct TextInputDialog {
    pub prompt: String,
    pub dialog: Rect,
    pub input: Rect,
    buttons: ButtonSet,
    active: bool,
    buffer: String,
    too_long: bool,
}

impl TextInputDialog {
    /// Dialog centred on `center`; the input bar sits just above the dialog's
    /// centre, the buttons below it at its left and right edges.
    pub fn new(prompt: impl Into<String>, center: Vec2, dialog_size: Vec2, input_size: Vec2, button_size: Vec2) -> Self {
        let dialog = Rect::from_center(center, dialog_size);
        let input = Rect::from_center(dialog.center() - Vec2::new(0.0, 10.0), input_size);
        let row_y = input.bottom() + 20.0;
        let buttons = ButtonSet::new()
            .with(Button::new(ButtonId::Accept, "buttons/accept", Rect::from_size(Vec2::new(input.left(), row_y), button_size)))
            .with(Button::new(
                ButtonId::Cancel,
                "buttons/cancel",
                Rect::from_size(Vec2::new(input.right() - button_size.x, row_y), button_size),
            ));
        Self { prompt: prompt.into(), dialog, input, buttons, active: false, buffer: String::new(), too_long: false }
    }

    pub fn is_active(&self) -> bool { self.active }
    pub fn buffer(&self) -> &str { &self.buffer }
    pub fn is_too_long(&self) -> bool { self.too_long }
    pub fn buttons(&self) -> &ButtonSet { &self.buttons }

    /// Activate with an empty buffer.
    pub fn open(&mut self) {
        self.active = true;
        self.buffer.clear();
        self.too_long = false;
        self.buttons.disarm();
    }

    pub fn close(&mut self) {
        self.active = false;
        self.buffer.clear();
        self.too_long = false;
        self.buttons.disarm();
    }

    /// Blank names are not accepted; the dialog stays open.
    fn accept(&mut self) -> Option<Action> {
        let name = self.buffer.trim().to_string();
        if name.is_empty() {
            return None;
        }
        self.close();
        Some(Action::DialogAccepted(name))
    }

    fn cancel(&mut self) -> Option<Action> {
        self.close();
        Some(Action::DialogCancelled)
    }

    fn type_char(&mut self, ch: char) -> Option<Action> {
        if self.buffer.chars().count() >= MAX_NAME_LEN {
            self.too_long = true;
            return Some(Action::NameTooLong);
        }
        self.buffer.push(ch);
        self.too_long = false;
        None
    }
}

impl Widget for TextInputDialog {
    fn rect(&self) -> Rect { self.dialog }

    fn handle_event(&mut self, event: &InputEvent) -> Option<Action> {
        if !self.active {
            return None;
        }

        match event {
            InputEvent::KeyDown { key: Some(KeyCode::Enter | KeyCode::NumpadEnter), .. } => self.accept(),
            InputEvent::KeyDown { key: Some(KeyCode::Escape), .. } => self.cancel(),
            InputEvent::KeyDown { key: Some(KeyCode::Backspace), .. } => {
                self.buffer.pop();
                self.too_long = false;
                None
            }
            InputEvent::KeyDown { text: Some(ch), .. } if !ch.is_control() => self.type_char(*ch),
            InputEvent::PointerDown { .. } | InputEvent::PointerUp { .. } => match self.buttons.handle_event(event) {
                Some(Action::Clicked(ButtonId::Accept)) => self.accept(),
                Some(Action::Clicked(ButtonId::Cancel)) => self.cancel(),
                _ => None,
            },
            _ => None,
        }
    }

    fn draw(&self, ctx: &DrawContext, list: &mut DrawList) {
        if !self.active {
            return;
        }
        list.image("ui/input_name_dialog", self.dialog);
        let prompt_pos = Vec2::new(self.dialog.center().x, self.dialog.top() + 40.0);
        list.text(self.prompt.clone(), LABEL_FONT, Color::LIGHT, prompt_pos, Anchor::Center);
        list.image("ui/input_bar", self.input);
        list.text(self.buffer.clone(), INPUT_FONT, Color::BLACK, self.input.top_left() + Vec2::new(10.0, 5.0), Anchor::TopLeft);
        if self.too_long {
            let warn_pos = Vec2::new(self.dialog.center().x, self.input.top() - 20.0);
            list.text(format!("MAX {MAX_NAME_LEN} CHARACTERS"), LABEL_FONT, Color::WARNING, warn_pos, Anchor::Center);
        }
        self.buttons.draw(ctx, list);
    }
}
