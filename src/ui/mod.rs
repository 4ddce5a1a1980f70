// ── UI types & pure helpers ──────────────────────────────────────────────────
//
// Widgets never touch the GPU.  They describe a frame as a `DrawList` of
// image, fill and text commands which the renderer consumes, so every widget
// can be driven and inspected without a window.

pub mod progress;
pub mod widgets;

use glam::Vec2;

use crate::config::Resolution;
use crate::geometry::Rect;
use crate::input::InputEvent;

// ── Color ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
    /// Label colour used across the menu (232, 232, 232).
    pub const LIGHT: Self = Self([0.91, 0.91, 0.91, 1.0]);
    pub const ACCENT: Self = Self([0.25, 0.65, 0.50, 1.0]);
    pub const WARNING: Self = Self([0.90, 0.30, 0.25, 1.0]);
    pub const MENU_BG: Self = Self([0.07, 0.10, 0.10, 1.0]);
}

// ── Draw list ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FontSpec {
    pub family: &'static str,
    pub px: u32,
}

impl FontSpec {
    pub const fn menu(px: u32) -> Self {
        Self { family: crate::assets::MENU_FONT, px }
    }
}

/// Which point of the text block `pos` names.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Blit the image named `key` stretched over `rect`.
    Image { key: String, rect: Rect },
    Fill { rect: Rect, color: Color },
    Text { text: String, font: FontSpec, color: Color, pos: Vec2, anchor: Anchor },
}

/// Ordered back-to-front list of draw commands for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&mut self, key: impl Into<String>, rect: Rect) {
        self.commands.push(DrawCommand::Image { key: key.into(), rect });
    }

    pub fn fill(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }

    pub fn text(&mut self, text: impl Into<String>, font: FontSpec, color: Color, pos: Vec2, anchor: Anchor) {
        self.commands.push(DrawCommand::Text { text: text.into(), font, color, pos, anchor });
    }

    pub fn commands(&self) -> &[DrawCommand] { &self.commands }
    pub fn len(&self) -> usize { self.commands.len() }
    pub fn is_empty(&self) -> bool { self.commands.is_empty() }

    /// Image keys in draw order.
    pub fn image_keys(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Image { key, .. } => Some(key.as_str()),
            _ => None,
        })
    }

    /// Text strings in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

// ── Visual state ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VisualState {
    Default,
    Hover,
    Pressed,
}

impl VisualState {
    /// Resolve from pointer position and whether this widget is armed.
    pub fn resolve(rect: Rect, pointer: Option<Vec2>, armed: bool) -> Self {
        match pointer {
            Some(p) if rect.contains(p) => {
                if armed { Self::Pressed } else { Self::Hover }
            }
            _ => Self::Default,
        }
    }

    /// Image-name suffix for the three-image widgets.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Hover => "over",
            Self::Pressed => "click",
        }
    }
}

// ── Actions ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ButtonId {
    Play,
    Options,
    LeaderBoard,
    Exit,
    Back,
    Accept,
    Cancel,
    SlotPlay(usize),
    SlotDelete(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ToggleSetting {
    Fullscreen,
    AnimatedBackground,
}

/// Semantic result of one input event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Clicked(ButtonId),
    Toggle(ToggleSetting),
    SetVolume(u8),
    DropdownOpened,
    DropdownClosed,
    SelectResolution(Resolution),
    DialogAccepted(String),
    DialogCancelled,
    /// A character was refused because the name is at its length cap.
    NameTooLong,
    NameAccepted { slot: usize, name: String },
    NameCancelled,
}

// ── Widget ────────────────────────────────────────────────────────────────────

/// Settings values a widget may display.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SettingsSnapshot {
    pub resolution: Resolution,
    pub volume: u8,
    pub fullscreen: bool,
    pub animated_background: bool,
}

impl SettingsSnapshot {
    pub fn toggle(&self, setting: ToggleSetting) -> bool {
        match setting {
            ToggleSetting::Fullscreen => self.fullscreen,
            ToggleSetting::AnimatedBackground => self.animated_background,
        }
    }
}

/// Read-only state handed to `Widget::draw`.
#[derive(Copy, Clone, Debug)]
pub struct DrawContext {
    pub pointer: Option<Vec2>,
    pub settings: SettingsSnapshot,
}

/// Anything that owns a screen rectangle, reports a visual state and turns
/// input events into actions.
pub trait Widget {
    fn rect(&self) -> Rect;

    fn visual_state(&self, pointer: Option<Vec2>) -> VisualState {
        VisualState::resolve(self.rect(), pointer, false)
    }

    /// At most one action per event.
    fn handle_event(&mut self, event: &InputEvent) -> Option<Action>;

    fn draw(&self, ctx: &DrawContext, list: &mut DrawList);
}
