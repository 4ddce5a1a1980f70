use std::collections::VecDeque;

use glam::Vec2;
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// One typed input event, already mapped from window to logical coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Window close or an explicit quit request.
    Quit,
    PointerMoved { pos: Vec2 },
    PointerDown { pos: Vec2, button: MouseButton },
    PointerUp { pos: Vec2, button: MouseButton },
    /// `key` is `None` for keys without a physical code; `text` carries the
    /// printable character produced by the key, if any.
    KeyDown { key: Option<KeyCode>, text: Option<char> },
}

impl InputEvent {
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown { pos: Vec2::new(x, y), button: MouseButton::Left }
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { pos: Vec2::new(x, y), button: MouseButton::Left }
    }

    pub fn pointer_moved(x: f32, y: f32) -> Self {
        Self::PointerMoved { pos: Vec2::new(x, y) }
    }

    pub fn key(key: KeyCode) -> Self {
        Self::KeyDown { key: Some(key), text: None }
    }

    pub fn typed(ch: char) -> Self {
        Self::KeyDown { key: None, text: Some(ch) }
    }

    /// Pointer position carried by the event, if any.
    pub fn pointer_pos(&self) -> Option<Vec2> {
        match self {
            Self::PointerMoved { pos } | Self::PointerDown { pos, .. } | Self::PointerUp { pos, .. } => Some(*pos),
            Self::Quit | Self::KeyDown { .. } => None,
        }
    }

    /// Left-button press position.  Other buttons never arm widgets.
    pub fn left_down(&self) -> Option<Vec2> {
        match self {
            Self::PointerDown { pos, button: MouseButton::Left } => Some(*pos),
            _ => None,
        }
    }

    /// Left-button release position.
    pub fn left_up(&self) -> Option<Vec2> {
        match self {
            Self::PointerUp { pos, button: MouseButton::Left } => Some(*pos),
            _ => None,
        }
    }
}

/// FIFO of events collected between two frames.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<InputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize { self.events.len() }
    pub fn is_empty(&self) -> bool { self.events.is_empty() }

    /// Take every pending event in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }
}
