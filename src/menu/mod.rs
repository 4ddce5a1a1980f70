//! Menu state machine.
//!
//! `MenuController` owns the current `Screen` and that screen's widget set,
//! applies the actions widgets emit to the config store and save book, and
//! queues `Effect`s (surface recreation, volume, quit) for the frame loop.

pub mod screens;

use glam::Vec2;
use log::{info, warn};

use crate::assets::AssetCache;
use crate::config::{ConfigStore, Resolution};
use crate::error::ValidationError;
use crate::geometry::Rect;
use crate::input::InputEvent;
use crate::saves::SaveBook;
use crate::ui::{Action, ButtonId, Color, DrawContext, DrawList, SettingsSnapshot, ToggleSetting};
use crate::window::WindowConfig;

pub use screens::Layout;

/// Milliseconds between background animation frames.
pub const FRAME_INTERVAL_MS: u64 = 150;
/// Asset directory holding the animated background frames.
pub const BACKGROUND_DIR: &str = "backgrounds/menu";

// ── Screen ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    None = 0,
    Main = 1,
    Play = 2,
    Options = 3,
    LeaderBoard = 4,
    Exit = 5,
}

impl TryFrom<i64> for Screen {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::None),
            1 => Ok(Self::Main),
            2 => Ok(Self::Play),
            3 => Ok(Self::Options),
            4 => Ok(Self::LeaderBoard),
            5 => Ok(Self::Exit),
            other => Err(ValidationError::UnknownScreen(other)),
        }
    }
}

// ── Effect ────────────────────────────────────────────────────────────────────

/// Side effects the controller cannot perform itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    RecreateSurface(WindowConfig),
    VolumeChanged(u8),
    /// Hand off to the game with this save slot.
    StartGame(usize),
    Quit,
}

// ── BackgroundAnimation ───────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct BackgroundAnimation {
    frames: Vec<String>,
    index: usize,
    elapsed_ms: u64,
}

impl BackgroundAnimation {
    pub fn new(frames: Vec<String>) -> Self {
        Self { frames, index: 0, elapsed_ms: 0 }
    }

    pub fn frames(&self) -> &[String] { &self.frames }
    pub fn index(&self) -> usize { self.index }

    pub fn current(&self) -> Option<&str> {
        self.frames.get(self.index).map(String::as_str)
    }

    /// Advance one frame once more than `FRAME_INTERVAL_MS` has accumulated.
    pub fn tick(&mut self, elapsed_ms: u64) {
        if self.frames.is_empty() {
            return;
        }
        self.elapsed_ms += elapsed_ms;
        if self.elapsed_ms > FRAME_INTERVAL_MS {
            self.index = (self.index + 1) % self.frames.len();
            self.elapsed_ms = 0;
        }
    }
}

// ── MenuController ────────────────────────────────────────────────────────────

pub struct MenuController {
    screen: Screen,
    layout: Layout,
    config: ConfigStore,
    saves: SaveBook,
    assets: AssetCache,
    background: BackgroundAnimation,
    pointer: Option<Vec2>,
    effects: Vec<Effect>,
}

impl MenuController {
    /// Start on the main menu.
    pub fn new(config: ConfigStore, saves: SaveBook, mut assets: AssetCache) -> Self {
        let background = BackgroundAnimation::new(assets.sequence(BACKGROUND_DIR));
        let layout = Layout::build(Screen::Main, config.resolution(), &mut assets, &saves);
        Self {
            screen: Screen::Main,
            layout,
            config,
            saves,
            assets,
            background,
            pointer: None,
            effects: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen { self.screen }
    pub fn layout(&self) -> &Layout { &self.layout }
    pub fn config(&self) -> &ConfigStore { &self.config }
    pub fn saves(&self) -> &SaveBook { &self.saves }
    pub fn background(&self) -> &BackgroundAnimation { &self.background }
    pub fn pointer(&self) -> Option<Vec2> { self.pointer }

    /// The renderer resolves image keys through this cache.
    pub fn assets_mut(&mut self) -> &mut AssetCache { &mut self.assets }

    /// The loop ends once `Exit` is current.
    pub fn is_finished(&self) -> bool {
        self.screen == Screen::Exit
    }

    pub fn resolution(&self) -> Resolution {
        self.config.resolution()
    }

    pub fn window_config(&self) -> WindowConfig {
        WindowConfig::new(self.config.resolution(), self.config.fullscreen())
    }

    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            resolution: self.config.resolution(),
            volume: self.config.volume(),
            fullscreen: self.config.fullscreen(),
            animated_background: self.config.animated_background(),
        }
    }

    /// Enter `screen`.  `Screen::None` is rejected and nothing changes.
    pub fn set_screen(&mut self, screen: Screen) -> Result<(), ValidationError> {
        if screen == Screen::None {
            return Err(ValidationError::UnenterableScreen);
        }
        self.enter(screen);
        Ok(())
    }

    /// `set_screen` for a raw integer, validated through `Screen::try_from`.
    pub fn set_screen_raw(&mut self, raw: i64) -> Result<(), ValidationError> {
        let screen = Screen::try_from(raw).inspect_err(|e| warn!("[menu] {e}"))?;
        self.set_screen(screen)
    }

    fn enter(&mut self, screen: Screen) {
        info!("[menu] Setting new menu state: {screen:?}");
        self.screen = screen;
        self.rebuild_layout();
        if screen == Screen::Exit {
            self.effects.push(Effect::Quit);
        }
    }

    /// Replace the current widget set with a fresh one for the current screen
    /// and resolution.  Drops any open dropdown, armed button or dialog.
    pub fn rebuild_layout(&mut self) {
        self.layout = Layout::build(self.screen, self.config.resolution(), &mut self.assets, &self.saves);
    }

    /// Route one input event; returns the action it produced, if any.
    pub fn dispatch(&mut self, event: &InputEvent) -> Option<Action> {
        if let Some(pos) = event.pointer_pos() {
            self.pointer = Some(pos);
        }
        if *event == InputEvent::Quit {
            if self.screen != Screen::Exit {
                self.enter(Screen::Exit);
            }
            return None;
        }

        let action = self.layout.handle_event(event)?;
        self.apply(&action);
        Some(action)
    }

    fn apply(&mut self, action: &Action) {
        // Setter failures are logged by the stores; memory stays authoritative.
        match action {
            Action::Clicked(id) => self.on_click(*id),
            Action::Toggle(ToggleSetting::Fullscreen) => {
                let on = !self.config.fullscreen();
                warn!("[menu] Fullscreen set to {on}");
                let _ = self.config.set_fullscreen(on);
                self.effects.push(Effect::RecreateSurface(self.window_config()));
            }
            Action::Toggle(ToggleSetting::AnimatedBackground) => {
                let on = !self.config.animated_background();
                info!("[menu] Animated background set to {on}");
                let _ = self.config.set_animated_background(on);
            }
            Action::SetVolume(level) => {
                let _ = self.config.set_volume(i32::from(*level));
                self.effects.push(Effect::VolumeChanged(self.config.volume()));
            }
            Action::SelectResolution(res) => {
                info!("[menu] Resolution set to {res}");
                let _ = self.config.set_resolution(*res);
                self.effects.push(Effect::RecreateSurface(self.window_config()));
                self.rebuild_layout();
            }
            Action::NameAccepted { slot, name } => {
                let _ = self.saves.fill(*slot, name);
                self.sync_slot(*slot);
            }
            Action::NameTooLong => info!("[menu] Name input is too long"),
            Action::DropdownOpened
            | Action::DropdownClosed
            | Action::DialogAccepted(_)
            | Action::DialogCancelled
            | Action::NameCancelled => {}
        }
    }

    fn on_click(&mut self, id: ButtonId) {
        match id {
            ButtonId::Play => self.enter(Screen::Play),
            ButtonId::Options => self.enter(Screen::Options),
            ButtonId::LeaderBoard => self.enter(Screen::LeaderBoard),
            ButtonId::Exit => self.enter(Screen::Exit),
            ButtonId::Back => self.enter(Screen::Main),
            ButtonId::SlotPlay(slot) => {
                // Empty slots open the name dialog inside the panel instead.
                if self.saves.slot(slot).is_some_and(|s| !s.is_empty()) {
                    info!("[menu] Starting game from slot {slot}");
                    self.effects.push(Effect::StartGame(slot));
                }
            }
            ButtonId::SlotDelete(slot) => {
                let _ = self.saves.clear(slot);
                self.sync_slot(slot);
            }
            ButtonId::Accept | ButtonId::Cancel => {}
        }
    }

    fn sync_slot(&mut self, index: usize) {
        if let (Layout::Play(panel), Some(slot)) = (&mut self.layout, self.saves.slot(index)) {
            panel.set_slot(index, slot.clone());
        }
    }

    /// Advance timers by `elapsed_ms`.  The background only moves while the
    /// `animated_background` setting is on.
    pub fn tick(&mut self, elapsed_ms: u64) {
        if self.config.animated_background() {
            self.background.tick(elapsed_ms);
        }
    }

    /// Describe the current frame.
    pub fn render(&self) -> DrawList {
        let mut list = DrawList::new();
        let res = self.config.resolution();
        let full = Rect::new(0.0, 0.0, res.width() as f32, res.height() as f32);
        match self.background.current() {
            Some(frame) => list.image(frame, full),
            None => list.fill(full, Color::MENU_BG),
        }

        let ctx = DrawContext { pointer: self.pointer, settings: self.snapshot() };
        self.layout.draw(&ctx, &mut list);
        list
    }

    /// Take every effect queued since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}
