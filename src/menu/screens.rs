//! Per-screen widget sets.
//!
//! Every position is derived from the current resolution and the pixel sizes
//! of the images involved, so a layout is rebuilt whole whenever either
//! changes.  Missing images fall back to the fixed sizes below.

use glam::Vec2;

use super::Screen;
use crate::assets::AssetCache;
use crate::config::Resolution;
use crate::geometry::Rect;
use crate::input::InputEvent;
use crate::saves::SaveBook;
use crate::ui::progress::{PanelSizes, ProgressPanel};
use crate::ui::widgets::{Button, ButtonSet, Dropdown, Toggle, VolumeSlider, resolution_choices};
use crate::ui::{Action, Anchor, ButtonId, Color, DrawContext, DrawList, FontSpec, ToggleSetting, Widget};

const MENU_BUTTON: Vec2 = Vec2::new(240.0, 64.0);
const BACK_BUTTON: Vec2 = Vec2::new(200.0, 60.0);
const BOARD: Vec2 = Vec2::new(640.0, 520.0);
const VOLUME_BAR: Vec2 = Vec2::new(220.0, 28.0);
const TOGGLE: Vec2 = Vec2::new(64.0, 32.0);
const DROPDOWN: Vec2 = Vec2::new(220.0, 40.0);

const TITLE_FONT: FontSpec = FontSpec::menu(72);
const HEADING_FONT: FontSpec = FontSpec::menu(48);
const LABEL_FONT: FontSpec = FontSpec::menu(28);

const MAIN_BUTTONS_TOP: f32 = 0.38;
const MAIN_BUTTON_SPACING: f32 = 20.0;
const OPTION_ROW_HEIGHT: f32 = 80.0;

fn screen_size(resolution: Resolution) -> Vec2 {
    Vec2::new(resolution.width() as f32, resolution.height() as f32)
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct MainLayout {
    pub title_pos: Vec2,
    pub buttons: ButtonSet,
}

impl MainLayout {
    pub fn build(screen: Vec2, assets: &mut AssetCache) -> Self {
        let entries = [
            (ButtonId::Play, "buttons/play"),
            (ButtonId::Options, "buttons/options"),
            (ButtonId::LeaderBoard, "buttons/leaderboard"),
            (ButtonId::Exit, "buttons/exit"),
        ];

        let mut buttons = ButtonSet::new();
        let mut top = screen.y * MAIN_BUTTONS_TOP;
        for (id, image) in entries {
            let size = assets.size_or(&format!("{image}_default"), MENU_BUTTON);
            buttons.push(Button::new(id, image, Rect::from_size(Vec2::new((screen.x - size.x) * 0.5, top), size)));
            top += size.y + MAIN_BUTTON_SPACING;
        }

        Self { title_pos: Vec2::new(screen.x * 0.5, screen.y * 0.2), buttons }
    }

    fn draw(&self, ctx: &DrawContext, list: &mut DrawList) {
        list.text("MAIN MENU", TITLE_FONT, Color::LIGHT, self.title_pos, Anchor::Center);
        self.buttons.draw(ctx, list);
    }
}

// ── Options ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct OptionsLayout {
    pub board: Rect,
    pub labels: Vec<(&'static str, Vec2)>,
    pub volume: VolumeSlider,
    pub fullscreen: Toggle,
    pub animated_background: Toggle,
    pub resolution: Dropdown,
    pub buttons: ButtonSet,
}

impl OptionsLayout {
    pub fn build(screen: Vec2, assets: &mut AssetCache) -> Self {
        let center = screen * 0.5;
        let board = Rect::from_center(center, assets.size_or("ui/options_board", BOARD));
        let label_x = board.left() + 50.0;
        let control_x = board.center().x;
        let row_y = |i: usize| board.top() + 120.0 + i as f32 * OPTION_ROW_HEIGHT;
        // Control of `size` vertically centred on row `i`.
        let control = |i: usize, size: Vec2| Rect::from_size(Vec2::new(control_x, row_y(i) - size.y * 0.5), size);

        let labels = ["VOLUME", "FULLSCREEN", "ANIMATION", "RESOLUTION"]
            .into_iter()
            .enumerate()
            .map(|(i, label)| (label, Vec2::new(label_x, row_y(i) - 14.0)))
            .collect();

        let volume = VolumeSlider::new(control(0, assets.size_or("ui/volume_bar", VOLUME_BAR)));
        let toggle_size = assets.size_or("ui/toggle_on", TOGGLE);
        let fullscreen = Toggle::new(ToggleSetting::Fullscreen, "ui/toggle", control(1, toggle_size));
        let animated_background = Toggle::new(ToggleSetting::AnimatedBackground, "ui/toggle", control(2, toggle_size));
        let resolution = Dropdown::new(control(3, assets.size_or("ui/dropdown", DROPDOWN)), resolution_choices());

        let back_size = assets.size_or("buttons/back_default", BACK_BUTTON);
        let back = Rect::from_midbottom(Vec2::new(center.x, board.bottom() - 30.0), back_size);
        let buttons = ButtonSet::new().with(Button::new(ButtonId::Back, "buttons/back", back));

        Self { board, labels, volume, fullscreen, animated_background, resolution, buttons }
    }

    /// An open dropdown is an overlay and consumes every event.
    fn handle_event(&mut self, event: &InputEvent) -> Option<Action> {
        if self.resolution.is_open() {
            return self.resolution.handle_event(event);
        }
        self.resolution
            .handle_event(event)
            .or_else(|| self.volume.handle_event(event))
            .or_else(|| self.fullscreen.handle_event(event))
            .or_else(|| self.animated_background.handle_event(event))
            .or_else(|| self.buttons.handle_event(event))
    }

    fn draw(&self, ctx: &DrawContext, list: &mut DrawList) {
        list.image("ui/options_board", self.board);
        let title_pos = Vec2::new(self.board.center().x, self.board.top() + 50.0);
        list.text("OPTIONS", HEADING_FONT, Color::LIGHT, title_pos, Anchor::Center);
        for (label, pos) in &self.labels {
            list.text(*label, LABEL_FONT, Color::LIGHT, *pos, Anchor::TopLeft);
        }
        self.volume.draw(ctx, list);
        self.fullscreen.draw(ctx, list);
        self.animated_background.draw(ctx, list);
        self.buttons.draw(ctx, list);
        // Last, so the open list covers everything beneath it.
        self.resolution.draw(ctx, list);
    }
}

// ── Leader board ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct LeaderBoardLayout {
    pub board: Rect,
    /// `(name, level)`, highest level first.
    pub rows: Vec<(String, u32)>,
    pub buttons: ButtonSet,
}

impl LeaderBoardLayout {
    pub fn build(screen: Vec2, assets: &mut AssetCache, saves: &SaveBook) -> Self {
        let board = Rect::from_center(screen * 0.5, assets.size_or("ui/leaderboard_board", BOARD));
        let rows = saves
            .ranking()
            .into_iter()
            .filter_map(|(_, slot)| slot.name.clone().map(|name| (name, slot.level)))
            .collect();
        let back_size = assets.size_or("buttons/back_default", BACK_BUTTON);
        let back = Rect::from_midbottom(Vec2::new(board.center().x, board.bottom() - 30.0), back_size);
        let buttons = ButtonSet::new().with(Button::new(ButtonId::Back, "buttons/back", back));
        Self { board, rows, buttons }
    }

    fn draw(&self, ctx: &DrawContext, list: &mut DrawList) {
        list.image("ui/leaderboard_board", self.board);
        let x = self.board.center().x;
        list.text("LEADERBOARD", HEADING_FONT, Color::LIGHT, Vec2::new(x, self.board.top() + 50.0), Anchor::Center);

        if self.rows.is_empty() {
            list.text("NO SAVES YET", LABEL_FONT, Color::LIGHT, self.board.center(), Anchor::Center);
        }
        for (i, (name, level)) in self.rows.iter().enumerate() {
            let pos = Vec2::new(x, self.board.top() + 140.0 + i as f32 * 60.0);
            list.text(format!("{}. {name}  LEVEL {level}", i + 1), LABEL_FONT, Color::LIGHT, pos, Anchor::Center);
        }
        self.buttons.draw(ctx, list);
    }
}

// ── Play ──────────────────────────────────────────────────────────────────────

fn panel_sizes(assets: &mut AssetCache) -> PanelSizes {
    PanelSizes {
        board: assets.size_or("ui/loads/select_progress_board", Vec2::new(900.0, 720.0)),
        frame: assets.size_or("ui/loads/progress_frame_empty", Vec2::new(780.0, 160.0)),
        avatar: assets.size_or("ui/loads/avatar", Vec2::new(90.0, 90.0)),
        level_bar: assets.size_or("ui/loads/level_bar", Vec2::new(260.0, 36.0)),
        slot_button: assets.size_or("ui/loads/play_default", Vec2::new(150.0, 50.0)),
        back_button: assets.size_or("ui/loads/back_default", BACK_BUTTON),
        dialog: assets.size_or("ui/input_name_dialog", Vec2::new(520.0, 300.0)),
        input: assets.size_or("ui/input_bar", Vec2::new(360.0, 60.0)),
        dialog_button: assets.size_or("buttons/accept_default", Vec2::new(150.0, 50.0)),
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// The widget set of the current screen.
#[derive(Clone, Debug)]
pub enum Layout {
    Main(MainLayout),
    Options(OptionsLayout),
    Play(ProgressPanel),
    LeaderBoard(LeaderBoardLayout),
    /// `Exit` (and the unenterable `None`): nothing to show or press.
    Closed,
}

impl Layout {
    pub fn build(screen: Screen, resolution: Resolution, assets: &mut AssetCache, saves: &SaveBook) -> Self {
        let size = screen_size(resolution);
        match screen {
            Screen::Main => Self::Main(MainLayout::build(size, assets)),
            Screen::Options => Self::Options(OptionsLayout::build(size, assets)),
            Screen::Play => Self::Play(ProgressPanel::new(size, &panel_sizes(assets), saves.slots())),
            Screen::LeaderBoard => Self::LeaderBoard(LeaderBoardLayout::build(size, assets, saves)),
            Screen::Exit | Screen::None => Self::Closed,
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> Option<Action> {
        match self {
            Self::Main(l) => l.buttons.handle_event(event),
            Self::Options(l) => l.handle_event(event),
            Self::Play(panel) => panel.handle_event(event),
            Self::LeaderBoard(l) => l.buttons.handle_event(event),
            Self::Closed => None,
        }
    }

    pub fn draw(&self, ctx: &DrawContext, list: &mut DrawList) {
        match self {
            Self::Main(l) => l.draw(ctx, list),
            Self::Options(l) => l.draw(ctx, list),
            Self::Play(panel) => panel.draw(ctx, list),
            Self::LeaderBoard(l) => l.draw(ctx, list),
            Self::Closed => {}
        }
    }
}
