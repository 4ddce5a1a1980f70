use glam::Vec2;

use super::widgets::{Button, ButtonSet, TextInputDialog};
use super::{Action, Anchor, ButtonId, Color, DrawContext, DrawList, FontSpec, Widget};
use crate::geometry::Rect;
use crate::input::InputEvent;
use crate::saves::{SaveSlot, SLOT_COUNT};

const NAME_FONT: FontSpec = FontSpec::menu(60);
const LEVEL_FONT: FontSpec = FontSpec::menu(24);
const SLOT_SPACING: f32 = 30.0;

/// Pixel sizes of every image the panel lays out.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanelSizes {
    pub board: Vec2,
    pub frame: Vec2,
    pub avatar: Vec2,
    pub level_bar: Vec2,
    pub slot_button: Vec2,
    pub back_button: Vec2,
    pub dialog: Vec2,
    pub input: Vec2,
    pub dialog_button: Vec2,
}

/// Decoration rectangles of one slot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlotView {
    pub frame: Rect,
    pub avatar: Rect,
    pub level_bar: Rect,
    pub name_center: Vec2,
}

/// Save-slot selection: three slots with play/delete buttons, a back button
/// and the name dialog shown when an empty slot is played.
#[derive(Clone, Debug)]
pub struct ProgressPanel {
    pub board: Rect,
    views: Vec<SlotView>,
    slots: [SaveSlot; SLOT_COUNT],
    buttons: ButtonSet,
    dialog: TextInputDialog,
    pending: Option<usize>,
}

impl ProgressPanel {
    pub fn new(screen: Vec2, sizes: &PanelSizes, slots: &[SaveSlot; SLOT_COUNT]) -> Self {
        let center = screen * 0.5;
        let board = Rect::from_center(center, sizes.board);
        let mut buttons = ButtonSet::new();
        let mut views = Vec::with_capacity(SLOT_COUNT);

        for i in 0..SLOT_COUNT {
            let top = board.top() + 40.0 + i as f32 * (sizes.frame.y + SLOT_SPACING);
            let frame = Rect::from_size(Vec2::new(board.left() + 55.0, top), sizes.frame);
            let avatar = Rect::from_size(frame.top_left() + Vec2::new(35.0, 35.0), sizes.avatar);
            let level_bar = Rect::new(
                frame.center().x - sizes.level_bar.x * 0.5,
                avatar.center().y - 20.0,
                sizes.level_bar.x,
                sizes.level_bar.y,
            );
            let name_center = Vec2::new(level_bar.center().x, level_bar.top() - 30.0);

            let button_x = frame.right() - sizes.slot_button.x - 72.0;
            let play = Rect::from_size(Vec2::new(button_x, frame.top() + 40.0), sizes.slot_button);
            let delete = Rect::from_size(Vec2::new(button_x, play.bottom() + 15.0), sizes.slot_button);
            buttons.push(Button::new(ButtonId::SlotPlay(i), "ui/loads/play", play));
            buttons.push(Button::new(ButtonId::SlotDelete(i), "ui/loads/delete", delete));

            views.push(SlotView { frame, avatar, level_bar, name_center });
        }

        let back = Rect::from_midbottom(Vec2::new(center.x, board.bottom() - 40.0), sizes.back_button);
        buttons.push(Button::new(ButtonId::Back, "ui/loads/back", back));

        let dialog = TextInputDialog::new("Choose your name", center, sizes.dialog, sizes.input, sizes.dialog_button);

        Self { board, views, slots: slots.clone(), buttons, dialog, pending: None }
    }

    pub fn views(&self) -> &[SlotView] { &self.views }
    pub fn buttons(&self) -> &ButtonSet { &self.buttons }
    pub fn dialog(&self) -> &TextInputDialog { &self.dialog }
    pub fn is_dialog_active(&self) -> bool { self.dialog.is_active() }
    /// Slot whose name is being entered.
    pub fn pending_slot(&self) -> Option<usize> { self.pending }

    pub fn slot(&self, index: usize) -> Option<&SaveSlot> {
        self.slots.get(index)
    }

    /// Mirror a slot change made in the save book.
    pub fn set_slot(&mut self, index: usize, slot: SaveSlot) {
        if let Some(s) = self.slots.get_mut(index) {
            *s = slot;
        }
    }
}

impl Widget for ProgressPanel {
    fn rect(&self) -> Rect { self.board }

    fn handle_event(&mut self, event: &InputEvent) -> Option<Action> {
        if self.dialog.is_active() {
            return match self.dialog.handle_event(event)? {
                Action::DialogAccepted(name) => {
                    let slot = self.pending.take()?;
                    Some(Action::NameAccepted { slot, name })
                }
                Action::DialogCancelled => {
                    self.pending = None;
                    Some(Action::NameCancelled)
                }
                other => Some(other),
            };
        }

        let action = self.buttons.handle_event(event)?;
        if let Action::Clicked(ButtonId::SlotPlay(i)) = action {
            if self.slots.get(i).is_some_and(SaveSlot::is_empty) {
                self.pending = Some(i);
                self.dialog.open();
            }
        }
        Some(action)
    }

    fn draw(&self, ctx: &DrawContext, list: &mut DrawList) {
        list.image("ui/loads/select_progress_board", self.board);

        for (view, slot) in self.views.iter().zip(&self.slots) {
            list.image("ui/loads/progress_frame_empty", view.frame);
            list.image("ui/loads/avatar", view.avatar);
            list.image("ui/loads/level_bar", view.level_bar);

            let (name, level) = match &slot.name {
                Some(name) => (name.clone(), format!("LEVEL {}", slot.level)),
                None => ("EMPTY".to_string(), "NEW GAME".to_string()),
            };
            list.text(name, NAME_FONT, Color::LIGHT, view.name_center, Anchor::Center);
            list.text(level, LEVEL_FONT, Color::LIGHT, view.level_bar.center(), Anchor::Center);
        }

        self.buttons.draw(ctx, list);
        self.dialog.draw(ctx, list);
    }
}
