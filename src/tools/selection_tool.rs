use egui::{Modifiers, Pos2, Vec2};
use log::debug;

use crate::selection::SelectionMode;
use crate::state::EditorModel;
use crate::tools::Tool;

/// Gesture currently driven by the selection tool
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionState {
    Idle,
    /// Drag-selecting from empty canvas
    Marquee { start: Pos2 },
    /// Dragging the selected shapes; nothing is moved until release
    Dragging { start: Pos2, current: Pos2 },
}

/// Selection mode implied by held modifier keys, or `None` for a plain press
pub fn mode_for_modifiers(modifiers: Modifiers) -> Option<SelectionMode> {
    if modifiers.shift {
        Some(SelectionMode::Add)
    } else if modifiers.command {
        Some(SelectionMode::Toggle)
    } else if modifiers.alt {
        Some(SelectionMode::Subtract)
    } else {
        None
    }
}

/// Turns pointer gestures into selection changes and grouped moves.
///
/// Pressing on a shape selects it and starts a drag; releasing after the
/// pointer moved records one move of the whole selection. Pressing on empty
/// canvas starts a marquee that selects on release.
#[derive(Debug, Clone)]
pub struct SelectionTool {
    state: SelectionState,
}

impl Default for SelectionTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionTool {
    pub fn new() -> Self {
        Self {
            state: SelectionState::Idle,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Offset of an in-progress drag, for previewing the move
    pub fn drag_offset(&self) -> Option<Vec2> {
        match self.state {
            SelectionState::Dragging { start, current } => Some(current - start),
            _ => None,
        }
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &'static str {
        "Selection"
    }

    fn deactivate(&mut self, model: &mut EditorModel) {
        if let SelectionState::Marquee { .. } = self.state {
            model.cancel_marquee();
        }
        self.state = SelectionState::Idle;
    }

    fn on_pointer_down(&mut self, pos: Pos2, modifiers: Modifiers, model: &mut EditorModel) {
        let mode = mode_for_modifiers(modifiers);

        let Some(id) = model.element_at_point(pos) else {
            debug!("Starting marquee at {:?}", pos);
            model.set_selection_mode(mode.unwrap_or(SelectionMode::Replace));
            model.start_marquee(pos);
            self.state = SelectionState::Marquee { start: pos };
            return;
        };

        match mode {
            // A plain press on a selected shape keeps the selection so it can be dragged
            None if model.selection().is_selected(id) => {}
            None => {
                model.select(&[id], SelectionMode::Replace);
            }
            Some(mode) => {
                model.select(&[id], mode);
            }
        }

        self.state = if model.selection().is_selected(id) {
            debug!("Starting drag of {} selected elements", model.selection().selection_count());
            SelectionState::Dragging {
                start: pos,
                current: pos,
            }
        } else {
            SelectionState::Idle
        };
    }

    fn on_pointer_move(&mut self, pos: Pos2, _modifiers: Modifiers, model: &mut EditorModel) {
        match &mut self.state {
            SelectionState::Dragging { current, .. } => *current = pos,
            SelectionState::Marquee { .. } => model.update_marquee(pos),
            SelectionState::Idle => {}
        }
    }

    fn on_pointer_up(&mut self, pos: Pos2, _modifiers: Modifiers, model: &mut EditorModel) {
        match self.state {
            SelectionState::Dragging { start, .. } => {
                let delta = pos - start;
                if delta != Vec2::ZERO {
                    model.move_selected(delta);
                }
            }
            SelectionState::Marquee { start } => {
                model.update_marquee(pos);
                let changed = model.finish_marquee();
                debug!("Marquee from {:?} to {:?} changed selection: {}", start, pos, changed);
            }
            SelectionState::Idle => {}
        }
        self.state = SelectionState::Idle;
    }
}
