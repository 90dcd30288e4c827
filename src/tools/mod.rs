use egui::{Modifiers, Pos2};

use crate::state::EditorModel;

/// Tool trait defines the interface for canvas tools
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Called when the tool is selected (activated).
    fn activate(&mut self, _model: &mut EditorModel) {
        // default: do nothing
    }

    /// Called when the tool is deselected. Any gesture in progress is abandoned.
    fn deactivate(&mut self, model: &mut EditorModel);

    /// Handle pointer press on the canvas
    fn on_pointer_down(&mut self, pos: Pos2, modifiers: Modifiers, model: &mut EditorModel);

    /// Handle pointer movement while the pointer is held down
    fn on_pointer_move(&mut self, pos: Pos2, modifiers: Modifiers, model: &mut EditorModel);

    /// Handle pointer release; this is where a gesture is committed
    fn on_pointer_up(&mut self, pos: Pos2, modifiers: Modifiers, model: &mut EditorModel);
}

mod selection_tool;
pub use selection_tool::{SelectionState, SelectionTool, mode_for_modifiers};
