use egui::Rect;

use crate::selection::SelectionMode;

/// Notifications fanned out to UI subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Undo/redo availability after any history operation
    HistoryChanged { can_undo: bool, can_redo: bool },
    SelectionChanged(SelectionEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// The selected set changed
    Changed { count: usize },
    /// The aggregate bounds indicator was recomputed; `None` unless more than
    /// one shape is selected
    FeedbackUpdated { bounds: Option<Rect> },
    ModeChanged(SelectionMode),
}
