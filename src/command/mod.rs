mod action;
mod commands;
mod history;
mod record;

pub use action::{Action, ActionKind, Command, FnCommand};
pub use commands::{
    AddElement, ChangeProperty, MoveElement, RemoveElement, ReorderElement, ResizeElement,
    SetBackground,
};
pub use history::{ClosedGroup, DEFAULT_MAX_HISTORY, HistoryManager};
pub use record::{ActionRecord, HistoryEntry, HistorySnapshot};
