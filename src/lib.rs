#![warn(clippy::all, rust_2018_idioms)]

pub mod command;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod id_generator;
pub mod selection;
pub mod state;
pub mod tools;
pub mod util;

pub use command::{Action, ActionKind, Command, HistoryManager};
pub use config::EditorConfig;
pub use document::Document;
pub use element::{Element, ElementType};
pub use error::{ConfigError, ElementError, HistoryError};
pub use event::{EditorEvent, EventBus, EventHandler, SelectionEvent};
pub use geometry::HIT_TOLERANCE;
pub use id_generator::ShapeId;
pub use selection::{SelectionMode, SelectionModel};
pub use state::EditorModel;
pub use tools::{SelectionTool, Tool};
