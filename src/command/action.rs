use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::record::ActionRecord;
use crate::util::time;

/// Category of a history entry, recorded for display and serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    AddElement,
    RemoveElement,
    ModifyElement,
    MoveElement,
    ResizeElement,
    ChangeProperty,
    GroupElements,
    UngroupElements,
    SetBackground,
    ClearCanvas,
    /// An action group
    CompositeAction,
}

/// A reversible mutation of some context `C`.
///
/// Implementations capture only what they need (old value, new value, target
/// id). Calling `undo` then `redo` must restore the exact prior state; the
/// history engine trusts this and never checks it.
pub trait Command<C> {
    fn undo(&mut self, ctx: &mut C);
    fn redo(&mut self, ctx: &mut C);
}

/// Adapter turning a pair of closures into a [`Command`]
pub struct FnCommand<U, R> {
    undo: U,
    redo: R,
}

impl<U, R> FnCommand<U, R> {
    pub fn new(undo: U, redo: R) -> Self {
        Self { undo, redo }
    }
}

impl<C, U, R> Command<C> for FnCommand<U, R>
where
    U: FnMut(&mut C),
    R: FnMut(&mut C),
{
    fn undo(&mut self, ctx: &mut C) {
        (self.undo)(ctx)
    }

    fn redo(&mut self, ctx: &mut C) {
        (self.redo)(ctx)
    }
}

enum ActionBody<C> {
    Single(Box<dyn Command<C>>),
    /// Children in append order
    Group(Vec<Action<C>>),
}

/// One entry of the undo/redo history: either a single command or a group
/// of child actions that undo and redo as a unit.
pub struct Action<C> {
    id: String,
    kind: ActionKind,
    description: String,
    metadata: BTreeMap<String, String>,
    timestamp: f64,
    body: ActionBody<C>,
}

impl<C> std::fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("Action");
        s.field("id", &self.id)
            .field("kind", &self.kind)
            .field("description", &self.description)
            .field("metadata", &self.metadata)
            .field("timestamp", &self.timestamp);
        match &self.body {
            ActionBody::Single(_) => s.field("command", &"<command>"),
            ActionBody::Group(children) => s.field("actions", children),
        };
        s.finish()
    }
}

impl<C> Action<C> {
    /// Wrap a command into a history entry
    pub fn new(
        kind: ActionKind,
        description: impl Into<String>,
        command: impl Command<C> + 'static,
    ) -> Self {
        Self::with_body(kind, description.into(), ActionBody::Single(Box::new(command)))
    }

    /// Build an action from an undo closure and a redo closure
    pub fn from_fns(
        kind: ActionKind,
        description: impl Into<String>,
        undo: impl FnMut(&mut C) + 'static,
        redo: impl FnMut(&mut C) + 'static,
    ) -> Self {
        Self::new(kind, description, FnCommand::new(undo, redo))
    }

    /// An empty, open action group
    pub(crate) fn group(kind: ActionKind, description: impl Into<String>) -> Self {
        Self::with_body(kind, description.into(), ActionBody::Group(Vec::new()))
    }

    fn with_body(kind: ActionKind, description: String, body: ActionBody<C>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            description,
            metadata: BTreeMap::new(),
            timestamp: time::current_time_secs(),
            body,
        }
    }

    /// Attach a descriptive key/value pair. Only available before the action
    /// is handed to the history.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Creation time in seconds since the UNIX epoch
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn is_group(&self) -> bool {
        matches!(self.body, ActionBody::Group(_))
    }

    /// Child actions of a group, in append order. Empty for single actions.
    pub fn children(&self) -> &[Action<C>] {
        match &self.body {
            ActionBody::Group(children) => children,
            ActionBody::Single(_) => &[],
        }
    }

    /// Append to an open group; single actions ignore this
    pub(crate) fn push_child(&mut self, action: Action<C>) {
        if let ActionBody::Group(children) = &mut self.body {
            children.push(action);
        }
    }

    /// Groups undo their children last-to-first
    pub(crate) fn undo(&mut self, ctx: &mut C) {
        match &mut self.body {
            ActionBody::Single(command) => command.undo(ctx),
            ActionBody::Group(children) => {
                for child in children.iter_mut().rev() {
                    child.undo(ctx);
                }
            }
        }
    }

    /// Groups redo their children first-to-last
    pub(crate) fn redo(&mut self, ctx: &mut C) {
        match &mut self.body {
            ActionBody::Single(command) => command.redo(ctx),
            ActionBody::Group(children) => {
                for child in children.iter_mut() {
                    child.redo(ctx);
                }
            }
        }
    }

    /// Descriptive record of this action; groups include their children
    pub fn to_record(&self) -> ActionRecord {
        ActionRecord {
            id: self.id.clone(),
            kind: self.kind,
            description: self.description.clone(),
            timestamp: self.timestamp,
            metadata: self.metadata.clone(),
            actions: match &self.body {
                ActionBody::Single(_) => None,
                ActionBody::Group(children) => {
                    Some(children.iter().map(Action::to_record).collect())
                }
            },
        }
    }
}
