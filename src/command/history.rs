use std::collections::{HashSet, VecDeque};

use super::record::{HistoryEntry, HistorySnapshot};
use super::{Action, ActionKind};
use crate::event::{EditorEvent, EventBus, EventHandler};
use crate::util::time;

/// Default bound on the undo stack
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Outcome of [`HistoryManager::end_action_group`]
pub enum ClosedGroup<'a, C> {
    /// The group had children and is now the newest undo entry
    Pushed(&'a Action<C>),
    /// The group was empty and was dropped
    Discarded(Action<C>),
}

impl<C> ClosedGroup<'_, C> {
    pub fn action(&self) -> &Action<C> {
        match self {
            ClosedGroup::Pushed(action) => action,
            ClosedGroup::Discarded(action) => action,
        }
    }

    pub fn is_pushed(&self) -> bool {
        matches!(self, ClosedGroup::Pushed(_))
    }
}

/// Undo/redo history over reversible actions that mutate a context `C`.
///
/// The undo stack holds at most `max_history` entries; the oldest are evicted
/// first. At most one action group is open at a time, and while it is open
/// every added action becomes one of its children instead of a stack entry.
pub struct HistoryManager<C> {
    /// Oldest at the front, most recent at the back
    undo_stack: VecDeque<Action<C>>,
    /// Most recently undone at the back
    redo_stack: Vec<Action<C>>,
    max_history: usize,
    current_group: Option<Action<C>>,
    /// Ids of every top-level action on either stack
    id_index: HashSet<String>,
    event_bus: EventBus,
}

impl<C> std::fmt::Debug for HistoryManager<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryManager")
            .field("undo_stack", &self.undo_stack.len())
            .field("redo_stack", &self.redo_stack.len())
            .field("max_history", &self.max_history)
            .field("group_open", &self.current_group.is_some())
            .field("event_bus", &self.event_bus)
            .finish()
    }
}

impl<C> Default for HistoryManager<C> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl<C> HistoryManager<C> {
    /// Creates a new empty history. A bound of zero is raised to one.
    pub fn new(max_history: usize) -> Self {
        let max_history = max_history.max(1);
        log::info!("History manager initialized with max history size: {}", max_history);
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_history,
            current_group: None,
            id_index: HashSet::new(),
            event_bus: EventBus::new(),
        }
    }

    /// Subscribe a handler to [`EditorEvent::HistoryChanged`] notifications
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    /// Register a callback receiving `(can_undo, can_redo)` after every
    /// history operation
    pub fn register_action_listener(&self, mut listener: impl FnMut(bool, bool) + 'static) {
        self.event_bus.subscribe(Box::new(move |event: &EditorEvent| {
            if let EditorEvent::HistoryChanged { can_undo, can_redo } = event {
                listener(*can_undo, *can_redo);
            }
        }));
    }

    fn notify_listeners(&self) {
        self.event_bus.emit(EditorEvent::HistoryChanged {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        });
    }

    /// Record an action that has already been applied.
    ///
    /// With a group open the action joins that group; otherwise it is pushed
    /// onto the undo stack and the redo stack is cleared. Listeners are
    /// notified once either way.
    pub fn add_action(&mut self, action: Action<C>) {
        if let Some(group) = self.current_group.as_mut() {
            log::debug!(
                "Added action to group '{}': {}",
                group.description(),
                action.description()
            );
            group.push_child(action);
            self.notify_listeners();
            return;
        }
        self.push_action(action);
    }

    fn push_action(&mut self, action: Action<C>) {
        for discarded in self.redo_stack.drain(..) {
            self.id_index.remove(discarded.id());
        }

        log::info!("Added action to history: {}", action.description());
        self.id_index.insert(action.id().to_string());
        self.undo_stack.push_back(action);

        while self.undo_stack.len() > self.max_history {
            if let Some(evicted) = self.undo_stack.pop_front() {
                log::debug!("Evicted oldest action from history: {}", evicted.description());
                self.id_index.remove(evicted.id());
            }
        }

        self.notify_listeners();
    }

    /// Open a new action group, closing any group that is already open
    pub fn begin_action_group(&mut self, description: impl Into<String>) -> &Action<C> {
        self.begin_action_group_with_kind(ActionKind::CompositeAction, description)
    }

    /// Like [`Self::begin_action_group`], recording the group under `kind`
    pub fn begin_action_group_with_kind(
        &mut self,
        kind: ActionKind,
        description: impl Into<String>,
    ) -> &Action<C> {
        if self.current_group.is_some() {
            self.end_action_group();
        }
        let group = self.current_group.insert(Action::group(kind, description));
        log::info!("Began action group: {}", group.description());
        group
    }

    /// Close the open group. Returns `None` if no group was open.
    ///
    /// A group with children is pushed like any other action and handed back
    /// as [`ClosedGroup::Pushed`]. An empty group never reaches the stack; it
    /// is handed back by value as [`ClosedGroup::Discarded`].
    pub fn end_action_group(&mut self) -> Option<ClosedGroup<'_, C>> {
        let group = self.current_group.take()?;
        if group.children().is_empty() {
            log::debug!("Discarded empty action group: {}", group.description());
            return Some(ClosedGroup::Discarded(group));
        }

        log::info!(
            "Ended action group '{}' with {} actions",
            group.description(),
            group.children().len()
        );
        self.push_action(group);
        self.undo_stack.back().map(ClosedGroup::Pushed)
    }

    /// Undo the most recent action.
    ///
    /// Closes an open group first. Listeners are notified even when there is
    /// nothing to undo.
    pub fn undo(&mut self, ctx: &mut C) -> Option<&Action<C>> {
        self.end_action_group();

        let Some(mut action) = self.undo_stack.pop_back() else {
            log::debug!("No actions to undo");
            self.notify_listeners();
            return None;
        };

        action.undo(ctx);
        log::info!("Undid action: {}", action.description());
        self.redo_stack.push(action);
        self.notify_listeners();
        self.redo_stack.last()
    }

    /// Redo the most recently undone action.
    ///
    /// Closes an open group first, which also discards the redo stack if that
    /// group had children.
    pub fn redo(&mut self, ctx: &mut C) -> Option<&Action<C>> {
        self.end_action_group();

        let Some(mut action) = self.redo_stack.pop() else {
            log::debug!("No actions to redo");
            self.notify_listeners();
            return None;
        };

        action.redo(ctx);
        log::info!("Redid action: {}", action.description());
        self.undo_stack.push_back(action);
        self.notify_listeners();
        self.undo_stack.back()
    }

    /// Drop both stacks, the id index and any open group
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.id_index.clear();
        self.current_group = None;
        log::info!("History cleared");
        self.notify_listeners();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Description of the action `undo` would revert
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(Action::description)
    }

    /// Description of the action `redo` would reapply
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(Action::description)
    }

    /// Look up a top-level action on either stack
    pub fn action_by_id(&self, id: &str) -> Option<&Action<C>> {
        if !self.id_index.contains(id) {
            return None;
        }
        self.undo_stack
            .iter()
            .chain(self.redo_stack.iter())
            .find(|action| action.id() == id)
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    pub fn is_group_open(&self) -> bool {
        self.current_group.is_some()
    }

    /// Up to `count` most recent undo entries (newest first) followed by up to
    /// `count` redo entries (next to redo first)
    pub fn history_summary(&self, count: usize) -> Vec<HistoryEntry> {
        let undo = self.undo_stack.iter().rev().take(count).map(|action| HistoryEntry {
            id: action.id().to_string(),
            kind: action.kind(),
            description: action.description().to_string(),
            timestamp: action.timestamp(),
            can_undo: true,
            can_redo: false,
        });
        let redo = self.redo_stack.iter().rev().take(count).map(|action| HistoryEntry {
            id: action.id().to_string(),
            kind: action.kind(),
            description: action.description().to_string(),
            timestamp: action.timestamp(),
            can_undo: false,
            can_redo: true,
        });
        undo.chain(redo).collect()
    }

    /// Descriptive snapshot of both stacks. It cannot be replayed.
    pub fn serialize_history(&self) -> HistorySnapshot {
        HistorySnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: time::current_time_secs(),
            max_history: self.max_history,
            undo_stack: self.undo_stack.iter().map(Action::to_record).collect(),
            redo_stack: self.redo_stack.iter().map(Action::to_record).collect(),
        }
    }
}
