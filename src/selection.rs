use std::collections::{BTreeMap, BTreeSet};

use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::document::Document;
use crate::element::Element;
use crate::event::{EditorEvent, EventBus, EventHandler, SelectionEvent};
use crate::geometry::hit_testing;
use crate::id_generator::ShapeId;
use crate::util::time;

/// How a set of shapes combines with the current selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SelectionMode {
    /// Only the first of the given shapes
    Single,
    /// Exactly the given shapes
    #[default]
    Replace,
    /// Union with the current selection
    Add,
    /// Flip membership of each given shape
    Toggle,
    /// Remove the given shapes from the current selection
    Subtract,
}

/// An immutable copy of a selection set
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSnapshot {
    elements: BTreeSet<ShapeId>,
    /// Seconds since the UNIX epoch
    created: f64,
}

impl SelectionSnapshot {
    fn new(elements: BTreeSet<ShapeId>) -> Self {
        Self {
            elements,
            created: time::current_time_secs(),
        }
    }

    pub fn elements(&self) -> &BTreeSet<ShapeId> {
        &self.elements
    }

    pub fn created(&self) -> f64 {
        self.created
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Marquee {
    start: Pos2,
    current: Pos2,
}

impl Marquee {
    fn rect(&self) -> Rect {
        Rect::from_two_pos(self.start, self.current)
    }
}

/// The set of selected shapes plus everything needed to change it.
///
/// This is the only writer of each shape's `selected` flag. Every committed
/// change is recorded as a snapshot in a bounded linear history that
/// `undo_selection`/`redo_selection` walk without appending to it.
pub struct SelectionModel {
    current: BTreeSet<ShapeId>,
    mode: SelectionMode,
    history: Vec<SelectionSnapshot>,
    history_index: usize,
    max_history: usize,
    named_groups: BTreeMap<String, SelectionSnapshot>,
    marquee: Option<Marquee>,
    indicator: Option<Rect>,
    hit_tolerance: f32,
    indicator_padding: f32,
    event_bus: EventBus,
}

impl std::fmt::Debug for SelectionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionModel")
            .field("current", &self.current)
            .field("mode", &self.mode)
            .field("history_len", &self.history.len())
            .field("history_index", &self.history_index)
            .field("named_groups", &self.named_groups.keys().collect::<Vec<_>>())
            .field("marquee", &self.marquee)
            .field("indicator", &self.indicator)
            .finish()
    }
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl SelectionModel {
    /// Creates an empty selection whose history holds one empty snapshot
    pub fn new(config: &EditorConfig) -> Self {
        log::info!("Selection model initialized");
        Self {
            current: BTreeSet::new(),
            mode: SelectionMode::default(),
            history: vec![SelectionSnapshot::new(BTreeSet::new())],
            history_index: 0,
            max_history: config.max_selection_history.max(1),
            named_groups: BTreeMap::new(),
            marquee: None,
            indicator: None,
            hit_tolerance: config.hit_tolerance,
            indicator_padding: config.selection_indicator_padding,
            event_bus: EventBus::new(),
        }
    }

    /// Subscribe a handler to [`EditorEvent::SelectionChanged`] notifications
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    fn emit(&self, event: SelectionEvent) {
        self.event_bus.emit(EditorEvent::SelectionChanged(event));
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.mode
    }

    /// Mode used by marquee selection
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        if self.mode == mode {
            return;
        }
        log::debug!("Selection mode changed: {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.emit(SelectionEvent::ModeChanged(mode));
    }

    /// Combine `shapes` with the current selection according to `mode`.
    ///
    /// Shapes that are not in the document are ignored. Returns whether the
    /// selection changed; an unchanged result records nothing and emits nothing.
    pub fn select(&mut self, doc: &mut Document, shapes: &[ShapeId], mode: SelectionMode) -> bool {
        let mut seen = BTreeSet::new();
        let shapes: Vec<ShapeId> = shapes
            .iter()
            .copied()
            .filter(|id| doc.contains(*id) && seen.insert(*id))
            .collect();

        let next: BTreeSet<ShapeId> = match mode {
            SelectionMode::Single => shapes.first().copied().into_iter().collect(),
            SelectionMode::Replace => shapes.into_iter().collect(),
            SelectionMode::Add => self.current.iter().copied().chain(shapes).collect(),
            SelectionMode::Toggle => {
                let mut next = self.current.clone();
                for id in shapes {
                    if !next.remove(&id) {
                        next.insert(id);
                    }
                }
                next
            }
            SelectionMode::Subtract => {
                let mut next = self.current.clone();
                for id in &shapes {
                    next.remove(id);
                }
                next
            }
        };

        self.commit(doc, next)
    }

    /// Flip membership of one shape
    pub fn toggle_element(&mut self, doc: &mut Document, id: ShapeId) -> bool {
        self.select(doc, &[id], SelectionMode::Toggle)
    }

    pub fn select_all(&mut self, doc: &mut Document) -> bool {
        let all: Vec<ShapeId> = doc.elements().iter().map(|element| element.id()).collect();
        self.select(doc, &all, SelectionMode::Replace)
    }

    pub fn deselect_all(&mut self, doc: &mut Document) -> bool {
        self.select(doc, &[], SelectionMode::Replace)
    }

    fn commit(&mut self, doc: &mut Document, next: BTreeSet<ShapeId>) -> bool {
        if next == self.current {
            log::debug!("Selection unchanged");
            return false;
        }

        self.apply_flags(doc, &next);
        self.current = next;
        self.push_snapshot();
        self.update_indicator(doc);
        log::debug!("Selection changed: {} selected", self.current.len());
        self.emit(SelectionEvent::Changed {
            count: self.current.len(),
        });
        true
    }

    fn apply_flags(&self, doc: &mut Document, next: &BTreeSet<ShapeId>) {
        for id in self.current.difference(next) {
            if let Some(element) = doc.find_element_by_id_mut(*id) {
                element.set_selected(false);
            }
        }
        for id in next.difference(&self.current) {
            if let Some(element) = doc.find_element_by_id_mut(*id) {
                element.set_selected(true);
            }
        }
    }

    fn push_snapshot(&mut self) {
        self.history.truncate(self.history_index + 1);
        self.history.push(SelectionSnapshot::new(self.current.clone()));
        self.history_index = self.history.len() - 1;

        if self.history.len() > self.max_history {
            self.history.remove(0);
            self.history_index -= 1;
        }
    }

    fn update_indicator(&mut self, doc: &Document) {
        self.indicator = if self.current.len() > 1 {
            doc.elements()
                .iter()
                .filter(|element| self.current.contains(&element.id()))
                .map(|element| element.scene_rect())
                .reduce(|acc, rect| acc.union(rect))
                .map(|bounds| bounds.expand(self.indicator_padding))
        } else {
            None
        };
        self.emit(SelectionEvent::FeedbackUpdated {
            bounds: self.indicator,
        });
    }

    /// Apply a history snapshot without appending to the history
    fn replay(&mut self, doc: &mut Document, index: usize) {
        self.history_index = index;
        let next: BTreeSet<ShapeId> = self.history[index]
            .elements
            .iter()
            .copied()
            .filter(|id| doc.contains(*id))
            .collect();

        self.apply_flags(doc, &next);
        self.current = next;
        self.update_indicator(doc);
        self.emit(SelectionEvent::Changed {
            count: self.current.len(),
        });
    }

    /// Step back to the previous selection. Returns `false` at the oldest snapshot.
    pub fn undo_selection(&mut self, doc: &mut Document) -> bool {
        if !self.can_undo_selection() {
            log::debug!("No selection to undo");
            return false;
        }
        self.replay(doc, self.history_index - 1);
        true
    }

    /// Step forward to the next selection. Returns `false` at the newest snapshot.
    pub fn redo_selection(&mut self, doc: &mut Document) -> bool {
        if !self.can_redo_selection() {
            log::debug!("No selection to redo");
            return false;
        }
        self.replay(doc, self.history_index + 1);
        true
    }

    pub fn can_undo_selection(&self) -> bool {
        self.history_index > 0
    }

    pub fn can_redo_selection(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }

    /// Begin a drag-selection rectangle at `point`
    pub fn start_marquee(&mut self, point: Pos2) {
        log::debug!("Marquee started at {:?}", point);
        self.marquee = Some(Marquee {
            start: point,
            current: point,
        });
    }

    /// Move the free corner of the marquee. Ignored when no marquee is active.
    pub fn update_marquee(&mut self, point: Pos2) {
        if let Some(marquee) = self.marquee.as_mut() {
            marquee.current = point;
        }
    }

    /// Abandon the active marquee without selecting anything
    pub fn cancel_marquee(&mut self) {
        if self.marquee.take().is_some() {
            log::debug!("Marquee cancelled");
        }
    }

    /// Normalized marquee rectangle, if a marquee is active
    pub fn marquee_rect(&self) -> Option<Rect> {
        self.marquee.map(|marquee| marquee.rect())
    }

    /// Select everything under the marquee using the current mode.
    ///
    /// A marquee too small to be a drag is treated as a click at its center.
    /// Returns whether the selection changed.
    pub fn finish_marquee(&mut self, doc: &mut Document) -> bool {
        let Some(marquee) = self.marquee.take() else {
            log::debug!("finish_marquee called without an active marquee");
            return false;
        };
        let rect = marquee.rect();
        let found = hit_testing::elements_in_rect(doc.elements(), rect, self.hit_tolerance);
        log::debug!("Marquee {:?} found {} elements", rect, found.len());
        self.select(doc, &found, self.mode)
    }

    /// Topmost shape whose geometry is hit at a scene point
    pub fn element_at_point(&self, doc: &Document, point: Pos2) -> Option<ShapeId> {
        hit_testing::element_at_point(doc.elements(), point, self.hit_tolerance)
    }

    /// Selected shape ids in ascending id order
    pub fn current_selection(&self) -> Vec<ShapeId> {
        self.current.iter().copied().collect()
    }

    pub fn selection_count(&self) -> usize {
        self.current.len()
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.current.contains(&id)
    }

    /// Padded bounds around a multi-selection; `None` for zero or one shape
    pub fn selection_indicator(&self) -> Option<Rect> {
        self.indicator
    }

    pub fn hit_tolerance(&self) -> f32 {
        self.hit_tolerance
    }

    /// Store the current selection under `name`, replacing any group of that
    /// name. Does nothing for an empty name or an empty selection.
    pub fn save_selection(&mut self, name: &str) {
        if name.is_empty() || self.current.is_empty() {
            return;
        }
        log::debug!("Saved selection '{}' with {} elements", name, self.current.len());
        self.named_groups
            .insert(name.to_string(), SelectionSnapshot::new(self.current.clone()));
    }

    /// Replace the selection with a named group. Returns whether the group exists.
    pub fn restore_selection(&mut self, doc: &mut Document, name: &str) -> bool {
        let Some(group) = self.named_groups.get(name) else {
            return false;
        };
        let ids: Vec<ShapeId> = group.elements.iter().copied().collect();
        self.select(doc, &ids, SelectionMode::Replace);
        true
    }

    pub fn delete_named_group(&mut self, name: &str) -> bool {
        self.named_groups.remove(name).is_some()
    }

    /// Names of all saved groups, sorted
    pub fn named_groups(&self) -> Vec<String> {
        self.named_groups.keys().cloned().collect()
    }

    /// Recompute the indicator after selected shapes moved or changed size
    pub(crate) fn refresh_indicator(&mut self, doc: &Document) {
        if self.current.len() > 1 || self.indicator.is_some() {
            self.update_indicator(doc);
        }
    }

    /// Drop selected ids that left the document and clear stale flags on
    /// shapes that came back without being selected
    pub(crate) fn sync_with_document(&mut self, doc: &mut Document) {
        for element in doc.elements_mut() {
            if element.is_selected() && !self.current.contains(&element.id()) {
                element.set_selected(false);
            }
        }

        let stale: Vec<ShapeId> = self
            .current
            .iter()
            .copied()
            .filter(|id| !doc.contains(*id))
            .collect();
        if !stale.is_empty() {
            let next = self
                .current
                .iter()
                .copied()
                .filter(|id| !stale.contains(id))
                .collect();
            self.commit(doc, next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;

    fn doc_with(n: usize) -> (Document, Vec<ShapeId>) {
        let mut doc = Document::new();
        let ids = (0..n)
            .map(|i| {
                let min = Pos2::new(i as f32 * 20.0, 0.0);
                doc.add_element(factory::create_rectangle(Rect::from_min_size(
                    min,
                    egui::vec2(10.0, 10.0),
                )))
            })
            .collect();
        (doc, ids)
    }

    #[test]
    fn history_is_bounded_with_index_shift() {
        let config = EditorConfig {
            max_selection_history: 3,
            ..EditorConfig::default()
        };
        let mut selection = SelectionModel::new(&config);
        let (mut doc, ids) = doc_with(5);
        for id in &ids {
            selection.select(&mut doc, &[*id], SelectionMode::Replace);
        }
        assert_eq!(selection.history.len(), 3);
        assert_eq!(selection.history_index, 2);
        assert!(selection.undo_selection(&mut doc));
        assert!(selection.undo_selection(&mut doc));
        assert!(!selection.undo_selection(&mut doc));
        assert_eq!(selection.current_selection(), vec![ids[2]]);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut selection = SelectionModel::default();
        let (mut doc, _) = doc_with(1);
        let ghost = factory::create_line(Pos2::ZERO, Pos2::new(1.0, 1.0)).id();
        assert!(!selection.select(&mut doc, &[ghost], SelectionMode::Add));
        assert_eq!(selection.selection_count(), 0);
    }
}
