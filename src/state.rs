//! The editing model that ties the document, its history and its selection together.
//!
//! Every mutating operation here applies its edit to the [`Document`] first and
//! then records a reversible [`Action`] describing it. Operations that touch
//! several shapes open an action group so they undo and redo as one step.
//!
//! # Selection consistency
//!
//! A shape is subtracted from the selection before it is removed, and after
//! every undo or redo the selection drops ids that are no longer in the
//! document. The selection model stays the only writer of `selected` flags.
//!
//! # Example
//!
//! ```rust,no_run
//! use vecdraw::{EditorModel, SelectionMode};
//! use vecdraw::element::factory;
//! use egui::{Pos2, Rect};
//!
//! let mut model = EditorModel::new();
//! let id = model.add_element(factory::create_rectangle(Rect::from_min_max(
//!     Pos2::ZERO,
//!     Pos2::new(100.0, 80.0),
//! )));
//! model.select(&[id], SelectionMode::Replace);
//! model.delete_selected();
//! model.undo();
//! ```
use egui::{Pos2, Rect, Vec2};

use crate::command::{
    Action, ActionKind, AddElement, ChangeProperty, HistoryManager, MoveElement, RemoveElement,
    ReorderElement, ResizeElement, SetBackground,
};
use crate::config::EditorConfig;
use crate::document::Document;
use crate::element::{Element, ElementType, Property};
use crate::error::ElementError;
use crate::id_generator::ShapeId;
use crate::selection::{SelectionMode, SelectionModel};

#[derive(Debug)]
pub struct EditorModel {
    document: Document,
    history: HistoryManager<Document>,
    selection: SelectionModel,
    config: EditorConfig,
}

impl Default for EditorModel {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorModel {
    /// Creates an empty model with the default configuration
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let config = config.sanitized();
        Self {
            document: Document::new(),
            history: HistoryManager::new(config.max_history),
            selection: SelectionModel::new(&config),
            config,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &HistoryManager<Document> {
        &self.history
    }

    /// For callers recording their own actions or opening their own groups
    pub fn history_mut(&mut self) -> &mut HistoryManager<Document> {
        &mut self.history
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ---- Document edits ----

    /// Add an element on top of the canvas
    pub fn add_element(&mut self, element: ElementType) -> ShapeId {
        let description = format!("Add {}", element.element_type());
        let id = self.document.add_element(element);
        let index = self.document.len() - 1;
        self.history.add_action(
            Action::new(ActionKind::AddElement, description, AddElement::new(id, index))
                .with_metadata("element_id", id.to_string()),
        );
        id
    }

    /// Remove one element. Returns `false` if it is not in the document.
    pub fn remove_element(&mut self, id: ShapeId) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        self.selection
            .select(&mut self.document, &[id], SelectionMode::Subtract);

        let Some((index, element)) = self.document.remove_element(id) else {
            return false;
        };
        let description = format!("Remove {}", element.element_type());
        self.history.add_action(
            Action::new(
                ActionKind::RemoveElement,
                description,
                RemoveElement::new(index, element),
            )
            .with_metadata("element_id", id.to_string())
            .with_metadata("index", index.to_string()),
        );
        true
    }

    /// Remove every selected element as one history step
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.current_selection();
        if ids.is_empty() {
            return 0;
        }

        self.history.begin_action_group("Delete selection");
        let removed = ids.into_iter().filter(|id| self.remove_element(*id)).count();
        self.history.end_action_group();
        removed
    }

    /// Remove all elements, topmost first, as one history step
    pub fn clear_canvas(&mut self) -> usize {
        if self.document.is_empty() {
            return 0;
        }
        self.selection.deselect_all(&mut self.document);

        let ids: Vec<ShapeId> = self
            .document
            .elements()
            .iter()
            .rev()
            .map(|element| element.id())
            .collect();

        self.history
            .begin_action_group_with_kind(ActionKind::ClearCanvas, "Clear canvas");
        let removed = ids.into_iter().filter(|id| self.remove_element(*id)).count();
        self.history.end_action_group();
        log::info!("Cleared canvas ({} elements)", removed);
        removed
    }

    /// Translate every selected element as one history step
    pub fn move_selected(&mut self, delta: Vec2) -> bool {
        let ids = self.selection.current_selection();
        if ids.is_empty() || delta == Vec2::ZERO {
            return false;
        }

        self.history
            .begin_action_group(format!("Move {} elements", ids.len()));
        for id in ids {
            let Some(element) = self.document.find_element_by_id_mut(id) else {
                continue;
            };
            let old_position = element.position();
            element.translate(delta);
            let new_position = element.position();
            self.history.add_action(Action::new(
                ActionKind::MoveElement,
                format!("Move {}", element.element_type()),
                MoveElement::new(id, old_position, new_position),
            ));
        }
        self.history.end_action_group();
        self.selection.refresh_indicator(&self.document);
        true
    }

    /// Resize an element's local geometry to `new_rect`
    pub fn resize_element(&mut self, id: ShapeId, new_rect: Rect) -> Result<(), ElementError> {
        let element = self
            .document
            .find_element_by_id_mut(id)
            .ok_or(ElementError::NotFound(id))?;

        let old_geometry = element.geometry();
        element.resize(new_rect)?;
        let new_geometry = element.geometry();

        self.history.add_action(
            Action::new(
                ActionKind::ResizeElement,
                format!("Resize {}", element.element_type()),
                ResizeElement::new(id, old_geometry, new_geometry),
            )
            .with_metadata("element_id", id.to_string()),
        );
        self.selection.refresh_indicator(&self.document);
        Ok(())
    }

    /// Change one property of an element
    pub fn set_property(&mut self, id: ShapeId, value: Property) -> Result<(), ElementError> {
        let element = self
            .document
            .find_element_by_id_mut(id)
            .ok_or(ElementError::NotFound(id))?;

        let kind = value.kind();
        let Some(old_value) = element.property(kind) else {
            return Err(ElementError::UnsupportedProperty {
                property: kind.name(),
                element_type: element.element_type(),
            });
        };
        if old_value == value {
            return Ok(());
        }
        element.set_property(value.clone())?;

        self.history.add_action(
            Action::new(
                ActionKind::ChangeProperty,
                format!("Change {}", kind.name()),
                ChangeProperty::new(id, old_value, value),
            )
            .with_metadata("element_id", id.to_string())
            .with_metadata("property", kind.name()),
        );
        self.selection.refresh_indicator(&self.document);
        Ok(())
    }

    /// Change one property on every selected element that supports it, as
    /// one history step. Returns how many elements changed.
    pub fn set_property_on_selection(&mut self, value: Property) -> usize {
        let ids = self.selection.current_selection();
        if ids.is_empty() {
            return 0;
        }

        self.history
            .begin_action_group(format!("Change {} on selection", value.kind().name()));
        let mut changed = 0;
        for id in ids {
            match self.set_property(id, value.clone()) {
                Ok(()) => changed += 1,
                Err(err) => log::debug!("Skipped {}: {}", id, err),
            }
        }
        self.history.end_action_group();
        changed
    }

    /// Move an element to a z-index (clamped). Returns `false` if nothing moved.
    pub fn reorder_element(&mut self, id: ShapeId, index: usize) -> bool {
        let Some(old_index) = self.document.move_element(id, index) else {
            return false;
        };
        let Some(new_index) = self.document.index_of(id) else {
            return false;
        };
        if old_index == new_index {
            return false;
        }

        self.history.add_action(
            Action::new(
                ActionKind::ModifyElement,
                "Reorder element",
                ReorderElement::new(id, old_index, new_index),
            )
            .with_metadata("from", old_index.to_string())
            .with_metadata("to", new_index.to_string()),
        );
        true
    }

    pub fn bring_to_front(&mut self, id: ShapeId) -> bool {
        let top = self.document.len().saturating_sub(1);
        self.reorder_element(id, top)
    }

    pub fn send_to_back(&mut self, id: ShapeId) -> bool {
        self.reorder_element(id, 0)
    }

    pub fn set_background(&mut self, background: Option<String>) -> bool {
        let old_background = self.document.background().map(str::to_string);
        if old_background == background {
            return false;
        }
        self.document.set_background(background.clone());
        self.history.add_action(Action::new(
            ActionKind::SetBackground,
            "Set background",
            SetBackground::new(old_background, background),
        ));
        true
    }

    // ---- History ----

    /// Undo the last action, returning its description
    pub fn undo(&mut self) -> Option<String> {
        let description = self
            .history
            .undo(&mut self.document)
            .map(|action| action.description().to_string());
        self.selection.sync_with_document(&mut self.document);
        self.selection.refresh_indicator(&self.document);
        description
    }

    /// Redo the last undone action, returning its description
    pub fn redo(&mut self) -> Option<String> {
        let description = self
            .history
            .redo(&mut self.document)
            .map(|action| action.description().to_string());
        self.selection.sync_with_document(&mut self.document);
        self.selection.refresh_indicator(&self.document);
        description
    }

    // ---- Selection ----

    pub fn select(&mut self, ids: &[ShapeId], mode: SelectionMode) -> bool {
        self.selection.select(&mut self.document, ids, mode)
    }

    pub fn toggle_element(&mut self, id: ShapeId) -> bool {
        self.selection.toggle_element(&mut self.document, id)
    }

    pub fn select_all(&mut self) -> bool {
        self.selection.select_all(&mut self.document)
    }

    pub fn deselect_all(&mut self) -> bool {
        self.selection.deselect_all(&mut self.document)
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection.set_selection_mode(mode);
    }

    pub fn start_marquee(&mut self, point: Pos2) {
        self.selection.start_marquee(point);
    }

    pub fn update_marquee(&mut self, point: Pos2) {
        self.selection.update_marquee(point);
    }

    pub fn cancel_marquee(&mut self) {
        self.selection.cancel_marquee();
    }

    pub fn finish_marquee(&mut self) -> bool {
        self.selection.finish_marquee(&mut self.document)
    }

    pub fn element_at_point(&self, point: Pos2) -> Option<ShapeId> {
        self.selection.element_at_point(&self.document, point)
    }

    pub fn save_selection(&mut self, name: &str) {
        self.selection.save_selection(name);
    }

    pub fn restore_selection(&mut self, name: &str) -> bool {
        self.selection.restore_selection(&mut self.document, name)
    }

    pub fn delete_named_group(&mut self, name: &str) -> bool {
        self.selection.delete_named_group(name)
    }

    pub fn undo_selection(&mut self) -> bool {
        self.selection.undo_selection(&mut self.document)
    }

    pub fn redo_selection(&mut self) -> bool {
        self.selection.redo_selection(&mut self.document)
    }
}
