//! Reversible edits of a [`Document`].
//!
//! Each command is built after its edit has been applied and captures only
//! what it needs to flip between the two states. A command whose target has
//! disappeared from the document logs a warning and leaves it untouched.

use egui::Vec2;

use super::Command;
use crate::document::Document;
use crate::element::{Element, ElementType, Geometry, Property};
use crate::id_generator::ShapeId;

fn warn_missing(command: &str, id: ShapeId) {
    log::warn!("{}: element {} not found in document", command, id);
}

/// Undoes the addition of an element by taking it back out of the document
#[derive(Debug)]
pub struct AddElement {
    id: ShapeId,
    index: usize,
    /// Holds the element while it is undone
    stash: Option<ElementType>,
}

impl AddElement {
    /// `index` is the z-index the element was added at
    pub fn new(id: ShapeId, index: usize) -> Self {
        Self { id, index, stash: None }
    }
}

impl Command<Document> for AddElement {
    fn undo(&mut self, doc: &mut Document) {
        match doc.remove_element(self.id) {
            Some((index, element)) => {
                self.index = index;
                self.stash = Some(element);
            }
            None => warn_missing("AddElement::undo", self.id),
        }
    }

    fn redo(&mut self, doc: &mut Document) {
        match self.stash.take() {
            Some(element) => {
                doc.insert_element(self.index, element);
            }
            None => warn_missing("AddElement::redo", self.id),
        }
    }
}

/// Undoes a removal by putting the element back at its old z-index
#[derive(Debug)]
pub struct RemoveElement {
    id: ShapeId,
    index: usize,
    stash: Option<ElementType>,
}

impl RemoveElement {
    /// Takes ownership of the element that was removed from `index`
    pub fn new(index: usize, element: ElementType) -> Self {
        Self {
            id: element.id(),
            index,
            stash: Some(element),
        }
    }
}

impl Command<Document> for RemoveElement {
    fn undo(&mut self, doc: &mut Document) {
        match self.stash.take() {
            Some(element) => {
                doc.insert_element(self.index, element);
            }
            None => warn_missing("RemoveElement::undo", self.id),
        }
    }

    fn redo(&mut self, doc: &mut Document) {
        match doc.remove_element(self.id) {
            Some((index, element)) => {
                self.index = index;
                self.stash = Some(element);
            }
            None => warn_missing("RemoveElement::redo", self.id),
        }
    }
}

/// Switches an element between two scene positions
#[derive(Debug, Clone)]
pub struct MoveElement {
    id: ShapeId,
    old_position: Vec2,
    new_position: Vec2,
}

impl MoveElement {
    pub fn new(id: ShapeId, old_position: Vec2, new_position: Vec2) -> Self {
        Self {
            id,
            old_position,
            new_position,
        }
    }

    fn apply(&self, doc: &mut Document, position: Vec2, context: &str) {
        match doc.find_element_by_id_mut(self.id) {
            Some(element) => element.set_position(position),
            None => warn_missing(context, self.id),
        }
    }
}

impl Command<Document> for MoveElement {
    fn undo(&mut self, doc: &mut Document) {
        self.apply(doc, self.old_position, "MoveElement::undo");
    }

    fn redo(&mut self, doc: &mut Document) {
        self.apply(doc, self.new_position, "MoveElement::redo");
    }
}

/// Switches an element between two local geometries
#[derive(Debug, Clone)]
pub struct ResizeElement {
    id: ShapeId,
    old_geometry: Geometry,
    new_geometry: Geometry,
}

impl ResizeElement {
    pub fn new(id: ShapeId, old_geometry: Geometry, new_geometry: Geometry) -> Self {
        Self {
            id,
            old_geometry,
            new_geometry,
        }
    }

    fn apply(&self, doc: &mut Document, geometry: Geometry, context: &str) {
        let Some(element) = doc.find_element_by_id_mut(self.id) else {
            warn_missing(context, self.id);
            return;
        };
        if let Err(err) = element.set_geometry(geometry) {
            log::warn!("{}: {}", context, err);
        }
    }
}

impl Command<Document> for ResizeElement {
    fn undo(&mut self, doc: &mut Document) {
        self.apply(doc, self.old_geometry.clone(), "ResizeElement::undo");
    }

    fn redo(&mut self, doc: &mut Document) {
        self.apply(doc, self.new_geometry.clone(), "ResizeElement::redo");
    }
}

/// Switches one property of an element between two values
#[derive(Debug, Clone)]
pub struct ChangeProperty {
    id: ShapeId,
    old_value: Property,
    new_value: Property,
}

impl ChangeProperty {
    pub fn new(id: ShapeId, old_value: Property, new_value: Property) -> Self {
        Self {
            id,
            old_value,
            new_value,
        }
    }

    fn apply(&self, doc: &mut Document, value: Property, context: &str) {
        let Some(element) = doc.find_element_by_id_mut(self.id) else {
            warn_missing(context, self.id);
            return;
        };
        if let Err(err) = element.set_property(value) {
            log::warn!("{}: {}", context, err);
        }
    }
}

impl Command<Document> for ChangeProperty {
    fn undo(&mut self, doc: &mut Document) {
        self.apply(doc, self.old_value.clone(), "ChangeProperty::undo");
    }

    fn redo(&mut self, doc: &mut Document) {
        self.apply(doc, self.new_value.clone(), "ChangeProperty::redo");
    }
}

/// Moves an element between two z-indices
#[derive(Debug, Clone)]
pub struct ReorderElement {
    id: ShapeId,
    old_index: usize,
    new_index: usize,
}

impl ReorderElement {
    pub fn new(id: ShapeId, old_index: usize, new_index: usize) -> Self {
        Self {
            id,
            old_index,
            new_index,
        }
    }
}

impl Command<Document> for ReorderElement {
    fn undo(&mut self, doc: &mut Document) {
        if doc.move_element(self.id, self.old_index).is_none() {
            warn_missing("ReorderElement::undo", self.id);
        }
    }

    fn redo(&mut self, doc: &mut Document) {
        if doc.move_element(self.id, self.new_index).is_none() {
            warn_missing("ReorderElement::redo", self.id);
        }
    }
}

/// Switches the canvas background
#[derive(Debug, Clone)]
pub struct SetBackground {
    old_background: Option<String>,
    new_background: Option<String>,
}

impl SetBackground {
    pub fn new(old_background: Option<String>, new_background: Option<String>) -> Self {
        Self {
            old_background,
            new_background,
        }
    }
}

impl Command<Document> for SetBackground {
    fn undo(&mut self, doc: &mut Document) {
        doc.set_background(self.old_background.clone());
    }

    fn redo(&mut self, doc: &mut Document) {
        doc.set_background(self.new_background.clone());
    }
}
