use crate::element::{Element, ElementType};
use crate::id_generator::ShapeId;

/// The canvas contents: shapes in paint order, bottom to top
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<ElementType>,
    background: Option<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element on top of all others
    pub fn add_element(&mut self, element: ElementType) -> ShapeId {
        let id = element.id();
        self.elements.push(element);
        id
    }

    /// Insert an element at a z-index. Indices past the end append.
    pub fn insert_element(&mut self, index: usize, element: ElementType) -> ShapeId {
        let id = element.id();
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
        id
    }

    /// Remove an element, returning the z-index it occupied
    pub fn remove_element(&mut self, id: ShapeId) -> Option<(usize, ElementType)> {
        let index = self.index_of(id)?;
        Some((index, self.elements.remove(index)))
    }

    pub fn find_element_by_id(&self, id: ShapeId) -> Option<&ElementType> {
        self.elements.iter().find(|element| element.id() == id)
    }

    pub fn find_element_by_id_mut(&mut self, id: ShapeId) -> Option<&mut ElementType> {
        self.elements.iter_mut().find(|element| element.id() == id)
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.elements.iter().position(|element| element.id() == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.index_of(id).is_some()
    }

    /// All elements, bottom to top
    pub fn elements(&self) -> &[ElementType] {
        &self.elements
    }

    pub(crate) fn elements_mut(&mut self) -> &mut [ElementType] {
        &mut self.elements
    }

    /// Move an element to a new z-index (clamped), returning its old index
    pub fn move_element(&mut self, id: ShapeId, index: usize) -> Option<usize> {
        let old_index = self.index_of(id)?;
        let element = self.elements.remove(old_index);
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
        Some(old_index)
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn set_background(&mut self, background: Option<String>) {
        self.background = background;
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
