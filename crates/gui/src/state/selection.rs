use shared::ElementRef;

/// Element selection state (supports multi-select)
#[derive(Default, Debug, Clone)]
pub struct SelectionState {
    /// Selected elements (in order of selection)
    selected: Vec<ElementRef>,
}

impl SelectionState {
    /// Primary (first) selected element
    pub fn primary(&self) -> Option<&ElementRef> {
        self.selected.first()
    }

    /// All selected elements
    pub fn all(&self) -> &[ElementRef] {
        &self.selected
    }

    /// Check if an element is selected
    pub fn is_selected(&self, element: &ElementRef) -> bool {
        self.selected.iter().any(|s| s == element)
    }

    /// Check if anything on an object (the object or one of its components) is selected
    pub fn touches_object(&self, object: &str) -> bool {
        self.selected.iter().any(|s| s.object_name() == object)
    }

    /// Select a single element (clears previous selection)
    pub fn select(&mut self, element: ElementRef) {
        self.selected.clear();
        self.selected.push(element);
    }

    /// Replace the selection, dropping duplicates but keeping order
    pub fn set(&mut self, elements: &[ElementRef]) {
        self.selected.clear();
        for e in elements {
            if !self.selected.contains(e) {
                self.selected.push(e.clone());
            }
        }
    }

    /// Toggle selection (Ctrl+click behavior)
    pub fn toggle(&mut self, element: ElementRef) {
        if let Some(pos) = self.selected.iter().position(|s| s == &element) {
            self.selected.remove(pos);
        } else {
            self.selected.push(element);
        }
    }

    /// Drop elements that no longer satisfy `keep`
    pub fn retain(&mut self, keep: impl Fn(&ElementRef) -> bool) {
        self.selected.retain(|e| keep(e));
    }

    /// Clear all selection
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Number of selected elements
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
