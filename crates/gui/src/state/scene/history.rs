//! Undo for geometry edits

use super::MeshScene;

impl MeshScene {
    /// Undo last geometry change. Annotation nodes are not part of the history.
    pub fn undo_geometry(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(prev) => {
                self.meshes = prev;
                self.geometry_edited();
                true
            }
            None => false,
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }
}
