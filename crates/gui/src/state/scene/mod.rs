//! In-memory polygon scene
//!
//! `MeshScene` holds meshes, the element selection, annotation nodes and an
//! undo history for geometry edits. It implements [`SceneHost`] so the
//! annotation engine can run against it headless or inside the egui front end.
//!
//! [`SceneHost`]: crate::host::SceneHost

mod components;
mod history;
mod host_impl;
mod nodes;

use std::collections::{BTreeMap, HashMap};

use shared::{ElementRef, Mesh};

pub use nodes::AnnotationNode;

use crate::host::{HostError, HostEvent, HostEventKind, ListenerId};
use crate::state::selection::SelectionState;

/// Scene state with meshes, selection, annotation nodes and undo history
#[derive(Default)]
pub struct MeshScene {
    meshes: Vec<Mesh>,
    /// Edge lists per mesh name, rebuilt on every geometry edit
    edges: HashMap<String, Vec<[usize; 2]>>,
    selection: SelectionState,
    nodes: BTreeMap<String, AnnotationNode>,
    listeners: Vec<(ListenerId, HostEventKind)>,
    next_listener: ListenerId,
    pending: Vec<HostEvent>,
    /// Undo stack - previous geometry
    pub(crate) undo_stack: Vec<Vec<Mesh>>,
    /// Lowest suffix worth trying per name base; every smaller one is taken
    name_hints: HashMap<String, usize>,
}

impl MeshScene {
    pub fn new(meshes: Vec<Mesh>) -> Self {
        let mut scene = Self {
            meshes,
            ..Default::default()
        };
        scene.rebuild_edges();
        scene
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.meshes.iter().find(|m| m.name == name)
    }

    /// Cached edges of a mesh, in `Mesh::edges` order
    pub fn mesh_edges(&self, name: &str) -> &[[usize; 2]] {
        self.edges.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Annotation nodes currently in the scene, by name
    pub fn nodes(&self) -> &BTreeMap<String, AnnotationNode> {
        &self.nodes
    }

    pub fn selection_state(&self) -> &SelectionState {
        &self.selection
    }

    /// Number of live listener subscriptions
    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ── Geometry edits (undoable) ─────────────────────────────

    /// Add a mesh. A mesh with the same name is replaced.
    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.save_undo();
        if let Some(existing) = self.meshes.iter_mut().find(|m| m.name == mesh.name) {
            *existing = mesh;
        } else {
            self.meshes.push(mesh);
        }
        self.geometry_edited();
    }

    /// Remove a mesh and anything selected on it. Returns false if absent.
    pub fn remove_mesh(&mut self, name: &str) -> bool {
        if self.mesh(name).is_none() {
            return false;
        }
        self.save_undo();
        self.meshes.retain(|m| m.name != name);
        self.geometry_edited();
        true
    }

    /// Translate every vertex of a mesh
    pub fn translate(&mut self, name: &str, delta: [f64; 3]) -> Result<(), HostError> {
        if self.mesh(name).is_none() {
            return Err(HostError::Missing(name.to_string()));
        }
        self.save_undo();
        if let Some(mesh) = self.meshes.iter_mut().find(|m| m.name == name) {
            for v in &mut mesh.vertices {
                for axis in 0..3 {
                    v[axis] += delta[axis];
                }
            }
        }
        self.geometry_edited();
        Ok(())
    }

    /// Move a single vertex to an absolute position
    pub fn move_vertex(
        &mut self,
        object: &str,
        index: usize,
        position: [f64; 3],
    ) -> Result<(), HostError> {
        let element = ElementRef::vertex(object, index);
        let in_range = self
            .mesh(object)
            .map(|m| index < m.vertices.len())
            .unwrap_or(false);
        if !in_range {
            return Err(HostError::Missing(element.to_string()));
        }
        self.save_undo();
        if let Some(mesh) = self.meshes.iter_mut().find(|m| m.name == object) {
            mesh.vertices[index] = position;
        }
        self.geometry_edited();
        Ok(())
    }

    // ── Selection ─────────────────────────────────────────────

    /// Select a single element
    pub fn select_element(&mut self, element: ElementRef) {
        self.change_selection(|s| s.select(element));
    }

    /// Toggle an element (Ctrl+click)
    pub fn toggle_element(&mut self, element: ElementRef) {
        self.change_selection(|s| s.toggle(element));
    }

    pub fn clear_selection(&mut self) {
        self.change_selection(|s| s.clear());
    }

    /// Apply a selection change and queue the matching events
    pub(crate) fn change_selection(&mut self, change: impl FnOnce(&mut SelectionState)) {
        let before = self.selection.all().to_vec();
        change(&mut self.selection);
        let after = self.selection.all();
        if before.as_slice() == after {
            return;
        }
        let now_empty = after.is_empty();
        self.emit(HostEventKind::SelectionChanged);
        match (before.is_empty(), now_empty) {
            (true, false) => self.emit(HostEventKind::SomethingSelected),
            (false, true) => self.emit(HostEventKind::NothingSelected),
            _ => {}
        }
    }

    // ── Events ────────────────────────────────────────────────

    fn emit(&mut self, kind: HostEventKind) {
        let events: Vec<HostEvent> = self
            .listeners
            .iter()
            .filter(|(_, k)| *k == kind)
            .map(|(id, _)| HostEvent { listener: *id, kind })
            .collect();
        self.pending.extend(events);
    }

    fn rebuild_edges(&mut self) {
        self.edges.clear();
        for mesh in &self.meshes {
            self.edges
                .entry(mesh.name.clone())
                .or_insert_with(|| mesh.edges());
        }
    }

    /// Refresh edge cache, notify listeners and drop selection on vanished components
    fn geometry_edited(&mut self) {
        self.rebuild_edges();
        self.name_hints.clear();
        self.emit(HostEventKind::GeometryChanged);
        let stale: Vec<ElementRef> = self
            .selection
            .all()
            .iter()
            .filter(|e| !self.resolves(e))
            .cloned()
            .collect();
        if !stale.is_empty() {
            self.change_selection(|s| s.retain(|e| !stale.contains(e)));
        }
    }

    /// Save current geometry to undo stack
    pub(crate) fn save_undo(&mut self) {
        self.undo_stack.push(self.meshes.clone());
        if self.undo_stack.len() > 100 {
            self.undo_stack.remove(0);
        }
    }
}
