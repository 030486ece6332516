//! Headless test harness for driving an annotation session programmatically.
//!
//! Every scene edit is followed by a pump, so host events reach the
//! reconciler the same way they do in the desktop app's frame loop.

use shared::{Annotation, DisplayMode, ElementRef, Mesh, Precision};

use crate::fixtures;
use crate::reconciler::{PassReport, Phase, Trigger};
use crate::session::Session;
use crate::state::settings::ToolSettings;
use crate::surface::{Advisory, ToolView};

/// Headless test harness: a session over an in-memory mesh scene
pub struct TestHarness {
    pub session: Session,
}

impl TestHarness {
    /// Create a harness over an empty scene.
    pub fn new() -> Self {
        Self::with_meshes(Vec::new())
    }

    pub fn with_meshes(meshes: Vec<Mesh>) -> Self {
        Self::with_settings(ToolSettings::default(), meshes)
    }

    pub fn with_settings(settings: ToolSettings, meshes: Vec<Mesh>) -> Self {
        Self {
            session: Session::open(&settings, meshes),
        }
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Add (or replace) a mesh
    pub fn add_mesh(&mut self, mesh: Mesh) -> Option<PassReport> {
        self.session.scene.add_mesh(mesh);
        self.session.pump()
    }

    /// Add a box mesh with one corner at the origin
    pub fn add_cube(&mut self, name: &str, w: f64, h: f64, d: f64) -> Option<PassReport> {
        self.add_mesh(fixtures::box_mesh(name, w, h, d))
    }

    pub fn translate(&mut self, name: &str, delta: [f64; 3]) -> Result<Option<PassReport>, String> {
        self.session
            .scene
            .translate(name, delta)
            .map_err(|e| e.to_string())?;
        Ok(self.session.pump())
    }

    pub fn move_vertex(
        &mut self,
        object: &str,
        index: usize,
        position: [f64; 3],
    ) -> Result<Option<PassReport>, String> {
        self.session
            .scene
            .move_vertex(object, index, position)
            .map_err(|e| e.to_string())?;
        Ok(self.session.pump())
    }

    // ── Selection ─────────────────────────────────────────────

    /// Select a single element
    pub fn select(&mut self, element: ElementRef) -> Option<PassReport> {
        self.session.scene.select_element(element);
        self.session.pump()
    }

    /// Replace the selection with several elements
    pub fn select_many(&mut self, elements: &[ElementRef]) -> Option<PassReport> {
        self.session
            .scene
            .change_selection(|s| s.set(elements));
        self.session.pump()
    }

    pub fn clear_selection(&mut self) -> Option<PassReport> {
        self.session.scene.clear_selection();
        self.session.pump()
    }

    // ── Tool window actions ───────────────────────────────────

    pub fn toggle(&mut self, mode: DisplayMode, on: bool) -> Option<PassReport> {
        self.session.trigger(Trigger::Toggle { mode, on })
    }

    pub fn set_precision(&mut self, digits: u8) -> Option<PassReport> {
        self.session.trigger(Trigger::Precision(Precision::new(digits)))
    }

    pub fn reload(&mut self) -> Option<PassReport> {
        self.session.trigger(Trigger::Reload)
    }

    pub fn delete_all(&mut self) -> Option<PassReport> {
        self.session.trigger(Trigger::DeleteAll)
    }

    /// Undo the last geometry edit. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let could = self.session.scene.can_undo();
        self.session.trigger(Trigger::Undo);
        could
    }

    pub fn rename(&mut self, text: &str) {
        self.session.trigger(Trigger::Rename(text.to_string()));
    }

    pub fn close(&mut self) -> Option<PassReport> {
        self.session.close()
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn view(&self) -> &ToolView {
        self.session.panel.view()
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.session.annotations.live()
    }

    /// Number of live annotations
    pub fn annotation_count(&self) -> usize {
        self.session.annotations.len()
    }

    /// Number of annotation nodes in the scene, tracked or not
    pub fn node_count(&self) -> usize {
        self.session.scene.nodes().len()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.annotations().iter().map(|a| a.label.as_str()).collect()
    }

    pub fn last_advisory(&self) -> Option<&Advisory> {
        self.session.panel.last_advisory()
    }

    pub fn last_report(&self) -> Option<&PassReport> {
        self.session.last_report()
    }

    pub fn mesh_count(&self) -> usize {
        self.session.scene.meshes().len()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_harness_idle() {
        let h = TestHarness::new();
        assert_eq!(h.phase(), Phase::Idle);
        assert_eq!(h.annotation_count(), 0);
        assert_eq!(h.mesh_count(), 0);
    }

    #[test]
    fn test_add_cube_and_select() {
        let mut h = TestHarness::new();
        h.add_cube("cube", 1.0, 1.0, 1.0);
        assert_eq!(h.phase(), Phase::Idle);
        h.select(ElementRef::object("cube"));
        assert_eq!(h.phase(), Phase::Active);
        assert_eq!(h.view(), &ToolView::Controls);
    }

    #[test]
    fn test_toggle_then_clear() {
        let mut h = TestHarness::with_meshes(vec![fixtures::unit_cube("cube")]);
        h.select(ElementRef::object("cube"));
        h.toggle(DisplayMode::VertexPositions, true);
        assert_eq!(h.annotation_count(), 8);
        h.toggle(DisplayMode::VertexPositions, false);
        assert_eq!(h.annotation_count(), 0);
        assert_eq!(h.node_count(), 0);
    }

    #[test]
    fn test_undo_cycle() {
        let mut h = TestHarness::new();
        h.add_cube("cube", 1.0, 1.0, 1.0);
        assert_eq!(h.mesh_count(), 1);
        assert!(h.undo());
        assert_eq!(h.mesh_count(), 0);
        assert!(!h.undo());
    }

    #[test]
    fn test_translate_missing_mesh() {
        let mut h = TestHarness::new();
        assert!(h.translate("ghost", [1.0, 0.0, 0.0]).is_err());
    }
}
