//! One tool session: the in-memory scene, the annotation set, the reconciler
//! and the tool panel, wired together.

use shared::Mesh;

use crate::annotations::AnnotationSet;
use crate::reconciler::{PassReport, Phase, Reconciler, Trigger};
use crate::state::scene::MeshScene;
use crate::state::settings::ToolSettings;
use crate::surface::ToolPanel;

pub struct Session {
    pub scene: MeshScene,
    pub annotations: AnnotationSet,
    pub reconciler: Reconciler,
    pub panel: ToolPanel,
    last_report: Option<PassReport>,
}

impl Session {
    /// Open a session over `meshes` and pick the initial phase
    pub fn open(settings: &ToolSettings, meshes: Vec<Mesh>) -> Self {
        let mut session = Self {
            scene: MeshScene::new(meshes),
            annotations: AnnotationSet::new(&settings.prefix),
            reconciler: Reconciler::new(settings),
            panel: ToolPanel::default(),
            last_report: None,
        };
        let report = session.reconciler.start(
            &mut session.scene,
            &mut session.annotations,
            &mut session.panel,
        );
        session.record(report);
        session
    }

    pub fn phase(&self) -> Phase {
        self.reconciler.phase()
    }

    /// Report of the most recent pass, retraction or teardown
    pub fn last_report(&self) -> Option<&PassReport> {
        self.last_report.as_ref()
    }

    /// Apply a tool-window action
    pub fn trigger(&mut self, trigger: Trigger) -> Option<PassReport> {
        let report = self.reconciler.handle(
            trigger,
            &mut self.scene,
            &mut self.annotations,
            &mut self.panel,
        );
        self.record(report)
    }

    /// Deliver pending host events; call after editing `scene` directly
    pub fn pump(&mut self) -> Option<PassReport> {
        let report = self
            .reconciler
            .pump(&mut self.scene, &mut self.annotations, &mut self.panel);
        self.record(report)
    }

    pub fn close(&mut self) -> Option<PassReport> {
        self.trigger(Trigger::Close)
    }

    fn record(&mut self, report: Option<PassReport>) -> Option<PassReport> {
        if let Some(report) = &report {
            self.last_report = Some(report.clone());
        }
        report
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.reconciler.phase() != Phase::Closed {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::surface::ToolView;
    use shared::{DisplayMode, ElementRef};

    #[test]
    fn test_open_empty_is_idle() {
        let s = Session::open(&ToolSettings::default(), vec![]);
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.last_report().is_none());
    }

    #[test]
    fn test_pump_after_direct_edit() {
        let mut s = Session::open(&ToolSettings::default(), vec![fixtures::unit_cube("cube")]);
        s.trigger(Trigger::Toggle { mode: DisplayMode::FaceNormals, on: true });
        s.scene.select_element(ElementRef::object("cube"));
        let report = s.pump().unwrap();
        assert_eq!(report.created(), 6);
        assert_eq!(s.last_report().unwrap().created(), 6);
        assert_eq!(s.panel.view(), &ToolView::Controls);
    }

    #[test]
    fn test_settings_prefix_used() {
        let settings = ToolSettings {
            prefix: "pin".to_string(),
            ..Default::default()
        };
        let mut s = Session::open(&settings, vec![fixtures::unit_cube("cube")]);
        s.scene.select_element(ElementRef::vertex("cube", 0));
        s.pump();
        s.trigger(Trigger::Toggle { mode: DisplayMode::VertexOnly, on: true });
        assert_eq!(s.annotations.live()[0].name, "pin1");
    }

    #[test]
    fn test_close_releases_listeners() {
        let mut s = Session::open(&ToolSettings::default(), vec![fixtures::unit_cube("cube")]);
        assert!(s.scene.listener_count() > 0);
        s.close();
        assert_eq!(s.scene.listener_count(), 0);
        assert_eq!(s.panel.view(), &ToolView::Closed);
    }
}
