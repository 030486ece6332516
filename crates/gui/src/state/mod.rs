pub mod scene;
pub mod selection;
pub mod settings;
pub mod toggles;

use shared::Mesh;

pub use scene::MeshScene;
pub use settings::{LabelSettings, ToolSettings, WindowSettings};
pub use toggles::{ModeToggles, TogglePolicy};

use crate::session::Session;

/// Panel visibility flags
pub struct PanelVisibility {
    pub scene_tree: bool,
    pub tool_window: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            scene_tree: true,
            tool_window: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub session: Session,
    pub settings: ToolSettings,
    pub panels: PanelVisibility,
    /// Text in the rename field, submitted on Enter
    pub rename_text: String,
}

impl AppState {
    pub fn new(settings: ToolSettings, meshes: Vec<Mesh>) -> Self {
        Self {
            session: Session::open(&settings, meshes),
            rename_text: settings.prefix.clone(),
            settings,
            panels: PanelVisibility::default(),
        }
    }

    /// Close the tool window and tear the session down
    pub fn close_tool(&mut self) {
        self.session.close();
        self.panels.tool_window = false;
    }

    /// Start a fresh session over the current scene, keeping its selection
    pub fn reopen_tool(&mut self) {
        let meshes = self.session.scene.meshes().to_vec();
        let selection = self.session.scene.selection_state().all().to_vec();
        self.session = Session::open(&self.settings, meshes);
        self.session.scene.change_selection(|s| s.set(&selection));
        self.session.pump();
        self.panels.tool_window = true;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ToolSettings::load(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::reconciler::Phase;
    use crate::surface::ToolView;
    use shared::ElementRef;

    #[test]
    fn test_close_hides_window_and_reopen_restores_controls() {
        let mut state = AppState::new(ToolSettings::default(), vec![fixtures::unit_cube("cube")]);
        state.session.scene.select_element(ElementRef::object("cube"));
        state.session.pump();

        state.close_tool();
        assert!(!state.panels.tool_window);
        assert_eq!(state.session.panel.view(), &ToolView::Closed);

        state.reopen_tool();
        assert!(state.panels.tool_window);
        assert_eq!(state.session.phase(), Phase::Active);
        assert_eq!(state.session.panel.view(), &ToolView::Controls);
    }
}
