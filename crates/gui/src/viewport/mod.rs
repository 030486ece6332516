//! 3D viewport panel drawn with the egui painter

mod camera;
mod picking;
mod renderer;

use egui::Ui;
use glam::DVec3;
use shared::Mesh;

use crate::i18n::t;
use crate::state::AppState;
use camera::ArcBallCamera;
use picking::{pick, PickLevel};

/// 3D viewport panel
pub struct ViewportPanel {
    camera: ArcBallCamera,
    /// Whether clicks pick components or whole objects
    pick_level: PickLevel,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: ArcBallCamera::new(),
            pick_level: PickLevel::Component,
        }
    }

    /// Aim the camera at the bounding sphere of all meshes
    pub fn frame_scene(&mut self, meshes: &[Mesh]) {
        let points: Vec<DVec3> = meshes
            .iter()
            .flat_map(|m| m.vertices.iter().map(|v| DVec3::from_array(*v)))
            .collect();
        if points.is_empty() {
            self.camera = ArcBallCamera::new();
            return;
        }
        let (min, max) = points.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(lo, hi), p| (lo.min(*p), hi.max(*p)),
        );
        let center = (min + max) * 0.5;
        let radius = (max - min).length() * 0.5;
        self.camera.frame(center.as_vec3(), radius as f32);
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) = ui.allocate_exact_size(
            ui.available_size(),
            egui::Sense::click_and_drag(),
        );

        self.handle_camera(&response, ui);
        self.handle_selection(&response, ui, rect, state);

        if !ui.is_rect_visible(rect) {
            return;
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(24, 24, 28));
        renderer::draw_grid(&painter, rect, &self.camera);
        renderer::draw_axes(&painter, rect, &self.camera);
        renderer::draw_meshes(&painter, rect, &self.camera, &state.session.scene);
        renderer::draw_annotations(
            &painter,
            rect,
            &self.camera,
            state.session.annotations.live(),
            &state.settings.labels,
        );

        self.show_pick_toggle(ui, rect);
    }

    fn handle_camera(&mut self, response: &egui::Response, ui: &Ui) {
        let orbit_drag =
            response.dragged_by(egui::PointerButton::Primary) && !ui.input(|i| i.modifiers.shift);
        if response.dragged_by(egui::PointerButton::Middle) || orbit_drag {
            let delta = response.drag_delta();
            self.camera.rotate(delta.x * 0.5, delta.y * 0.5);
        }

        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            self.camera.pan(-delta.x * 0.01, delta.y * 0.01);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * 0.01);
            }
        }
    }

    /// Click picks, Shift+click toggles, click on empty space clears
    fn handle_selection(
        &mut self,
        response: &egui::Response,
        ui: &Ui,
        rect: egui::Rect,
        state: &mut AppState,
    ) {
        if !response.clicked() {
            return;
        }
        let Some(pointer) = response.interact_pointer_pos() else {
            return;
        };
        let camera = &self.camera;
        let hit = pick(
            state.session.scene.meshes(),
            pointer,
            self.pick_level,
            |v| camera.project_f64(v, rect),
        );
        let toggle = ui.input(|i| i.modifiers.shift);
        let scene = &mut state.session.scene;
        match (hit, toggle) {
            (Some(element), true) => scene.toggle_element(element),
            (Some(element), false) => scene.select_element(element),
            (None, false) => scene.clear_selection(),
            (None, true) => {}
        }
    }

    fn show_pick_toggle(&mut self, ui: &mut Ui, rect: egui::Rect) {
        let area =
            egui::Rect::from_min_size(rect.min + egui::vec2(8.0, 8.0), egui::vec2(200.0, 24.0));
        ui.scope_builder(egui::UiBuilder::new().max_rect(area), |ui| {
            ui.horizontal(|ui| {
                let components = t("view.components");
                ui.selectable_value(&mut self.pick_level, PickLevel::Component, components);
                ui.selectable_value(&mut self.pick_level, PickLevel::Object, t("view.objects"));
            });
        });
    }
}
