//! Application menu bar

use eframe::egui;

use crate::fixtures;
use crate::i18n::{lang, set_lang, t, Lang};
use crate::reconciler::Trigger;
use crate::state::AppState;
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.edit"), |ui| {
        if ui
            .add_enabled(state.session.scene.can_undo(), egui::Button::new(t("menu.undo")))
            .clicked()
        {
            state.session.trigger(Trigger::Undo);
            ui.close_menu();
        }
        if ui
            .add_enabled(
                !state.session.scene.selection_state().is_empty(),
                egui::Button::new(t("menu.deselect_all")),
            )
            .clicked()
        {
            state.session.scene.clear_selection();
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.scene_tree, t("menu.scene_tree"));
        let mut tool_window = state.panels.tool_window;
        if ui.checkbox(&mut tool_window, t("menu.tool_window")).changed() {
            if tool_window {
                state.reopen_tool();
            } else {
                state.close_tool();
            }
        }
        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.frame_scene(state.session.scene.meshes());
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            if ui.selectable_label(lang() == Lang::En, "English").clicked() {
                set_lang(Lang::En);
                ui.close_menu();
            }
            if ui.selectable_label(lang() == Lang::Ru, "Русский").clicked() {
                set_lang(Lang::Ru);
                ui.close_menu();
            }
        });
    });
}

/// Show the create menu
pub fn create_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.create"), |ui| {
        if ui.button(t("prim.cube")).clicked() {
            let name = free_name(state, "cube");
            state.session.scene.add_mesh(fixtures::unit_cube(&name));
            ui.close_menu();
        }
        if ui.button(t("prim.plane")).clicked() {
            let name = free_name(state, "plane");
            state.session.scene.add_mesh(fixtures::square_plane(&name, 2.0));
            ui.close_menu();
        }
        if ui.button(t("prim.triangle")).clicked() {
            let name = free_name(state, "triangle");
            let mesh = fixtures::triangle(&name, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
            state.session.scene.add_mesh(mesh);
            ui.close_menu();
        }
        if ui.button(t("prim.hexagon")).clicked() {
            let name = free_name(state, "hexagon");
            state.session.scene.add_mesh(fixtures::ngon(&name, 6, 1.0));
            ui.close_menu();
        }
        if ui.button(t("prim.grid")).clicked() {
            let name = free_name(state, "grid");
            state.session.scene.add_mesh(fixtures::grid(&name, 10));
            ui.close_menu();
        }
    });
}

/// Smallest `{base}{n}` not used by a mesh or node
fn free_name(state: &AppState, base: &str) -> String {
    let scene = &state.session.scene;
    (1..)
        .map(|n| format!("{base}{n}"))
        .find(|name| scene.mesh(name).is_none() && !scene.nodes().contains_key(name))
        .unwrap_or_else(|| base.to_string())
}
