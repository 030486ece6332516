//! Scene tree panel - meshes and their components, clickable for selection

use egui::Ui;
use shared::{ElementKind, ElementRef, Mesh};

use crate::i18n::t;
use crate::state::AppState;

const SELECTED: egui::Color32 = egui::Color32::from_rgb(100, 200, 255);
const NORMAL: egui::Color32 = egui::Color32::from_rgb(200, 200, 200);
const DIM: egui::Color32 = egui::Color32::from_rgb(150, 150, 150);
const REMOVE: egui::Color32 = egui::Color32::from_rgb(220, 80, 80);

/// Click selects, Ctrl+click toggles
enum Pick {
    Select(ElementRef),
    Toggle(ElementRef),
    Remove(String),
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading(t("tree.title"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("({})", state.session.scene.meshes().len()));
        });
    });
    ui.separator();

    if state.session.scene.meshes().is_empty() {
        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            ui.weak(t("tree.empty"));
        });
        return;
    }

    let mut picks = Vec::new();
    egui::ScrollArea::vertical()
        .id_salt("scene_tree_scroll")
        .show(ui, |ui| {
            let scene = &state.session.scene;
            for mesh in scene.meshes() {
                let is_selected = |e: &ElementRef| scene.selection_state().is_selected(e);
                mesh_node(ui, mesh, &is_selected, &mut picks);
            }
        });

    let scene = &mut state.session.scene;
    for pick in picks {
        match pick {
            Pick::Select(element) => scene.select_element(element),
            Pick::Toggle(element) => scene.toggle_element(element),
            Pick::Remove(name) => {
                scene.remove_mesh(&name);
            }
        }
    }
}

fn mesh_node(
    ui: &mut Ui,
    mesh: &Mesh,
    is_selected: &dyn Fn(&ElementRef) -> bool,
    picks: &mut Vec<Pick>,
) {
    let object = ElementRef::object(&mesh.name);
    let color = if is_selected(&object) { SELECTED } else { NORMAL };
    let header = egui::CollapsingHeader::new(egui::RichText::new(&mesh.name).color(color))
        .id_salt(("mesh", &mesh.name))
        .default_open(false)
        .show(ui, |ui| {
            let edges = mesh.edges();
            let groups = [
                (t("tree.vertices"), ElementKind::Vertex, mesh.vertices.len()),
                (t("tree.edges"), ElementKind::Edge, edges.len()),
                (t("tree.faces"), ElementKind::Face, mesh.faces.len()),
            ];
            for (title, kind, count) in groups {
                egui::CollapsingHeader::new(format!("{title} ({count})"))
                    .id_salt(("group", &mesh.name, kind))
                    .show(ui, |ui| {
                        for index in 0..count {
                            if let Some(element) = ElementRef::component(&mesh.name, kind, index) {
                                let text = component_text(mesh, &element);
                                component_row(ui, element, text, is_selected, picks);
                            }
                        }
                    });
            }

            let corners: usize = mesh.faces.iter().map(Vec::len).sum();
            egui::CollapsingHeader::new(format!("{} ({corners})", t("tree.vertex_faces")))
                .id_salt(("group", &mesh.name, ElementKind::VertexFace))
                .show(ui, |ui| {
                    for (face, loop_) in mesh.faces.iter().enumerate() {
                        for &vertex in loop_ {
                            let element = ElementRef::vertex_face(&mesh.name, vertex, face);
                            let text = element.to_string();
                            component_row(ui, element, text, is_selected, picks);
                        }
                    }
                });
        });

    let response = header.header_response;
    if response.clicked() {
        if ui.input(|i| i.modifiers.command) {
            picks.push(Pick::Toggle(object));
        } else {
            picks.push(Pick::Select(object));
        }
    }
    response.context_menu(|ui| {
        let remove = egui::RichText::new(t("tree.remove")).color(REMOVE);
        if ui.button(remove).clicked() {
            picks.push(Pick::Remove(mesh.name.clone()));
            ui.close_menu();
        }
    });
}

fn component_row(
    ui: &mut Ui,
    element: ElementRef,
    text: String,
    is_selected: &dyn Fn(&ElementRef) -> bool,
    picks: &mut Vec<Pick>,
) {
    let selected = is_selected(&element);
    let label = egui::RichText::new(text).color(if selected { SELECTED } else { DIM });
    if ui.selectable_label(selected, label).clicked() {
        if ui.input(|i| i.modifiers.command) {
            picks.push(Pick::Toggle(element));
        } else {
            picks.push(Pick::Select(element));
        }
    }
}

/// Component name plus a short position hint for vertices
fn component_text(mesh: &Mesh, element: &ElementRef) -> String {
    match element {
        ElementRef::Vertex { index, .. } => match mesh.vertices.get(*index) {
            Some([x, y, z]) => format!("{element}  ({x:.2}, {y:.2}, {z:.2})"),
            None => element.to_string(),
        },
        _ => element.to_string(),
    }
}
