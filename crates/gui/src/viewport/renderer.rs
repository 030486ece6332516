//! Painter-based drawing: ground grid, axes, mesh wireframes and labels

use egui::{Color32, Painter, Rect, Stroke};
use shared::{Annotation, ElementRef, Mesh};

use crate::state::scene::MeshScene;
use crate::state::LabelSettings;

use super::camera::ArcBallCamera;

const WIRE: Color32 = Color32::from_rgb(170, 170, 175);
const WIRE_SELECTED: Color32 = Color32::from_rgb(100, 200, 255);
const COMPONENT: Color32 = Color32::from_rgb(255, 140, 60);

pub fn draw_grid(painter: &Painter, rect: Rect, camera: &ArcBallCamera) {
    let stroke = Stroke::new(0.5, Color32::from_rgba_premultiplied(60, 60, 60, 140));
    let range = 10;
    let extent = range as f32;

    for i in -range..=range {
        let f = i as f32;
        for (a, b) in [
            ([f, 0.0, -extent], [f, 0.0, extent]),
            ([-extent, 0.0, f], [extent, 0.0, f]),
        ] {
            if let (Some(a), Some(b)) = (camera.project(a, rect), camera.project(b, rect)) {
                if rect.contains(a) || rect.contains(b) {
                    painter.line_segment([a, b], stroke);
                }
            }
        }
    }
}

pub fn draw_axes(painter: &Painter, rect: Rect, camera: &ArcBallCamera) {
    let axes = [
        ([1.0_f32, 0.0, 0.0], "X", Color32::from_rgb(220, 50, 50)),
        ([0.0, 1.0, 0.0], "Y", Color32::from_rgb(50, 200, 50)),
        ([0.0, 0.0, 1.0], "Z", Color32::from_rgb(50, 100, 220)),
    ];
    let Some(origin) = camera.project([0.0, 0.0, 0.0], rect) else {
        return;
    };
    for (tip, label, color) in axes {
        if let Some(tip) = camera.project(tip, rect) {
            painter.line_segment([origin, tip], Stroke::new(1.5, color));
            let font = egui::FontId::monospace(10.0);
            painter.text(tip, egui::Align2::LEFT_BOTTOM, label, font, color);
        }
    }
}

/// Wireframe of every mesh with the selection highlighted
pub fn draw_meshes(painter: &Painter, rect: Rect, camera: &ArcBallCamera, scene: &MeshScene) {
    let selection = scene.selection_state();
    for mesh in scene.meshes() {
        let whole = selection.is_selected(&ElementRef::object(&mesh.name));
        let stroke = if whole {
            Stroke::new(2.0, WIRE_SELECTED)
        } else if selection.touches_object(&mesh.name) {
            Stroke::new(1.0, WIRE_SELECTED.gamma_multiply(0.6))
        } else {
            Stroke::new(1.0, WIRE)
        };
        draw_wire(painter, rect, camera, mesh, scene.mesh_edges(&mesh.name), stroke);
    }

    for element in selection.all() {
        draw_component(painter, rect, camera, scene, element);
    }
}

fn draw_wire(
    painter: &Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    mesh: &Mesh,
    edges: &[[usize; 2]],
    stroke: Stroke,
) {
    for &[a, b] in edges {
        let (Some(pa), Some(pb)) = (mesh.vertices.get(a), mesh.vertices.get(b)) else {
            continue;
        };
        if let (Some(a), Some(b)) = (camera.project_f64(*pa, rect), camera.project_f64(*pb, rect)) {
            painter.line_segment([a, b], stroke);
        }
    }
    for v in &mesh.vertices {
        if let Some(p) = camera.project_f64(*v, rect) {
            painter.circle_filled(p, 1.5, stroke.color);
        }
    }
}

fn draw_component(
    painter: &Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    scene: &MeshScene,
    element: &ElementRef,
) {
    let Some(mesh) = scene.mesh(element.object_name()) else {
        return;
    };
    let point = |i: usize| {
        mesh.vertices
            .get(i)
            .and_then(|v| camera.project_f64(*v, rect))
    };
    let stroke = Stroke::new(2.5, COMPONENT);
    match element {
        ElementRef::Object { .. } => {}
        ElementRef::Vertex { index, .. } | ElementRef::VertexFace { vertex: index, .. } => {
            if let Some(p) = point(*index) {
                painter.circle_filled(p, 4.0, COMPONENT);
            }
        }
        ElementRef::Edge { index, .. } => {
            if let Some([a, b]) = scene.mesh_edges(&mesh.name).get(*index).copied() {
                if let (Some(a), Some(b)) = (point(a), point(b)) {
                    painter.line_segment([a, b], stroke);
                }
            }
        }
        ElementRef::Face { index, .. } => {
            let Some(face) = mesh.faces.get(*index) else {
                return;
            };
            let outline: Option<Vec<egui::Pos2>> = face.iter().map(|i| point(*i)).collect();
            if let Some(outline) = outline {
                painter.add(egui::Shape::closed_line(outline, stroke));
            }
        }
    }
}

/// Anchor dot plus label text for each live annotation
pub fn draw_annotations(
    painter: &Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    annotations: &[Annotation],
    settings: &LabelSettings,
) {
    let [r, g, b] = settings.color;
    let color = Color32::from_rgb(r, g, b);
    let font = egui::FontId::monospace(settings.font_size);
    for annotation in annotations {
        let Some(p) = camera.project_f64(annotation.anchor, rect) else {
            continue;
        };
        if !rect.contains(p) {
            continue;
        }
        if settings.show_anchor {
            painter.circle_filled(p, 2.5, color);
        }
        let galley = painter.layout_no_wrap(annotation.label.clone(), font.clone(), color);
        let pos = p + egui::vec2(6.0, -galley.size().y - 2.0);
        painter.rect_filled(
            Rect::from_min_size(pos, galley.size()).expand(2.0),
            2.0,
            Color32::from_black_alpha(160),
        );
        painter.galley(pos, galley, color);
    }
}
