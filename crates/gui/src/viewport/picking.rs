//! Screen-space component picking
//!
//! Works on already-projected positions, so the nearest vertex, then edge,
//! then face under the pointer wins regardless of depth.

use egui::Pos2;
use shared::{ElementRef, Mesh};

/// Pointer radius for vertices (px)
pub const VERTEX_RADIUS: f32 = 7.0;
/// Pointer distance for edges (px)
pub const EDGE_RADIUS: f32 = 5.0;

/// What a click should select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickLevel {
    /// Pick whole objects
    Object,
    /// Pick vertices, edges and faces
    Component,
}

/// Pick the element under `pointer`. `project` maps scene positions to the
/// screen and returns None for points that are not visible.
pub fn pick(
    meshes: &[Mesh],
    pointer: Pos2,
    level: PickLevel,
    project: impl Fn([f64; 3]) -> Option<Pos2>,
) -> Option<ElementRef> {
    let projected: Vec<Vec<Option<Pos2>>> = meshes
        .iter()
        .map(|m| m.vertices.iter().map(|v| project(*v)).collect())
        .collect();

    let mut best_vertex: Option<(f32, ElementRef)> = None;
    for (mesh, points) in meshes.iter().zip(&projected) {
        for (i, p) in points.iter().enumerate() {
            let Some(p) = p else { continue };
            let d = p.distance(pointer);
            if d <= VERTEX_RADIUS && best_vertex.as_ref().map_or(true, |(bd, _)| d < *bd) {
                best_vertex = Some((d, ElementRef::vertex(&mesh.name, i)));
            }
        }
    }

    let mut best_edge: Option<(f32, ElementRef)> = None;
    for (mesh, points) in meshes.iter().zip(&projected) {
        let point = |i: usize| points.get(i).copied().flatten();
        for (i, [a, b]) in mesh.edges().into_iter().enumerate() {
            let (Some(pa), Some(pb)) = (point(a), point(b)) else {
                continue;
            };
            let d = segment_distance(pointer, pa, pb);
            if d <= EDGE_RADIUS && best_edge.as_ref().map_or(true, |(bd, _)| d < *bd) {
                best_edge = Some((d, ElementRef::edge(&mesh.name, i)));
            }
        }
    }

    let mut best_face: Option<(f32, ElementRef)> = None;
    for (mesh, points) in meshes.iter().zip(&projected) {
        for (i, face) in mesh.faces.iter().enumerate() {
            let polygon: Option<Vec<Pos2>> =
                face.iter().map(|v| points.get(*v).copied().flatten()).collect();
            let Some(polygon) = polygon else { continue };
            if polygon.len() < 3 || !contains(&polygon, pointer) {
                continue;
            }
            let d = centroid(&polygon).distance(pointer);
            if best_face.as_ref().map_or(true, |(bd, _)| d < *bd) {
                best_face = Some((d, ElementRef::face(&mesh.name, i)));
            }
        }
    }

    let hit = best_vertex.or(best_edge).or(best_face).map(|(_, e)| e)?;
    match level {
        PickLevel::Component => Some(hit),
        PickLevel::Object => Some(hit.owner_object()),
    }
}

/// Distance from `p` to the segment `a`-`b`
pub fn segment_distance(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_sq();
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Even-odd point-in-polygon test
pub fn contains(polygon: &[Pos2], p: Pos2) -> bool {
    if polygon.is_empty() {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn centroid(polygon: &[Pos2]) -> Pos2 {
    let sum = polygon.iter().fold(egui::Vec2::ZERO, |acc, p| acc + p.to_vec2());
    (sum / polygon.len() as f32).to_pos2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    /// Drop Z and scale so 1 unit = 100 px
    fn flat(v: [f64; 3]) -> Option<Pos2> {
        Some(egui::pos2(v[0] as f32 * 100.0, v[1] as f32 * 100.0))
    }

    fn plane() -> Vec<Mesh> {
        vec![fixtures::square_plane("plane", 1.0)]
    }

    #[test]
    fn test_pick_vertex_first() {
        let hit = pick(&plane(), egui::pos2(98.0, 3.0), PickLevel::Component, flat);
        assert_eq!(hit, Some(ElementRef::vertex("plane", 1)));
    }

    #[test]
    fn test_pick_edge() {
        let hit = pick(&plane(), egui::pos2(50.0, 2.0), PickLevel::Component, flat);
        assert_eq!(hit, Some(ElementRef::edge("plane", 0)));
    }

    #[test]
    fn test_pick_face() {
        let hit = pick(&plane(), egui::pos2(50.0, 50.0), PickLevel::Component, flat);
        assert_eq!(hit, Some(ElementRef::face("plane", 0)));
    }

    #[test]
    fn test_pick_object_level() {
        let hit = pick(&plane(), egui::pos2(50.0, 50.0), PickLevel::Object, flat);
        assert_eq!(hit, Some(ElementRef::object("plane")));
    }

    #[test]
    fn test_pick_miss() {
        assert!(pick(&plane(), egui::pos2(300.0, 300.0), PickLevel::Component, flat).is_none());
    }

    #[test]
    fn test_segment_distance_clamps_to_ends() {
        let d = segment_distance(
            egui::pos2(-3.0, 4.0),
            egui::pos2(0.0, 0.0),
            egui::pos2(10.0, 0.0),
        );
        assert!((d - 5.0).abs() < 1e-5);
    }
}
