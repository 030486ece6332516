//! Component lookup and conversion on scene meshes

use glam::DVec3;
use shared::{ElementRef, Mesh};

use super::MeshScene;
use crate::host::HostError;

impl MeshScene {
    pub(crate) fn find_mesh(&self, element: &ElementRef) -> Result<&Mesh, HostError> {
        self.mesh(element.object_name())
            .ok_or_else(|| HostError::Missing(element.to_string()))
    }

    /// Whether the element still names existing geometry
    pub fn resolves(&self, element: &ElementRef) -> bool {
        let Some(mesh) = self.mesh(element.object_name()) else {
            return false;
        };
        match element {
            ElementRef::Object { .. } => true,
            ElementRef::Vertex { index, .. } => *index < mesh.vertices.len(),
            ElementRef::Edge { index, .. } => *index < self.mesh_edges(&mesh.name).len(),
            ElementRef::Face { index, .. } => *index < mesh.faces.len(),
            ElementRef::VertexFace { vertex, face, .. } => mesh
                .faces
                .get(*face)
                .map(|f| f.contains(vertex))
                .unwrap_or(false),
        }
    }

    /// Vertex indices bounding an element
    pub(crate) fn vertex_indices(&self, element: &ElementRef) -> Result<Vec<usize>, HostError> {
        let mesh = self.find_mesh(element)?;
        let missing = || HostError::Missing(element.to_string());
        let indices = match element {
            ElementRef::Object { .. } => (0..mesh.vertices.len()).collect(),
            ElementRef::Vertex { index, .. } => vec![*index],
            ElementRef::VertexFace { vertex, .. } => vec![*vertex],
            ElementRef::Edge { index, .. } => {
                self.mesh_edges(&mesh.name).get(*index).ok_or_else(missing)?.to_vec()
            }
            ElementRef::Face { index, .. } => mesh.faces.get(*index).ok_or_else(missing)?.clone(),
        };
        if indices.iter().any(|&i| i >= mesh.vertices.len()) {
            return Err(missing());
        }
        Ok(indices)
    }
}

/// Face normal by Newell's method; zero for degenerate faces
pub(crate) fn face_normal(mesh: &Mesh, face: usize) -> DVec3 {
    let Some(indices) = mesh.faces.get(face) else {
        return DVec3::ZERO;
    };
    let points: Vec<DVec3> = indices
        .iter()
        .filter_map(|&i| mesh.vertices.get(i))
        .map(|p| DVec3::from_array(*p))
        .collect();
    let mut normal = DVec3::ZERO;
    for (i, current) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal.normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_face_normals_of_cube_point_outward() {
        let cube = fixtures::unit_cube("cube");
        let center = DVec3::splat(0.5);
        for face in 0..cube.faces.len() {
            let n = face_normal(&cube, face);
            assert!((n.length() - 1.0).abs() < 1e-9);
            let first = DVec3::from_array(cube.vertices[cube.faces[face][0]]);
            assert!(n.dot(first - center) > 0.0, "face {face} points inward");
        }
    }

    #[test]
    fn test_degenerate_face_normal_is_zero() {
        let mesh = Mesh::new("line", vec![[0.0; 3], [1.0, 0.0, 0.0]], vec![vec![0, 1]]);
        assert_eq!(face_normal(&mesh, 0), DVec3::ZERO);
        assert_eq!(face_normal(&mesh, 7), DVec3::ZERO);
    }

    #[test]
    fn test_resolves() {
        let scene = MeshScene::new(vec![fixtures::unit_cube("cube")]);
        assert!(scene.resolves(&ElementRef::object("cube")));
        assert!(scene.resolves(&ElementRef::edge("cube", 11)));
        assert!(!scene.resolves(&ElementRef::edge("cube", 12)));
        assert!(!scene.resolves(&ElementRef::vertex_face("cube", 7, 0)));
        assert!(!scene.resolves(&ElementRef::object("sphere")));
    }

    #[test]
    fn test_edge_cache_follows_edits_and_undo() {
        let mut scene = MeshScene::new(vec![fixtures::unit_cube("cube")]);
        assert_eq!(scene.mesh_edges("cube").len(), 12);

        scene.add_mesh(fixtures::square_plane("cube", 1.0));
        assert_eq!(scene.mesh_edges("cube").len(), 4);
        assert!(!scene.resolves(&ElementRef::edge("cube", 4)));
        assert_eq!(
            scene.vertex_indices(&ElementRef::edge("cube", 3)).unwrap(),
            vec![0, 3]
        );

        assert!(scene.undo_geometry());
        assert_eq!(scene.mesh_edges("cube").len(), 12);
        assert!(scene.mesh_edges("ghost").is_empty());
    }

    #[test]
    fn test_edit_drops_vanished_components_from_selection() {
        let mut scene = MeshScene::new(vec![fixtures::unit_cube("cube")]);
        scene.change_selection(|s| {
            s.set(&[ElementRef::vertex("cube", 7), ElementRef::face("cube", 0)])
        });
        scene.add_mesh(fixtures::square_plane("cube", 1.0));
        assert_eq!(scene.selection_state().all(), &[ElementRef::face("cube", 0)]);
    }
}
