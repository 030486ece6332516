//! `SceneHost` implementation for the in-memory scene

use shared::{AnnotationName, ElementKind, ElementRef, Mesh};

use super::components::face_normal;
use super::{AnnotationNode, MeshScene};
use crate::host::{HostError, HostEvent, HostEventKind, ListenerId, SceneHost};

const DEFAULT_NODE_NAME: &str = "annotation";

impl SceneHost for MeshScene {
    fn has_geometry(&self) -> bool {
        self.meshes.iter().any(|m| !m.vertices.is_empty())
    }

    fn selection(&self) -> Vec<ElementRef> {
        self.selection.all().to_vec()
    }

    fn set_selection(&mut self, elements: &[ElementRef]) {
        self.change_selection(|s| s.set(elements));
    }

    fn to_vertices(&self, element: &ElementRef) -> Result<Vec<ElementRef>, HostError> {
        let object = element.object_name();
        Ok(self
            .vertex_indices(element)?
            .into_iter()
            .map(|i| ElementRef::vertex(object, i))
            .collect())
    }

    fn point_position(&self, element: &ElementRef) -> Result<[f64; 3], HostError> {
        let ElementRef::Vertex { index, .. } = element else {
            return Err(HostError::WrongKind {
                element: element.to_string(),
                expected: ElementKind::Vertex,
            });
        };
        self.find_mesh(element)?
            .vertices
            .get(*index)
            .copied()
            .ok_or_else(|| HostError::Missing(element.to_string()))
    }

    fn vertex_face_normal(&self, element: &ElementRef) -> Result<[f64; 3], HostError> {
        let ElementRef::VertexFace { vertex, face, .. } = element else {
            return Err(HostError::WrongKind {
                element: element.to_string(),
                expected: ElementKind::VertexFace,
            });
        };
        if !self.resolves(element) {
            return Err(HostError::Missing(element.to_string()));
        }
        let mesh = self.find_mesh(element)?;
        if let Some(n) = mesh.normals.get(&Mesh::normal_key(*vertex, *face)) {
            return Ok(*n);
        }
        Ok(face_normal(mesh, *face).to_array())
    }

    fn count(&self, object: &str, kind: ElementKind) -> Result<usize, HostError> {
        let mesh = self
            .mesh(object)
            .ok_or_else(|| HostError::Missing(object.to_string()))?;
        Ok(match kind {
            ElementKind::Object => 1,
            ElementKind::Vertex => mesh.vertices.len(),
            ElementKind::Edge => self.mesh_edges(object).len(),
            ElementKind::Face => mesh.faces.len(),
            ElementKind::VertexFace => mesh.faces.iter().map(|f| f.len()).sum(),
        })
    }

    fn subscribe(&mut self, kind: HostEventKind) -> ListenerId {
        self.next_listener += 1;
        let id = self.next_listener;
        self.listeners.push((id, kind));
        id
    }

    fn unsubscribe(&mut self, listener: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != listener);
        self.pending.retain(|e| e.listener != listener);
        self.listeners.len() != before
    }

    fn poll_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.pending)
    }

    fn create_annotation(
        &mut self,
        base_name: &str,
        anchor: [f64; 3],
        text: &str,
        target: &ElementRef,
    ) -> Result<AnnotationName, HostError> {
        if !self.resolves(target) {
            return Err(HostError::Missing(target.to_string()));
        }
        let base = match base_name.trim() {
            "" => DEFAULT_NODE_NAME,
            b => b,
        };
        let name = self.numbered_name(base);
        self.insert_node(
            name.clone(),
            AnnotationNode {
                anchor,
                text: text.to_string(),
                target: target.clone(),
            },
        );
        Ok(name)
    }

    fn annotation_names(&self) -> Vec<AnnotationName> {
        self.nodes.keys().cloned().collect()
    }

    fn delete_node(&mut self, name: &str) -> bool {
        self.remove_node(name).is_some()
    }

    fn rename_node(&mut self, name: &str, new_name: &str) -> Result<AnnotationName, HostError> {
        if self.is_geometry_name(new_name) {
            return Err(HostError::NameTaken(new_name.to_string()));
        }
        let node = self
            .remove_node(name)
            .ok_or_else(|| HostError::Missing(name.to_string()))?;
        let assigned = self.unique_name(new_name);
        self.insert_node(assigned.clone(), node);
        Ok(assigned)
    }

    fn is_geometry_name(&self, name: &str) -> bool {
        self.meshes.iter().any(|m| m.name == name)
    }

    fn undo(&mut self) -> bool {
        self.undo_geometry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn cube_scene() -> MeshScene {
        MeshScene::new(vec![fixtures::unit_cube("cube")])
    }

    #[test]
    fn test_empty_scene_has_no_geometry() {
        assert!(!MeshScene::default().has_geometry());
        assert!(cube_scene().has_geometry());
    }

    #[test]
    fn test_counts() {
        let scene = cube_scene();
        assert_eq!(scene.count("cube", ElementKind::Vertex).unwrap(), 8);
        assert_eq!(scene.count("cube", ElementKind::Edge).unwrap(), 12);
        assert_eq!(scene.count("cube", ElementKind::Face).unwrap(), 6);
        assert_eq!(scene.count("cube", ElementKind::VertexFace).unwrap(), 24);
        assert!(scene.count("nope", ElementKind::Vertex).is_err());
    }

    #[test]
    fn test_to_vertices_of_edge_and_face() {
        let scene = cube_scene();
        let verts = scene.to_vertices(&ElementRef::edge("cube", 0)).unwrap();
        assert_eq!(verts.len(), 2);
        let verts = scene.to_vertices(&ElementRef::face("cube", 1)).unwrap();
        assert_eq!(verts.len(), 4);
        assert!(scene.to_vertices(&ElementRef::face("cube", 6)).is_err());
    }

    #[test]
    fn test_point_position_requires_vertex() {
        let scene = cube_scene();
        assert_eq!(
            scene.point_position(&ElementRef::vertex("cube", 6)).unwrap(),
            [1.0, 1.0, 1.0]
        );
        assert!(matches!(
            scene.point_position(&ElementRef::edge("cube", 0)),
            Err(HostError::WrongKind { .. })
        ));
    }

    #[test]
    fn test_explicit_vertex_face_normal_wins() {
        let mut mesh = fixtures::square_plane("plane", 1.0);
        mesh.normals
            .insert(Mesh::normal_key(0, 0), [0.0, 0.6, 0.8]);
        let scene = MeshScene::new(vec![mesh]);
        let n = scene
            .vertex_face_normal(&ElementRef::vertex_face("plane", 0, 0))
            .unwrap();
        assert_eq!(n, [0.0, 0.6, 0.8]);
        let n = scene
            .vertex_face_normal(&ElementRef::vertex_face("plane", 1, 0))
            .unwrap();
        assert_eq!(n, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_selection_events_reach_subscribers_only() {
        let mut scene = cube_scene();
        let some = scene.subscribe(HostEventKind::SomethingSelected);
        scene.select(&ElementRef::object("cube"));
        let events = scene.poll_events();
        assert_eq!(
            events,
            vec![HostEvent {
                listener: some,
                kind: HostEventKind::SomethingSelected
            }]
        );
        assert!(scene.poll_events().is_empty());

        let none = scene.subscribe(HostEventKind::NothingSelected);
        scene.clear_selection();
        let events = scene.poll_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].listener, none);

        assert!(scene.unsubscribe(none));
        assert!(!scene.unsubscribe(none));
    }

    #[test]
    fn test_reselecting_same_selection_is_silent() {
        let mut scene = cube_scene();
        scene.subscribe(HostEventKind::SelectionChanged);
        scene.select(&ElementRef::object("cube"));
        assert_eq!(scene.poll_events().len(), 1);
        scene.select(&ElementRef::object("cube"));
        assert!(scene.poll_events().is_empty());
    }

    #[test]
    fn test_annotation_nodes_lifecycle() {
        let mut scene = cube_scene();
        let target = ElementRef::vertex("cube", 0);
        let a = scene
            .create_annotation("annotation", [0.0; 3], "a", &target)
            .unwrap();
        let b = scene
            .create_annotation("annotation", [1.0; 3], "b", &target)
            .unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("annotation1", "annotation2"));

        let renamed = scene.rename_node(&a, "MyLabel").unwrap();
        assert_eq!(renamed, "MyLabel");
        let renamed = scene.rename_node(&b, "MyLabel").unwrap();
        assert_eq!(renamed, "MyLabel1");

        assert!(matches!(
            scene.rename_node("MyLabel", "cube"),
            Err(HostError::NameTaken(_))
        ));
        assert!(scene.nodes().contains_key("MyLabel"));

        assert!(scene.delete_node("MyLabel"));
        assert!(!scene.delete_node("MyLabel"));
        assert_eq!(scene.annotation_names(), vec!["MyLabel1".to_string()]);
    }

    #[test]
    fn test_annotation_on_missing_target_fails() {
        let mut scene = cube_scene();
        let err = scene
            .create_annotation("annotation", [0.0; 3], "x", &ElementRef::vertex("cube", 40))
            .unwrap_err();
        assert!(matches!(err, HostError::Missing(_)));
    }

    #[test]
    fn test_geometry_edit_and_undo() {
        let mut scene = cube_scene();
        let geo = scene.subscribe(HostEventKind::GeometryChanged);
        scene.translate("cube", [1.0, 0.0, 0.0]).unwrap();
        assert_eq!(
            scene.point_position(&ElementRef::vertex("cube", 0)).unwrap(),
            [1.0, 0.0, 0.0]
        );
        assert_eq!(scene.poll_events()[0].listener, geo);

        assert!(scene.undo());
        assert_eq!(
            scene.point_position(&ElementRef::vertex("cube", 0)).unwrap(),
            [0.0, 0.0, 0.0]
        );
        assert!(!scene.undo());
    }

    #[test]
    fn test_removing_mesh_prunes_selection() {
        let mut scene = cube_scene();
        scene.select(&ElementRef::face("cube", 2));
        assert!(scene.remove_mesh("cube"));
        assert!(scene.selection().is_empty());
        assert!(!scene.has_geometry());
    }
}
