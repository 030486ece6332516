//! Geometry sampler: derives the point or vector an annotation shows.

use glam::DVec3;
use shared::{AnnotateError, ElementRef, Precision, Sample, SampleKind};

use crate::host::SceneHost;

/// Sample `element` as `kind`, rounded to `precision`.
pub fn sample(
    host: &dyn SceneHost,
    element: &ElementRef,
    kind: SampleKind,
    precision: Precision,
) -> Result<Sample, AnnotateError> {
    let expected = kind.required_kind();
    if element.kind() != expected {
        return Err(AnnotateError::InvalidElementKind {
            element: element.to_string(),
            expected,
        });
    }

    let raw = match kind {
        SampleKind::RawPosition => host.point_position(element)?,
        SampleKind::VertexNormal => host.vertex_face_normal(element)?,
        SampleKind::EdgeMidpoint | SampleKind::FaceCentroid => {
            let points = host
                .to_vertices(element)?
                .iter()
                .map(|v| host.point_position(v))
                .collect::<Result<Vec<_>, _>>()?;
            average_position(&points)?
        }
    };

    Ok(Sample::new(raw, precision))
}

/// Unweighted per-axis mean of `points`.
pub fn average_position(points: &[[f64; 3]]) -> Result<[f64; 3], AnnotateError> {
    if points.is_empty() {
        return Err(AnnotateError::EmptyElementSet);
    }
    let sum = points
        .iter()
        .fold(DVec3::ZERO, |acc, p| acc + DVec3::from_array(*p));
    Ok((sum / points.len() as f64).to_array())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::state::scene::MeshScene;
    use shared::ElementKind;

    fn scene_with(mesh: shared::Mesh) -> MeshScene {
        let mut scene = MeshScene::default();
        scene.add_mesh(mesh);
        scene
    }

    #[test]
    fn test_average_of_points() {
        let avg = average_position(&[[0.0, 0.0, 0.0], [2.0, 4.0, -6.0]]).unwrap();
        assert_eq!(avg, [1.0, 2.0, -3.0]);
    }

    #[test]
    fn test_average_single_point() {
        assert_eq!(average_position(&[[1.5, 2.5, 3.5]]).unwrap(), [1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_average_empty_fails() {
        assert_eq!(average_position(&[]), Err(AnnotateError::EmptyElementSet));
    }

    #[test]
    fn test_square_face_centroid() {
        let scene = scene_with(fixtures::square_plane("plane", 2.0));
        let s = sample(
            &scene,
            &ElementRef::face("plane", 0),
            SampleKind::FaceCentroid,
            Precision::new(2),
        )
        .unwrap();
        assert_eq!(s.position, [1.0, 1.0, 0.0]);
        assert_eq!(s.label(), "(1.00, 1.00, 0.00)");
    }

    #[test]
    fn test_edge_midpoint() {
        let scene = scene_with(fixtures::segment("seg", [0.0; 3], [1.0, 1.0, 1.0]));
        let s = sample(
            &scene,
            &ElementRef::edge("seg", 0),
            SampleKind::EdgeMidpoint,
            Precision::new(3),
        )
        .unwrap();
        assert_eq!(s.position, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_raw_position_rounded() {
        let mesh = shared::Mesh::new(
            "tri",
            vec![[1.23456, -2.5555, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![vec![0, 1, 2]],
        );
        let scene = scene_with(mesh);
        let s = sample(
            &scene,
            &ElementRef::vertex("tri", 0),
            SampleKind::RawPosition,
            Precision::new(2),
        )
        .unwrap();
        assert_eq!(s.position, [1.23, -2.56, 0.0]);
    }

    #[test]
    fn test_vertex_normal_of_flat_face() {
        let scene = scene_with(fixtures::square_plane("plane", 1.0));
        let s = sample(
            &scene,
            &ElementRef::vertex_face("plane", 2, 0),
            SampleKind::VertexNormal,
            Precision::new(2),
        )
        .unwrap();
        assert_eq!(s.position, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let scene = scene_with(fixtures::unit_cube("cube"));
        let err = sample(
            &scene,
            &ElementRef::face("cube", 0),
            SampleKind::RawPosition,
            Precision::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AnnotateError::InvalidElementKind {
                element: "cube.f[0]".to_string(),
                expected: ElementKind::Vertex,
            }
        );

        let err = sample(
            &scene,
            &ElementRef::object("cube"),
            SampleKind::VertexNormal,
            Precision::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AnnotateError::InvalidElementKind { .. }));
    }

    #[test]
    fn test_stale_reference() {
        let scene = scene_with(fixtures::unit_cube("cube"));
        let err = sample(
            &scene,
            &ElementRef::vertex("cube", 99),
            SampleKind::RawPosition,
            Precision::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AnnotateError::StaleReference(_)));

        let err = sample(
            &scene,
            &ElementRef::edge("gone", 0),
            SampleKind::EdgeMidpoint,
            Precision::default(),
        )
        .unwrap_err();
        assert!(err.is_skippable());
    }

    #[test]
    fn test_degenerate_face_is_empty() {
        let mesh = shared::Mesh::new("bad", vec![[0.0; 3]], vec![vec![]]);
        let scene = scene_with(mesh);
        let err = sample(
            &scene,
            &ElementRef::face("bad", 0),
            SampleKind::FaceCentroid,
            Precision::default(),
        )
        .unwrap_err();
        assert_eq!(err, AnnotateError::EmptyElementSet);
    }
}
