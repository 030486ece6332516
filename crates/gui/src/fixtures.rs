//! Factory functions for creating test meshes.
//!
//! Provides convenient helpers to construct `Mesh` values used in tests, the
//! JSON command interface and the Create menu of the desktop app.

use shared::Mesh;

// ── Mesh factories ──────────────────────────────────────────────

/// Axis-aligned box with one corner at the origin. Faces wind outward.
pub fn box_mesh(name: &str, w: f64, h: f64, d: f64) -> Mesh {
    Mesh::new(
        name,
        vec![
            [0.0, 0.0, 0.0],
            [w, 0.0, 0.0],
            [w, h, 0.0],
            [0.0, h, 0.0],
            [0.0, 0.0, d],
            [w, 0.0, d],
            [w, h, d],
            [0.0, h, d],
        ],
        vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![3, 7, 6, 2],
            vec![0, 4, 7, 3],
            vec![1, 2, 6, 5],
        ],
    )
}

/// Create a unit cube (1x1x1).
pub fn unit_cube(name: &str) -> Mesh {
    box_mesh(name, 1.0, 1.0, 1.0)
}

/// Create a box translated by `pos`.
pub fn box_at(name: &str, w: f64, h: f64, d: f64, pos: [f64; 3]) -> Mesh {
    let mut mesh = box_mesh(name, w, h, d);
    for v in &mut mesh.vertices {
        for axis in 0..3 {
            v[axis] += pos[axis];
        }
    }
    mesh
}

/// Square in the XY plane from the origin to (size, size), facing +Z.
pub fn square_plane(name: &str, size: f64) -> Mesh {
    Mesh::new(
        name,
        vec![
            [0.0, 0.0, 0.0],
            [size, 0.0, 0.0],
            [size, size, 0.0],
            [0.0, size, 0.0],
        ],
        vec![vec![0, 1, 2, 3]],
    )
}

/// A single triangle.
pub fn triangle(name: &str, a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Mesh {
    Mesh::new(name, vec![a, b, c], vec![vec![0, 1, 2]])
}

/// A lone edge between two points (stored as a two-vertex face).
pub fn segment(name: &str, a: [f64; 3], b: [f64; 3]) -> Mesh {
    Mesh::new(name, vec![a, b], vec![vec![0, 1]])
}

/// Regular n-gon of radius `r` in the XY plane, centered at the origin.
pub fn ngon(name: &str, sides: usize, r: f64) -> Mesh {
    let vertices = (0..sides)
        .map(|i| {
            let a = i as f64 / sides as f64 * std::f64::consts::TAU;
            [r * a.cos(), r * a.sin(), 0.0]
        })
        .collect();
    Mesh::new(name, vertices, vec![(0..sides).collect()])
}

/// Quad grid of `cells` x `cells` unit squares in the XY plane, facing +Z.
pub fn grid(name: &str, cells: usize) -> Mesh {
    let side = cells + 1;
    let vertices = (0..side * side)
        .map(|i| [(i % side) as f64, (i / side) as f64, 0.0])
        .collect();
    let faces = (0..cells * cells)
        .map(|c| {
            let corner = (c / cells) * side + c % cells;
            vec![corner, corner + 1, corner + side + 1, corner + side]
        })
        .collect();
    Mesh::new(name, vertices, faces)
}

/// Points with no faces, so there are no edges or faces to annotate.
pub fn point_cloud(name: &str, points: Vec<[f64; 3]>) -> Mesh {
    Mesh::new(name, points, Vec::new())
}
