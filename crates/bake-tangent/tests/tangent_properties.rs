//! Property-based tests for tangent and normal generation.
//!
//! Random meshes here include degenerate triangles and collapsed UVs on
//! purpose: whatever the input, generation must stay finite, unit length
//! and orthogonal to the per-vertex normals.

use bake_tangent::{compute_vertex_normals, generate_tangents};
use bake_types::{Aabb, IndexedMesh, Point3, Vector2, Vector3};
use proptest::collection::vec;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_position() -> impl Strategy<Value = Point3<f32>> {
    (-10.0f32..10.0, -10.0f32..10.0, -10.0f32..10.0)
        .prop_map(|(x, y, z)| Point3::new(x, y, z))
}

fn arb_unit_normal() -> impl Strategy<Value = Vector3<f32>> {
    (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0).prop_map(|(x, y, z)| {
        Vector3::new(x, y, z)
            .try_normalize(1e-3)
            .unwrap_or_else(Vector3::z)
    })
}

fn arb_texcoord() -> impl Strategy<Value = Vector2<f32>> {
    (0.0f32..4.0, 0.0f32..4.0).prop_map(|(u, v)| Vector2::new(u, v))
}

/// Indexed meshes with random attributes and random (possibly degenerate)
/// triangles over those vertices.
fn arb_mesh() -> impl Strategy<Value = IndexedMesh> {
    (4usize..24, 1usize..12).prop_flat_map(|(vertices, triangles)| {
        #[allow(clippy::cast_possible_truncation)]
        let max_index = vertices as u32;
        (
            vec(arb_position(), vertices),
            vec(arb_unit_normal(), vertices),
            vec(arb_texcoord(), vertices),
            vec(0..max_index, triangles * 3),
        )
            .prop_map(|(positions, normals, texcoords, indices)| IndexedMesh {
                positions,
                normals,
                texcoords,
                tangents: Vec::new(),
                indices,
                bounds: Aabb::default(),
            })
    })
}

// ============================================================================
// Tangent generation stays well formed
// ============================================================================

proptest! {
    #[test]
    fn tangents_are_finite_unit_and_orthogonal(mesh in arb_mesh()) {
        let tangents = generate_tangents(&mesh).unwrap();
        prop_assert_eq!(tangents.len(), mesh.vertex_count());

        for (tangent, normal) in tangents.iter().zip(&mesh.normals) {
            prop_assert!(tangent.iter().all(|component| component.is_finite()));

            let t = tangent.xyz();
            prop_assert!((t.norm() - 1.0).abs() < 1e-3, "tangent norm {}", t.norm());
            prop_assert!(t.dot(normal).abs() < 1e-3, "tangent not orthogonal");
            prop_assert!(tangent.w == 1.0 || tangent.w == -1.0);
        }
    }

    #[test]
    fn generation_is_deterministic(mesh in arb_mesh()) {
        let first = generate_tangents(&mesh).unwrap();
        let second = generate_tangents(&mesh).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Normal reconstruction stays well formed
// ============================================================================

proptest! {
    #[test]
    fn reconstructed_normals_are_finite_and_unit_or_zero(mesh in arb_mesh()) {
        let normals = compute_vertex_normals(&mesh.positions, &mesh.indices).unwrap();
        prop_assert_eq!(normals.len(), mesh.vertex_count());

        for normal in &normals {
            prop_assert!(normal.iter().all(|component| component.is_finite()));
            let norm = normal.norm();
            prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-3, "norm {}", norm);
        }
    }
}
