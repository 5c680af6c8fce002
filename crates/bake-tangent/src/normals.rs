//! Vertex normal reconstruction.

use bake_types::{Point3, Vector3};

use crate::error::TangentResult;
use crate::tangent::validate_indices;

/// Face cross products at most this long count as zero area.
const DEGENERATE_FACE: f32 = 1e-10;

/// Reconstructs smooth per-vertex normals from positions and indices.
///
/// Each triangle adds its unit face normal to all three of its vertices;
/// the sums are normalized at the end. Faces contribute equally regardless
/// of area, and degenerate faces contribute nothing. Vertices referenced by
/// no triangle, or only by cancelling faces, end up with a zero normal.
///
/// # Errors
///
/// Fails when the index count is not a multiple of three or when an index
/// is out of range.
pub fn compute_vertex_normals(
    positions: &[Point3<f32>],
    indices: &[u32],
) -> TangentResult<Vec<Vector3<f32>>> {
    validate_indices(indices, positions.len())?;

    let mut normals = vec![Vector3::zeros(); positions.len()];
    for triangle in indices.chunks_exact(3) {
        let i0 = triangle[0] as usize;
        let i1 = triangle[1] as usize;
        let i2 = triangle[2] as usize;

        let cross = (positions[i1] - positions[i0]).cross(&(positions[i2] - positions[i0]));
        if let Some(face_normal) = cross.try_normalize(DEGENERATE_FACE) {
            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }
    }

    for normal in &mut normals {
        *normal = normal
            .try_normalize(DEGENERATE_FACE)
            .unwrap_or_else(Vector3::zeros);
    }
    Ok(normals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bake_types::TriangleSoup;
    use bake_weld::{WeldParams, index_soup};

    #[test]
    fn flat_triangle_gets_its_face_normal() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let normals = compute_vertex_normals(&positions, &[0, 1, 2]).unwrap();
        for normal in &normals {
            assert_relative_eq!(*normal, Vector3::z(), epsilon = 1e-6);
        }
    }

    #[test]
    fn cube_corners_average_to_the_diagonal() {
        // The welded cube's source normals are exactly the corner diagonals,
        // so reconstruction from scratch must reproduce them.
        let mesh = index_soup(
            &TriangleSoup::unit_cube(),
            &WeldParams::new().with_tolerance(1e-4),
        )
        .unwrap();

        let reconstructed = compute_vertex_normals(&mesh.positions, &mesh.indices).unwrap();
        assert_eq!(reconstructed.len(), 8);
        for (reconstructed, original) in reconstructed.iter().zip(&mesh.normals) {
            assert_relative_eq!(*reconstructed, *original, epsilon = 1e-5);
        }
    }

    #[test]
    fn degenerate_faces_contribute_nothing() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let normals = compute_vertex_normals(&positions, &[0, 1, 2]).unwrap();
        for normal in &normals {
            assert_eq!(*normal, Vector3::zeros());
        }
    }

    #[test]
    fn unreferenced_vertices_get_zero_normals() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(9.0, 9.0, 9.0),
        ];
        let normals = compute_vertex_normals(&positions, &[0, 1, 2]).unwrap();
        assert_relative_eq!(normals[0], Vector3::z(), epsilon = 1e-6);
        assert_eq!(normals[3], Vector3::zeros());
    }

    #[test]
    fn bad_indices_are_rejected() {
        let positions = vec![Point3::origin(); 3];
        assert!(compute_vertex_normals(&positions, &[0, 1]).is_err());
        assert!(compute_vertex_normals(&positions, &[0, 1, 7]).is_err());
    }
}
