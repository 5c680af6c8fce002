//! Tangent-space generation.

use bake_types::{IndexedMesh, Point3, Vector2, Vector3, Vector4};

use crate::error::{TangentError, TangentResult};

/// Corners spanning at most this much signed UV area are treated as
/// degenerate and contribute nothing.
const DEGENERATE_UV_AREA: f32 = 1e-10;

/// Accumulated directions at most this long fall back to a replacement
/// during orthogonalization.
const DEGENERATE_DIRECTION: f32 = 1e-10;

/// Generates one tangent per vertex, with bitangent handedness in `w`.
///
/// Each triangle corner derives a tangent and bitangent from the triangle's
/// edge vectors and UV deltas; contributions are summed per vertex over all
/// incident triangles, normalized, orthogonalized against the vertex normal
/// and packed as `(t.x, t.y, t.z, w)` where `w` is `-1.0` for mirrored UV
/// islands and `1.0` otherwise.
///
/// Vertices that receive no usable contribution, because their UVs are
/// collapsed or all their triangles are degenerate, get a deterministic
/// tangent built from the coordinate axis least aligned with their normal.
/// The output never contains NaN for finite input.
///
/// # Errors
///
/// Fails when the mesh lacks per-vertex normals or texture coordinates,
/// when the index count is not a multiple of three, or when an index is out
/// of range.
pub fn generate_tangents(mesh: &IndexedMesh) -> TangentResult<Vec<Vector4<f32>>> {
    let vertices = mesh.positions.len();
    if mesh.normals.len() != vertices {
        return Err(TangentError::MissingNormals {
            vertices,
            normals: mesh.normals.len(),
        });
    }
    if mesh.texcoords.len() != vertices {
        return Err(TangentError::MissingTexcoords {
            vertices,
            texcoords: mesh.texcoords.len(),
        });
    }
    validate_indices(&mesh.indices, vertices)?;

    let (tangents, bitangents) = accumulate_corner_contributions(mesh);

    Ok(mesh
        .normals
        .iter()
        .zip(&tangents)
        .zip(&bitangents)
        .map(|((normal, tangent), bitangent)| orthonormal_tangent(normal, tangent, bitangent))
        .collect())
}

/// Sums corner tangents and bitangents into per-vertex directions.
fn accumulate_corner_contributions(mesh: &IndexedMesh) -> (Vec<Vector3<f32>>, Vec<Vector3<f32>>) {
    let mut tangents = vec![Vector3::zeros(); mesh.positions.len()];
    let mut bitangents = vec![Vector3::zeros(); mesh.positions.len()];

    for triangle in mesh.indices.chunks_exact(3) {
        for corner in 0..3 {
            let i0 = triangle[corner] as usize;
            let i1 = triangle[(corner + 1) % 3] as usize;
            let i2 = triangle[(corner + 2) % 3] as usize;

            if let Some((tangent, bitangent)) = corner_tangent(
                &mesh.positions[i0],
                &mesh.positions[i1],
                &mesh.positions[i2],
                &mesh.texcoords[i0],
                &mesh.texcoords[i1],
                &mesh.texcoords[i2],
            ) {
                tangents[i0] += tangent;
                bitangents[i0] += bitangent;
            }
        }
    }

    for sum in tangents.iter_mut().chain(bitangents.iter_mut()) {
        *sum = sum
            .try_normalize(DEGENERATE_DIRECTION)
            .unwrap_or_else(Vector3::zeros);
    }
    (tangents, bitangents)
}

/// Computes the unnormalized tangent and bitangent at one triangle corner
/// from its two outgoing edges and their UV deltas.
///
/// Returns `None` when the corner spans no area in UV space.
fn corner_tangent(
    p0: &Point3<f32>,
    p1: &Point3<f32>,
    p2: &Point3<f32>,
    t0: &Vector2<f32>,
    t1: &Vector2<f32>,
    t2: &Vector2<f32>,
) -> Option<(Vector3<f32>, Vector3<f32>)> {
    let edge1 = p1 - p0;
    let edge2 = p2 - p0;
    let duv1 = t1 - t0;
    let duv2 = t2 - t0;

    let area = duv1.x * duv2.y - duv2.x * duv1.y;
    if area.abs() <= DEGENERATE_UV_AREA {
        return None;
    }

    let r = 1.0 / area;
    let tangent = (edge1 * duv2.y - edge2 * duv1.y) * r;
    let bitangent = (edge2 * duv1.x - edge1 * duv2.x) * r;
    Some((tangent, bitangent))
}

/// Builds the final packed tangent for one vertex.
///
/// The tangent is made perpendicular to the normal, the bitangent
/// perpendicular to both, and the handedness of the resulting frame is
/// recorded in `w`.
fn orthonormal_tangent(
    normal: &Vector3<f32>,
    tangent: &Vector3<f32>,
    bitangent: &Vector3<f32>,
) -> Vector4<f32> {
    let rejected = tangent - normal * normal.dot(tangent);
    let t = rejected
        .try_normalize(DEGENERATE_DIRECTION)
        .unwrap_or_else(|| fallback_tangent(normal));

    let rejected = bitangent - normal * normal.dot(bitangent) - t * t.dot(bitangent);
    let b = rejected
        .try_normalize(DEGENERATE_DIRECTION)
        .unwrap_or_else(|| normal.cross(&t));

    let w = if normal.cross(&t).dot(&b) < 0.0 { -1.0 } else { 1.0 };
    Vector4::new(t.x, t.y, t.z, w)
}

/// Deterministic replacement tangent for vertices without a usable UV
/// gradient: the coordinate axis least aligned with the normal, made
/// perpendicular to it.
fn fallback_tangent(normal: &Vector3<f32>) -> Vector3<f32> {
    let axis = if normal.x.abs() <= normal.y.abs() && normal.x.abs() <= normal.z.abs() {
        Vector3::x()
    } else if normal.y.abs() <= normal.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    let rejected = axis - normal * normal.dot(&axis);
    rejected.try_normalize(DEGENERATE_DIRECTION).unwrap_or(axis)
}

pub(crate) fn validate_indices(indices: &[u32], vertices: usize) -> TangentResult<()> {
    if indices.len() % 3 != 0 {
        return Err(TangentError::NotTriangulated {
            count: indices.len(),
        });
    }
    for &index in indices {
        if index as usize >= vertices {
            return Err(TangentError::IndexOutOfRange { index, vertices });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bake_types::Aabb;

    fn quad(texcoords: [[f32; 2]; 4]) -> IndexedMesh {
        IndexedMesh {
            positions: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vector3::z(); 4],
            texcoords: texcoords.iter().map(|uv| Vector2::from(*uv)).collect(),
            tangents: Vec::new(),
            indices: vec![0, 1, 2, 0, 2, 3],
            bounds: Aabb::default(),
        }
    }

    #[test]
    fn flat_quad_tangents_follow_the_u_axis() {
        let mesh = quad([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        let tangents = generate_tangents(&mesh).unwrap();

        assert_eq!(tangents.len(), 4);
        for tangent in &tangents {
            assert_relative_eq!(tangent.x, 1.0, epsilon = 1e-6);
            assert_relative_eq!(tangent.y, 0.0, epsilon = 1e-6);
            assert_relative_eq!(tangent.z, 0.0, epsilon = 1e-6);
            assert_relative_eq!(tangent.w, 1.0);
        }
    }

    #[test]
    fn mirrored_u_flips_the_handedness() {
        let mesh = quad([[1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        let tangents = generate_tangents(&mesh).unwrap();

        for tangent in &tangents {
            assert_relative_eq!(tangent.x, -1.0, epsilon = 1e-6);
            assert_relative_eq!(tangent.w, -1.0);
        }
    }

    #[test]
    fn collapsed_uvs_fall_back_without_nan() {
        let mesh = quad([[0.5, 0.5]; 4]);
        let tangents = generate_tangents(&mesh).unwrap();

        for tangent in &tangents {
            assert!(tangent.iter().all(|component| component.is_finite()));
            // Normal is +Z, so the fallback picks the X axis.
            assert_relative_eq!(tangent.x, 1.0, epsilon = 1e-6);
            assert_relative_eq!(tangent.w, 1.0);
        }
    }

    #[test]
    fn tangents_are_unit_length_and_perpendicular_to_normals() {
        let mesh = quad([[0.0, 0.0], [1.0, 0.1], [0.9, 1.0], [0.1, 0.8]]);
        let tangents = generate_tangents(&mesh).unwrap();

        for (tangent, normal) in tangents.iter().zip(&mesh.normals) {
            let t = tangent.xyz();
            assert_relative_eq!(t.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(t.dot(normal), 0.0, epsilon = 1e-5);
            assert!(tangent.w == 1.0 || tangent.w == -1.0);
        }
    }

    #[test]
    fn missing_attributes_are_rejected() {
        let mut mesh = quad([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        mesh.normals.pop();
        assert!(matches!(
            generate_tangents(&mesh),
            Err(TangentError::MissingNormals {
                vertices: 4,
                normals: 3
            })
        ));

        let mut mesh = quad([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        mesh.texcoords.clear();
        assert!(matches!(
            generate_tangents(&mesh),
            Err(TangentError::MissingTexcoords { .. })
        ));
    }

    #[test]
    fn broken_index_streams_are_rejected() {
        let mut mesh = quad([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        mesh.indices.pop();
        assert!(matches!(
            generate_tangents(&mesh),
            Err(TangentError::NotTriangulated { count: 5 })
        ));

        let mut mesh = quad([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        mesh.indices[2] = 11;
        assert!(matches!(
            generate_tangents(&mesh),
            Err(TangentError::IndexOutOfRange {
                index: 11,
                vertices: 4
            })
        ));
    }
}
