//! Indexed triangle mesh with welded vertices.

use nalgebra::{Point3, Vector2, Vector3, Vector4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Aabb, TriangleSoup};

/// A triangle mesh with unique vertices and a `u32` index stream.
///
/// Produced by welding a [`TriangleSoup`]: every index triple describes one
/// triangle, and vertices shared between triangles appear once in the
/// attribute arrays. `bounds` is the tight bounding box of the positions.
///
/// Normals and texture coordinates mirror the soup the mesh came from, one
/// entry per unique vertex or empty. Tangents start out empty and are filled
/// in by tangent-space generation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Unique vertex positions.
    pub positions: Vec<Point3<f32>>,
    /// Unique vertex normals, empty or one per vertex.
    pub normals: Vec<Vector3<f32>>,
    /// Unique vertex texture coordinates, empty or one per vertex.
    pub texcoords: Vec<Vector2<f32>>,
    /// Unique vertex tangents with handedness in `w`, empty or one per vertex.
    pub tangents: Vec<Vector4<f32>>,
    /// Triangle corner indices into the attribute arrays, three per triangle.
    pub indices: Vec<u32>,
    /// Tight bounding box of `positions`.
    pub bounds: Aabb,
}

impl IndexedMesh {
    /// Returns the number of unique vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the number of corner indices.
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns true if the mesh carries per-vertex normals.
    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Returns true if the mesh carries per-vertex texture coordinates.
    #[must_use]
    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    /// Returns true if the mesh carries per-vertex tangents.
    #[must_use]
    pub fn has_tangents(&self) -> bool {
        !self.tangents.is_empty()
    }

    /// Returns true if every index refers to an existing vertex.
    #[must_use]
    pub fn indices_in_range(&self) -> bool {
        let count = self.positions.len();
        self.indices.iter().all(|&index| (index as usize) < count)
    }

    /// Expands the mesh back into per-corner triangle data.
    ///
    /// Each index is replaced by a copy of the vertex it refers to. Tangents
    /// are dropped since a soup does not carry them.
    #[must_use]
    pub fn to_soup(&self) -> TriangleSoup {
        let mut soup = TriangleSoup::with_capacity(self.indices.len());
        for &index in &self.indices {
            let index = index as usize;
            soup.positions.push(self.positions[index]);
            if self.has_normals() {
                soup.normals.push(self.normals[index]);
            }
            if self.has_texcoords() {
                soup.texcoords.push(self.texcoords[index]);
            }
        }
        soup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangle_strip() -> IndexedMesh {
        IndexedMesh {
            positions: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vector3::z(); 4],
            texcoords: vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(1.0, 1.0),
                Vector2::new(0.0, 1.0),
            ],
            tangents: Vec::new(),
            indices: vec![0, 1, 2, 0, 2, 3],
            bounds: Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 0.0)),
        }
    }

    #[test]
    fn counts_follow_the_index_stream() {
        let mesh = two_triangle_strip();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(!mesh.is_empty());
        assert!(mesh.indices_in_range());
    }

    #[test]
    fn out_of_range_indices_are_detected() {
        let mut mesh = two_triangle_strip();
        mesh.indices[4] = 9;
        assert!(!mesh.indices_in_range());
    }

    #[test]
    fn to_soup_unshares_vertices() {
        let mesh = two_triangle_strip();
        let soup = mesh.to_soup();
        assert_eq!(soup.vertex_count(), 6);
        assert_eq!(soup.triangle_count(), 2);
        // Corner 0 and corner 3 both came from vertex 0.
        assert_eq!(soup.positions[0], soup.positions[3]);
        assert_eq!(soup.texcoords[0], soup.texcoords[3]);
    }
}
