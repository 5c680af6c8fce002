//! Unindexed per-corner triangle data.

use nalgebra::{Point3, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Flat triangle data with three corners per triangle and no sharing.
///
/// This is the form vertex data takes when it comes out of a model loader:
/// every triangle carries its own three fully attributed corners, so a corner
/// shared by `n` triangles appears `n` times. Welding turns a soup into an
/// [`IndexedMesh`](crate::IndexedMesh).
///
/// Normals and texture coordinates are optional. When present their arrays
/// must have exactly one entry per corner; when absent they are empty.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleSoup {
    /// Corner positions, three per triangle.
    pub positions: Vec<Point3<f32>>,
    /// Corner normals, empty or one per corner.
    pub normals: Vec<Vector3<f32>>,
    /// Corner texture coordinates, empty or one per corner.
    pub texcoords: Vec<Vector2<f32>>,
}

impl TriangleSoup {
    /// Creates an empty soup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty soup with room for `corners` fully attributed corners.
    #[must_use]
    pub fn with_capacity(corners: usize) -> Self {
        Self {
            positions: Vec::with_capacity(corners),
            normals: Vec::with_capacity(corners),
            texcoords: Vec::with_capacity(corners),
        }
    }

    /// Appends one fully attributed corner.
    pub fn push_corner(
        &mut self,
        position: Point3<f32>,
        normal: Vector3<f32>,
        texcoord: Vector2<f32>,
    ) {
        self.positions.push(position);
        self.normals.push(normal);
        self.texcoords.push(texcoord);
    }

    /// Returns the number of corners in the soup.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles in the soup.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns true if the soup has no corners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns true if the soup carries per-corner normals.
    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Returns true if the soup carries per-corner texture coordinates.
    #[must_use]
    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    /// Returns true if every present attribute array has one entry per corner.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let corners = self.positions.len();
        (self.normals.is_empty() || self.normals.len() == corners)
            && (self.texcoords.is_empty() || self.texcoords.len() == corners)
    }

    /// Creates the soup of a unit cube centered at the origin.
    ///
    /// The cube has 12 outward-wound triangles (36 corners). Each corner's
    /// normal points along its corner diagonal and its texture coordinate is
    /// the origin, so all repetitions of a corner carry identical attributes
    /// and welding collapses the soup to 8 unique vertices.
    #[must_use]
    pub fn unit_cube() -> Self {
        const CORNERS: [[f32; 3]; 8] = [
            [-0.5, -0.5, -0.5],
            [0.5, -0.5, -0.5],
            [0.5, 0.5, -0.5],
            [-0.5, 0.5, -0.5],
            [-0.5, -0.5, 0.5],
            [0.5, -0.5, 0.5],
            [0.5, 0.5, 0.5],
            [-0.5, 0.5, 0.5],
        ];
        const FACES: [[usize; 3]; 12] = [
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 7, 6],
            [3, 6, 2],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ];

        let mut soup = Self::with_capacity(FACES.len() * 3);
        for face in FACES {
            for corner in face {
                let position = Point3::from(CORNERS[corner]);
                soup.push_corner(position, position.coords.normalize(), Vector2::zeros());
            }
        }
        soup
    }
}
