//! Loaded scene data before baking.

use std::path::{Path, PathBuf};

use nalgebra::{Point3, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TriangleSoup;

/// A material as described by the source scene.
///
/// Texture slots hold paths into the source asset tree (already resolved
/// relative to the scene file) or `None` when the slot is unused.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceMaterial {
    /// Material name from the scene file.
    pub name: String,
    /// Constant base color, used when no base color texture is bound.
    pub base_color: Vector3<f32>,
    /// Constant roughness in `[0, 1]`.
    pub roughness: f32,
    /// Constant metalness in `[0, 1]`.
    pub metalness: f32,
    /// Base color texture path.
    pub base_color_texture: Option<String>,
    /// Roughness texture path.
    pub roughness_texture: Option<String>,
    /// Metalness texture path.
    pub metalness_texture: Option<String>,
    /// Alpha mask texture path.
    pub alpha_mask_texture: Option<String>,
    /// Tangent-space normal map path.
    pub normal_map_texture: Option<String>,
}

impl SourceMaterial {
    /// Creates a plain untextured material with neutral constants.
    #[must_use]
    pub fn untextured(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            base_color: Vector3::new(1.0, 1.0, 1.0),
            roughness: 1.0,
            metalness: 0.0,
            ..Self::default()
        }
    }

    /// Returns the five texture slots in table order, with per-slot channel
    /// counts.
    ///
    /// The order is base color, roughness, metalness, alpha mask, normal map.
    /// Color-like slots carry four channels, scalar slots one.
    #[must_use]
    pub fn texture_slots(&self) -> [(Option<&str>, u8); 5] {
        [
            (self.base_color_texture.as_deref(), 4),
            (self.roughness_texture.as_deref(), 1),
            (self.metalness_texture.as_deref(), 1),
            (self.alpha_mask_texture.as_deref(), 4),
            (self.normal_map_texture.as_deref(), 4),
        ]
    }
}

/// One mesh of a source scene: a name, a material and a corner range.
///
/// The range addresses the shared attribute arrays of the owning
/// [`SourceModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceMesh {
    /// Mesh name, usually the object or group name from the scene file.
    pub name: String,
    /// Index into the owning model's material list.
    pub material: usize,
    /// First corner of this mesh in the shared attribute arrays.
    pub first_corner: usize,
    /// Number of corners belonging to this mesh, a multiple of three.
    pub corner_count: usize,
}

/// A loaded scene: materials, meshes and one shared triangle soup.
///
/// All meshes store their corners in the shared `positions`, `normals` and
/// `texcoords` arrays and address them through their corner range, so the
/// whole scene can be treated as one soup or sliced per mesh. `normals` is
/// either empty or has one entry per corner; `texcoords` always has one entry
/// per corner.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceModel {
    /// Path the scene was loaded from.
    pub source_path: PathBuf,
    /// Materials referenced by the meshes.
    pub materials: Vec<SourceMaterial>,
    /// Meshes with their corner ranges.
    pub meshes: Vec<SourceMesh>,
    /// Corner positions for all meshes.
    pub positions: Vec<Point3<f32>>,
    /// Corner normals for all meshes, empty when the source has none.
    pub normals: Vec<Vector3<f32>>,
    /// Corner texture coordinates for all meshes.
    pub texcoords: Vec<Vector2<f32>>,
}

impl SourceModel {
    /// Creates an empty model recording where it was loaded from.
    #[must_use]
    pub fn new<P: AsRef<Path>>(source_path: P) -> Self {
        Self {
            source_path: source_path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Returns the total number of corners across all meshes.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the model carries per-corner normals.
    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Copies one mesh's corner range out into its own soup.
    #[must_use]
    pub fn soup_for(&self, mesh: &SourceMesh) -> TriangleSoup {
        let range = mesh.first_corner..mesh.first_corner + mesh.corner_count;
        debug_assert!(range.end <= self.positions.len());
        let mut soup = TriangleSoup::with_capacity(mesh.corner_count);
        soup.positions.extend_from_slice(&self.positions[range.clone()]);
        if self.has_normals() {
            soup.normals.extend_from_slice(&self.normals[range.clone()]);
        }
        soup.texcoords.extend_from_slice(&self.texcoords[range]);
        soup
    }
}
