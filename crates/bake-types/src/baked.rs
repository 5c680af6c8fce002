//! Baked model data, the serializable output of the pipeline.

use nalgebra::{Point3, Vector2, Vector3, Vector4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::IndexedMesh;

/// Sentinel texture id marking an unused material slot.
pub const NO_TEXTURE: u32 = u32::MAX;

/// One entry of the baked texture table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BakedTexture {
    /// Texture path. Relative paths are resolved against the directory the
    /// containing model file lives in.
    pub path: String,
    /// Number of color channels the texture should be decoded with.
    pub channels: u8,
}

/// One entry of the baked material table.
///
/// Each slot is an index into the texture table or [`NO_TEXTURE`] when the
/// material does not bind that slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BakedMaterial {
    /// Base color texture id.
    pub base_color_texture: u32,
    /// Roughness texture id.
    pub roughness_texture: u32,
    /// Metalness texture id.
    pub metalness_texture: u32,
    /// Alpha mask texture id.
    pub alpha_mask_texture: u32,
    /// Tangent-space normal map texture id.
    pub normal_map_texture: u32,
}

impl BakedMaterial {
    /// Returns the five texture ids in table order.
    #[must_use]
    pub const fn texture_ids(&self) -> [u32; 5] {
        [
            self.base_color_texture,
            self.roughness_texture,
            self.metalness_texture,
            self.alpha_mask_texture,
            self.normal_map_texture,
        ]
    }

    /// Returns true if any slot binds a texture.
    #[must_use]
    pub fn is_textured(&self) -> bool {
        self.texture_ids().iter().any(|&id| id != NO_TEXTURE)
    }
}

impl Default for BakedMaterial {
    fn default() -> Self {
        Self {
            base_color_texture: NO_TEXTURE,
            roughness_texture: NO_TEXTURE,
            metalness_texture: NO_TEXTURE,
            alpha_mask_texture: NO_TEXTURE,
            normal_map_texture: NO_TEXTURE,
        }
    }
}

/// One baked mesh: a material binding plus fully attributed indexed geometry.
///
/// Unlike [`IndexedMesh`], every attribute array is mandatory and has exactly
/// one entry per vertex, since the container format stores them all.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BakedMesh {
    /// Index into the owning model's material table.
    pub material: u32,
    /// Unique vertex positions.
    pub positions: Vec<Point3<f32>>,
    /// Unique vertex normals.
    pub normals: Vec<Vector3<f32>>,
    /// Unique vertex texture coordinates.
    pub texcoords: Vec<Vector2<f32>>,
    /// Unique vertex tangents with handedness in `w`.
    pub tangents: Vec<Vector4<f32>>,
    /// Triangle corner indices, three per triangle.
    pub indices: Vec<u32>,
}

impl BakedMesh {
    /// Takes ownership of an indexed mesh's arrays under a material binding.
    ///
    /// The mesh must carry normals, texture coordinates and tangents.
    #[must_use]
    pub fn from_indexed(material: u32, mesh: IndexedMesh) -> Self {
        debug_assert!(mesh.has_normals() && mesh.has_texcoords() && mesh.has_tangents());
        Self {
            material,
            positions: mesh.positions,
            normals: mesh.normals,
            texcoords: mesh.texcoords,
            tangents: mesh.tangents,
            indices: mesh.indices,
        }
    }

    /// Returns the number of unique vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of corner indices.
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if every attribute array has one entry per vertex.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let vertices = self.positions.len();
        self.normals.len() == vertices
            && self.texcoords.len() == vertices
            && self.tangents.len() == vertices
    }
}

/// A complete baked model: texture table, material table and meshes.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BakedModel {
    /// Textures referenced by the material table.
    pub textures: Vec<BakedTexture>,
    /// Materials referenced by the meshes.
    pub materials: Vec<BakedMaterial>,
    /// Baked meshes.
    pub meshes: Vec<BakedMesh>,
}

impl BakedModel {
    /// Returns the total number of unique vertices across all meshes.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(BakedMesh::vertex_count).sum()
    }

    /// Returns the total number of corner indices across all meshes.
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.meshes.iter().map(BakedMesh::index_count).sum()
    }

    /// Returns true if every texture and material reference is in range and
    /// every mesh is internally consistent.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let texture_count = self.textures.len();
        let material_count = self.materials.len();
        self.materials.iter().all(|material| {
            material
                .texture_ids()
                .iter()
                .all(|&id| id == NO_TEXTURE || (id as usize) < texture_count)
        }) && self.meshes.iter().all(|mesh| {
            (mesh.material as usize) < material_count && mesh.is_consistent()
        })
    }
}
