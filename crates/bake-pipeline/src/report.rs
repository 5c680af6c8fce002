//! Bake summary statistics.

use tracing::{info, warn};

/// Bytes per source corner: position, normal and texture coordinate.
const SOURCE_CORNER_BYTES: usize = 32;
/// Bytes per baked vertex: position, normal, texture coordinate and tangent.
const BAKED_VERTEX_BYTES: usize = 48;
/// Bytes per baked corner index.
const INDEX_BYTES: usize = 4;

/// Counters describing one completed bake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BakeReport {
    /// Meshes written to the container.
    pub meshes: usize,
    /// Materials written to the container.
    pub materials: usize,
    /// Unique textures referenced by the material table.
    pub textures: usize,
    /// Corners in the source soup before welding.
    pub source_corners: usize,
    /// Unique vertices after welding.
    pub baked_vertices: usize,
    /// Corner indices in the container.
    pub baked_indices: usize,
    /// Texture files copied next to the container.
    pub textures_copied: usize,
    /// Texture files that could not be copied.
    pub texture_failures: usize,
}

impl BakeReport {
    /// Approximate size of the source attribute streams in kibibytes.
    #[must_use]
    pub const fn source_kib(&self) -> usize {
        self.source_corners * SOURCE_CORNER_BYTES / 1024
    }

    /// Approximate size of the baked attribute and index streams in
    /// kibibytes.
    #[must_use]
    pub const fn baked_kib(&self) -> usize {
        (self.baked_vertices * BAKED_VERTEX_BYTES + self.baked_indices * INDEX_BYTES) / 1024
    }

    /// Logs a one-line summary, plus a warning when texture copies failed.
    pub fn log(&self) {
        info!(
            "baked {} meshes, {} materials, {} textures: {} corners -> {} vertices, {} indices ({} KiB -> {} KiB)",
            self.meshes,
            self.materials,
            self.textures,
            self.source_corners,
            self.baked_vertices,
            self.baked_indices,
            self.source_kib(),
            self.baked_kib(),
        );
        if self.texture_failures > 0 {
            warn!(
                "{} texture files could not be copied",
                self.texture_failures
            );
        }
    }
}
