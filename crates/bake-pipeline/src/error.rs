//! Error types for the bake pipeline.

use std::path::PathBuf;

use thiserror::Error;

use bake_format::FormatError;
use bake_tangent::TangentError;
use bake_weld::WeldError;

/// Result type for pipeline operations.
pub type BakeResult<T> = Result<T, BakeError>;

/// Errors that can occur while baking a source model into a container.
#[derive(Debug, Error)]
pub enum BakeError {
    /// Welding a mesh's corners failed.
    #[error("failed to weld mesh '{name}'")]
    Weld {
        /// Name of the offending mesh.
        name: String,
        /// Underlying weld error.
        #[source]
        source: WeldError,
    },

    /// Generating normals or tangents for a mesh failed.
    #[error("failed to generate tangent space for mesh '{name}'")]
    Tangent {
        /// Name of the offending mesh.
        name: String,
        /// Underlying tangent error.
        #[source]
        source: TangentError,
    },

    /// Writing the baked container failed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A mesh references a material past the end of the scene's table.
    #[error("mesh '{name}' references material {material} but the scene has {material_count}")]
    MaterialOutOfRange {
        /// Name of the offending mesh.
        name: String,
        /// Material index the mesh carries.
        material: usize,
        /// Number of materials in the scene.
        material_count: usize,
    },

    /// The output path cannot anchor a texture directory next to it.
    #[error("output path '{}' has no file stem", path.display())]
    OutputPath {
        /// The rejected output path.
        path: PathBuf,
    },

    /// The output directory could not be created.
    #[error("cannot create output directory '{}'", path.display())]
    OutputDirectory {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
