//! Error types for OBJ loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for OBJ loading.
pub type ObjResult<T> = Result<T, ObjError>;

/// Errors that can occur while loading an OBJ scene.
#[derive(Debug, Error)]
pub enum ObjError {
    /// The file was not found at the given path.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that could not be opened.
        path: PathBuf,
    },

    /// The OBJ or MTL content could not be parsed.
    #[error("failed to parse OBJ: {0}")]
    Parse(#[from] tobj::LoadError),

    /// The file parsed but contains no triangles.
    #[error("OBJ file contains no triangle data")]
    EmptyModel,

    /// An object's corner count is not a multiple of three.
    #[error("object '{name}' has {count} corners, not a whole number of triangles")]
    NotTriangulated {
        /// Name of the offending object.
        name: String,
        /// Number of corners produced for it.
        count: usize,
    },
}
