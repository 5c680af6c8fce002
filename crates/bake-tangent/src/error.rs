//! Error types for tangent and normal generation.

use thiserror::Error;

/// Result type for tangent and normal generation.
pub type TangentResult<T> = Result<T, TangentError>;

/// Errors that can occur while generating tangent spaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TangentError {
    /// The mesh does not carry one normal per vertex.
    #[error("mesh has {vertices} vertices but {normals} normals")]
    MissingNormals {
        /// Number of vertices.
        vertices: usize,
        /// Number of normals.
        normals: usize,
    },

    /// The mesh does not carry one texture coordinate per vertex.
    #[error("mesh has {vertices} vertices but {texcoords} texture coordinates")]
    MissingTexcoords {
        /// Number of vertices.
        vertices: usize,
        /// Number of texture coordinates.
        texcoords: usize,
    },

    /// The index count is not a multiple of three.
    #[error("index count {count} is not a multiple of 3")]
    NotTriangulated {
        /// Number of indices.
        count: usize,
    },

    /// An index refers past the end of the vertex arrays.
    #[error("index {index} out of range for {vertices} vertices")]
    IndexOutOfRange {
        /// The offending index.
        index: u32,
        /// Number of vertices.
        vertices: usize,
    },
}
