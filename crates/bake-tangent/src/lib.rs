//! Tangent-space and normal generation for indexed meshes.
//!
//! Normal mapping needs an orthonormal basis per vertex: the normal, a
//! tangent following the texture U direction across the surface, and a
//! bitangent following V. This crate derives that basis from an indexed
//! mesh's positions, texture coordinates and normals.
//!
//! Tangents are computed per corner from the triangle's edge and UV deltas,
//! accumulated per vertex across all incident triangles, orthogonalized
//! against the vertex normal and packed as vec4s whose `w` stores the
//! bitangent handedness (`+1` or `-1`). Degenerate input, such as corners
//! with collapsed UVs, falls back to a deterministic axis-derived tangent
//! rather than producing NaN.
//!
//! For sources that ship no normals, [`compute_vertex_normals`] reconstructs
//! smooth per-vertex normals by averaging unit face normals over each
//! vertex's incident triangles.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod normals;
mod tangent;

pub use error::{TangentError, TangentResult};
pub use normals::compute_vertex_normals;
pub use tangent::generate_tangents;
