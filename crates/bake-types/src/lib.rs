//! Core mesh and material types for the meshbake asset pipeline.
//!
//! This crate defines the data model shared by every stage of the pipeline:
//!
//! - [`TriangleSoup`]: flat per-corner vertex data as it arrives from a model
//!   loader, three corners per triangle, nothing shared.
//! - [`IndexedMesh`]: the welded form, unique vertices plus a `u32` index
//!   stream referencing them.
//! - [`SourceModel`]: a loaded scene before baking, with materials and
//!   per-mesh vertex ranges into one shared soup.
//! - [`BakedModel`]: the serializable output, with a texture table, a
//!   material table and fully attributed meshes.
//!
//! Geometry is stored in `f32` end to end because the baked container stores
//! IEEE-754 binary32 and re-rounding from a wider type would break bit-exact
//! round trips.
//!
//! # Example
//!
//! ```
//! use bake_types::{Aabb, Point3, TriangleSoup};
//!
//! let soup = TriangleSoup::unit_cube();
//! assert_eq!(soup.vertex_count(), 36);
//! assert_eq!(soup.triangle_count(), 12);
//!
//! let bounds = Aabb::from_points(soup.positions.iter());
//! assert_eq!(bounds.max_extent(), 1.0);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod baked;
mod bounds;
mod indexed;
mod soup;
mod source;

pub use baked::{BakedMaterial, BakedMesh, BakedModel, BakedTexture, NO_TEXTURE};
pub use bounds::Aabb;
pub use indexed::IndexedMesh;
pub use soup::TriangleSoup;
pub use source::{SourceMaterial, SourceMesh, SourceModel};

// Re-export the nalgebra types used throughout the public API so downstream
// crates don't need a direct dependency for basic usage.
pub use nalgebra::{Point3, Vector2, Vector3, Vector4};
