//! End-to-end mesh baking.
//!
//! Takes a loaded [`SourceModel`](bake_types::SourceModel) and turns it into
//! a baked container on disk: each mesh's triangle soup is welded into
//! indexed geometry, missing normals are reconstructed and a tangent basis
//! is generated, the scene's textures are deduplicated into a table, and the
//! result is serialized next to a directory holding copies of the textures.
//!
//! Meshes bake independently and in scene order, optionally across worker
//! threads; the output is identical either way.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use bake_obj::load_obj;
//! use bake_pipeline::{BakeParams, bake_to_file};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scene = load_obj("scene.obj")?;
//! let report = bake_to_file(&scene, Path::new("scene.bin"), &BakeParams::new())?;
//! println!("{} vertices", report.baked_vertices);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod pipeline;
mod report;
mod textures;

pub use error::{BakeError, BakeResult};
pub use pipeline::{BakeParams, bake_mesh, bake_model, bake_to_file};
pub use report::BakeReport;
pub use textures::{TextureCopy, TexturePlan, plan_textures};
