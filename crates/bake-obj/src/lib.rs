//! Wavefront OBJ and MTL loading for the meshbake pipeline.
//!
//! Loads an OBJ scene into a [`SourceModel`](bake_types::SourceModel):
//! materials with their PBR constants and texture paths, one mesh per OBJ
//! object, and all corners unrolled into one shared triangle soup ready for
//! welding. Faces are triangulated on load, texture paths are resolved
//! relative to the OBJ file, and objects without a material get a shared
//! synthesized default.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod obj;

pub use error::{ObjError, ObjResult};
pub use obj::load_obj;
