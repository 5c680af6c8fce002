//! Binary container format for baked models.
//!
//! A baked model file is a flat little-endian stream with no padding and no
//! seeking, readable front to back:
//!
//! ```text
//! magic            16 bytes, identifies the container
//! variant          16 bytes, identifies the vertex layout
//! texture count    u32
//!   per texture:
//!     path length  u32, counts the trailing NUL
//!     path         length bytes, NUL-terminated UTF-8
//!     channels     u8
//! material count   u32
//!   per material:  5 x u32 texture ids, 0xFFFF_FFFF for unused slots
//! mesh count       u32
//!   per mesh:
//!     material     u32
//!     vertices     u32 (V)
//!     indices      u32 (I)
//!     positions    V x 3 f32
//!     normals      V x 3 f32
//!     texcoords    V x 2 f32
//!     tangents     V x 4 f32
//!     indices      I x u32
//! ```
//!
//! Writing then reading a model reproduces it bit for bit: floats pass
//! through as their IEEE-754 binary32 bytes and are never re-rounded.
//! Truncated files fail hard; trailing bytes after the last mesh are
//! tolerated with a warning.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod read;
mod write;

pub use error::{FormatError, FormatResult};
pub use read::{load_baked_model, read_baked_model};
pub use write::{save_baked_model, write_baked_model};

/// Identifies a baked model container.
pub const FILE_MAGIC: [u8; 16] = *b"\0\0MESHBAKEDMODEL";

/// Identifies the vertex layout this crate reads and writes: position and
/// normal vec3s, texcoord vec2s and tangent vec4s.
pub const FILE_VARIANT: [u8; 16] = *b"p3n3t2-tan4\0\0\0\0\0";

/// String payloads must be shorter than this, counting the trailing NUL.
pub const MAX_STRING_LENGTH: u32 = 32 * 1024;
