//! Tolerance-based vertex welding and mesh indexing.
//!
//! Model loaders produce triangle soups: three fully attributed corners per
//! triangle with nothing shared. This crate turns a soup into an indexed mesh
//! by merging corners whose attributes all agree within a tolerance, so that
//! a corner shared by several triangles is stored once and referenced by
//! index.
//!
//! The weld is a spatial problem, not a sort: two corners merge when every
//! component of every attribute they both carry differs by at most the
//! tolerance. Candidates are found through a uniform grid sized from the
//! tolerance, where each corner only has to be compared against corners in
//! its own and the 26 surrounding cells.
//!
//! Merging is greedy in corner order. The first corner of a merge group
//! becomes its representative and donates its attributes; corners already
//! claimed by a group are never reassigned, so chains of pairwise-close
//! corners do not collapse transitively into one vertex. This keeps the
//! result deterministic for a given input order.
//!
//! # Example
//!
//! ```
//! use bake_types::TriangleSoup;
//! use bake_weld::{WeldParams, index_soup};
//!
//! let soup = TriangleSoup::unit_cube();
//! let mesh = index_soup(&soup, &WeldParams::default()).unwrap();
//!
//! assert_eq!(mesh.vertex_count(), 8);
//! assert_eq!(mesh.index_count(), 36);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod collapse;
mod error;
mod grid;
mod params;
mod vicinity;
mod weld;

pub use error::{WeldError, WeldResult};
pub use grid::{CellCoord, Discretizer};
pub use params::{
    DEFAULT_MARGIN_FACTOR, DEFAULT_TOLERANCE, MAX_GRID_RESOLUTION, WeldParams,
};
pub use vicinity::VicinityIndex;
pub use weld::index_soup;
