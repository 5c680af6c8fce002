//! Cell-keyed buckets of corner indices.

use hashbrown::HashMap;

use bake_types::Point3;

use crate::grid::{CellCoord, Discretizer};

const HASH_COMBINE_GAMMA: u64 = 0x9e37_79b9;

/// Mixes a cell coordinate into one bucket key.
///
/// The combine is order sensitive, so permutations of the same components
/// land in different buckets.
#[must_use]
#[allow(clippy::cast_sign_loss)] // sign extension feeds the mix deliberately
fn cell_key(cell: CellCoord) -> u64 {
    let mut hash = cell.x as u64;
    for component in [cell.y, cell.z] {
        hash ^= (component as u64)
            .wrapping_add(HASH_COMBINE_GAMMA)
            .wrapping_add(hash << 6)
            .wrapping_add(hash >> 2);
    }
    hash
}

/// Maps grid cells to the corners whose positions fall inside them.
///
/// Buckets are keyed by the mixed cell coordinate, so the index never stores
/// the grid itself, only the occupied cells. Lookups return every corner
/// registered to one cell; the caller widens the search to the surrounding
/// shell by looking up neighbor cells too.
#[derive(Debug, Default)]
pub struct VicinityIndex {
    buckets: HashMap<u64, Vec<u32>>,
    corners: usize,
}

impl VicinityIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index for a set of corner positions.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // callers reject soups beyond u32 corners
    pub fn build(discretizer: &Discretizer, positions: &[Point3<f32>]) -> Self {
        let mut index = Self::new();
        for (corner, position) in positions.iter().enumerate() {
            index.insert(discretizer.discretize(position), corner as u32);
        }
        index
    }

    /// Registers a corner in the given cell.
    pub fn insert(&mut self, cell: CellCoord, corner: u32) {
        self.buckets.entry(cell_key(cell)).or_default().push(corner);
        self.corners += 1;
    }

    /// Returns the corners registered in the given cell, in insertion order.
    #[must_use]
    pub fn candidates(&self, cell: CellCoord) -> &[u32] {
        match self.buckets.get(&cell_key(cell)) {
            Some(bucket) => bucket,
            None => &[],
        }
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of registered corners.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.corners
    }

    /// Returns true if no corners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.corners == 0
    }
}
