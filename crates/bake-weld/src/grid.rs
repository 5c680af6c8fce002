//! Uniform grid discretization of corner positions.

use bake_types::Point3;

/// Offsets of a cell and its 26 surrounding neighbors.
///
/// The self cell comes first so that a corner's own cell is scanned before
/// the surrounding shell, which keeps merge groups anchored to the nearest
/// candidates when several cells hold matches.
pub(crate) const NEIGHBOR_OFFSETS: [[i32; 3]; 27] = [
    [0, 0, 0],
    [0, 0, 1],
    [0, 0, -1],
    [0, 1, 0],
    [0, 1, 1],
    [0, 1, -1],
    [0, -1, 0],
    [0, -1, 1],
    [0, -1, -1],
    [1, 0, 0],
    [1, 0, 1],
    [1, 0, -1],
    [1, 1, 0],
    [1, 1, 1],
    [1, 1, -1],
    [1, -1, 0],
    [1, -1, 1],
    [1, -1, -1],
    [-1, 0, 0],
    [-1, 0, 1],
    [-1, 0, -1],
    [-1, 1, 0],
    [-1, 1, 1],
    [-1, 1, -1],
    [-1, -1, 0],
    [-1, -1, 1],
    [-1, -1, -1],
];

/// Integer coordinates of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    /// Cell index along the X axis.
    pub x: i32,
    /// Cell index along the Y axis.
    pub y: i32,
    /// Cell index along the Z axis.
    pub z: i32,
}

impl CellCoord {
    /// Creates a cell coordinate from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the cell displaced by the given per-axis offsets.
    #[must_use]
    pub const fn offset(self, delta: [i32; 3]) -> Self {
        Self::new(
            self.x.wrapping_add(delta[0]),
            self.y.wrapping_add(delta[1]),
            self.z.wrapping_add(delta[2]),
        )
    }
}

impl From<(i32, i32, i32)> for CellCoord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

/// Maps world-space positions onto a uniform grid.
///
/// The grid covers a cube of `extent` world units starting at `origin`,
/// split into `resolution` cells per axis. Cell size is tied to the welding
/// tolerance by the caller so that two positions within tolerance of each
/// other always land in the same or adjacent cells.
#[derive(Debug, Clone, Copy)]
pub struct Discretizer {
    origin: Point3<f32>,
    scale: f32,
}

impl Discretizer {
    /// Creates a discretizer for a grid of `resolution` cells per axis over
    /// a region `extent` world units long, anchored at `origin`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // resolutions stay far below 2^24
    pub fn new(resolution: u32, origin: Point3<f32>, extent: f32) -> Self {
        debug_assert!(resolution >= 1);
        debug_assert!(extent > 0.0);
        Self {
            origin,
            scale: resolution as f32 / extent,
        }
    }

    /// Maps a position to the cell containing it.
    ///
    /// Positions are expected to lie inside the grid region. Components below
    /// the origin saturate into the boundary cell at zero rather than
    /// wrapping, so slightly out-of-range input degrades to a coarser lookup
    /// instead of a bogus one.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    pub fn discretize(&self, position: &Point3<f32>) -> CellCoord {
        CellCoord::new(
            ((position.x - self.origin.x) * self.scale) as u32 as i32,
            ((position.y - self.origin.y) * self.scale) as u32 as i32,
            ((position.z - self.origin.z) * self.scale) as u32 as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_offsets_cover_the_full_shell() {
        assert_eq!(NEIGHBOR_OFFSETS.len(), 27);
        assert_eq!(NEIGHBOR_OFFSETS[0], [0, 0, 0]);

        let mut seen = std::collections::HashSet::new();
        for offset in NEIGHBOR_OFFSETS {
            assert!(offset.iter().all(|component| (-1..=1).contains(component)));
            assert!(seen.insert(offset));
        }
    }

    #[test]
    fn offset_displaces_each_axis() {
        let cell = CellCoord::new(1, 2, 3);
        assert_eq!(cell.offset([0, 0, 0]), cell);
        assert_eq!(cell.offset([1, -1, 0]), CellCoord::new(2, 1, 3));
    }

    #[test]
    fn discretize_truncates_toward_the_origin() {
        let grid = Discretizer::new(10, Point3::origin(), 10.0);
        assert_eq!(grid.discretize(&Point3::new(0.0, 0.0, 0.0)), CellCoord::new(0, 0, 0));
        assert_eq!(grid.discretize(&Point3::new(0.99, 0.0, 0.0)), CellCoord::new(0, 0, 0));
        assert_eq!(grid.discretize(&Point3::new(1.0, 2.5, 9.5)), CellCoord::new(1, 2, 9));
    }

    #[test]
    fn positions_below_the_origin_saturate_to_cell_zero() {
        let grid = Discretizer::new(10, Point3::origin(), 10.0);
        assert_eq!(grid.discretize(&Point3::new(-5.0, 0.0, 0.0)).x, 0);
    }

    #[test]
    fn tolerance_sized_cells_keep_close_points_adjacent() {
        // 100 cells across 10 units puts cell size at 0.1, twice the 0.05
        // tolerance this grid would be built for.
        let grid = Discretizer::new(100, Point3::origin(), 10.0);
        let a = grid.discretize(&Point3::new(4.999, 5.0, 5.0));
        let b = grid.discretize(&Point3::new(5.049, 5.0, 5.0));
        assert!((a.x - b.x).abs() <= 1);
        assert_eq!(a.y, b.y);
        assert_eq!(a.z, b.z);
    }
}
