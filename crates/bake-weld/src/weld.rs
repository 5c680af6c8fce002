//! Weld entry point.

use bake_types::{Aabb, IndexedMesh, TriangleSoup};
use tracing::debug;

use crate::collapse::collapse_corners;
use crate::error::{WeldError, WeldResult};
use crate::grid::Discretizer;
use crate::params::WeldParams;
use crate::vicinity::VicinityIndex;

/// Welds a triangle soup into an indexed mesh.
///
/// Corners whose shared attributes all agree within `params.tolerance` are
/// merged into one output vertex; the first corner of each merge group
/// donates the attributes. The index stream preserves the soup's triangle
/// order, and the returned bounds are the tight bounding box of the corner
/// positions, without the grid padding.
///
/// With a tolerance of zero only bit-identical corners merge, so welding an
/// already-welded mesh's soup is a no-op.
///
/// # Errors
///
/// Fails without partial output when the parameters are invalid, the soup is
/// empty, not a whole number of triangles, has mismatched attribute arrays,
/// or holds more corners than 32-bit indices can address.
pub fn index_soup(soup: &TriangleSoup, params: &WeldParams) -> WeldResult<IndexedMesh> {
    params.validate()?;
    validate_soup(soup)?;

    let bounds = Aabb::from_points(soup.positions.iter());
    let padded = bounds.expanded(params.margin_factor * params.tolerance);
    // A degenerate extent still needs a usable scale; every corner then
    // lands in cell zero and candidates are compared directly.
    let extent = padded.max_extent().max(f32::MIN_POSITIVE);
    let resolution = grid_resolution(extent, params);

    let discretizer = Discretizer::new(resolution, padded.min, extent);
    let vicinity = VicinityIndex::build(&discretizer, &soup.positions);
    debug!(
        "welding {} corners over a {}^3 cell grid ({} occupied cells)",
        soup.vertex_count(),
        resolution,
        vicinity.cell_count()
    );

    let collapsed = collapse_corners(soup, &vicinity, &discretizer, params.tolerance);

    let mut mesh = IndexedMesh {
        positions: Vec::with_capacity(collapsed.representatives.len()),
        normals: Vec::new(),
        texcoords: Vec::new(),
        tangents: Vec::new(),
        indices: collapsed.indices,
        bounds,
    };
    for &representative in &collapsed.representatives {
        let corner = representative as usize;
        mesh.positions.push(soup.positions[corner]);
        if soup.has_normals() {
            mesh.normals.push(soup.normals[corner]);
        }
        if soup.has_texcoords() {
            mesh.texcoords.push(soup.texcoords[corner]);
        }
    }

    debug!(
        "collapsed {} corners into {} unique vertices",
        soup.vertex_count(),
        mesh.vertex_count()
    );
    Ok(mesh)
}

/// Picks the number of grid cells per axis.
///
/// Cells are sized to twice the tolerance so that any two mergeable corners
/// are at most one cell apart, rounded to the nearest whole count and capped
/// to bound memory. A zero tolerance asks for infinitely many cells and gets
/// the cap.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn grid_resolution(extent: f32, params: &WeldParams) -> u32 {
    let cells = extent / (2.0 * params.tolerance);
    // Saturating float-to-int conversion turns the infinite and the huge
    // into the cap.
    ((cells + 0.5) as u32).clamp(1, params.max_grid_resolution)
}

fn validate_soup(soup: &TriangleSoup) -> WeldResult<()> {
    let positions = soup.positions.len();
    if positions == 0 {
        return Err(WeldError::EmptySoup);
    }
    if positions % 3 != 0 {
        return Err(WeldError::NotTriangulated { count: positions });
    }
    if positions >= u32::MAX as usize {
        return Err(WeldError::TooManyCorners { count: positions });
    }

    let normals = soup.normals.len();
    let texcoords = soup.texcoords.len();
    if (normals != 0 && normals != positions) || (texcoords != 0 && texcoords != positions) {
        return Err(WeldError::AttributeMismatch {
            positions,
            normals,
            texcoords,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MAX_GRID_RESOLUTION;
    use bake_types::{Point3, Vector2, Vector3};

    #[test]
    fn unit_cube_welds_to_eight_vertices() {
        let soup = TriangleSoup::unit_cube();
        let mesh = index_soup(&soup, &WeldParams::new().with_tolerance(1e-4)).unwrap();

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.indices_in_range());
        assert!(mesh.has_normals());
        assert!(mesh.has_texcoords());
        assert!(!mesh.has_tangents());
    }

    #[test]
    fn bounds_are_tight_not_padded() {
        let soup = TriangleSoup::unit_cube();
        let mesh = index_soup(&soup, &WeldParams::new().with_tolerance(0.01)).unwrap();
        assert_eq!(mesh.bounds.min, Point3::new(-0.5, -0.5, -0.5));
        assert_eq!(mesh.bounds.max, Point3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn uv_seam_stays_split() {
        // Two triangles sharing an edge, but the second triangle's corners
        // carry shifted texture coordinates. Nothing merges across the seam.
        let mut soup = TriangleSoup::new();
        let quad = [
            ([0.0, 0.0, 0.0], [0.0, 0.0]),
            ([1.0, 0.0, 0.0], [0.5, 0.0]),
            ([1.0, 1.0, 0.0], [0.5, 0.5]),
            ([0.0, 0.0, 0.0], [0.7, 0.0]),
            ([1.0, 1.0, 0.0], [0.9, 0.5]),
            ([0.0, 1.0, 0.0], [0.7, 0.5]),
        ];
        for (position, texcoord) in quad {
            soup.push_corner(
                Point3::from(position),
                Vector3::z(),
                Vector2::from(texcoord),
            );
        }

        let mesh = index_soup(&soup, &WeldParams::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn shared_edges_weld_when_attributes_agree() {
        let mut soup = TriangleSoup::new();
        let corners = [
            ([0.0, 0.0, 0.0], [0.0, 0.0]),
            ([1.0, 0.0, 0.0], [1.0, 0.0]),
            ([1.0, 1.0, 0.0], [1.0, 1.0]),
            ([0.0, 0.0, 0.0], [0.0, 0.0]),
            ([1.0, 1.0, 0.0], [1.0, 1.0]),
            ([0.0, 1.0, 0.0], [0.0, 1.0]),
        ];
        for (position, texcoord) in corners {
            soup.push_corner(
                Point3::from(position),
                Vector3::z(),
                Vector2::from(texcoord),
            );
        }

        let mesh = index_soup(&soup, &WeldParams::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn representative_attributes_are_copied_bit_exactly() {
        let mut soup = TriangleSoup::new();
        // Three near-identical corners: the first one's attributes must come
        // through unchanged, not averaged.
        for dx in [0.0_f32, 1e-7, 2e-7] {
            soup.push_corner(
                Point3::new(0.25 + dx, 0.5, 0.75),
                Vector3::new(0.0, 0.0, 1.0),
                Vector2::new(0.125, 0.375),
            );
        }

        let mesh = index_soup(&soup, &WeldParams::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.positions[0], Point3::new(0.25, 0.5, 0.75));
        assert_eq!(mesh.texcoords[0], Vector2::new(0.125, 0.375));
    }

    #[test]
    fn zero_tolerance_reweld_is_identity() {
        let soup = TriangleSoup::unit_cube();
        let mesh = index_soup(&soup, &WeldParams::new().with_tolerance(1e-4)).unwrap();

        let rewelded = index_soup(&mesh.to_soup(), &WeldParams::exact()).unwrap();
        assert_eq!(rewelded.vertex_count(), mesh.vertex_count());
        assert_eq!(rewelded.indices, mesh.indices);
        assert_eq!(rewelded.positions, mesh.positions);
        assert_eq!(rewelded.normals, mesh.normals);
        assert_eq!(rewelded.texcoords, mesh.texcoords);
    }

    #[test]
    fn positions_only_soups_weld() {
        let mut soup = TriangleSoup::new();
        soup.positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh = index_soup(&soup, &WeldParams::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert!(!mesh.has_normals());
        assert!(!mesh.has_texcoords());
    }

    #[test]
    fn all_corners_identical_collapses_to_one_vertex() {
        let mut soup = TriangleSoup::new();
        soup.positions = vec![Point3::new(2.0, 2.0, 2.0); 3];
        let mesh = index_soup(&soup, &WeldParams::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.indices, vec![0, 0, 0]);
        assert_eq!(mesh.bounds.max_extent(), 0.0);
    }

    #[test]
    fn giant_tolerance_collapses_everything() {
        let soup = TriangleSoup::unit_cube();
        // Texcoords are all zero and normals differ by at most 2 per
        // component, so a tolerance above that merges the whole cube.
        let mesh = index_soup(&soup, &WeldParams::new().with_tolerance(8.0)).unwrap();
        assert_eq!(mesh.vertex_count(), 1);
    }

    #[test]
    fn empty_soup_is_rejected() {
        let soup = TriangleSoup::new();
        assert_eq!(
            index_soup(&soup, &WeldParams::default()),
            Err(WeldError::EmptySoup)
        );
    }

    #[test]
    fn non_triangulated_soup_is_rejected() {
        let mut soup = TriangleSoup::new();
        soup.positions = vec![Point3::origin(); 4];
        assert_eq!(
            index_soup(&soup, &WeldParams::default()),
            Err(WeldError::NotTriangulated { count: 4 })
        );
    }

    #[test]
    fn mismatched_attribute_arrays_are_rejected() {
        let mut soup = TriangleSoup::new();
        soup.positions = vec![Point3::origin(); 3];
        soup.normals = vec![Vector3::z(); 2];
        assert!(matches!(
            index_soup(&soup, &WeldParams::default()),
            Err(WeldError::AttributeMismatch {
                positions: 3,
                normals: 2,
                ..
            })
        ));
    }

    #[test]
    fn invalid_tolerance_is_rejected_before_any_work() {
        let soup = TriangleSoup::unit_cube();
        assert!(matches!(
            index_soup(&soup, &WeldParams::new().with_tolerance(f32::NAN)),
            Err(WeldError::InvalidTolerance { .. })
        ));
    }

    #[test]
    fn grid_resolution_is_capped() {
        let params = WeldParams::default();
        assert_eq!(grid_resolution(1.0, &params.with_tolerance(0.0)), MAX_GRID_RESOLUTION);
        assert_eq!(grid_resolution(1.0, &params.with_tolerance(1e-9)), MAX_GRID_RESOLUTION);
    }

    #[test]
    fn grid_resolution_rounds_to_nearest() {
        let params = WeldParams::default().with_tolerance(0.05);
        // 10 units at 0.1 per cell is exactly 100 cells.
        assert_eq!(grid_resolution(10.0, &params), 100);
        // Far fewer cells than one rounds up to the single-cell floor.
        assert_eq!(grid_resolution(0.01, &params), 1);
    }
}
