//! Greedy corner collapse in visitation order.

use bake_types::TriangleSoup;

use crate::grid::{Discretizer, NEIGHBOR_OFFSETS};
use crate::vicinity::VicinityIndex;

/// Result of the collapse pass.
pub(crate) struct CollapseOutput {
    /// One output index per input corner, in input order.
    pub indices: Vec<u32>,
    /// For each output vertex, the input corner that donates its attributes.
    pub representatives: Vec<u32>,
}

/// Assigns every corner to an output vertex slot.
///
/// Corners are visited in input order. An unassigned corner scans its own
/// and the 26 surrounding cells for unassigned mergeable corners; the first
/// match allocates a new slot with the visiting corner as representative,
/// and every further match found in the same scan joins that slot. A corner
/// with no mergeable neighbors gets a slot of its own.
///
/// Corners already assigned to a slot are skipped during scans and never
/// move again, so two slots are never joined after the fact even when later
/// corners sit within tolerance of both.
pub(crate) fn collapse_corners(
    soup: &TriangleSoup,
    vicinity: &VicinityIndex,
    discretizer: &Discretizer,
    tolerance: f32,
) -> CollapseOutput {
    let corner_count = soup.vertex_count();
    let mut indices = Vec::with_capacity(corner_count);
    let mut representatives = Vec::new();
    let mut assigned: Vec<Option<u32>> = vec![None; corner_count];

    for corner in 0..corner_count {
        if let Some(slot) = assigned[corner] {
            indices.push(slot);
            continue;
        }

        let cell = discretizer.discretize(&soup.positions[corner]);
        let mut slot: Option<u32> = None;

        for offset in NEIGHBOR_OFFSETS {
            for &candidate in vicinity.candidates(cell.offset(offset)) {
                let candidate = candidate as usize;
                if candidate == corner || assigned[candidate].is_some() {
                    continue;
                }
                if !mergeable(soup, corner, candidate, tolerance) {
                    continue;
                }

                let target = match slot {
                    Some(target) => target,
                    None => {
                        let target = allocate_slot(
                            &mut representatives,
                            &mut assigned,
                            &mut indices,
                            corner,
                        );
                        slot = Some(target);
                        target
                    }
                };
                assigned[candidate] = Some(target);
            }
        }

        if slot.is_none() {
            allocate_slot(&mut representatives, &mut assigned, &mut indices, corner);
        }
    }

    debug_assert_eq!(indices.len(), corner_count);
    CollapseOutput {
        indices,
        representatives,
    }
}

/// Opens a new output slot represented by `corner` and emits its index.
#[allow(clippy::cast_possible_truncation)] // corner counts are validated to fit u32
fn allocate_slot(
    representatives: &mut Vec<u32>,
    assigned: &mut [Option<u32>],
    indices: &mut Vec<u32>,
    corner: usize,
) -> u32 {
    let slot = representatives.len() as u32;
    representatives.push(corner as u32);
    assigned[corner] = Some(slot);
    indices.push(slot);
    slot
}

/// Returns true if two corners agree on every attribute they both carry.
///
/// Agreement is per component: each absolute difference must be at most the
/// tolerance. Positions always take part; normals and texture coordinates
/// take part when the soup carries them.
fn mergeable(soup: &TriangleSoup, a: usize, b: usize, tolerance: f32) -> bool {
    let pa = &soup.positions[a];
    let pb = &soup.positions[b];
    for axis in 0..3 {
        if (pa[axis] - pb[axis]).abs() > tolerance {
            return false;
        }
    }

    if soup.has_normals() {
        let na = &soup.normals[a];
        let nb = &soup.normals[b];
        for axis in 0..3 {
            if (na[axis] - nb[axis]).abs() > tolerance {
                return false;
            }
        }
    }

    if soup.has_texcoords() {
        let ta = &soup.texcoords[a];
        let tb = &soup.texcoords[b];
        for axis in 0..2 {
            if (ta[axis] - tb[axis]).abs() > tolerance {
                return false;
            }
        }
    }

    true
}
