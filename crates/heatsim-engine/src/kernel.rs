//! The five-point Gauss-Seidel tile kernel.
//!
//! A pure function over one tile and its four boundary vectors. Callers
//! (the scheduler) are responsible for resolving each boundary vector to
//! either a neighbour tile's edge or a halo buffer, and for deciding
//! whether the tile's post-update edges need mirroring into the rank's
//! outgoing halo buffers; mirroring after the whole tile is done is
//! equivalent to mirroring cell-by-cell during the sweep, because
//! Gauss-Seidel traversal order means a tile's own `first_col`/`last_col`
//! after a full pass already hold the freshly written values the mirror
//! would have copied mid-loop.

use crate::grid::Block;

/// Update every cell of `target` in row-major `(x, y)` order to
/// `0.25 * (north + south + west + east)`, where:
/// - north is `target(x-1, y)` when `x>0` (already new this sweep), else `north[y]`.
/// - south is `target(x+1, y)` when `x<bsx-1` (still old this sweep), else `south[y]`.
/// - west is `target(x, y-1)` when `y>0` (already new this sweep), else `west[x]`.
/// - east is `target(x, y+1)` when `y<bsy-1` (still old this sweep), else `east[x]`.
///
/// `north`/`south` must have length `bsy`; `west`/`east` must have length `bsx`.
pub fn solve_block(target: &mut Block, north: &[f64], south: &[f64], west: &[f64], east: &[f64]) {
    let dims = target.dims();
    debug_assert_eq!(north.len(), dims.bsy);
    debug_assert_eq!(south.len(), dims.bsy);
    debug_assert_eq!(west.len(), dims.bsx);
    debug_assert_eq!(east.len(), dims.bsx);

    for x in 0..dims.bsx {
        for y in 0..dims.bsy {
            let n = if x > 0 { target.get(x - 1, y) } else { north[y] };
            let s = if x < dims.bsx - 1 {
                target.get(x + 1, y)
            } else {
                south[y]
            };
            let w = if y > 0 { target.get(x, y - 1) } else { west[x] };
            let e = if y < dims.bsy - 1 {
                target.get(x, y + 1)
            } else {
                east[x]
            };
            target.set(x, y, 0.25 * (n + s + w + e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatsim_common::BlockDims;

    #[test]
    fn all_zero_boundaries_keep_tile_zero() {
        let dims = BlockDims::new(4, 4);
        let mut block = Block::zeroed(dims);
        let zeros_row = vec![0.0; dims.bsy];
        let zeros_col = vec![0.0; dims.bsx];
        solve_block(&mut block, &zeros_row, &zeros_row, &zeros_col, &zeros_col);
        for x in 0..dims.bsx {
            for y in 0..dims.bsy {
                assert_eq!(block.get(x, y), 0.0);
            }
        }
    }

    #[test]
    fn uniform_boundary_converges_in_one_pass_for_first_cell() {
        // Cell (0,0) reads only boundary inputs: north[0], west[0], plus old
        // (zero) south/east neighbours within the tile.
        let dims = BlockDims::new(3, 3);
        let mut block = Block::zeroed(dims);
        let north = vec![4.0; dims.bsy];
        let south = vec![0.0; dims.bsy];
        let west = vec![4.0; dims.bsx];
        let east = vec![0.0; dims.bsx];
        solve_block(&mut block, &north, &south, &west, &east);
        // (0,0): north=4 (halo), south=old(1,0)=0, west=4 (halo), east=old(0,1)=0
        assert_eq!(block.get(0, 0), 0.25 * (4.0 + 0.0 + 4.0 + 0.0));
    }

    #[test]
    fn west_neighbour_within_row_sees_freshly_written_value() {
        let dims = BlockDims::new(2, 2);
        let mut block = Block::zeroed(dims);
        let north = vec![8.0; dims.bsy];
        let south = vec![0.0; dims.bsy];
        let west = vec![8.0; dims.bsx];
        let east = vec![0.0; dims.bsx];
        solve_block(&mut block, &north, &south, &west, &east);
        // (0,0) = 0.25*(8+0+8+0) = 4.0, already written when (0,1) is computed.
        assert_eq!(block.get(0, 0), 4.0);
        // (0,1): north=north[1]=8, south=old(1,1)=0, west=target(0,0)=4 (new), east=east[0]=0
        assert_eq!(block.get(0, 1), 0.25 * (8.0 + 0.0 + 4.0 + 0.0));
    }
}
