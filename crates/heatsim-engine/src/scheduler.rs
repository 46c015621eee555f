//! The intra-rank tile scheduler.
//!
//! A tile `(bx, by)` depends on its north (`bx-1, by`) and west
//! (`bx, by-1`) neighbours having already been solved this sweep, so
//! tiles are grouped into diagonal "wavefronts" `d = bx + by`: every
//! tile in a wavefront is independent of every other tile in the same
//! wavefront and can run concurrently, but a wavefront cannot start
//! until the previous one has fully completed.

use crate::grid::{HaloRing, LocalGrid};
use crate::kernel::solve_block;
use rayon::prelude::*;

/// Boundary vectors gathered for one tile immediately before the
/// wavefront it belongs to is solved. North/west come from a
/// neighbour tile already solved this sweep (or a halo ring at the
/// rank's own north/west edge); south/east come from a neighbour tile
/// not yet touched this sweep (or a halo ring holding the adjacent
/// rank's pre-sweep snapshot).
struct TileBoundaries {
    north: Vec<f64>,
    south: Vec<f64>,
    west: Vec<f64>,
    east: Vec<f64>,
}

/// How a [`run_sweep`] call fans work out across tiles in one wavefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fanout {
    /// Solve every tile in a wavefront on the calling thread.
    Sequential,
    /// Hand each wavefront to rayon's global pool.
    Parallel,
}

/// Run one full Gauss-Seidel sweep over every tile of `grid`, reading
/// rank-boundary data from `halo`. Mutates `grid` in place.
pub fn run_sweep(grid: &mut LocalGrid, halo: &HaloRing, fanout: Fanout) {
    let nbx = grid.nbx();
    let nby = grid.nby();
    if nbx == 0 || nby == 0 {
        return;
    }
    let max_diagonal = nbx + nby - 2;

    for d in 0..=max_diagonal {
        let wavefront = tiles_in_diagonal(nbx, nby, d);
        let boundaries: Vec<(usize, TileBoundaries)> = wavefront
            .iter()
            .map(|&(bx, by)| {
                let idx = grid.flat_index(bx, by);
                (idx, gather_boundaries(grid, halo, nbx, nby, bx, by))
            })
            .collect();

        let blocks = grid.blocks_mut();
        match fanout {
            Fanout::Sequential => {
                for (idx, b) in &boundaries {
                    solve_block(&mut blocks[*idx], &b.north, &b.south, &b.west, &b.east);
                }
            }
            Fanout::Parallel => {
                let lookup: std::collections::HashMap<usize, &TileBoundaries> =
                    boundaries.iter().map(|(idx, b)| (*idx, b)).collect();
                blocks.par_iter_mut().enumerate().for_each(|(idx, block)| {
                    if let Some(b) = lookup.get(&idx) {
                        solve_block(block, &b.north, &b.south, &b.west, &b.east);
                    }
                });
            }
        }
    }
}

fn tiles_in_diagonal(nbx: usize, nby: usize, d: usize) -> Vec<(usize, usize)> {
    (0..nbx)
        .filter_map(|bx| {
            if d >= bx && d - bx < nby {
                Some((bx, d - bx))
            } else {
                None
            }
        })
        .collect()
}

fn gather_boundaries(
    grid: &LocalGrid,
    halo: &HaloRing,
    nbx: usize,
    nby: usize,
    bx: usize,
    by: usize,
) -> TileBoundaries {
    let north = if bx > 0 {
        grid.block(bx - 1, by).last_row()
    } else {
        halo.top[by].clone()
    };
    let west = if by > 0 {
        grid.block(bx, by - 1).last_col()
    } else {
        halo.left[bx].clone()
    };
    let south = if bx < nbx - 1 {
        grid.block(bx + 1, by).first_row()
    } else {
        halo.bottom[by].clone()
    };
    let east = if by < nby - 1 {
        grid.block(bx, by + 1).first_col()
    } else {
        halo.right[bx].clone()
    };
    TileBoundaries { north, south, west, east }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatsim_common::BlockDims;

    #[test]
    fn sweep_over_zero_halo_keeps_grid_zero() {
        let dims = BlockDims::new(3, 3);
        let mut grid = LocalGrid::zeroed(2, 2, dims);
        let halo = HaloRing::zeroed(2, 2, dims);
        run_sweep(&mut grid, &halo, Fanout::Sequential);
        for ((_, _), block) in grid.iter_blocks() {
            for x in 0..dims.bsx {
                for y in 0..dims.bsy {
                    assert_eq!(block.get(x, y), 0.0);
                }
            }
        }
    }

    #[test]
    fn sequential_and_parallel_fanout_agree() {
        let dims = BlockDims::new(3, 3);
        let mut halo = HaloRing::zeroed(3, 3, dims);
        for row in halo.top.iter_mut() {
            row[0] = 10.0;
        }
        for col in halo.left.iter_mut() {
            col[0] = 10.0;
        }

        let mut seq_grid = LocalGrid::zeroed(3, 3, dims);
        run_sweep(&mut seq_grid, &halo, Fanout::Sequential);

        let mut par_grid = LocalGrid::zeroed(3, 3, dims);
        run_sweep(&mut par_grid, &halo, Fanout::Parallel);

        for bx in 0..3 {
            for by in 0..3 {
                let a = seq_grid.block(bx, by);
                let b = par_grid.block(bx, by);
                for x in 0..dims.bsx {
                    for y in 0..dims.bsy {
                        assert_eq!(a.get(x, y), b.get(x, y));
                    }
                }
            }
        }
    }

    #[test]
    fn single_tile_sweep_uses_all_four_halo_edges() {
        let dims = BlockDims::new(2, 2);
        let mut grid = LocalGrid::zeroed(1, 1, dims);
        let mut halo = HaloRing::zeroed(1, 1, dims);
        halo.top[0] = vec![4.0, 4.0];
        halo.left[0] = vec![4.0, 4.0];
        halo.bottom[0] = vec![0.0, 0.0];
        halo.right[0] = vec![0.0, 0.0];
        run_sweep(&mut grid, &halo, Fanout::Sequential);
        assert_eq!(grid.block(0, 0).get(0, 0), 0.25 * (4.0 + 0.0 + 4.0 + 0.0));
    }
}
