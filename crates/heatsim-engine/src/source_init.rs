//! Heat-source boundary initializer.
//!
//! At rank startup, each of the four halo rings is filled only if the
//! rank sits on the corresponding domain edge (`rx==0` -> top,
//! `rx==Px-1` -> bottom, `ry==0` -> left, `ry==Py-1` -> right). A cell
//! on that edge gets the additive contribution of every heat source
//! whose range reaches its normalized global coordinate; a rank that
//! does not own an edge leaves that halo ring at zero (it is
//! overwritten by the exchange protocol on the first sweep instead).
//! Edges a rank owns on domain boundaries are never touched by the
//! exchange protocol, so this seed value is a constant Dirichlet
//! boundary for the whole run.

use heatsim_common::{BlockDims, HeatSource, ProcessLayout, Rank2D};

use crate::grid::HaloRing;

fn contribution(sources: &[HeatSource], u: f64, v: f64) -> f64 {
    sources.iter().map(|s| s.contribution_at(u, v)).sum()
}

/// Seed every halo ring `rank2d` owns a domain edge for, given the
/// rank's local tile counts (`nbx`, `nby`), tile dimensions, and the
/// whole domain's refined `(total_rows, total_cols)`.
#[allow(clippy::too_many_arguments)]
pub fn seed_boundary_halos(
    halo: &mut HaloRing,
    rank2d: Rank2D,
    layout: &ProcessLayout,
    nbx: usize,
    nby: usize,
    dims: BlockDims,
    total_rows: usize,
    total_cols: usize,
    sources: &[HeatSource],
) {
    if !rank2d.has_north() {
        // Global row 0.
        for by in 0..nby {
            for y in 0..dims.bsy {
                let global_col = rank2d.ry * nby * dims.bsy + by * dims.bsy + y;
                let v = global_col as f64 / total_cols as f64;
                halo.top[by][y] = contribution(sources, 0.0, v);
            }
        }
    }
    if !rank2d.has_south(layout) {
        // Global row total_rows - 1.
        let u = (total_rows - 1) as f64 / total_rows as f64;
        for by in 0..nby {
            for y in 0..dims.bsy {
                let global_col = rank2d.ry * nby * dims.bsy + by * dims.bsy + y;
                let v = global_col as f64 / total_cols as f64;
                halo.bottom[by][y] = contribution(sources, u, v);
            }
        }
    }
    if !rank2d.has_west() {
        // Global col 0.
        for bx in 0..nbx {
            for x in 0..dims.bsx {
                let global_row = rank2d.rx * nbx * dims.bsx + bx * dims.bsx + x;
                let u = global_row as f64 / total_rows as f64;
                halo.left[bx][x] = contribution(sources, u, 0.0);
            }
        }
    }
    if !rank2d.has_east(layout) {
        // Global col total_cols - 1.
        let v = (total_cols - 1) as f64 / total_cols as f64;
        for bx in 0..nbx {
            for x in 0..dims.bsx {
                let global_row = rank2d.rx * nbx * dims.bsx + bx * dims.bsx + x;
                let u = global_row as f64 / total_rows as f64;
                halo.right[bx][x] = contribution(sources, u, v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatsim_common::BlockDims;

    #[test]
    fn interior_rank_on_no_edge_stays_zero() {
        let layout = ProcessLayout::new(3, 1);
        let dims = BlockDims::new(2, 2);
        let mut halo = HaloRing::zeroed(1, 1, dims);
        let middle = Rank2D { rx: 1, ry: 0 };
        let sources = vec![HeatSource::new(0.0, 0.0, 1.0, 100.0)];
        seed_boundary_halos(&mut halo, middle, &layout, 1, 1, dims, 3, 2, &sources);
        assert_eq!(halo.top[0], vec![0.0, 0.0]);
        assert_eq!(halo.bottom[0], vec![0.0, 0.0]);
    }

    #[test]
    fn north_edge_rank_seeds_top_only() {
        let layout = ProcessLayout::new(2, 1);
        let dims = BlockDims::new(1, 2);
        let mut halo = HaloRing::zeroed(1, 1, dims);
        let north = Rank2D { rx: 0, ry: 0 };
        let sources = vec![HeatSource::new(0.0, 0.0, 1.0, 100.0)];
        seed_boundary_halos(&mut halo, north, &layout, 1, 1, dims, 2, 2, &sources);
        assert_eq!(halo.top[0][0], 100.0);
        assert!(halo.top[0][1] < 100.0);
        assert_eq!(halo.bottom[0], vec![0.0, 0.0]);
    }

    #[test]
    fn south_edge_rank_seeds_bottom_using_last_global_row() {
        let layout = ProcessLayout::new(2, 1);
        let dims = BlockDims::new(1, 2);
        let mut halo = HaloRing::zeroed(1, 1, dims);
        let south = Rank2D { rx: 1, ry: 0 };
        // Source sits at row=1.0 (bottom edge), col=0.0.
        let sources = vec![HeatSource::new(1.0, 0.0, 1.0, 100.0)];
        seed_boundary_halos(&mut halo, south, &layout, 1, 1, dims, 2, 2, &sources);
        assert_eq!(halo.top[0], vec![0.0, 0.0]);
        assert!(halo.bottom[0][0] > 0.0);
    }

    #[test]
    fn corner_rank_seeds_both_of_its_edges() {
        // rx=0 (north edge) and ry=0 (west edge) simultaneously.
        let layout = ProcessLayout::new(2, 2);
        let dims = BlockDims::new(2, 2);
        let mut halo = HaloRing::zeroed(1, 1, dims);
        let corner = Rank2D { rx: 0, ry: 0 };
        let sources = vec![HeatSource::new(0.0, 0.0, 1.0, 100.0)];
        seed_boundary_halos(&mut halo, corner, &layout, 1, 1, dims, 4, 4, &sources);
        assert!(halo.top.iter().flatten().any(|&v| v > 0.0));
        assert!(halo.left.iter().flatten().any(|&v| v > 0.0));
        assert_eq!(halo.bottom[0], vec![0.0, 0.0]);
        assert_eq!(halo.right[0], vec![0.0, 0.0]);
    }
}
