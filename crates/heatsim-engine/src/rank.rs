//! Worker bootstrap: the per-rank state and timestep loop.

use heatsim_common::{HeatError, ProcessLayout, Rank2D, SimConfig};
use tracing::{debug, instrument};

use crate::exchange::{recv_into_halo, send_fresh, send_stale, RankLinks};
use crate::grid::{HaloRing, LocalGrid};
use crate::scheduler::{run_sweep, Fanout};
use crate::source_init::seed_boundary_halos;

/// Everything one worker rank owns: its slab of tiles, its halo ring,
/// and its identity within the process layout.
pub struct RankState {
    pub rank: usize,
    pub rank2d: Rank2D,
    pub grid: LocalGrid,
    pub halo: HaloRing,
}

impl RankState {
    pub fn new(rank: usize, layout: &ProcessLayout, config: &SimConfig) -> Self {
        let rank2d = layout.rank_to_2d(rank);
        let (nbx, nby) = config.blocks_per_rank();
        let dims = config.block_dims;
        let mut halo = HaloRing::zeroed(nbx, nby, dims);
        let (total_row_blocks, total_col_blocks) = config.total_blocks();
        let total_rows = total_row_blocks * dims.bsx;
        let total_cols = total_col_blocks * dims.bsy;
        seed_boundary_halos(
            &mut halo,
            rank2d,
            layout,
            nbx,
            nby,
            dims,
            total_rows,
            total_cols,
            &config.heat_sources,
        );
        Self {
            rank,
            rank2d,
            grid: LocalGrid::zeroed(nbx, nby, dims),
            halo,
        }
    }

    /// Run `config.timesteps` full sweeps, exchanging halos with
    /// neighbours (via `links`) before and after every sweep.
    #[instrument(skip(self, links, config), fields(rank = self.rank))]
    pub fn run(&mut self, links: &RankLinks, config: &SimConfig) -> Result<(), HeatError> {
        let fanout = if config.block_dims.cells() > 1 {
            Fanout::Parallel
        } else {
            Fanout::Sequential
        };
        for step in 0..config.timesteps {
            send_stale(self.rank, &self.grid, links)?;
            recv_into_halo(self.rank, links, &mut self.halo)?;
            run_sweep(&mut self.grid, &self.halo, fanout);
            send_fresh(self.rank, &self.grid, links)?;
            debug!(step, rank = self.rank, "sweep complete");
        }
        Ok(())
    }
}
