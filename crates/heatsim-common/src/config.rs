//! The run configuration record.
//!
//! A single immutable record passed into every component that needs
//! global parameters, with no other process-wide state.

use crate::layout::{round_up, BlockDims, ProcessLayout};
use crate::source::HeatSource;

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub rows: usize,
    pub cols: usize,
    pub timesteps: usize,
    pub sources_file: String,
    pub generate_image: bool,
    pub image_file: String,
    pub process_layout: ProcessLayout,
    pub heat_sources: Vec<HeatSource>,
    pub block_dims: BlockDims,
}

impl SimConfig {
    /// Round `rows`/`cols` up so that `rows % (px*bsx) == 0` and
    /// `cols % (py*bsy) == 0`. Mutates in place.
    pub fn refine(&mut self) {
        let row_granularity = self.process_layout.px * self.block_dims.bsx;
        let col_granularity = self.process_layout.py * self.block_dims.bsy;
        self.rows = round_up(self.rows, row_granularity);
        self.cols = round_up(self.cols, col_granularity);
    }

    /// Per-rank tile counts after refinement: `nbx = rows/(px*BSX)`, `nby = cols/(py*BSY)`.
    pub fn blocks_per_rank(&self) -> (usize, usize) {
        let nbx = self.rows / (self.process_layout.px * self.block_dims.bsx);
        let nby = self.cols / (self.process_layout.py * self.block_dims.bsy);
        (nbx, nby)
    }

    /// Total tile counts across the whole domain.
    pub fn total_blocks(&self) -> (usize, usize) {
        let (nbx, nby) = self.blocks_per_rank();
        (nbx * self.process_layout.px, nby * self.process_layout.py)
    }
}
