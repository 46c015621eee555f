//! Process layout and block-size constants.

use crate::error::HeatError;

/// Default tile size along each axis, matching the original solver's
/// compile-time `BSX`/`BSY` (both 1024). Kept as a runtime value rather
/// than a const generic so tests can exercise multi-tile grids without
/// allocating gigabytes.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Dimensions of one tile: `bsx` rows, `bsy` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDims {
    pub bsx: usize,
    pub bsy: usize,
}

impl Default for BlockDims {
    fn default() -> Self {
        Self {
            bsx: DEFAULT_BLOCK_SIZE,
            bsy: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl BlockDims {
    pub fn new(bsx: usize, bsy: usize) -> Self {
        Self { bsx, bsy }
    }

    pub fn cells(&self) -> usize {
        self.bsx * self.bsy
    }
}

/// The logical `Px x Py` grid of worker ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessLayout {
    pub px: usize,
    pub py: usize,
}

impl ProcessLayout {
    pub fn new(px: usize, py: usize) -> Self {
        Self { px, py }
    }

    pub fn rank_count(&self) -> usize {
        self.px * self.py
    }

    /// Validate that `rank_count` workers were actually launched for
    /// this layout.
    pub fn validate_rank_count(&self, rank_count: usize) -> Result<(), HeatError> {
        if rank_count != self.rank_count() {
            return Err(HeatError::config(format!(
                "process layout {}x{} requires {} ranks, got {}",
                self.px,
                self.py,
                self.rank_count(),
                rank_count
            )));
        }
        Ok(())
    }

    /// Decompose a linear rank into its `(rx, ry)` position: `rx = rank / py`, `ry = rank % py`.
    pub fn rank_to_2d(&self, rank: usize) -> Rank2D {
        Rank2D {
            rx: rank / self.py,
            ry: rank % self.py,
        }
    }
}

/// A worker's position within the process layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank2D {
    pub rx: usize,
    pub ry: usize,
}

impl Rank2D {
    /// Linear rank `rx * py + ry`.
    pub fn linear(&self, layout: &ProcessLayout) -> usize {
        self.rx * layout.py + self.ry
    }

    pub fn has_north(&self) -> bool {
        self.rx > 0
    }
    pub fn has_west(&self) -> bool {
        self.ry > 0
    }
    pub fn has_south(&self, layout: &ProcessLayout) -> bool {
        self.rx < layout.px - 1
    }
    pub fn has_east(&self, layout: &ProcessLayout) -> bool {
        self.ry < layout.py - 1
    }

    pub fn north(&self, layout: &ProcessLayout) -> Option<Rank2D> {
        self.has_north().then(|| Rank2D {
            rx: self.rx - 1,
            ry: self.ry,
        })
    }
    pub fn south(&self, layout: &ProcessLayout) -> Option<Rank2D> {
        self.has_south(layout).then(|| Rank2D {
            rx: self.rx + 1,
            ry: self.ry,
        })
    }
    pub fn west(&self, layout: &ProcessLayout) -> Option<Rank2D> {
        self.has_west().then(|| Rank2D {
            rx: self.rx,
            ry: self.ry - 1,
        })
    }
    pub fn east(&self, layout: &ProcessLayout) -> Option<Rank2D> {
        self.has_east(layout).then(|| Rank2D {
            rx: self.rx,
            ry: self.ry + 1,
        })
    }
}

/// Round `value` up to the nearest multiple of `granularity`.
pub fn round_up(value: usize, granularity: usize) -> usize {
    value.div_ceil(granularity) * granularity
}
