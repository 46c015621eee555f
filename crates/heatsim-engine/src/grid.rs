//! Blocked storage: one tile per `(bx, by)`, plus the four halo rings
//! that cache neighbour-owned boundary cells.

use heatsim_common::BlockDims;

/// One `bsx x bsy` tile, zero-initialized, dense row-major storage.
#[derive(Debug, Clone)]
pub struct Block {
    dims: BlockDims,
    cells: Vec<f64>,
}

impl Block {
    pub fn zeroed(dims: BlockDims) -> Self {
        Self {
            dims,
            cells: vec![0.0; dims.cells()],
        }
    }

    #[inline]
    pub fn dims(&self) -> BlockDims {
        self.dims
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.cells[x * self.dims.bsy + y]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        self.cells[x * self.dims.bsy + y] = value;
    }

    /// Values of the last row (`x = bsx-1`), used as the outgoing south edge.
    pub fn last_row(&self) -> Vec<f64> {
        let start = (self.dims.bsx - 1) * self.dims.bsy;
        self.cells[start..start + self.dims.bsy].to_vec()
    }

    /// Values of the first row (`x = 0`).
    pub fn first_row(&self) -> Vec<f64> {
        self.cells[0..self.dims.bsy].to_vec()
    }

    /// Values of the last column (`y = bsy-1`).
    pub fn last_col(&self) -> Vec<f64> {
        (0..self.dims.bsx).map(|x| self.get(x, self.dims.bsy - 1)).collect()
    }

    /// Values of the first column (`y = 0`).
    pub fn first_col(&self) -> Vec<f64> {
        (0..self.dims.bsx).map(|x| self.get(x, 0)).collect()
    }
}

/// The four halo buffers owned by one rank. `top`/`bottom` each hold
/// `nby` row-shaped vectors of length `bsy`; `left`/`right` each hold
/// `nbx` column-shaped vectors of length `bsx`.
#[derive(Debug, Clone)]
pub struct HaloRing {
    pub top: Vec<Vec<f64>>,
    pub bottom: Vec<Vec<f64>>,
    pub left: Vec<Vec<f64>>,
    pub right: Vec<Vec<f64>>,
}

impl HaloRing {
    pub fn zeroed(nbx: usize, nby: usize, dims: BlockDims) -> Self {
        Self {
            top: vec![vec![0.0; dims.bsy]; nby],
            bottom: vec![vec![0.0; dims.bsy]; nby],
            left: vec![vec![0.0; dims.bsx]; nbx],
            right: vec![vec![0.0; dims.bsx]; nbx],
        }
    }
}

/// A rank's local slab: `nbx x nby` tiles in row-major block order.
#[derive(Debug, Clone)]
pub struct LocalGrid {
    nbx: usize,
    nby: usize,
    dims: BlockDims,
    blocks: Vec<Block>,
}

impl LocalGrid {
    pub fn zeroed(nbx: usize, nby: usize, dims: BlockDims) -> Self {
        Self {
            nbx,
            nby,
            dims,
            blocks: (0..nbx * nby).map(|_| Block::zeroed(dims)).collect(),
        }
    }

    #[inline]
    pub fn nbx(&self) -> usize {
        self.nbx
    }
    #[inline]
    pub fn nby(&self) -> usize {
        self.nby
    }
    #[inline]
    pub fn dims(&self) -> BlockDims {
        self.dims
    }

    #[inline]
    fn index(&self, bx: usize, by: usize) -> usize {
        bx * self.nby + by
    }

    #[inline]
    pub fn block(&self, bx: usize, by: usize) -> &Block {
        &self.blocks[self.index(bx, by)]
    }

    #[inline]
    pub fn block_mut(&mut self, bx: usize, by: usize) -> &mut Block {
        let idx = self.index(bx, by);
        &mut self.blocks[idx]
    }

    /// The flat index a `(bx, by)` pair occupies in [`Self::blocks_mut`].
    #[inline]
    pub fn flat_index(&self, bx: usize, by: usize) -> usize {
        self.index(bx, by)
    }

    /// Raw access to the backing tile slice, for callers that need to hand
    /// out disjoint mutable references to several tiles at once (the
    /// scheduler's per-diagonal parallel pass).
    #[inline]
    pub fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    pub fn iter_blocks(&self) -> impl Iterator<Item = ((usize, usize), &Block)> {
        (0..self.nbx)
            .flat_map(move |bx| (0..self.nby).map(move |by| (bx, by)))
            .map(move |(bx, by)| ((bx, by), self.block(bx, by)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_get_set_roundtrip() {
        let mut b = Block::zeroed(BlockDims::new(4, 4));
        b.set(1, 2, 3.5);
        assert_eq!(b.get(1, 2), 3.5);
        assert_eq!(b.get(0, 0), 0.0);
    }

    #[test]
    fn last_row_and_first_row_are_distinct_edges() {
        let mut b = Block::zeroed(BlockDims::new(3, 2));
        b.set(0, 0, 1.0);
        b.set(0, 1, 2.0);
        b.set(2, 0, 9.0);
        b.set(2, 1, 8.0);
        assert_eq!(b.first_row(), vec![1.0, 2.0]);
        assert_eq!(b.last_row(), vec![9.0, 8.0]);
    }

    #[test]
    fn last_col_and_first_col_are_distinct_edges() {
        let mut b = Block::zeroed(BlockDims::new(2, 3));
        b.set(0, 0, 1.0);
        b.set(1, 0, 2.0);
        b.set(0, 2, 9.0);
        b.set(1, 2, 8.0);
        assert_eq!(b.first_col(), vec![1.0, 2.0]);
        assert_eq!(b.last_col(), vec![9.0, 8.0]);
    }

    #[test]
    fn local_grid_indexes_blocks_row_major() {
        let dims = BlockDims::new(2, 2);
        let mut grid = LocalGrid::zeroed(2, 3, dims);
        grid.block_mut(1, 2).set(0, 0, 42.0);
        assert_eq!(grid.block(1, 2).get(0, 0), 42.0);
        assert_eq!(grid.block(0, 0).get(0, 0), 0.0);
    }
}
