//! Stitches every rank's final tile grid back into one global,
//! row-major temperature buffer for reporting and image output.

use heatsim_common::SimConfig;
use heatsim_engine::LocalGrid;

/// Build a `rows x cols` row-major buffer from `grids`, indexed by
/// linear rank id in the same order `heatsim_engine::runtime::run`
/// returns them.
pub fn gather_global_temperatures(config: &SimConfig, grids: &[LocalGrid]) -> Vec<f64> {
    let layout = config.process_layout;
    let (nbx, nby) = config.blocks_per_rank();
    let dims = config.block_dims;
    let mut buffer = vec![0.0; config.rows * config.cols];

    for rank in 0..layout.rank_count() {
        let rank2d = layout.rank_to_2d(rank);
        let grid = &grids[rank];
        let row_origin = rank2d.rx * nbx * dims.bsx;
        let col_origin = rank2d.ry * nby * dims.bsy;

        for bx in 0..nbx {
            for by in 0..nby {
                let block = grid.block(bx, by);
                for x in 0..dims.bsx {
                    for y in 0..dims.bsy {
                        let row = row_origin + bx * dims.bsx + x;
                        let col = col_origin + by * dims.bsy + y;
                        buffer[row * config.cols + col] = block.get(x, y);
                    }
                }
            }
        }
    }

    buffer
}
