//! Test-only helpers: toy configurations and reference solvers used to
//! check a multi-rank run against a known-good baseline.

use heatsim_common::{BlockDims, ProcessLayout, SimConfig};

use crate::exchange::build_links;
use crate::grid::LocalGrid;
use crate::rank::RankState;
use crate::runtime;

/// A minimal config for exercising the engine without 1024-cell tiles.
pub fn toy_config(
    px: usize,
    py: usize,
    bsx: usize,
    bsy: usize,
    rows: usize,
    cols: usize,
    timesteps: usize,
) -> SimConfig {
    let mut cfg = SimConfig {
        rows,
        cols,
        timesteps,
        sources_file: "heat.conf".into(),
        generate_image: false,
        image_file: "heat.ppm".into(),
        process_layout: ProcessLayout::new(px, py),
        heat_sources: Vec::new(),
        block_dims: BlockDims::new(bsx, bsy),
    };
    cfg.refine();
    cfg
}

/// Run `config`'s whole refined domain as a single rank. Useful as a
/// baseline to compare against a multi-rank decomposition of the same
/// domain: the two must produce bit-identical results, since the
/// halo-exchange protocol exists precisely to preserve the single-rank
/// Gauss-Seidel ordering across partitions.
pub fn run_single_rank_reference(config: &SimConfig) -> LocalGrid {
    let mut single = config.clone();
    single.process_layout = ProcessLayout::new(1, 1);
    let links = build_links(&single.process_layout);
    let mut state = RankState::new(0, &single.process_layout, &single);
    state
        .run(&links[0], &single)
        .expect("a single rank never talks to a peer");
    state.grid
}

/// Run every rank of `config`'s process layout to completion, returning
/// each rank's final grid indexed by linear rank id.
pub fn run_all_ranks(config: &SimConfig) -> Vec<LocalGrid> {
    runtime::run(config).expect("rank run should not hit a peer error")
}
