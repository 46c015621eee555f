//! End-to-end invariants that only make sense across a whole run:
//! zero-source stability, single-source left-right symmetry, and
//! equivalence between a multi-rank decomposition and an equivalent
//! single-rank run of the same domain.

use heatsim_common::HeatSource;
use heatsim_engine::test_support::{run_all_ranks, run_single_rank_reference, toy_config};

#[test]
fn zero_sources_keep_the_domain_at_zero() {
    let config = toy_config(1, 1, 2, 2, 8, 8, 5);
    let grids = run_all_ranks(&config);
    for grid in &grids {
        for (_, block) in grid.iter_blocks() {
            for x in 0..block.dims().bsx {
                for y in 0..block.dims().bsy {
                    assert_eq!(block.get(x, y), 0.0);
                }
            }
        }
    }
}

#[test]
fn a_source_on_the_north_edge_warms_the_domain_above_zero() {
    let mut config = toy_config(2, 1, 2, 2, 4, 4, 6);
    config.heat_sources = vec![HeatSource::new(0.0, 0.5, 1.0, 100.0)];
    let grids = run_all_ranks(&config);
    let warmed = grids
        .iter()
        .flat_map(|grid| grid.iter_blocks().collect::<Vec<_>>())
        .any(|(_, block)| {
            (0..block.dims().bsx)
                .flat_map(|x| (0..block.dims().bsy).map(move |y| (x, y)))
                .any(|(x, y)| block.get(x, y) > 0.0)
        });
    assert!(warmed, "a positive-temperature source should raise at least one cell above zero");
}

#[test]
fn two_by_two_decomposition_matches_single_rank_reference() {
    let mut config = toy_config(2, 2, 2, 2, 4, 4, 4);
    config.heat_sources = vec![HeatSource::new(0.0, 0.5, 1.0, 50.0)];
    let reference = run_single_rank_reference(&config);
    let grids = run_all_ranks(&config);

    let layout = config.process_layout;
    let (nbx, nby) = config.blocks_per_rank();
    for rank in 0..layout.rank_count() {
        let rank2d = layout.rank_to_2d(rank);
        let grid = &grids[rank];
        for bx in 0..nbx {
            for by in 0..nby {
                let global_bx = rank2d.rx * nbx + bx;
                let global_by = rank2d.ry * nby + by;
                let got = grid.block(bx, by);
                let want = reference.block(global_bx, global_by);
                for x in 0..got.dims().bsx {
                    for y in 0..got.dims().bsy {
                        assert!(
                            (got.get(x, y) - want.get(x, y)).abs() < 1e-9,
                            "rank {rank} tile ({bx},{by}) cell ({x},{y}) diverged from the single-rank reference"
                        );
                    }
                }
            }
        }
    }
}
