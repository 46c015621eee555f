//! Orchestration: spawn one thread per rank, wire up the channel
//! topology, and run every rank to completion.

use heatsim_common::{HeatError, SimConfig};

use crate::exchange::build_links;
use crate::grid::LocalGrid;
use crate::rank::RankState;

/// Run every rank of `config`'s process layout to completion, returning
/// each rank's final grid indexed by linear rank id.
pub fn run(config: &SimConfig) -> Result<Vec<LocalGrid>, HeatError> {
    let layout = config.process_layout;
    let links = build_links(&layout);
    let mut states: Vec<RankState> = (0..layout.rank_count())
        .map(|rank| RankState::new(rank, &layout, config))
        .collect();

    let results: Vec<Result<(), HeatError>> = std::thread::scope(|scope| {
        let links = &links;
        let handles: Vec<_> = states
            .iter_mut()
            .enumerate()
            .map(|(rank, state)| scope.spawn(move || state.run(&links[rank], config)))
            .collect();
        handles.into_iter().map(|h| h.join().expect("rank thread panicked")).collect()
    });

    for result in results {
        result?;
    }

    Ok(states.into_iter().map(|s| s.grid).collect())
}
