//! The halo-exchange protocol.
//!
//! Ranks are pipelined the same way tiles are within a rank: a rank's
//! north and west neighbours must finish their sweep before it can use
//! their fresh edge data, so the rank grid itself forms one more layer
//! of wavefront (`d = rx + ry`). Two message classes cross each
//! adjacency per timestep:
//!
//! - *fresh*: sent by a rank after it finishes its own sweep, to its
//!   south/east neighbours, who consume it as north/west boundary
//!   input for their own upcoming sweep (this is the dependency edge
//!   that drives the rank-level wavefront).
//! - *stale*: sent by a rank at the very start of a timestep, before
//!   its sweep touches anything, to its north/west neighbours, who
//!   consume it as south/east boundary input — the "old" value a
//!   cross-rank tile boundary must see, mirroring how a tile reads an
//!   old value from a not-yet-visited neighbour tile within one rank.
//!   Stale sends have no dependency on this timestep's work and so can
//!   never contribute to a deadlock.

use crossbeam_channel::{unbounded, Receiver, Sender};
use heatsim_common::{Edge, HeatError, PeerError, ProcessLayout};

use crate::grid::{HaloRing, LocalGrid};

pub type HaloPayload = Vec<Vec<f64>>;

/// One rank's end of every channel it shares with its four neighbours.
/// Fields are `None` on domain edges where the corresponding neighbour
/// does not exist.
#[derive(Default)]
pub struct RankLinks {
    pub north_rank: Option<usize>,
    pub south_rank: Option<usize>,
    pub west_rank: Option<usize>,
    pub east_rank: Option<usize>,

    recv_fresh_north: Option<Receiver<HaloPayload>>,
    recv_fresh_west: Option<Receiver<HaloPayload>>,
    send_fresh_south: Option<Sender<HaloPayload>>,
    send_fresh_east: Option<Sender<HaloPayload>>,

    send_stale_north: Option<Sender<HaloPayload>>,
    send_stale_west: Option<Sender<HaloPayload>>,
    recv_stale_south: Option<Receiver<HaloPayload>>,
    recv_stale_east: Option<Receiver<HaloPayload>>,
}

/// Build the full channel topology for `layout`, indexed by linear rank id.
pub fn build_links(layout: &ProcessLayout) -> Vec<RankLinks> {
    let n = layout.rank_count();
    let mut links: Vec<RankLinks> = (0..n).map(|_| RankLinks::default()).collect();

    for rank in 0..n {
        let here = layout.rank_to_2d(rank);

        if let Some(south) = here.south(layout) {
            let south_rank = south.linear(layout);
            links[rank].south_rank = Some(south_rank);
            links[south_rank].north_rank = Some(rank);

            let (tx, rx) = unbounded::<HaloPayload>();
            links[rank].send_fresh_south = Some(tx);
            links[south_rank].recv_fresh_north = Some(rx);

            let (tx, rx) = unbounded::<HaloPayload>();
            links[south_rank].send_stale_north = Some(tx);
            links[rank].recv_stale_south = Some(rx);
        }

        if let Some(east) = here.east(layout) {
            let east_rank = east.linear(layout);
            links[rank].east_rank = Some(east_rank);
            links[east_rank].west_rank = Some(rank);

            let (tx, rx) = unbounded::<HaloPayload>();
            links[rank].send_fresh_east = Some(tx);
            links[east_rank].recv_fresh_west = Some(rx);

            let (tx, rx) = unbounded::<HaloPayload>();
            links[east_rank].send_stale_west = Some(tx);
            links[rank].recv_stale_east = Some(rx);
        }
    }

    links
}

fn peer_error(edge: Edge, from_rank: usize, to_rank: usize, expected_len: usize) -> HeatError {
    HeatError::Peer(PeerError {
        edge,
        from_rank,
        to_rank,
        expected_len,
        actual_len: None,
    })
}

/// Send this rank's current (pre-sweep) north- and west-facing edges to
/// its north/west neighbours, for their south/east boundary input.
pub fn send_stale(rank: usize, grid: &LocalGrid, links: &RankLinks) -> Result<(), HeatError> {
    if let (Some(tx), Some(north_rank)) = (&links.send_stale_north, links.north_rank) {
        let payload: HaloPayload = (0..grid.nby()).map(|by| grid.block(0, by).first_row()).collect();
        tx.send(payload)
            .map_err(|_| peer_error(Edge::North, rank, north_rank, grid.nby()))?;
    }
    if let (Some(tx), Some(west_rank)) = (&links.send_stale_west, links.west_rank) {
        let payload: HaloPayload = (0..grid.nbx()).map(|bx| grid.block(bx, 0).first_col()).collect();
        tx.send(payload)
            .map_err(|_| peer_error(Edge::West, rank, west_rank, grid.nbx()))?;
    }
    Ok(())
}

/// Receive fresh north/west edges and stale south/east edges into
/// `halo`, blocking on whichever neighbours exist. Must run after
/// [`send_stale`] has been called by every rank for this timestep, and
/// before the rank's own sweep.
pub fn recv_into_halo(rank: usize, links: &RankLinks, halo: &mut HaloRing) -> Result<(), HeatError> {
    if let (Some(rx), Some(north_rank)) = (&links.recv_fresh_north, links.north_rank) {
        let payload = rx
            .recv()
            .map_err(|_| peer_error(Edge::North, north_rank, rank, halo.top.len()))?;
        assign_rows(&mut halo.top, payload, Edge::North, north_rank, rank)?;
    }
    if let (Some(rx), Some(west_rank)) = (&links.recv_fresh_west, links.west_rank) {
        let payload = rx
            .recv()
            .map_err(|_| peer_error(Edge::West, west_rank, rank, halo.left.len()))?;
        assign_rows(&mut halo.left, payload, Edge::West, west_rank, rank)?;
    }
    if let (Some(rx), Some(south_rank)) = (&links.recv_stale_south, links.south_rank) {
        let payload = rx
            .recv()
            .map_err(|_| peer_error(Edge::South, south_rank, rank, halo.bottom.len()))?;
        assign_rows(&mut halo.bottom, payload, Edge::South, south_rank, rank)?;
    }
    if let (Some(rx), Some(east_rank)) = (&links.recv_stale_east, links.east_rank) {
        let payload = rx
            .recv()
            .map_err(|_| peer_error(Edge::East, east_rank, rank, halo.right.len()))?;
        assign_rows(&mut halo.right, payload, Edge::East, east_rank, rank)?;
    }
    Ok(())
}

/// Send this rank's freshly solved south- and east-facing edges onward,
/// once its sweep has completed.
pub fn send_fresh(rank: usize, grid: &LocalGrid, links: &RankLinks) -> Result<(), HeatError> {
    if let (Some(tx), Some(south_rank)) = (&links.send_fresh_south, links.south_rank) {
        let nbx = grid.nbx();
        let payload: HaloPayload = (0..grid.nby()).map(|by| grid.block(nbx - 1, by).last_row()).collect();
        tx.send(payload)
            .map_err(|_| peer_error(Edge::South, rank, south_rank, grid.nby()))?;
    }
    if let (Some(tx), Some(east_rank)) = (&links.send_fresh_east, links.east_rank) {
        let nby = grid.nby();
        let payload: HaloPayload = (0..grid.nbx()).map(|bx| grid.block(bx, nby - 1).last_col()).collect();
        tx.send(payload)
            .map_err(|_| peer_error(Edge::East, rank, east_rank, grid.nbx()))?;
    }
    Ok(())
}

fn assign_rows(
    dest: &mut [Vec<f64>],
    payload: HaloPayload,
    edge: Edge,
    from_rank: usize,
    to_rank: usize,
) -> Result<(), HeatError> {
    if payload.len() != dest.len() {
        return Err(HeatError::Peer(PeerError {
            edge,
            from_rank,
            to_rank,
            expected_len: dest.len(),
            actual_len: Some(payload.len()),
        }));
    }
    dest.clone_from_slice(&payload);
    Ok(())
}
