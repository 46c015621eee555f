//! Blocked Gauss-Seidel stencil engine: tile storage, the per-tile
//! kernel, the intra-rank wavefront scheduler, the rank-level
//! halo-exchange protocol, and the heat-source boundary initializer.

pub mod exchange;
pub mod grid;
pub mod kernel;
pub mod rank;
pub mod runtime;
pub mod scheduler;
pub mod source_init;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use exchange::{build_links, RankLinks};
pub use grid::{Block, HaloRing, LocalGrid};
pub use rank::RankState;
pub use scheduler::Fanout;
