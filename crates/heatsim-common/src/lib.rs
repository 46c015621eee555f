//! Shared data model and error type for the heatsim distributed stencil engine.

pub mod config;
pub mod error;
pub mod layout;
pub mod source;

pub use config::SimConfig;
pub use error::{Edge, HeatError, PeerError};
pub use layout::{round_up, BlockDims, ProcessLayout, Rank2D, DEFAULT_BLOCK_SIZE};
pub use source::HeatSource;
