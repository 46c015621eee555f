//! The workspace's single error type.
//!
//! Every fatal condition the simulation can raise collapses into one of
//! these four kinds: a bad configuration, a resource (allocation)
//! failure, an I/O failure, or a peer (halo exchange) failure. All are
//! fatal — none are retried — so `HeatError` carries just enough context
//! for the diagnostic line `main` prints to stderr before exiting with
//! code 1.

use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum HeatError {
    /// Missing/invalid CLI argument, unparseable sources file, or a
    /// process-layout/rank-count mismatch.
    #[error("configuration error: {0}")]
    Config(String),

    /// Allocation failure for a tile or halo buffer.
    #[error("resource error: {0}")]
    Resource(String),

    /// Cannot open or write the sources file or the image file.
    #[error("I/O error: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A halo-exchange message was missing or the wrong size.
    #[error("peer error: {0}")]
    Peer(PeerError),
}

impl HeatError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn resource<S: Into<String>>(msg: S) -> Self {
        Self::Resource(msg.into())
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Detail for a failed halo exchange: which edge, which rank pair, and
/// what was expected versus received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerError {
    pub edge: Edge,
    pub from_rank: usize,
    pub to_rank: usize,
    pub expected_len: usize,
    pub actual_len: Option<usize>,
}

impl fmt::Display for PeerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.actual_len {
            Some(actual) => write!(
                f,
                "{:?} exchange rank {} -> rank {}: expected {} values, got {}",
                self.edge, self.from_rank, self.to_rank, self.expected_len, actual
            ),
            None => write!(
                f,
                "{:?} exchange rank {} -> rank {}: expected {} values, peer channel closed",
                self.edge, self.from_rank, self.to_rank, self.expected_len
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    North,
    South,
    West,
    East,
}
