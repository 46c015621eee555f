//! Orchestration glue for the `heatsim` binary: gathering per-rank
//! results into one global buffer and printing the run summary.

pub mod gather;
pub mod report;

pub use report::RunReport;
