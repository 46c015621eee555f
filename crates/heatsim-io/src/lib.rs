//! CLI parsing, configuration-file reading, and PPM image output for
//! the heatsim binary.

pub mod cli;
pub mod image;
pub mod sources;

pub use cli::Cli;
pub use image::{palette, temperature_to_index, temperature_to_rgb, write_ppm, Rgb};
pub use sources::read_sources_file;
