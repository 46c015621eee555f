//! Command-line surface.

use clap::Parser;

/// A 2D blocked Gauss-Seidel heat-diffusion simulation, distributed
/// across a grid of worker ranks described by the sources file.
#[derive(Parser, Debug)]
#[command(name = "heatsim", version, about)]
pub struct Cli {
    /// Number of rows in the simulated domain, before rounding up to a
    /// multiple of the process layout's tile grid. Overridden by `--size`.
    #[arg(short = 'r', long, default_value_t = 1024)]
    pub rows: usize,

    /// Number of columns in the simulated domain, before rounding up.
    /// Overridden by `--size`.
    #[arg(short = 'c', long, default_value_t = 1024)]
    pub cols: usize,

    /// Shorthand for `--rows=N --cols=N`.
    #[arg(short = 's', long = "size")]
    pub size: Option<usize>,

    /// Number of Gauss-Seidel sweeps to run.
    #[arg(short = 't', long, default_value_t = 100)]
    pub timesteps: usize,

    /// Path to the configuration file giving the process layout and
    /// heat sources.
    #[arg(short = 'f', long = "sources-file", default_value = "heat.conf")]
    pub sources_file: String,

    /// Write a PPM image of the final temperature field. Bare `-o`
    /// writes `heat.ppm`; omit the flag entirely to skip image output.
    #[arg(short = 'o', long = "output", num_args = 0..=1, default_missing_value = "heat.ppm")]
    pub output: Option<String>,
}

impl Cli {
    pub fn generate_image(&self) -> bool {
        self.output.is_some()
    }

    pub fn image_file(&self) -> String {
        self.output.clone().unwrap_or_else(|| "heat.ppm".to_string())
    }

    /// Resolved row count: `--size` wins over `--rows` when both are given.
    pub fn resolved_rows(&self) -> usize {
        self.size.unwrap_or(self.rows)
    }

    /// Resolved column count: `--size` wins over `--cols` when both are given.
    pub fn resolved_cols(&self) -> usize {
        self.size.unwrap_or(self.cols)
    }
}
