use std::path::Path;
use std::time::Instant;

use clap::Parser;
use heatsim_common::{BlockDims, SimConfig};
use heatsim_io::Cli;
use tracing::info;

use heatsim::report::RunReport;
use heatsim::{gather, report};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap prints --help/--version to stdout and exits 0 on its own
            // terms; every other parse failure is remapped to this crate's
            // single nonzero exit code, 1.
            let _ = err.print();
            match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    std::process::exit(0)
                }
                _ => std::process::exit(1),
            }
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("heatsim: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let (process_layout, heat_sources) = heatsim_io::read_sources_file(Path::new(&cli.sources_file))?;

    let mut config = SimConfig {
        rows: cli.resolved_rows(),
        cols: cli.resolved_cols(),
        timesteps: cli.timesteps,
        sources_file: cli.sources_file.clone(),
        generate_image: cli.generate_image(),
        image_file: cli.image_file(),
        process_layout,
        heat_sources,
        block_dims: BlockDims::default(),
    };
    config.refine();

    info!(
        rows = config.rows,
        cols = config.cols,
        timesteps = config.timesteps,
        ranks = config.process_layout.rank_count(),
        "starting simulation"
    );

    let started = Instant::now();
    let grids = heatsim_engine::runtime::run(&config)?;
    let elapsed = started.elapsed();

    let run_report = RunReport {
        rows: config.rows,
        cols: config.cols,
        bs: config.block_dims.bsx,
        ranks: config.process_layout.rank_count(),
        threads: rayon::current_num_threads(),
        timesteps: config.timesteps,
        elapsed_secs: elapsed.as_secs_f64(),
    };
    report::print_report(&run_report);

    if config.generate_image {
        let buffer = gather::gather_global_temperatures(&config, &grids);
        let min = buffer.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = buffer.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        heatsim_io::write_ppm(
            Path::new(&config.image_file),
            config.rows,
            config.cols,
            &buffer,
            min,
            max,
        )?;
        info!(path = %config.image_file, "wrote image");
    }

    Ok(())
}
