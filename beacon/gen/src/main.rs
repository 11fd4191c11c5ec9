//! Beacon Code Generator
//!
//! Generates hit type builders from a measurement protocol parameter reference.

use std::fs;
use std::path::PathBuf;

use beacon_gen::errors::GeneratorError;
use beacon_gen::output::write_units;
use beacon_gen::pipeline::generate_from_html;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Beacon code generator - transforms a protocol parameter reference into hit type builders
#[derive(Parser, Debug)]
#[command(name = "beacon-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// HTML parameter reference to read
    #[arg(short, long, default_value = "generate/protocol-v1.html")]
    input: PathBuf,

    /// Output directory for generated code
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Sets up logging to stderr.
///
/// `RUST_LOG` wins over the level picked by `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), GeneratorError> {
    info!("Reading parameter reference from {}", cli.input.display());
    let html = fs::read_to_string(&cli.input).map_err(|e| GeneratorError::ReadError {
        path: cli.input.display().to_string(),
        source: e,
    })?;

    let units = generate_from_html(&html)?;
    write_units(&cli.output, &units, cli.dry_run)?;

    if !cli.dry_run {
        info!(
            "Successfully generated {} files in {}",
            units.len(),
            cli.output.display()
        );
    }

    Ok(())
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    run(&cli).inspect_err(|e| error!("{e}"))
}
