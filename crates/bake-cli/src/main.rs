//! Bakes OBJ scenes into indexed binary model containers.
//!
//! Loads the scene, welds each mesh's triangle soup within a tolerance,
//! generates missing attributes, and writes the container next to a
//! directory of its textures. `RUST_LOG` overrides the verbosity flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use bake_obj::load_obj;
use bake_pipeline::{BakeParams, bake_to_file};
use bake_weld::{DEFAULT_TOLERANCE, WeldParams};

#[derive(Parser)]
#[command(name = "meshbake")]
#[command(version, about = "Bake OBJ scenes into indexed binary model containers")]
struct Cli {
    /// Input OBJ scene.
    input: PathBuf,

    /// Output container path.
    output: PathBuf,

    /// Weld tolerance: corners merge when every attribute component they
    /// share agrees within this distance.
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f32,

    /// Bake meshes one at a time instead of across worker threads.
    #[arg(long)]
    sequential: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let mut params =
        BakeParams::new().with_weld(WeldParams::new().with_tolerance(cli.tolerance));
    if cli.sequential {
        params = params.sequential();
    }

    let scene = load_obj(&cli.input)
        .with_context(|| format!("failed to load '{}'", cli.input.display()))?;
    let report = bake_to_file(&scene, &cli.output, &params)
        .with_context(|| format!("failed to bake '{}'", cli.output.display()))?;

    println!(
        "{} -> {}: {} meshes, {} vertices, {} indices, {} textures",
        cli.input.display(),
        cli.output.display(),
        report.meshes,
        report.baked_vertices,
        report.baked_indices,
        report.textures
    );
    Ok(())
}
