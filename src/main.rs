use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tbn_gen::{Config, Report, TbnError};

/// Generate per-face tangent and binormal records for a Wavefront OBJ file.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The .obj file to rewrite in place
    path: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(report) => {
            println!(
                "New tangent space coordinate has generated successfully! ({} faces)",
                report.faces
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let tbn_error = err.downcast_ref::<TbnError>();
            match tbn_error {
                Some(e) if e.is_skip() => log::warn!("{:#}", err),
                _ => log::error!("{:#}", err),
            }
            ExitCode::from(tbn_error.map_or(1, TbnError::exit_code))
        }
    }
}

fn run(args: &Args) -> anyhow::Result<Report> {
    let config = Config::default();
    let report = tbn_gen::generate(&args.path, &config)
        .with_context(|| format!("Failed to generate tangent space for {}", args.path.display()))?;
    Ok(report)
}
