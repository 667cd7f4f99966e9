//! # Arcsweep CLI
//!
//! Terminal front end for arc-flash hazard sweeps.
//!
//! ## Commands
//!
//! - `grid`: Evaluate the current × duration grid and print slices
//! - `point`: Evaluate a single (current, duration) pair with PPE category
//! - `init`: Write the reference study file to edit and re-run

mod logging;
mod output;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, Level};

use arc_core::calculations::{grid, point};
use arc_core::{
    load_study, save_study, CalcError, GridSlice, HazardGrid, PointInput, StudyFile, StudyInput,
};

#[derive(Parser)]
#[command(name = "arcsweep")]
#[command(author = "Arcsweep Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Arc-flash incident energy and protection boundary sweeps", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the hazard grid and print slices
    Grid {
        /// Study file (.afs); the reference study when omitted
        #[arg(short, long, env = "ARCSWEEP_STUDY")]
        study: Option<PathBuf>,

        /// Duration (s) at which to cut an energy-vs-current slice; repeatable
        #[arg(long = "at-duration", value_name = "SECONDS")]
        at_duration: Vec<f64>,

        /// Current (kA) at which to cut an energy-vs-duration slice; repeatable
        #[arg(long = "at-current", value_name = "KA")]
        at_current: Vec<f64>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Evaluate a single hazard point
    Point {
        /// Bolted fault current (kA)
        #[arg(short, long)]
        current: f64,

        /// Arc duration (s)
        #[arg(short, long)]
        duration: f64,

        /// Study file supplying electrode, coefficients and threshold
        #[arg(short, long, env = "ARCSWEEP_STUDY")]
        study: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Write the reference study file
    Init {
        /// Output path
        #[arg(short, long, default_value = "study.afs")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

/// Slices cut when none are requested
const DEFAULT_DURATIONS_S: [f64; 3] = [0.1, 0.5, 1.0];
const DEFAULT_CURRENTS_KA: [f64; 3] = [10.0, 25.0, 40.0];

#[derive(Serialize)]
struct GridReport<'a> {
    grid: &'a HazardGrid,
    slices: Vec<GridSlice>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    logging::init_tracing(cli.log_json, level);

    let json_errors = matches!(
        cli.command,
        Commands::Grid { format: Format::Json, .. } | Commands::Point { format: Format::Json, .. }
    );

    let outcome = match cli.command {
        Commands::Grid {
            study,
            at_duration,
            at_current,
            format,
        } => cmd_grid(study.as_deref(), &at_duration, &at_current, format),
        Commands::Point {
            current,
            duration,
            study,
            format,
        } => cmd_point(current, duration, study.as_deref(), format),
        Commands::Init { output, force } => cmd_init(&output, force),
    };

    if let Err(e) = &outcome {
        if json_errors {
            if let Some(calc) = e.downcast_ref::<CalcError>() {
                eprintln!("{}", serde_json::to_string_pretty(calc)?);
            }
        }
    }
    outcome
}

fn read_study(path: Option<&Path>) -> Result<StudyInput> {
    match path {
        Some(p) => {
            let file = load_study(p).with_context(|| format!("Failed to load study {}", p.display()))?;
            Ok(file.study)
        }
        None => Ok(StudyInput::default()),
    }
}

fn cmd_grid(study: Option<&Path>, at_duration: &[f64], at_current: &[f64], format: Format) -> Result<()> {
    let study = read_study(study)?;
    let grid = grid::calculate(&study)?;

    let (durations, currents) = if at_duration.is_empty() && at_current.is_empty() {
        (DEFAULT_DURATIONS_S.to_vec(), DEFAULT_CURRENTS_KA.to_vec())
    } else {
        (at_duration.to_vec(), at_current.to_vec())
    };

    let slices: Vec<GridSlice> = durations
        .iter()
        .filter_map(|&t| grid.slice_at_duration(t))
        .chain(currents.iter().filter_map(|&i| grid.slice_at_current(i)))
        .collect();
    info!(slices = slices.len(), "extracted grid slices");

    match format {
        Format::Text => {
            print!("{}", output::grid_summary(&grid)?);
            for slice in &slices {
                println!();
                print!("{}", output::slice_table(slice)?);
            }
        }
        Format::Json => {
            let report = GridReport { grid: &grid, slices };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Format::Csv => print!("{}", output::slices_csv(&slices)?),
    }
    Ok(())
}

fn cmd_point(current: f64, duration: f64, study: Option<&Path>, format: Format) -> Result<()> {
    let study = read_study(study)?;
    let input = PointInput::from_study(&study, current, duration);
    let result = point::calculate(&input)?;

    match format {
        Format::Text => print!(
            "{}",
            output::point_report(&result, input.electrode.working_distance_mm, input.threshold_cal_cm2)?
        ),
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        Format::Csv => bail!("CSV output is only available for grid slices"),
    }
    Ok(())
}

fn cmd_init(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", output.display());
    }
    save_study(&StudyFile::default(), output)?;
    println!("Wrote reference study to {}", output.display());
    Ok(())
}
