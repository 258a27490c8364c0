//! Command line front-end
//!
//! ```text
//! crossflow estimate --volume-start 1000 --conc-factor 2 --tmp 100000 \
//!                    --membrane-area 10 --mwco 2500 [--csv run.csv]
//! crossflow request body.json
//! echo '{"volumeStart": 1000, ...}' | crossflow request -
//! ```
//!
//! Both commands print the estimate as JSON on stdout. Logs go to stderr.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use crossflow_rs::error::SimResult;
use crossflow_rs::estimate::FiltrationEstimate;
use crossflow_rs::logging::init_logging;
use crossflow_rs::models::PowerLawFouling;
use crossflow_rs::output::{CsvConfig, CsvExporter, CsvMetadata, Exporter};
use crossflow_rs::physics::{FluxModel, WATER_VISCOSITY};
use crossflow_rs::request::{evaluate_request, ModelRequest};
use crossflow_rs::solver::{
    AdaptiveSolver, FixedStepSolver, Scenario, SimulationResult, Solver, SolverConfiguration,
    SolverType,
};

/// Cross-flow membrane filtration time estimator
#[derive(Parser)]
#[command(name = "crossflow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Estimate cross-flow filtration time", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error, off); falls back to RUST_LOG
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate from command line parameters
    Estimate(EstimateArgs),
    /// Evaluate a JSON request from a file, or stdin with `-`
    Request {
        /// Request file path
        input: String,
    },
}

#[derive(Args)]
struct EstimateArgs {
    /// Starting volume [L]
    #[arg(long)]
    volume_start: f64,

    /// Starting volume / desired volume
    #[arg(long)]
    conc_factor: f64,

    /// Transmembrane pressure [Pa]
    #[arg(long)]
    tmp: f64,

    /// Membrane area [m²]
    #[arg(long)]
    membrane_area: f64,

    /// Membrane molecular weight cutoff [Da]
    #[arg(long)]
    mwco: f64,

    /// Solution viscosity [Pa·s]
    #[arg(long, default_value_t = WATER_VISCOSITY)]
    viscosity: f64,

    /// Solver configuration JSON file (default: adaptive two-phase)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the trajectory to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Downsample the CSV trajectory to this many points
    #[arg(long, requires = "csv")]
    csv_points: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let estimate = match cli.command {
        Commands::Estimate(args) => run_estimate(args)?,
        Commands::Request { input } => run_request(&input)?,
    };

    println!("{}", serde_json::to_string(&estimate)?);
    Ok(())
}

fn run_estimate(args: EstimateArgs) -> Result<FiltrationEstimate> {
    let request = ModelRequest {
        volume_start: args.volume_start,
        tmp: args.tmp,
        membrane_area: args.membrane_area,
        mol_weight_cutoff: args.mwco,
        conc_factor: args.conc_factor,
        solution_viscosity: args.viscosity,
    };
    let parameters = request.into_parameters()?;

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read solver configuration {}", path.display()))?;
            serde_json::from_str::<SolverConfiguration>(&text)
                .with_context(|| format!("invalid solver configuration {}", path.display()))?
        }
        None => SolverConfiguration::default(),
    };

    let model = PowerLawFouling::default();
    let model_name = model.name().to_string();
    let scenario = Scenario::new(Box::new(model), parameters);

    let outcome = match config.solver_type {
        SolverType::AdaptiveTwoPhase { .. } => AdaptiveSolver::new().solve(&scenario, &config),
        SolverType::FixedStep { .. } => FixedStepSolver::new().solve(&scenario, &config),
    };

    if let Some(path) = &args.csv {
        export_trajectory(path, args.csv_points, &model_name, &outcome)?;
    }

    Ok(outcome.into())
}

/// Write the trajectory of a successful solve; returns whether a file was written
fn export_trajectory(
    path: &Path,
    n_points: Option<usize>,
    model_name: &str,
    outcome: &SimResult<SimulationResult>,
) -> Result<bool> {
    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            warn!("Simulation failed ({}), no trajectory written to {}", err, path.display());
            return Ok(false);
        }
    };

    let metadata = CsvMetadata::from_result(model_name, result);
    let exporter = CsvExporter::new(CsvConfig::default().with_metadata(metadata));
    let path_str = path.to_str().context("CSV path is not valid UTF-8")?;

    exporter
        .export(result, n_points, path_str)
        .with_context(|| format!("cannot export trajectory to {}", path.display()))?;
    info!("Trajectory written to {}", path.display());
    Ok(true)
}

fn run_request(input: &str) -> Result<FiltrationEstimate> {
    let body = if input == "-" {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body).context("cannot read request from stdin")?;
        body
    } else {
        fs::read_to_string(input).with_context(|| format!("cannot read request {}", input))?
    };

    Ok(evaluate_request(&body)?)
}
