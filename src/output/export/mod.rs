//! Export of filtration trajectories
//!
//! # Architecture
//!
//! The [`Exporter`] trait abstracts the file format; each format lives in its
//! own sub-module. Adding a format means adding a file, existing ones stay
//! untouched.
//!
//! # Available formats
//!
//! | Format | Module  |
//! |--------|---------|
//! | CSV    | [`csv`] |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use crossflow_rs::models::PowerLawFouling;
//! use crossflow_rs::output::export::{CsvExporter, Exporter};
//! use crossflow_rs::physics::SimulationParameters;
//! use crossflow_rs::solver::{AdaptiveSolver, Scenario, Solver, SolverConfiguration};
//!
//! let parameters = SimulationParameters::new(1000.0, 2.0, 100_000.0, 0.001, 10.0).unwrap();
//! let scenario = Scenario::new(Box::new(PowerLawFouling::default()), parameters);
//! let result = AdaptiveSolver::new().solve(&scenario, &SolverConfiguration::default()).unwrap();
//!
//! let exporter = CsvExporter::default();
//!
//! // Every checkpoint
//! exporter.export(&result, None, "run.csv").unwrap();
//!
//! // Downsampled to 20 points, first and last kept
//! exporter.export(&result, Some(20), "run_light.csv").unwrap();
//! ```

pub mod csv;

pub use csv::{CsvConfig, CsvError, CsvExporter, CsvMetadata};

use crate::solver::SimulationResult;

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors, so callers can react to the precise
/// failure without a `Box<dyn Error>`.
///
/// # Parameter `n_points`
///
/// - `None`: exports every checkpoint
/// - `Some(n)`: uniformly downsamples to `n` points, always keeping the
///   **first and last** checkpoints (the start of the run and the estimate)
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Write the trajectory of `result` to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the path is invalid or the directory does not exist
    /// - `result` contains no data or non-finite values
    /// - `n_points` is below 2
    fn export(
        &self,
        result: &SimulationResult,
        n_points: Option<usize>,
        path: &str,
    ) -> Result<(), Self::Error>;
}

/// Indices of a uniform downsampling of `len` points to `n_points`
///
/// Always contains `0` and `len - 1`. Returns every index when `n_points` is
/// `None` or not smaller than `len`.
pub(crate) fn sample_indices(len: usize, n_points: Option<usize>) -> Vec<usize> {
    match n_points {
        Some(n) if n >= 2 && n < len => {
            let last = (len - 1) as f64;
            let mut indices: Vec<usize> = (0..n)
                .map(|k| (k as f64 * last / (n - 1) as f64).round() as usize)
                .collect();
            indices.dedup();
            indices
        }
        _ => (0..len).collect(),
    }
}
