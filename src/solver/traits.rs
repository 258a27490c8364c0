//! Solver traits and types
//!
//! # Design Philosophy
//!
//! - Central enum `SolverType` defines the kind of time stepping
//! - `SolverConfiguration` carries it and validates its parameters
//! - `SimulationResult` records the answer and the trajectory behind it
//!
//! # Stability Guarantee
//!
//! - `Solver` trait: STABLE since v0.1.0
//! - `SolverType` enum: EXTENSIBLE (new variants can be added)

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SimResult, SimulationError};
use crate::solver::scenario::Scenario;
use crate::solver::{COARSE_STEPS, FINE_STEPS, FINE_WINDOW_HOURS};

// ============================================================================
// Central Solver Type Enumeration
// ============================================================================

/// Kind of time stepping used to reach the target volume
///
/// # Examples
///
/// ```rust
/// use crossflow_rs::solver::SolverType;
///
/// // Two-phase adaptive stepping with bounded flux evaluations
/// let adaptive = SolverType::AdaptiveTwoPhase {
///     fine_window_hours: 20.0,
///     fine_steps: 50,
///     coarse_steps: 50,
/// };
///
/// // Uniform stepping, for reference runs
/// let fixed = SolverType::FixedStep {
///     step_hours: 0.1,
///     max_steps: 1_000_000,
/// };
/// # assert_eq!(adaptive.name(), "AdaptiveTwoPhase");
/// # assert_eq!(fixed.name(), "FixedStep");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SolverType {

    /// Fine window of equal steps, then coarse steps sized from the remaining
    /// volume, then linear extrapolation
    ///
    /// # Parameters
    /// - `fine_window_hours`: Length of the fine-resolution window (hours)
    /// - `fine_steps`: Number of steps inside the fine window
    /// - `coarse_steps`: Number of rate-recalibrated steps after it
    AdaptiveTwoPhase {
        fine_window_hours: f64,
        fine_steps: usize,
        coarse_steps: usize,
    },

    /// Uniform steps until the target is reached
    ///
    /// # Parameters
    /// - `step_hours`: Step size (hours)
    /// - `max_steps`: Safety limit
    FixedStep {
        step_hours: f64,
        max_steps: usize,
    },
}

impl SolverType {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            SolverType::AdaptiveTwoPhase { .. } => "AdaptiveTwoPhase",
            SolverType::FixedStep { .. } => "FixedStep",
        }
    }

    /// Validate that parameters are meaningful
    pub fn validate(&self) -> SimResult<()> {
        match self {
            SolverType::AdaptiveTwoPhase { fine_window_hours, fine_steps, coarse_steps } => {
                if !fine_window_hours.is_finite() || *fine_window_hours <= 0.0 {
                    return Err(SimulationError::configuration(
                        "Fine window must be finite and positive",
                    ));
                }
                if *fine_steps == 0 {
                    return Err(SimulationError::configuration(
                        "Fine steps must be greater than 0",
                    ));
                }
                if *coarse_steps == 0 {
                    return Err(SimulationError::configuration(
                        "Coarse steps must be greater than 0",
                    ));
                }
                Ok(())
            }
            SolverType::FixedStep { step_hours, max_steps } => {
                if !step_hours.is_finite() || *step_hours <= 0.0 {
                    return Err(SimulationError::configuration(
                        "Step size must be finite and positive",
                    ));
                }
                if *max_steps == 0 {
                    return Err(SimulationError::configuration(
                        "Maximum steps must be greater than 0",
                    ));
                }
                Ok(())
            }
        }
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration for a solver
///
/// The default is the adaptive two-phase scheme with its tuned constants
/// ([`FINE_WINDOW_HOURS`], [`FINE_STEPS`], [`COARSE_STEPS`]).
///
/// # Examples
///
/// ```rust
/// use crossflow_rs::solver::SolverConfiguration;
///
/// let config = SolverConfiguration::default();
/// assert!(config.validate().is_ok());
///
/// let config: SolverConfiguration = serde_json::from_str(
///     r#"{ "type": "fixed_step", "step_hours": 0.5, "max_steps": 10000 }"#
/// ).unwrap();
/// assert_eq!(config, SolverConfiguration::fixed_step(0.5, 10_000));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverConfiguration {
    /// Type of solver and its parameters
    #[serde(flatten)]
    pub solver_type: SolverType,
}

impl Default for SolverConfiguration {
    fn default() -> Self {
        Self::adaptive(FINE_WINDOW_HOURS, FINE_STEPS, COARSE_STEPS)
    }
}

impl SolverConfiguration {
    /// Create a new configuration with a given solver type
    pub fn new(solver_type: SolverType) -> Self {
        Self { solver_type }
    }

    /// Create an adaptive two-phase configuration
    pub fn adaptive(fine_window_hours: f64, fine_steps: usize, coarse_steps: usize) -> Self {
        Self::new(SolverType::AdaptiveTwoPhase { fine_window_hours, fine_steps, coarse_steps })
    }

    /// Create a fixed-step configuration
    pub fn fixed_step(step_hours: f64, max_steps: usize) -> Self {
        Self::new(SolverType::FixedStep { step_hours, max_steps })
    }

    /// Validate configuration
    pub fn validate(&self) -> SimResult<()> {
        self.solver_type.validate()
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Where in the algorithm the target volume was reached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPhase {
    /// Concentration factor of exactly 1: nothing to filter
    AlreadyConcentrated,
    /// Inside the fine-resolution window
    FineWindow,
    /// Inside the coarse, rate-recalibrated steps
    CoarseWindow,
    /// Linear extrapolation from the last flow rate
    Extrapolated,
    /// Uniform stepping of the reference solver
    FixedStep,
}

impl fmt::Display for CompletionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CompletionPhase::AlreadyConcentrated => "already concentrated",
            CompletionPhase::FineWindow => "fine window",
            CompletionPhase::CoarseWindow => "coarse window",
            CompletionPhase::Extrapolated => "extrapolated",
            CompletionPhase::FixedStep => "fixed step",
        };
        f.write_str(label)
    }
}

/// Outcome of a solve: the estimate and the trajectory that produced it
///
/// The trajectory holds one entry per flux checkpoint, starting with the
/// `t = 0` snapshot. An extrapolated run ends with a synthetic point at the
/// estimated time and the desired volume.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Estimated filtration time \[h\]
    pub hours: f64,

    /// Phase in which the target was reached
    pub completion: CompletionPhase,

    /// Checkpoint times \[h\]
    pub time_points: Vec<f64>,

    /// Retentate volume at each checkpoint \[L\]
    pub volumes: Vec<f64>,

    /// Permeate flow rate at each checkpoint \[L/h\]
    pub flow_rates: Vec<f64>,

    /// Number of flux model evaluations
    pub flux_evaluations: usize,

    /// Free-form diagnostics (solver name, step sizes...)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Create a result from a finished trajectory
    pub fn new(
        hours: f64,
        completion: CompletionPhase,
        time_points: Vec<f64>,
        volumes: Vec<f64>,
        flow_rates: Vec<f64>,
        flux_evaluations: usize,
    ) -> Self {
        Self {
            hours,
            completion,
            time_points,
            volumes,
            flow_rates,
            flux_evaluations,
            metadata: HashMap::new(),
        }
    }

    /// Result for a run that needs no filtration
    pub fn already_concentrated(starting_volume: f64) -> Self {
        Self::new(
            0.0,
            CompletionPhase::AlreadyConcentrated,
            vec![0.0],
            vec![starting_volume],
            vec![],
            0,
        )
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Get a metadata entry
    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Number of recorded checkpoints
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    /// Last recorded volume \[L\]
    pub fn final_volume(&self) -> Option<f64> {
        self.volumes.last().copied()
    }
}

// =================================================================================================
// Solver Trait
// =================================================================================================

/// Trait for filtration solvers
///
/// # Responsibility
/// Drives a [`Scenario`]'s flux model through time until the target volume is
/// reached, under the given configuration.
///
/// # Contract
/// - Rejects a concentration factor below 1 with
///   [`SimulationError::InvalidConcentrationFactor`] before any state exists
/// - Returns `hours = 0` for a factor of exactly 1
/// - Rejects configurations of another [`SolverType`]
pub trait Solver {
    /// Solve the scenario
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> SimResult<SimulationResult>;

    /// Solver name (display and metadata)
    fn name(&self) -> &'static str;
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration_uses_tuned_constants() {
        let config = SolverConfiguration::default();

        assert_eq!(
            config.solver_type,
            SolverType::AdaptiveTwoPhase {
                fine_window_hours: 20.0,
                fine_steps: 50,
                coarse_steps: 50,
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_adaptive_configurations() {
        assert!(SolverConfiguration::adaptive(0.0, 50, 50).validate().is_err());
        assert!(SolverConfiguration::adaptive(f64::NAN, 50, 50).validate().is_err());
        assert!(SolverConfiguration::adaptive(20.0, 0, 50).validate().is_err());
        assert!(SolverConfiguration::adaptive(20.0, 50, 0).validate().is_err());
    }

    #[test]
    fn test_invalid_fixed_step_configurations() {
        assert!(SolverConfiguration::fixed_step(-0.1, 10).validate().is_err());
        assert!(SolverConfiguration::fixed_step(f64::INFINITY, 10).validate().is_err());
        assert!(SolverConfiguration::fixed_step(0.1, 0).validate().is_err());
        assert!(SolverConfiguration::fixed_step(0.1, 10).validate().is_ok());
    }

    #[test]
    fn test_configuration_json_round_trip() {
        let json = r#"{"type":"adaptive_two_phase","fine_window_hours":10.0,"fine_steps":25,"coarse_steps":100}"#;
        let config: SolverConfiguration = serde_json::from_str(json).unwrap();

        assert_eq!(config, SolverConfiguration::adaptive(10.0, 25, 100));
        assert_eq!(serde_json::to_string(&config).unwrap(), json);
    }

    #[test]
    fn test_result_metadata() {
        let mut result = SimulationResult::already_concentrated(100.0);
        result.add_metadata("solver", "Adaptive two-phase");

        assert_eq!(result.get_metadata("solver"), Some("Adaptive two-phase"));
        assert_eq!(result.get_metadata("missing"), None);
        assert_eq!(result.len(), 1);
        assert_eq!(result.final_volume(), Some(100.0));
        assert_eq!(result.completion.to_string(), "already concentrated");
    }
}
