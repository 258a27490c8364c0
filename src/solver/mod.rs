//! Filtration solvers
//!
//! This module provides the time-stepping side of the crate: given a flux
//! model and run parameters, find how long it takes to remove enough permeate
//! to reach the target concentration.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Flux model (physics)
//!    - Run parameters
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Solver type (adaptive two-phase, fixed step)
//!    - Step counts and windows
//!
//! 3. **Solver** (`Solver` trait) - The stepping method
//!    - Owns the `SimulationState` for one call
//!    - Returns the estimate and its trajectory
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver`, `SolverType`, `SolverConfiguration`, `SimulationResult`
//! - **`state`**: `SimulationState`, the mutable per-run state
//! - **`scenario`**: `Scenario`
//! - **`methods`**: `AdaptiveSolver`, `FixedStepSolver`
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐   ┌──────────────────────┐
//! │   Flux Model    │   │ SimulationParameters │
//! └────────┬────────┘   └──────────┬───────────┘
//!          └──────────┬────────────┘
//!            ┌────────▼────────┐
//!            │    Scenario     │ ← WHAT to solve
//!            └────────┬────────┘
//!          ┌──────────▼───────────┐
//!          │ Solver Configuration │ ← HOW to solve
//!          └──────────┬───────────┘
//!            ┌────────▼────────┐
//!            │     Solver      │ ← adaptive / fixed step
//!            └────────┬────────┘
//!          ┌──────────▼───────────┐
//!          │  Simulation Result   │ ← hours + trajectory
//!          └──────────────────────┘
//! ```
//!
//! # Error Handling
//!
//! Solvers return [`SimResult`](crate::error::SimResult):
//! - Concentration factor below 1
//! - Configuration of the wrong type or out of range
//! - NaN/Inf in the state (custom flux models only)
//! - Step budget exhausted (fixed-step solver)

// =================================================================================================
// Module Declarations
// =================================================================================================
mod traits;
mod state;
mod scenario;
mod methods;

// =================================================================================================
// Tuning Constants
// =================================================================================================
//
// Empirical: the fine window covers the hours in which the fouling law changes
// fastest, the coarse steps cover whatever remains. Together they bound a solve
// to 1 + FINE_STEPS + COARSE_STEPS flux evaluations, whatever the process length.
// =================================================================================================

/// Length of the fine-resolution window \[h\]
pub const FINE_WINDOW_HOURS: f64 = 20.0;

/// Number of steps inside the fine window
pub const FINE_STEPS: usize = 50;

/// Number of rate-recalibrated steps after the fine window
pub const COARSE_STEPS: usize = 50;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{
    CompletionPhase,
    SimulationResult,
    Solver,
    SolverConfiguration,
    SolverType,
};

pub use state::SimulationState;
pub use scenario::Scenario;

pub use methods::{AdaptiveSolver, FixedStepSolver};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::{SimResult, SimulationError};

/// Check the state for NaN or Inf after a step
///
/// Validated parameters and the built-in fouling law cannot produce them; a
/// custom flux model returning zero or a non-finite rate can.
pub(crate) fn validate_state(state: &SimulationState, step: usize) -> SimResult<()> {
    let quantities = [
        ("volume", state.current_volume()),
        ("flow rate", state.current_flow_rate()),
        ("time", state.current_time_hours()),
    ];

    for (quantity, value) in quantities {
        if !value.is_finite() {
            return Err(SimulationError::NumericalInstability { quantity, step });
        }
    }

    Ok(())
}

/// Checkpoint history collected during a solve
#[derive(Debug, Default)]
pub(crate) struct Trajectory {
    time_points: Vec<f64>,
    volumes: Vec<f64>,
    flow_rates: Vec<f64>,
}

impl Trajectory {
    /// Start a trajectory with the state's current checkpoint
    pub(crate) fn starting_at(state: &SimulationState, capacity: usize) -> Self {
        let mut trajectory = Self {
            time_points: Vec::with_capacity(capacity),
            volumes: Vec::with_capacity(capacity),
            flow_rates: Vec::with_capacity(capacity),
        };
        trajectory.record(state);
        trajectory
    }

    pub(crate) fn record(&mut self, state: &SimulationState) {
        self.push(state.current_time_hours(), state.current_volume(), state.current_flow_rate());
    }

    pub(crate) fn push(&mut self, time: f64, volume: f64, flow_rate: f64) {
        self.time_points.push(time);
        self.volumes.push(volume);
        self.flow_rates.push(flow_rate);
    }

    /// Turn the history into a result
    pub(crate) fn finish(
        self,
        hours: f64,
        completion: CompletionPhase,
        flux_evaluations: usize,
    ) -> SimulationResult {
        SimulationResult::new(
            hours,
            completion,
            self.time_points,
            self.volumes,
            self.flow_rates,
            flux_evaluations,
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================
