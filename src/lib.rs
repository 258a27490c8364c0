//! crossflow-rs: Cross-Flow Filtration Time Estimator
//!
//! Estimates how long a cross-flow membrane filtration takes to concentrate a
//! solution by a given factor, from the starting volume, transmembrane
//! pressure, solution viscosity and membrane area.
//!
//! # Architecture
//!
//! crossflow-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Flux models give the permeate flow rate at a point in time (what to solve)
//!    - Solvers decide where to evaluate it and integrate the volume (how to solve)
//!
//! 2. **Bounded cost**
//!    - The adaptive solver makes at most `1 + 50 + 50` flux evaluations,
//!      whether the run lasts an hour or two years
//!
//! # Quick Start
//!
//! ```rust
//! use crossflow_rs::estimate::estimate_filtration_hours;
//! use crossflow_rs::physics::SimulationParameters;
//!
//! # fn main() -> Result<(), crossflow_rs::error::SimulationError> {
//! // 1000 L concentrated twofold at 1 bar through 10 m² of membrane
//! let parameters = SimulationParameters::new(1000.0, 2.0, 100_000.0, 0.001, 10.0)?;
//!
//! let estimate = estimate_filtration_hours(&parameters);
//! assert_eq!(estimate.status_code(), 0);
//! println!("Filtration time: {:.1} h", estimate.hours().unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Run parameters and the flux model trait
//! - [`models`]: Empirical membrane fouling law
//! - [`solver`]: Adaptive and fixed-step solvers
//! - [`estimate`]: Status-coded estimate for callers
//! - [`request`]: JSON requests
//! - [`output`]: Trajectory export
//! - [`logging`]: Logger setup for binaries

// Core modules
pub mod error;
pub mod physics;

pub mod models;
pub mod solver;

// Caller-facing layers
pub mod estimate;
pub mod request;

pub mod logging;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use crossflow_rs::prelude::*;
    //! ```
    pub use crate::error::{SimResult, SimulationError};
    pub use crate::estimate::{estimate_filtration_hours, FiltrationEstimate};
    pub use crate::models::PowerLawFouling;
    pub use crate::physics::{FluxModel, OperatingConditions, SimulationParameters};
    pub use crate::solver::{AdaptiveSolver,
                            CompletionPhase,
                            FixedStepSolver,
                            Scenario,
                            SimulationResult,
                            Solver,
                            SolverConfiguration,
                            SolverType};
}
