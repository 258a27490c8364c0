//! Time-stepping methods
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Available Methods
//!
//! - **[`AdaptiveSolver`]**: two-phase adaptive stepping
//!   - Cost: at most `1 + fine_steps + coarse_steps` flux evaluations
//!   - Use: **production estimates**, whatever the process length
//!
//! - **[`FixedStepSolver`]**: uniform stepping
//!   - Cost: one flux evaluation per step, proportional to process length
//!   - Use: reference runs to measure the adaptive approximation error
//!
//! # Example
//!
//! ```rust
//! use crossflow_rs::models::PowerLawFouling;
//! use crossflow_rs::physics::SimulationParameters;
//! use crossflow_rs::solver::{AdaptiveSolver, Scenario, Solver, SolverConfiguration};
//!
//! let parameters = SimulationParameters::new(1000.0, 2.0, 100_000.0, 0.001, 10.0).unwrap();
//! let scenario = Scenario::new(Box::new(PowerLawFouling::default()), parameters);
//!
//! let result = AdaptiveSolver::new().solve(&scenario, &SolverConfiguration::default()).unwrap();
//! assert!(result.flux_evaluations <= 101);
//! ```
//!
//! # Design Philosophy
//!
//! Each solver is stateless and can be reused for any number of scenarios.
//! The mutable [`SimulationState`](crate::solver::SimulationState) lives only
//! inside a single `solve` call.

mod adaptive;
mod fixed_step;

// Re-exports for convenience
pub use adaptive::AdaptiveSolver;
pub use fixed_step::FixedStepSolver;
