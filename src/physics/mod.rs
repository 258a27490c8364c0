//! Physical description of a cross-flow filtration run
//!
//! This module holds what is *physics* in the crate:
//!
//! - **Simulation parameters**: the five caller-supplied quantities of a run
//! - **Operating conditions**: the subset the flux law depends on
//! - **Flux model**: trait for any law mapping elapsed time to permeate flow
//!
//! # Architecture
//!
//! Flux models are **separate from the solvers**:
//! - The model provides the **flow rate** at a given elapsed time (physics)
//! - The solver decides **when** to re-evaluate it (numerics)
//!
//! The same adaptive solver therefore runs unchanged against the empirical
//! fouling law in [`crate::models`] or against any custom model.
//!
//! # Example
//!
//! ```rust
//! use crossflow_rs::physics::{FluxModel, SimulationParameters};
//! use crossflow_rs::models::PowerLawFouling;
//!
//! let parameters = SimulationParameters::new(1000.0, 2.0, 100_000.0, 0.001, 10.0).unwrap();
//! let model = PowerLawFouling::default();
//!
//! let initial = model.flow_rate(0.0, &parameters.operating_conditions());
//! let later = model.flow_rate(20.0, &parameters.operating_conditions());
//! assert!(later < initial);
//! ```

pub mod parameters;
pub mod traits;

pub use parameters::{SimulationParameters, CASEIN_MOLECULAR_WEIGHT, WATER_VISCOSITY};
pub use traits::{FluxModel, OperatingConditions};
