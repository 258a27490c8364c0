//! Permeate flux models
//!
//! All models implement the [`FluxModel`](crate::physics::FluxModel) trait.
//! The solver asks for the flow rate each time it advances to a new checkpoint;
//! models are responsible for the physics (membrane resistance, flux), the
//! solver for the time stepping.
//!
//! # Available Models
//!
//! ## [`PowerLawFouling`]: empirical fouling resistance
//!
//! Darcy-type flux through a membrane whose resistance grows with a power of
//! the elapsed time: fast fouling early in the run, slowing afterwards.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod fouling;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use fouling::{compute_flow_rate, PowerLawFouling};
