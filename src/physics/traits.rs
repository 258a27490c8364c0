//! Flux model trait and the conditions it is evaluated under
//!
//! - `FluxModel`: trait for all permeate flux laws
//! - `OperatingConditions`: pressure, viscosity and area of a run

// =================================================================================================
// Operating conditions
// =================================================================================================

/// Physical conditions a flux model is evaluated under
///
/// Derived once per run from [`SimulationParameters`](super::SimulationParameters).
/// Volumes are not part of it: the flux law only depends on the driving force,
/// the fluid and the membrane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingConditions {
    /// Transmembrane pressure \[Pa\]
    pub transmembrane_pressure: f64,

    /// Dynamic viscosity of the solution \[Pa·s\]
    pub solution_viscosity: f64,

    /// Membrane surface area \[m²\]
    pub membrane_area: f64,
}

// =================================================================================================
// Flux Model Trait
// =================================================================================================

/// Trait for permeate flux models
///
/// # Responsibility
/// Computes the instantaneous permeate flow rate after a given filtration time.
/// Does NOT decide how often it is evaluated (that's the Solver's job).
///
/// # Contract
/// - Returns litres per hour
/// - Pure: the same inputs always give the same flow rate
/// - Must not panic for conditions built from validated parameters
pub trait FluxModel: Send + Sync {

    /// Permeate flow rate \[L/h\] after `elapsed_hours` of filtration
    fn flow_rate(&self, elapsed_hours: f64, conditions: &OperatingConditions) -> f64;

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================
