//! Simulation scenario definition
//!
//! A scenario combines a flux model with the parameters of one run.
use crate::error::SimResult;
use crate::physics::{FluxModel, SimulationParameters};

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Flux model (physics)
/// - Run parameters (volumes, pressure, fluid, membrane)
///
/// # Design
///
/// The same scenario can be solved with different solvers.
/// This is the "WHAT to solve" (not "HOW to solve").
///
/// # Examples
///
/// ```rust
/// use crossflow_rs::models::PowerLawFouling;
/// use crossflow_rs::physics::SimulationParameters;
/// use crossflow_rs::solver::{AdaptiveSolver, FixedStepSolver, Scenario, Solver, SolverConfiguration};
///
/// let parameters = SimulationParameters::new(10.0, 2.0, 100_000.0, 0.001, 10.0).unwrap();
/// let scenario = Scenario::new(Box::new(PowerLawFouling::default()), parameters);
///
/// let adaptive = AdaptiveSolver::new().solve(&scenario, &SolverConfiguration::default()).unwrap();
/// let reference = FixedStepSolver::new()
///     .solve(&scenario, &SolverConfiguration::fixed_step(0.01, 100_000))
///     .unwrap();
/// // Steps at the starting flow rate finish early on a fouling membrane.
/// assert!(adaptive.hours <= reference.hours);
/// ```
pub struct Scenario {
    /// Flux model (physics)
    pub model: Box<dyn FluxModel>,

    /// Run parameters
    pub parameters: SimulationParameters,
}

impl Scenario {

    /// Create a scenario
    pub fn new(model: Box<dyn FluxModel>, parameters: SimulationParameters) -> Self {
        Self { model, parameters }
    }

    /// Check the concentration factor bound
    ///
    /// Physical quantities are already guaranteed by [`SimulationParameters::new`].
    pub fn validate(&self) -> SimResult<()> {
        self.parameters.check_concentration_factor()
    }

    /// Get model name
    pub fn get_model_name(&self) -> &str {
        self.model.name()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
        .field("model", &self.get_model_name())
        .field("parameters", &self.parameters)
        .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulationError;
    use crate::physics::OperatingConditions;

    struct MockModel;

    impl FluxModel for MockModel {
        fn flow_rate(&self, _elapsed_hours: f64, _conditions: &OperatingConditions) -> f64 {
            1.0
        }

        fn name(&self) -> &str {
            "MockModel"
        }
    }

    #[test]
    fn test_scenario_creation() {
        let parameters = SimulationParameters::new(100.0, 2.0, 1.0e5, 1.0e-3, 1.0).unwrap();
        let scenario = Scenario::new(Box::new(MockModel), parameters);

        assert_eq!(scenario.get_model_name(), "MockModel");
        assert!(scenario.validate().is_ok());
        assert!(format!("{:?}", scenario).contains("MockModel"));
    }

    #[test]
    fn test_scenario_rejects_dilution() {
        let parameters = SimulationParameters::new(100.0, 0.9, 1.0e5, 1.0e-3, 1.0).unwrap();
        let scenario = Scenario::new(Box::new(MockModel), parameters);

        assert_eq!(
            scenario.validate(),
            Err(SimulationError::InvalidConcentrationFactor { factor: 0.9 })
        );
    }
}
