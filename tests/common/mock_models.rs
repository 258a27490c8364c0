//! Mock flux models for testing
//!
//! These models have known analytical filtration times, making them
//! ideal for validating the solvers.

use crossflow_rs::physics::{FluxModel, OperatingConditions};

// =================================================================================================
// Constant Flux: Q(t) = q
// =================================================================================================

/// Constant flow rate, no fouling
///
/// Analytical filtration time: (V₀ - V_d) / q
///
/// Every stepping scheme is exact for this model up to the stopping check.
pub struct ConstantFlux {
    pub flow_rate: f64,
}

impl ConstantFlux {
    pub fn new(flow_rate: f64) -> Self {
        Self { flow_rate }
    }

    /// Exact time to remove `starting - desired` litres
    pub fn analytical_hours(&self, starting_volume: f64, desired_volume: f64) -> f64 {
        (starting_volume - desired_volume) / self.flow_rate
    }
}

impl FluxModel for ConstantFlux {
    fn flow_rate(&self, _elapsed_hours: f64, _conditions: &OperatingConditions) -> f64 {
        self.flow_rate
    }

    fn name(&self) -> &str {
        "Constant Flux"
    }
}

// =================================================================================================
// Rising Flux: Q(t) = q₀ (1 + a t)
// =================================================================================================

/// Flow rate growing linearly with time
///
/// Not physical for a membrane, but the remaining-time estimate made at the
/// end of the fine window is then an overestimate, so the run finishes
/// inside the coarse steps.
pub struct RisingFlux {
    pub initial_flow_rate: f64,
    pub growth: f64,
}

impl RisingFlux {
    pub fn new(initial_flow_rate: f64, growth: f64) -> Self {
        Self { initial_flow_rate, growth }
    }
}

impl FluxModel for RisingFlux {
    fn flow_rate(&self, elapsed_hours: f64, _conditions: &OperatingConditions) -> f64 {
        self.initial_flow_rate * (1.0 + self.growth * elapsed_hours)
    }

    fn name(&self) -> &str {
        "Rising Flux"
    }
}

// =================================================================================================
// Tests for Mock Models
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions() -> OperatingConditions {
        OperatingConditions {
            transmembrane_pressure: 1.0e5,
            solution_viscosity: 1.0e-3,
            membrane_area: 1.0,
        }
    }

    #[test]
    fn test_constant_flux_analytical() {
        let model = ConstantFlux::new(10.0);
        assert!((model.analytical_hours(1000.0, 500.0) - 50.0).abs() < 1e-12);
        assert_eq!(model.flow_rate(123.0, &conditions()), 10.0);
    }

    #[test]
    fn test_rising_flux_grows() {
        let model = RisingFlux::new(1.0, 1.0);
        assert_eq!(model.flow_rate(0.0, &conditions()), 1.0);
        assert_eq!(model.flow_rate(20.0, &conditions()), 21.0);
    }
}
