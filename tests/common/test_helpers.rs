//! Helper functions for integration tests

use crossflow_rs::models::{compute_flow_rate, PowerLawFouling};
use crossflow_rs::physics::{FluxModel, SimulationParameters};
use crossflow_rs::solver::{FINE_STEPS, FINE_WINDOW_HOURS, Scenario};

/// Reference run conditions: 1 bar, water, 10 m² of membrane
pub const PRESSURE: f64 = 100_000.0;
pub const VISCOSITY: f64 = 0.001;
pub const AREA: f64 = 10.0;

/// Parameters at the reference conditions
pub fn reference_parameters(starting_volume: f64, concentration_factor: f64) -> SimulationParameters {
    SimulationParameters::new(starting_volume, concentration_factor, PRESSURE, VISCOSITY, AREA)
        .expect("reference parameters are valid")
}

/// Scenario with the built-in fouling law at the reference conditions
pub fn fouling_scenario(starting_volume: f64, concentration_factor: f64) -> Scenario {
    Scenario::new(
        Box::new(PowerLawFouling::default()),
        reference_parameters(starting_volume, concentration_factor),
    )
}

/// Scenario with a custom model at the reference conditions
pub fn create_scenario(
    model: Box<dyn FluxModel>,
    starting_volume: f64,
    concentration_factor: f64,
) -> Scenario {
    Scenario::new(model, reference_parameters(starting_volume, concentration_factor))
}

/// Volume the fouling law removes over the whole fine window at the reference conditions
pub fn fine_window_drain() -> f64 {
    let step = FINE_WINDOW_HOURS / FINE_STEPS as f64;
    (0..FINE_STEPS)
        .map(|i| compute_flow_rate(i as f64 * step, PRESSURE, VISCOSITY, AREA) * step)
        .sum()
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_fine_window_drain() {
        assert!((fine_window_drain() - 8.974179640858315).abs() < 1e-9);
    }
}
