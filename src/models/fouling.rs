//! Power-law membrane fouling model
//!
//! # Physics
//!
//! Permeate flux through the membrane follows Darcy's law with a
//! time-dependent total resistance:
//!
//! ```text
//! R(t) = R₀ + k · t^n                      [1/m]
//! J(t) = ΔP / (μ · R(t))                   [m³ per m² per hour]
//! Q(t) = J(t) · 1000 · A                   [L/h]
//! ```
//!
//! With the empirical constants R₀ = 0.13·10¹², k = 1.51·10¹² and n = 0.4 the
//! resistance is concave in time: steep growth during the first hours, then a
//! slow creep. The flow rate therefore strictly decreases with elapsed time.
//!
//! # Example
//!
//! ```rust
//! use crossflow_rs::models::compute_flow_rate;
//!
//! let q0 = compute_flow_rate(0.0, 100_000.0, 0.001, 10.0);
//! assert!((q0 - 7.692307692307692).abs() < 1e-12);
//! ```

use crate::physics::{FluxModel, OperatingConditions};

/// Baseline (clean membrane) resistance \[1/m\]
const BASE_RESISTANCE: f64 = 0.13e12;

/// Fouling growth coefficient \[1/m per h^n\]
const GROWTH_COEFFICIENT: f64 = 1.51e12;

/// Fouling growth exponent
const GROWTH_EXPONENT: f64 = 0.4;

/// Cubic metres to litres
const LITRES_PER_CUBIC_METRE: f64 = 1000.0;

/// Flux law with resistance `R(t) = base + growth · t^exponent`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerLawFouling {
    /// Baseline resistance R₀ \[1/m\]
    base_resistance: f64,
    /// Growth coefficient k
    growth_coefficient: f64,
    /// Growth exponent n
    exponent: f64,
}

impl Default for PowerLawFouling {
    fn default() -> Self {
        Self::new(BASE_RESISTANCE, GROWTH_COEFFICIENT, GROWTH_EXPONENT)
    }
}

impl PowerLawFouling {
    /// Create a fouling law with custom constants
    ///
    /// # Panics
    ///
    /// When `base_resistance` is not strictly positive or `growth_coefficient`
    /// / `exponent` are negative: the resistance would reach zero or decrease
    /// over time.
    pub fn new(base_resistance: f64, growth_coefficient: f64, exponent: f64) -> Self {
        assert!(
            base_resistance > 0.0,
            "Base resistance must be positive, got {}",
            base_resistance
        );
        assert!(
            growth_coefficient >= 0.0 && exponent >= 0.0,
            "Fouling growth must be non-negative, got coefficient {} and exponent {}",
            growth_coefficient,
            exponent
        );

        Self {
            base_resistance,
            growth_coefficient,
            exponent,
        }
    }

    /// Total membrane resistance \[1/m\] after `elapsed_hours`
    #[inline]
    pub fn membrane_resistance(&self, elapsed_hours: f64) -> f64 {
        self.base_resistance + self.growth_coefficient * elapsed_hours.powf(self.exponent)
    }
}

impl FluxModel for PowerLawFouling {

    fn flow_rate(&self, elapsed_hours: f64, conditions: &OperatingConditions) -> f64 {
        let resistance = self.membrane_resistance(elapsed_hours);
        let flux = conditions.transmembrane_pressure / (conditions.solution_viscosity * resistance);

        flux * LITRES_PER_CUBIC_METRE * conditions.membrane_area
    }

    fn name(&self) -> &str {
        "Power-law membrane fouling"
    }

    fn description(&self) -> Option<&str> {
        Some(
            "Darcy flux with resistance R(t) = R0 + k t^n. \
             Default constants fitted for casein ultrafiltration."
        )
    }
}

/// Permeate flow rate \[L/h\] of the default fouling law
///
/// # Arguments
///
/// * `elapsed_hours` - Filtration time so far \[h\]
/// * `pressure` - Transmembrane pressure \[Pa\]
/// * `viscosity` - Solution viscosity \[Pa·s\], must be positive
/// * `area` - Membrane area \[m²\]
pub fn compute_flow_rate(elapsed_hours: f64, pressure: f64, viscosity: f64, area: f64) -> f64 {
    let conditions = OperatingConditions {
        transmembrane_pressure: pressure,
        solution_viscosity: viscosity,
        membrane_area: area,
    };
    PowerLawFouling::default().flow_rate(elapsed_hours, &conditions)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions() -> OperatingConditions {
        OperatingConditions {
            transmembrane_pressure: 100_000.0,
            solution_viscosity: 0.001,
            membrane_area: 10.0,
        }
    }

    #[test]
    fn test_resistance_starts_at_baseline() {
        let model = PowerLawFouling::default();
        assert_eq!(model.membrane_resistance(0.0), 0.13e12);
    }

    #[test]
    fn test_initial_flow_rate() {
        // 1e5 / (1e-3 * 0.13e12) * 1000 * 10
        let q = compute_flow_rate(0.0, 100_000.0, 0.001, 10.0);
        assert!((q - 100.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_flow_rate_at_twenty_hours() {
        let q = compute_flow_rate(20.0, 100_000.0, 0.001, 10.0);
        assert!((q - 0.1947485824223005).abs() < 1e-12);
    }

    #[test]
    fn test_flow_rate_strictly_decreasing() {
        let model = PowerLawFouling::default();
        let times = [0.0, 0.01, 0.4, 1.0, 20.0, 500.0, 1.0e4, 1.0e6];

        for pair in times.windows(2) {
            let earlier = model.flow_rate(pair[0], &conditions());
            let later = model.flow_rate(pair[1], &conditions());
            assert!(
                earlier > later,
                "flow at {} h ({}) should exceed flow at {} h ({})",
                pair[0], earlier, pair[1], later
            );
        }
    }

    #[test]
    fn test_flow_rate_scales_with_area_and_pressure() {
        let base = compute_flow_rate(5.0, 100_000.0, 0.001, 10.0);

        assert!((compute_flow_rate(5.0, 100_000.0, 0.001, 20.0) - 2.0 * base).abs() < 1e-12);
        assert!((compute_flow_rate(5.0, 200_000.0, 0.001, 10.0) - 2.0 * base).abs() < 1e-12);
        assert!((compute_flow_rate(5.0, 100_000.0, 0.002, 10.0) - 0.5 * base).abs() < 1e-12);
    }

    #[test]
    fn test_free_function_matches_model() {
        let model = PowerLawFouling::default();
        assert_eq!(
            compute_flow_rate(3.2, 100_000.0, 0.001, 10.0),
            model.flow_rate(3.2, &conditions())
        );
    }

    #[test]
    #[should_panic(expected = "Base resistance must be positive")]
    fn test_invalid_base_resistance() {
        PowerLawFouling::new(0.0, 1.0e12, 0.4);
    }
}
