//! Caller-supplied parameters of a filtration run

use crate::error::{SimResult, SimulationError};
use crate::physics::OperatingConditions;

/// Dynamic viscosity of water \[Pa·s\], used when a request gives none
pub const WATER_VISCOSITY: f64 = 0.001;

/// Molecular weight of bovine casein \[Da\]
///
/// Membranes must have a molecular weight cutoff strictly below this value to
/// retain the protein.
pub const CASEIN_MOLECULAR_WEIGHT: f64 = 25_107.0;

/// Parameters of one filtration run
///
/// Immutable once built. [`SimulationParameters::new`] is the only way to build
/// one, so every instance carries finite, positive physical quantities and the
/// flux law can never divide by zero or flip sign.
///
/// The concentration factor is only required to be finite here. Its `>= 1`
/// bound is checked by the solvers, which report it as
/// [`SimulationError::InvalidConcentrationFactor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    starting_volume: f64,
    concentration_factor: f64,
    transmembrane_pressure: f64,
    solution_viscosity: f64,
    membrane_area: f64,
}

impl SimulationParameters {
    /// Create validated parameters
    ///
    /// # Arguments
    ///
    /// * `starting_volume` - Feed volume \[L\]
    /// * `concentration_factor` - Starting volume / desired volume
    /// * `transmembrane_pressure` - Driving pressure \[Pa\]
    /// * `solution_viscosity` - Dynamic viscosity \[Pa·s\]
    /// * `membrane_area` - Membrane surface \[m²\]
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidPhysicalParameter`] when a physical quantity is
    /// not finite or not strictly positive, or when the concentration factor is
    /// not finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use crossflow_rs::physics::SimulationParameters;
    ///
    /// let parameters = SimulationParameters::new(1000.0, 2.0, 100_000.0, 0.001, 10.0).unwrap();
    /// assert_eq!(parameters.desired_volume(), 500.0);
    ///
    /// assert!(SimulationParameters::new(1000.0, 2.0, 100_000.0, 0.0, 10.0).is_err());
    /// ```
    pub fn new(
        starting_volume: f64,
        concentration_factor: f64,
        transmembrane_pressure: f64,
        solution_viscosity: f64,
        membrane_area: f64,
    ) -> SimResult<Self> {
        ensure_positive("starting_volume", starting_volume)?;
        ensure_positive("transmembrane_pressure", transmembrane_pressure)?;
        ensure_positive("solution_viscosity", solution_viscosity)?;
        ensure_positive("membrane_area", membrane_area)?;

        if !concentration_factor.is_finite() {
            return Err(SimulationError::InvalidPhysicalParameter {
                name: "concentration_factor",
                value: concentration_factor,
            });
        }

        Ok(Self {
            starting_volume,
            concentration_factor,
            transmembrane_pressure,
            solution_viscosity,
            membrane_area,
        })
    }

    /// Starting volume \[L\]
    pub fn starting_volume(&self) -> f64 {
        self.starting_volume
    }

    /// Concentration factor
    pub fn concentration_factor(&self) -> f64 {
        self.concentration_factor
    }

    /// Transmembrane pressure \[Pa\]
    pub fn transmembrane_pressure(&self) -> f64 {
        self.transmembrane_pressure
    }

    /// Solution viscosity \[Pa·s\]
    pub fn solution_viscosity(&self) -> f64 {
        self.solution_viscosity
    }

    /// Membrane area \[m²\]
    pub fn membrane_area(&self) -> f64 {
        self.membrane_area
    }

    /// Volume at which the target concentration is reached \[L\]
    pub fn desired_volume(&self) -> f64 {
        self.starting_volume / self.concentration_factor
    }

    /// Conditions the flux model is evaluated under
    pub fn operating_conditions(&self) -> OperatingConditions {
        OperatingConditions {
            transmembrane_pressure: self.transmembrane_pressure,
            solution_viscosity: self.solution_viscosity,
            membrane_area: self.membrane_area,
        }
    }

    /// Reject concentration factors below 1
    pub fn check_concentration_factor(&self) -> SimResult<()> {
        if self.concentration_factor < 1.0 {
            return Err(SimulationError::InvalidConcentrationFactor {
                factor: self.concentration_factor,
            });
        }
        Ok(())
    }

    /// True when no filtration is needed at all
    pub fn is_already_concentrated(&self) -> bool {
        self.concentration_factor == 1.0
    }
}

fn ensure_positive(name: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidPhysicalParameter { name, value })
    }
}
