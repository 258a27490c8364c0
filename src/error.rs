//! Error types shared by the physics and solver modules
//!
//! Every fallible operation in the crate returns [`SimResult`]. Errors are
//! plain values: callers that must always render a response (see
//! [`crate::estimate`]) translate them into a status code instead of
//! propagating them further.

use thiserror::Error;

/// Result alias used throughout the crate
pub type SimResult<T> = Result<T, SimulationError>;

/// Errors raised while validating inputs or running a simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Concentration factor below 1 would mean dilution, not concentration
    #[error("invalid concentration factor {factor}: must be at least 1")]
    InvalidConcentrationFactor {
        /// Rejected factor
        factor: f64,
    },

    /// A physical quantity is non-positive or not finite
    #[error("invalid physical parameter {name} = {value}: must be finite and positive")]
    InvalidPhysicalParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Solver configuration is out of range or does not match the solver
    #[error("invalid solver configuration: {0}")]
    InvalidConfiguration(String),

    /// NaN or Inf appeared in the simulation state
    #[error("non-finite {quantity} detected at step {step}; check the flux model for division by zero")]
    NumericalInstability {
        /// State quantity that went non-finite
        quantity: &'static str,
        /// Step at which it was detected
        step: usize,
    },

    /// Fixed-step integration ran out of steps before reaching the target volume
    #[error("target volume not reached after {steps} steps ({hours} h simulated)")]
    StepBudgetExhausted {
        /// Number of steps taken
        steps: usize,
        /// Simulated time when the budget ran out
        hours: f64,
    },
}

impl SimulationError {
    /// Shortcut for [`SimulationError::InvalidConfiguration`]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SimulationError::InvalidConcentrationFactor { factor: 0.5 };
        assert_eq!(err.to_string(), "invalid concentration factor 0.5: must be at least 1");

        let err = SimulationError::InvalidPhysicalParameter { name: "membrane_area", value: -1.0 };
        assert!(err.to_string().contains("membrane_area = -1"));

        let err = SimulationError::configuration("fine_steps must be greater than 0");
        assert!(err.to_string().ends_with("fine_steps must be greater than 0"));
    }
}
