//! Filtration time estimate as returned to callers
//!
//! [`estimate_filtration_hours`] is the one-call entry point: it runs the
//! built-in fouling model through the default adaptive solver and folds every
//! outcome into a [`FiltrationEstimate`], which always serialises to
//! `{"statusCode": …, "hours": …}`.

use log::error;
use serde::{Serialize, Serializer};

use crate::error::{SimResult, SimulationError};
use crate::models::PowerLawFouling;
use crate::physics::SimulationParameters;
use crate::solver::{AdaptiveSolver, Scenario, SimulationResult, Solver, SolverConfiguration};

/// Outcome category, serialised as its numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateStatus {
    /// `0`: hours are present
    Success,
    /// `1`: the concentration factor is below 1
    InvalidConcentrationFactor,
    /// `2`: the simulation failed numerically or was misconfigured
    SimulationFailed,
}

impl EstimateStatus {
    /// Numeric status code
    pub fn code(&self) -> u8 {
        match self {
            EstimateStatus::Success => 0,
            EstimateStatus::InvalidConcentrationFactor => 1,
            EstimateStatus::SimulationFailed => 2,
        }
    }
}

impl Serialize for EstimateStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Status code plus, on success, the estimated filtration time
///
/// # Example
///
/// ```rust
/// use crossflow_rs::estimate::estimate_filtration_hours;
/// use crossflow_rs::physics::SimulationParameters;
///
/// let parameters = SimulationParameters::new(1000.0, 0.5, 100_000.0, 0.001, 10.0).unwrap();
/// let estimate = estimate_filtration_hours(&parameters);
///
/// assert_eq!(estimate.status_code(), 1);
/// assert_eq!(serde_json::to_string(&estimate).unwrap(), r#"{"statusCode":1}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiltrationEstimate {
    #[serde(rename = "statusCode")]
    status: EstimateStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    hours: Option<f64>,
}

impl FiltrationEstimate {
    /// Successful estimate
    pub fn success(hours: f64) -> Self {
        Self { status: EstimateStatus::Success, hours: Some(hours) }
    }

    /// Failed estimate, without hours
    pub fn failure(status: EstimateStatus) -> Self {
        Self { status, hours: None }
    }

    pub fn status(&self) -> EstimateStatus {
        self.status
    }

    pub fn status_code(&self) -> u8 {
        self.status.code()
    }

    /// Estimated hours, present only on success
    pub fn hours(&self) -> Option<f64> {
        self.hours
    }

    pub fn is_success(&self) -> bool {
        self.status == EstimateStatus::Success
    }
}

impl From<SimResult<SimulationResult>> for FiltrationEstimate {
    fn from(outcome: SimResult<SimulationResult>) -> Self {
        match outcome {
            Ok(result) => Self::success(result.hours),
            Err(SimulationError::InvalidConcentrationFactor { .. }) => {
                Self::failure(EstimateStatus::InvalidConcentrationFactor)
            }
            Err(e) => {
                error!("Filtration simulation failed: {}", e);
                Self::failure(EstimateStatus::SimulationFailed)
            }
        }
    }
}

/// Estimate the filtration time with the built-in fouling law
///
/// Never fails: a concentration factor below 1 yields status 1. The built-in
/// model cannot produce status 2 for validated parameters.
pub fn estimate_filtration_hours(parameters: &SimulationParameters) -> FiltrationEstimate {
    estimate_with(
        Scenario::new(Box::new(PowerLawFouling::default()), *parameters),
        &SolverConfiguration::default(),
    )
}

/// Estimate an arbitrary scenario with the adaptive solver
pub fn estimate_with(scenario: Scenario, config: &SolverConfiguration) -> FiltrationEstimate {
    AdaptiveSolver::new().solve(&scenario, config).into()
}
