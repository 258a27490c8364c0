//! JSON model requests
//!
//! A request is a flat JSON object:
//!
//! ```json
//! {
//!   "volumeStart": "1000",
//!   "tmp": 100000,
//!   "membraneArea": 10,
//!   "molWeightCutOff": "2500",
//!   "concFactor": 2,
//!   "solutionViscosity": 0.001
//! }
//! ```
//!
//! The five required fields may be JSON numbers or numeric strings. A `null`
//! field counts as missing. `solutionViscosity` is optional: anything other
//! than a JSON number falls back to [`WATER_VISCOSITY`].

use log::{debug, warn};
use serde_json::Value;
use thiserror::Error;

use crate::error::SimulationError;
use crate::estimate::{estimate_filtration_hours, FiltrationEstimate};
use crate::physics::{SimulationParameters, CASEIN_MOLECULAR_WEIGHT, WATER_VISCOSITY};

const VOLUME_START: &str = "volumeStart";
const TMP: &str = "tmp";
const MEMBRANE_AREA: &str = "membraneArea";
const MOL_WEIGHT_CUTOFF: &str = "molWeightCutOff";
const CONC_FACTOR: &str = "concFactor";
const SOLUTION_VISCOSITY: &str = "solutionViscosity";

/// Errors raised while turning a request into an estimate
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("request is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    #[error("field `{field}` is not numeric: {value}")]
    NotNumeric { field: &'static str, value: String },

    #[error(
        "membrane molecular weight cutoff {cutoff} Da must be below {limit} Da to retain casein",
        limit = CASEIN_MOLECULAR_WEIGHT
    )]
    MolecularWeightCutoffTooHigh { cutoff: f64 },

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Parsed model request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelRequest {
    /// Starting volume \[L\]
    pub volume_start: f64,
    /// Transmembrane pressure \[Pa\]
    pub tmp: f64,
    /// Membrane area \[m²\]
    pub membrane_area: f64,
    /// Membrane molecular weight cutoff \[Da\]
    pub mol_weight_cutoff: f64,
    /// Concentration factor
    pub conc_factor: f64,
    /// Solution viscosity \[Pa·s\]
    pub solution_viscosity: f64,
}

impl ModelRequest {
    /// Parse a request body
    pub fn from_json(body: &str) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(&value)
    }

    /// Read a request from an already parsed JSON value
    pub fn from_value(value: &Value) -> Result<Self, RequestError> {
        let solution_viscosity = match value.get(SOLUTION_VISCOSITY) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(WATER_VISCOSITY),
            Some(Value::Null) | None => {
                debug!("No solution viscosity given, using water ({} Pa.s)", WATER_VISCOSITY);
                WATER_VISCOSITY
            }
            Some(other) => {
                warn!(
                    "Ignoring non-numeric solution viscosity {}, using water ({} Pa.s)",
                    other, WATER_VISCOSITY
                );
                WATER_VISCOSITY
            }
        };

        Ok(Self {
            volume_start: required_number(value, VOLUME_START)?,
            tmp: required_number(value, TMP)?,
            membrane_area: required_number(value, MEMBRANE_AREA)?,
            mol_weight_cutoff: required_number(value, MOL_WEIGHT_CUTOFF)?,
            conc_factor: required_number(value, CONC_FACTOR)?,
            solution_viscosity,
        })
    }

    /// Check the membrane cutoff and build validated simulation parameters
    pub fn into_parameters(self) -> Result<SimulationParameters, RequestError> {
        if self.mol_weight_cutoff >= CASEIN_MOLECULAR_WEIGHT {
            return Err(RequestError::MolecularWeightCutoffTooHigh {
                cutoff: self.mol_weight_cutoff,
            });
        }

        Ok(SimulationParameters::new(
            self.volume_start,
            self.conc_factor,
            self.tmp,
            self.solution_viscosity,
            self.membrane_area,
        )?)
    }
}

/// Parse, validate and estimate a request in one go
///
/// Request problems are errors. A concentration factor below 1 is not: it
/// comes back as an estimate with status 1.
///
/// # Example
///
/// ```rust
/// use crossflow_rs::request::evaluate_request;
///
/// let body = r#"{"volumeStart": "1000", "tmp": "100000", "membraneArea": "10",
///                "molWeightCutOff": "2500", "concFactor": "1"}"#;
/// let estimate = evaluate_request(body).unwrap();
/// assert_eq!(estimate.hours(), Some(0.0));
/// ```
pub fn evaluate_request(body: &str) -> Result<FiltrationEstimate, RequestError> {
    let parameters = ModelRequest::from_json(body)?.into_parameters()?;
    Ok(estimate_filtration_hours(&parameters))
}

fn required_number(value: &Value, field: &'static str) -> Result<f64, RequestError> {
    let raw = match value.get(field) {
        None | Some(Value::Null) => return Err(RequestError::MissingField(field)),
        Some(raw) => raw,
    };

    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| RequestError::NotNumeric { field, value: raw.to_string() })
}
