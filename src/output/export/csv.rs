//! CSV export of filtration trajectories
//!
//! The output opens with an optional `#` comment header, then one row per
//! checkpoint, readable by spreadsheets and pandas alike:
//!
//! ```csv
//! # Cross-Flow Filtration Simulation
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Model: Power-law membrane fouling
//! # Solver: Adaptive two-phase
//! # Estimated Time: 15757.985195852074 h
//! # Completion: extrapolated
//! # Flux Evaluations: 101
//! #
//! Time (h),Volume (L),Flow Rate (L/h)
//! 0.000000,1000.000000,7.692308
//! 0.000000,996.923077,7.692308
//! 0.400000,996.583128,0.849871
//! ```
//!
//! The first row is the starting state. Each later row is a checkpoint with
//! the volume left after the step that starts there.
//!
//! A result that needed no filtration carries no flow-rate snapshot; its row
//! leaves the flow-rate cell empty.

use std::fs::File;
use std::io::{BufWriter, Write};

use thiserror::Error;

use crate::output::export::{sample_indices, Exporter};
use crate::solver::SimulationResult;

// =============================================================================
// Errors
// =============================================================================

/// CSV export failures
#[derive(Error, Debug)]
pub enum CsvError {
    #[error("empty data: the result holds no checkpoints")]
    EmptyData,

    #[error("data length mismatch: {time} time points versus {values} {column} values")]
    LengthMismatch { column: &'static str, time: usize, values: usize },

    #[error("invalid data: NaN or Inf detected in {0}")]
    NonFinite(&'static str),

    #[error("cannot downsample to {0} points: at least 2 are needed")]
    InvalidPointCount(usize),

    #[error("cannot write CSV file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use crossflow_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.decimal_separator, '.');
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    pub time_header: String,
    pub volume_header: String,
    pub flow_rate_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            time_header: "Time (h)".to_string(),
            volume_header: "Volume (L)".to_string(),
            flow_rate_header: "Flow Rate (L/h)".to_string(),
        }
    }
}

impl CsvConfig {
    /// Semicolon delimiter and comma decimal separator
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Twelve decimal places
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    fn format_number(&self, value: f64) -> String {
        let formatted = format!("{:.prec$}", value, prec = self.precision);

        if self.decimal_separator != '.' {
            formatted.replace('.', &self.decimal_separator.to_string())
        } else {
            formatted
        }
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set are written.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    pub model_name: Option<String>,
    pub solver_name: Option<String>,

    /// Estimated filtration time \[h\]
    pub estimated_hours: Option<f64>,

    /// Phase that produced the estimate
    pub completion: Option<String>,

    pub flux_evaluations: Option<usize>,

    /// Additional parameters, written in insertion order
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Collect metadata from a finished solve
    ///
    /// Picks up the solver name from the result metadata when present.
    pub fn from_result(model_name: &str, result: &SimulationResult) -> Self {
        Self {
            model_name: Some(model_name.to_string()),
            solver_name: result.get_metadata("solver").map(str::to_string),
            estimated_hours: Some(result.hours),
            completion: Some(result.completion.to_string()),
            flux_evaluations: Some(result.flux_evaluations),
            custom: Vec::new(),
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: &str, value: &str) {
        self.custom.push((key.to_string(), value.to_string()));
    }

    fn write_header<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "# Cross-Flow Filtration Simulation")?;
        writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

        if let Some(model) = &self.model_name {
            writeln!(out, "# Model: {}", model)?;
        }
        if let Some(solver) = &self.solver_name {
            writeln!(out, "# Solver: {}", solver)?;
        }
        if let Some(hours) = self.estimated_hours {
            writeln!(out, "# Estimated Time: {} h", hours)?;
        }
        if let Some(completion) = &self.completion {
            writeln!(out, "# Completion: {}", completion)?;
        }
        if let Some(evaluations) = self.flux_evaluations {
            writeln!(out, "# Flux Evaluations: {}", evaluations)?;
        }
        for (key, value) in &self.custom {
            writeln!(out, "# {}: {}", key, value)?;
        }

        writeln!(out, "#")
    }
}

// =============================================================================
// Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Write the trajectory to any writer
    pub fn write_to<W: Write>(
        &self,
        result: &SimulationResult,
        n_points: Option<usize>,
        out: &mut W,
    ) -> Result<(), CsvError> {

        // ============================= Validation =============================

        validate(result)?;
        if let Some(n) = n_points
            && n < 2
        {
            return Err(CsvError::InvalidPointCount(n));
        }

        let config = &self.config;

        // ============================= Write Metadata =========================

        if config.include_metadata
            && let Some(metadata) = &config.metadata
        {
            metadata.write_header(out)?;
        }

        // ============================= Write Header ===========================

        writeln!(
            out,
            "{}{d}{}{d}{}",
            config.time_header,
            config.volume_header,
            config.flow_rate_header,
            d = config.delimiter
        )?;

        // ============================= Write Data =============================

        for i in sample_indices(result.len(), n_points) {
            let flow_rate = result
                .flow_rates
                .get(i)
                .map(|q| config.format_number(*q))
                .unwrap_or_default();

            writeln!(
                out,
                "{}{d}{}{d}{}",
                config.format_number(result.time_points[i]),
                config.format_number(result.volumes[i]),
                flow_rate,
                d = config.delimiter
            )?;
        }

        Ok(())
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export(
        &self,
        result: &SimulationResult,
        n_points: Option<usize>,
        path: &str,
    ) -> Result<(), CsvError> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(result, n_points, &mut out)?;
        out.flush()?;
        Ok(())
    }
}

fn validate(result: &SimulationResult) -> Result<(), CsvError> {
    let len = result.time_points.len();
    if len == 0 {
        return Err(CsvError::EmptyData);
    }

    if result.volumes.len() != len {
        return Err(CsvError::LengthMismatch {
            column: "volume",
            time: len,
            values: result.volumes.len(),
        });
    }

    // No flow rates at all is allowed: nothing was filtered.
    if !result.flow_rates.is_empty() && result.flow_rates.len() != len {
        return Err(CsvError::LengthMismatch {
            column: "flow rate",
            time: len,
            values: result.flow_rates.len(),
        });
    }

    let columns = [
        ("time series", &result.time_points),
        ("volume series", &result.volumes),
        ("flow rate series", &result.flow_rates),
    ];
    for (name, values) in columns {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(CsvError::NonFinite(name));
        }
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
