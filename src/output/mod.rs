//! Output of simulation results
//!
//! ```text
//! output/
//! ├── mod.rs     ← This file
//! └── export/    ← Data export
//!     ├── mod.rs ← Exporter trait
//!     └── csv.rs
//! ```
//!
//! Exporters take a whole [`SimulationResult`](crate::solver::SimulationResult)
//! and write its checkpoint trajectory for external analysis.

pub mod export;

pub use export::{CsvConfig, CsvError, CsvExporter, CsvMetadata, Exporter};
