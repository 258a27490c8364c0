//! Common utilities for integration tests
#![allow(dead_code)]

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{ConstantFlux, RisingFlux};
pub use test_helpers::{
    create_scenario,
    fine_window_drain,
    fouling_scenario,
    reference_parameters,
    relative_error,
};
