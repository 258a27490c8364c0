//! Mutable state of one filtration run

use crate::physics::{FluxModel, OperatingConditions, SimulationParameters};

/// State of a filtration run, owned by the solver for the duration of a solve
///
/// Time only moves forward through [`advance_to`](SimulationState::advance_to),
/// which also refreshes the flow rate. The flow rate has no setter: it is
/// always the model's value at the current checkpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    current_volume: f64,
    desired_volume: f64,
    current_time_hours: f64,
    current_flow_rate: f64,
    conditions: OperatingConditions,
    flux_evaluations: usize,
}

impl SimulationState {
    /// Create the `t = 0` state and take the initial flow rate snapshot
    pub fn new(parameters: &SimulationParameters, model: &dyn FluxModel) -> Self {
        let conditions = parameters.operating_conditions();
        let state = Self {
            current_volume: parameters.starting_volume(),
            desired_volume: parameters.desired_volume(),
            current_time_hours: 0.0,
            current_flow_rate: model.flow_rate(0.0, &conditions),
            conditions,
            flux_evaluations: 1,
        };

        log::info!(
            "Filtration state created with {}: volume {} L -> {} L, pressure {} Pa, \
             viscosity {} Pa.s, area {} m2, initial flow rate {} L/h",
            model.name(),
            state.current_volume,
            state.desired_volume,
            conditions.transmembrane_pressure,
            conditions.solution_viscosity,
            conditions.membrane_area,
            state.current_flow_rate,
        );

        state
    }

    /// Move to checkpoint `time_hours` and re-evaluate the flow rate there
    pub fn advance_to(&mut self, time_hours: f64, model: &dyn FluxModel) {
        self.current_time_hours = time_hours;
        self.current_flow_rate = model.flow_rate(time_hours, &self.conditions);
        self.flux_evaluations += 1;
    }

    /// Remove the permeate produced at the current flow rate over `step_hours`
    pub fn drain(&mut self, step_hours: f64) {
        self.current_volume -= self.current_flow_rate * step_hours;
    }

    /// True once the volume has dropped below the target
    pub fn is_finished(&self) -> bool {
        self.current_volume < self.desired_volume
    }

    /// Volume still to be removed \[L\]
    pub fn remaining_volume(&self) -> f64 {
        self.current_volume - self.desired_volume
    }

    /// Current retentate volume \[L\]
    pub fn current_volume(&self) -> f64 {
        self.current_volume
    }

    /// Target volume \[L\]
    pub fn desired_volume(&self) -> f64 {
        self.desired_volume
    }

    /// Current checkpoint \[h\]
    pub fn current_time_hours(&self) -> f64 {
        self.current_time_hours
    }

    /// Flow rate at the current checkpoint \[L/h\]
    pub fn current_flow_rate(&self) -> f64 {
        self.current_flow_rate
    }

    /// Flux evaluations so far, including the initial snapshot
    pub fn flux_evaluations(&self) -> usize {
        self.flux_evaluations
    }
}
