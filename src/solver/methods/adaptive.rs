//! Adaptive two-phase filtration solver
//!
//! # Problem
//!
//! A filtration run can last 20 hours or 20 000 hours. Stepping every hour
//! would make the cost of an estimate grow with the length of the process.
//! Instead the number of flux evaluations is fixed and the step size adapts.
//!
//! # Algorithm
//!
//! ```text
//! Phase 1  fine window    N₁ steps of h = W/N₁ at t = 0, h, …, (N₁−1)·h
//!                         (the fouling law changes fastest early on)
//! Phase 2  coarse steps   T̂ = (V − V_d) / Q(t₁), t₁ = (N₁−1)·h
//!                         N₂ steps of T̂/N₂ hours after t₁
//! Phase 3  extrapolation  t = t₂ + (V − V_d) / Q(t₂)
//! ```
//!
//! Every step moves to its checkpoint, re-evaluates the flow rate there,
//! removes `Q · Δt` litres and stops as soon as the volume is below target.
//! The reported time is that checkpoint. A run that finishes during the very
//! first fine step therefore reports 0 hours.
//!
//! # Accuracy
//!
//! Phase 2 sizes its steps from the flow rate at the end of Phase 1, which is
//! higher than every later rate of a fouling membrane, so it covers less time
//! than needed and the run usually ends in Phase 3. The estimate is a bounded
//! cost approximation, not a converged integral; use
//! [`FixedStepSolver`](crate::solver::FixedStepSolver) for reference values.

use log::{debug, info};

use crate::error::{SimResult, SimulationError};
use crate::solver;
use crate::solver::{
    CompletionPhase, Scenario, SimulationResult, SimulationState, Solver, SolverConfiguration,
    SolverType, Trajectory,
};

// =================================================================================================
// Adaptive Solver
// =================================================================================================

/// Adaptive two-phase solver
///
/// Requires a [`SolverType::AdaptiveTwoPhase`] configuration.
///
/// # Example
///
/// ```rust
/// use crossflow_rs::models::PowerLawFouling;
/// use crossflow_rs::physics::SimulationParameters;
/// use crossflow_rs::solver::{AdaptiveSolver, CompletionPhase, Scenario, Solver, SolverConfiguration};
///
/// let parameters = SimulationParameters::new(1000.0, 1.0, 100_000.0, 0.001, 10.0).unwrap();
/// let scenario = Scenario::new(Box::new(PowerLawFouling::default()), parameters);
///
/// let result = AdaptiveSolver::new().solve(&scenario, &SolverConfiguration::default()).unwrap();
/// assert_eq!(result.hours, 0.0);
/// assert_eq!(result.completion, CompletionPhase::AlreadyConcentrated);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptiveSolver;

impl AdaptiveSolver {
    /// Create a new adaptive solver
    pub fn new() -> Self {
        Self
    }
}

impl Solver for AdaptiveSolver {

    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> SimResult<SimulationResult> {

        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let (fine_window_hours, fine_steps, coarse_steps) = match &config.solver_type {
            SolverType::AdaptiveTwoPhase { fine_window_hours, fine_steps, coarse_steps } => {
                (*fine_window_hours, *fine_steps, *coarse_steps)
            }
            other => {
                return Err(SimulationError::configuration(format!(
                    "AdaptiveSolver only supports AdaptiveTwoPhase configuration, got {}",
                    other.name()
                )));
            }
        };

        let parameters = &scenario.parameters;
        if parameters.is_already_concentrated() {
            info!("Concentration factor is 1, no filtration needed");
            let mut result = SimulationResult::already_concentrated(parameters.starting_volume());
            result.add_metadata("solver", self.name());
            return Ok(result);
        }

        // ====== Step 2: Setup ======

        let model = scenario.model.as_ref();
        let mut state = SimulationState::new(parameters, model);
        let mut trajectory = Trajectory::starting_at(&state, fine_steps + coarse_steps + 2);
        let mut step_count = 0;

        // ====== Step 3: Fine window ======

        let fine_step = fine_window_hours / fine_steps as f64;

        // Each step drains at the rate of its starting checkpoint, so the
        // window's last checkpoint is one step short of fine_window_hours.
        for step in 0..fine_steps {
            state.advance_to(step as f64 * fine_step, model);
            state.drain(fine_step);
            step_count += 1;
            solver::validate_state(&state, step_count)?;
            trajectory.record(&state);

            if state.is_finished() {
                return Ok(self.finish(state, trajectory, CompletionPhase::FineWindow, fine_step, None));
            }
        }

        debug!(
            "Fine window done at {} h: {} L removed, flow rate {} L/h",
            state.current_time_hours(),
            parameters.starting_volume() - state.current_volume(),
            state.current_flow_rate()
        );

        // ====== Step 4: Coarse steps ======

        let coarse_start = state.current_time_hours();
        let estimated_remaining_hours = state.remaining_volume() / state.current_flow_rate();
        let coarse_step = estimated_remaining_hours / coarse_steps as f64;

        debug!(
            "Estimated {} h remaining, coarse step {} h",
            estimated_remaining_hours, coarse_step
        );

        for step in 1..=coarse_steps {
            state.advance_to(coarse_start + step as f64 * coarse_step, model);
            state.drain(coarse_step);
            step_count += 1;
            solver::validate_state(&state, step_count)?;
            trajectory.record(&state);

            if state.is_finished() {
                return Ok(self.finish(
                    state,
                    trajectory,
                    CompletionPhase::CoarseWindow,
                    fine_step,
                    Some(coarse_step),
                ));
            }
        }

        debug!(
            "Coarse steps done at {} h: {} L left to remove at {} L/h",
            state.current_time_hours(),
            state.remaining_volume(),
            state.current_flow_rate()
        );

        // ====== Step 5: Extrapolation ======

        let remaining_hours = state.remaining_volume() / state.current_flow_rate();
        let hours = state.current_time_hours() + remaining_hours;
        if !hours.is_finite() {
            return Err(SimulationError::NumericalInstability {
                quantity: "extrapolated time",
                step: step_count,
            });
        }

        trajectory.push(hours, state.desired_volume(), state.current_flow_rate());

        let flux_evaluations = state.flux_evaluations();
        let mut result = trajectory.finish(hours, CompletionPhase::Extrapolated, flux_evaluations);
        self.describe(&mut result, fine_step, Some(coarse_step));
        info!("Filtration estimate: {} h ({})", hours, result.completion);

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Adaptive two-phase"
    }
}

impl AdaptiveSolver {
    /// Build the result for a run that reached the target inside a stepping phase
    fn finish(
        &self,
        state: SimulationState,
        trajectory: Trajectory,
        completion: CompletionPhase,
        fine_step: f64,
        coarse_step: Option<f64>,
    ) -> SimulationResult {
        let hours = state.current_time_hours();
        let mut result = trajectory.finish(hours, completion, state.flux_evaluations());
        self.describe(&mut result, fine_step, coarse_step);
        info!("Filtration estimate: {} h ({})", hours, completion);
        result
    }

    fn describe(&self, result: &mut SimulationResult, fine_step: f64, coarse_step: Option<f64>) {
        result.add_metadata("solver", self.name());
        result.add_metadata("fine step", &fine_step.to_string());
        if let Some(coarse_step) = coarse_step {
            result.add_metadata("coarse step", &coarse_step.to_string());
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
