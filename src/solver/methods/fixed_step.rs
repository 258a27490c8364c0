//! Fixed-step reference solver
//!
//! Steps the filtration with a uniform `Δt` until the volume drops below the
//! target. Step `i` starts at `i · Δt` and drains at the flow rate there, the
//! same convention as the adaptive fine window. The cost grows with the process length, so this is meant for
//! reference runs: halving `Δt` and comparing answers shows how far the
//! adaptive estimate is from the converged value.

use log::{debug, info};

use crate::error::{SimResult, SimulationError};
use crate::solver;
use crate::solver::{
    CompletionPhase, Scenario, SimulationResult, SimulationState, Solver, SolverConfiguration,
    SolverType, Trajectory,
};

/// Uniform-step solver
///
/// Requires a [`SolverType::FixedStep`] configuration. Fails with
/// [`SimulationError::StepBudgetExhausted`] if `max_steps` is not enough to
/// reach the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedStepSolver;

impl FixedStepSolver {
    /// Create a new fixed-step solver
    pub fn new() -> Self {
        Self
    }
}

impl Solver for FixedStepSolver {
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> SimResult<SimulationResult> {
        config.validate()?;
        scenario.validate()?;

        let (step_hours, max_steps) = match &config.solver_type {
            SolverType::FixedStep { step_hours, max_steps } => (*step_hours, *max_steps),
            other => {
                return Err(SimulationError::configuration(format!(
                    "FixedStepSolver only supports FixedStep configuration, got {}",
                    other.name()
                )));
            }
        };

        let parameters = &scenario.parameters;
        if parameters.is_already_concentrated() {
            let mut result = SimulationResult::already_concentrated(parameters.starting_volume());
            result.add_metadata("solver", self.name());
            return Ok(result);
        }

        let model = scenario.model.as_ref();
        let mut state = SimulationState::new(parameters, model);
        // Full trajectories of long runs are large, only reserve a bounded prefix.
        let mut trajectory = Trajectory::starting_at(&state, max_steps.min(4096) + 1);

        for step in 0..max_steps {
            state.advance_to(step as f64 * step_hours, model);
            state.drain(step_hours);
            let taken = step + 1;
            solver::validate_state(&state, taken)?;
            trajectory.record(&state);

            if taken % 10_000 == 0 {
                debug!(
                    "Step {}/{}: t = {} h, volume {} L",
                    taken,
                    max_steps,
                    state.current_time_hours(),
                    state.current_volume()
                );
            }

            if state.is_finished() {
                let hours = state.current_time_hours();
                let mut result =
                    trajectory.finish(hours, CompletionPhase::FixedStep, state.flux_evaluations());
                result.add_metadata("solver", self.name());
                result.add_metadata("step", &step_hours.to_string());
                result.add_metadata("steps", &taken.to_string());
                info!("Fixed-step estimate: {} h after {} steps", hours, taken);
                return Ok(result);
            }
        }

        Err(SimulationError::StepBudgetExhausted {
            steps: max_steps,
            hours: max_steps as f64 * step_hours,
        })
    }

    fn name(&self) -> &'static str {
        "Fixed step"
    }
}
