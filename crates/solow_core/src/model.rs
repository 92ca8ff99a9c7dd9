use crate::params::ModelParameters;
use crate::phase::{
    default_axis, phase_diagram, phase_diagram_with_growth, PhaseDiagram, PhaseKind,
};
use crate::steady_state::{
    convergence_multiplier, solve_golden_rule, solve_steady_state, solve_steady_state_with_growth,
    GoldenRule, SteadyState,
};
use crate::trajectory::{simulate, Trajectory};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Every result derived from one parameter set. Growth-only pieces are
/// `Some` exactly when `g > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSolution {
    pub parameters: ModelParameters,
    pub steady_state: SteadyState,
    pub growth_steady_state: Option<SteadyState>,
    pub golden_rule: GoldenRule,
    pub convergence_multiplier: f64,
    pub trajectory: Trajectory,
    pub phase: PhaseDiagram,
    pub growth_phase: Option<PhaseDiagram>,
}

/// Recomputes the whole model from scratch.
pub fn solve_model(params: &ModelParameters) -> Result<ModelSolution> {
    params.validate().context("Invalid model parameters.")?;
    let ModelParameters {
        alpha,
        s,
        delta,
        n,
        g,
        ..
    } = *params;

    let steady_state = solve_steady_state(alpha, s, delta, n)?;
    let golden_rule = solve_golden_rule(alpha, delta, n)?;
    let convergence_multiplier = convergence_multiplier(alpha, s, delta, n)?;
    let trajectory = simulate(params)?;
    let phase = phase_diagram(params, &default_axis(params, PhaseKind::PerWorker)?)?;

    let (growth_steady_state, growth_phase) = if params.growth_enabled() {
        let steady = solve_steady_state_with_growth(alpha, s, delta, n, g)?;
        let axis = default_axis(params, PhaseKind::PerEffectiveWorker)?;
        (Some(steady), Some(phase_diagram_with_growth(params, &axis)?))
    } else {
        (None, None)
    };

    tracing::debug!(
        k_star = steady_state.k,
        k_golden_rule = golden_rule.k,
        growth = params.growth_enabled(),
        periods = trajectory.len(),
        "solved Solow model"
    );

    Ok(ModelSolution {
        parameters: *params,
        steady_state,
        growth_steady_state,
        golden_rule,
        convergence_multiplier,
        trajectory,
        phase,
        growth_phase,
    })
}
