//! Phase-diagram data: the investment curve against the break-even line.

use crate::params::ModelParameters;
use crate::steady_state::{solve_steady_state, solve_steady_state_with_growth};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

const AXIS_MIN: f64 = 0.001;
const AXIS_FLOOR: f64 = 50.0;
const DEFAULT_SAMPLES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Capital per worker, break-even `(n + delta) k`.
    PerWorker,
    /// Capital per effective worker, break-even `(n + delta + g) k~`.
    PerEffectiveWorker,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseAxisSpec {
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhasePoint {
    pub k: f64,
    pub investment: f64,
    pub break_even: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseDiagram {
    pub kind: PhaseKind,
    pub break_even_rate: f64,
    /// Where the two curves cross; drawn as a vertical marker.
    pub steady_state: f64,
    pub points: Vec<PhasePoint>,
}

/// Axis wide enough to show the crossing and the starting point:
/// up to `max(2 k*, 2 k0, 50)` per worker, `max(2 k~*, 50)` per effective worker.
pub fn default_axis(params: &ModelParameters, kind: PhaseKind) -> Result<PhaseAxisSpec> {
    let max = match kind {
        PhaseKind::PerWorker => {
            let steady = solve_steady_state(params.alpha, params.s, params.delta, params.n)?;
            (2.0 * steady.k).max(2.0 * params.k0).max(AXIS_FLOOR)
        }
        PhaseKind::PerEffectiveWorker => {
            let steady = solve_steady_state_with_growth(
                params.alpha,
                params.s,
                params.delta,
                params.n,
                params.g,
            )?;
            (2.0 * steady.k).max(AXIS_FLOOR)
        }
    };
    Ok(PhaseAxisSpec {
        min: AXIS_MIN,
        max,
        samples: DEFAULT_SAMPLES,
    })
}

pub fn phase_diagram(params: &ModelParameters, axis: &PhaseAxisSpec) -> Result<PhaseDiagram> {
    let steady = solve_steady_state(params.alpha, params.s, params.delta, params.n)
        .context("Failed to solve steady state for phase diagram.")?;
    sample_phase(
        PhaseKind::PerWorker,
        params,
        params.break_even_rate(),
        steady.k,
        axis,
    )
}

pub fn phase_diagram_with_growth(
    params: &ModelParameters,
    axis: &PhaseAxisSpec,
) -> Result<PhaseDiagram> {
    if !params.growth_enabled() {
        bail!("Phase diagram per effective worker requires g > 0.");
    }
    let steady = solve_steady_state_with_growth(
        params.alpha,
        params.s,
        params.delta,
        params.n,
        params.g,
    )
    .context("Failed to solve effective steady state for phase diagram.")?;
    sample_phase(
        PhaseKind::PerEffectiveWorker,
        params,
        params.effective_break_even_rate(),
        steady.k,
        axis,
    )
}

fn sample_phase(
    kind: PhaseKind,
    params: &ModelParameters,
    break_even_rate: f64,
    steady_state: f64,
    axis: &PhaseAxisSpec,
) -> Result<PhaseDiagram> {
    validate_axis(axis)?;
    let points = linspace(axis.min, axis.max, axis.samples)
        .into_iter()
        .map(|k| PhasePoint {
            k,
            investment: params.s * k.powf(params.alpha),
            break_even: break_even_rate * k,
        })
        .collect();
    Ok(PhaseDiagram {
        kind,
        break_even_rate,
        steady_state,
        points,
    })
}

fn validate_axis(axis: &PhaseAxisSpec) -> Result<()> {
    if !axis.min.is_finite() || !axis.max.is_finite() || axis.max <= axis.min {
        bail!("Phase axis range must be finite with max > min.");
    }
    if axis.min < 0.0 {
        bail!("Phase axis must start at non-negative capital.");
    }
    if axis.samples < 2 {
        bail!("Phase axis needs at least 2 samples.");
    }
    Ok(())
}

/// `samples` evenly spaced values from `min` to `max` inclusive.
pub fn linspace(min: f64, max: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (samples - 1) as f64;
            (0..samples)
                .map(|i| {
                    if i == samples - 1 {
                        max
                    } else {
                        min + step * i as f64
                    }
                })
                .collect()
        }
    }
}
