//! Fixed-horizon forward simulation of capital accumulation.
//!
//! Without technology growth the simulator iterates capital per worker
//! directly. With growth (`g > 0`) it iterates capital per effective worker
//! and rebuilds the per-worker levels from the technology index `A`, so
//! `k = k~ * A` holds by construction in every period.

use crate::error::SolowError;
use crate::params::ModelParameters;
use crate::solvers::DiscreteMap;
use crate::steady_state::SolowMap;
use crate::traits::Steppable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One period of a run without technology growth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub t: usize,
    pub k: f64,
    pub y: f64,
    pub c: f64,
}

/// One period of a run with technology growth. `k`, `y`, `c` are per worker,
/// the tilde fields per effective worker, `a` is the technology level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthPeriodRecord {
    pub t: usize,
    pub a: f64,
    pub k: f64,
    pub y: f64,
    pub c: f64,
    pub k_tilde: f64,
    pub y_tilde: f64,
    pub c_tilde: f64,
}

/// A single simulated period as produced by [`TrajectorySimulator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SimulatedPeriod {
    WithoutGrowth(PeriodRecord),
    WithGrowth(GrowthPeriodRecord),
}

impl SimulatedPeriod {
    pub fn t(&self) -> usize {
        match self {
            SimulatedPeriod::WithoutGrowth(record) => record.t,
            SimulatedPeriod::WithGrowth(record) => record.t,
        }
    }

    /// Capital per worker in levels.
    pub fn capital(&self) -> f64 {
        match self {
            SimulatedPeriod::WithoutGrowth(record) => record.k,
            SimulatedPeriod::WithGrowth(record) => record.k,
        }
    }

    fn without_growth(self) -> Option<PeriodRecord> {
        match self {
            SimulatedPeriod::WithoutGrowth(record) => Some(record),
            SimulatedPeriod::WithGrowth(_) => None,
        }
    }

    fn with_growth(self) -> Option<GrowthPeriodRecord> {
        match self {
            SimulatedPeriod::WithGrowth(record) => Some(record),
            SimulatedPeriod::WithoutGrowth(_) => None,
        }
    }
}

/// The full time path. The variant is fixed by whether `g > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Trajectory {
    WithoutGrowth { periods: Vec<PeriodRecord> },
    WithGrowth { periods: Vec<GrowthPeriodRecord> },
}

impl Trajectory {
    pub fn len(&self) -> usize {
        match self {
            Trajectory::WithoutGrowth { periods } => periods.len(),
            Trajectory::WithGrowth { periods } => periods.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capital per worker in levels, one entry per period.
    pub fn capital_path(&self) -> Vec<f64> {
        match self {
            Trajectory::WithoutGrowth { periods } => periods.iter().map(|p| p.k).collect(),
            Trajectory::WithGrowth { periods } => periods.iter().map(|p| p.k).collect(),
        }
    }

    pub fn final_capital(&self) -> Option<f64> {
        match self {
            Trajectory::WithoutGrowth { periods } => periods.last().map(|p| p.k),
            Trajectory::WithGrowth { periods } => periods.last().map(|p| p.k),
        }
    }

    /// Long-format rows for a line chart colored by variable.
    pub fn series(&self) -> Vec<SeriesPoint> {
        match self {
            Trajectory::WithoutGrowth { periods } => periods
                .iter()
                .flat_map(|p| {
                    [
                        SeriesPoint::new(p.t, Variable::Capital, p.k),
                        SeriesPoint::new(p.t, Variable::Output, p.y),
                        SeriesPoint::new(p.t, Variable::Consumption, p.c),
                    ]
                })
                .collect(),
            Trajectory::WithGrowth { periods } => periods
                .iter()
                .flat_map(|p| {
                    [
                        SeriesPoint::new(p.t, Variable::Capital, p.k),
                        SeriesPoint::new(p.t, Variable::Output, p.y),
                        SeriesPoint::new(p.t, Variable::Consumption, p.c),
                        SeriesPoint::new(p.t, Variable::EffectiveCapital, p.k_tilde),
                        SeriesPoint::new(p.t, Variable::EffectiveOutput, p.y_tilde),
                        SeriesPoint::new(p.t, Variable::EffectiveConsumption, p.c_tilde),
                    ]
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    #[serde(rename = "k")]
    Capital,
    #[serde(rename = "y")]
    Output,
    #[serde(rename = "c")]
    Consumption,
    #[serde(rename = "k~")]
    EffectiveCapital,
    #[serde(rename = "y~")]
    EffectiveOutput,
    #[serde(rename = "c~")]
    EffectiveConsumption,
}

impl Variable {
    pub fn label(self) -> &'static str {
        match self {
            Variable::Capital => "k",
            Variable::Output => "y",
            Variable::Consumption => "c",
            Variable::EffectiveCapital => "k~",
            Variable::EffectiveOutput => "y~",
            Variable::EffectiveConsumption => "c~",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub t: usize,
    pub variable: Variable,
    pub value: f64,
}

impl SeriesPoint {
    fn new(t: usize, variable: Variable, value: f64) -> Self {
        Self { t, variable, value }
    }
}

/// Lazily produces exactly `horizon` periods, starting at `t = 0`.
///
/// The growth branch is chosen once at construction. Two simulators built
/// from the same parameters yield identical sequences.
pub struct TrajectorySimulator {
    map: SolowMap,
    stepper: DiscreteMap<f64>,
    /// Capital per worker, or per effective worker when growth is on.
    state: Vec<f64>,
    time: f64,
    period: usize,
    horizon: usize,
    alpha: f64,
    s: f64,
    growth: Option<f64>,
    technology: f64,
}

impl TrajectorySimulator {
    pub fn new(params: &ModelParameters) -> Result<Self, SolowError> {
        params.validate()?;

        let growth = params.growth_enabled().then_some(params.g);
        let map = match growth {
            Some(g) => {
                SolowMap::per_effective_worker(params.alpha, params.s, params.delta, params.n, g)
            }
            None => SolowMap::per_worker(params.alpha, params.s, params.delta, params.n),
        };
        tracing::debug!(
            horizon = params.horizon,
            growth = growth.is_some(),
            k0 = params.k0,
            "starting trajectory simulation"
        );

        Ok(Self {
            map,
            stepper: DiscreteMap::new(1),
            state: vec![params.k0],
            time: 0.0,
            period: 0,
            horizon: params.horizon,
            alpha: params.alpha,
            s: params.s,
            growth,
            technology: 1.0,
        })
    }

    pub fn growth_enabled(&self) -> bool {
        self.growth.is_some()
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Number of periods emitted so far.
    pub fn emitted(&self) -> usize {
        self.period
    }

    pub fn is_done(&self) -> bool {
        self.period >= self.horizon
    }

    fn advance(&mut self) {
        self.stepper.step(&self.map, &mut self.time, &mut self.state, 1.0);
        if let Some(g) = self.growth {
            self.technology *= 1.0 + g;
        }
    }

    fn record(&self) -> SimulatedPeriod {
        let t = self.period;
        match self.growth {
            None => {
                let k = self.state[0];
                let y = k.powf(self.alpha);
                SimulatedPeriod::WithoutGrowth(PeriodRecord {
                    t,
                    k,
                    y,
                    c: (1.0 - self.s) * y,
                })
            }
            Some(_) => {
                let k_tilde = self.state[0];
                let k = k_tilde * self.technology;
                let y = k.powf(self.alpha);
                let y_tilde = k_tilde.powf(self.alpha);
                SimulatedPeriod::WithGrowth(GrowthPeriodRecord {
                    t,
                    a: self.technology,
                    k,
                    y,
                    c: (1.0 - self.s) * y,
                    k_tilde,
                    y_tilde,
                    c_tilde: (1.0 - self.s) * y_tilde,
                })
            }
        }
    }
}

impl Iterator for TrajectorySimulator {
    type Item = SimulatedPeriod;

    fn next(&mut self) -> Option<SimulatedPeriod> {
        if self.is_done() {
            return None;
        }
        if self.period > 0 {
            self.advance();
        }
        let record = self.record();
        self.period += 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.horizon - self.period;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TrajectorySimulator {}

/// Runs the full horizon eagerly.
pub fn simulate(params: &ModelParameters) -> Result<Trajectory, SolowError> {
    let simulator = TrajectorySimulator::new(params)?;
    let trajectory = if simulator.growth_enabled() {
        Trajectory::WithGrowth {
            periods: simulator.filter_map(SimulatedPeriod::with_growth).collect(),
        }
    } else {
        Trajectory::WithoutGrowth {
            periods: simulator.filter_map(SimulatedPeriod::without_growth).collect(),
        }
    };
    tracing::trace!(
        periods = trajectory.len(),
        final_capital = ?trajectory.final_capital(),
        "trajectory simulation finished"
    );
    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steady_state::solve_steady_state;

    fn reference_params(k0: f64) -> ModelParameters {
        ModelParameters {
            alpha: 0.3,
            s: 0.2,
            delta: 0.05,
            n: 0.01,
            g: 0.0,
            k0,
            horizon: 200,
        }
    }

    fn growth_periods(trajectory: &Trajectory) -> &[GrowthPeriodRecord] {
        match trajectory {
            Trajectory::WithGrowth { periods } => periods,
            Trajectory::WithoutGrowth { .. } => panic!("expected growth trajectory"),
        }
    }

    fn level_periods(trajectory: &Trajectory) -> &[PeriodRecord] {
        match trajectory {
            Trajectory::WithoutGrowth { periods } => periods,
            Trajectory::WithGrowth { .. } => panic!("expected trajectory without growth"),
        }
    }

    #[test]
    fn initial_period_uses_k0() {
        let params = reference_params(2.5);
        let trajectory = simulate(&params).expect("simulation");
        let first = level_periods(&trajectory)[0];
        assert_eq!(first.t, 0);
        assert_eq!(first.k, 2.5);
        assert_eq!(first.y, 2.5_f64.powf(0.3));
        assert_eq!(first.c, 0.8 * first.y);
    }

    #[test]
    fn monotone_convergence_from_below() {
        let params = reference_params(1.0);
        let trajectory = simulate(&params).expect("simulation");
        let periods = level_periods(&trajectory);
        assert_eq!(periods.len(), 200);

        for window in periods.windows(2) {
            assert!(window[1].k > window[0].k, "capital fell at t = {}", window[1].t);
        }
        let k_star = (0.2_f64 / 0.06).powf(1.0 / 0.7);
        let last = periods[199];
        assert_eq!(last.t, 199);
        assert!((last.k - k_star).abs() < 1e-2, "k(199) = {}", last.k);
        assert!(last.k < k_star);
    }

    #[test]
    fn monotone_convergence_from_above() {
        let params = reference_params(50.0);
        let trajectory = simulate(&params).expect("simulation");
        let periods = level_periods(&trajectory);

        for window in periods.windows(2) {
            assert!(window[1].k < window[0].k, "capital rose at t = {}", window[1].t);
        }
        let steady = solve_steady_state(0.3, 0.2, 0.05, 0.01).expect("steady state");
        assert!((periods[199].k - steady.k).abs() < 1e-2);
        assert!(periods[199].k > steady.k);
    }

    #[test]
    fn starting_at_steady_state_stays_there() {
        let steady = solve_steady_state(0.3, 0.2, 0.05, 0.01).expect("steady state");
        let trajectory = simulate(&reference_params(steady.k)).expect("simulation");
        for record in level_periods(&trajectory) {
            assert!((record.k - steady.k).abs() < 1e-9);
            assert!((record.c - steady.c).abs() < 1e-9);
        }
    }

    #[test]
    fn growth_records_decompose_levels() {
        let params = ModelParameters {
            g: 0.02,
            ..reference_params(1.0)
        };
        let trajectory = simulate(&params).expect("simulation");
        let periods = growth_periods(&trajectory);
        assert_eq!(periods.len(), 200);
        assert_eq!(periods[0].a, 1.0);
        assert_eq!(periods[0].k_tilde, 1.0);

        for record in periods {
            assert_eq!(record.k, record.k_tilde * record.a);
            assert_eq!(record.y, record.k.powf(0.3));
            assert_eq!(record.y_tilde, record.k_tilde.powf(0.3));
            assert_eq!(record.c, 0.8 * record.y);
            assert_eq!(record.c_tilde, 0.8 * record.y_tilde);

            let expected_a = 1.02_f64.powi(record.t as i32);
            assert!((record.a - expected_a).abs() < 1e-12 * expected_a);
        }
    }

    #[test]
    fn growth_effective_capital_follows_recurrence() {
        let params = ModelParameters {
            g: 0.03,
            ..reference_params(5.0)
        };
        let trajectory = simulate(&params).expect("simulation");
        let periods = growth_periods(&trajectory);
        for window in periods.windows(2) {
            let prev = window[0].k_tilde;
            let expected = (0.2 * prev.powf(0.3) + 0.95 * prev) / (1.01 * 1.03);
            assert!((window[1].k_tilde - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn growth_output_per_worker_keeps_rising() {
        let params = ModelParameters {
            g: 0.02,
            ..reference_params(30.0)
        };
        let trajectory = simulate(&params).expect("simulation");
        let periods = growth_periods(&trajectory);
        let tail = &periods[100..];
        for window in tail.windows(2) {
            assert!(window[1].y > window[0].y);
            assert!((window[1].k_tilde - window[0].k_tilde).abs() < 1e-2);
        }
    }

    #[test]
    fn simulator_yields_exact_horizon_lazily() {
        let params = ModelParameters {
            horizon: 5,
            ..reference_params(1.0)
        };
        let mut simulator = TrajectorySimulator::new(&params).expect("simulator");
        assert_eq!(simulator.len(), 5);
        let first = simulator.next().expect("first period");
        assert_eq!(first.t(), 0);
        assert_eq!(first.capital(), 1.0);
        assert_eq!(simulator.len(), 4);
        assert_eq!(simulator.emitted(), 1);

        let rest: Vec<_> = simulator.by_ref().collect();
        assert_eq!(rest.len(), 4);
        assert_eq!(rest[3].t(), 4);
        assert!(simulator.is_done());
        assert!(simulator.next().is_none());
    }

    #[test]
    fn single_period_horizon_returns_initial_state() {
        let params = ModelParameters {
            horizon: 1,
            ..reference_params(3.0)
        };
        let trajectory = simulate(&params).expect("simulation");
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.capital_path(), vec![3.0]);
    }

    #[test]
    fn reruns_are_identical() {
        let params = ModelParameters::default();
        let first = simulate(&params).expect("simulation");
        let second = simulate(&params).expect("simulation");
        assert_eq!(first, second);
    }

    #[test]
    fn simulate_rejects_invalid_inputs() {
        let err = simulate(&reference_params(0.0)).expect_err("k0 = 0 must fail");
        assert_eq!(err, SolowError::InvalidInitialCondition(0.0));

        let params = ModelParameters {
            alpha: 1.0,
            ..reference_params(1.0)
        };
        assert!(matches!(simulate(&params), Err(SolowError::Domain(_))));
    }

    #[test]
    fn excessive_depreciation_is_rejected_before_simulating() {
        let params = ModelParameters {
            delta: 1.5,
            horizon: 5,
            ..reference_params(50.0)
        };
        let err = simulate(&params).expect_err("delta > 1 must fail");
        assert!(matches!(err, SolowError::Domain(_)), "got {err:?}");
        assert!(TrajectorySimulator::new(&params).is_err());

        let full = ModelParameters {
            delta: 1.0,
            ..params
        };
        let path = simulate(&full).expect("trajectory").capital_path();
        assert_eq!(path.len(), 5);
        assert!(path.iter().all(|k| k.is_finite() && *k > 0.0), "{path:?}");
    }

    #[test]
    fn series_lists_variables_per_period() {
        let params = ModelParameters {
            horizon: 3,
            ..reference_params(1.0)
        };
        let series = simulate(&params).expect("simulation").series();
        assert_eq!(series.len(), 9);
        let labels: Vec<&str> = series[..3].iter().map(|p| p.variable.label()).collect();
        assert_eq!(labels, vec!["k", "y", "c"]);
        assert_eq!(series[3].t, 1);

        let params = ModelParameters {
            g: 0.01,
            ..params
        };
        let trajectory = simulate(&params).expect("simulation");
        let series = trajectory.series();
        assert_eq!(series.len(), 18);
        let labels: Vec<String> = series[..6].iter().map(|p| p.variable.to_string()).collect();
        assert_eq!(labels, vec!["k", "y", "c", "k~", "y~", "c~"]);
        assert_eq!(series[3].value, growth_periods(&trajectory)[0].k_tilde);
    }
}
