use crate::error::SolowError;
use crate::params::{
    check_break_even, check_capital_share, check_positive_sum, check_rate, check_savings_rate,
};
use crate::traits::DynamicalSystem;
use serde::{Deserialize, Serialize};

/// Steady-state capital, output and consumption. Per worker without
/// technology growth, per effective worker with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteadyState {
    pub k: f64,
    pub y: f64,
    pub c: f64,
}

/// Capital level maximizing steady-state consumption, with its output and
/// consumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoldenRule {
    pub k: f64,
    pub y: f64,
    pub c: f64,
}

/// `k* = (s / (n + delta))^(1 / (1 - alpha))`.
pub fn solve_steady_state(
    alpha: f64,
    s: f64,
    delta: f64,
    n: f64,
) -> Result<SteadyState, SolowError> {
    check_capital_share(alpha)?;
    check_savings_rate(s)?;
    check_break_even(delta, n)?;
    Ok(closed_form_steady_state(alpha, s, n + delta))
}

/// Per-effective-worker steady state: `n + delta + g` replaces `n + delta`.
pub fn solve_steady_state_with_growth(
    alpha: f64,
    s: f64,
    delta: f64,
    n: f64,
    g: f64,
) -> Result<SteadyState, SolowError> {
    check_capital_share(alpha)?;
    check_savings_rate(s)?;
    check_break_even(delta, n)?;
    check_rate("g", g)?;
    check_positive_sum("n + delta + g", n + delta + g)?;
    Ok(closed_form_steady_state(alpha, s, n + delta + g))
}

/// Golden rule: the marginal product `alpha * k^(alpha - 1)` equals `n + delta`.
pub fn solve_golden_rule(alpha: f64, delta: f64, n: f64) -> Result<GoldenRule, SolowError> {
    check_capital_share(alpha)?;
    check_break_even(delta, n)?;
    let rate = n + delta;
    let k = (alpha / rate).powf(1.0 / (1.0 - alpha));
    let y = k.powf(alpha);
    Ok(GoldenRule {
        k,
        y,
        c: y - rate * k,
    })
}

/// With Cobb-Douglas production the golden-rule savings rate is the capital
/// share itself.
pub fn golden_rule_savings_rate(alpha: f64) -> Result<f64, SolowError> {
    check_capital_share(alpha)?;
    Ok(alpha)
}

fn closed_form_steady_state(alpha: f64, s: f64, rate: f64) -> SteadyState {
    let k = (s / rate).powf(1.0 / (1.0 - alpha));
    let y = k.powf(alpha);
    SteadyState {
        k,
        y,
        c: (1.0 - s) * y,
    }
}

/// One period of capital accumulation,
/// `k' = (s * k^alpha + (1 - delta) * k) / divisor`.
///
/// The divisor is `1 + n` for capital per worker and `(1 + n)(1 + g)` for
/// capital per effective worker. Inputs are assumed validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolowMap {
    pub alpha: f64,
    pub s: f64,
    pub delta: f64,
    pub divisor: f64,
}

impl SolowMap {
    pub fn per_worker(alpha: f64, s: f64, delta: f64, n: f64) -> Self {
        Self {
            alpha,
            s,
            delta,
            divisor: 1.0 + n,
        }
    }

    pub fn per_effective_worker(alpha: f64, s: f64, delta: f64, n: f64, g: f64) -> Self {
        Self {
            alpha,
            s,
            delta,
            divisor: (1.0 + n) * (1.0 + g),
        }
    }

    pub fn next(&self, k: f64) -> f64 {
        (self.s * k.powf(self.alpha) + (1.0 - self.delta) * k) / self.divisor
    }

    /// `f'(k)`. At a fixed point this is the local convergence multiplier.
    pub fn derivative(&self, k: f64) -> f64 {
        (self.alpha * self.s * k.powf(self.alpha - 1.0) + 1.0 - self.delta) / self.divisor
    }
}

impl DynamicalSystem<f64> for SolowMap {
    fn dimension(&self) -> usize {
        1
    }

    fn apply(&self, _t: f64, x: &[f64], out: &mut [f64]) {
        out[0] = self.next(x[0]);
    }
}

/// Multiplier of the per-worker map at `k*`,
/// `(1 - delta + alpha (n + delta)) / (1 + n)`.
/// Values in (0, 1) mean monotone convergence; the gap to `k*` shrinks by
/// this factor each period.
pub fn convergence_multiplier(
    alpha: f64,
    s: f64,
    delta: f64,
    n: f64,
) -> Result<f64, SolowError> {
    let steady = solve_steady_state(alpha, s, delta, n)?;
    Ok(SolowMap::per_worker(alpha, s, delta, n).derivative(steady.k))
}
