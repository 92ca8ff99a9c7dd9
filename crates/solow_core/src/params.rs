//! Model parameters, their defaults, and domain validation.

use crate::error::SolowError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HORIZON: usize = 200;
/// Longest trajectory a single simulation will materialize.
pub const MAX_HORIZON: usize = 100_000;

/// Inputs of the Solow model. Every result is a pure function of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Capital share in production, in (0, 1).
    pub alpha: f64,
    /// Savings rate, in (0, 1).
    pub s: f64,
    pub delta: f64,
    pub n: f64,
    /// Technology growth rate; zero disables the per-effective-worker mode.
    pub g: f64,
    pub k0: f64,
    pub horizon: usize,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            s: 0.2,
            delta: 0.05,
            n: 0.01,
            g: 0.01,
            k0: 10.0,
            horizon: DEFAULT_HORIZON,
        }
    }
}

impl ModelParameters {
    pub fn growth_enabled(&self) -> bool {
        self.g > 0.0
    }

    /// Population growth plus depreciation.
    pub fn break_even_rate(&self) -> f64 {
        self.n + self.delta
    }

    /// Break-even rate per effective worker.
    pub fn effective_break_even_rate(&self) -> f64 {
        self.n + self.delta + self.g
    }

    /// Checks every parameter against the domain the formulas and the
    /// recurrence require.
    pub fn validate(&self) -> Result<(), SolowError> {
        check_capital_share(self.alpha)?;
        check_savings_rate(self.s)?;
        check_break_even(self.delta, self.n)?;
        check_rate("g", self.g)?;
        if self.growth_enabled() {
            check_positive_sum("n + delta + g", self.effective_break_even_rate())?;
        }
        check_initial_capital(self.k0)?;
        if self.horizon == 0 {
            return Err(SolowError::domain("horizon must cover at least one period."));
        }
        if self.horizon > MAX_HORIZON {
            return Err(SolowError::domain(format!(
                "horizon must not exceed {MAX_HORIZON} periods, got {}.",
                self.horizon
            )));
        }
        Ok(())
    }
}

/// Slider metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub symbol: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

/// Input ranges offered by the interactive front end. These are hints for
/// the widgets; validation only enforces the mathematical domain.
pub const PARAMETER_SPECS: [ParameterSpec; 6] = [
    ParameterSpec {
        name: "alpha",
        symbol: "α",
        min: 0.1,
        max: 0.9,
        default: 0.3,
        step: 0.01,
    },
    ParameterSpec {
        name: "s",
        symbol: "s",
        min: 0.01,
        max: 0.9,
        default: 0.2,
        step: 0.01,
    },
    ParameterSpec {
        name: "delta",
        symbol: "δ",
        min: 0.01,
        max: 0.2,
        default: 0.05,
        step: 0.01,
    },
    ParameterSpec {
        name: "n",
        symbol: "n",
        min: 0.0,
        max: 0.05,
        default: 0.01,
        step: 0.001,
    },
    ParameterSpec {
        name: "g",
        symbol: "g",
        min: 0.0,
        max: 0.05,
        default: 0.01,
        step: 0.001,
    },
    ParameterSpec {
        name: "k0",
        symbol: "k₀",
        min: 0.1,
        max: 50.0,
        default: 10.0,
        step: 0.5,
    },
];

pub(crate) fn check_capital_share(alpha: f64) -> Result<(), SolowError> {
    if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
        return Err(SolowError::domain(format!(
            "alpha must lie strictly between 0 and 1, got {alpha}."
        )));
    }
    Ok(())
}

pub(crate) fn check_savings_rate(s: f64) -> Result<(), SolowError> {
    if !s.is_finite() || s <= 0.0 || s >= 1.0 {
        return Err(SolowError::domain(format!(
            "savings rate s must lie strictly between 0 and 1, got {s}."
        )));
    }
    Ok(())
}

pub(crate) fn check_rate(name: &str, value: f64) -> Result<(), SolowError> {
    if !value.is_finite() || value < 0.0 {
        return Err(SolowError::domain(format!(
            "{name} must be finite and non-negative, got {value}."
        )));
    }
    Ok(())
}

pub(crate) fn check_positive_sum(label: &str, value: f64) -> Result<(), SolowError> {
    if value <= 0.0 {
        return Err(SolowError::domain(format!(
            "{label} must be positive, got {value}."
        )));
    }
    Ok(())
}

/// `delta <= 1` keeps `(1 - delta) * k` non-negative, so the recurrence
/// cannot leave the positive half-line.
pub(crate) fn check_break_even(delta: f64, n: f64) -> Result<(), SolowError> {
    check_rate("delta", delta)?;
    if delta > 1.0 {
        return Err(SolowError::domain(format!(
            "delta must not exceed 1, got {delta}."
        )));
    }
    check_rate("n", n)?;
    check_positive_sum("n + delta", n + delta)
}

pub(crate) fn check_initial_capital(k0: f64) -> Result<(), SolowError> {
    if !k0.is_finite() || k0 <= 0.0 {
        return Err(SolowError::InvalidInitialCondition(k0));
    }
    Ok(())
}
