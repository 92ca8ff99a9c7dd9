//! Model wrapper: validated parameters plus serialized result getters.

use js_sys::Float64Array;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use solow_core::model::solve_model;
use solow_core::params::{ModelParameters, PARAMETER_SPECS};
use solow_core::phase::{
    default_axis, phase_diagram, phase_diagram_with_growth, PhaseAxisSpec, PhaseKind,
};
use solow_core::steady_state::{
    solve_golden_rule, solve_steady_state, solve_steady_state_with_growth,
};
use solow_core::trajectory::{simulate, Trajectory};
use wasm_bindgen::prelude::*;

pub(crate) fn js_error(err: impl Into<anyhow::Error>) -> JsValue {
    JsValue::from_str(&format!("{:#}", err.into()))
}

pub(crate) fn serialize<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|e| JsValue::from_str(&format!("Failed to serialize {what}: {e}")))
}

pub(crate) fn build_parameters(
    alpha: f64,
    s: f64,
    delta: f64,
    n: f64,
    g: f64,
    k0: f64,
    horizon: u32,
) -> ModelParameters {
    ModelParameters {
        alpha,
        s,
        delta,
        n,
        g,
        k0,
        horizon: horizon as usize,
    }
}

#[wasm_bindgen]
pub struct WasmSolowModel {
    pub(crate) params: ModelParameters,
}

impl WasmSolowModel {
    fn trajectory_value(&self) -> anyhow::Result<Trajectory> {
        Ok(simulate(&self.params)?)
    }

    fn phase_axis(&self, kind: PhaseKind, samples: u32) -> anyhow::Result<PhaseAxisSpec> {
        let mut axis = default_axis(&self.params, kind)?;
        if samples > 0 {
            axis.samples = samples as usize;
        }
        Ok(axis)
    }
}

#[wasm_bindgen]
impl WasmSolowModel {
    #[wasm_bindgen(constructor)]
    pub fn new(
        alpha: f64,
        s: f64,
        delta: f64,
        n: f64,
        g: f64,
        k0: f64,
        horizon: u32,
    ) -> Result<WasmSolowModel, JsValue> {
        console_error_panic_hook::set_once();

        let params = build_parameters(alpha, s, delta, n, g, k0, horizon);
        params.validate().map_err(js_error)?;
        Ok(WasmSolowModel { params })
    }

    /// Builds a model from a JS object; missing fields take their defaults.
    pub fn from_object(value: JsValue) -> Result<WasmSolowModel, JsValue> {
        console_error_panic_hook::set_once();

        let params: ModelParameters = from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid parameter object: {e}")))?;
        params.validate().map_err(js_error)?;
        Ok(WasmSolowModel { params })
    }

    pub fn growth_enabled(&self) -> bool {
        self.params.growth_enabled()
    }

    pub fn horizon(&self) -> u32 {
        u32::try_from(self.params.horizon).unwrap_or(u32::MAX)
    }

    pub fn k_star(&self) -> Result<f64, JsValue> {
        let p = &self.params;
        solve_steady_state(p.alpha, p.s, p.delta, p.n)
            .map(|steady| steady.k)
            .map_err(js_error)
    }

    pub fn k_golden_rule(&self) -> Result<f64, JsValue> {
        let p = &self.params;
        solve_golden_rule(p.alpha, p.delta, p.n)
            .map(|golden| golden.k)
            .map_err(js_error)
    }

    pub fn solve(&self) -> Result<JsValue, JsValue> {
        let solution = solve_model(&self.params).map_err(js_error)?;
        serialize(&solution, "model solution")
    }

    pub fn steady_state(&self) -> Result<JsValue, JsValue> {
        let p = &self.params;
        let steady = solve_steady_state(p.alpha, p.s, p.delta, p.n).map_err(js_error)?;
        serialize(&steady, "steady state")
    }

    /// Per-effective-worker steady state, or `null` when `g = 0`.
    pub fn growth_steady_state(&self) -> Result<JsValue, JsValue> {
        let p = &self.params;
        if !p.growth_enabled() {
            return Ok(JsValue::NULL);
        }
        let steady =
            solve_steady_state_with_growth(p.alpha, p.s, p.delta, p.n, p.g).map_err(js_error)?;
        serialize(&steady, "growth steady state")
    }

    pub fn golden_rule(&self) -> Result<JsValue, JsValue> {
        let p = &self.params;
        let golden = solve_golden_rule(p.alpha, p.delta, p.n).map_err(js_error)?;
        serialize(&golden, "golden rule")
    }

    pub fn trajectory(&self) -> Result<JsValue, JsValue> {
        let trajectory = self.trajectory_value().map_err(js_error)?;
        serialize(&trajectory, "trajectory")
    }

    pub fn capital_path(&self) -> Result<Float64Array, JsValue> {
        let trajectory = self.trajectory_value().map_err(js_error)?;
        Ok(Float64Array::from(trajectory.capital_path().as_slice()))
    }

    /// Long-format `{ t, variable, value }` rows for the time-series chart.
    pub fn chart_series(&self) -> Result<JsValue, JsValue> {
        let trajectory = self.trajectory_value().map_err(js_error)?;
        serialize(&trajectory.series(), "chart series")
    }

    /// `samples = 0` keeps the default resolution.
    pub fn phase_diagram(&self, samples: u32) -> Result<JsValue, JsValue> {
        let axis = self
            .phase_axis(PhaseKind::PerWorker, samples)
            .map_err(js_error)?;
        let diagram = phase_diagram(&self.params, &axis).map_err(js_error)?;
        serialize(&diagram, "phase diagram")
    }

    pub fn growth_phase_diagram(&self, samples: u32) -> Result<JsValue, JsValue> {
        if !self.params.growth_enabled() {
            return Ok(JsValue::NULL);
        }
        let axis = self
            .phase_axis(PhaseKind::PerEffectiveWorker, samples)
            .map_err(js_error)?;
        let diagram = phase_diagram_with_growth(&self.params, &axis).map_err(js_error)?;
        serialize(&diagram, "growth phase diagram")
    }
}

/// Slider metadata for every model parameter.
#[wasm_bindgen]
pub fn parameter_specs() -> Result<JsValue, JsValue> {
    serialize(&PARAMETER_SPECS, "parameter specs")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_model(g: f64) -> WasmSolowModel {
        WasmSolowModel::new(0.3, 0.2, 0.05, 0.01, g, 1.0, 200).expect("model should build")
    }

    #[test]
    fn model_exposes_closed_form_values() {
        let model = reference_model(0.0);
        let expected = (0.2_f64 / 0.06).powf(1.0 / 0.7);
        let k_star = model.k_star().expect("k star");
        assert!((k_star - expected).abs() < 1e-12);

        let k_gr = model.k_golden_rule().expect("k golden rule");
        assert!((k_gr - (0.3_f64 / 0.06).powf(1.0 / 0.7)).abs() < 1e-12);
        assert!(!model.growth_enabled());
        assert_eq!(model.horizon(), 200);
    }

    #[test]
    fn model_keeps_validated_parameters() {
        let model = reference_model(0.02);
        assert!(model.growth_enabled());
        assert_eq!(model.params.g, 0.02);
        assert_eq!(model.params.horizon, 200);
    }

    #[test]
    fn oversized_horizon_fails_validation() {
        let params = build_parameters(0.3, 0.2, 0.05, 0.01, 0.0, 1.0, u32::MAX);
        let err = params.validate().expect_err("horizon above the cap");
        assert!(err.to_string().contains("horizon must not exceed"));
    }

    #[test]
    fn phase_axis_honours_sample_override() {
        let model = reference_model(0.0);
        let axis = model
            .phase_axis(PhaseKind::PerWorker, 0)
            .expect("default axis");
        assert_eq!(axis.samples, 200);
        let axis = model
            .phase_axis(PhaseKind::PerWorker, 25)
            .expect("custom axis");
        assert_eq!(axis.samples, 25);
    }
}
