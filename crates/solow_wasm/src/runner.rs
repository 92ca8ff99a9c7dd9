//! Batch-stepped trajectory runner for animating the time path.

use crate::model::{build_parameters, js_error, serialize};
use serde::Serialize;
use solow_core::trajectory::{SimulatedPeriod, TrajectorySimulator};
use wasm_bindgen::prelude::*;

/// Payload returned by each `run_steps` call.
#[derive(Serialize)]
struct TrajectoryProgress {
    done: bool,
    emitted: usize,
    horizon: usize,
    periods: Vec<SimulatedPeriod>,
}

#[wasm_bindgen]
pub struct WasmTrajectoryRunner {
    simulator: TrajectorySimulator,
}

impl WasmTrajectoryRunner {
    fn advance(&mut self, batch_size: usize) -> TrajectoryProgress {
        let periods: Vec<SimulatedPeriod> = self.simulator.by_ref().take(batch_size).collect();
        TrajectoryProgress {
            done: self.simulator.is_done(),
            emitted: self.simulator.emitted(),
            horizon: self.simulator.horizon(),
            periods,
        }
    }
}

#[wasm_bindgen]
impl WasmTrajectoryRunner {
    #[wasm_bindgen(constructor)]
    pub fn new(
        alpha: f64,
        s: f64,
        delta: f64,
        n: f64,
        g: f64,
        k0: f64,
        horizon: u32,
    ) -> Result<WasmTrajectoryRunner, JsValue> {
        console_error_panic_hook::set_once();

        let params = build_parameters(alpha, s, delta, n, g, k0, horizon);
        let simulator = TrajectorySimulator::new(&params).map_err(js_error)?;
        Ok(WasmTrajectoryRunner { simulator })
    }

    pub fn is_done(&self) -> bool {
        self.simulator.is_done()
    }

    pub fn emitted(&self) -> u32 {
        self.simulator.emitted() as u32
    }

    /// Emits up to `batch_size` further periods.
    pub fn run_steps(&mut self, batch_size: u32) -> Result<JsValue, JsValue> {
        let progress = self.advance(batch_size as usize);
        serialize(&progress, "trajectory progress")
    }
}
