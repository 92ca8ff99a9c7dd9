//! WASM bindings exposing the Solow model core to the browser front end.

mod model;
mod runner;

pub use model::{parameter_specs, WasmSolowModel};
pub use runner::WasmTrajectoryRunner;
