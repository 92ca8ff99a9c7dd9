pub mod error;
pub mod model;
pub mod params;
pub mod phase;
pub mod solvers;
pub mod steady_state;
pub mod trajectory;
/// The `solow_core` crate is the numeric engine behind the interactive Solow
/// growth model explorer.
///
/// Key components:
/// - **Traits**: `Scalar`, `DynamicalSystem` (discrete maps), `Steppable` (steppers).
/// - **Steady state**: closed-form steady-state and golden-rule solutions, and the
///   `SolowMap` capital transition.
/// - **Trajectory**: fixed-horizon simulation with and without technology growth.
/// - **Phase**: investment and break-even curves for phase diagrams.
/// - **Model**: one call recomputing every result from `ModelParameters`.
pub mod traits;

pub use error::SolowError;
pub use model::{solve_model, ModelSolution};
pub use params::{ModelParameters, ParameterSpec, PARAMETER_SPECS};
pub use steady_state::{solve_golden_rule, solve_steady_state, solve_steady_state_with_growth};
pub use trajectory::{simulate, Trajectory, TrajectorySimulator};
