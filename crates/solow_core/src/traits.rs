use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// Floating-point type the capital recurrence runs in.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// A discrete-time dynamical system `x_{t+1} = f(x_t)`.
pub trait DynamicalSystem<T: Scalar> {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// Writes the next state into `out`. For the capital recurrence the
    /// state is the single entry `k_t` and `out[0]` becomes `k_{t+1}`.
    fn apply(&self, t: T, x: &[T], out: &mut [T]);
}

/// A trait for steppers that advance a system by one period.
pub trait Steppable<T: Scalar> {
    /// Advances `state` by one period and moves `t` forward by `dt`.
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T);
}
