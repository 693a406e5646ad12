use std::path::Path;

use crate::{
    error::Result,
    layouts::{Backend, Dimensions, Flags, Flops, GuruShape, Operands, OperandsMut, Plan, Sign},
};

/// Creates a contiguous transform plan.
///
/// Complexity and placement are derived from `operands`. When `dims` is
/// `None` the transform is one-dimensional over the input's size. Operands
/// must be interleaved; use [`PlanGuruNew`] for split operands.
pub trait PlanNew<B: Backend> {
    fn plan(&self, operands: Operands, sign: Sign, flags: Flags, dims: Option<Dimensions>) -> Result<Plan<B>>;
}

/// Creates a strided, optionally batched, plan from explicit axis descriptors.
///
/// Accepts interleaved and split operands. For split complex-to-complex
/// plans, [`Sign::Positive`] is realised by exchanging the real and imaginary
/// planes of both operands.
pub trait PlanGuruNew<B: Backend> {
    fn plan_guru(&self, shape: GuruShape, operands: Operands, sign: Sign, flags: Flags) -> Result<Plan<B>>;
}

/// Executes a plan.
pub trait PlanExecute<B: Backend> {
    /// Runs the transform on the bound operands.
    fn execute(&mut self) -> Result<()>;

    /// Runs the transform on `operands`, which must match the plan's
    /// complexity, representation, sizes, placement and, unless
    /// [`Flags::UNALIGNED`] was given, alignment.
    fn execute_with(&self, operands: OperandsMut<'_>) -> Result<()>;
}

/// Engine-side information about a live plan.
pub trait PlanInfo<B: Backend> {
    /// Measured cost; zero if the planner did not measure.
    fn cost(&self) -> Result<f64>;
    fn estimate_cost(&self) -> Result<f64>;
    fn flops(&self) -> Result<Flops>;
    /// Prints the native description to standard output.
    fn print(&self) -> Result<()>;
    fn sprint(&self) -> Result<String>;
    fn fprint(&self, path: &Path) -> Result<()>;
}
