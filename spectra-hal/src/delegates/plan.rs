use std::{fmt, path::Path, ptr::NonNull};

use crate::{
    api::{PlanExecute, PlanGuruNew, PlanInfo, PlanNew},
    error::Result,
    layouts::{Backend, Dimensions, Engine, Flags, Flops, GuruShape, Operands, OperandsMut, Plan, Sign},
    oep::{AlignmentOfImpl, PlanDftImpl, PlanExecuteImpl, PlanGuruImpl, PlanInfoImpl},
    planning,
};

impl<B> PlanNew<B> for Engine<B>
where
    B: Backend + PlanDftImpl<B> + AlignmentOfImpl<B>,
{
    fn plan(&self, operands: Operands, sign: Sign, flags: Flags, dims: Option<Dimensions>) -> Result<Plan<B>> {
        planning::plan_simple(operands, sign, flags, dims)
    }
}

impl<B> PlanGuruNew<B> for Engine<B>
where
    B: Backend + PlanGuruImpl<B> + AlignmentOfImpl<B>,
{
    fn plan_guru(&self, shape: GuruShape, operands: Operands, sign: Sign, flags: Flags) -> Result<Plan<B>> {
        planning::plan_guru(shape, operands, sign, flags)
    }
}

impl<B> PlanExecute<B> for Plan<B>
where
    B: Backend + PlanExecuteImpl<B> + AlignmentOfImpl<B>,
{
    fn execute(&mut self) -> Result<()> {
        planning::execute(self)
    }

    fn execute_with(&self, operands: OperandsMut<'_>) -> Result<()> {
        planning::execute_with(self, operands)
    }
}

impl<B> PlanInfo<B> for Plan<B>
where
    B: Backend + PlanInfoImpl<B>,
{
    fn cost(&self) -> Result<f64> {
        let handle: NonNull<B::Handle> = self.live_handle()?;
        Ok(unsafe { B::cost_impl(handle) })
    }

    fn estimate_cost(&self) -> Result<f64> {
        let handle: NonNull<B::Handle> = self.live_handle()?;
        Ok(unsafe { B::estimate_cost_impl(handle) })
    }

    fn flops(&self) -> Result<Flops> {
        let handle: NonNull<B::Handle> = self.live_handle()?;
        Ok(unsafe { B::flops_impl(handle) })
    }

    fn print(&self) -> Result<()> {
        let handle: NonNull<B::Handle> = self.live_handle()?;
        unsafe { B::print_impl(handle) };
        Ok(())
    }

    fn sprint(&self) -> Result<String> {
        let handle: NonNull<B::Handle> = self.live_handle()?;
        Ok(unsafe { B::sprint_impl(handle) })
    }

    fn fprint(&self, path: &Path) -> Result<()> {
        let handle: NonNull<B::Handle> = self.live_handle()?;
        unsafe { B::fprint_impl(handle, path) }
    }
}

impl<B> fmt::Display for Plan<B>
where
    B: Backend + PlanInfoImpl<B>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.handle {
            Some(handle) => write!(f, "{}", unsafe { B::sprint_impl(handle) }),
            None => write!(f, "destroyed plan"),
        }
    }
}
