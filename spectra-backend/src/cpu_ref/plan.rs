use std::{fmt, fs, path::Path, ptr, ptr::NonNull};

use itertools::Itertools;
use spectra_hal::{
    error::{Error, Result},
    layouts::{Flags, Flops, IoDim, NativeIoDim, RawOperands, Sign},
    oep::{PlanDftImpl, PlanExecuteImpl, PlanGuruImpl, PlanInfoImpl},
    reference::strided::{Transform, contiguous_axes, execute_strided, transform_flops},
};

use crate::cpu_ref::{FFTRef, engine::state};

/// Plan of the reference engine: the transform, its strided geometry and the
/// operands bound at creation.
pub struct RefPlan {
    transform: Transform,
    dims: Vec<IoDim>,
    howmany: Vec<IoDim>,
    ops: RawOperands,
    flags: Flags,
}

impl RefPlan {
    /// Allocates a plan, or returns null if the planner refuses `flags`.
    fn create(transform: Transform, dims: Vec<IoDim>, howmany: Vec<IoDim>, ops: RawOperands, flags: Flags) -> *mut RefPlan {
        let plan: RefPlan = RefPlan {
            transform,
            dims,
            howmany,
            ops,
            flags,
        };
        if !state().admit(&plan.problem(), flags) {
            return ptr::null_mut();
        }
        Box::into_raw(Box::new(plan))
    }

    fn contiguous(transform: Transform, n: &[i32], ops: RawOperands, flags: Flags) -> *mut RefPlan {
        let extents: Vec<usize> = n.iter().map(|&n| n as usize).collect();
        Self::create(transform, contiguous_axes(transform, &extents), Vec::new(), ops, flags)
    }

    fn guru(transform: Transform, dims: &[NativeIoDim], howmany: &[NativeIoDim], ops: RawOperands, flags: Flags) -> *mut RefPlan {
        Self::create(
            transform,
            dims.iter().copied().map(IoDim::from).collect(),
            howmany.iter().copied().map(IoDim::from).collect(),
            ops,
            flags,
        )
    }

    /// Wisdom key: the transform and its geometry, flags excluded.
    fn problem(&self) -> String {
        let kind: &str = match self.transform {
            Transform::Complex(Sign::Negative) => "c2c-forward",
            Transform::Complex(Sign::Positive) => "c2c-backward",
            Transform::RealToComplex => "r2c",
            Transform::ComplexToReal => "c2r",
        };
        let axes = |axes: &[IoDim]| axes.iter().map(|d| format!("{}:{}:{}", d.n, d.is, d.os)).join(" ");
        if self.howmany.is_empty() {
            format!("{kind} {}", axes(&self.dims))
        } else {
            format!("{kind} {} / {}", axes(&self.dims), axes(&self.howmany))
        }
    }

    fn flops(&self) -> Flops {
        transform_flops(self.transform, &self.dims, &self.howmany)
    }

    unsafe fn run(&self, ops: RawOperands) {
        unsafe { execute_strided(self.transform, &self.dims, &self.howmany, ops) }
    }
}

impl fmt::Display for RefPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flops: Flops = self.flops();
        write!(
            f,
            "(fft-ref {} :flags {:#x} :flops (add {} mul {} fma {}))",
            self.problem(),
            self.flags.bits(),
            flops.add,
            flops.mul,
            flops.fma
        )
    }
}

fn complex(sign: Sign) -> Transform {
    Transform::Complex(sign)
}

unsafe impl PlanDftImpl<Self> for FFTRef {
    unsafe fn plan_dft_1d_impl(n: i32, ops: RawOperands, sign: Sign, flags: Flags) -> *mut RefPlan {
        RefPlan::contiguous(complex(sign), &[n], ops, flags)
    }

    unsafe fn plan_dft_2d_impl(n0: i32, n1: i32, ops: RawOperands, sign: Sign, flags: Flags) -> *mut RefPlan {
        RefPlan::contiguous(complex(sign), &[n0, n1], ops, flags)
    }

    unsafe fn plan_dft_3d_impl(n0: i32, n1: i32, n2: i32, ops: RawOperands, sign: Sign, flags: Flags) -> *mut RefPlan {
        RefPlan::contiguous(complex(sign), &[n0, n1, n2], ops, flags)
    }

    unsafe fn plan_dft_impl(dims: &[i32], ops: RawOperands, sign: Sign, flags: Flags) -> *mut RefPlan {
        RefPlan::contiguous(complex(sign), dims, ops, flags)
    }

    unsafe fn plan_dft_r2c_1d_impl(n: i32, ops: RawOperands, flags: Flags) -> *mut RefPlan {
        RefPlan::contiguous(Transform::RealToComplex, &[n], ops, flags)
    }

    unsafe fn plan_dft_r2c_2d_impl(n0: i32, n1: i32, ops: RawOperands, flags: Flags) -> *mut RefPlan {
        RefPlan::contiguous(Transform::RealToComplex, &[n0, n1], ops, flags)
    }

    unsafe fn plan_dft_r2c_3d_impl(n0: i32, n1: i32, n2: i32, ops: RawOperands, flags: Flags) -> *mut RefPlan {
        RefPlan::contiguous(Transform::RealToComplex, &[n0, n1, n2], ops, flags)
    }

    unsafe fn plan_dft_r2c_impl(dims: &[i32], ops: RawOperands, flags: Flags) -> *mut RefPlan {
        RefPlan::contiguous(Transform::RealToComplex, dims, ops, flags)
    }

    unsafe fn plan_dft_c2r_1d_impl(n: i32, ops: RawOperands, flags: Flags) -> *mut RefPlan {
        RefPlan::contiguous(Transform::ComplexToReal, &[n], ops, flags)
    }

    unsafe fn plan_dft_c2r_2d_impl(n0: i32, n1: i32, ops: RawOperands, flags: Flags) -> *mut RefPlan {
        RefPlan::contiguous(Transform::ComplexToReal, &[n0, n1], ops, flags)
    }

    unsafe fn plan_dft_c2r_3d_impl(n0: i32, n1: i32, n2: i32, ops: RawOperands, flags: Flags) -> *mut RefPlan {
        RefPlan::contiguous(Transform::ComplexToReal, &[n0, n1, n2], ops, flags)
    }

    unsafe fn plan_dft_c2r_impl(dims: &[i32], ops: RawOperands, flags: Flags) -> *mut RefPlan {
        RefPlan::contiguous(Transform::ComplexToReal, dims, ops, flags)
    }
}

/// Interleaved and split operands only differ in whether `im` is null, which
/// [`execute_strided`] handles itself.
unsafe impl PlanGuruImpl<Self> for FFTRef {
    unsafe fn plan_guru_dft_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        sign: Sign,
        flags: Flags,
    ) -> *mut RefPlan {
        RefPlan::guru(complex(sign), dims, howmany, ops, flags)
    }

    unsafe fn plan_guru_split_dft_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> *mut RefPlan {
        RefPlan::guru(complex(Sign::FORWARD), dims, howmany, ops, flags)
    }

    unsafe fn plan_guru_dft_r2c_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> *mut RefPlan {
        RefPlan::guru(Transform::RealToComplex, dims, howmany, ops, flags)
    }

    unsafe fn plan_guru_split_dft_r2c_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> *mut RefPlan {
        RefPlan::guru(Transform::RealToComplex, dims, howmany, ops, flags)
    }

    unsafe fn plan_guru_dft_c2r_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> *mut RefPlan {
        RefPlan::guru(Transform::ComplexToReal, dims, howmany, ops, flags)
    }

    unsafe fn plan_guru_split_dft_c2r_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> *mut RefPlan {
        RefPlan::guru(Transform::ComplexToReal, dims, howmany, ops, flags)
    }
}

unsafe impl PlanExecuteImpl<Self> for FFTRef {
    unsafe fn execute_impl(handle: NonNull<RefPlan>) {
        unsafe {
            let plan: &RefPlan = handle.as_ref();
            plan.run(plan.ops)
        }
    }

    unsafe fn execute_dft_impl(handle: NonNull<RefPlan>, ops: RawOperands) {
        unsafe { handle.as_ref().run(ops) }
    }

    unsafe fn execute_dft_r2c_impl(handle: NonNull<RefPlan>, ops: RawOperands) {
        unsafe { handle.as_ref().run(ops) }
    }

    unsafe fn execute_dft_c2r_impl(handle: NonNull<RefPlan>, ops: RawOperands) {
        unsafe { handle.as_ref().run(ops) }
    }

    unsafe fn execute_split_dft_impl(handle: NonNull<RefPlan>, ops: RawOperands) {
        unsafe { handle.as_ref().run(ops) }
    }

    unsafe fn execute_split_dft_r2c_impl(handle: NonNull<RefPlan>, ops: RawOperands) {
        unsafe { handle.as_ref().run(ops) }
    }

    unsafe fn execute_split_dft_c2r_impl(handle: NonNull<RefPlan>, ops: RawOperands) {
        unsafe { handle.as_ref().run(ops) }
    }
}

unsafe impl PlanInfoImpl<Self> for FFTRef {
    /// Zero unless the planner measured, as for a native engine.
    unsafe fn cost_impl(handle: NonNull<RefPlan>) -> f64 {
        let plan: &RefPlan = unsafe { handle.as_ref() };
        if plan.flags.measures() { plan.flops().total() } else { 0.0 }
    }

    unsafe fn estimate_cost_impl(handle: NonNull<RefPlan>) -> f64 {
        unsafe { handle.as_ref() }.flops().total()
    }

    unsafe fn flops_impl(handle: NonNull<RefPlan>) -> Flops {
        unsafe { handle.as_ref() }.flops()
    }

    unsafe fn print_impl(handle: NonNull<RefPlan>) {
        println!("{}", unsafe { handle.as_ref() });
    }

    unsafe fn sprint_impl(handle: NonNull<RefPlan>) -> String {
        unsafe { handle.as_ref() }.to_string()
    }

    unsafe fn fprint_impl(handle: NonNull<RefPlan>, path: &Path) -> Result<()> {
        let text: String = unsafe { handle.as_ref() }.to_string();
        fs::write(path, text).map_err(|e| Error::io(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use spectra_hal::layouts::{Complexity, RawSignal};

    use super::*;

    fn no_operands() -> RawOperands {
        let signal: RawSignal = RawSignal {
            re: ptr::null_mut(),
            im: ptr::null_mut(),
            size: 0,
        };
        RawOperands {
            input: signal,
            output: signal,
        }
    }

    #[test]
    fn problem_names_transform_and_axes() {
        let plan: RefPlan = RefPlan {
            transform: Transform::RealToComplex,
            dims: vec![IoDim::new(8, 1, 1)],
            howmany: vec![IoDim::new(3, 8, 5)],
            ops: no_operands(),
            flags: Flags::ESTIMATE,
        };
        assert_eq!(plan.problem(), "r2c 8:1:1 / 3:8:5");
        assert_eq!(plan.transform.complexity(), Complexity::RealToComplex);
        assert!(plan.to_string().starts_with("(fft-ref r2c 8:1:1 / 3:8:5 :flags 0x40"));
    }

    #[test]
    fn contiguous_plans_use_row_major_strides() {
        let handle: *mut RefPlan = RefPlan::contiguous(complex(Sign::BACKWARD), &[2, 3], no_operands(), Flags::ESTIMATE);
        let plan: Box<RefPlan> = unsafe { Box::from_raw(handle) };
        assert_eq!(plan.problem(), "c2c-backward 2:3:3 3:1:1");
        assert!(plan.howmany.is_empty());
    }
}
