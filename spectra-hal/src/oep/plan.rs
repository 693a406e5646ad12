//! Extension points for plan creation, execution and introspection.

use std::{path::Path, ptr::NonNull};

use crate::{
    error::Result,
    layouts::{Backend, Flags, Flops, NativeIoDim, RawOperands, Sign},
};

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `spectra-backend/src/cpu_ref/plan.rs` for the reference implementation.
/// * See [crate::api::PlanNew] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
///
/// Rank-specialised creation of contiguous transforms. Extents are row-major,
/// `ops` carries interleaved operands only. Every function returns a null
/// pointer if the engine cannot produce a plan.
pub unsafe trait PlanDftImpl<B: Backend> {
    unsafe fn plan_dft_1d_impl(n: i32, ops: RawOperands, sign: Sign, flags: Flags) -> *mut B::Handle;
    unsafe fn plan_dft_2d_impl(n0: i32, n1: i32, ops: RawOperands, sign: Sign, flags: Flags) -> *mut B::Handle;
    unsafe fn plan_dft_3d_impl(n0: i32, n1: i32, n2: i32, ops: RawOperands, sign: Sign, flags: Flags)
    -> *mut B::Handle;
    unsafe fn plan_dft_impl(dims: &[i32], ops: RawOperands, sign: Sign, flags: Flags) -> *mut B::Handle;

    unsafe fn plan_dft_r2c_1d_impl(n: i32, ops: RawOperands, flags: Flags) -> *mut B::Handle;
    unsafe fn plan_dft_r2c_2d_impl(n0: i32, n1: i32, ops: RawOperands, flags: Flags) -> *mut B::Handle;
    unsafe fn plan_dft_r2c_3d_impl(n0: i32, n1: i32, n2: i32, ops: RawOperands, flags: Flags) -> *mut B::Handle;
    unsafe fn plan_dft_r2c_impl(dims: &[i32], ops: RawOperands, flags: Flags) -> *mut B::Handle;

    unsafe fn plan_dft_c2r_1d_impl(n: i32, ops: RawOperands, flags: Flags) -> *mut B::Handle;
    unsafe fn plan_dft_c2r_2d_impl(n0: i32, n1: i32, ops: RawOperands, flags: Flags) -> *mut B::Handle;
    unsafe fn plan_dft_c2r_3d_impl(n0: i32, n1: i32, n2: i32, ops: RawOperands, flags: Flags) -> *mut B::Handle;
    unsafe fn plan_dft_c2r_impl(dims: &[i32], ops: RawOperands, flags: Flags) -> *mut B::Handle;
}

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `spectra-backend/src/cpu_ref/plan.rs` for the reference implementation.
/// * See [crate::api::PlanGuruNew] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
///
/// Strided creation. The `split` variants read the real and imaginary planes
/// from [`RawSignal::re`](crate::layouts::RawSignal) and
/// [`RawSignal::im`](crate::layouts::RawSignal) and always compute the
/// forward (negative sign) transform.
pub unsafe trait PlanGuruImpl<B: Backend> {
    unsafe fn plan_guru_dft_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        sign: Sign,
        flags: Flags,
    ) -> *mut B::Handle;
    unsafe fn plan_guru_split_dft_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> *mut B::Handle;
    unsafe fn plan_guru_dft_r2c_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> *mut B::Handle;
    unsafe fn plan_guru_split_dft_r2c_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> *mut B::Handle;
    unsafe fn plan_guru_dft_c2r_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> *mut B::Handle;
    unsafe fn plan_guru_split_dft_c2r_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> *mut B::Handle;
}

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `spectra-backend/src/cpu_ref/plan.rs` for the reference implementation.
/// * See [crate::api::PlanExecute] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
///
/// `execute_impl` runs on the operands bound at creation. The new-array
/// variants may be called concurrently on the same handle with disjoint
/// operands.
pub unsafe trait PlanExecuteImpl<B: Backend> {
    /// The split new-array variants address each imaginary plane at the byte
    /// offset from its real plane recorded at creation.
    const FIXED_PLANE_GAP: bool = false;

    unsafe fn execute_impl(handle: NonNull<B::Handle>);
    unsafe fn execute_dft_impl(handle: NonNull<B::Handle>, ops: RawOperands);
    unsafe fn execute_dft_r2c_impl(handle: NonNull<B::Handle>, ops: RawOperands);
    unsafe fn execute_dft_c2r_impl(handle: NonNull<B::Handle>, ops: RawOperands);
    unsafe fn execute_split_dft_impl(handle: NonNull<B::Handle>, ops: RawOperands);
    unsafe fn execute_split_dft_r2c_impl(handle: NonNull<B::Handle>, ops: RawOperands);
    unsafe fn execute_split_dft_c2r_impl(handle: NonNull<B::Handle>, ops: RawOperands);
}

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `spectra-backend/src/cpu_ref/plan.rs` for the reference implementation.
/// * See [crate::api::PlanInfo] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
pub unsafe trait PlanInfoImpl<B: Backend> {
    unsafe fn cost_impl(handle: NonNull<B::Handle>) -> f64;
    unsafe fn estimate_cost_impl(handle: NonNull<B::Handle>) -> f64;
    unsafe fn flops_impl(handle: NonNull<B::Handle>) -> Flops;
    unsafe fn print_impl(handle: NonNull<B::Handle>);
    unsafe fn sprint_impl(handle: NonNull<B::Handle>) -> String;
    unsafe fn fprint_impl(handle: NonNull<B::Handle>, path: &Path) -> Result<()>;
}
