//! Maps a validated request to exactly one native primitive.

use std::ptr::NonNull;

use crate::{
    layouts::{Backend, Complexity, Dimensions, Flags, GuruShape, NativeIoDim, RawOperands, Representation, Sign},
    oep::{PlanDftImpl, PlanExecuteImpl, PlanGuruImpl},
};

const REAL_TO_REAL: &str = "real-to-real requests are rejected before dispatch";

/// Picks the rank-specialised primitive for ranks 1 to 3 and the general one
/// otherwise.
///
/// # Safety
/// `ops` must satisfy the creation contract of [`PlanDftImpl`] for `dims`.
pub(super) unsafe fn create_simple<B>(
    complexity: Complexity,
    dims: &Dimensions,
    ops: RawOperands,
    sign: Sign,
    flags: Flags,
) -> *mut B::Handle
where
    B: Backend + PlanDftImpl<B>,
{
    let n: Vec<i32> = dims.to_native();
    unsafe {
        match (complexity, n.as_slice()) {
            (Complexity::ComplexToComplex, &[n0]) => B::plan_dft_1d_impl(n0, ops, sign, flags),
            (Complexity::ComplexToComplex, &[n0, n1]) => B::plan_dft_2d_impl(n0, n1, ops, sign, flags),
            (Complexity::ComplexToComplex, &[n0, n1, n2]) => B::plan_dft_3d_impl(n0, n1, n2, ops, sign, flags),
            (Complexity::ComplexToComplex, n) => B::plan_dft_impl(n, ops, sign, flags),

            (Complexity::RealToComplex, &[n0]) => B::plan_dft_r2c_1d_impl(n0, ops, flags),
            (Complexity::RealToComplex, &[n0, n1]) => B::plan_dft_r2c_2d_impl(n0, n1, ops, flags),
            (Complexity::RealToComplex, &[n0, n1, n2]) => B::plan_dft_r2c_3d_impl(n0, n1, n2, ops, flags),
            (Complexity::RealToComplex, n) => B::plan_dft_r2c_impl(n, ops, flags),

            (Complexity::ComplexToReal, &[n0]) => B::plan_dft_c2r_1d_impl(n0, ops, flags),
            (Complexity::ComplexToReal, &[n0, n1]) => B::plan_dft_c2r_2d_impl(n0, n1, ops, flags),
            (Complexity::ComplexToReal, &[n0, n1, n2]) => B::plan_dft_c2r_3d_impl(n0, n1, n2, ops, flags),
            (Complexity::ComplexToReal, n) => B::plan_dft_c2r_impl(n, ops, flags),

            (Complexity::RealToReal, _) => unreachable!("{REAL_TO_REAL}"),
        }
    }
}

/// # Safety
/// `ops` must satisfy the creation contract of [`PlanGuruImpl`] for `shape`.
pub(super) unsafe fn create_guru<B>(
    complexity: Complexity,
    representation: Representation,
    shape: &GuruShape,
    ops: RawOperands,
    sign: Sign,
    flags: Flags,
) -> *mut B::Handle
where
    B: Backend + PlanGuruImpl<B>,
{
    let dims: Vec<NativeIoDim> = shape.native_dims();
    let howmany: Vec<NativeIoDim> = shape.native_howmany();
    unsafe {
        match (complexity, representation) {
            (Complexity::ComplexToComplex, Representation::Interleaved) => {
                B::plan_guru_dft_impl(&dims, &howmany, ops, sign, flags)
            }
            (Complexity::ComplexToComplex, Representation::Split) => {
                B::plan_guru_split_dft_impl(&dims, &howmany, ops, flags)
            }
            (Complexity::RealToComplex, Representation::Interleaved) => {
                B::plan_guru_dft_r2c_impl(&dims, &howmany, ops, flags)
            }
            (Complexity::RealToComplex, Representation::Split) => {
                B::plan_guru_split_dft_r2c_impl(&dims, &howmany, ops, flags)
            }
            (Complexity::ComplexToReal, Representation::Interleaved) => {
                B::plan_guru_dft_c2r_impl(&dims, &howmany, ops, flags)
            }
            (Complexity::ComplexToReal, Representation::Split) => {
                B::plan_guru_split_dft_c2r_impl(&dims, &howmany, ops, flags)
            }
            (Complexity::RealToReal, _) => unreachable!("{REAL_TO_REAL}"),
        }
    }
}

/// # Safety
/// `handle` must be live and `ops` must match the operands it was created for.
pub(super) unsafe fn execute_new<B>(
    complexity: Complexity,
    representation: Representation,
    handle: NonNull<B::Handle>,
    ops: RawOperands,
) where
    B: Backend + PlanExecuteImpl<B>,
{
    unsafe {
        match (complexity, representation) {
            (Complexity::ComplexToComplex, Representation::Interleaved) => B::execute_dft_impl(handle, ops),
            (Complexity::ComplexToComplex, Representation::Split) => B::execute_split_dft_impl(handle, ops),
            (Complexity::RealToComplex, Representation::Interleaved) => B::execute_dft_r2c_impl(handle, ops),
            (Complexity::RealToComplex, Representation::Split) => B::execute_split_dft_r2c_impl(handle, ops),
            (Complexity::ComplexToReal, Representation::Interleaved) => B::execute_dft_c2r_impl(handle, ops),
            (Complexity::ComplexToReal, Representation::Split) => B::execute_split_dft_c2r_impl(handle, ops),
            (Complexity::RealToReal, _) => unreachable!("{REAL_TO_REAL}"),
        }
    }
}
