use std::{
    ffi::{CStr, CString},
    os::raw::c_int,
    path::Path,
    ptr::NonNull,
};

use spectra_hal::{
    error::{Error, Result},
    layouts::{Flags, Flops, NativeIoDim, RawOperands, RawSignal, Sign},
    oep::{PlanDftImpl, PlanExecuteImpl, PlanGuruImpl, PlanInfoImpl},
};

use crate::cpu_fftw::{
    FFTW,
    ffi::{self, fftw_complex, fftw_plan, fftw_plan_s},
    planner,
};

#[inline(always)]
fn cplx(signal: RawSignal) -> *mut fftw_complex {
    signal.re.cast::<fftw_complex>()
}

#[inline(always)]
fn rank(axes: &[NativeIoDim]) -> c_int {
    axes.len() as c_int
}

unsafe impl PlanDftImpl<Self> for FFTW {
    unsafe fn plan_dft_1d_impl(n: i32, ops: RawOperands, sign: Sign, flags: Flags) -> fftw_plan {
        let _planner = planner();
        unsafe { ffi::fftw_plan_dft_1d(n, cplx(ops.input), cplx(ops.output), sign.value(), flags.bits()) }
    }

    unsafe fn plan_dft_2d_impl(n0: i32, n1: i32, ops: RawOperands, sign: Sign, flags: Flags) -> fftw_plan {
        let _planner = planner();
        unsafe { ffi::fftw_plan_dft_2d(n0, n1, cplx(ops.input), cplx(ops.output), sign.value(), flags.bits()) }
    }

    unsafe fn plan_dft_3d_impl(n0: i32, n1: i32, n2: i32, ops: RawOperands, sign: Sign, flags: Flags) -> fftw_plan {
        let _planner = planner();
        unsafe { ffi::fftw_plan_dft_3d(n0, n1, n2, cplx(ops.input), cplx(ops.output), sign.value(), flags.bits()) }
    }

    unsafe fn plan_dft_impl(dims: &[i32], ops: RawOperands, sign: Sign, flags: Flags) -> fftw_plan {
        let _planner = planner();
        unsafe {
            ffi::fftw_plan_dft(
                dims.len() as c_int,
                dims.as_ptr(),
                cplx(ops.input),
                cplx(ops.output),
                sign.value(),
                flags.bits(),
            )
        }
    }

    unsafe fn plan_dft_r2c_1d_impl(n: i32, ops: RawOperands, flags: Flags) -> fftw_plan {
        let _planner = planner();
        unsafe { ffi::fftw_plan_dft_r2c_1d(n, ops.input.re, cplx(ops.output), flags.bits()) }
    }

    unsafe fn plan_dft_r2c_2d_impl(n0: i32, n1: i32, ops: RawOperands, flags: Flags) -> fftw_plan {
        let _planner = planner();
        unsafe { ffi::fftw_plan_dft_r2c_2d(n0, n1, ops.input.re, cplx(ops.output), flags.bits()) }
    }

    unsafe fn plan_dft_r2c_3d_impl(n0: i32, n1: i32, n2: i32, ops: RawOperands, flags: Flags) -> fftw_plan {
        let _planner = planner();
        unsafe { ffi::fftw_plan_dft_r2c_3d(n0, n1, n2, ops.input.re, cplx(ops.output), flags.bits()) }
    }

    unsafe fn plan_dft_r2c_impl(dims: &[i32], ops: RawOperands, flags: Flags) -> fftw_plan {
        let _planner = planner();
        unsafe {
            ffi::fftw_plan_dft_r2c(
                dims.len() as c_int,
                dims.as_ptr(),
                ops.input.re,
                cplx(ops.output),
                flags.bits(),
            )
        }
    }

    unsafe fn plan_dft_c2r_1d_impl(n: i32, ops: RawOperands, flags: Flags) -> fftw_plan {
        let _planner = planner();
        unsafe { ffi::fftw_plan_dft_c2r_1d(n, cplx(ops.input), ops.output.re, flags.bits()) }
    }

    unsafe fn plan_dft_c2r_2d_impl(n0: i32, n1: i32, ops: RawOperands, flags: Flags) -> fftw_plan {
        let _planner = planner();
        unsafe { ffi::fftw_plan_dft_c2r_2d(n0, n1, cplx(ops.input), ops.output.re, flags.bits()) }
    }

    unsafe fn plan_dft_c2r_3d_impl(n0: i32, n1: i32, n2: i32, ops: RawOperands, flags: Flags) -> fftw_plan {
        let _planner = planner();
        unsafe { ffi::fftw_plan_dft_c2r_3d(n0, n1, n2, cplx(ops.input), ops.output.re, flags.bits()) }
    }

    unsafe fn plan_dft_c2r_impl(dims: &[i32], ops: RawOperands, flags: Flags) -> fftw_plan {
        let _planner = planner();
        unsafe {
            ffi::fftw_plan_dft_c2r(
                dims.len() as c_int,
                dims.as_ptr(),
                cplx(ops.input),
                ops.output.re,
                flags.bits(),
            )
        }
    }
}

unsafe impl PlanGuruImpl<Self> for FFTW {
    unsafe fn plan_guru_dft_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        sign: Sign,
        flags: Flags,
    ) -> fftw_plan {
        let _planner = planner();
        unsafe {
            ffi::fftw_plan_guru_dft(
                rank(dims),
                dims.as_ptr(),
                rank(howmany),
                howmany.as_ptr(),
                cplx(ops.input),
                cplx(ops.output),
                sign.value(),
                flags.bits(),
            )
        }
    }

    unsafe fn plan_guru_split_dft_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> fftw_plan {
        let _planner = planner();
        unsafe {
            ffi::fftw_plan_guru_split_dft(
                rank(dims),
                dims.as_ptr(),
                rank(howmany),
                howmany.as_ptr(),
                ops.input.re,
                ops.input.im,
                ops.output.re,
                ops.output.im,
                flags.bits(),
            )
        }
    }

    unsafe fn plan_guru_dft_r2c_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> fftw_plan {
        let _planner = planner();
        unsafe {
            ffi::fftw_plan_guru_dft_r2c(
                rank(dims),
                dims.as_ptr(),
                rank(howmany),
                howmany.as_ptr(),
                ops.input.re,
                cplx(ops.output),
                flags.bits(),
            )
        }
    }

    unsafe fn plan_guru_split_dft_r2c_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> fftw_plan {
        let _planner = planner();
        unsafe {
            ffi::fftw_plan_guru_split_dft_r2c(
                rank(dims),
                dims.as_ptr(),
                rank(howmany),
                howmany.as_ptr(),
                ops.input.re,
                ops.output.re,
                ops.output.im,
                flags.bits(),
            )
        }
    }

    unsafe fn plan_guru_dft_c2r_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> fftw_plan {
        let _planner = planner();
        unsafe {
            ffi::fftw_plan_guru_dft_c2r(
                rank(dims),
                dims.as_ptr(),
                rank(howmany),
                howmany.as_ptr(),
                cplx(ops.input),
                ops.output.re,
                flags.bits(),
            )
        }
    }

    unsafe fn plan_guru_split_dft_c2r_impl(
        dims: &[NativeIoDim],
        howmany: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> fftw_plan {
        let _planner = planner();
        unsafe {
            ffi::fftw_plan_guru_split_dft_c2r(
                rank(dims),
                dims.as_ptr(),
                rank(howmany),
                howmany.as_ptr(),
                ops.input.re,
                ops.input.im,
                ops.output.re,
                flags.bits(),
            )
        }
    }
}

/// The execute family is the thread-safe part of libfftw3: no planner lock.
unsafe impl PlanExecuteImpl<Self> for FFTW {
    const FIXED_PLANE_GAP: bool = true;

    unsafe fn execute_impl(handle: NonNull<fftw_plan_s>) {
        unsafe { ffi::fftw_execute(handle.as_ptr()) }
    }

    unsafe fn execute_dft_impl(handle: NonNull<fftw_plan_s>, ops: RawOperands) {
        unsafe { ffi::fftw_execute_dft(handle.as_ptr(), cplx(ops.input), cplx(ops.output)) }
    }

    unsafe fn execute_dft_r2c_impl(handle: NonNull<fftw_plan_s>, ops: RawOperands) {
        unsafe { ffi::fftw_execute_dft_r2c(handle.as_ptr(), ops.input.re, cplx(ops.output)) }
    }

    unsafe fn execute_dft_c2r_impl(handle: NonNull<fftw_plan_s>, ops: RawOperands) {
        unsafe { ffi::fftw_execute_dft_c2r(handle.as_ptr(), cplx(ops.input), ops.output.re) }
    }

    unsafe fn execute_split_dft_impl(handle: NonNull<fftw_plan_s>, ops: RawOperands) {
        unsafe {
            ffi::fftw_execute_split_dft(
                handle.as_ptr(),
                ops.input.re,
                ops.input.im,
                ops.output.re,
                ops.output.im,
            )
        }
    }

    unsafe fn execute_split_dft_r2c_impl(handle: NonNull<fftw_plan_s>, ops: RawOperands) {
        unsafe { ffi::fftw_execute_split_dft_r2c(handle.as_ptr(), ops.input.re, ops.output.re, ops.output.im) }
    }

    unsafe fn execute_split_dft_c2r_impl(handle: NonNull<fftw_plan_s>, ops: RawOperands) {
        unsafe { ffi::fftw_execute_split_dft_c2r(handle.as_ptr(), ops.input.re, ops.input.im, ops.output.re) }
    }
}

/// Takes ownership of a string allocated by libfftw3.
///
/// # Safety
/// `raw` must be null or a NUL-terminated string allocated with `malloc`.
pub(crate) unsafe fn take_c_string(raw: *mut std::os::raw::c_char) -> Option<String> {
    if raw.is_null() {
        return None;
    }
    unsafe {
        let text: String = CStr::from_ptr(raw).to_string_lossy().into_owned();
        libc::free(raw.cast());
        Some(text)
    }
}

/// NUL-terminated copy of `path`, `None` if it contains an interior NUL.
pub(crate) fn c_path(path: &Path) -> Option<CString> {
    CString::new(path.as_os_str().as_encoded_bytes()).ok()
}

unsafe impl PlanInfoImpl<Self> for FFTW {
    unsafe fn cost_impl(handle: NonNull<fftw_plan_s>) -> f64 {
        let _planner = planner();
        unsafe { ffi::fftw_cost(handle.as_ptr()) }
    }

    unsafe fn estimate_cost_impl(handle: NonNull<fftw_plan_s>) -> f64 {
        let _planner = planner();
        unsafe { ffi::fftw_estimate_cost(handle.as_ptr()) }
    }

    unsafe fn flops_impl(handle: NonNull<fftw_plan_s>) -> Flops {
        let mut flops: Flops = Flops::default();
        let _planner = planner();
        unsafe { ffi::fftw_flops(handle.as_ptr(), &mut flops.add, &mut flops.mul, &mut flops.fma) };
        flops
    }

    unsafe fn print_impl(handle: NonNull<fftw_plan_s>) {
        let _planner = planner();
        unsafe { ffi::fftw_print_plan(handle.as_ptr()) }
    }

    unsafe fn sprint_impl(handle: NonNull<fftw_plan_s>) -> String {
        let _planner = planner();
        unsafe { take_c_string(ffi::fftw_sprint_plan(handle.as_ptr())) }.unwrap_or_default()
    }

    unsafe fn fprint_impl(handle: NonNull<fftw_plan_s>, path: &Path) -> Result<()> {
        let context = || path.display().to_string();
        let name: CString = c_path(path).ok_or_else(|| {
            Error::io(
                context(),
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "path contains a NUL byte"),
            )
        })?;
        unsafe {
            let file: *mut libc::FILE = libc::fopen(name.as_ptr(), c"w".as_ptr());
            if file.is_null() {
                return Err(Error::io(context(), std::io::Error::last_os_error()));
            }
            {
                let _planner = planner();
                ffi::fftw_fprint_plan(handle.as_ptr(), file);
            }
            if libc::fclose(file) != 0 {
                return Err(Error::io(context(), std::io::Error::last_os_error()));
            }
        }
        Ok(())
    }
}
