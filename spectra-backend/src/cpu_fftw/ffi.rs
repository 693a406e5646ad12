//! Declarations of the double-precision libfftw3 interface.

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_int, c_uint, c_void};

use spectra_hal::layouts::NativeIoDim;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct fftw_plan_s {
    _unused: [u8; 0],
}
pub type fftw_plan = *mut fftw_plan_s;

pub type fftw_complex = [f64; 2];

/// `fftw_iodim` has the layout of [`NativeIoDim`].
pub type fftw_iodim = NativeIoDim;

unsafe extern "C" {
    pub unsafe fn fftw_plan_dft_1d(n: c_int, in_: *mut fftw_complex, out: *mut fftw_complex, sign: c_int, flags: c_uint) -> fftw_plan;
}
unsafe extern "C" {
    pub unsafe fn fftw_plan_dft_2d(
        n0: c_int,
        n1: c_int,
        in_: *mut fftw_complex,
        out: *mut fftw_complex,
        sign: c_int,
        flags: c_uint,
    ) -> fftw_plan;
}
unsafe extern "C" {
    pub unsafe fn fftw_plan_dft_3d(
        n0: c_int,
        n1: c_int,
        n2: c_int,
        in_: *mut fftw_complex,
        out: *mut fftw_complex,
        sign: c_int,
        flags: c_uint,
    ) -> fftw_plan;
}
unsafe extern "C" {
    pub unsafe fn fftw_plan_dft(
        rank: c_int,
        n: *const c_int,
        in_: *mut fftw_complex,
        out: *mut fftw_complex,
        sign: c_int,
        flags: c_uint,
    ) -> fftw_plan;
}

unsafe extern "C" {
    pub unsafe fn fftw_plan_dft_r2c_1d(n: c_int, in_: *mut f64, out: *mut fftw_complex, flags: c_uint) -> fftw_plan;
}
unsafe extern "C" {
    pub unsafe fn fftw_plan_dft_r2c_2d(n0: c_int, n1: c_int, in_: *mut f64, out: *mut fftw_complex, flags: c_uint) -> fftw_plan;
}
unsafe extern "C" {
    pub unsafe fn fftw_plan_dft_r2c_3d(
        n0: c_int,
        n1: c_int,
        n2: c_int,
        in_: *mut f64,
        out: *mut fftw_complex,
        flags: c_uint,
    ) -> fftw_plan;
}
unsafe extern "C" {
    pub unsafe fn fftw_plan_dft_r2c(rank: c_int, n: *const c_int, in_: *mut f64, out: *mut fftw_complex, flags: c_uint) -> fftw_plan;
}

unsafe extern "C" {
    pub unsafe fn fftw_plan_dft_c2r_1d(n: c_int, in_: *mut fftw_complex, out: *mut f64, flags: c_uint) -> fftw_plan;
}
unsafe extern "C" {
    pub unsafe fn fftw_plan_dft_c2r_2d(n0: c_int, n1: c_int, in_: *mut fftw_complex, out: *mut f64, flags: c_uint) -> fftw_plan;
}
unsafe extern "C" {
    pub unsafe fn fftw_plan_dft_c2r_3d(
        n0: c_int,
        n1: c_int,
        n2: c_int,
        in_: *mut fftw_complex,
        out: *mut f64,
        flags: c_uint,
    ) -> fftw_plan;
}
unsafe extern "C" {
    pub unsafe fn fftw_plan_dft_c2r(rank: c_int, n: *const c_int, in_: *mut fftw_complex, out: *mut f64, flags: c_uint) -> fftw_plan;
}

unsafe extern "C" {
    pub unsafe fn fftw_plan_guru_dft(
        rank: c_int,
        dims: *const fftw_iodim,
        howmany_rank: c_int,
        howmany_dims: *const fftw_iodim,
        in_: *mut fftw_complex,
        out: *mut fftw_complex,
        sign: c_int,
        flags: c_uint,
    ) -> fftw_plan;
}
unsafe extern "C" {
    pub unsafe fn fftw_plan_guru_split_dft(
        rank: c_int,
        dims: *const fftw_iodim,
        howmany_rank: c_int,
        howmany_dims: *const fftw_iodim,
        ri: *mut f64,
        ii: *mut f64,
        ro: *mut f64,
        io: *mut f64,
        flags: c_uint,
    ) -> fftw_plan;
}
unsafe extern "C" {
    pub unsafe fn fftw_plan_guru_dft_r2c(
        rank: c_int,
        dims: *const fftw_iodim,
        howmany_rank: c_int,
        howmany_dims: *const fftw_iodim,
        in_: *mut f64,
        out: *mut fftw_complex,
        flags: c_uint,
    ) -> fftw_plan;
}
unsafe extern "C" {
    pub unsafe fn fftw_plan_guru_split_dft_r2c(
        rank: c_int,
        dims: *const fftw_iodim,
        howmany_rank: c_int,
        howmany_dims: *const fftw_iodim,
        in_: *mut f64,
        ro: *mut f64,
        io: *mut f64,
        flags: c_uint,
    ) -> fftw_plan;
}
unsafe extern "C" {
    pub unsafe fn fftw_plan_guru_dft_c2r(
        rank: c_int,
        dims: *const fftw_iodim,
        howmany_rank: c_int,
        howmany_dims: *const fftw_iodim,
        in_: *mut fftw_complex,
        out: *mut f64,
        flags: c_uint,
    ) -> fftw_plan;
}
unsafe extern "C" {
    pub unsafe fn fftw_plan_guru_split_dft_c2r(
        rank: c_int,
        dims: *const fftw_iodim,
        howmany_rank: c_int,
        howmany_dims: *const fftw_iodim,
        ri: *mut f64,
        ii: *mut f64,
        out: *mut f64,
        flags: c_uint,
    ) -> fftw_plan;
}

unsafe extern "C" {
    pub unsafe fn fftw_execute(p: fftw_plan);
}
unsafe extern "C" {
    pub unsafe fn fftw_execute_dft(p: fftw_plan, in_: *mut fftw_complex, out: *mut fftw_complex);
}
unsafe extern "C" {
    pub unsafe fn fftw_execute_split_dft(p: fftw_plan, ri: *mut f64, ii: *mut f64, ro: *mut f64, io: *mut f64);
}
unsafe extern "C" {
    pub unsafe fn fftw_execute_dft_r2c(p: fftw_plan, in_: *mut f64, out: *mut fftw_complex);
}
unsafe extern "C" {
    pub unsafe fn fftw_execute_split_dft_r2c(p: fftw_plan, in_: *mut f64, ro: *mut f64, io: *mut f64);
}
unsafe extern "C" {
    pub unsafe fn fftw_execute_dft_c2r(p: fftw_plan, in_: *mut fftw_complex, out: *mut f64);
}
unsafe extern "C" {
    pub unsafe fn fftw_execute_split_dft_c2r(p: fftw_plan, ri: *mut f64, ii: *mut f64, out: *mut f64);
}
unsafe extern "C" {
    pub unsafe fn fftw_destroy_plan(p: fftw_plan);
}

unsafe extern "C" {
    pub unsafe fn fftw_cost(p: fftw_plan) -> f64;
}
unsafe extern "C" {
    pub unsafe fn fftw_estimate_cost(p: fftw_plan) -> f64;
}
unsafe extern "C" {
    pub unsafe fn fftw_flops(p: fftw_plan, add: *mut f64, mul: *mut f64, fma: *mut f64);
}
unsafe extern "C" {
    pub unsafe fn fftw_print_plan(p: fftw_plan);
}
unsafe extern "C" {
    /// Returned string is released with `free`.
    pub unsafe fn fftw_sprint_plan(p: fftw_plan) -> *mut c_char;
}
unsafe extern "C" {
    pub unsafe fn fftw_fprint_plan(p: fftw_plan, output_file: *mut libc::FILE);
}

unsafe extern "C" {
    pub unsafe fn fftw_alloc_real(n: usize) -> *mut f64;
}
unsafe extern "C" {
    pub unsafe fn fftw_alloc_complex(n: usize) -> *mut fftw_complex;
}
unsafe extern "C" {
    pub unsafe fn fftw_free(p: *mut c_void);
}
unsafe extern "C" {
    pub unsafe fn fftw_alignment_of(p: *mut f64) -> c_int;
}

unsafe extern "C" {
    pub unsafe fn fftw_set_timelimit(t: f64);
}
unsafe extern "C" {
    pub unsafe fn fftw_cleanup();
}

unsafe extern "C" {
    /// Returned string is released with `free`.
    pub unsafe fn fftw_export_wisdom_to_string() -> *mut c_char;
}
unsafe extern "C" {
    pub unsafe fn fftw_export_wisdom_to_filename(filename: *const c_char) -> c_int;
}
unsafe extern "C" {
    pub unsafe fn fftw_import_wisdom_from_string(input_string: *const c_char) -> c_int;
}
unsafe extern "C" {
    pub unsafe fn fftw_import_wisdom_from_filename(filename: *const c_char) -> c_int;
}
unsafe extern "C" {
    pub unsafe fn fftw_import_system_wisdom() -> c_int;
}
unsafe extern "C" {
    pub unsafe fn fftw_forget_wisdom();
}

#[cfg(feature = "fftw-threads")]
unsafe extern "C" {
    pub unsafe fn fftw_init_threads() -> c_int;
}
#[cfg(feature = "fftw-threads")]
unsafe extern "C" {
    pub unsafe fn fftw_plan_with_nthreads(nthreads: c_int);
}
#[cfg(feature = "fftw-threads")]
unsafe extern "C" {
    pub unsafe fn fftw_make_planner_thread_safe();
}
#[cfg(feature = "fftw-threads")]
unsafe extern "C" {
    pub unsafe fn fftw_cleanup_threads();
}
