#[cfg(feature = "fftw-threads")]
use std::sync::atomic::{AtomicBool, Ordering};

use spectra_hal::oep::EngineInitImpl;

use crate::cpu_fftw::{FFTW, ffi, planner};

#[cfg(feature = "fftw-threads")]
static THREADS_READY: AtomicBool = AtomicBool::new(false);

unsafe impl EngineInitImpl<Self> for FFTW {
    #[cfg(feature = "fftw-threads")]
    fn init_threads_impl() -> bool {
        let _planner = planner();
        if THREADS_READY.load(Ordering::Acquire) {
            return true;
        }
        let ok: bool = unsafe { ffi::fftw_init_threads() } != 0;
        THREADS_READY.store(ok, Ordering::Release);
        ok
    }

    /// Built without `fftw-threads`: only single-threaded plans exist.
    #[cfg(not(feature = "fftw-threads"))]
    fn init_threads_impl() -> bool {
        false
    }

    /// Without an initialised thread subsystem plans are single-threaded already.
    #[cfg(feature = "fftw-threads")]
    fn plan_with_nthreads_impl(threads: usize) {
        let _planner = planner();
        if THREADS_READY.load(Ordering::Acquire) {
            unsafe { ffi::fftw_plan_with_nthreads(threads.min(i32::MAX as usize) as i32) }
        }
    }

    #[cfg(not(feature = "fftw-threads"))]
    fn plan_with_nthreads_impl(threads: usize) {
        if threads > 1 {
            log::warn!("fftw3: built without thread support, ignoring {threads} threads");
        }
    }

    fn set_timelimit_impl(seconds: f64) {
        let _planner = planner();
        unsafe { ffi::fftw_set_timelimit(seconds) }
    }

    #[cfg(feature = "fftw-threads")]
    fn make_planner_thread_safe_impl() {
        let _planner = planner();
        unsafe { ffi::fftw_make_planner_thread_safe() }
    }

    /// Planner calls are already serialised by the binding.
    #[cfg(not(feature = "fftw-threads"))]
    fn make_planner_thread_safe_impl() {
        log::debug!("fftw3: planner calls are serialised by the binding");
    }

    unsafe fn cleanup_impl() {
        let _planner = planner();
        unsafe { ffi::fftw_cleanup() }
    }

    #[cfg(feature = "fftw-threads")]
    unsafe fn cleanup_threads_impl() {
        let _planner = planner();
        unsafe { ffi::fftw_cleanup_threads() }
        THREADS_READY.store(false, Ordering::Release);
    }

    #[cfg(not(feature = "fftw-threads"))]
    unsafe fn cleanup_threads_impl() {
        unsafe { Self::cleanup_impl() }
    }
}
