//! libfftw3 engine for [`spectra_hal`].
//!
//! Only the execute family of libfftw3 is thread-safe. Every other call
//! (planning, destruction, wisdom, introspection and configuration) goes
//! through [`planner`], a process-wide lock, so plans can be created from any
//! thread without further coordination.

mod engine;
mod ffi;
mod plan;
mod signal;
mod wisdom;

#[cfg(test)]
mod tests;

use std::{
    ptr::NonNull,
    sync::{Mutex, MutexGuard, PoisonError},
};

use spectra_hal::layouts::Backend;

/// Binding to the double-precision libfftw3.
///
/// Alignment classes are the ones reported by `fftw_alignment_of`; signals
/// allocated through [`SignalAlloc`](spectra_hal::api::SignalAlloc) come from
/// `fftw_malloc` and always share the SIMD-aligned class.
#[derive(Debug, Clone, Copy)]
pub struct FFTW;

static PLANNER: Mutex<()> = Mutex::new(());

/// Serialises calls into the non-thread-safe part of libfftw3.
pub(crate) fn planner() -> MutexGuard<'static, ()> {
    PLANNER.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Backend for FFTW {
    type Handle = ffi::fftw_plan_s;
    const NAME: &'static str = "fftw3";

    unsafe fn destroy(handle: NonNull<Self::Handle>) {
        let _planner = planner();
        unsafe { ffi::fftw_destroy_plan(handle.as_ptr()) }
    }
}
