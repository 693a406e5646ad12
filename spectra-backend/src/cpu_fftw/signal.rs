use std::{alloc::Layout, ptr::NonNull};

use spectra_hal::{
    layouts::AlignedBuf,
    oep::{AlignmentOfImpl, SignalAllocImpl},
};

use crate::cpu_fftw::{FFTW, ffi};

unsafe fn release(ptr: NonNull<f64>) {
    unsafe { ffi::fftw_free(ptr.as_ptr().cast()) }
}

/// Wraps `len` values at `raw` after zeroing them, aborting like the global
/// allocator if libfftw3 is out of memory.
unsafe fn adopt(raw: *mut f64, len: usize) -> AlignedBuf {
    let Some(ptr) = NonNull::new(raw) else {
        std::alloc::handle_alloc_error(Layout::array::<f64>(len).unwrap_or(Layout::new::<f64>()))
    };
    unsafe {
        ptr.as_ptr().write_bytes(0, len);
        AlignedBuf::from_raw_parts(ptr, len, release)
    }
}

unsafe impl SignalAllocImpl<Self> for FFTW {
    fn alloc_real_impl(n: usize) -> AlignedBuf {
        if n == 0 {
            return AlignedBuf::zeroed(0);
        }
        unsafe { adopt(ffi::fftw_alloc_real(n), n) }
    }

    fn alloc_complex_impl(n: usize) -> AlignedBuf {
        if n == 0 {
            return AlignedBuf::zeroed(0);
        }
        unsafe { adopt(ffi::fftw_alloc_complex(n).cast::<f64>(), 2 * n) }
    }
}

unsafe impl AlignmentOfImpl<Self> for FFTW {
    fn alignment_of_impl(ptr: *const f64) -> i32 {
        // Reads only the address.
        unsafe { ffi::fftw_alignment_of(ptr.cast_mut()) }
    }
}
