use spectra_hal::{
    alignment_class,
    layouts::AlignedBuf,
    oep::{AlignmentOfImpl, SignalAllocImpl},
};

use crate::cpu_ref::FFTRef;

unsafe impl SignalAllocImpl<Self> for FFTRef {
    fn alloc_real_impl(n: usize) -> AlignedBuf {
        AlignedBuf::zeroed(n)
    }

    fn alloc_complex_impl(n: usize) -> AlignedBuf {
        AlignedBuf::zeroed(2 * n)
    }
}

unsafe impl AlignmentOfImpl<Self> for FFTRef {
    fn alignment_of_impl(ptr: *const f64) -> i32 {
        alignment_class(ptr)
    }
}
