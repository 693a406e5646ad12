//! Extension points for engine-aligned signal memory.

use crate::layouts::{AlignedBuf, Backend};

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `spectra-backend/src/cpu_ref/signal.rs` for the reference implementation.
/// * See [crate::api::SignalAlloc] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
///
/// Returned buffers are zeroed and hold exactly `n` real or `2 * n`
/// interleaved complex values.
pub unsafe trait SignalAllocImpl<B: Backend> {
    fn alloc_real_impl(n: usize) -> AlignedBuf;
    fn alloc_complex_impl(n: usize) -> AlignedBuf;
}

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `spectra-backend/src/cpu_ref/signal.rs` for the reference implementation.
/// * See [crate::api::AlignmentOf] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
///
/// The class only depends on the address; it is never dereferenced.
pub unsafe trait AlignmentOfImpl<B: Backend> {
    fn alignment_of_impl(ptr: *const f64) -> i32;
}
