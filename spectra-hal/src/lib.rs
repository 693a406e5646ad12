//! # spectra-hal
//!
//! A trait-based planning and execution layer for fast Fourier transforms
//! computed by a native engine that is only reachable through opaque plan
//! handles (FFTW-style `plan → execute → destroy`).
//!
//! The native engine silently assumes a long list of invariants: operand
//! sizes agree with the planned shape, in-place plans stay in-place, SIMD
//! specialised plans only ever see buffers of the same alignment class and a
//! destroyed handle is never touched again. Violating any of them corrupts
//! memory or results without a diagnostic. This crate checks all of them
//! before a single native call is made.
//!
//! ## Core Concepts
//!
//! **Signals** ([`layouts::Signal`]): the operands of a transform. A signal is
//! complex (interleaved `re, im` pairs), real, or split into separate real and
//! imaginary planes, and is backed either by a managed `Vec<f64>` or by an
//! engine-aligned [`layouts::AlignedBuf`].
//!
//! **Plans** ([`layouts::Plan`]): own the native handle. The transform kind
//! ([`layouts::Complexity`]) and the [`layouts::Placement`] are derived from
//! the operands, never supplied. A plan is either fully constructed with a
//! live handle or construction returns an [`error::Error`].
//!
//! **Engines** ([`layouts::Engine`]): the explicit, process-wide configuration
//! step (thread count, planner time limit, thread-safe planner, wisdom) and
//! the entry point for planning.
//!
//! ## Architecture
//!
//! 1. **[`api`]** -- Safe, user-facing traits implemented on [`layouts::Engine`].
//! 2. **[`oep`]** -- Unsafe extension-point traits that engine crates implement.
//! 3. **[`delegates`]** -- Blanket `impl` glue connecting [`api`] to [`oep`].
//! 4. **[`planning`]** -- The single validation routine shared by the simple and
//!    guru planning paths, plus the creation and execution dispatch tables.
//! 5. **[`mod@reference`]** -- Pure-Rust strided DFT used as a correctness oracle.
//!
//! ## Testing and Benchmarking
//!
//! [`test_suite`] holds backend-parametric tests instantiated by engine crates
//! through [`backend_test_suite!`]. [`bench_suite`] holds the analogous
//! Criterion harnesses.
//!
//! ## Non-Goals
//!
//! - The numerical transform itself is delegated to the engine.
//! - No serialization format for native plans is defined; wisdom strings are
//!   opaque engine text.

#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod bench_suite;
pub mod delegates;
pub mod error;
pub mod layouts;
pub mod oep;
pub mod planning;
pub mod reference;
pub mod source;
pub mod test_suite;

/// Embedded safety contract documentation for engine implementors.
pub mod doc {
    /// Safety contract that all [`crate::oep`] trait implementations must uphold.
    ///
    /// Covers handle lifetime, operand geometry, synchronisation and memory
    /// ownership.
    #[doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/docs/backend_safety_contract.md"))]
    pub mod backend_safety {
        pub const _PLACEHOLDER: () = ();
    }
}

/// Default memory alignment in bytes for buffers allocated by this crate.
///
/// Set to 64 bytes to match the cache-line size of modern x86 processors
/// and the alignment required by AVX-512 loads.
pub const DEFAULTALIGN: usize = 64;

/// Alignment granularity, in bytes, used to classify pointers into alignment
/// classes. Matches the SIMD width native engines specialise their codelets for.
pub const SIMD_ALIGN: usize = 16;

fn is_aligned_custom<T>(ptr: *const T, align: usize) -> bool {
    (ptr as usize).is_multiple_of(align)
}

/// Returns `true` if `ptr` is aligned to [`DEFAULTALIGN`] bytes.
pub fn is_aligned<T>(ptr: *const T) -> bool {
    is_aligned_custom(ptr, DEFAULTALIGN)
}

/// Returns the alignment class of `ptr`: its byte offset past the previous
/// [`SIMD_ALIGN`] boundary. Two buffers can share a SIMD-specialised plan iff
/// their classes are equal.
pub fn alignment_class<T>(ptr: *const T) -> i32 {
    ((ptr as usize) % SIMD_ALIGN) as i32
}
