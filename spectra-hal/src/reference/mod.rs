//! Pure-Rust reference discrete Fourier transforms.
//!
//! Unnormalised, like the native engines: a forward transform followed by a
//! backward transform scales the input by the transform size. Used as the
//! engine behind `FFTRef` and as a correctness oracle via the
//! [`crate::test_suite`] module.

pub mod dft;
pub mod nd;
pub mod strided;
