//! Engines for [`spectra_hal`].
//!
//! - [`FFTRef`]: pure-Rust reference engine built on
//!   [`spectra_hal::reference`]. Always available; used as the correctness
//!   oracle and on targets without a native FFT library.
//! - [`FFTW`]: binding to libfftw3 (double precision), behind the `fftw`
//!   feature. The `fftw-threads` feature additionally links `libfftw3_threads`.

pub mod cpu_ref;

#[cfg(feature = "fftw")]
pub mod cpu_fftw;

pub use cpu_ref::FFTRef;

#[cfg(feature = "fftw")]
pub use cpu_fftw::FFTW;
