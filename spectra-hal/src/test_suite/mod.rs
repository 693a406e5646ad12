//! Backend-parametric test functions.
//!
//! Each function takes an [`Engine`](crate::layouts::Engine) of any
//! [`CompleteBackend`](crate::oep::CompleteBackend) and checks it against the
//! pure-Rust [`reference`](crate::reference) transforms. Engine crates
//! instantiate them with [`backend_test_suite!`](crate::backend_test_suite).

pub mod execute;
pub mod guru;
pub mod lifecycle;
pub mod transform;
pub mod wisdom;

use itertools::izip;

use crate::{
    layouts::Sign,
    reference::nd::{dft_nd_ref, half_extents, row_major_strides},
};

#[macro_export]
macro_rules! backend_test_suite {
    (
        mod $modname:ident,
        backend = $backend:ty,
        tests = {
            $( $(#[$attr:meta])* $test_name:ident => $impl:path ),+ $(,)?
        }
    ) => {
        mod $modname {
            use spectra_hal::{
                api::EngineNew,
                layouts::{Engine, EngineConfig},
            };

            use once_cell::sync::Lazy;

            static ENGINE: Lazy<Engine<$backend>> =
                Lazy::new(|| Engine::<$backend>::new(EngineConfig::default()).expect("default engine configuration"));

            $(
                $(#[$attr])*
                #[test]
                fn $test_name() {
                    ($impl)(&*ENGINE);
                }
            )+
        }
    };
}

/// Asserts `a` and `b` agree element-wise within `tol`, relative to the
/// largest magnitude in `b`.
pub(crate) fn assert_close(a: &[f64], b: &[f64], tol: f64) {
    assert_eq!(a.len(), b.len(), "length {} != {}", a.len(), b.len());
    let scale: f64 = b.iter().fold(1.0f64, |m, x| m.max(x.abs()));
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert!(
            (x - y).abs() <= tol * scale,
            "mismatch at {i}: {x} != {y} (tol={tol}, scale={scale})"
        );
    }
}

/// Splits interleaved complex values into planes.
pub(crate) fn deinterleave(values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    values.chunks_exact(2).map(|c| (c[0], c[1])).unzip()
}

pub(crate) fn interleave(re: &[f64], im: &[f64]) -> Vec<f64> {
    re.iter().zip(im).flat_map(|(r, i)| [*r, *i]).collect()
}

/// Unnormalised complex DFT over `dims` of interleaved `values`.
pub(crate) fn reference_c2c(dims: &[usize], sign: Sign, values: &[f64]) -> Vec<f64> {
    let (mut re, mut im) = deinterleave(values);
    dft_nd_ref(dims, sign, &mut re, &mut im);
    interleave(&re, &im)
}

/// Half spectrum, interleaved and row-major over [`half_extents`], of the
/// real signal `values` over `dims`.
pub(crate) fn reference_r2c(dims: &[usize], values: &[f64]) -> Vec<f64> {
    let mut re: Vec<f64> = values.to_vec();
    let mut im: Vec<f64> = vec![0.0; values.len()];
    dft_nd_ref(dims, Sign::FORWARD, &mut re, &mut im);

    let full: Vec<usize> = row_major_strides(dims);
    let half: Vec<usize> = half_extents(dims);
    let half_strides: Vec<usize> = row_major_strides(&half);
    let half_size: usize = half.iter().product();
    (0..half_size)
        .flat_map(|idx| {
            let j: usize = izip!(&half, &half_strides, &full)
                .map(|(&h, &hs, &fs)| (idx / hs) % h * fs)
                .sum();
            [re[j], im[j]]
        })
        .collect()
}
