use itertools::izip;

use crate::{
    layouts::{Complexity, Flops, IoDim, RawOperands, RawSignal, Sign},
    reference::nd::{dft_nd_flops, dft_nd_ref, half_extents, hermitian_extend, row_major_strides},
};

/// Kind of transform computed by [`execute_strided`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    Complex(Sign),
    /// Forward transform of real data, keeping the half spectrum.
    RealToComplex,
    /// Backward transform of a half spectrum to real data.
    ComplexToReal,
}

impl Transform {
    /// `None` for real-to-real, which has no reference implementation.
    pub fn new(complexity: Complexity, sign: Sign) -> Option<Self> {
        match complexity {
            Complexity::ComplexToComplex => Some(Transform::Complex(sign)),
            Complexity::RealToComplex => Some(Transform::RealToComplex),
            Complexity::ComplexToReal => Some(Transform::ComplexToReal),
            Complexity::RealToReal => None,
        }
    }

    pub fn complexity(&self) -> Complexity {
        match self {
            Transform::Complex(_) => Complexity::ComplexToComplex,
            Transform::RealToComplex => Complexity::RealToComplex,
            Transform::ComplexToReal => Complexity::ComplexToReal,
        }
    }

    fn sign(&self) -> Sign {
        match self {
            Transform::Complex(sign) => *sign,
            Transform::RealToComplex => Sign::FORWARD,
            Transform::ComplexToReal => Sign::BACKWARD,
        }
    }
}

/// Axis descriptors of a contiguous row-major transform over `dims`.
///
/// The complex side of a real transform stores `n / 2 + 1` elements along
/// the last axis.
pub fn contiguous_axes(transform: Transform, dims: &[usize]) -> Vec<IoDim> {
    let full: Vec<usize> = row_major_strides(dims);
    let half: Vec<usize> = row_major_strides(&half_extents(dims));
    izip!(dims, &full, &half)
        .map(|(&n, &f, &h)| {
            let (is, os) = match transform {
                Transform::Complex(_) => (f, f),
                Transform::RealToComplex => (f, h),
                Transform::ComplexToReal => (h, f),
            };
            IoDim::new(n, is as isize, os as isize)
        })
        .collect()
}

/// Offsets of every multi-index over `(extent, stride)` axes, first axis slowest.
fn offsets(axes: impl Iterator<Item = (usize, usize)>) -> Vec<usize> {
    axes.fold(vec![0usize], |prev, (n, stride)| {
        prev.iter()
            .flat_map(|&o| (0..n).map(move |j| o + j * stride))
            .collect()
    })
}

#[inline(always)]
unsafe fn load_complex(signal: RawSignal, idx: usize) -> (f64, f64) {
    unsafe {
        if signal.im.is_null() {
            (*signal.re.add(2 * idx), *signal.re.add(2 * idx + 1))
        } else {
            (*signal.re.add(idx), *signal.im.add(idx))
        }
    }
}

#[inline(always)]
unsafe fn store_complex(signal: RawSignal, idx: usize, re: f64, im: f64) {
    unsafe {
        if signal.im.is_null() {
            *signal.re.add(2 * idx) = re;
            *signal.re.add(2 * idx + 1) = im;
        } else {
            *signal.re.add(idx) = re;
            *signal.im.add(idx) = im;
        }
    }
}

/// Computes `transform` over the axes `dims` for every index of the batch
/// axes `howmany`, reading `ops.input` and writing `ops.output` through the
/// axes' strides.
///
/// Complex operands are interleaved when their `im` pointer is null and split
/// otherwise. All input is read before any output is written, so the operands
/// may alias.
///
/// # Safety
/// Every address reachable through the strides must be valid for the
/// respective operand.
pub unsafe fn execute_strided(transform: Transform, dims: &[IoDim], howmany: &[IoDim], ops: RawOperands) {
    let extents: Vec<usize> = dims.iter().map(|d| d.n).collect();
    let half: Vec<usize> = half_extents(&extents);
    let (in_extents, out_extents): (&[usize], &[usize]) = match transform {
        Transform::Complex(_) => (&extents, &extents),
        Transform::RealToComplex => (&extents, &half),
        Transform::ComplexToReal => (&half, &extents),
    };

    let in_offsets: Vec<usize> = offsets(in_extents.iter().zip(dims).map(|(&n, d)| (n, d.is as usize)));
    let out_offsets: Vec<usize> = offsets(out_extents.iter().zip(dims).map(|(&n, d)| (n, d.os as usize)));
    let batch_in: Vec<usize> = offsets(howmany.iter().map(|d| (d.n, d.is as usize)));
    let batch_out: Vec<usize> = offsets(howmany.iter().map(|d| (d.n, d.os as usize)));

    let mut planes: Vec<(Vec<f64>, Vec<f64>)> = batch_in
        .iter()
        .map(|&b| unsafe {
            match transform {
                Transform::Complex(_) => in_offsets.iter().map(|&o| load_complex(ops.input, b + o)).unzip(),
                Transform::RealToComplex => {
                    let re: Vec<f64> = in_offsets.iter().map(|&o| *ops.input.re.add(b + o)).collect();
                    let im: Vec<f64> = vec![0.0; re.len()];
                    (re, im)
                }
                Transform::ComplexToReal => {
                    let (re, im): (Vec<f64>, Vec<f64>) =
                        in_offsets.iter().map(|&o| load_complex(ops.input, b + o)).unzip();
                    hermitian_extend(&extents, &re, &im)
                }
            }
        })
        .collect();

    for (re, im) in planes.iter_mut() {
        dft_nd_ref(&extents, transform.sign(), re, im);
    }

    match transform {
        Transform::Complex(_) | Transform::ComplexToReal => {
            for ((re, im), &b) in planes.iter().zip(&batch_out) {
                for (k, &o) in out_offsets.iter().enumerate() {
                    unsafe {
                        if transform == Transform::ComplexToReal {
                            *ops.output.re.add(b + o) = re[k];
                        } else {
                            store_complex(ops.output, b + o, re[k], im[k]);
                        }
                    }
                }
            }
        }
        Transform::RealToComplex => {
            // Position of each half-spectrum element inside the full spectrum.
            let full: Vec<usize> = offsets(half.iter().copied().zip(row_major_strides(&extents)));
            for ((re, im), &b) in planes.iter().zip(&batch_out) {
                for (&src, &o) in full.iter().zip(&out_offsets) {
                    unsafe { store_complex(ops.output, b + o, re[src], im[src]) };
                }
            }
        }
    }
}

/// Operation count of [`execute_strided`].
pub fn transform_flops(transform: Transform, dims: &[IoDim], howmany: &[IoDim]) -> Flops {
    let extents: Vec<usize> = dims.iter().map(|d| d.n).collect();
    let batch: f64 = howmany.iter().map(|d| d.n).product::<usize>() as f64;
    let scale: f64 = match transform {
        Transform::Complex(_) => batch,
        Transform::RealToComplex | Transform::ComplexToReal => batch / 2.0,
    };
    let one: Flops = dft_nd_flops(&extents);
    Flops {
        add: one.add * scale,
        mul: one.mul * scale,
        fma: one.fma * scale,
    }
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use super::*;

    fn interleaved(data: &mut [f64]) -> RawSignal {
        RawSignal {
            re: data.as_mut_ptr(),
            im: ptr::null_mut(),
            size: data.len() / 2,
        }
    }

    #[test]
    fn offsets_are_row_major() {
        assert_eq!(offsets([(2, 3), (3, 1)].into_iter()), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(offsets(std::iter::empty()), vec![0]);
    }

    #[test]
    fn batched_strided_matches_contiguous() {
        // Two length-4 signals interleaved element by element.
        let mut input: Vec<f64> = (0..16).map(|i| i as f64).collect();
        let mut output: Vec<f64> = vec![0.0; 16];
        let dims: [IoDim; 1] = [IoDim::new(4, 2, 2)];
        let howmany: [IoDim; 1] = [IoDim::new(2, 1, 1)];
        let ops: RawOperands = RawOperands {
            input: interleaved(&mut input),
            output: interleaved(&mut output),
        };
        unsafe { execute_strided(Transform::Complex(Sign::FORWARD), &dims, &howmany, ops) };

        for batch in 0..2 {
            let mut re: Vec<f64> = (0..4).map(|k| input[2 * (2 * k + batch)]).collect();
            let mut im: Vec<f64> = (0..4).map(|k| input[2 * (2 * k + batch) + 1]).collect();
            dft_nd_ref(&[4], Sign::FORWARD, &mut re, &mut im);
            for k in 0..4 {
                assert!((output[2 * (2 * k + batch)] - re[k]).abs() < 1e-9);
                assert!((output[2 * (2 * k + batch) + 1] - im[k]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn r2c_then_c2r_scales_by_n() {
        let dims: [usize; 2] = [2, 6];
        let mut real: Vec<f64> = (0..12).map(|i| (i as f64 * 0.3).cos()).collect();
        let original: Vec<f64> = real.clone();
        let mut spectrum: Vec<f64> = vec![0.0; 2 * 12];
        let real_sig = |d: &mut Vec<f64>| RawSignal {
            re: d.as_mut_ptr(),
            im: ptr::null_mut(),
            size: d.len(),
        };

        let axes: Vec<IoDim> = contiguous_axes(Transform::RealToComplex, &dims);
        let ops: RawOperands = RawOperands {
            input: real_sig(&mut real),
            output: interleaved(&mut spectrum),
        };
        unsafe { execute_strided(Transform::RealToComplex, &axes, &[], ops) };

        let axes: Vec<IoDim> = contiguous_axes(Transform::ComplexToReal, &dims);
        let ops: RawOperands = RawOperands {
            input: interleaved(&mut spectrum),
            output: real_sig(&mut real),
        };
        unsafe { execute_strided(Transform::ComplexToReal, &axes, &[], ops) };

        for (x, y) in real.iter().zip(&original) {
            assert!((x - 12.0 * y).abs() < 1e-9);
        }
    }
}
