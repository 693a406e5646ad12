use crate::{
    layouts::{Flops, Sign},
    reference::dft::{dft_flops, dft_ref},
};

/// Row-major element strides of a contiguous array with the given extents.
pub fn row_major_strides(extents: &[usize]) -> Vec<usize> {
    let mut strides: Vec<usize> = vec![1; extents.len()];
    for k in (0..extents.len().saturating_sub(1)).rev() {
        strides[k] = strides[k + 1] * extents[k + 1];
    }
    strides
}

/// Extents of the half spectrum of a real transform over `dims`.
pub fn half_extents(dims: &[usize]) -> Vec<usize> {
    let mut half: Vec<usize> = dims.to_vec();
    if let Some(last) = half.last_mut() {
        *last = *last / 2 + 1;
    }
    half
}

/// In-place multi-dimensional DFT of a contiguous row-major complex array
/// stored as separate `re` and `im` planes.
pub fn dft_nd_ref(dims: &[usize], sign: Sign, re: &mut [f64], im: &mut [f64]) {
    let size: usize = dims.iter().product();
    assert!(re.len() == size && im.len() == size, "planes must hold {size} elements");
    let strides: Vec<usize> = row_major_strides(dims);
    let mut line_re: Vec<f64> = Vec::new();
    let mut line_im: Vec<f64> = Vec::new();
    for (&n, &stride) in dims.iter().zip(&strides) {
        if n == 1 {
            continue;
        }
        line_re.resize(n, 0.0);
        line_im.resize(n, 0.0);
        let outer: usize = size / (n * stride);
        for o in 0..outer {
            for inner in 0..stride {
                let base: usize = o * n * stride + inner;
                for j in 0..n {
                    line_re[j] = re[base + j * stride];
                    line_im[j] = im[base + j * stride];
                }
                dft_ref(sign, &mut line_re, &mut line_im);
                for j in 0..n {
                    re[base + j * stride] = line_re[j];
                    im[base + j * stride] = line_im[j];
                }
            }
        }
    }
}

/// Rebuilds the full spectrum of a real signal from its half spectrum using
/// `X[k] = conj(X[-k])`.
pub fn hermitian_extend(dims: &[usize], half_re: &[f64], half_im: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let half: Vec<usize> = half_extents(dims);
    let half_strides: Vec<usize> = row_major_strides(&half);
    let size: usize = dims.iter().product();
    let last: usize = dims.len() - 1;
    let mut re: Vec<f64> = vec![0.0; size];
    let mut im: Vec<f64> = vec![0.0; size];
    let mut index: Vec<usize> = vec![0; dims.len()];
    for flat in 0..size {
        let mut rem: usize = flat;
        for k in (0..dims.len()).rev() {
            index[k] = rem % dims[k];
            rem /= dims[k];
        }
        if index[last] < half[last] {
            let src: usize = index.iter().zip(&half_strides).map(|(i, s)| i * s).sum();
            re[flat] = half_re[src];
            im[flat] = half_im[src];
        } else {
            let src: usize = index
                .iter()
                .zip(dims)
                .zip(&half_strides)
                .map(|((&i, &n), s)| ((n - i) % n) * s)
                .sum();
            re[flat] = half_re[src];
            im[flat] = -half_im[src];
        }
    }
    (re, im)
}

/// Operation count of [`dft_nd_ref`] over `dims`.
pub fn dft_nd_flops(dims: &[usize]) -> Flops {
    let size: usize = dims.iter().product();
    dims.iter().fold(Flops::default(), |acc, &n| {
        let lines: f64 = (size / n) as f64;
        let line: Flops = dft_flops(n);
        Flops {
            add: acc.add + lines * line.add,
            mul: acc.mul + lines * line.mul,
            fma: acc.fma + lines * line.fma,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides() {
        assert_eq!(row_major_strides(&[4, 3, 2]), vec![6, 2, 1]);
        assert_eq!(half_extents(&[4, 8]), vec![4, 5]);
    }

    #[test]
    fn nd_impulse() {
        let dims: [usize; 2] = [4, 3];
        let mut re: Vec<f64> = vec![0.0; 12];
        let mut im: Vec<f64> = vec![0.0; 12];
        re[0] = 1.0;
        dft_nd_ref(&dims, Sign::FORWARD, &mut re, &mut im);
        assert!(re.iter().all(|x| (x - 1.0).abs() < 1e-12));
        assert!(im.iter().all(|x| x.abs() < 1e-12));
    }

    #[test]
    fn hermitian_extension_matches_full_spectrum() {
        let dims: [usize; 2] = [3, 4];
        let mut re: Vec<f64> = (0..12).map(|i| (i as f64 * 0.7).sin()).collect();
        let mut im: Vec<f64> = vec![0.0; 12];
        dft_nd_ref(&dims, Sign::FORWARD, &mut re, &mut im);

        let half: Vec<usize> = half_extents(&dims);
        let mut half_re: Vec<f64> = Vec::new();
        let mut half_im: Vec<f64> = Vec::new();
        for r in 0..dims[0] {
            for c in 0..half[1] {
                half_re.push(re[r * dims[1] + c]);
                half_im.push(im[r * dims[1] + c]);
            }
        }
        let (full_re, full_im) = hermitian_extend(&dims, &half_re, &half_im);
        for k in 0..12 {
            assert!((full_re[k] - re[k]).abs() < 1e-9);
            assert!((full_im[k] - im[k]).abs() < 1e-9);
        }
    }
}
