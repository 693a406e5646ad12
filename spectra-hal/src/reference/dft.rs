use std::f64::consts::PI;

use crate::layouts::{Flops, Sign};

/// In-place one-dimensional DFT of the complex vector `(re, im)`:
/// `X[k] = sum_j x[j] * exp(sign * 2 * pi * i * j * k / n)`.
///
/// Radix-2 for power-of-two lengths, direct evaluation otherwise.
pub fn dft_ref(sign: Sign, re: &mut [f64], im: &mut [f64]) {
    assert_eq!(re.len(), im.len(), "re.len()={} != im.len()={}", re.len(), im.len());
    let n: usize = re.len();
    if n <= 1 {
        return;
    }
    if n.is_power_of_two() {
        fft_radix2_ref(sign, re, im)
    } else {
        dft_direct_ref(sign, re, im)
    }
}

#[inline(always)]
fn cplx_twiddle(ra: &mut f64, ia: &mut f64, rb: &mut f64, ib: &mut f64, omg_re: f64, omg_im: f64) {
    let dr: f64 = *rb * omg_re - *ib * omg_im;
    let di: f64 = *rb * omg_im + *ib * omg_re;
    *rb = *ra - dr;
    *ib = *ia - di;
    *ra += dr;
    *ia += di;
}

fn bit_reverse(re: &mut [f64], im: &mut [f64]) {
    let n: usize = re.len();
    let mut j: usize = 0;
    for i in 1..n {
        let mut bit: usize = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            re.swap(i, j);
            im.swap(i, j);
        }
    }
}

fn fft_radix2_ref(sign: Sign, re: &mut [f64], im: &mut [f64]) {
    let n: usize = re.len();
    bit_reverse(re, im);
    let s: f64 = sign.value() as f64;
    let mut len: usize = 2;
    while len <= n {
        let h: usize = len >> 1;
        let theta: f64 = s * 2.0 * PI / len as f64;
        for start in (0..n).step_by(len) {
            let (re_lo, re_hi) = re[start..start + len].split_at_mut(h);
            let (im_lo, im_hi) = im[start..start + len].split_at_mut(h);
            for k in 0..h {
                let (omg_im, omg_re) = (theta * k as f64).sin_cos();
                cplx_twiddle(&mut re_lo[k], &mut im_lo[k], &mut re_hi[k], &mut im_hi[k], omg_re, omg_im);
            }
        }
        len <<= 1;
    }
}

fn dft_direct_ref(sign: Sign, re: &mut [f64], im: &mut [f64]) {
    let n: usize = re.len();
    let s: f64 = sign.value() as f64;
    let mut out_re: Vec<f64> = vec![0.0; n];
    let mut out_im: Vec<f64> = vec![0.0; n];
    for k in 0..n {
        let (mut acc_re, mut acc_im) = (0.0, 0.0);
        for j in 0..n {
            // Reduce j * k modulo n first to keep the angle small.
            let (omg_im, omg_re) = (s * 2.0 * PI * ((j * k) % n) as f64 / n as f64).sin_cos();
            acc_re += re[j] * omg_re - im[j] * omg_im;
            acc_im += re[j] * omg_im + im[j] * omg_re;
        }
        out_re[k] = acc_re;
        out_im[k] = acc_im;
    }
    re.copy_from_slice(&out_re);
    im.copy_from_slice(&out_im);
}

/// Operation count of [`dft_ref`] on a vector of length `n`.
pub fn dft_flops(n: usize) -> Flops {
    if n <= 1 {
        return Flops::default();
    }
    let nf: f64 = n as f64;
    if n.is_power_of_two() {
        let stages: f64 = n.trailing_zeros() as f64;
        Flops {
            add: 3.0 * nf * stages,
            mul: 2.0 * nf * stages,
            fma: 0.0,
        }
    } else {
        Flops {
            add: 4.0 * nf * nf,
            mul: 4.0 * nf * nf,
            fma: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[f64], b: &[f64]) {
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn impulse_gives_ones() {
        for n in [8usize, 6] {
            let mut re: Vec<f64> = vec![0.0; n];
            let mut im: Vec<f64> = vec![0.0; n];
            re[0] = 1.0;
            dft_ref(Sign::FORWARD, &mut re, &mut im);
            assert_close(&re, &vec![1.0; n]);
            assert_close(&im, &vec![0.0; n]);
        }
    }

    #[test]
    fn radix2_matches_direct() {
        let n: usize = 16;
        let re0: Vec<f64> = (0..n).map(|i| (i as f64 * 0.37).sin()).collect();
        let im0: Vec<f64> = (0..n).map(|i| (i as f64 * 1.3).cos()).collect();
        for sign in [Sign::Positive, Sign::Negative] {
            let (mut re_a, mut im_a) = (re0.clone(), im0.clone());
            let (mut re_b, mut im_b) = (re0.clone(), im0.clone());
            fft_radix2_ref(sign, &mut re_a, &mut im_a);
            dft_direct_ref(sign, &mut re_b, &mut im_b);
            assert_close(&re_a, &re_b);
            assert_close(&im_a, &im_b);
        }
    }

    #[test]
    fn forward_then_backward_scales_by_n() {
        let n: usize = 12;
        let re0: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let im0: Vec<f64> = (0..n).map(|i| -(i as f64) * 0.5).collect();
        let (mut re, mut im) = (re0.clone(), im0.clone());
        dft_ref(Sign::FORWARD, &mut re, &mut im);
        dft_ref(Sign::BACKWARD, &mut re, &mut im);
        let scaled_re: Vec<f64> = re0.iter().map(|x| x * n as f64).collect();
        let scaled_im: Vec<f64> = im0.iter().map(|x| x * n as f64).collect();
        assert_close(&re, &scaled_re);
        assert_close(&im, &scaled_im);
    }
}
