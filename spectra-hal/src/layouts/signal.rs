use std::{fmt, ops::Deref, ptr};

use rand_distr::{Distribution, Normal};

use crate::{
    error::{Error, ErrorKind, Result},
    layouts::Storage,
    source::Source,
};

/// Sample domain of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Complex,
    Real,
}

/// Which operand of a transform a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Input,
    Output,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Input => write!(f, "input"),
            Side::Output => write!(f, "output"),
        }
    }
}

/// How the samples of a signal are laid out in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// One buffer; complex samples are stored as `re, im` pairs.
    Interleaved,
    /// Separate real and (optional) imaginary planes.
    Split,
}

impl Representation {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Representation::Interleaved => "interleaved",
            Representation::Split => "split",
        }
    }
}

/// Real and imaginary parts stored as two independent planes.
///
/// A split signal without an imaginary plane is real.
#[derive(Debug)]
pub struct Split {
    re: Storage,
    im: Option<Storage>,
}

impl Split {
    pub fn complex(re: impl Into<Storage>, im: impl Into<Storage>) -> Result<Self> {
        let (re, im): (Storage, Storage) = (re.into(), im.into());
        if re.len() != im.len() {
            return Err(ErrorKind::SplitPlaneMismatch {
                re: re.len(),
                im: im.len(),
            }
            .into());
        }
        Ok(Self { re, im: Some(im) })
    }

    /// Planes known to have equal length.
    pub(crate) fn from_planes(re: Storage, im: Storage) -> Self {
        debug_assert_eq!(re.len(), im.len());
        Self { re, im: Some(im) }
    }

    pub fn real(re: impl Into<Storage>) -> Self {
        Self {
            re: re.into(),
            im: None,
        }
    }

    pub fn size(&self) -> usize {
        self.re.len()
    }

    pub fn re(&self) -> &[f64] {
        self.re.as_slice()
    }

    pub fn im(&self) -> Option<&[f64]> {
        self.im.as_ref().map(Storage::as_slice)
    }

    pub fn planes_mut(&mut self) -> (&mut [f64], Option<&mut [f64]>) {
        (self.re.as_mut_slice(), self.im.as_mut().map(Storage::as_mut_slice))
    }

    pub fn is_complex(&self) -> bool {
        self.im.is_some()
    }
}

/// One operand of a transform.
///
/// Sizes are reported in the signal's own units: complex samples for complex
/// signals and scalars for real ones. Two signals are the same operand iff they
/// share backing memory; content equality is irrelevant.
#[derive(Debug)]
pub enum Signal {
    /// Interleaved complex samples; the backing length is always even.
    Complex(Storage),
    /// Real samples.
    Real(Storage),
    /// Split planes, complex iff the imaginary plane is present.
    Split(Split),
}

impl Signal {
    /// Zeroed complex signal of `n` samples backed by a managed vector.
    pub fn complex(n: usize) -> Self {
        Signal::Complex(vec![0.0; 2 * n].into())
    }

    /// Zeroed real signal of `n` samples backed by a managed vector.
    pub fn real(n: usize) -> Self {
        Signal::Real(vec![0.0; n].into())
    }

    /// Zeroed complex split signal of `n` samples per plane.
    pub fn split_complex(n: usize) -> Self {
        Signal::Split(Split {
            re: vec![0.0; n].into(),
            im: Some(vec![0.0; n].into()),
        })
    }

    /// Zeroed real split signal of `n` samples.
    pub fn split_real(n: usize) -> Self {
        Signal::Split(Split::real(vec![0.0; n]))
    }

    /// Wraps interleaved `re, im` values.
    pub fn complex_from(values: impl Into<Storage>) -> Result<Self> {
        let storage: Storage = values.into();
        if !storage.len().is_multiple_of(2) {
            return Err(ErrorKind::OddComplexLength { len: storage.len() }.into());
        }
        Ok(Signal::Complex(storage))
    }

    pub fn real_from(values: impl Into<Storage>) -> Self {
        Signal::Real(values.into())
    }

    pub fn domain(&self) -> Domain {
        match self {
            Signal::Complex(_) => Domain::Complex,
            Signal::Real(_) => Domain::Real,
            Signal::Split(s) if s.is_complex() => Domain::Complex,
            Signal::Split(_) => Domain::Real,
        }
    }

    pub fn representation(&self) -> Representation {
        match self {
            Signal::Split(_) => Representation::Split,
            _ => Representation::Interleaved,
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, Signal::Split(_))
    }

    /// True if every plane is backed by an engine-aligned buffer.
    pub fn is_native(&self) -> bool {
        match self {
            Signal::Complex(s) | Signal::Real(s) => s.is_native(),
            Signal::Split(s) => s.re.is_native() && s.im.as_ref().is_none_or(Storage::is_native),
        }
    }

    /// Element count in the signal's own units.
    pub fn size(&self) -> usize {
        match self {
            Signal::Complex(s) => s.len() / 2,
            Signal::Real(s) => s.len(),
            Signal::Split(s) => s.size(),
        }
    }

    /// Raw `f64` count across all planes.
    pub fn raw_len(&self) -> usize {
        match self {
            Signal::Complex(s) | Signal::Real(s) => s.len(),
            Signal::Split(s) => s.re.len() + s.im.as_ref().map_or(0, Storage::len),
        }
    }

    /// Interleaved values, `None` for split signals.
    pub fn as_raw(&self) -> Option<&[f64]> {
        match self {
            Signal::Complex(s) | Signal::Real(s) => Some(s.as_slice()),
            Signal::Split(_) => None,
        }
    }

    pub fn as_raw_mut(&mut self) -> Option<&mut [f64]> {
        match self {
            Signal::Complex(s) | Signal::Real(s) => Some(s.as_mut_slice()),
            Signal::Split(_) => None,
        }
    }

    /// Interleaved complex samples viewed as `[re, im]` pairs.
    pub fn as_complex(&self) -> Option<&[[f64; 2]]> {
        match self {
            Signal::Complex(s) => Some(bytemuck::cast_slice(s.as_slice())),
            _ => None,
        }
    }

    pub fn as_complex_mut(&mut self) -> Option<&mut [[f64; 2]]> {
        match self {
            Signal::Complex(s) => Some(bytemuck::cast_slice_mut(s.as_mut_slice())),
            _ => None,
        }
    }

    pub fn as_split(&self) -> Option<&Split> {
        match self {
            Signal::Split(s) => Some(s),
            _ => None,
        }
    }

    /// Mutable planes: the interleaved buffer, or the real and imaginary planes.
    pub fn planes_mut(&mut self) -> (&mut [f64], Option<&mut [f64]>) {
        match self {
            Signal::Complex(s) | Signal::Real(s) => (s.as_mut_slice(), None),
            Signal::Split(s) => s.planes_mut(),
        }
    }

    /// Writes `values` into the existing backing memory.
    ///
    /// `values` use the interleaved layout of [`Signal::to_interleaved`]: split
    /// complex signals receive them de-interleaved into their planes.
    pub fn set(&mut self, values: &[f64]) -> Result<()> {
        let capacity: usize = self.raw_len();
        if values.len() > capacity {
            return Err(ErrorKind::BufferTooSmall {
                len: values.len(),
                capacity,
            }
            .into());
        }
        match self.planes_mut() {
            (dst, None) => dst[..values.len()].copy_from_slice(values),
            (re, Some(im)) => {
                for (k, pair) in values.chunks(2).enumerate() {
                    re[k] = pair[0];
                    if let Some(v) = pair.get(1) {
                        im[k] = *v;
                    }
                }
            }
        }
        Ok(())
    }

    /// Copy of the samples in interleaved layout.
    pub fn to_interleaved(&self) -> Vec<f64> {
        match self {
            Signal::Complex(s) | Signal::Real(s) => s.as_slice().to_vec(),
            Signal::Split(s) => match s.im() {
                Some(im) => s.re().iter().zip(im).flat_map(|(r, i)| [*r, *i]).collect(),
                None => s.re().to_vec(),
            },
        }
    }

    /// True iff `self` and `other` are backed by the same memory.
    pub fn same_operand(&self, other: &Signal) -> bool {
        self.raw_len() > 0 && ptr::eq(self.base_ptr(), other.base_ptr())
    }

    /// Byte offset from the real to the imaginary plane of a split complex
    /// signal, `None` for every other signal.
    pub fn plane_gap(&self) -> Option<isize> {
        match self {
            Signal::Split(s) => s
                .im()
                .map(|im| (im.as_ptr() as isize).wrapping_sub(s.re.as_ptr() as isize)),
            _ => None,
        }
    }

    fn base_ptr(&self) -> *const f64 {
        match self {
            Signal::Complex(s) | Signal::Real(s) => s.as_ptr(),
            Signal::Split(s) => s.re.as_ptr(),
        }
    }

    /// Pointers handed to the engine. The imaginary pointer is null unless the
    /// signal is split complex.
    pub fn as_raw_signal(&mut self) -> RawSignal {
        let size: usize = self.size();
        match self {
            Signal::Complex(s) | Signal::Real(s) => RawSignal {
                re: s.as_mut_ptr(),
                im: ptr::null_mut(),
                size,
            },
            Signal::Split(s) => RawSignal {
                re: s.re.as_mut_ptr(),
                im: s.im.as_mut().map_or(ptr::null_mut(), Storage::as_mut_ptr),
                size,
            },
        }
    }

    /// Fills every plane with values drawn uniformly from `[-1, 1)`.
    pub fn fill_uniform(&mut self, source: &mut Source) {
        let (re, im) = self.planes_mut();
        re.iter_mut().for_each(|x| *x = source.next_f64(-1.0, 1.0));
        if let Some(im) = im {
            im.iter_mut().for_each(|x| *x = source.next_f64(-1.0, 1.0));
        }
    }

    /// Fills every plane with values drawn from `N(0, sigma^2)`.
    pub fn fill_normal(&mut self, sigma: f64, source: &mut Source) -> Result<()> {
        let normal: Normal<f64> =
            Normal::new(0.0, sigma).map_err(|e| Error::invalid_config("sigma", e.to_string()))?;
        let (re, im) = self.planes_mut();
        re.iter_mut().for_each(|x| *x = normal.sample(source));
        if let Some(im) = im {
            im.iter_mut().for_each(|x| *x = normal.sample(source));
        }
        Ok(())
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let domain: &str = match self.domain() {
            Domain::Complex => "complex",
            Domain::Real => "real",
        };
        write!(
            f,
            "Signal({domain}, {}, size={}, native={})",
            self.representation().name(),
            self.size(),
            self.is_native()
        )
    }
}

/// Mutable access to a signal bound inside a plan.
///
/// Only in-place writes are possible, so the memory the native plan points to
/// can never be replaced.
pub struct SignalMut<'a>(pub(crate) &'a mut Signal);

impl SignalMut<'_> {
    pub fn set(&mut self, values: &[f64]) -> Result<()> {
        self.0.set(values)
    }

    pub fn as_raw_mut(&mut self) -> Option<&mut [f64]> {
        self.0.as_raw_mut()
    }

    pub fn as_complex_mut(&mut self) -> Option<&mut [[f64; 2]]> {
        self.0.as_complex_mut()
    }

    pub fn planes_mut(&mut self) -> (&mut [f64], Option<&mut [f64]>) {
        self.0.planes_mut()
    }

    pub fn fill_uniform(&mut self, source: &mut Source) {
        self.0.fill_uniform(source)
    }
}

impl Deref for SignalMut<'_> {
    type Target = Signal;

    fn deref(&self) -> &Signal {
        self.0
    }
}

/// Raw view of one operand as passed through the extension points.
///
/// `size` is in the signal's own units. For interleaved signals `im` is null
/// and complex element `k` lives at `re[2k], re[2k + 1]`.
#[derive(Debug, Clone, Copy)]
pub struct RawSignal {
    pub re: *mut f64,
    pub im: *mut f64,
    pub size: usize,
}

impl RawSignal {
    pub fn is_split_complex(&self) -> bool {
        !self.im.is_null()
    }

    /// Exchanges the real and imaginary planes of a split complex operand.
    pub fn swap_planes(self) -> Self {
        if self.im.is_null() {
            return self;
        }
        Self {
            re: self.im,
            im: self.re,
            size: self.size,
        }
    }
}

/// Input and output pointers of a transform. Equal for in-place transforms.
#[derive(Debug, Clone, Copy)]
pub struct RawOperands {
    pub input: RawSignal,
    pub output: RawSignal,
}

impl RawOperands {
    pub fn swap_planes(self) -> Self {
        Self {
            input: self.input.swap_planes(),
            output: self.output.swap_planes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::AlignedBuf;

    #[test]
    fn complex_size_is_in_samples() {
        let s: Signal = Signal::complex(8);
        assert_eq!(s.size(), 8);
        assert_eq!(s.raw_len(), 16);
        assert_eq!(s.domain(), Domain::Complex);
    }

    #[test]
    fn odd_complex_length_rejected() {
        let err: Error = Signal::complex_from(vec![0.0; 5]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OddComplexLength { len: 5 }));
    }

    #[test]
    fn split_domains() {
        assert_eq!(Signal::split_complex(4).domain(), Domain::Complex);
        assert_eq!(Signal::split_real(4).domain(), Domain::Real);
        assert!(Split::complex(vec![0.0; 3], vec![0.0; 4]).is_err());
    }

    #[test]
    fn identity_not_content() {
        let a: Signal = Signal::complex(4);
        let b: Signal = Signal::complex(4);
        assert!(a.same_operand(&a));
        assert!(!a.same_operand(&b));
    }

    #[test]
    fn set_writes_in_place() {
        let mut s: Signal = Signal::Complex(AlignedBuf::zeroed(4).into());
        let before: RawSignal = s.as_raw_signal();
        s.set(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(s.as_raw_signal().re, before.re);
        assert_eq!(s.to_interleaved(), vec![1.0, 2.0, 3.0, 0.0]);
        assert!(s.set(&[0.0; 5]).is_err());
    }

    #[test]
    fn set_split_deinterleaves() {
        let mut s: Signal = Signal::split_complex(2);
        s.set(&[1.0, -1.0, 2.0, -2.0]).unwrap();
        let split: &Split = s.as_split().unwrap();
        assert_eq!(split.re(), &[1.0, 2.0]);
        assert_eq!(split.im().unwrap(), &[-1.0, -2.0]);
        assert_eq!(s.to_interleaved(), vec![1.0, -1.0, 2.0, -2.0]);
    }

    #[test]
    fn plane_gap_of_split_complex_only() {
        let mut s: Signal = Signal::split_complex(4);
        let raw: RawSignal = s.as_raw_signal();
        assert_eq!(s.plane_gap(), Some((raw.im as isize).wrapping_sub(raw.re as isize)));
        assert_eq!(Signal::split_real(4).plane_gap(), None);
        assert_eq!(Signal::complex(4).plane_gap(), None);
    }

    #[test]
    fn swap_planes_only_for_split() {
        let mut s: Signal = Signal::split_complex(2);
        let raw: RawSignal = s.as_raw_signal();
        let swapped: RawSignal = raw.swap_planes();
        assert_eq!(swapped.re, raw.im);
        let mut c: Signal = Signal::complex(2);
        let raw: RawSignal = c.as_raw_signal();
        assert_eq!(raw.swap_planes().re, raw.re);
    }
}
