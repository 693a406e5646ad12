use std::fmt;

use itertools::{Itertools, izip};

use crate::{
    error::{Error, Result},
    layouts::{Complexity, Side},
};

/// One axis of a guru transform: extent `n`, input stride `is` and output
/// stride `os`, both counted in elements of the respective operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IoDim {
    pub n: usize,
    pub is: isize,
    pub os: isize,
}

impl IoDim {
    pub fn new(n: usize, is: isize, os: isize) -> Self {
        Self { n, is, os }
    }

    fn stride(&self, side: Side) -> isize {
        match side {
            Side::Input => self.is,
            Side::Output => self.os,
        }
    }
}

impl fmt::Display for IoDim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.n, self.is, self.os)
    }
}

/// Axis descriptor with the layout of the native `iodim` struct.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeIoDim {
    pub n: i32,
    pub is: i32,
    pub os: i32,
}

impl From<NativeIoDim> for IoDim {
    fn from(d: NativeIoDim) -> Self {
        Self {
            n: d.n as usize,
            is: d.is as isize,
            os: d.os as isize,
        }
    }
}

/// Zips three equally long slices into axis descriptors.
pub fn make_dimensions(n: &[usize], is: &[isize], os: &[isize]) -> Result<Vec<IoDim>> {
    if n.len() != is.len() || n.len() != os.len() {
        return Err(Error::invalid_dimensions(format!(
            "n, is and os must have equal length, got {}, {} and {}",
            n.len(),
            is.len(),
            os.len()
        )));
    }
    Ok(izip!(n, is, os).map(|(&n, &is, &os)| IoDim { n, is, os }).collect())
}

/// Transform and batch (how-many) axes of a guru plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuruShape {
    dims: Vec<IoDim>,
    howmany: Vec<IoDim>,
}

impl GuruShape {
    pub fn new(dims: Vec<IoDim>, howmany: Vec<IoDim>) -> Result<Self> {
        if dims.is_empty() {
            return Err(Error::invalid_dimensions("guru transform rank must be at least 1"));
        }
        for (kind, axes) in [("transform", &dims), ("how-many", &howmany)] {
            for (axis, d) in axes.iter().enumerate() {
                if d.n == 0 {
                    return Err(Error::invalid_dimensions(format!("{kind} axis {axis} has extent zero")));
                }
                if d.is < 0 || d.os < 0 {
                    return Err(Error::invalid_dimensions(format!(
                        "{kind} axis {axis} has a negative stride {d}"
                    )));
                }
                if d.n > i32::MAX as usize || d.is > i32::MAX as isize || d.os > i32::MAX as isize {
                    return Err(Error::invalid_dimensions(format!(
                        "{kind} axis {axis} {d} exceeds the native index range"
                    )));
                }
            }
        }
        let shape: GuruShape = Self { dims, howmany };
        if shape.checked_product(&shape.dims).is_none() || shape.checked_product(&shape.howmany).is_none() {
            return Err(Error::invalid_dimensions("guru shape size overflows"));
        }
        Ok(shape)
    }

    /// Single transform over `dims`, no batch axes.
    pub fn single(dims: Vec<IoDim>) -> Result<Self> {
        Self::new(dims, Vec::new())
    }

    fn checked_product(&self, axes: &[IoDim]) -> Option<usize> {
        axes.iter().try_fold(1usize, |acc, d| acc.checked_mul(d.n))
    }

    pub fn dims(&self) -> &[IoDim] {
        &self.dims
    }

    pub fn howmany(&self) -> &[IoDim] {
        &self.howmany
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn howmany_rank(&self) -> usize {
        self.howmany.len()
    }

    /// Logical elements of one transform.
    pub fn transform_size(&self) -> usize {
        self.dims.iter().map(|d| d.n).product()
    }

    /// Number of transforms computed per execution.
    pub fn batch(&self) -> usize {
        self.howmany.iter().map(|d| d.n).product()
    }

    /// Elements an operand must hold to cover every address reachable by the
    /// strides of `side`.
    ///
    /// The complex side of a real transform stores only `n / 2 + 1` elements
    /// along the last transform axis.
    pub fn extent(&self, complexity: Complexity, side: Side) -> usize {
        let half_last: bool = matches!(
            (complexity, side),
            (Complexity::RealToComplex, Side::Output) | (Complexity::ComplexToReal, Side::Input)
        );
        let last: usize = self.dims.len() - 1;
        let axes = self
            .dims
            .iter()
            .enumerate()
            .map(|(k, d)| if half_last && k == last { (d.n / 2 + 1, d) } else { (d.n, d) })
            .chain(self.howmany.iter().map(|d| (d.n, d)));
        1 + axes.map(|(n, d)| (n - 1) * d.stride(side) as usize).sum::<usize>()
    }

    pub(crate) fn native_dims(&self) -> Vec<NativeIoDim> {
        Self::to_native(&self.dims)
    }

    pub(crate) fn native_howmany(&self) -> Vec<NativeIoDim> {
        Self::to_native(&self.howmany)
    }

    fn to_native(axes: &[IoDim]) -> Vec<NativeIoDim> {
        axes.iter()
            .map(|d| NativeIoDim {
                n: d.n as i32,
                is: d.is as i32,
                os: d.os as i32,
            })
            .collect()
    }
}

impl fmt::Display for GuruShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dims=[{}] howmany=[{}]",
            self.dims.iter().join(", "),
            self.howmany.iter().join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn make_dimensions_requires_equal_lengths() {
        let dims: Vec<IoDim> = make_dimensions(&[4, 2], &[2, 1], &[2, 1]).unwrap();
        assert_eq!(dims[1], IoDim::new(2, 1, 1));
        let err: Error = make_dimensions(&[4, 2], &[1], &[1, 1]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidDimensions { .. }));
    }

    #[test]
    fn rejects_invalid_axes() {
        assert!(GuruShape::single(Vec::new()).is_err());
        assert!(GuruShape::single(vec![IoDim::new(0, 1, 1)]).is_err());
        assert!(GuruShape::single(vec![IoDim::new(4, -1, 1)]).is_err());
        assert!(GuruShape::new(vec![IoDim::new(4, 1, 1)], vec![IoDim::new(0, 4, 4)]).is_err());
    }

    #[test]
    fn extents_follow_strides() {
        // Two interleaved batches of length 4: elements 0, 2, 4, 6 and 1, 3, 5, 7.
        let shape: GuruShape = GuruShape::new(vec![IoDim::new(4, 2, 2)], vec![IoDim::new(2, 1, 1)]).unwrap();
        assert_eq!(shape.transform_size(), 4);
        assert_eq!(shape.batch(), 2);
        assert_eq!(shape.extent(Complexity::ComplexToComplex, Side::Input), 8);
        assert_eq!(shape.extent(Complexity::ComplexToComplex, Side::Output), 8);
    }

    #[test]
    fn real_transform_extent_halves_last_axis() {
        let shape: GuruShape = GuruShape::single(vec![IoDim::new(8, 1, 1)]).unwrap();
        assert_eq!(shape.extent(Complexity::RealToComplex, Side::Input), 8);
        assert_eq!(shape.extent(Complexity::RealToComplex, Side::Output), 5);
        assert_eq!(shape.extent(Complexity::ComplexToReal, Side::Input), 5);
        assert_eq!(shape.extent(Complexity::ComplexToReal, Side::Output), 8);
    }
}
