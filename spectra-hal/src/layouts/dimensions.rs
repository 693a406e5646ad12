use std::fmt;

use itertools::Itertools;

use crate::error::{Error, Result};

/// Immutable extents of a multi-dimensional transform.
///
/// Rank is at least one, every extent is positive and the product of all
/// extents fits in a `usize`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dimensions {
    dims: Box<[usize]>,
    linear_size: usize,
}

impl Dimensions {
    pub fn new(dims: &[usize]) -> Result<Self> {
        if dims.is_empty() {
            return Err(Error::invalid_dimensions("rank must be at least 1"));
        }
        if let Some((axis, _)) = dims.iter().find_position(|&&n| n == 0) {
            return Err(Error::invalid_dimensions(format!("extent of axis {axis} is zero")));
        }
        if let Some((axis, n)) = dims.iter().find_position(|&&n| n > i32::MAX as usize) {
            return Err(Error::invalid_dimensions(format!(
                "extent {n} of axis {axis} exceeds the native index range"
            )));
        }
        let linear_size: usize = dims
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or_else(|| Error::invalid_dimensions(format!("product of {dims:?} overflows")))?;
        Ok(Self {
            dims: dims.into(),
            linear_size,
        })
    }

    /// One-dimensional transform of length `n`.
    pub fn one(n: usize) -> Result<Self> {
        Self::new(&[n])
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn get(&self, axis: usize) -> Option<usize> {
        self.dims.get(axis).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.dims
    }

    /// Copy of the extents; mutating it does not affect `self`.
    pub fn to_vec(&self) -> Vec<usize> {
        self.dims.to_vec()
    }

    /// Product of all extents.
    pub fn linear_size(&self) -> usize {
        self.linear_size
    }

    /// Extents as the native planner's `int` type.
    pub(crate) fn to_native(&self) -> Vec<i32> {
        self.dims.iter().map(|&n| n as i32).collect()
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dims.iter().join("x"))
    }
}
