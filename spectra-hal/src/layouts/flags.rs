use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Planner flags, passed to the engine unmodified.
    ///
    /// Values are bit-compatible with the FFTW3 planner flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u32 {
        const DESTROY_INPUT = 1 << 0;
        const UNALIGNED = 1 << 1;
        const CONSERVE_MEMORY = 1 << 2;
        const EXHAUSTIVE = 1 << 3;
        const PRESERVE_INPUT = 1 << 4;
        const PATIENT = 1 << 5;
        const ESTIMATE = 1 << 6;
        const WISDOM_ONLY = 1 << 21;

        const ESTIMATE_PATIENT = 1 << 7;
        const BELIEVE_PCOST = 1 << 8;
        const NO_DFT_R2HC = 1 << 9;
        const NO_NONTHREADED = 1 << 10;
        const NO_BUFFERING = 1 << 11;
        const NO_INDIRECT_OP = 1 << 12;
        const ALLOW_LARGE_GENERIC = 1 << 13;
        const NO_RANK_SPLITS = 1 << 14;
        const NO_VRANK_SPLITS = 1 << 15;
        const NO_VRECURSE = 1 << 16;
        const NO_SIMD = 1 << 17;
        const NO_SLOW = 1 << 18;
        const NO_FIXED_RADIX_LARGE_N = 1 << 19;
        const ALLOW_PRUNING = 1 << 20;
    }
}

impl Flags {
    /// The default planner rigour.
    pub const MEASURE: Flags = Flags::empty();

    /// True unless [`Flags::UNALIGNED`] is set: new-array executions must
    /// then present buffers of the recorded alignment class.
    pub fn requires_aligned(&self) -> bool {
        !self.contains(Flags::UNALIGNED)
    }

    /// True if planning may measure candidate plans, overwriting the operands.
    pub fn measures(&self) -> bool {
        !self.intersects(Flags::ESTIMATE | Flags::WISDOM_ONLY)
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::MEASURE
    }
}

/// Sign of the exponent of the transform kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub const FORWARD: Sign = Sign::Negative;
    pub const BACKWARD: Sign = Sign::Positive;

    pub fn value(&self) -> i32 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Positive => write!(f, "+1"),
            Sign::Negative => write!(f, "-1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unaligned_toggles_contract() {
        assert!(Flags::MEASURE.requires_aligned());
        assert!(Flags::ESTIMATE.requires_aligned());
        assert!(!(Flags::ESTIMATE | Flags::UNALIGNED).requires_aligned());
    }

    #[test]
    fn native_values() {
        assert_eq!(Flags::ESTIMATE.bits(), 64);
        assert_eq!(Flags::WISDOM_ONLY.bits(), 2097152);
        assert_eq!(Sign::FORWARD.value(), -1);
        assert_eq!(Sign::BACKWARD.value(), 1);
    }
}
