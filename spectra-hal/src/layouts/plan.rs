use std::{fmt, marker::PhantomData, ptr::NonNull};

use crate::{
    error::{ErrorKind, Result},
    layouts::{
        Alignment, Backend, Dimensions, Domain, Flags, GuruShape, RawOperands, Representation, Side, Sign, Signal,
        SignalMut,
    },
};

/// Transform kind, derived from the domains of the two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Complexity {
    ComplexToComplex,
    ComplexToReal,
    RealToComplex,
    RealToReal,
}

impl Complexity {
    pub fn from_domains(input: Domain, output: Domain) -> Self {
        match (input, output) {
            (Domain::Complex, Domain::Complex) => Complexity::ComplexToComplex,
            (Domain::Complex, Domain::Real) => Complexity::ComplexToReal,
            (Domain::Real, Domain::Complex) => Complexity::RealToComplex,
            (Domain::Real, Domain::Real) => Complexity::RealToReal,
        }
    }

    pub fn domain(&self, side: Side) -> Domain {
        match (self, side) {
            (Complexity::ComplexToComplex | Complexity::ComplexToReal, Side::Input) => Domain::Complex,
            (Complexity::ComplexToComplex | Complexity::RealToComplex, Side::Output) => Domain::Complex,
            _ => Domain::Real,
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Complexity::ComplexToComplex => write!(f, "complex-to-complex"),
            Complexity::ComplexToReal => write!(f, "complex-to-real"),
            Complexity::RealToComplex => write!(f, "real-to-complex"),
            Complexity::RealToReal => write!(f, "real-to-real"),
        }
    }
}

/// Whether a transform reads and writes the same memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    InPlace,
    OutOfPlace,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::InPlace => write!(f, "in-place"),
            Placement::OutOfPlace => write!(f, "out-of-place"),
        }
    }
}

/// Operation counts of a plan, as reported by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Flops {
    pub add: f64,
    pub mul: f64,
    pub fma: f64,
}

impl Flops {
    /// Total floating point operations, counting a fused multiply-add twice.
    pub fn total(&self) -> f64 {
        self.add + self.mul + 2.0 * self.fma
    }
}

/// Shared view over owned and borrowed operand pairs.
pub trait OperandPair {
    fn input(&self) -> &Signal;
    fn output(&self) -> &Signal;
    fn raw_operands(&mut self) -> RawOperands;

    /// In-place iff both sides are backed by the same memory.
    fn placement(&self) -> Placement {
        if self.input().same_operand(self.output()) {
            Placement::InPlace
        } else {
            Placement::OutOfPlace
        }
    }

    fn complexity(&self) -> Complexity {
        Complexity::from_domains(self.input().domain(), self.output().domain())
    }

    /// Common representation of both sides, `None` if they differ.
    fn representation(&self) -> Option<Representation> {
        let (i, o) = (self.input().representation(), self.output().representation());
        (i == o).then_some(i)
    }
}

/// Operands owned by a plan for its lifetime.
#[derive(Debug)]
pub enum Operands {
    /// One signal serves as input and output.
    InPlace(Signal),
    OutOfPlace { input: Signal, output: Signal },
}

impl Operands {
    pub fn new(input: Signal, output: Signal) -> Self {
        Operands::OutOfPlace { input, output }
    }

    pub fn in_place(signal: Signal) -> Self {
        Operands::InPlace(signal)
    }

    fn input_mut(&mut self) -> &mut Signal {
        match self {
            Operands::InPlace(s) => s,
            Operands::OutOfPlace { input, .. } => input,
        }
    }

    fn output_mut(&mut self) -> &mut Signal {
        match self {
            Operands::InPlace(s) => s,
            Operands::OutOfPlace { output, .. } => output,
        }
    }
}

impl OperandPair for Operands {
    fn input(&self) -> &Signal {
        match self {
            Operands::InPlace(s) => s,
            Operands::OutOfPlace { input, .. } => input,
        }
    }

    fn output(&self) -> &Signal {
        match self {
            Operands::InPlace(s) => s,
            Operands::OutOfPlace { output, .. } => output,
        }
    }

    fn raw_operands(&mut self) -> RawOperands {
        match self {
            Operands::InPlace(s) => {
                let raw = s.as_raw_signal();
                RawOperands { input: raw, output: raw }
            }
            Operands::OutOfPlace { input, output } => RawOperands {
                input: input.as_raw_signal(),
                output: output.as_raw_signal(),
            },
        }
    }
}

/// Operands supplied to a single new-array execution.
#[derive(Debug)]
pub enum OperandsMut<'a> {
    InPlace(&'a mut Signal),
    OutOfPlace { input: &'a mut Signal, output: &'a mut Signal },
}

impl<'a> OperandsMut<'a> {
    pub fn new(input: &'a mut Signal, output: &'a mut Signal) -> Self {
        OperandsMut::OutOfPlace { input, output }
    }

    pub fn in_place(signal: &'a mut Signal) -> Self {
        OperandsMut::InPlace(signal)
    }
}

impl OperandPair for OperandsMut<'_> {
    fn input(&self) -> &Signal {
        match self {
            OperandsMut::InPlace(s) => s,
            OperandsMut::OutOfPlace { input, .. } => input,
        }
    }

    fn output(&self) -> &Signal {
        match self {
            OperandsMut::InPlace(s) => s,
            OperandsMut::OutOfPlace { output, .. } => output,
        }
    }

    fn raw_operands(&mut self) -> RawOperands {
        match self {
            OperandsMut::InPlace(s) => {
                let raw = s.as_raw_signal();
                RawOperands { input: raw, output: raw }
            }
            OperandsMut::OutOfPlace { input, output } => RawOperands {
                input: input.as_raw_signal(),
                output: output.as_raw_signal(),
            },
        }
    }
}

/// Geometry of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Contiguous row-major transform over the given extents.
    Simple(Dimensions),
    /// Explicit per-axis strides with optional batch axes.
    Guru(GuruShape),
}

impl Shape {
    pub fn rank(&self) -> usize {
        match self {
            Shape::Simple(d) => d.rank(),
            Shape::Guru(g) => g.rank(),
        }
    }

    /// Logical size of one transform.
    pub fn size(&self) -> usize {
        match self {
            Shape::Simple(d) => d.linear_size(),
            Shape::Guru(g) => g.transform_size(),
        }
    }

    pub fn extents(&self) -> Vec<usize> {
        match self {
            Shape::Simple(d) => d.to_vec(),
            Shape::Guru(g) => g.dims().iter().map(|d| d.n).collect(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Simple(d) => write!(f, "{d}"),
            Shape::Guru(g) => write!(f, "{g}"),
        }
    }
}

/// A native transform plan together with the operands it is bound to.
///
/// A `Plan` only exists with a live native handle; construction either fully
/// succeeds or returns an error. After [`Plan::destroy`] only the metadata
/// getters and [`Plan::is_destroyed`] remain usable. Dropping a live plan
/// destroys its handle.
pub struct Plan<B: Backend> {
    pub(crate) handle: Option<NonNull<B::Handle>>,
    pub(crate) operands: Operands,
    pub(crate) shape: Shape,
    pub(crate) sign: Sign,
    pub(crate) flags: Flags,
    pub(crate) complexity: Complexity,
    pub(crate) placement: Placement,
    pub(crate) representation: Representation,
    pub(crate) input_alignment: Alignment,
    pub(crate) output_alignment: Alignment,
    pub(crate) input_plane_gap: Option<isize>,
    pub(crate) output_plane_gap: Option<isize>,
    pub(crate) _marker: PhantomData<B>,
}

unsafe impl<B: Backend> Send for Plan<B> {}
unsafe impl<B: Backend> Sync for Plan<B> {}

impl<B: Backend> Plan<B> {
    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn requires_aligned(&self) -> bool {
        self.flags.requires_aligned()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Copy of the transform extents.
    pub fn dimensions(&self) -> Vec<usize> {
        self.shape.extents()
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Logical size of one transform: the product of the extents.
    pub fn size(&self) -> usize {
        self.shape.size()
    }

    pub fn input_alignment(&self) -> Alignment {
        self.input_alignment
    }

    pub fn output_alignment(&self) -> Alignment {
        self.output_alignment
    }

    /// Byte offset between the planes of a split complex input at creation.
    pub fn input_plane_gap(&self) -> Option<isize> {
        self.input_plane_gap
    }

    pub fn output_plane_gap(&self) -> Option<isize> {
        self.output_plane_gap
    }

    pub fn input(&self) -> &Signal {
        self.operands.input()
    }

    pub fn output(&self) -> &Signal {
        self.operands.output()
    }

    /// Write access to the bound input; for in-place plans this is also the output.
    pub fn input_mut(&mut self) -> SignalMut<'_> {
        SignalMut(self.operands.input_mut())
    }

    pub fn output_mut(&mut self) -> SignalMut<'_> {
        SignalMut(self.operands.output_mut())
    }

    pub fn is_destroyed(&self) -> bool {
        self.handle.is_none()
    }

    /// Live native handle, or [`ErrorKind::PlanDestroyed`].
    pub(crate) fn live_handle(&self) -> Result<NonNull<B::Handle>> {
        self.handle.ok_or_else(|| ErrorKind::PlanDestroyed.into())
    }

    /// Releases the native handle. A second call fails with [`ErrorKind::PlanDestroyed`].
    pub fn destroy(&mut self) -> Result<()> {
        let handle: NonNull<B::Handle> = self.handle.take().ok_or(ErrorKind::PlanDestroyed)?;
        log::debug!("{}: destroying {} plan over {}", B::NAME, self.complexity, self.shape);
        unsafe { B::destroy(handle) };
        Ok(())
    }

    /// Releases the handle if still live and hands back the bound operands.
    pub fn into_operands(mut self) -> Operands {
        if let Some(handle) = self.handle.take() {
            unsafe { B::destroy(handle) };
        }
        std::mem::replace(&mut self.operands, Operands::InPlace(Signal::real(0)))
    }
}

impl<B: Backend> Drop for Plan<B> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            log::debug!("{}: dropping live {} plan", B::NAME, self.complexity);
            unsafe { B::destroy(handle) }
        }
    }
}

impl<B: Backend> fmt::Debug for Plan<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("backend", &B::NAME)
            .field("complexity", &self.complexity)
            .field("placement", &self.placement)
            .field("representation", &self.representation)
            .field("shape", &self.shape)
            .field("sign", &self.sign)
            .field("flags", &self.flags)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_from_domains() {
        use Domain::{Complex, Real};
        assert_eq!(Complexity::from_domains(Complex, Complex), Complexity::ComplexToComplex);
        assert_eq!(Complexity::from_domains(Complex, Real), Complexity::ComplexToReal);
        assert_eq!(Complexity::from_domains(Real, Complex), Complexity::RealToComplex);
        assert_eq!(Complexity::from_domains(Real, Real), Complexity::RealToReal);
        assert_eq!(Complexity::ComplexToReal.domain(Side::Input), Domain::Complex);
        assert_eq!(Complexity::ComplexToReal.domain(Side::Output), Domain::Real);
    }

    #[test]
    fn placement_follows_identity() {
        let ops: Operands = Operands::in_place(Signal::complex(4));
        assert_eq!(ops.placement(), Placement::InPlace);
        let ops: Operands = Operands::new(Signal::complex(4), Signal::complex(4));
        assert_eq!(ops.placement(), Placement::OutOfPlace);

        let mut a: Signal = Signal::complex(4);
        let mut b: Signal = Signal::complex(4);
        assert_eq!(OperandsMut::new(&mut a, &mut b).placement(), Placement::OutOfPlace);
        assert_eq!(OperandsMut::in_place(&mut a).placement(), Placement::InPlace);
    }

    #[test]
    fn in_place_raw_operands_alias() {
        let mut ops: Operands = Operands::in_place(Signal::complex(4));
        let raw: RawOperands = ops.raw_operands();
        assert_eq!(raw.input.re, raw.output.re);
    }

    #[test]
    fn mixed_representation() {
        let ops: Operands = Operands::new(Signal::split_complex(4), Signal::complex(4));
        assert_eq!(ops.representation(), None);
        let ops: Operands = Operands::new(Signal::split_complex(4), Signal::split_real(4));
        assert_eq!(ops.representation(), Some(Representation::Split));
        assert_eq!(ops.complexity(), Complexity::ComplexToReal);
    }
}
