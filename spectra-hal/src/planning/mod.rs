//! Validation shared by every planning path, and the dispatch tables that pick
//! the native primitive for a validated request.
//!
//! Plan creation runs the checks in a fixed order: complexity (real-to-real
//! is rejected before anything else), representation, placement, sizes and
//! alignment. The engine is only reached once every check passed, and a null
//! handle from the engine becomes [`ErrorKind::NativePlanningFailed`].
//!
//! New-array execution re-checks the operands against the plan in the order
//! destroyed state, kinds, sizes, placement, alignment, split plane gaps.

mod dispatch;

#[cfg(test)]
mod tests;

use std::{marker::PhantomData, ptr::NonNull};

use crate::{
    error::{Error, ErrorKind, Result},
    layouts::{
        Alignment, Backend, Complexity, Dimensions, Flags, GuruShape, OperandPair, Operands, OperandsMut, Placement, Plan,
        RawOperands, Representation, Shape, Side, Sign, Signal,
    },
    oep::{AlignmentOfImpl, PlanDftImpl, PlanExecuteImpl, PlanGuruImpl},
};

/// Outcome of the operand checks common to both creation paths.
struct Classified {
    complexity: Complexity,
    representation: Representation,
    placement: Placement,
}

fn classify<O: OperandPair>(operands: &O) -> Result<Classified> {
    let complexity: Complexity = operands.complexity();
    if complexity == Complexity::RealToReal {
        return Err(ErrorKind::UnsupportedComplexity(complexity).into());
    }
    let representation: Representation = operands.representation().ok_or_else(|| ErrorKind::UnsupportedRepresentation {
        message: "input and output must both be interleaved or both be split".to_string(),
    })?;
    Ok(Classified {
        complexity,
        representation,
        placement: operands.placement(),
    })
}

/// Checks that the operands fit `shape` for a transform of kind `complexity`.
pub(crate) fn ensure_sizes(complexity: Complexity, shape: &Shape, input: &Signal, output: &Signal) -> Result<()> {
    match shape {
        Shape::Simple(dims) => ensure_simple_sizes(complexity, dims, input, output),
        Shape::Guru(guru) => ensure_guru_sizes(complexity, guru, input, output),
    }
}

/// Both operands hold exactly the linear size, each in its own units.
fn ensure_simple_sizes(complexity: Complexity, dims: &Dimensions, input: &Signal, output: &Signal) -> Result<()> {
    let (is, os) = (input.size(), output.size());
    if is != os {
        return Err(ErrorKind::OperandSizeMismatch {
            complexity,
            input: is,
            output: os,
        }
        .into());
    }
    if is != dims.linear_size() {
        return Err(Error::size_mismatch(Side::Input, dims.linear_size(), is));
    }
    Ok(())
}

/// Each operand covers the highest address its strides reach.
fn ensure_guru_sizes(complexity: Complexity, guru: &GuruShape, input: &Signal, output: &Signal) -> Result<()> {
    for (side, size) in [(Side::Input, input.size()), (Side::Output, output.size())] {
        let extent: usize = guru.extent(complexity, side);
        if size < extent {
            return Err(Error::size_mismatch(side, extent, size));
        }
    }
    Ok(())
}

pub(crate) fn alignment_of<B: Backend + AlignmentOfImpl<B>>(signal: &Signal) -> Alignment {
    match signal {
        Signal::Complex(s) | Signal::Real(s) => Alignment::interleaved(B::alignment_of_impl(s.as_ptr())),
        Signal::Split(s) => Alignment::split(
            B::alignment_of_impl(s.re().as_ptr()),
            s.im().map(|im| B::alignment_of_impl(im.as_ptr())),
        ),
    }
}

/// Split complex-to-complex engines only compute the forward transform; the
/// backward one is obtained by exchanging the planes of both operands.
fn swaps_planes(complexity: Complexity, representation: Representation, sign: Sign) -> bool {
    complexity == Complexity::ComplexToComplex && representation == Representation::Split && sign == Sign::Positive
}

impl<B: Backend> Plan<B> {
    pub(crate) fn swaps_planes(&self) -> bool {
        swaps_planes(self.complexity, self.representation, self.sign)
    }
}

/// Creates a contiguous plan over `dims`, defaulting to the input's size.
pub(crate) fn plan_simple<B>(mut operands: Operands, sign: Sign, flags: Flags, dims: Option<Dimensions>) -> Result<Plan<B>>
where
    B: Backend + PlanDftImpl<B> + AlignmentOfImpl<B>,
{
    let classified: Classified = classify(&operands)?;
    if classified.representation != Representation::Interleaved {
        return Err(ErrorKind::UnsupportedRepresentation {
            message: "split operands require a guru plan".to_string(),
        }
        .into());
    }
    let dims: Dimensions = match dims {
        Some(dims) => dims,
        None if operands.input().size() == 0 => return Err(ErrorKind::ZeroLengthTransform.into()),
        None => Dimensions::one(operands.input().size())?,
    };
    ensure_simple_sizes(classified.complexity, &dims, operands.input(), operands.output())?;
    let (ia, oa) = (alignment_of::<B>(operands.input()), alignment_of::<B>(operands.output()));
    let raw: RawOperands = operands.raw_operands();
    let handle: *mut B::Handle = unsafe { dispatch::create_simple::<B>(classified.complexity, &dims, raw, sign, flags) };
    finish(handle, operands, Shape::Simple(dims), sign, flags, classified, (ia, oa))
}

/// Creates a strided plan; accepts interleaved and split operands.
pub(crate) fn plan_guru<B>(shape: GuruShape, mut operands: Operands, sign: Sign, flags: Flags) -> Result<Plan<B>>
where
    B: Backend + PlanGuruImpl<B> + AlignmentOfImpl<B>,
{
    let classified: Classified = classify(&operands)?;
    ensure_guru_sizes(classified.complexity, &shape, operands.input(), operands.output())?;
    let (ia, oa) = (alignment_of::<B>(operands.input()), alignment_of::<B>(operands.output()));
    let mut raw: RawOperands = operands.raw_operands();
    if swaps_planes(classified.complexity, classified.representation, sign) {
        raw = raw.swap_planes();
    }
    let handle: *mut B::Handle =
        unsafe { dispatch::create_guru::<B>(classified.complexity, classified.representation, &shape, raw, sign, flags) };
    finish(handle, operands, Shape::Guru(shape), sign, flags, classified, (ia, oa))
}

fn finish<B: Backend>(
    handle: *mut B::Handle,
    operands: Operands,
    shape: Shape,
    sign: Sign,
    flags: Flags,
    classified: Classified,
    (input_alignment, output_alignment): (Alignment, Alignment),
) -> Result<Plan<B>> {
    let Some(handle) = NonNull::new(handle) else {
        log::warn!(
            "{}: engine returned no plan for a {} {} transform over {shape} (flags {flags:?})",
            B::NAME,
            classified.placement,
            classified.complexity,
        );
        return Err(ErrorKind::NativePlanningFailed {
            complexity: classified.complexity,
            rank: shape.rank(),
        }
        .into());
    };
    log::debug!(
        "{}: planned {} {} {} transform over {shape}",
        B::NAME,
        classified.placement,
        classified.representation.name(),
        classified.complexity,
    );
    let (input_plane_gap, output_plane_gap) = (operands.input().plane_gap(), operands.output().plane_gap());
    Ok(Plan {
        handle: Some(handle),
        operands,
        shape,
        sign,
        flags,
        complexity: classified.complexity,
        placement: classified.placement,
        representation: classified.representation,
        input_alignment,
        output_alignment,
        input_plane_gap,
        output_plane_gap,
        _marker: PhantomData,
    })
}

/// Runs the transform on the operands bound at creation.
pub(crate) fn execute<B>(plan: &mut Plan<B>) -> Result<()>
where
    B: Backend + PlanExecuteImpl<B>,
{
    let handle: NonNull<B::Handle> = plan.live_handle()?;
    log::trace!("{}: execute {} plan", B::NAME, plan.complexity);
    unsafe { B::execute_impl(handle) };
    Ok(())
}

/// Checks `operands` against `plan` and runs the matching new-array primitive.
pub(crate) fn execute_with<B>(plan: &Plan<B>, mut operands: OperandsMut<'_>) -> Result<()>
where
    B: Backend + PlanExecuteImpl<B> + AlignmentOfImpl<B>,
{
    let handle: NonNull<B::Handle> = plan.live_handle()?;

    let complexity: Complexity = operands.complexity();
    if complexity != plan.complexity {
        return Err(ErrorKind::ComplexityMismatch {
            expected: plan.complexity,
            actual: complexity,
        }
        .into());
    }
    if operands.representation() != Some(plan.representation) {
        return Err(ErrorKind::RepresentationMismatch {
            expected: plan.representation.name(),
            actual: operands.representation().map_or("mixed", |r| r.name()),
        }
        .into());
    }

    ensure_sizes(plan.complexity, &plan.shape, operands.input(), operands.output())?;

    let placement: Placement = operands.placement();
    if placement != plan.placement {
        return Err(ErrorKind::PlacementMismatch {
            expected: plan.placement,
            actual: placement,
        }
        .into());
    }

    if plan.requires_aligned() {
        for (side, expected, signal) in [
            (Side::Input, plan.input_alignment, operands.input()),
            (Side::Output, plan.output_alignment, operands.output()),
        ] {
            let actual: Alignment = alignment_of::<B>(signal);
            if actual != expected {
                return Err(ErrorKind::AlignmentMismatch { side, expected, actual }.into());
            }
        }
    }

    if B::FIXED_PLANE_GAP {
        for (side, expected, signal) in [
            (Side::Input, plan.input_plane_gap, operands.input()),
            (Side::Output, plan.output_plane_gap, operands.output()),
        ] {
            match (expected, signal.plane_gap()) {
                (Some(expected), Some(actual)) if expected != actual => {
                    return Err(ErrorKind::PlaneGapMismatch { side, expected, actual }.into());
                }
                _ => {}
            }
        }
    }

    let mut raw: RawOperands = operands.raw_operands();
    if plan.swaps_planes() {
        raw = raw.swap_planes();
    }
    log::trace!("{}: execute {} plan on new operands", B::NAME, plan.complexity);
    unsafe { dispatch::execute_new::<B>(plan.complexity, plan.representation, handle, raw) };
    Ok(())
}
