use std::{cell::RefCell, path::Path, ptr::NonNull};

use crate::{
    alignment_class,
    api::{PlanExecute, PlanGuruNew, PlanInfo, PlanNew},
    error::{Error, ErrorCategory, ErrorKind, Result},
    layouts::{
        AlignedBuf, Backend, Complexity, Dimensions, Engine, EngineConfig, Flags, Flops, GuruShape, IoDim, NativeIoDim,
        Operands, OperandsMut, Placement, Plan, RawOperands, Side, Sign, Signal, Split,
    },
    oep::{AlignmentOfImpl, PlanDftImpl, PlanExecuteImpl, PlanGuruImpl, PlanInfoImpl},
};

thread_local! {
    static CALLS: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
}

fn record(primitive: &'static str) {
    CALLS.with(|c| c.borrow_mut().push(primitive));
}

fn take_calls() -> Vec<&'static str> {
    CALLS.with(|c| std::mem::take(&mut *c.borrow_mut()))
}

/// Engine that records which primitive was reached and never touches memory.
struct Recorder;

struct RecordedPlan {
    primitive: &'static str,
    ops: RawOperands,
}

impl Backend for Recorder {
    type Handle = RecordedPlan;
    const NAME: &'static str = "recorder";

    unsafe fn destroy(handle: NonNull<RecordedPlan>) {
        record("destroy");
        unsafe { drop(Box::from_raw(handle.as_ptr())) }
    }
}

fn leak(primitive: &'static str, ops: RawOperands, flags: Flags) -> *mut RecordedPlan {
    record(primitive);
    if flags.contains(Flags::WISDOM_ONLY) {
        return std::ptr::null_mut();
    }
    Box::into_raw(Box::new(RecordedPlan { primitive, ops }))
}

unsafe impl PlanDftImpl<Recorder> for Recorder {
    unsafe fn plan_dft_1d_impl(_: i32, ops: RawOperands, _: Sign, flags: Flags) -> *mut RecordedPlan {
        leak("dft_1d", ops, flags)
    }
    unsafe fn plan_dft_2d_impl(_: i32, _: i32, ops: RawOperands, _: Sign, flags: Flags) -> *mut RecordedPlan {
        leak("dft_2d", ops, flags)
    }
    unsafe fn plan_dft_3d_impl(_: i32, _: i32, _: i32, ops: RawOperands, _: Sign, flags: Flags) -> *mut RecordedPlan {
        leak("dft_3d", ops, flags)
    }
    unsafe fn plan_dft_impl(_: &[i32], ops: RawOperands, _: Sign, flags: Flags) -> *mut RecordedPlan {
        leak("dft", ops, flags)
    }
    unsafe fn plan_dft_r2c_1d_impl(_: i32, ops: RawOperands, flags: Flags) -> *mut RecordedPlan {
        leak("dft_r2c_1d", ops, flags)
    }
    unsafe fn plan_dft_r2c_2d_impl(_: i32, _: i32, ops: RawOperands, flags: Flags) -> *mut RecordedPlan {
        leak("dft_r2c_2d", ops, flags)
    }
    unsafe fn plan_dft_r2c_3d_impl(_: i32, _: i32, _: i32, ops: RawOperands, flags: Flags) -> *mut RecordedPlan {
        leak("dft_r2c_3d", ops, flags)
    }
    unsafe fn plan_dft_r2c_impl(_: &[i32], ops: RawOperands, flags: Flags) -> *mut RecordedPlan {
        leak("dft_r2c", ops, flags)
    }
    unsafe fn plan_dft_c2r_1d_impl(_: i32, ops: RawOperands, flags: Flags) -> *mut RecordedPlan {
        leak("dft_c2r_1d", ops, flags)
    }
    unsafe fn plan_dft_c2r_2d_impl(_: i32, _: i32, ops: RawOperands, flags: Flags) -> *mut RecordedPlan {
        leak("dft_c2r_2d", ops, flags)
    }
    unsafe fn plan_dft_c2r_3d_impl(_: i32, _: i32, _: i32, ops: RawOperands, flags: Flags) -> *mut RecordedPlan {
        leak("dft_c2r_3d", ops, flags)
    }
    unsafe fn plan_dft_c2r_impl(_: &[i32], ops: RawOperands, flags: Flags) -> *mut RecordedPlan {
        leak("dft_c2r", ops, flags)
    }
}

unsafe impl PlanGuruImpl<Recorder> for Recorder {
    unsafe fn plan_guru_dft_impl(
        _: &[NativeIoDim],
        _: &[NativeIoDim],
        ops: RawOperands,
        _: Sign,
        flags: Flags,
    ) -> *mut RecordedPlan {
        leak("guru_dft", ops, flags)
    }
    unsafe fn plan_guru_split_dft_impl(_: &[NativeIoDim], _: &[NativeIoDim], ops: RawOperands, flags: Flags) -> *mut RecordedPlan {
        leak("guru_split_dft", ops, flags)
    }
    unsafe fn plan_guru_dft_r2c_impl(_: &[NativeIoDim], _: &[NativeIoDim], ops: RawOperands, flags: Flags) -> *mut RecordedPlan {
        leak("guru_dft_r2c", ops, flags)
    }
    unsafe fn plan_guru_split_dft_r2c_impl(
        _: &[NativeIoDim],
        _: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> *mut RecordedPlan {
        leak("guru_split_dft_r2c", ops, flags)
    }
    unsafe fn plan_guru_dft_c2r_impl(_: &[NativeIoDim], _: &[NativeIoDim], ops: RawOperands, flags: Flags) -> *mut RecordedPlan {
        leak("guru_dft_c2r", ops, flags)
    }
    unsafe fn plan_guru_split_dft_c2r_impl(
        _: &[NativeIoDim],
        _: &[NativeIoDim],
        ops: RawOperands,
        flags: Flags,
    ) -> *mut RecordedPlan {
        leak("guru_split_dft_c2r", ops, flags)
    }
}

unsafe impl PlanExecuteImpl<Recorder> for Recorder {
    const FIXED_PLANE_GAP: bool = true;

    unsafe fn execute_impl(_: NonNull<RecordedPlan>) {
        record("execute")
    }
    unsafe fn execute_dft_impl(_: NonNull<RecordedPlan>, _: RawOperands) {
        record("execute_dft")
    }
    unsafe fn execute_dft_r2c_impl(_: NonNull<RecordedPlan>, _: RawOperands) {
        record("execute_dft_r2c")
    }
    unsafe fn execute_dft_c2r_impl(_: NonNull<RecordedPlan>, _: RawOperands) {
        record("execute_dft_c2r")
    }
    unsafe fn execute_split_dft_impl(_: NonNull<RecordedPlan>, _: RawOperands) {
        record("execute_split_dft")
    }
    unsafe fn execute_split_dft_r2c_impl(_: NonNull<RecordedPlan>, _: RawOperands) {
        record("execute_split_dft_r2c")
    }
    unsafe fn execute_split_dft_c2r_impl(_: NonNull<RecordedPlan>, _: RawOperands) {
        record("execute_split_dft_c2r")
    }
}

unsafe impl PlanInfoImpl<Recorder> for Recorder {
    unsafe fn cost_impl(_: NonNull<RecordedPlan>) -> f64 {
        0.0
    }
    unsafe fn estimate_cost_impl(_: NonNull<RecordedPlan>) -> f64 {
        1.0
    }
    unsafe fn flops_impl(_: NonNull<RecordedPlan>) -> Flops {
        Flops::default()
    }
    unsafe fn print_impl(_: NonNull<RecordedPlan>) {}
    unsafe fn sprint_impl(handle: NonNull<RecordedPlan>) -> String {
        format!("(recorded {})", unsafe { handle.as_ref() }.primitive)
    }
    unsafe fn fprint_impl(_: NonNull<RecordedPlan>, _: &Path) -> Result<()> {
        Ok(())
    }
}

unsafe impl AlignmentOfImpl<Recorder> for Recorder {
    fn alignment_of_impl(ptr: *const f64) -> i32 {
        alignment_class(ptr)
    }
}

fn engine() -> Engine<Recorder> {
    Engine::from_config(EngineConfig::default())
}

fn dims(d: &[usize]) -> Option<Dimensions> {
    Some(Dimensions::new(d).unwrap())
}

fn recorded_primitive(plan: &Plan<Recorder>) -> &'static str {
    unsafe { plan.live_handle().unwrap().as_ref() }.primitive
}

#[test]
fn rank_selects_primitive() {
    let engine: Engine<Recorder> = engine();
    let cases: [(&[usize], Complexity, &str); 9] = [
        (&[8], Complexity::ComplexToComplex, "dft_1d"),
        (&[4, 2], Complexity::ComplexToComplex, "dft_2d"),
        (&[2, 2, 2], Complexity::ComplexToComplex, "dft_3d"),
        (&[2, 2, 2, 2], Complexity::ComplexToComplex, "dft"),
        (&[8], Complexity::RealToComplex, "dft_r2c_1d"),
        (&[2, 2, 2], Complexity::RealToComplex, "dft_r2c_3d"),
        (&[4, 2], Complexity::ComplexToReal, "dft_c2r_2d"),
        (&[2, 2, 2, 2], Complexity::ComplexToReal, "dft_c2r"),
        (&[2, 2, 2, 2, 2], Complexity::RealToComplex, "dft_r2c"),
    ];
    for (d, complexity, expected) in cases {
        let n: usize = d.iter().product();
        let (input, output) = match complexity {
            Complexity::ComplexToComplex => (Signal::complex(n), Signal::complex(n)),
            Complexity::RealToComplex => (Signal::real(n), Signal::complex(n)),
            _ => (Signal::complex(n), Signal::real(n)),
        };
        let plan: Plan<Recorder> = engine
            .plan(Operands::new(input, output), Sign::FORWARD, Flags::ESTIMATE, dims(d))
            .unwrap();
        assert_eq!(plan.complexity(), complexity);
        assert_eq!(recorded_primitive(&plan), expected);
        assert_eq!(plan.size(), n);
        assert_eq!(plan.rank(), d.len());
        assert_eq!(plan.dimensions(), d.to_vec());
    }
}

#[test]
fn placement_is_derived() {
    let engine: Engine<Recorder> = engine();
    let plan: Plan<Recorder> = engine
        .plan(Operands::in_place(Signal::complex(8)), Sign::FORWARD, Flags::ESTIMATE, None)
        .unwrap();
    assert_eq!(plan.placement(), Placement::InPlace);
    assert!(plan.input().same_operand(plan.output()));

    let plan: Plan<Recorder> = engine
        .plan(
            Operands::new(Signal::complex(8), Signal::complex(8)),
            Sign::FORWARD,
            Flags::ESTIMATE,
            None,
        )
        .unwrap();
    assert_eq!(plan.placement(), Placement::OutOfPlace);
}

#[test]
fn size_mismatch_never_reaches_engine() {
    take_calls();
    let engine: Engine<Recorder> = engine();
    let err: Error = engine
        .plan(
            Operands::new(Signal::complex(8), Signal::complex(8)),
            Sign::FORWARD,
            Flags::ESTIMATE,
            dims(&[4]),
        )
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::SizeMismatch {
            side: Side::Input,
            expected: 4,
            actual: 8
        }
    ));
    assert_eq!(err.category(), ErrorCategory::Configuration);

    let err: Error = engine
        .plan(
            Operands::new(Signal::real(8), Signal::complex(6)),
            Sign::FORWARD,
            Flags::ESTIMATE,
            None,
        )
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::OperandSizeMismatch { .. }));
    assert!(take_calls().is_empty());
}

#[test]
fn real_to_real_rejected_first() {
    take_calls();
    let engine: Engine<Recorder> = engine();
    // Mismatched sizes and a split/interleaved mix would also fail; complexity wins.
    let err: Error = engine
        .plan(
            Operands::new(Signal::real(4), Signal::split_real(5)),
            Sign::FORWARD,
            Flags::ESTIMATE,
            None,
        )
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnsupportedComplexity(Complexity::RealToReal)));

    let shape: GuruShape = GuruShape::single(vec![IoDim::new(4, 1, 1)]).unwrap();
    let err: Error = engine
        .plan_guru(
            shape,
            Operands::new(Signal::split_real(4), Signal::split_real(4)),
            Sign::FORWARD,
            Flags::ESTIMATE,
        )
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnsupportedComplexity(Complexity::RealToReal)));
    assert!(take_calls().is_empty());
}

#[test]
fn simple_path_rejects_split_operands() {
    let engine: Engine<Recorder> = engine();
    for operands in [
        Operands::new(Signal::split_complex(4), Signal::split_complex(4)),
        Operands::new(Signal::split_complex(4), Signal::complex(4)),
    ] {
        let err: Error = engine
            .plan(operands, Sign::FORWARD, Flags::ESTIMATE, None)
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnsupportedRepresentation { .. }));
    }
}

#[test]
fn zero_length_without_dimensions() {
    let engine: Engine<Recorder> = engine();
    let err: Error = engine
        .plan(
            Operands::new(Signal::complex(0), Signal::complex(0)),
            Sign::FORWARD,
            Flags::ESTIMATE,
            None,
        )
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::ZeroLengthTransform));
}

#[test]
fn null_handle_is_planning_failure() {
    let engine: Engine<Recorder> = engine();
    let err: Error = engine
        .plan(
            Operands::new(Signal::complex(4), Signal::complex(4)),
            Sign::FORWARD,
            Flags::WISDOM_ONLY,
            dims(&[2, 2]),
        )
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::NativePlanningFailed {
            complexity: Complexity::ComplexToComplex,
            rank: 2
        }
    ));
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn guru_dispatch_and_extent() {
    let engine: Engine<Recorder> = engine();
    let shape: GuruShape = GuruShape::new(vec![IoDim::new(4, 2, 2)], vec![IoDim::new(2, 1, 1)]).unwrap();

    let err: Error = engine
        .plan_guru(
            shape.clone(),
            Operands::new(Signal::real(8), Signal::split_complex(8)),
            Sign::FORWARD,
            Flags::ESTIMATE,
        )
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnsupportedRepresentation { .. }));

    let plan: Plan<Recorder> = engine
        .plan_guru(
            shape.clone(),
            Operands::new(Signal::real(8), Signal::complex(8)),
            Sign::FORWARD,
            Flags::ESTIMATE,
        )
        .unwrap();
    assert_eq!(recorded_primitive(&plan), "guru_dft_r2c");

    let err: Error = engine
        .plan_guru(
            shape.clone(),
            Operands::new(Signal::complex(8), Signal::complex(7)),
            Sign::FORWARD,
            Flags::ESTIMATE,
        )
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::SizeMismatch {
            side: Side::Output,
            expected: 8,
            actual: 7
        }
    ));

    let plan: Plan<Recorder> = engine
        .plan_guru(
            shape,
            Operands::new(Signal::split_complex(8), Signal::split_real(8)),
            Sign::BACKWARD,
            Flags::ESTIMATE,
        )
        .unwrap();
    assert_eq!(plan.complexity(), Complexity::ComplexToReal);
    assert_eq!(recorded_primitive(&plan), "guru_split_dft_c2r");
    assert_eq!(plan.size(), 4);
}

#[test]
fn split_backward_swaps_planes() {
    let engine: Engine<Recorder> = engine();
    let shape: GuruShape = GuruShape::single(vec![IoDim::new(4, 1, 1)]).unwrap();
    let input: Signal = Signal::split_complex(4);
    let (re, im) = {
        let split = input.as_split().unwrap();
        (split.re().as_ptr(), split.im().unwrap().as_ptr())
    };
    let plan: Plan<Recorder> = engine
        .plan_guru(
            shape.clone(),
            Operands::new(input, Signal::split_complex(4)),
            Sign::BACKWARD,
            Flags::ESTIMATE,
        )
        .unwrap();
    let recorded: RawOperands = unsafe { plan.live_handle().unwrap().as_ref() }.ops;
    assert_eq!(recorded.input.re as *const f64, im);
    assert_eq!(recorded.input.im as *const f64, re);

    let plan: Plan<Recorder> = engine
        .plan_guru(
            shape,
            Operands::new(Signal::split_complex(4), Signal::split_complex(4)),
            Sign::FORWARD,
            Flags::ESTIMATE,
        )
        .unwrap();
    let recorded: RawOperands = unsafe { plan.live_handle().unwrap().as_ref() }.ops;
    assert_eq!(
        recorded.input.re as *const f64,
        plan.input().as_split().unwrap().re().as_ptr()
    );
}

#[test]
fn execute_with_checks_in_order() {
    let engine: Engine<Recorder> = engine();
    let aligned = || Signal::Complex(AlignedBuf::zeroed(16).into());
    let mut plan: Plan<Recorder> = engine
        .plan(Operands::new(aligned(), aligned()), Sign::FORWARD, Flags::ESTIMATE, None)
        .unwrap();
    take_calls();

    let mut c8: Signal = Signal::Complex(AlignedBuf::zeroed(16).into());
    let mut c8_b: Signal = Signal::Complex(AlignedBuf::zeroed(16).into());
    let mut r8: Signal = Signal::real(8);
    let mut c4: Signal = Signal::complex(4);
    let mut s8: Signal = Signal::split_complex(8);
    let mut s8_b: Signal = Signal::split_complex(8);

    let err: Error = plan.execute_with(OperandsMut::new(&mut c8, &mut r8)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::ComplexityMismatch { .. }));
    assert_eq!(err.category(), ErrorCategory::Usage);

    let err: Error = plan.execute_with(OperandsMut::new(&mut s8, &mut s8_b)).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::RepresentationMismatch {
            expected: "interleaved",
            actual: "split"
        }
    ));

    let err: Error = plan.execute_with(OperandsMut::new(&mut c8, &mut c4)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::OperandSizeMismatch { .. }));

    let err: Error = plan.execute_with(OperandsMut::in_place(&mut c8)).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::PlacementMismatch {
            expected: Placement::OutOfPlace,
            actual: Placement::InPlace
        }
    ));
    assert!(take_calls().is_empty());

    plan.execute_with(OperandsMut::new(&mut c8, &mut c8_b)).unwrap();
    assert_eq!(take_calls(), vec!["execute_dft"]);

    plan.destroy().unwrap();
    let err: Error = plan.execute_with(OperandsMut::new(&mut c8, &mut r8)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::PlanDestroyed));
}

#[test]
fn alignment_contract() {
    let engine: Engine<Recorder> = engine();
    let aligned = || Signal::Complex(AlignedBuf::zeroed(16).into());
    let shifted = || Signal::Complex(AlignedBuf::zeroed_at_offset(16, 8).into());

    let plan: Plan<Recorder> = engine
        .plan(Operands::new(aligned(), aligned()), Sign::FORWARD, Flags::ESTIMATE, None)
        .unwrap();
    assert!(plan.requires_aligned());
    let (mut a, mut b) = (aligned(), aligned());
    plan.execute_with(OperandsMut::new(&mut a, &mut b)).unwrap();

    let (mut a, mut b) = (shifted(), aligned());
    let err: Error = plan.execute_with(OperandsMut::new(&mut a, &mut b)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::AlignmentMismatch { side: Side::Input, .. }));

    let plan: Plan<Recorder> = engine
        .plan(
            Operands::new(aligned(), aligned()),
            Sign::FORWARD,
            Flags::ESTIMATE | Flags::UNALIGNED,
            None,
        )
        .unwrap();
    assert!(!plan.requires_aligned());
    take_calls();
    plan.execute_with(OperandsMut::new(&mut a, &mut b)).unwrap();
    assert_eq!(take_calls(), vec!["execute_dft"]);
}

#[test]
fn destroy_lifecycle() {
    let engine: Engine<Recorder> = engine();
    let mut plan: Plan<Recorder> = engine
        .plan(
            Operands::new(Signal::complex(8), Signal::complex(8)),
            Sign::FORWARD,
            Flags::ESTIMATE,
            None,
        )
        .unwrap();
    take_calls();
    assert_eq!(plan.to_string(), "(recorded dft_1d)");
    plan.execute().unwrap();
    assert_eq!(plan.estimate_cost().unwrap(), 1.0);

    plan.destroy().unwrap();
    assert!(plan.is_destroyed());
    assert_eq!(plan.to_string(), "destroyed plan");
    assert_eq!(plan.complexity(), Complexity::ComplexToComplex);

    for err in [
        plan.destroy().unwrap_err(),
        plan.execute().unwrap_err(),
        plan.cost().unwrap_err(),
        plan.sprint().unwrap_err(),
    ] {
        assert!(matches!(err.kind(), ErrorKind::PlanDestroyed));
        assert_eq!(err.category(), ErrorCategory::Usage);
    }
    drop(plan);
    assert_eq!(take_calls(), vec!["execute", "destroy"]);
}

#[test]
fn drop_releases_live_handle() {
    let engine: Engine<Recorder> = engine();
    let plan: Plan<Recorder> = engine
        .plan(Operands::in_place(Signal::complex(4)), Sign::FORWARD, Flags::ESTIMATE, None)
        .unwrap();
    take_calls();
    drop(plan);
    assert_eq!(take_calls(), vec!["destroy"]);

    let plan: Plan<Recorder> = engine
        .plan(Operands::in_place(Signal::complex(4)), Sign::FORWARD, Flags::ESTIMATE, None)
        .unwrap();
    take_calls();
    let operands: Operands = plan.into_operands();
    assert_eq!(take_calls(), vec!["destroy"]);
    assert!(matches!(operands, Operands::InPlace(ref s) if s.size() == 4));
}

#[test]
fn split_plane_gap_must_match() {
    let engine: Engine<Recorder> = engine();
    let shape: GuruShape = GuruShape::single(vec![IoDim::new(4, 1, 1)]).unwrap();
    let plan: Plan<Recorder> = engine
        .plan_guru(
            shape,
            Operands::new(Signal::split_complex(4), Signal::split_complex(4)),
            Sign::FORWARD,
            Flags::ESTIMATE | Flags::UNALIGNED,
        )
        .unwrap();
    let expected: isize = plan.input_plane_gap().unwrap();
    assert_eq!(plan.input().plane_gap(), Some(expected));
    assert_eq!(plan.output_plane_gap(), plan.output().plane_gap());

    // Exchanging the planes negates the offset, so one of the two orders differs.
    let (re, im) = (vec![0.0; 4], vec![0.0; 4]);
    let gap: isize = (im.as_ptr() as isize).wrapping_sub(re.as_ptr() as isize);
    let (re, im) = if gap == expected { (im, re) } else { (re, im) };
    let mut input: Signal = Signal::Split(Split::complex(re, im).unwrap());
    let mut output: Signal = Signal::split_complex(4);
    take_calls();

    let err: Error = plan.execute_with(OperandsMut::new(&mut input, &mut output)).unwrap_err();
    match err.kind() {
        ErrorKind::PlaneGapMismatch { side, expected: e, actual } => {
            assert_eq!(*side, Side::Input);
            assert_eq!(*e, expected);
            assert_eq!(Some(*actual), input.plane_gap());
        }
        kind => panic!("unexpected error {kind}"),
    }
    assert_eq!(err.category(), ErrorCategory::Usage);
    assert!(take_calls().is_empty());
}
