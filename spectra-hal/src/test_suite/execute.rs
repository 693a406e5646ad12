use rand::Rng;

use crate::{
    api::{AlignmentOf, PlanExecute, PlanNew, SignalAlloc},
    error::ErrorKind,
    layouts::{AlignedBuf, Engine, Flags, Operands, OperandsMut, Placement, Plan, Side, Sign, Signal},
    oep::CompleteBackend,
    source::Source,
    test_suite::{assert_close, reference_c2c},
};

/// New-array execution on engine-allocated signals of the plan's class.
pub fn test_execute_with_native_signals<B: CompleteBackend>(engine: &Engine<B>) {
    let mut source: Source = Source::new([5u8; 32]);
    let n: usize = 32;

    let plan: Plan<B> = engine
        .plan(
            Operands::new(engine.alloc_complex(n), engine.alloc_complex(n)),
            Sign::FORWARD,
            Flags::ESTIMATE,
            None,
        )
        .unwrap();
    assert!(plan.input().is_native());

    for _ in 0..3 {
        let mut a: Signal = engine.alloc_complex(n);
        let mut b: Signal = engine.alloc_complex(n);
        a.fill_uniform(&mut source);
        let input: Vec<f64> = a.to_interleaved();

        plan.execute_with(OperandsMut::new(&mut a, &mut b)).unwrap();

        assert_close(&b.to_interleaved(), &reference_c2c(&[n], Sign::FORWARD, &input), 1e-10);
    }

    let in_place: Plan<B> = engine
        .plan(
            Operands::in_place(engine.alloc_complex(n)),
            Sign::BACKWARD,
            Flags::ESTIMATE,
            None,
        )
        .unwrap();
    let mut a: Signal = engine.alloc_complex(n);
    a.fill_uniform(&mut source);
    let input: Vec<f64> = a.to_interleaved();
    in_place.execute_with(OperandsMut::in_place(&mut a)).unwrap();
    assert_close(&a.to_interleaved(), &reference_c2c(&[n], Sign::BACKWARD, &input), 1e-10);
}

/// Executing on a buffer of another alignment class is refused unless the
/// plan was created with [`Flags::UNALIGNED`].
pub fn test_execute_with_alignment<B: CompleteBackend>(engine: &Engine<B>) {
    let n: usize = 16;
    let shifted: usize = size_of::<f64>();

    let aligned_class = engine.alignment_of(&Signal::complex_from(AlignedBuf::zeroed(2 * n)).unwrap());
    let shifted_class = engine.alignment_of(&Signal::complex_from(AlignedBuf::zeroed_at_offset(2 * n, shifted)).unwrap());
    if aligned_class == shifted_class {
        log::info!(
            "{}: buffers {shifted} bytes apart share alignment class {aligned_class:?}, skipping",
            engine.name()
        );
        return;
    }

    let plan: Plan<B> = engine
        .plan(
            Operands::new(
                Signal::complex_from(AlignedBuf::zeroed(2 * n)).unwrap(),
                Signal::complex_from(AlignedBuf::zeroed(2 * n)).unwrap(),
            ),
            Sign::FORWARD,
            Flags::ESTIMATE,
            None,
        )
        .unwrap();
    assert!(plan.requires_aligned());
    assert_eq!(plan.input_alignment(), aligned_class);

    let mut a: Signal = Signal::complex_from(AlignedBuf::zeroed_at_offset(2 * n, shifted)).unwrap();
    let mut b: Signal = Signal::complex_from(AlignedBuf::zeroed(2 * n)).unwrap();
    let err = plan.execute_with(OperandsMut::new(&mut a, &mut b)).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::AlignmentMismatch {
            side: Side::Input,
            ..
        }
    ));

    let unaligned: Plan<B> = engine
        .plan(
            Operands::new(
                Signal::complex_from(AlignedBuf::zeroed(2 * n)).unwrap(),
                Signal::complex_from(AlignedBuf::zeroed(2 * n)).unwrap(),
            ),
            Sign::FORWARD,
            Flags::ESTIMATE | Flags::UNALIGNED,
            None,
        )
        .unwrap();
    assert!(!unaligned.requires_aligned());

    let mut source: Source = Source::new([6u8; 32]);
    a.fill_uniform(&mut source);
    let input: Vec<f64> = a.to_interleaved();
    unaligned.execute_with(OperandsMut::new(&mut a, &mut b)).unwrap();
    assert_close(&b.to_interleaved(), &reference_c2c(&[n], Sign::FORWARD, &input), 1e-10);
}

/// Operands that disagree with the plan are refused before the engine runs.
pub fn test_execute_with_mismatches<B: CompleteBackend>(engine: &Engine<B>) {
    let n: usize = 8;
    let plan: Plan<B> = engine
        .plan(
            Operands::new(Signal::complex(n), Signal::complex(n)),
            Sign::FORWARD,
            Flags::ESTIMATE | Flags::UNALIGNED,
            None,
        )
        .unwrap();

    let mut real: Signal = Signal::real(n);
    let mut complex: Signal = Signal::complex(n);
    let err = plan.execute_with(OperandsMut::new(&mut real, &mut complex)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::ComplexityMismatch { .. }), "{err}");

    let mut split: Signal = Signal::split_complex(n);
    let err = plan.execute_with(OperandsMut::new(&mut split, &mut complex)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::RepresentationMismatch { actual: "mixed", .. }), "{err}");

    let mut short: Signal = Signal::complex(n - 1);
    let err = plan.execute_with(OperandsMut::new(&mut short, &mut complex)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::OperandSizeMismatch { .. }), "{err}");

    let err = plan.execute_with(OperandsMut::in_place(&mut complex)).unwrap_err();
    assert!(
        matches!(
            err.kind(),
            ErrorKind::PlacementMismatch {
                expected: Placement::OutOfPlace,
                actual: Placement::InPlace,
            }
        ),
        "{err}"
    );

    // Untouched after every refusal.
    assert!(complex.to_interleaved().iter().all(|x| *x == 0.0));
}

/// One plan executed from several threads on private operands.
pub fn test_concurrent_execute_with<B: CompleteBackend>(engine: &Engine<B>) {
    let n: usize = 64;
    let plan: Plan<B> = engine
        .plan(
            Operands::new(engine.alloc_complex(n), engine.alloc_complex(n)),
            Sign::FORWARD,
            Flags::ESTIMATE,
            None,
        )
        .unwrap();

    let mut source: Source = Source::new([7u8; 32]);
    let threads: usize = source.random_range(2..6);

    std::thread::scope(|scope| {
        for _ in 0..threads {
            let (_, mut source) = source.branch();
            let plan: &Plan<B> = &plan;
            scope.spawn(move || {
                for _ in 0..8 {
                    let mut a: Signal = engine.alloc_complex(n);
                    let mut b: Signal = engine.alloc_complex(n);
                    a.fill_uniform(&mut source);
                    let input: Vec<f64> = a.to_interleaved();
                    plan.execute_with(OperandsMut::new(&mut a, &mut b)).unwrap();
                    assert_close(&b.to_interleaved(), &reference_c2c(&[n], Sign::FORWARD, &input), 1e-10);
                }
            });
        }
    });
}
