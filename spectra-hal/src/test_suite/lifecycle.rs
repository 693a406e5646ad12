use crate::{
    api::{EngineNew, PlanExecute, PlanInfo, PlanNew},
    error::{ErrorCategory, ErrorKind},
    layouts::{Complexity, Dimensions, Engine, EngineConfig, Flags, Flops, Operands, OperandsMut, Plan, Side, Sign, Signal},
    oep::CompleteBackend,
};

pub fn test_destroy_lifecycle<B: CompleteBackend>(engine: &Engine<B>) {
    let n: usize = 16;
    let mut plan: Plan<B> = engine
        .plan(
            Operands::new(Signal::complex(n), Signal::complex(n)),
            Sign::FORWARD,
            Flags::ESTIMATE,
            None,
        )
        .unwrap();
    assert!(!plan.is_destroyed());
    let described: String = plan.to_string();
    assert!(!described.is_empty());
    assert_ne!(described, "destroyed plan");

    plan.destroy().unwrap();
    assert!(plan.is_destroyed());
    assert_eq!(plan.to_string(), "destroyed plan");

    for err in [
        plan.destroy().unwrap_err(),
        plan.execute().unwrap_err(),
        plan.flops().unwrap_err(),
        plan.sprint().unwrap_err(),
    ] {
        assert!(matches!(err.kind(), ErrorKind::PlanDestroyed), "{err}");
    }

    let (mut a, mut b) = (Signal::complex(n), Signal::complex(n));
    let err = plan.execute_with(OperandsMut::new(&mut a, &mut b)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::PlanDestroyed));

    // The operands outlive the handle.
    match plan.into_operands() {
        Operands::OutOfPlace { input, output } => {
            assert_eq!(input.size(), n);
            assert_eq!(output.size(), n);
        }
        Operands::InPlace(_) => panic!("out-of-place operands came back in-place"),
    }

    // A live plan hands its operands back too.
    let plan: Plan<B> = engine
        .plan(
            Operands::in_place(Signal::complex(n)),
            Sign::BACKWARD,
            Flags::ESTIMATE,
            None,
        )
        .unwrap();
    assert!(matches!(plan.into_operands(), Operands::InPlace(_)));
}

pub fn test_plan_info<B: CompleteBackend>(engine: &Engine<B>) {
    let dims: Dimensions = Dimensions::new(&[8, 4]).unwrap();
    let plan: Plan<B> = engine
        .plan(
            Operands::new(Signal::real(32), Signal::complex(32)),
            Sign::FORWARD,
            Flags::ESTIMATE,
            Some(dims),
        )
        .unwrap();

    let flops: Flops = plan.flops().unwrap();
    assert!(flops.total() > 0.0, "{flops:?}");
    assert!(plan.estimate_cost().unwrap() >= 0.0);
    assert!(plan.cost().unwrap() >= 0.0);

    let described: String = plan.sprint().unwrap();
    assert!(!described.is_empty());
    plan.print().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.txt");
    plan.fprint(&path).unwrap();
    let written: String = std::fs::read_to_string(&path).unwrap();
    assert!(!written.trim().is_empty());

    let err = plan.fprint(&dir.path().join("missing").join("plan.txt")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Environment, "{err}");
}

/// Requests the engine cannot serve are refused with a typed error before
/// it is reached.
pub fn test_invalid_requests<B: CompleteBackend>(engine: &Engine<B>) {
    let plan = |operands: Operands, dims: Option<Dimensions>| -> ErrorKind {
        engine
            .plan(operands, Sign::FORWARD, Flags::ESTIMATE, dims)
            .unwrap_err()
            .into_kind()
    };

    assert!(matches!(
        plan(Operands::new(Signal::real(8), Signal::real(8)), None),
        ErrorKind::UnsupportedComplexity(Complexity::RealToReal)
    ));
    // Real-to-real is refused even when the sizes are wrong too.
    assert!(matches!(
        plan(Operands::new(Signal::real(8), Signal::real(3)), None),
        ErrorKind::UnsupportedComplexity(Complexity::RealToReal)
    ));
    assert!(matches!(
        plan(Operands::new(Signal::split_complex(8), Signal::split_complex(8)), None),
        ErrorKind::UnsupportedRepresentation { .. }
    ));
    assert!(matches!(
        plan(Operands::new(Signal::complex(8), Signal::split_complex(8)), None),
        ErrorKind::UnsupportedRepresentation { .. }
    ));
    assert!(matches!(
        plan(Operands::new(Signal::complex(0), Signal::complex(0)), None),
        ErrorKind::ZeroLengthTransform
    ));
    assert!(matches!(
        plan(Operands::new(Signal::complex(8), Signal::complex(4)), None),
        ErrorKind::OperandSizeMismatch { input: 8, output: 4, .. }
    ));
    assert!(matches!(
        plan(Operands::new(Signal::real(8), Signal::complex(8)), Some(Dimensions::new(&[4, 4]).unwrap())),
        ErrorKind::SizeMismatch {
            side: Side::Input,
            expected: 16,
            actual: 8
        }
    ));
}

pub fn test_engine_config_errors<B: CompleteBackend>(_engine: &Engine<B>) {
    let err = Engine::<B>::new(EngineConfig::default().with_threads(0)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidConfig { .. }), "{err}");

    let err = Engine::<B>::new(EngineConfig::default().with_planner_time_limit(Some(f64::NAN))).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);

    let mut config: EngineConfig = EngineConfig::default();
    config.wisdom.strings.push("not wisdom at all".to_string());
    let err = Engine::<B>::new(config).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Wisdom { .. }), "{err}");

    let mut config: EngineConfig = EngineConfig::default();
    config.wisdom.files.push("/nonexistent/spectra/wisdom".into());
    assert!(Engine::<B>::new(config).is_err());
}
