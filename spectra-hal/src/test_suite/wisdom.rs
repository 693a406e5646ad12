use crate::{
    api::{PlanNew, SignalAlloc, WisdomExport, WisdomForget, WisdomImport},
    error::ErrorKind,
    layouts::{Engine, Flags, Operands, Plan, Sign},
    oep::CompleteBackend,
};

/// Exports, forgets and re-imports the engine's accumulated planning
/// knowledge, through strings and files.
///
/// Wisdom is process-wide, so every step lives in this one test; no other
/// test forgets wisdom or plans with [`Flags::WISDOM_ONLY`].
pub fn test_wisdom_round_trip<B: CompleteBackend>(engine: &Engine<B>) {
    // Unusual size, not planned anywhere else.
    let n: usize = 45;
    let plan_with = |flags: Flags| -> crate::error::Result<Plan<B>> {
        engine.plan(
            Operands::new(engine.alloc_complex(n), engine.alloc_complex(n)),
            Sign::FORWARD,
            flags,
            None,
        )
    };

    engine.forget_wisdom();
    let err = plan_with(Flags::WISDOM_ONLY).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NativePlanningFailed { rank: 1, .. }), "{err}");

    let measured: Plan<B> = plan_with(Flags::MEASURE).unwrap();
    drop(measured);
    plan_with(Flags::WISDOM_ONLY).unwrap();

    let exported: String = engine.export_wisdom_to_string().unwrap();
    assert!(!exported.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wisdom");
    engine.export_wisdom_to_file(&path).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);

    engine.forget_wisdom();
    assert!(plan_with(Flags::WISDOM_ONLY).is_err());

    engine.import_wisdom_from_string(&exported).unwrap();
    plan_with(Flags::WISDOM_ONLY).unwrap();

    engine.forget_wisdom();
    engine.import_wisdom_from_file(&path).unwrap();
    plan_with(Flags::WISDOM_ONLY).unwrap();

    let err = engine.import_wisdom_from_string("(not wisdom").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Wisdom { .. }), "{err}");
    let err = engine
        .import_wisdom_from_file(&dir.path().join("absent"))
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Wisdom { .. } | ErrorKind::Io { .. }), "{err}");
    let err = engine
        .export_wisdom_to_file(&dir.path().join("absent").join("wisdom"))
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Wisdom { .. } | ErrorKind::Io { .. }), "{err}");

    // System wisdom may or may not exist; only a typed error is acceptable.
    if let Err(err) = engine.import_system_wisdom() {
        assert!(matches!(err.kind(), ErrorKind::Wisdom { .. }), "{err}");
    }
}
