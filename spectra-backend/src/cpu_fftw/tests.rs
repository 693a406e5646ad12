use spectra_hal::backend_test_suite;

backend_test_suite! {
    mod fftw,
    backend = crate::cpu_fftw::FFTW,
    tests = {
        test_c2c_impulse => spectra_hal::test_suite::transform::test_c2c_impulse,
        test_c2c_matches_reference => spectra_hal::test_suite::transform::test_c2c_matches_reference,
        test_r2c_matches_reference => spectra_hal::test_suite::transform::test_r2c_matches_reference,
        test_r2c_c2r_round_trip => spectra_hal::test_suite::transform::test_r2c_c2r_round_trip,
        test_in_place_matches_out_of_place => spectra_hal::test_suite::transform::test_in_place_matches_out_of_place,
        test_execute_with_native_signals => spectra_hal::test_suite::execute::test_execute_with_native_signals,
        test_execute_with_alignment => spectra_hal::test_suite::execute::test_execute_with_alignment,
        test_execute_with_mismatches => spectra_hal::test_suite::execute::test_execute_with_mismatches,
        test_concurrent_execute_with => spectra_hal::test_suite::execute::test_concurrent_execute_with,
        test_guru_split_matches_interleaved => spectra_hal::test_suite::guru::test_guru_split_matches_interleaved,
        test_guru_strided_batch => spectra_hal::test_suite::guru::test_guru_strided_batch,
        test_guru_r2c_batch => spectra_hal::test_suite::guru::test_guru_r2c_batch,
        test_guru_extent_checks => spectra_hal::test_suite::guru::test_guru_extent_checks,
        test_destroy_lifecycle => spectra_hal::test_suite::lifecycle::test_destroy_lifecycle,
        test_plan_info => spectra_hal::test_suite::lifecycle::test_plan_info,
        test_invalid_requests => spectra_hal::test_suite::lifecycle::test_invalid_requests,
        test_engine_config_errors => spectra_hal::test_suite::lifecycle::test_engine_config_errors,
        test_wisdom_round_trip => spectra_hal::test_suite::wisdom::test_wisdom_round_trip,
    }
}

mod alloc {
    use spectra_hal::{
        api::{AlignmentOf, EngineNew, SignalAlloc},
        layouts::{Engine, EngineConfig, Signal},
    };

    use crate::cpu_fftw::FFTW;

    #[test]
    fn native_signals_share_one_class() {
        let engine: Engine<FFTW> = Engine::<FFTW>::new(EngineConfig::default()).unwrap();
        let a: Signal = engine.alloc_complex(17);
        let b: Signal = engine.alloc_real(3);
        let c: Signal = engine.alloc_split_complex(5);
        assert!(a.is_native() && b.is_native() && c.is_native());
        assert_eq!(engine.alignment_of(&a), engine.alignment_of(&b));
        assert!(a.to_interleaved().iter().all(|x| *x == 0.0));
        assert_eq!(c.size(), 5);
        assert_eq!(engine.alloc_complex(0).size(), 0);
    }
}
