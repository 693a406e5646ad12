use spectra_hal::backend_test_suite;

backend_test_suite! {
    mod fft_ref,
    backend = crate::cpu_ref::FFTRef,
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
