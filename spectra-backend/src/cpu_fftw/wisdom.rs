use std::{ffi::CString, path::Path};

use spectra_hal::oep::WisdomImpl;

use crate::cpu_fftw::{
    FFTW, ffi,
    plan::{c_path, take_c_string},
    planner,
};

unsafe impl WisdomImpl<Self> for FFTW {
    fn export_wisdom_to_string_impl() -> Option<String> {
        let _planner = planner();
        unsafe { take_c_string(ffi::fftw_export_wisdom_to_string()) }
    }

    fn export_wisdom_to_file_impl(path: &Path) -> bool {
        let Some(name) = c_path(path) else {
            return false;
        };
        let _planner = planner();
        unsafe { ffi::fftw_export_wisdom_to_filename(name.as_ptr()) != 0 }
    }

    fn import_wisdom_from_string_impl(wisdom: &str) -> bool {
        let Ok(text) = CString::new(wisdom) else {
            return false;
        };
        let _planner = planner();
        unsafe { ffi::fftw_import_wisdom_from_string(text.as_ptr()) != 0 }
    }

    fn import_wisdom_from_file_impl(path: &Path) -> bool {
        let Some(name) = c_path(path) else {
            return false;
        };
        let _planner = planner();
        unsafe { ffi::fftw_import_wisdom_from_filename(name.as_ptr()) != 0 }
    }

    fn import_system_wisdom_impl() -> bool {
        let _planner = planner();
        unsafe { ffi::fftw_import_system_wisdom() != 0 }
    }

    fn forget_wisdom_impl() {
        let _planner = planner();
        unsafe { ffi::fftw_forget_wisdom() }
    }
}
