//! Extension points for process-wide engine state.

use std::path::Path;

use crate::layouts::Backend;

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `spectra-backend/src/cpu_ref/engine.rs` for the reference implementation.
/// * See [crate::api::EngineNew] and [crate::api::EngineCleanup] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
pub unsafe trait EngineInitImpl<B: Backend> {
    /// Initialises the thread subsystem; `false` if the engine has none.
    fn init_threads_impl() -> bool;
    /// Called on every engine configuration. `threads > 1` only follows a
    /// successful [`EngineInitImpl::init_threads_impl`].
    fn plan_with_nthreads_impl(threads: usize);
    /// Negative values remove the limit.
    fn set_timelimit_impl(seconds: f64);
    fn make_planner_thread_safe_impl();
    /// Releases all planner state. Every live plan becomes invalid.
    unsafe fn cleanup_impl();
    /// As [`EngineInitImpl::cleanup_impl`], also releasing the thread subsystem.
    unsafe fn cleanup_threads_impl();
}

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `spectra-backend/src/cpu_ref/wisdom.rs` for the reference implementation.
/// * See [crate::api::WisdomExport], [crate::api::WisdomImport] and
///   [crate::api::WisdomForget] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
///
/// Boolean results report whether the engine accepted the request.
pub unsafe trait WisdomImpl<B: Backend> {
    fn export_wisdom_to_string_impl() -> Option<String>;
    fn export_wisdom_to_file_impl(path: &Path) -> bool;
    fn import_wisdom_from_string_impl(wisdom: &str) -> bool;
    fn import_wisdom_from_file_impl(path: &Path) -> bool;
    fn import_system_wisdom_impl() -> bool;
    fn forget_wisdom_impl();
}
