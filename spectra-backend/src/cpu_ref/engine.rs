use std::{
    collections::BTreeSet,
    sync::{Mutex, MutexGuard, PoisonError},
};

use once_cell::sync::Lazy;
use spectra_hal::{
    layouts::{Flags, NO_TIMELIMIT},
    oep::EngineInitImpl,
};

use crate::cpu_ref::FFTRef;

/// Process-wide planner state of the reference engine.
pub(super) struct RefState {
    /// Problems planned with a measuring rigour.
    pub(super) wisdom: BTreeSet<String>,
    pub(super) threads: usize,
    pub(super) time_limit: f64,
    pub(super) thread_safe: bool,
}

impl RefState {
    const fn new() -> Self {
        Self {
            wisdom: BTreeSet::new(),
            threads: 1,
            time_limit: NO_TIMELIMIT,
            thread_safe: false,
        }
    }

    /// Decides whether a plan for `problem` may be created with `flags`,
    /// recording the problem when the planner measured it.
    pub(super) fn admit(&mut self, problem: &str, flags: Flags) -> bool {
        if flags.contains(Flags::WISDOM_ONLY) {
            return self.wisdom.contains(problem);
        }
        if flags.measures() {
            self.wisdom.insert(problem.to_string());
        }
        true
    }
}

static STATE: Lazy<Mutex<RefState>> = Lazy::new(|| Mutex::new(RefState::new()));

pub(super) fn state() -> MutexGuard<'static, RefState> {
    STATE.lock().unwrap_or_else(PoisonError::into_inner)
}

unsafe impl EngineInitImpl<Self> for FFTRef {
    fn init_threads_impl() -> bool {
        true
    }

    fn plan_with_nthreads_impl(threads: usize) {
        state().threads = threads;
    }

    fn set_timelimit_impl(seconds: f64) {
        state().time_limit = seconds;
    }

    fn make_planner_thread_safe_impl() {
        state().thread_safe = true;
    }

    unsafe fn cleanup_impl() {
        let mut state = state();
        log::debug!(
            "fft-ref: cleanup (threads={}, time_limit={}, thread_safe={}, {} wisdom entries)",
            state.threads,
            state.time_limit,
            state.thread_safe,
            state.wisdom.len()
        );
        *state = RefState::new();
    }

    unsafe fn cleanup_threads_impl() {
        unsafe { Self::cleanup_impl() }
    }
}

#[cfg(test)]
mod tests {
    use spectra_hal::{
        api::EngineNew,
        layouts::{Engine, EngineConfig},
    };

    use super::*;

    #[test]
    fn single_threaded_engine_resets_thread_count() {
        let wide: Engine<FFTRef> = Engine::new(EngineConfig::default().with_threads(4)).unwrap();
        assert_eq!(wide.config().threads, 4);
        let single: Engine<FFTRef> = Engine::new(EngineConfig::default()).unwrap();
        assert_eq!(single.config().threads, 1);
        assert_eq!(state().threads, 1);
    }

    #[test]
    fn admit_records_measured_problems() {
        let mut state: RefState = RefState::new();
        assert!(!state.admit("p", Flags::WISDOM_ONLY));
        assert!(state.admit("p", Flags::ESTIMATE));
        assert!(!state.admit("p", Flags::WISDOM_ONLY));
        assert!(state.admit("p", Flags::PATIENT));
        assert!(state.admit("p", Flags::WISDOM_ONLY));
        assert!(!state.admit("q", Flags::WISDOM_ONLY | Flags::ESTIMATE));
    }
}
