use crate::{
    error::Result,
    layouts::{Backend, EngineConfig},
};

/// Applies `config` to the process-wide engine state and returns the
/// [`Engine`](crate::layouts::Engine) used for planning.
///
/// Thread count, planner time limit and thread-safe planner are set before
/// any wisdom is imported. A failed system wisdom import is only logged; a
/// failed file or string import is returned.
pub trait EngineNew<B: Backend>: Sized {
    fn new(config: EngineConfig) -> Result<Self>;
}

/// Releases all process-wide planner state.
pub trait EngineCleanup<B: Backend> {
    /// # Safety
    /// Every live [`Plan`](crate::layouts::Plan) of this engine becomes
    /// invalid; none may be used or dropped afterwards.
    unsafe fn cleanup(self);

    /// As [`EngineCleanup::cleanup`], also shutting down the engine's threads.
    ///
    /// # Safety
    /// Same contract as [`EngineCleanup::cleanup`].
    unsafe fn cleanup_threads(self);
}
