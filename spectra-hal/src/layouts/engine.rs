use std::{fmt, marker::PhantomData, ptr::NonNull};

use crate::layouts::EngineConfig;

/// A native FFT engine reachable through opaque plan handles.
#[allow(clippy::missing_safety_doc)]
pub trait Backend: Sized + Sync + Send + 'static {
    /// Native plan object; only ever handled behind a pointer.
    type Handle: 'static;
    /// Short name used in log records.
    const NAME: &'static str;
    unsafe fn destroy(handle: NonNull<Self::Handle>);
}

/// Entry point for planning with backend `B`.
///
/// Engine state (threads, time limit, wisdom) is process-wide. An `Engine`
/// value is the proof that the configuration step ran; see
/// [`EngineNew`](crate::api::EngineNew).
pub struct Engine<B: Backend> {
    config: EngineConfig,
    _marker: PhantomData<B>,
}

impl<B: Backend> Engine<B> {
    /// Wraps a configuration that has already been applied to the native side.
    pub(crate) fn from_config(config: EngineConfig) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn name(&self) -> &'static str {
        B::NAME
    }
}

impl<B: Backend> fmt::Debug for Engine<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("backend", &B::NAME)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Inert;

    impl Backend for Inert {
        type Handle = ();
        const NAME: &'static str = "inert";

        unsafe fn destroy(_: NonNull<()>) {}
    }

    #[test]
    fn debug_names_backend_and_config() {
        let engine: Engine<Inert> = Engine::from_config(EngineConfig::default().with_threads(2));
        let text: String = format!("{engine:?}");
        assert!(text.starts_with("Engine { backend: \"inert\""), "{text}");
        assert!(text.contains("threads: 2"), "{text}");
    }
}
