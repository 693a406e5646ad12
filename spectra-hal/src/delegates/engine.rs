use crate::{
    api::{EngineCleanup, EngineNew},
    error::{Error, Result},
    layouts::{Backend, Engine, EngineConfig, NO_TIMELIMIT},
    oep::{EngineInitImpl, WisdomImpl},
};

impl<B> EngineNew<B> for Engine<B>
where
    B: Backend + EngineInitImpl<B> + WisdomImpl<B>,
{
    fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        if config.threads > 1 && !B::init_threads_impl() {
            return Err(Error::invalid_config(
                "threads",
                format!("{} cannot run {} threads: no thread support", B::NAME, config.threads),
            ));
        }
        // Process-wide: a single-threaded engine resets an earlier count.
        B::plan_with_nthreads_impl(config.threads);
        if config.thread_safe_planner {
            B::make_planner_thread_safe_impl();
        }
        B::set_timelimit_impl(config.planner_time_limit.unwrap_or(NO_TIMELIMIT));

        if config.wisdom.system && !B::import_system_wisdom_impl() {
            log::warn!("{}: system wisdom could not be imported", B::NAME);
        }
        for path in &config.wisdom.files {
            if !B::import_wisdom_from_file_impl(path) {
                return Err(Error::wisdom(format!("import wisdom from '{}'", path.display())));
            }
        }
        for (k, wisdom) in config.wisdom.strings.iter().enumerate() {
            if !B::import_wisdom_from_string_impl(wisdom) {
                return Err(Error::wisdom(format!("import wisdom string #{k}")));
            }
        }

        log::debug!(
            "{}: engine configured (threads={}, time limit={:?}, thread-safe planner={})",
            B::NAME,
            config.threads,
            config.planner_time_limit,
            config.thread_safe_planner
        );
        Ok(Engine::from_config(config))
    }
}

impl<B> EngineCleanup<B> for Engine<B>
where
    B: Backend + EngineInitImpl<B>,
{
    unsafe fn cleanup(self) {
        log::debug!("{}: planner cleanup", B::NAME);
        unsafe { B::cleanup_impl() }
    }

    unsafe fn cleanup_threads(self) {
        log::debug!("{}: planner and thread cleanup", B::NAME);
        unsafe { B::cleanup_threads_impl() }
    }
}
