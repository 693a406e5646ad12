//! Reference engine for [`spectra_hal`].
//!
//! Plans are heap-allocated [`RefPlan`] descriptors computed through
//! [`spectra_hal::reference::strided::execute_strided`]. Planner state (wisdom
//! and settings) is process-wide and guarded by a mutex, like a native
//! engine's.
//!
//! | Module   | Extension points                                                 |
//! |----------|------------------------------------------------------------------|
//! | `plan`   | `PlanDftImpl`, `PlanGuruImpl`, `PlanExecuteImpl`, `PlanInfoImpl` |
//! | `signal` | `SignalAllocImpl`, `AlignmentOfImpl`                             |
//! | `engine` | `EngineInitImpl`                                                 |
//! | `wisdom` | `WisdomImpl`                                                     |

mod engine;
mod plan;
mod signal;
mod wisdom;

#[cfg(test)]
mod tests;

use std::ptr::NonNull;

use spectra_hal::layouts::Backend;

pub use plan::RefPlan;

/// Portable reference engine.
///
/// Zero-sized marker selecting this engine as the `B` of
/// [`Engine<B>`](spectra_hal::layouts::Engine). Slow but exact to rounding;
/// honours [`Flags::WISDOM_ONLY`](spectra_hal::layouts::Flags::WISDOM_ONLY)
/// by returning a null plan for problems it has never measured.
#[derive(Debug, Clone, Copy)]
pub struct FFTRef;

impl Backend for FFTRef {
    type Handle = RefPlan;
    const NAME: &'static str = "fft-ref";

    unsafe fn destroy(handle: NonNull<Self::Handle>) {
        unsafe {
            drop(Box::from_raw(handle.as_ptr()));
        }
    }
}
