//! Open Extension Points (OEP) for engine crates.
//!
//! This module defines the `unsafe` trait layer that engine crates implement
//! to reach a native FFT library. Each trait mirrors a safe trait in the
//! [`crate::api`] module, distinguished by an `Impl` suffix (e.g.
//! [`crate::api::PlanExecute`] is backed by `PlanExecuteImpl`).
//!
//! Implementations receive operands that have already been validated: sizes
//! match the planned shape, placement and alignment agree with the plan and
//! the handle is live. They must not re-validate and must not retain the raw
//! pointers beyond what the native plan itself records.

mod engine;
mod plan;
mod signal;

pub use engine::*;
pub use plan::*;
pub use signal::*;

use crate::layouts::Backend;

/// Every extension point a fully featured engine provides.
pub trait CompleteBackend:
    Backend
    + PlanDftImpl<Self>
    + PlanGuruImpl<Self>
    + PlanExecuteImpl<Self>
    + PlanInfoImpl<Self>
    + AlignmentOfImpl<Self>
    + SignalAllocImpl<Self>
    + EngineInitImpl<Self>
    + WisdomImpl<Self>
{
}

impl<B> CompleteBackend for B where
    B: Backend
        + PlanDftImpl<B>
        + PlanGuruImpl<B>
        + PlanExecuteImpl<B>
        + PlanInfoImpl<B>
        + AlignmentOfImpl<B>
        + SignalAllocImpl<B>
        + EngineInitImpl<B>
        + WisdomImpl<B>
{
}
