//! Safe, user-facing trait definitions.
//!
//! Traits are organized by concern:
//! - **engine** -- engine configuration and teardown.
//! - **plan** -- plan creation (simple and guru), execution and introspection.
//! - **signal** -- engine-aligned allocation and alignment queries.
//! - **wisdom** -- import, export and reset of accumulated planner knowledge.
//!
//! Applications program against these traits; the native work is dispatched
//! to an engine via the [`oep`](crate::oep) extension points.

mod engine;
mod plan;
mod signal;
mod wisdom;

pub use engine::*;
pub use plan::*;
pub use signal::*;
pub use wisdom::*;
