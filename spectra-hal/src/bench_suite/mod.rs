//! Criterion-based benchmark harnesses, generic over any engine.
//!
//! Engine crates call these functions to measure planning and execution
//! across transform sizes and operand layouts.

pub mod execute;
pub mod plan;
