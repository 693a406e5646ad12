use thiserror::Error;

use crate::layouts::{Alignment, Complexity, Placement, Side};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

/// Coarse classification of an [`ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Raised while constructing a plan; no native handle was obtained.
    Configuration,
    /// Raised at the start of an operation on a plan or signal, before any native call.
    Usage,
    /// The engine refused a process-wide request, or the filesystem failed.
    Environment,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn category(&self) -> ErrorCategory {
        self.0.category()
    }

    pub fn invalid_dimensions(message: impl Into<String>) -> Error {
        ErrorKind::InvalidDimensions {
            message: message.into(),
        }
        .into()
    }

    pub fn size_mismatch(side: Side, expected: usize, actual: usize) -> Error {
        ErrorKind::SizeMismatch { side, expected, actual }.into()
    }

    pub fn invalid_config(name: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::InvalidConfig {
            name: name.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn wisdom(operation: impl Into<String>) -> Error {
        ErrorKind::Wisdom {
            operation: operation.into(),
        }
        .into()
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        ErrorKind::Io {
            context: context.into(),
            source,
        }
        .into()
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid dimensions: {message}")]
    InvalidDimensions { message: String },

    #[error("{side} size {actual} does not match the required size {expected}")]
    SizeMismatch { side: Side, expected: usize, actual: usize },

    #[error("input size {input} and output size {output} are not compatible for a {complexity} transform")]
    OperandSizeMismatch {
        complexity: Complexity,
        input: usize,
        output: usize,
    },

    #[error("transform of length zero")]
    ZeroLengthTransform,

    #[error("{0} transforms are not supported")]
    UnsupportedComplexity(Complexity),

    #[error("unsupported operand representation: {message}")]
    UnsupportedRepresentation { message: String },

    #[error("interleaved complex data needs an even number of values, got {len}")]
    OddComplexLength { len: usize },

    #[error("split planes differ in length: re={re}, im={im}")]
    SplitPlaneMismatch { re: usize, im: usize },

    #[error("native planner returned a null plan for a rank-{rank} {complexity} transform")]
    NativePlanningFailed { complexity: Complexity, rank: usize },

    #[error("invalid configuration {name}: {message}")]
    InvalidConfig { name: String, message: String },

    #[error("plan is destroyed")]
    PlanDestroyed,

    #[error("requested {actual} execution of a {expected} plan")]
    ComplexityMismatch { expected: Complexity, actual: Complexity },

    #[error("operands are {actual} but the plan was created for {expected} operands")]
    RepresentationMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("mismatched placement: expected {expected}; received {actual}")]
    PlacementMismatch { expected: Placement, actual: Placement },

    #[error("{side} alignment {actual:?} not equal to plan alignment {expected:?}")]
    AlignmentMismatch {
        side: Side,
        expected: Alignment,
        actual: Alignment,
    },

    #[error("{side} imaginary plane lies {actual} bytes from its real plane, the plan expects {expected}")]
    PlaneGapMismatch { side: Side, expected: isize, actual: isize },

    #[error("{len} values do not fit into a buffer of {capacity}")]
    BufferTooSmall { len: usize, capacity: usize },

    #[error("engine refused to {operation}")]
    Wisdom { operation: String },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::InvalidDimensions { .. }
            | ErrorKind::SizeMismatch { .. }
            | ErrorKind::OperandSizeMismatch { .. }
            | ErrorKind::ZeroLengthTransform
            | ErrorKind::UnsupportedComplexity(_)
            | ErrorKind::UnsupportedRepresentation { .. }
            | ErrorKind::OddComplexLength { .. }
            | ErrorKind::SplitPlaneMismatch { .. }
            | ErrorKind::NativePlanningFailed { .. }
            | ErrorKind::InvalidConfig { .. } => ErrorCategory::Configuration,
            ErrorKind::PlanDestroyed
            | ErrorKind::ComplexityMismatch { .. }
            | ErrorKind::RepresentationMismatch { .. }
            | ErrorKind::PlacementMismatch { .. }
            | ErrorKind::AlignmentMismatch { .. }
            | ErrorKind::PlaneGapMismatch { .. }
            | ErrorKind::BufferTooSmall { .. } => ErrorCategory::Usage,
            ErrorKind::Wisdom { .. } | ErrorKind::Io { .. } => ErrorCategory::Environment,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
