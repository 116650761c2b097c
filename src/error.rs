//! Error types for lens operations.
//!
//! Every failure aborts the current `view`/`update` call and is reported to
//! the caller as a [`LensError`]. The engine never recovers internally.
//!
//! # Examples
//!
//! ```rust
//! use pathlens::dict;
//! use pathlens::error::LensError;
//! use pathlens::optics::{index, view};
//!
//! let document = dict! { "x" => 1 };
//! let error = view(&document, &index(0)).unwrap_err();
//! assert!(matches!(error, LensError::Shape { .. }));
//! assert_eq!(error.to_string(), "shape mismatch: expected list, found dict at step 0");
//! ```

use std::fmt;

use thiserror::Error;

use crate::optics::Step;
use crate::value::Shape;

/// Zero-based position of the failing step within a lens.
///
/// Errors raised by the [`Value`](crate::value::Value) accessors on their own
/// carry no position; the engine stamps one in while it walks a lens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StepPosition(
    /// The step index, or `None` when unknown.
    pub Option<usize>,
);

impl StepPosition {
    /// A position that is not tied to any lens step.
    pub const UNKNOWN: Self = Self(None);

    /// Returns the position of step `index`.
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self(Some(index))
    }
}

impl fmt::Display for StepPosition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(index) => write!(formatter, " at step {index}"),
            None => Ok(()),
        }
    }
}

/// Represents the ways a lens operation can fail.
///
/// There is no partial-mutation rollback attached to these errors: when an
/// update fails midway through a traversal, the targets visited before the
/// failure stay written. Use [`transaction`](crate::optics::transaction) for
/// all-or-nothing semantics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LensError {
    /// A step required one container shape and found another.
    #[error("shape mismatch: expected {expected}, found {found}{at}")]
    Shape {
        /// The shape the step operates on.
        expected: Shape,
        /// The shape that was actually present.
        found: Shape,
        /// The failing step.
        at: StepPosition,
    },

    /// A `Key` step named a key absent from the dict.
    #[error("key not found: {key:?}{at}")]
    KeyNotFound {
        /// The missing key.
        key: String,
        /// The failing step.
        at: StepPosition,
    },

    /// An `Index` step fell outside the list bounds.
    #[error("index {index} out of range for list of length {length}{at}")]
    IndexOutOfRange {
        /// The requested index, as written in the lens.
        index: i64,
        /// The length of the list that was indexed.
        length: usize,
        /// The failing step.
        at: StepPosition,
    },

    /// A lens failed structural validation while being decoded or parsed.
    #[error("malformed lens: {reason}")]
    MalformedLens {
        /// Human-readable description of the defect.
        reason: String,
    },

    /// A write operation was asked to go through a read-only traversal.
    #[error("unsupported operation: cannot {operation} through `{step}`")]
    UnsupportedOperation {
        /// The attempted operation (`"update"`, `"set"`, `"append"`).
        operation: &'static str,
        /// The step that forbids it.
        step: Step,
    },
}

impl LensError {
    /// Creates a [`LensError::MalformedLens`] with the given reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedLens {
            reason: reason.into(),
        }
    }

    /// Attaches the position of the failing step.
    ///
    /// Errors that already carry a position, and error kinds that are not
    /// tied to a single step, are returned unchanged.
    #[must_use]
    pub fn at_step(self, index: usize) -> Self {
        match self {
            Self::Shape {
                expected,
                found,
                at: StepPosition(None),
            } => Self::Shape {
                expected,
                found,
                at: StepPosition::at(index),
            },
            Self::KeyNotFound {
                key,
                at: StepPosition(None),
            } => Self::KeyNotFound {
                key,
                at: StepPosition::at(index),
            },
            Self::IndexOutOfRange {
                index: requested,
                length,
                at: StepPosition(None),
            } => Self::IndexOutOfRange {
                index: requested,
                length,
                at: StepPosition::at(index),
            },
            other => other,
        }
    }

    /// Returns the position of the failing step, if known.
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::Shape { at, .. }
            | Self::KeyNotFound { at, .. }
            | Self::IndexOutOfRange { at, .. } => at.0,
            Self::MalformedLens { .. } | Self::UnsupportedOperation { .. } => None,
        }
    }
}
