//! Runtime fault types for dynamic dispatch.
//!
//! Every failure surfaced by element assignment is one of three kinds:
//! an index outside the container, a value or receiver of the wrong
//! concrete type, or a value the coercion service cannot convert.

use thiserror::Error;

/// The kind of runtime fault.
///
/// Used when only the category of a failure matters, e.g. when comparing
/// the outcome of a cached call against the generic dispatch path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Normalized index outside `[0, length)`
    OutOfRange,
    /// Receiver or argument is not of the expected concrete type
    TypeMismatch,
    /// The coercion service could not produce the target type
    UncoercibleValue,
}

/// A runtime fault raised by dispatch, coercion or container access.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, RuntimeError};
///
/// let error = RuntimeError::OutOfRange { index: 5, length: 3 };
/// assert_eq!(error.kind(), ErrorKind::OutOfRange);
/// assert_eq!(error.to_string(), "index 5 out of range for length 3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Index outside the container bounds.
    ///
    /// `index` is the logical index the caller supplied.
    #[error("index {index} out of range for length {length}")]
    OutOfRange {
        /// Requested logical index
        index: i64,
        /// Container length
        length: usize,
    },

    /// Value of the wrong concrete type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the expected type
        expected: String,
        /// Name of the type actually supplied
        found: String,
    },

    /// Value cannot be coerced to the target type.
    #[error("cannot coerce {value} to {target}")]
    UncoercibleValue {
        /// Display form of the offending value
        value: String,
        /// Name of the target type
        target: String,
    },
}

impl RuntimeError {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        RuntimeError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an uncoercible value error
    pub fn uncoercible(value: impl Into<String>, target: impl Into<String>) -> Self {
        RuntimeError::UncoercibleValue {
            value: value.into(),
            target: target.into(),
        }
    }

    /// Returns the fault kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::OutOfRange { .. } => ErrorKind::OutOfRange,
            RuntimeError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            RuntimeError::UncoercibleValue { .. } => ErrorKind::UncoercibleValue,
        }
    }
}

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
