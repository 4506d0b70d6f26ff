//! Argument shape classification
//!
//! Dynamic argument types are classified once per call into a closed set
//! of shapes, and the specialized fast path checks its assumptions upfront
//! instead of attempting a cast and recovering from the failure.

use crate::descriptor::ElementDescriptor;
use core_types::{Element, RuntimeError, RuntimeResult, Value};
use num_bigint::Sign;
use num_traits::ToPrimitive;

/// How a payload relates to a container's element type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgShape {
    /// Exactly the boxed element type; stored without coercion
    ExactMatch(Element),
    /// Character or text; goes through character coercion first
    CharacterLike,
    /// Any other numeric; narrowed directly
    GenericNumeric,
    /// Cannot be stored in a primitive container
    Incompatible,
}

impl ArgShape {
    /// Classify `value` against the element type of `desc`
    pub fn classify(desc: &ElementDescriptor, value: &Value) -> Self {
        if let Some(element) = (desc.unbox)(value) {
            ArgShape::ExactMatch(element)
        } else if value.is_text_like() {
            ArgShape::CharacterLike
        } else if value.is_numeric() {
            ArgShape::GenericNumeric
        } else {
            ArgShape::Incompatible
        }
    }
}

/// Result of checking a call against a specialization's assumptions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SiteCheck {
    /// Receiver, index and payload all have the assumed types
    Fits {
        /// Index as supplied
        index: i32,
        /// Payload, already unboxed
        element: Element,
    },
    /// Receiver is not the specialized container type
    WrongReceiver,
    /// Receiver fits but the index is not a plain integer
    MismatchedIndex,
    /// Receiver and index fit but the payload is not the exact boxed type
    MismatchedPayload,
}

/// Extract an index from any integer-representable value.
///
/// Big integers outside the 64-bit range saturate, so they fail the
/// later bounds check of every container with `OutOfRange`.
///
/// # Errors
///
/// `TypeMismatch` for non-integral values.
pub fn integral_index(index: &Value) -> RuntimeResult<i64> {
    match index {
        Value::Byte(i) => Ok(i64::from(*i)),
        Value::Short(i) => Ok(i64::from(*i)),
        Value::Integer(i) => Ok(i64::from(*i)),
        Value::Long(i) => Ok(*i),
        Value::BigInteger(n) => Ok(n.to_i64().unwrap_or(match n.sign() {
            Sign::Minus => i64::MIN,
            _ => i64::MAX,
        })),
        other => Err(RuntimeError::type_mismatch("Integer", other.type_name())),
    }
}

/// The fault raised for a payload that cannot be stored at all
pub fn payload_mismatch(desc: &ElementDescriptor, value: &Value) -> RuntimeError {
    RuntimeError::type_mismatch(desc.boxed, value.type_name())
}
