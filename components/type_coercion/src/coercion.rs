//! The coercion service consumed by element assignment.

use crate::narrowing::{narrow_big_integer, narrow_float, narrow_integer, NarrowingPolicy};
use core_types::{Element, ElementType, RuntimeError, RuntimeResult, Value};
use tracing::trace;

/// Converts loosely-typed values into specific primitive types.
///
/// Implementations must be shareable between threads; call sites hold the
/// service behind an `Arc` and invoke it from whichever thread runs the
/// call.
pub trait TypeCoercion: Send + Sync {
    /// Coerce a character, single-character text or numeric code to a
    /// character.
    ///
    /// # Errors
    ///
    /// `UncoercibleValue` for text that is not exactly one character,
    /// numerics that are not a valid character code, and every other
    /// value.
    fn to_character(&self, value: &Value) -> RuntimeResult<char>;

    /// Narrow a numeric value (or a character, via its code) to `target`.
    ///
    /// # Errors
    ///
    /// `UncoercibleValue` for non-numeric input or, depending on the
    /// policy, values the target cannot represent.
    fn narrow_to(&self, value: &Value, target: ElementType) -> RuntimeResult<Element>;
}

/// Default coercion rules, parameterised by a narrowing policy.
///
/// # Examples
///
/// ```
/// use core_types::{Element, ElementType, Value};
/// use type_coercion::{DefaultTypeCoercion, TypeCoercion};
///
/// let coercion = DefaultTypeCoercion::default();
/// assert_eq!(coercion.to_character(&Value::from("5")).unwrap(), '5');
/// assert_eq!(
///     coercion.narrow_to(&Value::Character('A'), ElementType::Short).unwrap(),
///     Element::Short(65)
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultTypeCoercion {
    policy: NarrowingPolicy,
}

impl DefaultTypeCoercion {
    /// Create a coercion service with the given narrowing policy
    pub fn new(policy: NarrowingPolicy) -> Self {
        DefaultTypeCoercion { policy }
    }

    /// The narrowing policy in effect
    pub fn policy(&self) -> NarrowingPolicy {
        self.policy
    }

    fn char_from_code(&self, value: &Value) -> RuntimeResult<char> {
        let uncoercible = || RuntimeError::uncoercible(value.to_string(), "char");
        let code = match self.narrow_to(value, ElementType::Long)? {
            Element::Long(code) => code,
            _ => return Err(uncoercible()),
        };
        let code = match self.policy {
            // character codes are 16 bits wide
            NarrowingPolicy::Truncate => u32::from(code as u16),
            NarrowingPolicy::Checked => u32::try_from(code).map_err(|_| uncoercible())?,
        };
        char::from_u32(code).ok_or_else(uncoercible)
    }
}

impl TypeCoercion for DefaultTypeCoercion {
    fn to_character(&self, value: &Value) -> RuntimeResult<char> {
        match value {
            Value::Character(c) => Ok(*c),
            Value::String(_) | Value::GString(_) => {
                let text = value.text().unwrap_or_default();
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(RuntimeError::uncoercible(format!("{:?}", text), "char")),
                }
            }
            v if v.is_numeric() => self.char_from_code(v),
            other => Err(RuntimeError::uncoercible(other.to_string(), "char")),
        }
    }

    fn narrow_to(&self, value: &Value, target: ElementType) -> RuntimeResult<Element> {
        trace!(from = value.type_name(), to = target.name(), "narrowing value");
        match value {
            Value::Byte(n) => narrow_integer(i64::from(*n), target, self.policy),
            Value::Short(n) => narrow_integer(i64::from(*n), target, self.policy),
            Value::Integer(n) => narrow_integer(i64::from(*n), target, self.policy),
            Value::Long(n) => narrow_integer(*n, target, self.policy),
            Value::BigInteger(n) => narrow_big_integer(n, target, self.policy),
            Value::Float(d) => narrow_float(f64::from(*d), target, self.policy),
            Value::Double(d) => narrow_float(*d, target, self.policy),
            Value::Character(c) => narrow_integer(i64::from(u32::from(*c)), target, self.policy),
            other => Err(RuntimeError::uncoercible(other.to_string(), target.name())),
        }
    }
}
