//! Runtime value representation.
//!
//! This module provides the `Value` enum passed as receiver and arguments
//! through dynamic call sites. Every variant is a concrete runtime type;
//! call sites inspect the variant to decide which path to take.

use crate::array::{ArrayRef, ElementType};
use num_bigint::BigInt;
use std::fmt;

/// An interpolated string whose text is produced on demand.
///
/// Holds the literal fragments and the interpolated values in between,
/// so `strings.len() == values.len() + 1` for a well-formed template.
///
/// # Examples
///
/// ```
/// use core_types::{GString, Value};
///
/// let template = GString::new(vec!["".into(), "".into()], vec![Value::Integer(7)]);
/// assert_eq!(template.to_string(), "7");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GString {
    strings: Vec<String>,
    values: Vec<Value>,
}

impl GString {
    /// Create a template from literal fragments and interpolated values
    pub fn new(strings: Vec<String>, values: Vec<Value>) -> Self {
        GString { strings, values }
    }

    /// Literal fragments
    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    /// Interpolated values
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl fmt::Display for GString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fragment) in self.strings.iter().enumerate() {
            f.write_str(fragment)?;
            if let Some(value) = self.values.get(i) {
                write!(f, "{}", value)?;
            }
        }
        Ok(())
    }
}

/// Represents any runtime value.
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// let short = Value::Short(5);
/// assert_eq!(short.type_name(), "Short");
/// assert!(short.is_integral());
/// assert!(Value::Character('A').is_text_like());
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent value
    Null,
    /// Boolean
    Boolean(bool),
    /// Boxed 8-bit integer
    Byte(i8),
    /// Boxed 16-bit integer
    Short(i16),
    /// Boxed 32-bit integer
    Integer(i32),
    /// Boxed 64-bit integer
    Long(i64),
    /// Arbitrary precision integer
    BigInteger(BigInt),
    /// Boxed 32-bit float
    Float(f32),
    /// Boxed 64-bit float
    Double(f64),
    /// Single character
    Character(char),
    /// Immutable text
    String(String),
    /// Interpolated dynamic text
    GString(GString),
    /// Primitive container
    Array(ArrayRef),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::BigInteger(a), Value::BigInteger(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Character(a), Value::Character(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::GString(a), Value::GString(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Value {
    /// Runtime type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "Boolean",
            Value::Byte(_) => "Byte",
            Value::Short(_) => "Short",
            Value::Integer(_) => "Integer",
            Value::Long(_) => "Long",
            Value::BigInteger(_) => "BigInteger",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::Character(_) => "Character",
            Value::String(_) => "String",
            Value::GString(_) => "GString",
            Value::Array(array) => array.element_type().array_name(),
        }
    }

    /// Whether this is a numeric value of any width
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Byte(_)
                | Value::Short(_)
                | Value::Integer(_)
                | Value::Long(_)
                | Value::BigInteger(_)
                | Value::Float(_)
                | Value::Double(_)
        )
    }

    /// Whether this is an integral numeric value
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            Value::Byte(_)
                | Value::Short(_)
                | Value::Integer(_)
                | Value::Long(_)
                | Value::BigInteger(_)
        )
    }

    /// Whether this is a character or any kind of text
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            Value::Character(_) | Value::String(_) | Value::GString(_)
        )
    }

    /// The container behind an array value
    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Element type of an array value
    pub fn element_type(&self) -> Option<ElementType> {
        self.as_array().map(ArrayRef::element_type)
    }

    /// Text content of a string or interpolated string
    pub fn text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::GString(g) => Some(g.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Byte(n) => write!(f, "{}", n),
            Value::Short(n) => write!(f, "{}", n),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Long(n) => write!(f, "{}", n),
            Value::BigInteger(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Double(n) => write!(f, "{}", n),
            Value::Character(c) => write!(f, "{}", c),
            Value::String(s) => f.write_str(s),
            Value::GString(g) => write!(f, "{}", g),
            Value::Array(array) => {
                let items: Vec<String> = array.to_values().iter().map(Value::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::Short(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Character(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<ArrayRef> for Value {
    fn from(array: ArrayRef) -> Self {
        Value::Array(array)
    }
}
