//! Element assignment handlers
//!
//! A handler implements `receiver[index] = value` for one receiver type.
//! The built-in handler for primitive arrays applies the full coercion
//! policy; redefinitions replace it with arbitrary user logic.

use crate::descriptor::{descriptor, ElementDescriptor};
use crate::shape::{integral_index, payload_mismatch, ArgShape};
use core_types::{ArrayRef, Element, ElementType, RuntimeError, RuntimeResult, Value};
use std::fmt;
use tracing::trace;
use type_coercion::TypeCoercion;

/// Implementation of the `putAt` operation for a receiver type
pub trait PutAtHandler: Send + Sync + fmt::Debug {
    /// Perform `receiver[index] = value`.
    ///
    /// Always yields [`Value::Null`] on success; the assignment is a
    /// command, not an expression.
    fn put_at(
        &self,
        coercion: &dyn TypeCoercion,
        receiver: &Value,
        index: &Value,
        value: &Value,
    ) -> RuntimeResult<Value>;

    /// Descriptor of the built-in array handler.
    ///
    /// Only built-in handlers can be specialized at a call site; any other
    /// handler returns `None` and is always reached through generic
    /// dispatch.
    fn builtin_descriptor(&self) -> Option<&'static ElementDescriptor> {
        None
    }
}

/// Built-in `putAt` for one primitive container type
///
/// # Example
///
/// ```
/// use call_site::{ArrayPutAt, PutAtHandler};
/// use core_types::{ArrayRef, ElementType, Value};
/// use type_coercion::DefaultTypeCoercion;
///
/// let array = ArrayRef::new(ElementType::Short, 3);
/// let handler = ArrayPutAt::new(ElementType::Short);
/// let receiver = Value::Array(array.clone());
/// let coercion = DefaultTypeCoercion::default();
/// handler
///     .put_at(&coercion, &receiver, &Value::Integer(1), &Value::Character('A'))
///     .unwrap();
/// assert_eq!(array.get(1).unwrap(), Value::Short(65));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ArrayPutAt {
    desc: &'static ElementDescriptor,
}

impl ArrayPutAt {
    /// Handler for containers of `element_type`
    pub fn new(element_type: ElementType) -> Self {
        ArrayPutAt {
            desc: descriptor(element_type),
        }
    }

    /// The element type handled
    pub fn element_type(&self) -> ElementType {
        self.desc.element_type
    }

    /// Coerce a payload according to the assignment policy.
    ///
    /// Exact boxed values are stored as they are. Characters and text go
    /// through character coercion and are stored as their character code.
    /// Other numerics are narrowed.
    pub fn coerce_payload(
        &self,
        coercion: &dyn TypeCoercion,
        value: &Value,
    ) -> RuntimeResult<Element> {
        match ArgShape::classify(self.desc, value) {
            ArgShape::ExactMatch(element) => Ok(element),
            ArgShape::CharacterLike => {
                let ch = coercion.to_character(value)?;
                trace!(element = self.desc.boxed, %ch, "coercing character payload");
                (self.desc.coerce)(coercion, &Value::Character(ch))
            }
            ArgShape::GenericNumeric => (self.desc.coerce)(coercion, value),
            ArgShape::Incompatible => Err(payload_mismatch(self.desc, value)),
        }
    }

    fn container<'a>(&self, receiver: &'a Value) -> RuntimeResult<&'a ArrayRef> {
        match receiver {
            Value::Array(array) if array.element_type() == self.desc.element_type => Ok(array),
            other => Err(RuntimeError::type_mismatch(
                self.desc.element_type.array_name(),
                other.type_name(),
            )),
        }
    }
}

impl PutAtHandler for ArrayPutAt {
    fn put_at(
        &self,
        coercion: &dyn TypeCoercion,
        receiver: &Value,
        index: &Value,
        value: &Value,
    ) -> RuntimeResult<Value> {
        let array = self.container(receiver)?;
        let index = integral_index(index)?;
        // the stored value is computed before the bounds check
        let element = self.coerce_payload(coercion, value)?;
        array.put(index, element)?;
        Ok(Value::Null)
    }

    fn builtin_descriptor(&self) -> Option<&'static ElementDescriptor> {
        Some(self.desc)
    }
}

type PutAtFn = dyn Fn(&Value, &Value, &Value) -> RuntimeResult<Value> + Send + Sync;

/// A user-supplied redefinition of `putAt`
pub struct MethodOverride {
    name: String,
    body: Box<PutAtFn>,
}

impl MethodOverride {
    /// Wrap a closure as a `putAt` implementation
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Value, &Value, &Value) -> RuntimeResult<Value> + Send + Sync + 'static,
    {
        MethodOverride {
            name: name.into(),
            body: Box::new(body),
        }
    }

    /// Name given to the override
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for MethodOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodOverride")
            .field("name", &self.name)
            .finish()
    }
}

impl PutAtHandler for MethodOverride {
    fn put_at(
        &self,
        _coercion: &dyn TypeCoercion,
        receiver: &Value,
        index: &Value,
        value: &Value,
    ) -> RuntimeResult<Value> {
        (self.body)(receiver, index, value)
    }
}
