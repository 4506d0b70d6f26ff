//! Fixed-length primitive containers.
//!
//! A container holds a single primitive element type. Its length is fixed
//! at creation; only slot contents change. Containers are shared between
//! values through [`ArrayRef`], a cheap reference-counted handle.

use crate::error::{RuntimeError, RuntimeResult};
use crate::index::normalise_index;
use crate::value::Value;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Primitive element type of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// 8-bit signed integer
    Byte,
    /// 16-bit signed integer
    Short,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// 32-bit floating point
    Float,
    /// 64-bit floating point
    Double,
}

impl ElementType {
    /// All supported element types
    pub const ALL: [ElementType; 6] = [
        ElementType::Byte,
        ElementType::Short,
        ElementType::Int,
        ElementType::Long,
        ElementType::Float,
        ElementType::Double,
    ];

    /// Primitive name of the element type
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Byte => "byte",
            ElementType::Short => "short",
            ElementType::Int => "int",
            ElementType::Long => "long",
            ElementType::Float => "float",
            ElementType::Double => "double",
        }
    }

    /// Name of the container type holding this element type
    pub fn array_name(&self) -> &'static str {
        match self {
            ElementType::Byte => "byte[]",
            ElementType::Short => "short[]",
            ElementType::Int => "int[]",
            ElementType::Long => "long[]",
            ElementType::Float => "float[]",
            ElementType::Double => "double[]",
        }
    }

    /// Byte size of one element
    pub fn bytes_per_element(&self) -> usize {
        match self {
            ElementType::Byte => 1,
            ElementType::Short => 2,
            ElementType::Int | ElementType::Float => 4,
            ElementType::Long | ElementType::Double => 8,
        }
    }

    /// Name of the boxed value type that matches this element exactly
    pub fn boxed_name(&self) -> &'static str {
        match self {
            ElementType::Byte => "Byte",
            ElementType::Short => "Short",
            ElementType::Int => "Integer",
            ElementType::Long => "Long",
            ElementType::Float => "Float",
            ElementType::Double => "Double",
        }
    }

    /// Extract the element from a value that is exactly the boxed type.
    ///
    /// Returns `None` for every other value, including numerics of a
    /// different width.
    pub fn unbox(&self, value: &Value) -> Option<Element> {
        match (self, value) {
            (ElementType::Byte, Value::Byte(v)) => Some(Element::Byte(*v)),
            (ElementType::Short, Value::Short(v)) => Some(Element::Short(*v)),
            (ElementType::Int, Value::Integer(v)) => Some(Element::Int(*v)),
            (ElementType::Long, Value::Long(v)) => Some(Element::Long(*v)),
            (ElementType::Float, Value::Float(v)) => Some(Element::Float(*v)),
            (ElementType::Double, Value::Double(v)) => Some(Element::Double(*v)),
            _ => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A coerced primitive ready to be stored
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element {
    /// 8-bit signed integer
    Byte(i8),
    /// 16-bit signed integer
    Short(i16),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
}

impl Element {
    /// Element type of this primitive
    pub fn element_type(&self) -> ElementType {
        match self {
            Element::Byte(_) => ElementType::Byte,
            Element::Short(_) => ElementType::Short,
            Element::Int(_) => ElementType::Int,
            Element::Long(_) => ElementType::Long,
            Element::Float(_) => ElementType::Float,
            Element::Double(_) => ElementType::Double,
        }
    }

    /// Box the primitive back into a value
    pub fn into_value(self) -> Value {
        match self {
            Element::Byte(v) => Value::Byte(v),
            Element::Short(v) => Value::Short(v),
            Element::Int(v) => Value::Integer(v),
            Element::Long(v) => Value::Long(v),
            Element::Float(v) => Value::Float(v),
            Element::Double(v) => Value::Double(v),
        }
    }
}

/// Typed storage backing a container
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveArray {
    /// `byte[]`
    Byte(Vec<i8>),
    /// `short[]`
    Short(Vec<i16>),
    /// `int[]`
    Int(Vec<i32>),
    /// `long[]`
    Long(Vec<i64>),
    /// `float[]`
    Float(Vec<f32>),
    /// `double[]`
    Double(Vec<f64>),
}

impl PrimitiveArray {
    /// Create zero-filled storage
    pub fn new(element_type: ElementType, length: usize) -> Self {
        match element_type {
            ElementType::Byte => PrimitiveArray::Byte(vec![0; length]),
            ElementType::Short => PrimitiveArray::Short(vec![0; length]),
            ElementType::Int => PrimitiveArray::Int(vec![0; length]),
            ElementType::Long => PrimitiveArray::Long(vec![0; length]),
            ElementType::Float => PrimitiveArray::Float(vec![0.0; length]),
            ElementType::Double => PrimitiveArray::Double(vec![0.0; length]),
        }
    }

    /// Element type of the storage
    pub fn element_type(&self) -> ElementType {
        match self {
            PrimitiveArray::Byte(_) => ElementType::Byte,
            PrimitiveArray::Short(_) => ElementType::Short,
            PrimitiveArray::Int(_) => ElementType::Int,
            PrimitiveArray::Long(_) => ElementType::Long,
            PrimitiveArray::Float(_) => ElementType::Float,
            PrimitiveArray::Double(_) => ElementType::Double,
        }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        match self {
            PrimitiveArray::Byte(v) => v.len(),
            PrimitiveArray::Short(v) => v.len(),
            PrimitiveArray::Int(v) => v.len(),
            PrimitiveArray::Long(v) => v.len(),
            PrimitiveArray::Float(v) => v.len(),
            PrimitiveArray::Double(v) => v.len(),
        }
    }

    /// Whether the storage has no slots
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the slot at a physical index
    pub fn get(&self, physical: usize) -> Option<Element> {
        match self {
            PrimitiveArray::Byte(v) => v.get(physical).copied().map(Element::Byte),
            PrimitiveArray::Short(v) => v.get(physical).copied().map(Element::Short),
            PrimitiveArray::Int(v) => v.get(physical).copied().map(Element::Int),
            PrimitiveArray::Long(v) => v.get(physical).copied().map(Element::Long),
            PrimitiveArray::Float(v) => v.get(physical).copied().map(Element::Float),
            PrimitiveArray::Double(v) => v.get(physical).copied().map(Element::Double),
        }
    }

    /// Overwrite the slot at a physical index.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the element does not belong to this storage,
    /// `OutOfRange` if `physical` is past the end.
    pub fn set(&mut self, physical: usize, element: Element) -> RuntimeResult<()> {
        let length = self.len();
        let expected = self.element_type();
        let slot_missing = || RuntimeError::OutOfRange {
            index: physical as i64,
            length,
        };
        match (self, element) {
            (PrimitiveArray::Byte(v), Element::Byte(e)) => {
                *v.get_mut(physical).ok_or_else(slot_missing)? = e
            }
            (PrimitiveArray::Short(v), Element::Short(e)) => {
                *v.get_mut(physical).ok_or_else(slot_missing)? = e
            }
            (PrimitiveArray::Int(v), Element::Int(e)) => {
                *v.get_mut(physical).ok_or_else(slot_missing)? = e
            }
            (PrimitiveArray::Long(v), Element::Long(e)) => {
                *v.get_mut(physical).ok_or_else(slot_missing)? = e
            }
            (PrimitiveArray::Float(v), Element::Float(e)) => {
                *v.get_mut(physical).ok_or_else(slot_missing)? = e
            }
            (PrimitiveArray::Double(v), Element::Double(e)) => {
                *v.get_mut(physical).ok_or_else(slot_missing)? = e
            }
            (_, element) => {
                return Err(RuntimeError::type_mismatch(
                    expected.name(),
                    element.element_type().name(),
                ))
            }
        }
        Ok(())
    }
}

/// Shared handle to a container.
///
/// Cloning the handle shares the underlying storage. Element type and
/// length are fixed at creation and readable without locking.
///
/// # Examples
///
/// ```
/// use core_types::{ArrayRef, Element, ElementType, Value};
///
/// let array = ArrayRef::new(ElementType::Short, 3);
/// let alias = array.clone();
/// array.put(-1, Element::Short(9)).unwrap();
/// assert_eq!(alias.get(2).unwrap(), Value::Short(9));
/// ```
#[derive(Clone)]
pub struct ArrayRef {
    element_type: ElementType,
    length: usize,
    storage: Arc<RwLock<PrimitiveArray>>,
}

impl ArrayRef {
    /// Create a zero-filled container
    pub fn new(element_type: ElementType, length: usize) -> Self {
        Self::from_storage(PrimitiveArray::new(element_type, length))
    }

    /// Wrap existing storage
    pub fn from_storage(storage: PrimitiveArray) -> Self {
        ArrayRef {
            element_type: storage.element_type(),
            length: storage.len(),
            storage: Arc::new(RwLock::new(storage)),
        }
    }

    /// Element type of the container
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the container has no slots
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Read the element at a logical (possibly negative) index
    pub fn get(&self, logical: i64) -> RuntimeResult<Value> {
        let physical = normalise_index(logical, self.length)?;
        self.storage
            .read()
            .get(physical)
            .map(Element::into_value)
            .ok_or(RuntimeError::OutOfRange {
                index: logical,
                length: self.length,
            })
    }

    /// Store an element at a logical (possibly negative) index
    pub fn put(&self, logical: i64, element: Element) -> RuntimeResult<()> {
        let physical = normalise_index(logical, self.length)?;
        self.storage.write().set(physical, element)
    }

    /// Copy of the current storage
    pub fn snapshot(&self) -> PrimitiveArray {
        self.storage.read().clone()
    }

    /// All slots boxed as values
    pub fn to_values(&self) -> Vec<Value> {
        let storage = self.storage.read();
        (0..self.length)
            .filter_map(|i| storage.get(i))
            .map(Element::into_value)
            .collect()
    }

    /// Whether both handles share the same storage
    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArrayRef").field(&*self.storage.read()).finish()
    }
}

impl From<PrimitiveArray> for ArrayRef {
    fn from(storage: PrimitiveArray) -> Self {
        ArrayRef::from_storage(storage)
    }
}
