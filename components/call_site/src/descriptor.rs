//! Element type descriptors
//!
//! One static descriptor per primitive element type parameterises both the
//! generic assignment handler and the specialized cache entry.

use core_types::{Element, ElementType, RuntimeResult, Value};
use std::fmt;
use type_coercion::TypeCoercion;

/// Static description of an element type
pub struct ElementDescriptor {
    /// The element type described
    pub element_type: ElementType,
    /// Byte size of one element
    pub size: usize,
    /// Name of the boxed type that matches exactly
    pub boxed: &'static str,
    /// Extract the element from an exactly matching value
    pub unbox: fn(&Value) -> Option<Element>,
    /// Narrow a numeric or character value to the element type
    pub coerce: fn(&dyn TypeCoercion, &Value) -> RuntimeResult<Element>,
}

impl fmt::Debug for ElementDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementDescriptor")
            .field("element_type", &self.element_type)
            .field("size", &self.size)
            .field("boxed", &self.boxed)
            .finish()
    }
}

macro_rules! element_fns {
    ($unbox:ident, $coerce:ident, $element_type:expr) => {
        fn $unbox(value: &Value) -> Option<Element> {
            $element_type.unbox(value)
        }

        fn $coerce(coercion: &dyn TypeCoercion, value: &Value) -> RuntimeResult<Element> {
            coercion.narrow_to(value, $element_type)
        }
    };
}

element_fns!(unbox_byte, coerce_byte, ElementType::Byte);
element_fns!(unbox_short, coerce_short, ElementType::Short);
element_fns!(unbox_int, coerce_int, ElementType::Int);
element_fns!(unbox_long, coerce_long, ElementType::Long);
element_fns!(unbox_float, coerce_float, ElementType::Float);
element_fns!(unbox_double, coerce_double, ElementType::Double);

static BYTE: ElementDescriptor = ElementDescriptor {
    element_type: ElementType::Byte,
    size: 1,
    boxed: "Byte",
    unbox: unbox_byte,
    coerce: coerce_byte,
};

static SHORT: ElementDescriptor = ElementDescriptor {
    element_type: ElementType::Short,
    size: 2,
    boxed: "Short",
    unbox: unbox_short,
    coerce: coerce_short,
};

static INT: ElementDescriptor = ElementDescriptor {
    element_type: ElementType::Int,
    size: 4,
    boxed: "Integer",
    unbox: unbox_int,
    coerce: coerce_int,
};

static LONG: ElementDescriptor = ElementDescriptor {
    element_type: ElementType::Long,
    size: 8,
    boxed: "Long",
    unbox: unbox_long,
    coerce: coerce_long,
};

static FLOAT: ElementDescriptor = ElementDescriptor {
    element_type: ElementType::Float,
    size: 4,
    boxed: "Float",
    unbox: unbox_float,
    coerce: coerce_float,
};

static DOUBLE: ElementDescriptor = ElementDescriptor {
    element_type: ElementType::Double,
    size: 8,
    boxed: "Double",
    unbox: unbox_double,
    coerce: coerce_double,
};

/// Look up the descriptor for an element type
pub fn descriptor(element_type: ElementType) -> &'static ElementDescriptor {
    match element_type {
        ElementType::Byte => &BYTE,
        ElementType::Short => &SHORT,
        ElementType::Int => &INT,
        ElementType::Long => &LONG,
        ElementType::Float => &FLOAT,
        ElementType::Double => &DOUBLE,
    }
}
