//! Core runtime value types and error handling.
//!
//! This crate provides the foundational types shared by the coercion
//! service and the call-site machinery.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of runtime values
//! - [`ArrayRef`] - Shared handle to a fixed-length primitive container
//! - [`ElementType`] / [`Element`] - Primitive element types and values
//! - [`normalise_index`] - Logical to physical index mapping
//! - [`RuntimeError`] - Runtime faults, classified by [`ErrorKind`]
//!
//! # Examples
//!
//! ```
//! use core_types::{ArrayRef, Element, ElementType, ErrorKind, Value};
//!
//! let array = ArrayRef::new(ElementType::Short, 3);
//! array.put(-1, Element::Short(9)).unwrap();
//! assert_eq!(array.get(2).unwrap(), Value::Short(9));
//!
//! let error = array.get(5).unwrap_err();
//! assert_eq!(error.kind(), ErrorKind::OutOfRange);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod array;
mod error;
mod index;
mod value;

pub use array::{ArrayRef, Element, ElementType, PrimitiveArray};
pub use error::{ErrorKind, RuntimeError, RuntimeResult};
pub use index::normalise_index;
pub use value::{GString, Value};
