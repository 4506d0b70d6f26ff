//! Type coercion service
//!
//! This crate converts loosely-typed runtime values into specific
//! primitive types:
//! - Character coercion from characters, single-character text and codes
//! - Numeric narrowing with a configurable overflow policy
//!
//! # Example
//!
//! ```
//! use core_types::{Element, ElementType, Value};
//! use type_coercion::{DefaultTypeCoercion, NarrowingPolicy, TypeCoercion};
//!
//! let truncating = DefaultTypeCoercion::new(NarrowingPolicy::Truncate);
//! assert_eq!(
//!     truncating.narrow_to(&Value::Long(70_000), ElementType::Short).unwrap(),
//!     Element::Short(4464)
//! );
//!
//! let checked = DefaultTypeCoercion::new(NarrowingPolicy::Checked);
//! assert!(checked.narrow_to(&Value::Long(70_000), ElementType::Short).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod coercion;
pub mod narrowing;

pub use coercion::{DefaultTypeCoercion, TypeCoercion};
pub use narrowing::NarrowingPolicy;
