//! Contract compliance tests for core_types
//!
//! These tests verify the exported API that the coercion service and the
//! call-site machinery consume.

use core_types::{
    normalise_index, ArrayRef, Element, ElementType, ErrorKind, RuntimeError, RuntimeResult,
    Value,
};

/// Contract: normalise_index(i64, usize) -> RuntimeResult<usize>
#[test]
fn contract_normalise_index_signature() {
    let f: fn(i64, usize) -> RuntimeResult<usize> = normalise_index;
    assert_eq!(f(-1, 1).unwrap(), 0);
}

/// Contract: every element type boxes and unboxes through its exact value type
#[test]
fn contract_element_types_round_trip_exact_box() {
    let samples = [
        Value::Byte(1),
        Value::Short(1),
        Value::Integer(1),
        Value::Long(1),
        Value::Float(1.0),
        Value::Double(1.0),
    ];
    for (element_type, sample) in ElementType::ALL.iter().zip(samples.iter()) {
        let element = element_type.unbox(sample).expect("exact box");
        assert_eq!(element.element_type(), *element_type);
        assert_eq!(&element.into_value(), sample);
    }
}

/// Contract: ArrayRef::get / put use logical indices
#[test]
fn contract_array_ref_logical_indices() {
    let array = ArrayRef::new(ElementType::Long, 2);
    array.put(-2, Element::Long(11)).unwrap();
    assert_eq!(array.get(0).unwrap(), Value::Long(11));
}

/// Contract: RuntimeError::kind classifies every variant
#[test]
fn contract_error_kind() {
    let errors = [
        RuntimeError::OutOfRange {
            index: 0,
            length: 0,
        },
        RuntimeError::type_mismatch("a", "b"),
        RuntimeError::uncoercible("a", "b"),
    ];
    let kinds: Vec<ErrorKind> = errors.iter().map(RuntimeError::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ErrorKind::OutOfRange,
            ErrorKind::TypeMismatch,
            ErrorKind::UncoercibleValue
        ]
    );
}
