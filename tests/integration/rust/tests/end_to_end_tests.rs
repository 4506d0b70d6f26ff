//! End-to-End Tests
//!
//! Drives several call sites the way compiled code would: each assignment
//! statement owns a site, loops hit the same site repeatedly, and method
//! redefinitions happen while sites are hot.

use call_site::{CallSiteId, DispatchConfig, Dispatcher, MetaClassRegistry, MethodOverride};
use core_types::{ArrayRef, Element, ElementType, ErrorKind, PrimitiveArray, RuntimeError, Value};
use std::sync::Arc;

/// `for (i in 0..<n) array[i] = value` through one site
fn fill(dispatcher: &Dispatcher, site: u64, array: &ArrayRef, value: &Value) {
    let receiver = Value::Array(array.clone());
    for i in 0..array.len() {
        dispatcher
            .invoke(
                CallSiteId(site),
                &receiver,
                &[Value::Integer(i as i32), value.clone()],
            )
            .unwrap();
    }
}

/// Test: A loop over a short array stays on the fast path
#[test]
fn test_fill_loop_hits_fast_path() {
    let dispatcher = Dispatcher::default();
    let array = ArrayRef::new(ElementType::Short, 100);
    fill(&dispatcher, 1, &array, &Value::Short(7));

    assert!(array.to_values().iter().all(|v| *v == Value::Short(7)));
    let site = dispatcher.call_site(CallSiteId(1));
    let stats = site.stats();
    assert_eq!(stats.fast_path_hits(), 100);
    assert_eq!(stats.generic_calls(), 0);
    assert_eq!(stats.links(), 1);
}

/// Test: Sites for different element types specialize independently
#[test]
fn test_sites_per_element_type() {
    let dispatcher = Dispatcher::default();
    let bytes = ArrayRef::new(ElementType::Byte, 3);
    let longs = ArrayRef::new(ElementType::Long, 3);
    let doubles = ArrayRef::new(ElementType::Double, 3);

    fill(&dispatcher, 1, &bytes, &Value::Byte(1));
    fill(&dispatcher, 2, &longs, &Value::Long(2));
    fill(&dispatcher, 3, &doubles, &Value::Double(0.25));

    assert_eq!(bytes.snapshot(), PrimitiveArray::Byte(vec![1, 1, 1]));
    assert_eq!(longs.snapshot(), PrimitiveArray::Long(vec![2, 2, 2]));
    assert_eq!(doubles.snapshot(), PrimitiveArray::Double(vec![0.25, 0.25, 0.25]));
    for id in 1..=3 {
        let site = dispatcher.call_site(CallSiteId(id));
        assert!(site.state().is_specialized());
        assert_eq!(site.stats().fast_path_hits(), 3);
    }
    assert_eq!(dispatcher.call_site_count(), 3);
}

/// Test: A site first reached with a coercible payload never specializes
#[test]
fn test_mixed_payload_loop() {
    let dispatcher = Dispatcher::default();
    let array = ArrayRef::new(ElementType::Short, 4);
    let receiver = Value::Array(array.clone());
    let payloads = [
        Value::Integer(1),
        Value::Short(2),
        Value::Character('3'),
        Value::Long(4),
    ];
    for (i, payload) in payloads.into_iter().enumerate() {
        dispatcher
            .invoke(CallSiteId(5), &receiver, &[Value::Integer(i as i32), payload])
            .unwrap();
    }
    assert_eq!(array.snapshot(), PrimitiveArray::Short(vec![1, 2, 51, 4]));
    let site = dispatcher.call_site(CallSiteId(5));
    assert!(!site.state().is_specialized());
    assert_eq!(site.stats().generic_calls(), 4);
}

/// Test: Failing statements leave earlier writes intact
#[test]
fn test_failures_mid_program() {
    let dispatcher = Dispatcher::default();
    let array = ArrayRef::from_storage(PrimitiveArray::Short(vec![1, 2, 3]));
    let receiver = Value::Array(array.clone());

    let results: Vec<Result<Value, ErrorKind>> = [
        (Value::Integer(0), Value::Short(10)),
        (Value::Integer(3), Value::Short(11)),
        (Value::Integer(-4), Value::Short(12)),
        (Value::Integer(1), Value::Boolean(true)),
        (Value::Double(1.0), Value::Short(13)),
        (Value::Integer(2), Value::from("no")),
        (Value::Integer(-1), Value::Short(14)),
    ]
    .into_iter()
    .map(|(index, value)| {
        dispatcher
            .invoke(CallSiteId(8), &receiver, &[index, value])
            .map_err(|err| err.kind())
    })
    .collect();

    assert_eq!(
        results,
        vec![
            Ok(Value::Null),
            Err(ErrorKind::OutOfRange),
            Err(ErrorKind::OutOfRange),
            Err(ErrorKind::TypeMismatch),
            Err(ErrorKind::TypeMismatch),
            Err(ErrorKind::UncoercibleValue),
            Ok(Value::Null),
        ]
    );
    assert_eq!(array.snapshot(), PrimitiveArray::Short(vec![10, 2, 14]));
}

/// Test: Redefinition while a loop is running is seen by the next iteration
#[test]
fn test_redefinition_between_iterations() {
    let dispatcher = Dispatcher::default();
    let array = ArrayRef::new(ElementType::Short, 4);
    let receiver = Value::Array(array.clone());

    for i in 0..4 {
        if i == 2 {
            dispatcher.registry().redefine(
                ElementType::Short,
                Arc::new(MethodOverride::new("clamp", |receiver, index, _value| {
                    let array = receiver.as_array().ok_or_else(|| {
                        RuntimeError::type_mismatch("short[]", receiver.type_name())
                    })?;
                    let index = match index {
                        Value::Integer(i) => i64::from(*i),
                        other => {
                            return Err(RuntimeError::type_mismatch("Integer", other.type_name()))
                        }
                    };
                    array.put(index, Element::Short(-1))?;
                    Ok(Value::Null)
                })),
            );
        }
        dispatcher
            .invoke(CallSiteId(1), &receiver, &[Value::Integer(i), Value::Short(9)])
            .unwrap();
    }
    assert_eq!(array.snapshot(), PrimitiveArray::Short(vec![9, 9, -1, -1]));

    dispatcher.registry().restore_builtin(ElementType::Short);
    // a fresh site specializes against the restored handler
    dispatcher
        .invoke(CallSiteId(2), &receiver, &[Value::Integer(3), Value::Short(9)])
        .unwrap();
    assert_eq!(array.snapshot(), PrimitiveArray::Short(vec![9, 9, -1, 9]));
    assert!(dispatcher.call_site(CallSiteId(2)).state().is_specialized());
}

/// Test: Dispatchers sharing a registry see each other's redefinitions
#[test]
fn test_shared_registry() {
    let registry = Arc::new(MetaClassRegistry::new());
    let a = Dispatcher::default().with_registry(Arc::clone(&registry));
    let b = Dispatcher::new(DispatchConfig::default().with_specialization(false))
        .with_registry(Arc::clone(&registry));

    let array = ArrayRef::new(ElementType::Int, 1);
    let receiver = Value::Array(array.clone());
    a.invoke(CallSiteId(1), &receiver, &[Value::Integer(0), Value::Integer(1)])
        .unwrap();
    assert!(a.call_site(CallSiteId(1)).state().is_specialized());

    b.registry().redefine(
        ElementType::Int,
        Arc::new(MethodOverride::new("reject", |_, _, _| {
            Err(RuntimeError::type_mismatch("nothing", "Integer"))
        })),
    );
    let err = a
        .invoke(CallSiteId(1), &receiver, &[Value::Integer(0), Value::Integer(2)])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(array.get(0).unwrap(), Value::Integer(1));
}

/// Test: Worker threads filling disjoint slices through one site
#[test]
fn test_parallel_fill() {
    let dispatcher = Dispatcher::default();
    let array = ArrayRef::new(ElementType::Long, 64);
    let receiver = Value::Array(array.clone());

    std::thread::scope(|scope| {
        for worker in 0..4i32 {
            let dispatcher = &dispatcher;
            let receiver = &receiver;
            scope.spawn(move || {
                for i in (worker * 16)..((worker + 1) * 16) {
                    dispatcher
                        .invoke(
                            CallSiteId(1),
                            receiver,
                            &[Value::Integer(i), Value::Long(i64::from(i) * 10)],
                        )
                        .unwrap();
                }
            });
        }
    });

    let expected: Vec<i64> = (0..64).map(|i| i * 10).collect();
    assert_eq!(array.snapshot(), PrimitiveArray::Long(expected));
    let site = dispatcher.call_site(CallSiteId(1));
    assert_eq!(site.stats().links(), 1);
    assert_eq!(site.stats().fast_path_hits(), 64);
}
