//! Contract tests for the call_site API
//!
//! These tests verify the public API shape and its documented guarantees.

use call_site::{
    descriptor::descriptor, factory, ArgShape, ArrayPutAt, CallSiteId, CallSiteTable,
    DispatchConfig, DispatchVersion, Dispatcher, EntryOutcome, FallbackReason, MetaClassRegistry,
    MethodOverride, PutAtHandler, SiteCheck, SiteState, SpecializedPutAt,
};
use core_types::{ArrayRef, Element, ElementType, ErrorKind, Value};
use std::sync::Arc;
use type_coercion::NarrowingPolicy;

/// Test DispatchConfig defaults
#[test]
fn test_dispatch_config_default_contract() {
    let config = DispatchConfig::default();
    assert!(config.specialize);
    assert_eq!(config.narrowing, NarrowingPolicy::Truncate);

    let config = config
        .with_specialization(false)
        .with_narrowing(NarrowingPolicy::Checked);
    assert!(!config.specialize);
    assert_eq!(config.narrowing, NarrowingPolicy::Checked);
}

/// Test MetaClassRegistry::current_dispatch_version() is monotonic
#[test]
fn test_dispatch_version_contract() {
    let registry = MetaClassRegistry::default();
    let first = registry.current_dispatch_version(ElementType::Short);
    let second = registry.restore_builtin(ElementType::Short);
    assert!(second > first);
    assert_eq!(registry.current_dispatch_version(ElementType::Short), second);
}

/// Test ArgShape::classify() covers every payload category
#[test]
fn test_arg_shape_contract() {
    let desc = descriptor(ElementType::Short);
    assert_eq!(
        ArgShape::classify(desc, &Value::Short(2)),
        ArgShape::ExactMatch(Element::Short(2))
    );
    assert_eq!(ArgShape::classify(desc, &Value::Character('c')), ArgShape::CharacterLike);
    assert_eq!(ArgShape::classify(desc, &Value::from("c")), ArgShape::CharacterLike);
    assert_eq!(ArgShape::classify(desc, &Value::Integer(2)), ArgShape::GenericNumeric);
    assert_eq!(ArgShape::classify(desc, &Value::Boolean(false)), ArgShape::Incompatible);
}

/// Test SpecializedPutAt::check() reports the first failing assumption
#[test]
fn test_specialized_check_contract() {
    let registry = MetaClassRegistry::new();
    let entry = SpecializedPutAt::new(
        descriptor(ElementType::Short),
        registry.current_dispatch_version(ElementType::Short),
    );
    assert_eq!(entry.signature(), &["Integer", "Short"]);

    let shorts = Value::Array(ArrayRef::new(ElementType::Short, 1));
    assert_eq!(
        entry.check(&shorts, &Value::Integer(0), &Value::Short(1)),
        SiteCheck::Fits {
            index: 0,
            element: Element::Short(1)
        }
    );
    assert_eq!(
        entry.check(&Value::Null, &Value::Long(0), &Value::Null),
        SiteCheck::WrongReceiver
    );
    assert_eq!(
        entry.check(&shorts, &Value::Long(0), &Value::Null),
        SiteCheck::MismatchedIndex
    );
    assert_eq!(
        entry.check(&shorts, &Value::Integer(0), &Value::Integer(1)),
        SiteCheck::MismatchedPayload
    );
}

/// Test SpecializedPutAt::call() falls back on arity before anything else
#[test]
fn test_specialized_call_arity_contract() {
    let registry = MetaClassRegistry::new();
    let entry = SpecializedPutAt::new(
        descriptor(ElementType::Short),
        registry.current_dispatch_version(ElementType::Short),
    );
    let shorts = Value::Array(ArrayRef::new(ElementType::Short, 1));
    let outcome = entry.call(&registry, &shorts, &[Value::Integer(0)]).unwrap();
    assert_eq!(outcome, EntryOutcome::Fallback(FallbackReason::Arity));
}

/// Test factory::specialize() only specializes built-in handlers
#[test]
fn test_factory_contract() {
    let receiver = Value::Array(ArrayRef::new(ElementType::Int, 1));
    let state = factory::specialize(
        &SiteState::Unlinked,
        DispatchVersion(0),
        &ArrayPutAt::new(ElementType::Int),
        &["Integer", "Integer"],
        &receiver,
        &DispatchConfig::default(),
    );
    assert!(state.is_specialized());

    let state = factory::specialize(
        &SiteState::Unlinked,
        DispatchVersion(0),
        &MethodOverride::new("user", |_, _, _| Ok(Value::Null)),
        &["Integer", "Integer"],
        &receiver,
        &DispatchConfig::default(),
    );
    assert!(matches!(state, SiteState::PassThrough));
}

/// Test PutAtHandler is object safe and shareable
#[test]
fn test_put_at_handler_object_contract() {
    let handlers: Vec<Arc<dyn PutAtHandler>> = vec![
        Arc::new(ArrayPutAt::new(ElementType::Byte)),
        Arc::new(MethodOverride::new("user", |_, _, _| Ok(Value::Null))),
    ];
    assert!(handlers[0].builtin_descriptor().is_some());
    assert!(handlers[1].builtin_descriptor().is_none());
}

/// Test CallSiteTable::get_or_create() starts sites unlinked
#[test]
fn test_call_site_table_contract() {
    let table = CallSiteTable::new();
    assert!(table.is_empty());
    let site = table.get_or_create(CallSiteId(1));
    assert!(matches!(site.state(), SiteState::Unlinked));
    assert_eq!(table.len(), 1);
}

/// Test Dispatcher::invoke() links the site and returns Null
#[test]
fn test_dispatcher_invoke_contract() {
    let dispatcher = Dispatcher::default();
    let receiver = Value::Array(ArrayRef::new(ElementType::Long, 2));
    let result = dispatcher
        .invoke(CallSiteId(4), &receiver, &[Value::Integer(1), Value::Long(9)])
        .unwrap();
    assert_eq!(result, Value::Null);
    assert_eq!(
        dispatcher.get_at(&receiver, &Value::Integer(1)).unwrap(),
        Value::Long(9)
    );
    assert_eq!(dispatcher.call_site_count(), 1);
}

/// Test error kinds raised through Dispatcher::put_at()
#[test]
fn test_dispatcher_error_kinds_contract() {
    let dispatcher = Dispatcher::default();
    let receiver = Value::Array(ArrayRef::new(ElementType::Short, 1));

    let err = dispatcher
        .put_at(&receiver, &Value::Integer(1), &Value::Short(1))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);

    let err = dispatcher
        .put_at(&receiver, &Value::Integer(0), &Value::Null)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    let err = dispatcher
        .put_at(&receiver, &Value::Integer(0), &Value::from("xy"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UncoercibleValue);
}
