//! Specialized call-site cache entries
//!
//! An entry remembers the container type, the argument signature and the
//! dispatch version it was created for. While all three still hold, an
//! assignment is a direct store: no handler lookup and no coercion.

use crate::descriptor::ElementDescriptor;
use crate::meta_class::{DispatchVersion, MetaClassRegistry};
use crate::shape::{payload_mismatch, ArgShape, SiteCheck};
use core_types::{Element, RuntimeResult, Value};

/// Why an entry declined to take its fast path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The receiver's dispatch table changed since specialization
    StaleGuard,
    /// Receiver is not the specialized container type
    WrongReceiver,
    /// Index is not a plain integer
    MismatchedIndex,
    /// Payload is not the exact boxed element type but may be coerced
    MismatchedPayload,
    /// Wrong number of arguments
    Arity,
}

/// Outcome of invoking an entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    /// The fast path completed the assignment
    Done(Value),
    /// The caller must use generic dispatch
    Fallback(FallbackReason),
}

/// A `putAt` specialization for one container type
///
/// # Example
///
/// ```
/// use call_site::{EntryOutcome, MetaClassRegistry, SpecializedPutAt};
/// use call_site::descriptor::descriptor;
/// use core_types::{ArrayRef, ElementType, Value};
///
/// let registry = MetaClassRegistry::new();
/// let entry = SpecializedPutAt::new(
///     descriptor(ElementType::Short),
///     registry.current_dispatch_version(ElementType::Short),
/// );
/// let array = ArrayRef::new(ElementType::Short, 2);
/// let outcome = entry
///     .call2(&registry, &Value::Array(array.clone()), &Value::Integer(-1), &Value::Short(4))
///     .unwrap();
/// assert_eq!(outcome, EntryOutcome::Done(Value::Null));
/// assert_eq!(array.get(1).unwrap(), Value::Short(4));
/// ```
#[derive(Debug, Clone)]
pub struct SpecializedPutAt {
    desc: &'static ElementDescriptor,
    guard: DispatchVersion,
    signature: [&'static str; 2],
}

impl SpecializedPutAt {
    /// Specialize for containers described by `desc`, valid while the
    /// dispatch table stays at `guard`
    pub fn new(desc: &'static ElementDescriptor, guard: DispatchVersion) -> Self {
        SpecializedPutAt {
            desc,
            guard,
            signature: ["Integer", desc.boxed],
        }
    }

    /// Descriptor of the specialized container type
    pub fn descriptor(&self) -> &'static ElementDescriptor {
        self.desc
    }

    /// Dispatch version captured at installation
    pub fn guard(&self) -> DispatchVersion {
        self.guard
    }

    /// Argument types this entry is specialized for
    pub fn signature(&self) -> &[&'static str; 2] {
        &self.signature
    }

    /// Whether the receiver type's dispatch table is unchanged
    #[inline]
    pub fn guard_valid(&self, registry: &MetaClassRegistry) -> bool {
        registry.current_dispatch_version(self.desc.element_type) == self.guard
    }

    /// Check the specialization's type assumptions, receiver first
    pub fn check(&self, receiver: &Value, index: &Value, value: &Value) -> SiteCheck {
        match receiver {
            Value::Array(array) if array.element_type() == self.desc.element_type => {}
            _ => return SiteCheck::WrongReceiver,
        }
        let index = match index {
            Value::Integer(i) => *i,
            _ => return SiteCheck::MismatchedIndex,
        };
        match (self.desc.unbox)(value) {
            Some(element) => SiteCheck::Fits { index, element },
            None => SiteCheck::MismatchedPayload,
        }
    }

    /// Invoke with an argument slice.
    ///
    /// Any deviation from the specialized shape falls back; only bounds
    /// faults from the direct store are raised here.
    pub fn call(
        &self,
        registry: &MetaClassRegistry,
        receiver: &Value,
        args: &[Value],
    ) -> RuntimeResult<EntryOutcome> {
        let [index, value] = args else {
            return Ok(EntryOutcome::Fallback(FallbackReason::Arity));
        };
        if !self.guard_valid(registry) {
            return Ok(EntryOutcome::Fallback(FallbackReason::StaleGuard));
        }
        match self.check(receiver, index, value) {
            SiteCheck::Fits { index, element } => self.store(receiver, index, element),
            SiteCheck::WrongReceiver => Ok(EntryOutcome::Fallback(FallbackReason::WrongReceiver)),
            SiteCheck::MismatchedIndex => {
                Ok(EntryOutcome::Fallback(FallbackReason::MismatchedIndex))
            }
            SiteCheck::MismatchedPayload => {
                Ok(EntryOutcome::Fallback(FallbackReason::MismatchedPayload))
            }
        }
    }

    /// Invoke with exactly two arguments.
    ///
    /// When receiver and index fit but the payload can never be stored in
    /// this container, the type fault is raised directly instead of
    /// falling back. Generic dispatch would raise the same fault.
    pub fn call2(
        &self,
        registry: &MetaClassRegistry,
        receiver: &Value,
        index: &Value,
        value: &Value,
    ) -> RuntimeResult<EntryOutcome> {
        if !self.guard_valid(registry) {
            return Ok(EntryOutcome::Fallback(FallbackReason::StaleGuard));
        }
        match self.check(receiver, index, value) {
            SiteCheck::Fits { index, element } => self.store(receiver, index, element),
            SiteCheck::MismatchedPayload => match ArgShape::classify(self.desc, value) {
                ArgShape::Incompatible => Err(payload_mismatch(self.desc, value)),
                _ => Ok(EntryOutcome::Fallback(FallbackReason::MismatchedPayload)),
            },
            SiteCheck::WrongReceiver => Ok(EntryOutcome::Fallback(FallbackReason::WrongReceiver)),
            SiteCheck::MismatchedIndex => {
                Ok(EntryOutcome::Fallback(FallbackReason::MismatchedIndex))
            }
        }
    }

    fn store(
        &self,
        receiver: &Value,
        index: i32,
        element: Element,
    ) -> RuntimeResult<EntryOutcome> {
        match receiver.as_array() {
            Some(array) => {
                array.put(i64::from(index), element)?;
                Ok(EntryOutcome::Done(Value::Null))
            }
            None => Ok(EntryOutcome::Fallback(FallbackReason::WrongReceiver)),
        }
    }
}
