//! Metaclass registry: per-receiver-type dispatch tables and their versions.
//!
//! Each primitive container type owns one `putAt` slot and one version
//! counter. Redefining the method swaps the slot and bumps the counter, so
//! a cache entry can validate itself with a single atomic load.

use crate::handler::{ArrayPutAt, PutAtHandler};
use core_types::ElementType;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Snapshot of a dispatch table's identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DispatchVersion(pub u64);

#[derive(Debug)]
struct MetaClass {
    put_at: RwLock<Arc<dyn PutAtHandler>>,
    version: AtomicU64,
}

/// Registry of `putAt` handlers keyed by receiver element type
///
/// # Example
///
/// ```
/// use call_site::{MetaClassRegistry, MethodOverride};
/// use core_types::{ElementType, Value};
/// use std::sync::Arc;
///
/// let registry = MetaClassRegistry::new();
/// let before = registry.current_dispatch_version(ElementType::Short);
///
/// registry.redefine(
///     ElementType::Short,
///     Arc::new(MethodOverride::new("ignore", |_, _, _| Ok(Value::Null))),
/// );
/// assert_ne!(registry.current_dispatch_version(ElementType::Short), before);
/// assert!(registry.handler_for(ElementType::Short).builtin_descriptor().is_none());
/// ```
#[derive(Debug)]
pub struct MetaClassRegistry {
    classes: [MetaClass; 6],
}

/// Position of an element type in the registry table
fn slot(element_type: ElementType) -> usize {
    match element_type {
        ElementType::Byte => 0,
        ElementType::Short => 1,
        ElementType::Int => 2,
        ElementType::Long => 3,
        ElementType::Float => 4,
        ElementType::Double => 5,
    }
}

impl MetaClassRegistry {
    /// Create a registry with the built-in handler installed for every
    /// element type
    pub fn new() -> Self {
        // ALL lists the element types in slot order
        let classes = ElementType::ALL.map(|element_type| {
            let handler: Arc<dyn PutAtHandler> = Arc::new(ArrayPutAt::new(element_type));
            MetaClass {
                put_at: RwLock::new(handler),
                version: AtomicU64::new(0),
            }
        });
        MetaClassRegistry { classes }
    }

    fn class(&self, element_type: ElementType) -> &MetaClass {
        &self.classes[slot(element_type)]
    }

    /// The handler currently resolved for containers of `element_type`
    pub fn handler_for(&self, element_type: ElementType) -> Arc<dyn PutAtHandler> {
        Arc::clone(&self.class(element_type).put_at.read())
    }

    /// Current version of the dispatch table for `element_type`.
    ///
    /// A single atomic load; safe to call on every invocation.
    pub fn current_dispatch_version(&self, element_type: ElementType) -> DispatchVersion {
        DispatchVersion(self.class(element_type).version.load(Ordering::Acquire))
    }

    /// Replace the `putAt` method for `element_type`.
    ///
    /// Returns the new dispatch version. Every cache entry specialized
    /// against an earlier version stops taking its fast path.
    pub fn redefine(
        &self,
        element_type: ElementType,
        handler: Arc<dyn PutAtHandler>,
    ) -> DispatchVersion {
        let class = self.class(element_type);
        *class.put_at.write() = handler;
        let version = class.version.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(receiver = element_type.array_name(), version, "putAt redefined");
        DispatchVersion(version)
    }

    /// Restore the built-in handler for `element_type`.
    ///
    /// This is a redefinition like any other and bumps the version.
    pub fn restore_builtin(&self, element_type: ElementType) -> DispatchVersion {
        self.redefine(element_type, Arc::new(ArrayPutAt::new(element_type)))
    }
}

impl Default for MetaClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}
