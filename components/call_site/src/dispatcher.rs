//! Generic dispatch for element assignment
//!
//! The dispatcher owns the metaclass registry, the coercion service and
//! the call-site table. Generic dispatch resolves the current handler for
//! the receiver's container type on every call; call sites use it both
//! as their pass-through target and as the fallback of a specialized
//! entry.

use crate::call_site::{CallSite, CallSiteId, CallSiteTable, SiteState};
use crate::config::DispatchConfig;
use crate::factory;
use crate::meta_class::MetaClassRegistry;
use crate::shape::integral_index;
use core_types::{RuntimeError, RuntimeResult, Value};
use std::fmt;
use std::sync::Arc;
use type_coercion::{DefaultTypeCoercion, TypeCoercion};

/// Entry point for `putAt` / `getAt` on primitive containers
///
/// # Example
///
/// ```
/// use call_site::{CallSiteId, Dispatcher};
/// use core_types::{ArrayRef, ElementType, Value};
///
/// let dispatcher = Dispatcher::default();
/// let array = ArrayRef::new(ElementType::Short, 3);
/// let receiver = Value::Array(array.clone());
///
/// dispatcher
///     .invoke(CallSiteId(1), &receiver, &[Value::Integer(0), Value::Short(5)])
///     .unwrap();
/// assert_eq!(dispatcher.get_at(&receiver, &Value::Integer(0)).unwrap(), Value::Short(5));
/// assert!(dispatcher.call_site(CallSiteId(1)).state().is_specialized());
/// ```
pub struct Dispatcher {
    registry: Arc<MetaClassRegistry>,
    coercion: Arc<dyn TypeCoercion>,
    config: DispatchConfig,
    sites: CallSiteTable,
}

impl Dispatcher {
    /// Create a dispatcher using the default coercion rules for `config`
    pub fn new(config: DispatchConfig) -> Self {
        let coercion = Arc::new(DefaultTypeCoercion::new(config.narrowing));
        Self::with_coercion(config, coercion)
    }

    /// Create a dispatcher with a custom coercion service
    pub fn with_coercion(config: DispatchConfig, coercion: Arc<dyn TypeCoercion>) -> Self {
        Dispatcher {
            registry: Arc::new(MetaClassRegistry::new()),
            coercion,
            config,
            sites: CallSiteTable::new(),
        }
    }

    /// Share an existing registry
    pub fn with_registry(mut self, registry: Arc<MetaClassRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// The metaclass registry
    pub fn registry(&self) -> &MetaClassRegistry {
        &self.registry
    }

    /// The coercion service
    pub fn coercion(&self) -> &dyn TypeCoercion {
        self.coercion.as_ref()
    }

    /// The configuration
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// The call site for `id`, created on first request
    pub fn call_site(&self, id: CallSiteId) -> Arc<CallSite> {
        self.sites.get_or_create(id)
    }

    /// Number of call sites created so far
    pub fn call_site_count(&self) -> usize {
        self.sites.len()
    }

    /// Invoke `receiver.putAt(args...)` through the call site `id`
    pub fn invoke(
        &self,
        id: CallSiteId,
        receiver: &Value,
        args: &[Value],
    ) -> RuntimeResult<Value> {
        self.call_site(id).call(self, receiver, args)
    }

    /// Generic `receiver[index] = value`.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the receiver is not a primitive container, plus
    /// whatever the resolved handler raises.
    pub fn put_at(&self, receiver: &Value, index: &Value, value: &Value) -> RuntimeResult<Value> {
        let element_type = receiver
            .element_type()
            .ok_or_else(|| RuntimeError::type_mismatch("primitive array", receiver.type_name()))?;
        let handler = self.registry.handler_for(element_type);
        handler.put_at(self.coercion.as_ref(), receiver, index, value)
    }

    /// Generic dispatch with an argument slice
    pub fn dispatch_generic(&self, receiver: &Value, args: &[Value]) -> RuntimeResult<Value> {
        match args {
            [index, value] => self.put_at(receiver, index, value),
            _ => Err(RuntimeError::type_mismatch(
                "2 arguments",
                format!("{} arguments", args.len()),
            )),
        }
    }

    /// Read `receiver[index]`
    pub fn get_at(&self, receiver: &Value, index: &Value) -> RuntimeResult<Value> {
        let array = receiver
            .as_array()
            .ok_or_else(|| RuntimeError::type_mismatch("primitive array", receiver.type_name()))?;
        array.get(integral_index(index)?)
    }

    /// Ask the factory what a site observing this call should install
    pub fn resolve_site(
        &self,
        existing: &SiteState,
        receiver: &Value,
        args: &[Value],
    ) -> SiteState {
        let Some(element_type) = receiver.element_type() else {
            return SiteState::PassThrough;
        };
        // version first, so a concurrent redefinition leaves the guard stale
        let version = self.registry.current_dispatch_version(element_type);
        let handler = self.registry.handler_for(element_type);
        let arg_types: Vec<&str> = args.iter().map(Value::type_name).collect();
        factory::specialize(
            existing,
            version,
            handler.as_ref(),
            &arg_types,
            receiver,
            &self.config,
        )
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatchConfig::default())
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("coercion", &"TypeCoercion")
            .field("config", &self.config)
            .field("sites", &self.sites.len())
            .finish()
    }
}
