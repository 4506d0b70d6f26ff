//! Adaptive call-site caching for primitive array element assignment
//!
//! This crate provides the dispatch machinery behind `array[index] = value`
//! on primitive containers:
//! - Built-in element assignment handlers with a coercion fallback policy
//! - A metaclass registry whose version counters guard cached dispatch
//! - Specialized cache entries that skip coercion when argument types match
//! - A factory that decides, per call site, which entry to install
//!
//! # Example
//!
//! ```
//! use call_site::{CallSiteId, Dispatcher};
//! use core_types::{ArrayRef, ElementType, PrimitiveArray, Value};
//!
//! let dispatcher = Dispatcher::default();
//! let array = ArrayRef::new(ElementType::Short, 3);
//! let receiver = Value::Array(array.clone());
//! let site = dispatcher.call_site(CallSiteId(42));
//!
//! site.call2(&dispatcher, &receiver, &Value::Integer(0), &Value::Short(5)).unwrap();
//! site.call2(&dispatcher, &receiver, &Value::Integer(-1), &Value::Short(9)).unwrap();
//! site.call2(&dispatcher, &receiver, &Value::Integer(1), &Value::Character('A')).unwrap();
//!
//! assert_eq!(array.snapshot(), PrimitiveArray::Short(vec![5, 65, 9]));
//! assert_eq!(site.stats().fast_path_hits(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache_entry;
pub mod call_site;
pub mod config;
pub mod descriptor;
pub mod dispatcher;
pub mod factory;
pub mod handler;
pub mod meta_class;
pub mod shape;

// Re-export main types at crate root
pub use cache_entry::{EntryOutcome, FallbackReason, SpecializedPutAt};
pub use call_site::{CallSite, CallSiteId, CallSiteTable, SiteState, SiteStats};
pub use config::DispatchConfig;
pub use descriptor::ElementDescriptor;
pub use dispatcher::Dispatcher;
pub use handler::{ArrayPutAt, MethodOverride, PutAtHandler};
pub use meta_class::{DispatchVersion, MetaClassRegistry};
pub use shape::{ArgShape, SiteCheck};
