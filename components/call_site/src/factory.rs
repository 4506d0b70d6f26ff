//! Call-site factory
//!
//! Decides, when a site is linked, whether it gets a specialized cache
//! entry or a pass-through to generic dispatch.

use crate::cache_entry::SpecializedPutAt;
use crate::call_site::SiteState;
use crate::config::DispatchConfig;
use crate::handler::PutAtHandler;
use crate::meta_class::DispatchVersion;
use core_types::Value;
use std::sync::Arc;
use tracing::debug;

/// Build the entry a call site should install.
///
/// `dispatch_table` must be read before `resolved` was looked up, so that
/// a redefinition racing with linking leaves the entry with a stale guard
/// rather than a guard that vouches for the wrong handler.
///
/// A specialized entry is produced only when specialization is enabled,
/// the resolved handler is the built-in array handler for the receiver's
/// container type, and the observed argument types are exactly
/// `[Integer, <boxed element type>]`. Everything else passes through.
pub fn specialize(
    existing: &SiteState,
    dispatch_table: DispatchVersion,
    resolved: &dyn PutAtHandler,
    arg_types: &[&str],
    receiver: &Value,
    config: &DispatchConfig,
) -> SiteState {
    let next = match resolved.builtin_descriptor() {
        Some(desc)
            if config.specialize
                && receiver.element_type() == Some(desc.element_type)
                && arg_types == ["Integer", desc.boxed] =>
        {
            SiteState::Specialized(Arc::new(SpecializedPutAt::new(desc, dispatch_table)))
        }
        _ => SiteState::PassThrough,
    };
    debug!(
        from = existing.name(),
        to = next.name(),
        receiver = receiver.type_name(),
        ?arg_types,
        "linking putAt call site"
    );
    next
}
