//! Call sites and their installed entries
//!
//! A call site starts unlinked. Its first invocation asks the factory for
//! an entry and installs it exactly once; concurrent first calls may each
//! build a candidate, but only the first to take the write lock installs
//! it and everybody else adopts the winner. A specialized entry whose guard
//! goes stale is replaced the same way.

use crate::cache_entry::{EntryOutcome, FallbackReason, SpecializedPutAt};
use crate::dispatcher::Dispatcher;
use core_types::{RuntimeResult, Value};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Stable identity of a call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallSiteId(pub u64);

impl fmt::Display for CallSiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "site#{}", self.0)
    }
}

/// The entry installed at a call site
#[derive(Debug, Clone)]
pub enum SiteState {
    /// Not yet invoked
    Unlinked,
    /// Always defers to generic dispatch
    PassThrough,
    /// Guarded fast path
    Specialized(Arc<SpecializedPutAt>),
}

impl SiteState {
    /// Short name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            SiteState::Unlinked => "unlinked",
            SiteState::PassThrough => "pass-through",
            SiteState::Specialized(_) => "specialized",
        }
    }

    /// Whether a specialized entry is installed
    pub fn is_specialized(&self) -> bool {
        matches!(self, SiteState::Specialized(_))
    }
}

/// Per-site counters
#[derive(Debug, Default)]
pub struct SiteStats {
    fast_path_hits: AtomicU64,
    generic_calls: AtomicU64,
    fallbacks: AtomicU64,
    links: AtomicU64,
    relinks: AtomicU64,
}

impl SiteStats {
    /// Calls completed by a specialized entry
    pub fn fast_path_hits(&self) -> u64 {
        self.fast_path_hits.load(Ordering::Relaxed)
    }

    /// Calls a pass-through entry handed to generic dispatch, failed
    /// ones included
    pub fn generic_calls(&self) -> u64 {
        self.generic_calls.load(Ordering::Relaxed)
    }

    /// Calls a specialized entry handed to generic dispatch
    pub fn fallbacks(&self) -> u64 {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Times an entry was installed on an unlinked site
    pub fn links(&self) -> u64 {
        self.links.load(Ordering::Relaxed)
    }

    /// Times a stale entry was replaced
    pub fn relinks(&self) -> u64 {
        self.relinks.load(Ordering::Relaxed)
    }

    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// A single `putAt` call site
#[derive(Debug)]
pub struct CallSite {
    id: CallSiteId,
    state: RwLock<SiteState>,
    stats: SiteStats,
}

impl CallSite {
    /// Create an unlinked call site
    pub fn new(id: CallSiteId) -> Self {
        CallSite {
            id,
            state: RwLock::new(SiteState::Unlinked),
            stats: SiteStats::default(),
        }
    }

    /// Identity of the site
    pub fn id(&self) -> CallSiteId {
        self.id
    }

    /// The currently installed entry
    pub fn state(&self) -> SiteState {
        self.state.read().clone()
    }

    /// Counters for this site
    pub fn stats(&self) -> &SiteStats {
        &self.stats
    }

    /// Invoke `receiver.putAt(args...)` through this site
    pub fn call(
        &self,
        dispatcher: &Dispatcher,
        receiver: &Value,
        args: &[Value],
    ) -> RuntimeResult<Value> {
        match self.installed(dispatcher, receiver, args) {
            SiteState::Specialized(entry) => {
                match entry.call(dispatcher.registry(), receiver, args)? {
                    EntryOutcome::Done(result) => {
                        SiteStats::bump(&self.stats.fast_path_hits);
                        Ok(result)
                    }
                    EntryOutcome::Fallback(reason) => {
                        if self.fall_back(reason) {
                            self.relink(dispatcher, &entry, receiver, args);
                        }
                        dispatcher.dispatch_generic(receiver, args)
                    }
                }
            }
            _ => {
                SiteStats::bump(&self.stats.generic_calls);
                dispatcher.dispatch_generic(receiver, args)
            }
        }
    }

    /// Invoke `receiver.putAt(index, value)` through this site
    pub fn call2(
        &self,
        dispatcher: &Dispatcher,
        receiver: &Value,
        index: &Value,
        value: &Value,
    ) -> RuntimeResult<Value> {
        let state = match self.state() {
            SiteState::Unlinked => self.link(dispatcher, receiver, &[index.clone(), value.clone()]),
            installed => installed,
        };
        match state {
            SiteState::Specialized(entry) => {
                match entry.call2(dispatcher.registry(), receiver, index, value)? {
                    EntryOutcome::Done(result) => {
                        SiteStats::bump(&self.stats.fast_path_hits);
                        Ok(result)
                    }
                    EntryOutcome::Fallback(reason) => {
                        if self.fall_back(reason) {
                            let args = [index.clone(), value.clone()];
                            self.relink(dispatcher, &entry, receiver, &args);
                        }
                        dispatcher.put_at(receiver, index, value)
                    }
                }
            }
            _ => {
                SiteStats::bump(&self.stats.generic_calls);
                dispatcher.put_at(receiver, index, value)
            }
        }
    }

    fn installed(&self, dispatcher: &Dispatcher, receiver: &Value, args: &[Value]) -> SiteState {
        match self.state() {
            SiteState::Unlinked => self.link(dispatcher, receiver, args),
            installed => installed,
        }
    }

    fn link(&self, dispatcher: &Dispatcher, receiver: &Value, args: &[Value]) -> SiteState {
        let candidate = dispatcher.resolve_site(&SiteState::Unlinked, receiver, args);
        let mut state = self.state.write();
        if matches!(*state, SiteState::Unlinked) {
            debug!(site = %self.id, entry = candidate.name(), "call site linked");
            *state = candidate;
            SiteStats::bump(&self.stats.links);
        }
        state.clone()
    }

    /// Record a declined fast path; true when the entry must be relinked
    fn fall_back(&self, reason: FallbackReason) -> bool {
        trace!(site = %self.id, ?reason, "fast path declined");
        SiteStats::bump(&self.stats.fallbacks);
        reason == FallbackReason::StaleGuard
    }

    fn relink(
        &self,
        dispatcher: &Dispatcher,
        stale: &Arc<SpecializedPutAt>,
        receiver: &Value,
        args: &[Value],
    ) {
        let existing = SiteState::Specialized(Arc::clone(stale));
        let candidate = dispatcher.resolve_site(&existing, receiver, args);
        let mut state = self.state.write();
        // another caller may already have replaced the stale entry
        let still_stale =
            matches!(&*state, SiteState::Specialized(current) if Arc::ptr_eq(current, stale));
        if still_stale {
            debug!(site = %self.id, entry = candidate.name(), "call site relinked");
            *state = candidate;
            SiteStats::bump(&self.stats.relinks);
        }
    }
}

/// Call sites keyed by identity
///
/// Every caller asking for the same id receives the same site, even when
/// the first requests race.
#[derive(Debug, Default)]
pub struct CallSiteTable {
    sites: RwLock<HashMap<CallSiteId, Arc<CallSite>>>,
}

impl CallSiteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The site for `id`, created unlinked on first request
    pub fn get_or_create(&self, id: CallSiteId) -> Arc<CallSite> {
        if let Some(site) = self.sites.read().get(&id) {
            return Arc::clone(site);
        }
        let mut sites = self.sites.write();
        Arc::clone(
            sites
                .entry(id)
                .or_insert_with(|| Arc::new(CallSite::new(id))),
        )
    }

    /// Number of sites created
    pub fn len(&self) -> usize {
        self.sites.read().len()
    }

    /// Whether no site has been created
    pub fn is_empty(&self) -> bool {
        self.sites.read().is_empty()
    }
}
