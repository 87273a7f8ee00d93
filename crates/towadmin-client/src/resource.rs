//! Keyed remote-resource cache
//!
//! Every remote collection the dashboard shows is identified by a string key
//! (which doubles as its request path). The cache owns one slot per key and
//! guarantees single-writer semantics: at most one in-flight fetch per key,
//! with concurrent revalidation requests coalesced into a single follow-up
//! fetch. Fetch failures keep the previous data (stale-while-error) and are
//! surfaced through the snapshot's `error` field; there is no automatic
//! retry.
//!
//! Slots live for the whole application run. A response that lands after the
//! requesting screen was left is still applied to its slot, so a revisited
//! screen sees the fresher data.

use dashmap::DashMap;
use futures::future::BoxFuture;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::sync::watch;
use towadmin_core::Result;
use tracing::{debug, warn};

/// Fetch function attached to a resource key
pub type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// Callback invoked whenever a slot's state changes
pub type Subscriber = Box<dyn Fn(&str) + Send + Sync>;

/// Per-resource configuration
#[derive(Debug, Clone)]
pub struct ResourceOptions {
    /// Refetch when the terminal regains focus. Every screen in this system
    /// passes `false`, trading staleness tolerance for fewer calls.
    pub revalidate_on_focus: bool,
}

impl Default for ResourceOptions {
    fn default() -> Self {
        Self {
            revalidate_on_focus: true,
        }
    }
}

/// Point-in-time view of a cache slot
#[derive(Debug, Clone, Default)]
pub struct ResourceState {
    /// Last successfully fetched payload; kept across later failures
    pub data: Option<Value>,

    /// Message of the most recent failed fetch, cleared on success
    pub error: Option<String>,

    /// Whether a fetch is currently in flight
    pub is_loading: bool,

    /// When the slot last completed a fetch (success or failure)
    pub last_fetched_at: Option<Instant>,
}

impl ResourceState {
    /// The payload as a row list, when it is an array
    #[must_use]
    pub fn rows(&self) -> Option<&Vec<Value>> {
        self.data.as_ref().and_then(Value::as_array)
    }
}

struct Slot {
    state: RwLock<ResourceState>,
    fetcher: Fetcher,
    options: ResourceOptions,
    in_flight: AtomicBool,
    // revalidation requested while a fetch was already running
    pending: AtomicBool,
    done_tx: watch::Sender<u64>,
}

impl Slot {
    fn new(fetcher: Fetcher, options: ResourceOptions) -> Self {
        let (done_tx, _) = watch::channel(0);
        Self {
            state: RwLock::new(ResourceState::default()),
            fetcher,
            options,
            in_flight: AtomicBool::new(false),
            pending: AtomicBool::new(false),
            done_tx,
        }
    }
}

struct CacheInner {
    slots: DashMap<String, Arc<Slot>>,
    subscribers: Mutex<Vec<(String, Subscriber)>>,
    handle: Handle,
}

/// Keyed cache over remote resources
///
/// Cheap to clone; clones share the same slots.
#[derive(Clone)]
pub struct ResourceCache {
    inner: Arc<CacheInner>,
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("slots", &self.inner.slots.len())
            .finish_non_exhaustive()
    }
}

impl ResourceCache {
    /// Create a cache that spawns fetches onto the given runtime
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                slots: DashMap::new(),
                subscribers: Mutex::new(Vec::new()),
                handle,
            }),
        }
    }

    /// Register a key and return a handle to it
    ///
    /// Registering an already-known key returns a handle to the existing
    /// slot; the original fetcher and options are kept, so two screens
    /// naming the same key share one in-flight request and one cached
    /// result.
    pub fn resource(
        &self,
        key: impl Into<String>,
        fetcher: Fetcher,
        options: ResourceOptions,
    ) -> Resource {
        let key = key.into();
        let slot = self
            .inner
            .slots
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Slot::new(fetcher, options)))
            .clone();
        Resource {
            key,
            slot,
            cache: self.clone(),
        }
    }

    /// Snapshot the state cached under a key, if the key is registered
    #[must_use]
    pub fn get(&self, key: &str) -> Option<ResourceState> {
        self.inner.slots.get(key).map(|slot| slot.state.read().clone())
    }

    /// Mark a key stale without fetching
    pub fn invalidate(&self, key: &str) {
        if let Some(slot) = self.inner.slots.get(key) {
            slot.state.write().last_fetched_at = None;
        }
    }

    /// Register a callback fired whenever the slot under `key` changes
    pub fn subscribe(&self, key: impl Into<String>, callback: Subscriber) {
        self.inner.subscribers.lock().push((key.into(), callback));
    }

    /// Revalidate every slot that opted into focus-driven refresh
    ///
    /// Wired to the terminal's `FocusGained` event.
    pub fn handle_focus_gained(&self) {
        for entry in &self.inner.slots {
            if entry.value().options.revalidate_on_focus {
                let resource = Resource {
                    key: entry.key().clone(),
                    slot: entry.value().clone(),
                    cache: self.clone(),
                };
                resource.spawn_revalidate();
            }
        }
    }

    fn notify(&self, key: &str) {
        for (subscribed, callback) in self.inner.subscribers.lock().iter() {
            if subscribed == key {
                callback(key);
            }
        }
    }
}

/// Handle to one cached resource
///
/// Clones share the underlying slot.
#[derive(Clone)]
pub struct Resource {
    key: String,
    slot: Arc<Slot>,
    cache: ResourceCache,
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl Resource {
    /// The resource key this handle points at
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Snapshot the current slot state
    #[must_use]
    pub fn snapshot(&self) -> ResourceState {
        self.slot.state.read().clone()
    }

    /// Kick off the initial fetch if the slot has never loaded
    pub fn ensure(&self) {
        let needs_fetch = {
            let state = self.slot.state.read();
            state.data.is_none() && state.error.is_none() && !state.is_loading
        };
        if needs_fetch {
            self.spawn_revalidate();
        }
    }

    /// Fire-and-forget revalidation on the cache's runtime
    pub fn spawn_revalidate(&self) {
        let this = self.clone();
        self.cache.inner.handle.spawn(async move {
            this.revalidate().await;
        });
    }

    /// Fetch the resource, de-duplicating against an in-flight request
    ///
    /// If another caller is already fetching this key, waits for that fetch
    /// to complete instead of issuing a second request.
    pub async fn revalidate(&self) {
        if self.try_begin() {
            self.run_fetches().await;
        } else {
            self.wait_settled().await;
        }
    }

    /// Invalidate the cached entry and refetch
    ///
    /// Issued while a fetch is already in flight, the refetch coalesces into
    /// a single follow-up request; callers awaiting `mutate` observe the
    /// refreshed data once it resolves. Last response wins.
    pub async fn mutate(&self) {
        self.cache.invalidate(&self.key);
        self.slot.pending.store(true, Ordering::SeqCst);
        if self.try_begin() {
            self.run_fetches().await;
        } else {
            self.wait_settled().await;
        }
    }

    fn try_begin(&self) -> bool {
        self.slot
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Wait until no fetch is running and no follow-up is queued
    async fn wait_settled(&self) {
        let mut done = self.slot.done_tx.subscribe();
        while self.slot.pending.load(Ordering::SeqCst) || self.slot.in_flight.load(Ordering::SeqCst)
        {
            if done.changed().await.is_err() {
                break;
            }
        }
    }

    /// Run one fetch, plus one more for each coalesced revalidation request
    async fn run_fetches(&self) {
        loop {
            self.slot.pending.store(false, Ordering::SeqCst);
            self.fetch_once().await;
            if self.slot.pending.load(Ordering::SeqCst) {
                continue;
            }
            self.slot.in_flight.store(false, Ordering::SeqCst);
            // a revalidation may have been queued in the gap just above
            if self.slot.pending.load(Ordering::SeqCst) && self.try_begin() {
                continue;
            }
            break;
        }
        self.slot.done_tx.send_modify(|n| *n += 1);
    }

    async fn fetch_once(&self) {
        {
            let mut state = self.slot.state.write();
            state.is_loading = true;
        }
        self.cache.notify(&self.key);

        let outcome = (self.slot.fetcher)().await;

        {
            let mut state = self.slot.state.write();
            match outcome {
                Ok(data) => {
                    debug!(key = %self.key, "resource fetched");
                    state.data = Some(data);
                    state.error = None;
                }
                Err(err) => {
                    // stale-while-error: keep the previous data
                    warn!(key = %self.key, error = %err, "resource fetch failed");
                    state.error = Some(err.to_string());
                }
            }
            state.is_loading = false;
            state.last_fetched_at = Some(Instant::now());
        }
        self.cache.notify(&self.key);
    }
}
