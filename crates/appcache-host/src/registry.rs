//! Process-wide host handle allocation.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use appcache_core::HostId;

/// Allocator of `HostId` handles.
///
/// Handles are monotonic and never recycled, so a handle can never be
/// handed to a new host while events addressed to a previous owner are
/// still in flight.
#[derive(Debug)]
pub struct HostRegistry {
    next_id: AtomicU32,
    live: Mutex<HashSet<HostId>>,
}

impl HostRegistry {
    /// Create an empty registry. Handles start at 1; 0 is never allocated.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU32::new(1),
            live: Mutex::new(HashSet::new()),
        }
    }

    /// The process-wide registry hosts allocate from.
    pub fn global() -> &'static HostRegistry {
        static REGISTRY: OnceLock<HostRegistry> = OnceLock::new();
        REGISTRY.get_or_init(HostRegistry::new)
    }

    /// Allocate a fresh handle.
    pub fn allocate(&self) -> HostId {
        let id = HostId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.live_set().insert(id);
        id
    }

    /// Release a handle at host destruction.
    ///
    /// Releasing a handle that is not live is a caller bug.
    pub fn release(&self, id: HostId) {
        let removed = self.live_set().remove(&id);
        debug_assert!(removed, "released {id} which was not live");
    }

    /// Check whether a handle currently belongs to a live host.
    pub fn is_live(&self, id: HostId) -> bool {
        self.live_set().contains(&id)
    }

    /// Number of live hosts.
    pub fn live_count(&self) -> usize {
        self.live_set().len()
    }

    fn live_set(&self) -> std::sync::MutexGuard<'_, HashSet<HostId>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for HostRegistry {
    fn default() -> Self {
        Self::new()
    }
}
