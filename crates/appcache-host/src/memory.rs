//! In-memory cache backend for development and testing.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use appcache_core::{CacheBackend, CacheId, CacheStatus, HostId};
use url::Url;

/// A recorded `select_cache` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectCacheCall {
    pub host_id: HostId,
    pub document_url: Url,
    pub cache_id: CacheId,
    pub manifest_url: Option<Url>,
}

/// A recorded `mark_as_foreign_entry` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignEntryCall {
    pub host_id: HostId,
    pub document_url: Url,
    pub cache_id: CacheId,
}

#[derive(Debug, Default)]
struct BackendState {
    registered: HashSet<HostId>,
    statuses: HashMap<HostId, CacheStatus>,
    status_fetches: HashMap<HostId, u32>,
    selections: Vec<SelectCacheCall>,
    foreign_entries: Vec<ForeignEntryCall>,
    update_result: Option<bool>,
    swap_result: Option<bool>,
}

/// In-memory `CacheBackend`.
///
/// Records every call so tests can observe exactly what a host asked for,
/// and answers synchronous status fetches from a seedable table.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: Mutex<BackendState>,
}

impl InMemoryBackend {
    /// Create a new in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the status the next synchronous fetch returns for `host_id`.
    pub fn set_status(&self, host_id: HostId, status: CacheStatus) {
        self.state().statuses.insert(host_id, status);
    }

    /// Number of synchronous status fetches made for `host_id`.
    pub fn status_fetch_count(&self, host_id: HostId) -> u32 {
        self.state()
            .status_fetches
            .get(&host_id)
            .copied()
            .unwrap_or(0)
    }

    /// Recorded cache selections, oldest first.
    pub fn selections(&self) -> Vec<SelectCacheCall> {
        self.state().selections.clone()
    }

    /// Recorded foreign-entry marks, oldest first.
    pub fn foreign_entries(&self) -> Vec<ForeignEntryCall> {
        self.state().foreign_entries.clone()
    }

    /// Check whether `host_id` is currently registered.
    pub fn is_registered(&self, host_id: HostId) -> bool {
        self.state().registered.contains(&host_id)
    }

    /// Override the result of `start_update` (defaults to `true`).
    pub fn set_update_result(&self, result: bool) {
        self.state().update_result = Some(result);
    }

    /// Override the result of `swap_cache` (defaults to `true`).
    pub fn set_swap_result(&self, result: bool) {
        self.state().swap_result = Some(result);
    }

    fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CacheBackend for InMemoryBackend {
    fn register_host(&self, host_id: HostId) {
        let inserted = self.state().registered.insert(host_id);
        debug_assert!(inserted, "{host_id} registered twice");
    }

    fn unregister_host(&self, host_id: HostId) {
        let mut state = self.state();
        let removed = state.registered.remove(&host_id);
        debug_assert!(removed, "{host_id} unregistered while not registered");
        state.statuses.remove(&host_id);
    }

    fn select_cache(
        &self,
        host_id: HostId,
        document_url: &Url,
        cache_id: CacheId,
        manifest_url: Option<&Url>,
    ) {
        self.state().selections.push(SelectCacheCall {
            host_id,
            document_url: document_url.clone(),
            cache_id,
            manifest_url: manifest_url.cloned(),
        });
    }

    fn mark_as_foreign_entry(&self, host_id: HostId, document_url: &Url, cache_id: CacheId) {
        self.state().foreign_entries.push(ForeignEntryCall {
            host_id,
            document_url: document_url.clone(),
            cache_id,
        });
    }

    fn get_status(&self, host_id: HostId) -> CacheStatus {
        let mut state = self.state();
        *state.status_fetches.entry(host_id).or_insert(0) += 1;
        state.statuses.get(&host_id).copied().unwrap_or_default()
    }

    fn start_update(&self, host_id: HostId) -> bool {
        debug_assert!(self.is_registered(host_id));
        self.state().update_result.unwrap_or(true)
    }

    fn swap_cache(&self, host_id: HostId) -> bool {
        debug_assert!(self.is_registered(host_id));
        self.state().swap_result.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_uncached() {
        let backend = InMemoryBackend::new();
        let id = HostId::new(1);
        assert_eq!(backend.get_status(id), CacheStatus::Uncached);
        assert_eq!(backend.status_fetch_count(id), 1);
    }

    #[test]
    fn test_seeded_status_is_returned() {
        let backend = InMemoryBackend::new();
        let id = HostId::new(1);
        backend.set_status(id, CacheStatus::UpdateReady);
        assert_eq!(backend.get_status(id), CacheStatus::UpdateReady);
    }

    #[test]
    fn test_register_unregister_roundtrip() {
        let backend = InMemoryBackend::new();
        let id = HostId::new(2);
        backend.register_host(id);
        assert!(backend.is_registered(id));
        backend.unregister_host(id);
        assert!(!backend.is_registered(id));
    }

    #[test]
    fn test_selection_recording() {
        let backend = InMemoryBackend::new();
        let id = HostId::new(3);
        let document = Url::parse("http://example.com/").unwrap();
        let manifest = Url::parse("http://example.com/app.manifest").unwrap();
        backend.select_cache(id, &document, CacheId::NONE, Some(&manifest));

        let selections = backend.selections();
        assert_eq!(selections.len(), 1);
        assert_eq!(selections[0].host_id, id);
        assert_eq!(selections[0].manifest_url, Some(manifest));
    }
}
