//! Backend service contract.

use url::Url;

use crate::ids::{CacheId, HostId};
use crate::status::CacheStatus;

/// Contract implemented by the backend service that owns authoritative
/// cache state.
///
/// All calls are synchronous within the process. The backend serializes
/// them against its own asynchronous event stream, so a `get_status`
/// answer is never staler than the most recent acknowledged operation.
pub trait CacheBackend: Send + Sync {
    /// Register a newly constructed host.
    fn register_host(&self, host_id: HostId);

    /// Unregister a host at teardown.
    fn unregister_host(&self, host_id: HostId);

    /// Select a cache for the host's current document.
    ///
    /// `cache_id` is the document's existing association (or
    /// `CacheId::NONE`); `manifest_url` is the stripped manifest URL, or
    /// `None` for a no-manifest selection.
    fn select_cache(
        &self,
        host_id: HostId,
        document_url: &Url,
        cache_id: CacheId,
        manifest_url: Option<&Url>,
    );

    /// Mark the document's existing cache entry as foreign.
    fn mark_as_foreign_entry(&self, host_id: HostId, document_url: &Url, cache_id: CacheId);

    /// Synchronously fetch the host's current status.
    fn get_status(&self, host_id: HostId) -> CacheStatus;

    /// Ask the backend to start an update check.
    fn start_update(&self, host_id: HostId) -> bool;

    /// Ask the backend to swap in a ready cache version.
    fn swap_cache(&self, host_id: HostId) -> bool;
}
