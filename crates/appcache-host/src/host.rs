//! The per-frame cache host: status tracking and cache selection.

use std::sync::Arc;

use appcache_core::{
    is_scheme_supported, same_origin, strip_fragment, CacheBackend, CacheEventId, CacheHostClient,
    CacheId, CacheStatus, HostConfig, HostId, LogLevel, ResourceRequest, ResourceResponse,
};
use url::Url;

use crate::registry::HostRegistry;

/// Whether the current navigation is establishing a new master cache entry.
///
/// Transitions away from `Maybe` exactly once per navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MasterEntryDisposition {
    /// Not yet determined.
    #[default]
    Maybe,
    /// This navigation does not create a master entry.
    No,
    /// This navigation is adding the document as a new master entry.
    Yes,
}

/// Per-navigable-unit mediator between page script and the cache backend.
///
/// Registers a process-unique handle with the backend at construction and
/// unregisters at drop. All operations run on the owning frame's single
/// logical thread; the backend replies with asynchronous `on_*`
/// notifications plus the occasional deliberate synchronous query.
pub struct CacheHost<B: CacheBackend, C: CacheHostClient> {
    host_id: HostId,
    backend: Arc<B>,
    client: C,
    config: HostConfig,
    /// Authoritative status from the most recent asynchronous event.
    live_status: Option<CacheStatus>,
    /// On-demand snapshot used until the first event arrives.
    cached_status: Option<CacheStatus>,
    document_url: Option<Url>,
    document_response: Option<ResourceResponse>,
    is_scheme_supported: bool,
    is_get_method: bool,
    master_entry: MasterEntryDisposition,
    pending_master_entry_bytes: u64,
}

impl<B: CacheBackend, C: CacheHostClient> CacheHost<B, C> {
    /// Create a host with the default configuration.
    pub fn new(backend: Arc<B>, client: C) -> Self {
        Self::with_config(backend, client, HostConfig::default())
    }

    /// Create a host, allocate its handle, and register with the backend.
    pub fn with_config(backend: Arc<B>, client: C, config: HostConfig) -> Self {
        let host_id = HostRegistry::global().allocate();
        backend.register_host(host_id);
        Self {
            host_id,
            backend,
            client,
            config,
            live_status: None,
            cached_status: None,
            document_url: None,
            document_response: None,
            is_scheme_supported: false,
            is_get_method: false,
            master_entry: MasterEntryDisposition::Maybe,
            pending_master_entry_bytes: 0,
        }
    }

    /// This host's registered handle.
    pub fn host_id(&self) -> HostId {
        self.host_id
    }

    /// Master-entry disposition for the current navigation.
    pub fn master_entry_disposition(&self) -> MasterEntryDisposition {
        self.master_entry
    }

    /// Document URL captured from the main-resource response, fragment
    /// stripped.
    pub fn document_url(&self) -> Option<&Url> {
        self.document_url.as_ref()
    }

    /// The backend completed a cache selection for this host.
    pub fn on_cache_selected(&mut self, _cache_id: CacheId, status: CacheStatus) {
        self.live_status = Some(status);
    }

    /// The backend reports a status change.
    ///
    /// Ignored until the first selection completes; a premature update
    /// would otherwise mask the synchronous snapshot path.
    pub fn on_status_changed(&mut self, status: CacheStatus) {
        if self.live_status.is_some() {
            self.live_status = Some(status);
        }
    }

    /// The backend raised a lifecycle event other than Progress or Error.
    pub fn on_event_raised(&mut self, event: CacheEventId) {
        debug_assert!(
            event != CacheEventId::Progress,
            "progress events have a dedicated handler"
        );
        debug_assert!(
            event != CacheEventId::Error,
            "error events have a dedicated handler"
        );

        // Emit log output before calling out to script; the event handler
        // can tear down the frame that owns this host.
        let message = format!("Application Cache {} event", event.name());
        tracing::info!(host = %self.host_id, "{}", message);
        self.client.notify_log_message(LogLevel::Info, &message);

        // Most events change the status. Drop what we know so the latest
        // value is obtained from the backend on the next query.
        self.live_status = None;
        self.cached_status = None;
        self.client.notify_event(event);
    }

    /// The backend raised a download progress tick.
    ///
    /// Progress does not change the status enum, so the caches are left
    /// untouched.
    pub fn on_progress_event_raised(&mut self, url: &Url, num_total: u32, num_complete: u32) {
        let message = format!(
            "Application Cache Progress event ({} of {}) {}",
            num_complete, num_total, url
        );
        tracing::info!(host = %self.host_id, "{}", message);
        self.client.notify_log_message(LogLevel::Info, &message);

        self.client.notify_progress_event(url, num_total, num_complete);
    }

    /// The backend raised an error event.
    pub fn on_error_event_raised(&mut self, message: &str) {
        let full_message = format!("Application Cache Error event: {}", message);
        tracing::error!(host = %self.host_id, "{}", full_message);
        self.client.notify_log_message(LogLevel::Error, &full_message);

        self.live_status = None;
        self.cached_status = None;
        self.client.notify_event(CacheEventId::Error);
    }

    /// Stamp an outgoing main-resource fetch with this host's handle and
    /// record whether the method is GET.
    pub fn will_start_main_resource_request(&mut self, request: &mut ResourceRequest) {
        request.set_host_id(self.host_id);
        let method = request.method.to_ascii_uppercase();
        self.is_get_method = method == "GET";
        request.method = method;
    }

    /// Stamp an outgoing subresource fetch with this host's handle.
    pub fn will_start_sub_resource_request(&mut self, request: &mut ResourceRequest) {
        request.set_host_id(self.host_id);
    }

    /// Capture the main-resource response for the current navigation.
    pub fn did_receive_response_for_main_resource(&mut self, response: ResourceResponse) {
        let document_url = strip_fragment(&response.url);
        self.is_scheme_supported =
            is_scheme_supported(&document_url, &self.config.supported_schemes);
        if !response.cache_id.is_none() || !self.is_scheme_supported || !self.is_get_method {
            self.master_entry = MasterEntryDisposition::No;
        }
        self.document_url = Some(document_url);
        self.document_response = Some(response);
    }

    /// Account main-resource body bytes toward a pending master entry.
    pub fn did_receive_data_for_main_resource(&mut self, data: &[u8]) {
        if self.master_entry == MasterEntryDisposition::No {
            return;
        }
        self.pending_master_entry_bytes += data.len() as u64;
    }

    /// The main-resource load finished.
    pub fn did_finish_loading_main_resource(&mut self, success: bool) {
        if self.master_entry == MasterEntryDisposition::No {
            return;
        }
        tracing::debug!(
            host = %self.host_id,
            bytes = self.pending_master_entry_bytes,
            success,
            "main resource finished for pending master entry"
        );
        self.pending_master_entry_bytes = 0;
    }

    /// Select "no cache" for the current document.
    pub fn select_cache_without_manifest(&mut self) {
        // Reset any previous status values received from the backend since
        // a new cache is being selected.
        self.live_status = None;
        self.cached_status = None;
        self.master_entry = MasterEntryDisposition::No;

        let Some(document_url) = self.document_url.clone() else {
            debug_assert!(false, "cache selection before main-resource response");
            return;
        };
        self.backend
            .select_cache(self.host_id, &document_url, self.document_cache_id(), None);
    }

    /// The application cache selection algorithm (HTML 6.9.6).
    ///
    /// Returns `true` when the caller should proceed with the navigation
    /// and `false` in the foreign-entry case, where the navigation must be
    /// restarted under the correct origin/manifest pairing.
    pub fn select_cache_with_manifest(&mut self, manifest_url: &Url) -> bool {
        // Reset any previous status values received from the backend since
        // a new cache is being selected.
        self.live_status = None;
        self.cached_status = None;

        let manifest = strip_fragment(manifest_url);

        let Some(document_url) = self.document_url.clone() else {
            debug_assert!(false, "cache selection before main-resource response");
            return true;
        };
        let document_cache_id = self.document_cache_id();

        // Check for a new master entry.
        if document_cache_id.is_none() {
            if self.is_scheme_supported
                && self.is_get_method
                && same_origin(&manifest, &document_url)
            {
                self.master_entry = MasterEntryDisposition::Yes;
                self.backend
                    .select_cache(self.host_id, &document_url, CacheId::NONE, Some(&manifest));
            } else {
                // Ineligible; fall back to a no-manifest selection.
                self.master_entry = MasterEntryDisposition::No;
                self.backend
                    .select_cache(self.host_id, &document_url, CacheId::NONE, None);
            }
            return true;
        }

        debug_assert_eq!(self.master_entry, MasterEntryDisposition::No);

        // Check for a foreign entry: the document's cache was selected
        // under a different manifest than the one it now references.
        let document_manifest = self
            .document_response
            .as_ref()
            .and_then(|response| response.manifest_url.clone());
        if document_manifest.as_ref() != Some(&manifest) {
            self.backend
                .mark_as_foreign_entry(self.host_id, &document_url, document_cache_id);
            self.cached_status = Some(CacheStatus::Uncached);
            return false; // the navigation will be restarted
        }

        // A master entry that is already in the cache.
        self.backend
            .select_cache(self.host_id, &document_url, document_cache_id, Some(&manifest));
        true
    }

    /// Script-visible status.
    ///
    /// The backend streams selection and status events asynchronously, but
    /// script can query in advance of the first selection completing. In
    /// that window the first query performs one end-to-end synchronous
    /// fetch and the answer is memoized separately from the event-driven
    /// value; the snapshot is used until an event invalidates it. A live
    /// value, once present, always wins.
    pub fn status(&mut self) -> CacheStatus {
        if let Some(status) = self.live_status {
            return status;
        }
        if self.cached_status.is_none() {
            self.cached_status = Some(self.backend.get_status(self.host_id));
        }
        self.cached_status.unwrap_or_default()
    }

    /// Ask the backend to start an update check.
    pub fn start_update(&mut self) -> bool {
        self.backend.start_update(self.host_id)
    }

    /// Ask the backend to swap in a ready cache version.
    pub fn swap_cache(&mut self) -> bool {
        // A swap changes the status; drop the saved values so the backend
        // is queried for the real one.
        self.live_status = None;
        self.cached_status = None;
        self.backend.swap_cache(self.host_id)
    }

    fn document_cache_id(&self) -> CacheId {
        self.document_response
            .as_ref()
            .map(|response| response.cache_id)
            .unwrap_or(CacheId::NONE)
    }
}

impl<B: CacheBackend, C: CacheHostClient> Drop for CacheHost<B, C> {
    fn drop(&mut self) {
        // Unregister with the backend before releasing the handle; the
        // reverse order could hand the handle to a new host while events
        // addressed to this one are still in flight.
        self.backend.unregister_host(self.host_id);
        HostRegistry::global().release(self.host_id);
    }
}
