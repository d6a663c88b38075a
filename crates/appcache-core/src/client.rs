//! Scripting bridge contract.

use url::Url;

use crate::event::CacheEventId;
use crate::log::LogLevel;

/// Contract implemented by the scripting bridge listening to a host.
///
/// Handlers run page script, which can tear down arbitrary browser state
/// as a side effect. Hosts therefore finish all of their own bookkeeping
/// before any `notify_*` call and touch nothing afterwards.
pub trait CacheHostClient {
    /// Relay a lifecycle event to script.
    fn notify_event(&self, event: CacheEventId);

    /// Relay a progress tick to script.
    fn notify_progress_event(&self, url: &Url, num_total: u32, num_complete: u32);

    /// Forward a formatted console message for the page.
    fn notify_log_message(&self, _level: LogLevel, _message: &str) {}
}
