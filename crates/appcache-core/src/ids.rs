//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up the two integer handles
//! in play here, e.g., passing a backend CacheId where a HostId is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle identifying one live cache host within the process.
///
/// Allocated by the host registry; the backend uses it to correlate
/// asynchronous messages with the host instance they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostId(u32);

impl HostId {
    /// Wrap a raw handle value.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw handle value.
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host#{}", self.0)
    }
}

/// Identifier of a cache owned by the backend.
///
/// `CacheId::NONE` means "no cache association".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheId(i64);

impl CacheId {
    /// Sentinel for "no cache".
    pub const NONE: CacheId = CacheId(0);

    /// Wrap a raw cache id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw cache id.
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Check whether this is the "no cache" sentinel.
    pub const fn is_none(&self) -> bool {
        self.0 == Self::NONE.0
    }
}

impl fmt::Display for CacheId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "cache#none")
        } else {
            write!(f, "cache#{}", self.0)
        }
    }
}
