//! Per-frame application cache host.
//!
//! This crate provides:
//! - `CacheHost` - The per-navigable-unit status tracker and the
//!   manifest-based cache selection algorithm
//! - `HostRegistry` - Process-wide host handle allocation
//! - `InMemoryBackend` - A `CacheBackend` for development and testing

mod host;
mod memory;
mod registry;

pub use host::*;
pub use memory::*;
pub use registry::*;
